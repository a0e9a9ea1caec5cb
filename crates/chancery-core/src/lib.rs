//! Chancery negotiation core.
//!
//! Manages diplomatic treaties between pairs of players: the clause catalog
//! loaded from the ruleset, legality checking of proposed clauses under
//! partial (fog-of-war-limited) information, the treaty state machine with
//! its acceptance flags, the process-wide treaty ledger, and the eligibility
//! predicates deciding who may negotiate at all.
//!
//! The core owns no sockets and renders nothing: a transport layer decodes
//! wire messages into [`DiplomacySession`] operations, and the core reports
//! changes back through the [`NoticeSink`] seam.

mod catalog;
mod eligibility;
mod knowledge;
mod ledger;
mod options;
mod requirement;
mod session;
mod treaty;
mod world;

pub use crate::catalog::{CatalogError, ClauseCatalog, ClauseInfo};
pub use crate::eligibility::{could_intel_with_player, could_meet_with_player, diplomacy_possible};
pub use crate::knowledge::{eval_requirement, eval_requirements, Certainty, TriState};
pub use crate::ledger::TreatyLedger;
pub use crate::options::{DiplomacyMode, GameOptions};
pub use crate::requirement::{
    ActionKind, CityTileProp, DiplRelation, OutputKind, ReqContext, ReqRange, ReqSubject,
    Requirement, TerrainClass, TileRelProp, UnitStateProp,
};
pub use crate::session::{DiplomacySession, NoticeSink, RecordedNotices};
pub use crate::treaty::{Clause, ClauseSlot, Treaty, Viewpoint};
pub use crate::world::{GameView, PlayerKind, WonderKind};
