//! Diplomacy protocol types for treaties and the clauses that compose them.
//!
//! A treaty under negotiation pairs exactly two players and carries an
//! ordered list of proposed clauses plus each side's acceptance flag. These
//! are the wire shapes; the negotiation rules live in `chancery-core`.

use serde::{Deserialize, Serialize};

use crate::PlayerId;

/// The kinds of clause a treaty may contain.
///
/// Whether a kind is usable in a given game is decided by the clause catalog
/// (ruleset enable flag crossed with game-wide trading options), not here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseKind {
    /// Giver teaches the receiver a technology (`value` = tech id).
    TechTransfer,
    /// One-time gold payment from the giver (`value` = amount).
    Gold,
    /// Giver shares their full world map.
    WorldMap,
    /// Giver shares their ocean/coastline map.
    SeaMap,
    /// Giver cedes a city (`value` = city id).
    City,
    /// Hostilities pause; a pact clause.
    Ceasefire,
    /// Permanent peace; a pact clause.
    Peace,
    /// Full alliance; a pact clause.
    Alliance,
    /// Giver grants shared vision.
    Vision,
    /// Giver hosts an embassy for the receiver.
    Embassy,
}

impl ClauseKind {
    pub const ALL: [ClauseKind; 10] = [
        ClauseKind::TechTransfer,
        ClauseKind::Gold,
        ClauseKind::WorldMap,
        ClauseKind::SeaMap,
        ClauseKind::City,
        ClauseKind::Ceasefire,
        ClauseKind::Peace,
        ClauseKind::Alliance,
        ClauseKind::Vision,
        ClauseKind::Embassy,
    ];

    /// Pact clauses change the overall diplomatic tier; at most one may
    /// exist in a treaty at a time.
    #[inline]
    pub fn is_pact(self) -> bool {
        matches!(
            self,
            ClauseKind::Ceasefire | ClauseKind::Peace | ClauseKind::Alliance
        )
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Diplomatic state between two players, lowest tier first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiplState {
    NoContact,
    War,
    Ceasefire,
    Armistice,
    Peace,
    Alliance,
    Team,
}

/// One proposed term within a treaty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseData {
    pub kind: ClauseKind,
    /// The side that gives the thing.
    pub from: PlayerId,
    /// Integer payload; meaning depends on `kind` (tech id, gold amount,
    /// city id, or 0 for boolean clauses).
    pub value: i32,
}

/// Snapshot of a treaty under negotiation, as carried by every outbound
/// notice. Acceptance applies only to the exact clause list shown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatySnapshot {
    pub plr0: PlayerId,
    pub plr1: PlayerId,
    pub accept0: bool,
    pub accept1: bool,
    pub clauses: Vec<ClauseData>,
}

impl TreatySnapshot {
    pub fn involves(&self, player: PlayerId) -> bool {
        self.plr0 == player || self.plr1 == player
    }

    pub fn other_party(&self, player: PlayerId) -> Option<PlayerId> {
        if self.plr0 == player {
            Some(self.plr1)
        } else if self.plr1 == player {
            Some(self.plr0)
        } else {
            None
        }
    }
}
