//! Diplomacy messages between the transport layer and the negotiation core.
//!
//! The transport decodes its wire format into `DiplomacyRequest` values and
//! feeds them to the core; the core emits `DiplomacyNotice` values for the
//! presentation layer, fire-and-forget.

use serde::{Deserialize, Serialize};

use crate::{ClauseKind, PlayerId, TreatySnapshot};

/// Inbound operations (transport -> core).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DiplomacyRequest {
    /// Open a negotiation between two players.
    BeginMeeting {
        initiator: PlayerId,
        counterpart: PlayerId,
    },
    /// Set both acceptance flags on an existing treaty.
    AcceptTreaty {
        plr0: PlayerId,
        plr1: PlayerId,
        accept0: bool,
        accept1: bool,
    },
    /// Tear down a negotiation.
    CancelMeeting {
        plr0: PlayerId,
        plr1: PlayerId,
        canceller: PlayerId,
    },
    /// Propose a clause; `giver` is the side that gives the thing.
    ProposeClause {
        plr0: PlayerId,
        plr1: PlayerId,
        giver: PlayerId,
        kind: ClauseKind,
        value: i32,
    },
    /// Withdraw a previously proposed clause (exact match).
    WithdrawClause {
        plr0: PlayerId,
        plr1: PlayerId,
        giver: PlayerId,
        kind: ClauseKind,
        value: i32,
    },
}

/// Outbound notifications (core -> presentation). Each carries the treaty
/// snapshot after (or, for `ClauseWillChange`, immediately before) the
/// change, plus the counterpart from the recipient's point of view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DiplomacyNotice {
    MeetingStarted {
        treaty: TreatySnapshot,
        counterpart: PlayerId,
        initiator: PlayerId,
    },
    /// Sent after any acceptance or clause change.
    TreatyUpdated {
        treaty: TreatySnapshot,
        counterpart: PlayerId,
    },
    MeetingCancelled {
        treaty: TreatySnapshot,
        counterpart: PlayerId,
        initiator: PlayerId,
    },
    /// Pre-change hook: fired immediately before a clause create/remove is
    /// applied, carrying the pre-change snapshot.
    ClauseWillChange {
        treaty: TreatySnapshot,
        counterpart: PlayerId,
    },
    ClauseAdded {
        treaty: TreatySnapshot,
        counterpart: PlayerId,
    },
    ClauseRemoved {
        treaty: TreatySnapshot,
        counterpart: PlayerId,
    },
}

impl DiplomacyNotice {
    /// The snapshot carried by this notice.
    pub fn treaty(&self) -> &TreatySnapshot {
        match self {
            DiplomacyNotice::MeetingStarted { treaty, .. }
            | DiplomacyNotice::TreatyUpdated { treaty, .. }
            | DiplomacyNotice::MeetingCancelled { treaty, .. }
            | DiplomacyNotice::ClauseWillChange { treaty, .. }
            | DiplomacyNotice::ClauseAdded { treaty, .. }
            | DiplomacyNotice::ClauseRemoved { treaty, .. } => treaty,
        }
    }
}
