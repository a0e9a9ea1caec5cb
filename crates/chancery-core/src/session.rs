//! Session layer: inbound diplomacy operations and outbound notices.
//!
//! The transport layer decodes its wire format into [`DiplomacyRequest`]
//! values and calls the operations here; each operation validates through
//! the model, mutates the ledger, and reports the result to both parties
//! through the [`NoticeSink`] seam. Notices are fire-and-forget: the core
//! never reads anything back from the presentation layer.
//!
//! Processing is single-threaded and message-driven; each operation runs to
//! completion before the next, so treaty mutations are implicitly
//! serialized. A host that drives this from several threads must funnel all
//! calls through one serialization point.

use chancery_protocol::{
    ClauseKind, DiplomacyNotice, DiplomacyRequest, PlayerId, TreatySnapshot,
};

use crate::catalog::ClauseCatalog;
use crate::eligibility::could_meet_with_player;
use crate::ledger::TreatyLedger;
use crate::options::GameOptions;
use crate::treaty::Viewpoint;
use crate::world::GameView;

/// Presentation seam. `to` is the recipient; the notice's counterpart field
/// is the other negotiating player from the recipient's point of view.
pub trait NoticeSink {
    fn send(&mut self, to: PlayerId, notice: DiplomacyNotice);
}

/// Vec-backed sink, for tests and for hosts that batch notices into their
/// own transport.
#[derive(Clone, Debug, Default)]
pub struct RecordedNotices {
    pub notices: Vec<(PlayerId, DiplomacyNotice)>,
}

impl RecordedNotices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<(PlayerId, DiplomacyNotice)> {
        std::mem::take(&mut self.notices)
    }
}

impl NoticeSink for RecordedNotices {
    fn send(&mut self, to: PlayerId, notice: DiplomacyNotice) {
        self.notices.push((to, notice));
    }
}

/// All live negotiations plus the operations the transport maps onto them.
#[derive(Clone, Debug, Default)]
pub struct DiplomacySession {
    ledger: TreatyLedger,
}

impl DiplomacySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(&self) -> &TreatyLedger {
        &self.ledger
    }

    /// Open a meeting between two players. Eligibility-gated; if the pair
    /// already has a meeting open this is a no-op miss.
    pub fn begin_meeting(
        &mut self,
        world: &impl GameView,
        opts: &GameOptions,
        sink: &mut impl NoticeSink,
        initiator: PlayerId,
        counterpart: PlayerId,
    ) -> bool {
        if !could_meet_with_player(world, opts, initiator, counterpart) {
            tracing::debug!(?initiator, ?counterpart, "meeting refused");
            return false;
        }
        if self.ledger.find(initiator, counterpart).is_some() {
            return false;
        }

        let treaty = self.ledger.begin(initiator, counterpart);
        let snapshot = treaty.snapshot();
        tracing::debug!(?initiator, ?counterpart, "meeting started");
        send_both(sink, &snapshot, |counterpart| DiplomacyNotice::MeetingStarted {
            treaty: snapshot.clone(),
            counterpart,
            initiator,
        });
        true
    }

    /// Set both acceptance flags as instructed by the transport layer,
    /// which owns authorization of who may set which flag.
    pub fn accept_treaty(
        &mut self,
        sink: &mut impl NoticeSink,
        plr0: PlayerId,
        plr1: PlayerId,
        accept0: bool,
        accept1: bool,
    ) -> bool {
        let Some(treaty) = self.ledger.find_mut(plr0, plr1) else {
            return false;
        };
        treaty.set_acceptance(plr0, accept0);
        treaty.set_acceptance(plr1, accept1);

        let snapshot = treaty.snapshot();
        send_both(sink, &snapshot, |counterpart| DiplomacyNotice::TreatyUpdated {
            treaty: snapshot.clone(),
            counterpart,
        });
        true
    }

    /// Tear down the pair's meeting, dropping the treaty and its clauses.
    pub fn cancel_meeting(
        &mut self,
        sink: &mut impl NoticeSink,
        plr0: PlayerId,
        plr1: PlayerId,
        canceller: PlayerId,
    ) -> bool {
        let Some(treaty) = self.ledger.remove(plr0, plr1) else {
            return false;
        };
        let snapshot = treaty.snapshot();
        tracing::debug!(?plr0, ?plr1, ?canceller, "meeting cancelled");
        send_both(sink, &snapshot, |counterpart| DiplomacyNotice::MeetingCancelled {
            treaty: snapshot.clone(),
            counterpart,
            initiator: canceller,
        });
        true
    }

    /// Validate and add a clause. The pre-change hook fires only when a
    /// mutation is actually about to happen; rejections emit nothing.
    #[allow(clippy::too_many_arguments)]
    pub fn propose_clause(
        &mut self,
        world: &impl GameView,
        catalog: &ClauseCatalog,
        opts: &GameOptions,
        sink: &mut impl NoticeSink,
        plr0: PlayerId,
        plr1: PlayerId,
        giver: PlayerId,
        kind: ClauseKind,
        value: i32,
        viewpoint: Viewpoint,
    ) -> bool {
        let Some(treaty) = self.ledger.find_mut(plr0, plr1) else {
            return false;
        };
        let Some(slot) = treaty.check_clause(world, catalog, opts, giver, kind, value, viewpoint)
        else {
            return false;
        };

        let before = treaty.snapshot();
        send_both(sink, &before, |counterpart| DiplomacyNotice::ClauseWillChange {
            treaty: before.clone(),
            counterpart,
        });

        treaty.apply_clause(slot, giver, kind, value);

        let after = treaty.snapshot();
        tracing::debug!(?giver, ?kind, value, "clause added");
        send_both(sink, &after, |counterpart| DiplomacyNotice::ClauseAdded {
            treaty: after.clone(),
            counterpart,
        });
        true
    }

    /// Withdraw an exact clause. A miss is benign and emits nothing.
    pub fn withdraw_clause(
        &mut self,
        sink: &mut impl NoticeSink,
        plr0: PlayerId,
        plr1: PlayerId,
        giver: PlayerId,
        kind: ClauseKind,
        value: i32,
    ) -> bool {
        let Some(treaty) = self.ledger.find_mut(plr0, plr1) else {
            return false;
        };
        let Some(idx) = treaty.find_clause(giver, kind, value) else {
            return false;
        };

        let before = treaty.snapshot();
        send_both(sink, &before, |counterpart| DiplomacyNotice::ClauseWillChange {
            treaty: before.clone(),
            counterpart,
        });

        treaty.remove_clause_at(idx);

        let after = treaty.snapshot();
        tracing::debug!(?giver, ?kind, value, "clause removed");
        send_both(sink, &after, |counterpart| DiplomacyNotice::ClauseRemoved {
            treaty: after.clone(),
            counterpart,
        });
        true
    }

    /// Cancel every meeting involving `player` (disconnects and deaths).
    /// Pairs are collected first; the ledger is never mutated mid-walk.
    pub fn cancel_meetings_for(&mut self, sink: &mut impl NoticeSink, player: PlayerId) {
        let pairs: Vec<(PlayerId, PlayerId)> = self
            .ledger
            .iter()
            .filter(|t| t.involves(player))
            .map(|t| (t.plr0, t.plr1))
            .collect();
        for (plr0, plr1) in pairs {
            self.cancel_meeting(sink, plr0, plr1, player);
        }
    }

    /// Authoritative dispatch of a decoded wire request. Clause proposals
    /// are checked from the omniscient (server) viewpoint.
    pub fn handle_request(
        &mut self,
        world: &impl GameView,
        catalog: &ClauseCatalog,
        opts: &GameOptions,
        sink: &mut impl NoticeSink,
        request: DiplomacyRequest,
    ) -> bool {
        match request {
            DiplomacyRequest::BeginMeeting {
                initiator,
                counterpart,
            } => self.begin_meeting(world, opts, sink, initiator, counterpart),
            DiplomacyRequest::AcceptTreaty {
                plr0,
                plr1,
                accept0,
                accept1,
            } => self.accept_treaty(sink, plr0, plr1, accept0, accept1),
            DiplomacyRequest::CancelMeeting {
                plr0,
                plr1,
                canceller,
            } => self.cancel_meeting(sink, plr0, plr1, canceller),
            DiplomacyRequest::ProposeClause {
                plr0,
                plr1,
                giver,
                kind,
                value,
            } => self.propose_clause(
                world,
                catalog,
                opts,
                sink,
                plr0,
                plr1,
                giver,
                kind,
                value,
                Viewpoint::Omniscient,
            ),
            DiplomacyRequest::WithdrawClause {
                plr0,
                plr1,
                giver,
                kind,
                value,
            } => self.withdraw_clause(sink, plr0, plr1, giver, kind, value),
        }
    }
}

/// Send one notice to each negotiating party, with the counterpart set from
/// that recipient's point of view.
fn send_both<F>(sink: &mut impl NoticeSink, snapshot: &TreatySnapshot, mut make: F)
where
    F: FnMut(PlayerId) -> DiplomacyNotice,
{
    sink.send(snapshot.plr0, make(snapshot.plr1));
    sink.send(snapshot.plr1, make(snapshot.plr0));
}
