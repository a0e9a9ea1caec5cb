//! Treaty and clause model.
//!
//! A treaty pairs two players and carries an insertion-ordered clause list
//! plus both sides' acceptance flags. Acceptance applies to an exact clause
//! set: any mutation of the list clears both flags. Every rejection path is
//! a pure boolean "no" with zero observable side effects.

use chancery_protocol::{ClauseData, ClauseKind, DiplState, PlayerId, TechId, TreatySnapshot};

use crate::catalog::ClauseCatalog;
use crate::knowledge::{eval_requirements, Certainty, TriState};
use crate::options::GameOptions;
use crate::requirement::ReqContext;
use crate::world::GameView;

/// One proposed term: what is given, by whom, and the kind-dependent
/// integer payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clause {
    pub kind: ClauseKind,
    pub from: PlayerId,
    pub value: i32,
}

/// Whose point of view legality is checked from.
///
/// A client checking its own side (`Giver`/`Receiver`) is deliberately less
/// strict than the authoritative server (`Omniscient`): it checks only the
/// requirements it can be responsible for, optimistically, since the rest
/// of the world is fogged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Viewpoint {
    Giver,
    Receiver,
    Omniscient,
}

/// Where a new clause lands, resolved as a pure query before any mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseSlot {
    /// Exact (kind, from, value) duplicate: benign no-op, not an error.
    Duplicate,
    /// Overwrite the clause at this index (pact replaces pact; same-side
    /// gold replaces same-side gold).
    Merge(usize),
    Append,
}

/// A treaty under negotiation between exactly two players.
///
/// The pairing order is arbitrary but fixed at creation; pact-state checks
/// compare against the pair as created.
#[derive(Clone, Debug)]
pub struct Treaty {
    pub plr0: PlayerId,
    pub plr1: PlayerId,
    pub accept0: bool,
    pub accept1: bool,
    clauses: Vec<Clause>,
}

impl Treaty {
    pub fn new(plr0: PlayerId, plr1: PlayerId) -> Self {
        Self {
            plr0,
            plr1,
            accept0: false,
            accept1: false,
            clauses: Vec::new(),
        }
    }

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

    pub fn is_pair(&self, a: PlayerId, b: PlayerId) -> bool {
        (self.plr0 == a && self.plr1 == b) || (self.plr0 == b && self.plr1 == a)
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Set one side's acceptance flag. Flags are only ever *cleared* by the
    /// model itself, as a side effect of clause changes.
    pub fn set_acceptance(&mut self, side: PlayerId, accepts: bool) -> bool {
        if side == self.plr0 {
            self.accept0 = accepts;
            true
        } else if side == self.plr1 {
            self.accept1 = accepts;
            true
        } else {
            false
        }
    }

    pub fn snapshot(&self) -> TreatySnapshot {
        TreatySnapshot {
            plr0: self.plr0,
            plr1: self.plr1,
            accept0: self.accept0,
            accept1: self.accept1,
            clauses: self
                .clauses
                .iter()
                .map(|c| ClauseData {
                    kind: c.kind,
                    from: c.from,
                    value: c.value,
                })
                .collect(),
        }
    }

    /// Full legality check for a proposed clause, with no mutation.
    ///
    /// Returns the slot the clause would land in, or `None` if the proposal
    /// is rejected (including the benign exact-duplicate case).
    pub fn check_clause(
        &self,
        world: &impl GameView,
        catalog: &ClauseCatalog,
        opts: &GameOptions,
        giver: PlayerId,
        kind: ClauseKind,
        value: i32,
        viewpoint: Viewpoint,
    ) -> Option<ClauseSlot> {
        if !self.involves(giver) {
            return None;
        }
        let receiver = self.other_party(giver)?;

        // Kind-specific payload validity.
        if kind == ClauseKind::TechTransfer {
            match tech_from_value(value) {
                Some(tech) if world.is_valid_advance(tech) => {}
                _ => return None,
            }
        }

        // Proposing a pact you already effectively have is illegal.
        if kind.is_pact() {
            let state = world.diplomatic_state(self.plr0, self.plr1);
            if pact_conflicts_with_state(kind, state) {
                return None;
            }
        }

        // An embassy clause is pointless when a real one already stands.
        if kind == ClauseKind::Embassy && world.has_real_embassy(receiver, giver) {
            return None;
        }

        // Ruleset enable flag crossed with game options.
        if !catalog.enabled(kind, opts) {
            return None;
        }

        if !self.requirements_permit(world, catalog, giver, receiver, kind, viewpoint) {
            return None;
        }

        match self.resolve_slot(giver, kind, value) {
            ClauseSlot::Duplicate => None,
            slot => Some(slot),
        }
    }

    /// Tri-modal requirement check.
    ///
    /// Giver/receiver vectors are each mandatory for the side(s) the
    /// viewpoint covers; the either-side vector (omniscient mode only)
    /// passes if *one* of the two context orderings passes. The AND/OR
    /// asymmetry is intentional and preserved as observed.
    fn requirements_permit(
        &self,
        world: &impl GameView,
        catalog: &ClauseCatalog,
        giver: PlayerId,
        receiver: PlayerId,
        kind: ClauseKind,
        viewpoint: Viewpoint,
    ) -> bool {
        let info = catalog.info(kind);
        let giver_ctx = ReqContext::player(giver);
        let recv_ctx = ReqContext::player(receiver);

        if matches!(viewpoint, Viewpoint::Omniscient | Viewpoint::Giver) {
            let pov = match viewpoint {
                Viewpoint::Giver => Some(giver),
                _ => None,
            };
            if eval_requirements(
                world,
                pov,
                &giver_ctx,
                &recv_ctx,
                &info.giver_reqs,
                Certainty::Possible,
            ) == TriState::No
            {
                return false;
            }
        }

        if matches!(viewpoint, Viewpoint::Omniscient | Viewpoint::Receiver) {
            let pov = match viewpoint {
                Viewpoint::Receiver => Some(receiver),
                _ => None,
            };
            if eval_requirements(
                world,
                pov,
                &recv_ctx,
                &giver_ctx,
                &info.receiver_reqs,
                Certainty::Possible,
            ) == TriState::No
            {
                return false;
            }
        }

        if viewpoint == Viewpoint::Omniscient && !info.either_reqs.is_empty() {
            let forward = eval_requirements(
                world,
                None,
                &giver_ctx,
                &recv_ctx,
                &info.either_reqs,
                Certainty::Possible,
            );
            let reverse = eval_requirements(
                world,
                None,
                &recv_ctx,
                &giver_ctx,
                &info.either_reqs,
                Certainty::Possible,
            );
            if forward == TriState::No && reverse == TriState::No {
                return false;
            }
        }

        true
    }

    /// Dedup/merge resolution as a pure query over the current clause list.
    pub fn resolve_slot(&self, giver: PlayerId, kind: ClauseKind, value: i32) -> ClauseSlot {
        for (idx, clause) in self.clauses.iter().enumerate() {
            if clause.kind == kind && clause.from == giver && clause.value == value {
                return ClauseSlot::Duplicate;
            }
            // Only one pact clause per treaty: newest proposal replaces.
            if kind.is_pact() && clause.kind.is_pact() {
                return ClauseSlot::Merge(idx);
            }
            // Only one gold amount per side: new amount replaces.
            if kind == ClauseKind::Gold && clause.kind == ClauseKind::Gold && clause.from == giver
            {
                return ClauseSlot::Merge(idx);
            }
        }
        ClauseSlot::Append
    }

    /// Apply exactly one mutation for a resolved slot and clear both accept
    /// flags.
    pub fn apply_clause(&mut self, slot: ClauseSlot, giver: PlayerId, kind: ClauseKind, value: i32) {
        match slot {
            ClauseSlot::Duplicate => return,
            ClauseSlot::Merge(idx) => {
                self.clauses[idx] = Clause {
                    kind,
                    from: giver,
                    value,
                };
            }
            ClauseSlot::Append => {
                self.clauses.push(Clause {
                    kind,
                    from: giver,
                    value,
                });
            }
        }
        self.accept0 = false;
        self.accept1 = false;
    }

    /// Validate and apply in one step.
    pub fn add_clause(
        &mut self,
        world: &impl GameView,
        catalog: &ClauseCatalog,
        opts: &GameOptions,
        giver: PlayerId,
        kind: ClauseKind,
        value: i32,
        viewpoint: Viewpoint,
    ) -> bool {
        match self.check_clause(world, catalog, opts, giver, kind, value, viewpoint) {
            Some(slot) => {
                self.apply_clause(slot, giver, kind, value);
                true
            }
            None => false,
        }
    }

    /// Exact-match position of a clause, if present.
    pub fn find_clause(&self, giver: PlayerId, kind: ClauseKind, value: i32) -> Option<usize> {
        self.clauses
            .iter()
            .position(|c| c.kind == kind && c.from == giver && c.value == value)
    }

    /// Remove an exact (kind, from, value) match. A miss (e.g. two
    /// withdrawal requests racing) is benign and changes nothing.
    pub fn remove_clause(&mut self, giver: PlayerId, kind: ClauseKind, value: i32) -> bool {
        match self.find_clause(giver, kind, value) {
            Some(idx) => {
                self.remove_clause_at(idx);
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_clause_at(&mut self, idx: usize) {
        self.clauses.remove(idx);
        self.accept0 = false;
        self.accept1 = false;
    }

    /// Drop every clause. Does not touch the pairing.
    pub fn clear(&mut self) {
        self.clauses.clear();
    }
}

/// The fixed pact-conflict mapping: peace *and* armistice block proposing
/// peace; ceasefire blocks only ceasefire; alliance blocks only alliance.
/// Asymmetric by game-design intent; do not generalize.
fn pact_conflicts_with_state(kind: ClauseKind, state: DiplState) -> bool {
    matches!(
        (kind, state),
        (ClauseKind::Peace, DiplState::Peace)
            | (ClauseKind::Peace, DiplState::Armistice)
            | (ClauseKind::Alliance, DiplState::Alliance)
            | (ClauseKind::Ceasefire, DiplState::Ceasefire)
    )
}

/// A tech payload that does not fit the id space is invalid, not clamped.
fn tech_from_value(value: i32) -> Option<TechId> {
    u16::try_from(value).ok().map(TechId::new)
}
