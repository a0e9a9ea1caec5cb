//! Diplomacy eligibility predicates.
//!
//! Pure functions over the game view: who may meet at all, and who may
//! gather intelligence on whom. Intelligence eligibility is deliberately
//! looser than meeting eligibility.

use chancery_protocol::PlayerId;

use crate::options::{DiplomacyMode, GameOptions};
use crate::world::{GameView, PlayerKind};

/// Whether the game-wide diplomacy policy allows this pair to negotiate.
/// Fail closed: `Disabled` (and nothing else) permits nobody.
pub fn diplomacy_possible(
    world: &impl GameView,
    mode: DiplomacyMode,
    a: PlayerId,
    b: PlayerId,
) -> bool {
    let a_human = world.player_kind(a) == PlayerKind::Human;
    let b_human = world.player_kind(b) == PlayerKind::Human;

    match mode {
        DiplomacyMode::All => true,
        DiplomacyMode::HumansOnly => a_human && b_human,
        DiplomacyMode::AisOnly => !a_human && !b_human,
        DiplomacyMode::NoAis => a_human || b_human,
        DiplomacyMode::NoMixed => a_human == b_human,
        DiplomacyMode::TeamsOnly => world.same_team(a, b),
        DiplomacyMode::Disabled => false,
    }
}

/// Whether `player` may open a meeting with `other`. All conditions are
/// mandatory: both alive and distinct, policy permits, no active
/// diplomacy-blocking effect on either side, and the pair has an embassy or
/// a live contact window in at least one direction.
pub fn could_meet_with_player(
    world: &impl GameView,
    opts: &GameOptions,
    player: PlayerId,
    other: PlayerId,
) -> bool {
    if player == other || !world.player_alive(player) || !world.player_alive(other) {
        return false;
    }
    if !diplomacy_possible(world, opts.diplomacy, player, other) {
        tracing::debug!(?player, ?other, mode = ?opts.diplomacy, "diplomacy policy forbids meeting");
        return false;
    }
    if world.diplomacy_blocked(player) || world.diplomacy_blocked(other) {
        return false;
    }
    world.has_embassy(player, other)
        || world.has_embassy(other, player)
        || world.contact_turns_left(player, other) > 0
        || world.contact_turns_left(other, player) > 0
}

/// Whether `player` may gather intelligence on `other`. No policy or
/// blocking-effect gate: a contact window in either direction or a
/// team-wide embassy suffices.
pub fn could_intel_with_player(world: &impl GameView, player: PlayerId, other: PlayerId) -> bool {
    if player == other || !world.player_alive(player) || !world.player_alive(other) {
        return false;
    }
    world.contact_turns_left(player, other) > 0
        || world.contact_turns_left(other, player) > 0
        || world.team_has_embassy(player, other)
}
