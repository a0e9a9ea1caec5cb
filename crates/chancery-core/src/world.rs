//! Read-only window onto the surrounding game engine.
//!
//! The negotiation core never owns game state. Everything it needs to know
//! about players, visibility, and the loaded ruleset comes through
//! [`GameView`], implemented by the host engine (and by scripted fixtures in
//! tests).

use chancery_protocol::{BuildingId, CityId, DiplState, Hex, PlayerId, TechId, UnitId};

use crate::requirement::{ReqContext, Requirement};

/// Human vs AI classification, as read from the player roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Ai,
}

/// Wonder classification of a building. Wonders are globally visible by
/// design, which makes wide-range building requirements knowable to anyone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WonderKind {
    None,
    Small,
    Great,
}

/// Oracle over external game state.
///
/// Split in two concerns: plain facts (ownership, liveness, diplomatic
/// records) and *visibility* queries ("can this player see that"), which are
/// what the meta-knowledge evaluator is built on. `requirement_active` is
/// the truth oracle consulted only once knowability is established.
pub trait GameView {
    // --- players -----------------------------------------------------------

    fn player_alive(&self, player: PlayerId) -> bool;
    fn player_kind(&self, player: PlayerId) -> PlayerKind;
    fn same_team(&self, a: PlayerId, b: PlayerId) -> bool;
    /// Current diplomatic state between two players (symmetric record).
    fn diplomatic_state(&self, a: PlayerId, b: PlayerId) -> DiplState;
    /// Turns of unsolicited-contact grace remaining for `of` toward `with`.
    fn contact_turns_left(&self, of: PlayerId, with: PlayerId) -> u16;
    /// A real embassy, as opposed to one merely reported or effect-granted.
    fn has_real_embassy(&self, of: PlayerId, with: PlayerId) -> bool;
    /// Any embassy, real or effect-granted.
    fn has_embassy(&self, of: PlayerId, with: PlayerId) -> bool;
    /// Team-wide embassy of `of`'s team with `with`.
    fn team_has_embassy(&self, of: PlayerId, with: PlayerId) -> bool;
    /// An active effect forbids this player from conducting diplomacy.
    fn diplomacy_blocked(&self, player: PlayerId) -> bool;

    // --- ruleset facts -----------------------------------------------------

    fn is_valid_advance(&self, tech: TechId) -> bool;
    fn wonder_kind(&self, building: BuildingId) -> WonderKind;
    /// The ruleset flags this improvement as visible from outside the city.
    fn improvement_visible(&self, building: BuildingId) -> bool;
    /// The city (if any) holding this great wonder.
    fn great_wonder_city(&self, building: BuildingId) -> Option<CityId>;

    // --- visibility --------------------------------------------------------

    fn can_see_unit(&self, pov: PlayerId, unit: UnitId) -> bool;
    fn unit_owner(&self, unit: UnitId) -> PlayerId;
    /// Tile currently inside the observer's vision.
    fn tile_seen(&self, pov: PlayerId, tile: Hex) -> bool;
    /// Tile ever explored by the observer (weaker than seen).
    fn tile_known(&self, pov: PlayerId, tile: Hex) -> bool;
    /// Could the observer see units standing on this tile, if any were there.
    fn can_see_units_on_tile(&self, pov: PlayerId, tile: Hex) -> bool;
    fn city_on_tile(&self, tile: Hex) -> Option<CityId>;
    /// Outside view: size, existence, visible improvements.
    fn can_see_city_externals(&self, pov: PlayerId, city: CityId) -> bool;
    /// Owner-level view of a city's internals.
    fn can_see_city_internals(&self, pov: PlayerId, city: CityId) -> bool;
    /// One of the observer's own cities sits on or adjacent to this tile.
    fn owns_city_on_or_adjacent(&self, pov: PlayerId, tile: Hex) -> bool;
    /// The observer can see the target's researched techs (self or a
    /// team-wide embassy).
    fn can_see_techs(&self, pov: PlayerId, target: PlayerId) -> bool;

    // --- truth oracle ------------------------------------------------------

    /// Whether the requirement actually holds, evaluated with full
    /// knowledge. Only consulted once the meta-knowledge evaluator has
    /// established that the observer could know the answer.
    fn requirement_active(
        &self,
        context: &ReqContext,
        other_context: &ReqContext,
        req: &Requirement,
    ) -> bool;
}
