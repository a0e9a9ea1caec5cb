//! Meta-knowledge evaluation.
//!
//! Decides whether a requirement's truth value is even *knowable* to an
//! observing player whose view of the world is limited by fog of war, and
//! only then consults the truth oracle. The result is a tri-state: a
//! requirement about an unseen unit's hit points is neither satisfied nor
//! failed from the observer's chair; it is `Maybe`.
//!
//! The knowability rules are per subject kind and per range. Any
//! combination not explicitly supported below is unknowable; treating an
//! unhandled kind as knowable would leak hidden state to a player, so the
//! conservative default is load-bearing.

use chancery_protocol::{Hex, PlayerId};

use crate::eligibility::could_intel_with_player;
use crate::requirement::{CityTileProp, ReqContext, ReqRange, ReqSubject, Requirement, TileRelProp};
use crate::world::{GameView, WonderKind};

/// Ternary truth value with `Maybe` as the absorbing "unknowable" element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriState {
    Yes,
    No,
    Maybe,
}

impl TriState {
    /// AND with No dominant over Maybe.
    pub fn and(self, other: TriState) -> TriState {
        match (self, other) {
            (TriState::No, _) | (_, TriState::No) => TriState::No,
            (TriState::Maybe, _) | (_, TriState::Maybe) => TriState::Maybe,
            (TriState::Yes, TriState::Yes) => TriState::Yes,
        }
    }
}

/// How a missing subject entity is treated.
///
/// Under `Certain` the absence of a referenced entity is itself decidable
/// ("there is no such unit, so the requirement knowably fails"); under
/// `Possible` the entity might simply be out of sight, so the question is
/// unknowable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Certainty {
    Certain,
    Possible,
}

fn missing_entity_knowable(certainty: Certainty) -> bool {
    matches!(certainty, Certainty::Certain)
}

/// Evaluate one requirement from `pov`'s chair.
///
/// `pov == None` is the omniscient (server-side) observer, for whom
/// everything is knowable and the call reduces to the truth oracle.
pub fn eval_requirement(
    world: &impl GameView,
    pov: Option<PlayerId>,
    context: &ReqContext,
    other_context: &ReqContext,
    req: &Requirement,
    certainty: Certainty,
) -> TriState {
    if !requirement_knowable(world, pov, context, other_context, req, certainty) {
        return TriState::Maybe;
    }
    if world.requirement_active(context, other_context, req) {
        TriState::Yes
    } else {
        TriState::No
    }
}

/// Evaluate a requirement vector (AND semantics).
///
/// `No` short-circuits; otherwise `Maybe` absorbs; `Yes` only if every
/// element is `Yes`. Evaluation order cannot change the result.
pub fn eval_requirements(
    world: &impl GameView,
    pov: Option<PlayerId>,
    context: &ReqContext,
    other_context: &ReqContext,
    reqs: &[Requirement],
    certainty: Certainty,
) -> TriState {
    let mut out = TriState::Yes;
    for req in reqs {
        match eval_requirement(world, pov, context, other_context, req, certainty) {
            TriState::No => return TriState::No,
            TriState::Maybe => out = TriState::Maybe,
            TriState::Yes => {}
        }
    }
    out
}

/// Whether `pov` could determine the requirement's truth value at all.
fn requirement_knowable(
    world: &impl GameView,
    pov: Option<PlayerId>,
    context: &ReqContext,
    other_context: &ReqContext,
    req: &Requirement,
    certainty: Certainty,
) -> bool {
    let Some(pov) = pov else {
        return true;
    };

    match req.subject {
        // Unit-local properties anyone can read off a visible unit. No
        // extended-range support exists for unit-local subjects.
        ReqSubject::UnitType { .. }
        | ReqSubject::UnitFlag { .. }
        | ReqSubject::MinVeteran { .. }
        | ReqSubject::MinHitPoints { .. }
        | ReqSubject::UnitActivity { .. } => {
            if req.range != ReqRange::Local {
                return false;
            }
            match context.unit {
                None => missing_entity_knowable(certainty),
                Some(unit) => world.can_see_unit(pov, unit),
            }
        }

        // Unit state: some flags are the owner's private knowledge even
        // when the unit is hidden.
        ReqSubject::UnitState { prop } => {
            if req.range != ReqRange::Local {
                return false;
            }
            match context.unit {
                None => missing_entity_knowable(certainty),
                Some(unit) => {
                    world.can_see_unit(pov, unit)
                        || (prop.owner_known() && world.unit_owner(unit) == pov)
                }
            }
        }

        // Move fragments left: owner-only knowledge.
        ReqSubject::MinMoveFrags { .. } => {
            if req.range != ReqRange::Local {
                return false;
            }
            match context.unit {
                None => missing_entity_knowable(certainty),
                Some(unit) => {
                    world.can_see_unit(pov, unit) || world.unit_owner(unit) == pov
                }
            }
        }

        // Diplomatic relation between the two context players: knowable to
        // a party, or to anyone who can see all of either party's symmetric
        // relationships. Team/alliance/world ranges are an unresolved gap
        // and stay unknowable.
        ReqSubject::DiplRel { .. } | ReqSubject::DiplRelUnitAny { .. } => {
            match req.range {
                ReqRange::Local | ReqRange::Player => {}
                _ => return false,
            }
            let (subject, counter) = match (context.player, other_context.player) {
                (Some(s), Some(c)) => (s, c),
                _ => return missing_entity_knowable(certainty),
            };
            pov == subject
                || pov == counter
                || sym_diplrels_visible(world, pov, subject)
                || sym_diplrels_visible(world, pov, counter)
        }

        // City size is outside state.
        ReqSubject::MinCitySize { .. } => match context.city {
            None => missing_entity_knowable(certainty),
            Some(city) => world.can_see_city_externals(pov, city),
        },

        // City-tile properties go by tile visibility; "claimed" is also
        // known to whoever owns a city on or next to the tile, fog or not.
        ReqSubject::CityTile { prop } => match context.tile {
            None => missing_entity_knowable(certainty),
            Some(tile) => {
                tiles_seen(world, pov, tile, req.range)
                    || (prop == CityTileProp::Claimed
                        && world.owns_city_on_or_adjacent(pov, tile))
            }
        },

        ReqSubject::Building { building } => {
            building_knowable(world, pov, context, building, req.range, certainty)
        }

        // Nation identity is public, unless the range points at a player
        // who is not in the context at all.
        ReqSubject::Nation { .. } | ReqSubject::NationGroup { .. } => match req.range {
            ReqRange::Player | ReqRange::Team | ReqRange::Alliance => {
                context.player.is_some() || missing_entity_knowable(certainty)
            }
            _ => true,
        },

        // Techs: visible per player if the observer can see their research
        // (self or team embassy); world-range survives-mode is broadcast.
        ReqSubject::Tech { .. } | ReqSubject::TechFlag { .. } => match req.range {
            ReqRange::Player => match context.player {
                None => missing_entity_knowable(certainty),
                Some(target) => world.can_see_techs(pov, target),
            },
            ReqRange::World => req.survives,
            _ => false,
        },

        ReqSubject::Government { .. } => match req.range {
            ReqRange::Player => match context.player {
                None => missing_entity_knowable(certainty),
                Some(target) => pov == target || could_intel_with_player(world, pov, target),
            },
            _ => false,
        },

        // Local-range extra subjects are property checks on an already
        // identified extra; no visibility gate applies.
        ReqSubject::Extra { .. } | ReqSubject::ExtraFlag { .. } | ReqSubject::RoadFlag { .. }
            if req.range == ReqRange::Local =>
        {
            context.extra.is_some() || missing_entity_knowable(certainty)
        }

        // Terrain and extras on the ground follow tile visibility.
        ReqSubject::Terrain { .. }
        | ReqSubject::TerrainClass { .. }
        | ReqSubject::TerrainFlag { .. }
        | ReqSubject::TerrainAlter { .. }
        | ReqSubject::Extra { .. }
        | ReqSubject::ExtraFlag { .. }
        | ReqSubject::RoadFlag { .. } => match context.tile {
            None => missing_entity_knowable(certainty),
            Some(tile) => tiles_seen(world, pov, tile, req.range),
        },

        // Unit-count caps need a hypothetical "could I see units there"
        // capability on every tile in range.
        ReqSubject::MaxUnitsOnTile { .. } => match context.tile {
            None => missing_entity_knowable(certainty),
            Some(tile) => match req.range {
                ReqRange::Tile => world.can_see_units_on_tile(pov, tile),
                ReqRange::CAdjacent | ReqRange::Adjacent => {
                    world.can_see_units_on_tile(pov, tile)
                        && tile.neighbors().all(|n| world.can_see_units_on_tile(pov, n))
                }
                _ => false,
            },
        },

        // Geometry is public information once both endpoints are given.
        ReqSubject::MaxDistanceSq { .. } => {
            if context.tile.is_some() && other_context.tile.is_some() {
                true
            } else {
                missing_entity_knowable(certainty)
            }
        }

        // Region size and tile relations only need *known* (explored)
        // status, not live vision. Region-surrounded and continent ranges
        // are too expensive to answer client-side and stay unknowable.
        ReqSubject::MaxRegionTiles { .. } => {
            tiles_known_in_range(world, pov, context.tile, req.range, certainty)
        }
        ReqSubject::TileRel { rel } => match rel {
            TileRelProp::RegionSurrounded => false,
            TileRelProp::SameTerrainClass | TileRelProp::SameRegion => {
                tiles_known_in_range(world, pov, context.tile, req.range, certainty)
                    && match other_context.tile {
                        None => missing_entity_knowable(certainty),
                        Some(tile) => world.tile_known(pov, tile),
                    }
            }
        },

        // These describe the situation being evaluated, not hidden state.
        ReqSubject::Action { .. } | ReqSubject::OutputType { .. } => true,

        // Server settings are broadcast to every client.
        ReqSubject::ServerSetting { .. } => true,
    }
}

/// Observer can see all of `player`'s symmetric diplomatic relationships:
/// their own, or those of someone they have an embassy or fresh contact
/// with.
fn sym_diplrels_visible(world: &impl GameView, pov: PlayerId, player: PlayerId) -> bool {
    pov == player
        || world.has_embassy(pov, player)
        || world.contact_turns_left(pov, player) > 0
}

/// Tile-visibility check per range: the tile itself, or the tile plus its
/// whole neighbor ring. Ranges beyond adjacency are unsupported.
fn tiles_seen(world: &impl GameView, pov: PlayerId, tile: Hex, range: ReqRange) -> bool {
    match range {
        ReqRange::Tile => world.tile_seen(pov, tile),
        ReqRange::CAdjacent | ReqRange::Adjacent => {
            world.tile_seen(pov, tile) && tile.neighbors().all(|n| world.tile_seen(pov, n))
        }
        _ => false,
    }
}

/// Known-status (explored) analogue of `tiles_seen`.
fn tiles_known_in_range(
    world: &impl GameView,
    pov: PlayerId,
    tile: Option<Hex>,
    range: ReqRange,
    certainty: Certainty,
) -> bool {
    let Some(tile) = tile else {
        return missing_entity_knowable(certainty);
    };
    match range {
        ReqRange::Tile => world.tile_known(pov, tile),
        ReqRange::CAdjacent | ReqRange::Adjacent => {
            world.tile_known(pov, tile) && tile.neighbors().all(|n| world.tile_known(pov, n))
        }
        _ => false,
    }
}

/// Building-presence knowability.
///
/// Wonders are globally visible by design, so wide ranges are always
/// knowable for them. At city/tile range the observer needs the city's
/// internals, or the improvement must be flagged visible and the externals
/// seen. Trade-route range is a deliberate non-goal.
fn building_knowable(
    world: &impl GameView,
    pov: PlayerId,
    context: &ReqContext,
    building: chancery_protocol::BuildingId,
    range: ReqRange,
    certainty: Certainty,
) -> bool {
    let wonder = world.wonder_kind(building);

    match range {
        ReqRange::World
        | ReqRange::Alliance
        | ReqRange::Team
        | ReqRange::Player
        | ReqRange::Continent => wonder != WonderKind::None,

        ReqRange::TradeRoute => false,

        ReqRange::City => match context.city {
            None => missing_entity_knowable(certainty),
            Some(city) => city_building_visible(world, pov, city, building),
        },

        ReqRange::Tile => {
            let city = context
                .tile
                .and_then(|tile| world.city_on_tile(tile))
                .or(context.city);
            match city {
                Some(city) => city_building_visible(world, pov, city, building),
                None => match context.tile {
                    None => missing_entity_knowable(certainty),
                    // No city here. A seen tile decides absence; a great
                    // wonder's absence is also decided by seeing the
                    // externals of whichever city actually holds it.
                    Some(tile) => {
                        if wonder == WonderKind::Great {
                            match world.great_wonder_city(building) {
                                Some(wonder_city) => {
                                    world.can_see_city_externals(pov, wonder_city)
                                        || world.tile_seen(pov, tile)
                                }
                                None => world.tile_seen(pov, tile),
                            }
                        } else {
                            world.tile_seen(pov, tile)
                        }
                    }
                },
            }
        }

        ReqRange::Local | ReqRange::CAdjacent | ReqRange::Adjacent => false,
    }
}

fn city_building_visible(
    world: &impl GameView,
    pov: PlayerId,
    city: chancery_protocol::CityId,
    building: chancery_protocol::BuildingId,
) -> bool {
    world.can_see_city_internals(pov, city)
        || (world.improvement_visible(building) && world.can_see_city_externals(pov, city))
}
