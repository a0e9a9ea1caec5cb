//! Requirement data model.
//!
//! A requirement is a (subject, range, polarity) triple supplied by the
//! ruleset: "giver already has an embassy with the receiver, range local".
//! Requirement vectors gate which clauses a catalog entry permits. The core
//! never decides a requirement's truth itself (that is the host engine's
//! `requirement_active` oracle), but it does decide *knowability* (see
//! `knowledge`), which is why every subject kind is enumerated here rather
//! than hidden behind an opaque id.

use serde::{Deserialize, Serialize};

use chancery_protocol::{
    BuildingId, CityId, DiplState, ExtraId, GovernmentId, Hex, NationGroupId, NationId,
    PlayerId, ServerSettingId, TechId, TerrainId, UnitId, UnitTypeId,
};

/// Scope of a requirement. Which ranges a subject kind supports is part of
/// the knowability table; unsupported combinations are conservatively
/// unknowable.
///
/// On the hex maps this engine family uses, `CAdjacent` and `Adjacent`
/// cover the same six-neighbor ring; both are kept so square-grid hosts can
/// diverge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReqRange {
    Local,
    Tile,
    CAdjacent,
    Adjacent,
    City,
    TradeRoute,
    Continent,
    Player,
    Team,
    Alliance,
    World,
}

/// Unit-state flags a requirement may test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitStateProp {
    /// Owner always knows; not visibility-gated.
    HasHomeCity,
    Transported,
    Transporting,
    OnLivableTile,
    /// Owner always knows; not visibility-gated.
    MovedThisTurn,
}

impl UnitStateProp {
    /// Properties the owning player knows regardless of visibility.
    pub fn owner_known(self) -> bool {
        matches!(
            self,
            UnitStateProp::HasHomeCity | UnitStateProp::MovedThisTurn
        )
    }
}

/// Relation facts between the context player and the other-context player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiplRelation {
    State(DiplState),
    NeverMet,
    Foreign,
}

/// Tile properties tied to a city's footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CityTileProp {
    Center,
    Claimed,
    Worked,
    ExtrasOwned,
    SameContinent,
    BordersRegion,
}

/// Relations between two tiles (context tile vs other-context tile).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileRelProp {
    RegionSurrounded,
    SameTerrainClass,
    SameRegion,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainClass {
    Land,
    Oceanic,
}

/// The action being evaluated, for action-context requirements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    EstablishEmbassy,
    TradeGold,
    TransferCity,
    ShareVision,
    SharedTiles,
}

/// Output/yield classification, for output-type requirements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    Food,
    Shield,
    Trade,
    Gold,
    Luxury,
    Science,
}

/// What the requirement is about. Closed set: every kind carries an explicit
/// knowability rule, and adding a kind forces the evaluator match to be
/// extended before the crate compiles again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "subject", rename_all = "snake_case")]
pub enum ReqSubject {
    UnitType { unit_type: UnitTypeId },
    UnitFlag { flag: u8 },
    UnitState { prop: UnitStateProp },
    MinVeteran { level: u8 },
    MinHitPoints { hp: u16 },
    MinMoveFrags { frags: u16 },
    UnitActivity { activity: u8 },
    DiplRel { rel: DiplRelation },
    DiplRelUnitAny { rel: DiplRelation },
    MinCitySize { size: u8 },
    CityTile { prop: CityTileProp },
    Building { building: BuildingId },
    Nation { nation: NationId },
    NationGroup { group: NationGroupId },
    Tech { tech: TechId },
    TechFlag { flag: u8 },
    Government { government: GovernmentId },
    Terrain { terrain: TerrainId },
    TerrainClass { class: TerrainClass },
    TerrainFlag { flag: u8 },
    TerrainAlter { alteration: u8 },
    Extra { extra: ExtraId },
    ExtraFlag { flag: u8 },
    RoadFlag { flag: u8 },
    MaxUnitsOnTile { count: u8 },
    MaxDistanceSq { distance_sq: u32 },
    MaxRegionTiles { tiles: u32 },
    TileRel { rel: TileRelProp },
    Action { action: ActionKind },
    OutputType { output: OutputKind },
    ServerSetting { setting: ServerSettingId },
}

/// A single ruleset condition. `present` is the polarity; `survives` marks
/// world-range requirements that persist through loss or obsolescence of the
/// source (for techs: "known by anyone, ever").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    #[serde(flatten)]
    pub subject: ReqSubject,
    pub range: ReqRange,
    #[serde(default = "default_present")]
    pub present: bool,
    #[serde(default)]
    pub survives: bool,
}

fn default_present() -> bool {
    true
}

impl Requirement {
    pub const fn new(subject: ReqSubject, range: ReqRange) -> Self {
        Self {
            subject,
            range,
            present: true,
            survives: false,
        }
    }
}

/// The facts one side brings to an evaluation. All fields optional: the
/// empty context replaces the original's null-pointer convention, removing
/// the null-dereference class outright.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReqContext {
    pub player: Option<PlayerId>,
    pub city: Option<CityId>,
    pub tile: Option<Hex>,
    pub unit: Option<UnitId>,
    pub extra: Option<ExtraId>,
}

impl ReqContext {
    pub const EMPTY: ReqContext = ReqContext {
        player: None,
        city: None,
        tile: None,
        unit: None,
        extra: None,
    };

    pub fn player(player: PlayerId) -> Self {
        Self {
            player: Some(player),
            ..Self::EMPTY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requirement_yaml_defaults() {
        let req: Requirement = serde_yaml::from_str(
            "subject: dipl_rel\nrel:\n  state: peace\nrange: local\n",
        )
        .unwrap();
        assert_eq!(
            req.subject,
            ReqSubject::DiplRel {
                rel: DiplRelation::State(DiplState::Peace)
            }
        );
        assert_eq!(req.range, ReqRange::Local);
        assert!(req.present);
        assert!(!req.survives);
    }

    #[test]
    fn owner_known_unit_props() {
        assert!(UnitStateProp::HasHomeCity.owner_known());
        assert!(UnitStateProp::MovedThisTurn.owner_known());
        assert!(!UnitStateProp::Transported.owner_known());
    }
}
