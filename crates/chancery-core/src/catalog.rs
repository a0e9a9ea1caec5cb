//! Clause catalog: which clause kinds exist in the loaded ruleset, and the
//! requirement vectors gating each of them.
//!
//! The catalog is built once at ruleset load and read-only afterwards.
//! A clause kind is usable only if the ruleset enables it *and* the
//! corresponding game-wide trading option (for gold/tech/city transfers) is
//! on; both gates must hold.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use chancery_protocol::ClauseKind;

use crate::options::GameOptions;
use crate::requirement::Requirement;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unknown clause kind: {0}")]
    UnknownClause(String),
}

/// Immutable per-ruleset entry for one clause kind.
#[derive(Clone, Debug, Default)]
pub struct ClauseInfo {
    pub enabled: bool,
    /// Conditions on the giving side.
    pub giver_reqs: Vec<Requirement>,
    /// Conditions on the receiving side.
    pub receiver_reqs: Vec<Requirement>,
    /// Conditions either side may satisfy.
    pub either_reqs: Vec<Requirement>,
}

/// Registry of clause infos, indexed by [`ClauseKind`].
#[derive(Clone, Debug)]
pub struct ClauseCatalog {
    infos: [ClauseInfo; ClauseKind::ALL.len()],
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    clauses: BTreeMap<String, RawClauseInfo>,
}

#[derive(Debug, Deserialize)]
struct RawClauseInfo {
    #[serde(default = "default_enabled")]
    enabled: bool,
    #[serde(default)]
    giver_reqs: Vec<Requirement>,
    #[serde(default)]
    receiver_reqs: Vec<Requirement>,
    #[serde(default)]
    either_reqs: Vec<Requirement>,
}

fn default_enabled() -> bool {
    true
}

impl Default for ClauseCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ClauseCatalog {
    /// Fresh catalog: every kind present, disabled, with empty requirement
    /// vectors. This is also the reset state on ruleset unload.
    pub fn new() -> Self {
        Self {
            infos: Default::default(),
        }
    }

    /// Parse a catalog from ruleset YAML. Kinds absent from the source stay
    /// disabled.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_yaml::from_str(yaml)?;
        let mut catalog = Self::new();
        for (name, raw_info) in raw.clauses {
            let kind = parse_clause_kind(&name)
                .ok_or_else(|| CatalogError::UnknownClause(name.clone()))?;
            catalog.infos[kind.index()] = ClauseInfo {
                enabled: raw_info.enabled,
                giver_reqs: raw_info.giver_reqs,
                receiver_reqs: raw_info.receiver_reqs,
                either_reqs: raw_info.either_reqs,
            };
        }
        Ok(catalog)
    }

    /// The bundled default clause ruleset.
    pub fn embedded() -> Self {
        let yaml = include_str!("../data/clauses.yaml");
        // The bundled file is checked by the test suite.
        Self::from_yaml(yaml).unwrap_or_else(|e| {
            tracing::error!("bundled clause ruleset is invalid: {e}");
            Self::new()
        })
    }

    pub fn info(&self, kind: ClauseKind) -> &ClauseInfo {
        &self.infos[kind.index()]
    }

    pub fn info_mut(&mut self, kind: ClauseKind) -> &mut ClauseInfo {
        &mut self.infos[kind.index()]
    }

    /// Ruleset enable flag crossed with the game-wide trading options.
    /// A kind can be structurally present in the ruleset yet suppressed by
    /// a game setting.
    pub fn enabled(&self, kind: ClauseKind, opts: &GameOptions) -> bool {
        if !self.infos[kind.index()].enabled {
            return false;
        }
        match kind {
            ClauseKind::Gold => opts.trading_gold,
            ClauseKind::TechTransfer => opts.trading_tech,
            ClauseKind::City => opts.trading_city,
            _ => true,
        }
    }
}

fn parse_clause_kind(name: &str) -> Option<ClauseKind> {
    let kind = match name {
        "tech_transfer" => ClauseKind::TechTransfer,
        "gold" => ClauseKind::Gold,
        "world_map" => ClauseKind::WorldMap,
        "sea_map" => ClauseKind::SeaMap,
        "city" => ClauseKind::City,
        "ceasefire" => ClauseKind::Ceasefire,
        "peace" => ClauseKind::Peace,
        "alliance" => ClauseKind::Alliance,
        "vision" => ClauseKind::Vision,
        "embassy" => ClauseKind::Embassy,
        _ => return None,
    };
    Some(kind)
}
