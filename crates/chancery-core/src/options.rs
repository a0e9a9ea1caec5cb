//! Game-wide diplomacy settings.

use serde::{Deserialize, Serialize};

/// Who may conduct diplomacy with whom, as a single game-wide policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiplomacyMode {
    /// Everyone may negotiate with everyone.
    All,
    /// Only human pairs may negotiate.
    HumansOnly,
    /// Only AI pairs may negotiate.
    AisOnly,
    /// At least one side must be human.
    NoAis,
    /// Both human or both AI; no mixed pairs.
    NoMixed,
    /// Only teammates may negotiate.
    TeamsOnly,
    /// Diplomacy is switched off.
    Disabled,
}

/// Game-wide knobs consulted by the negotiation core.
///
/// The trading switches suppress clause kinds even when the loaded ruleset
/// enables them; see `ClauseCatalog::enabled`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOptions {
    pub diplomacy: DiplomacyMode,
    pub trading_gold: bool,
    pub trading_tech: bool,
    pub trading_city: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            diplomacy: DiplomacyMode::All,
            trading_gold: true,
            trading_tech: true,
            trading_city: true,
        }
    }
}
