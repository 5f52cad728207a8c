//! Player settings documents, in the shape the settings form produces.

use crate::{embedded, DataError};
use ore_core::{validate_profile, League, OreBundle, PlayerProfile};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Settings as entered by the player. Field names follow the form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSettings {
    /// League name; blank means not chosen yet.
    #[serde(default)]
    pub league: String,
    pub attack_town_hall: u8,
    pub clan_war_attack_per_week: u8,
    pub clan_war_ratio: Decimal,
    #[serde(default)]
    pub ores_buy_using_raid_medals: OreBundle,
    #[serde(default)]
    pub ores_buy_using_gem: OreBundle,
    #[serde(default, alias = "oreTraiderFree")]
    pub ore_trader_free: bool,
}

impl PlayerSettings {
    /// Convert to a validated profile.
    pub fn into_profile(self) -> Result<PlayerProfile, DataError> {
        let league = if self.league.trim().is_empty() {
            None
        } else {
            Some(self.league.parse::<League>()?)
        };
        let profile = PlayerProfile {
            league,
            attack_town_hall: self.attack_town_hall,
            clan_war_attacks_per_week: self.clan_war_attack_per_week,
            clan_war_win_ratio: self.clan_war_ratio,
            trader_free_glowy: self.ore_trader_free,
            medal_purchased_ore: self.ores_buy_using_raid_medals,
            gem_purchased_ore: self.ores_buy_using_gem,
        };
        validate_profile(&profile)?;
        Ok(profile)
    }
}

impl From<&PlayerProfile> for PlayerSettings {
    fn from(p: &PlayerProfile) -> Self {
        Self {
            league: p.league.map(|l| l.name().to_string()).unwrap_or_default(),
            attack_town_hall: p.attack_town_hall,
            clan_war_attack_per_week: p.clan_war_attacks_per_week,
            clan_war_ratio: p.clan_war_win_ratio,
            ores_buy_using_raid_medals: p.medal_purchased_ore,
            ores_buy_using_gem: p.gem_purchased_ore,
            ore_trader_free: p.trader_free_glowy,
        }
    }
}

/// Decode settings from YAML (JSON documents are valid YAML too).
pub fn parse_settings(text: &str) -> Result<PlayerSettings, DataError> {
    Ok(serde_yaml::from_str(text)?)
}

pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<PlayerSettings, DataError> {
    let text = fs::read_to_string(path.as_ref())?;
    let settings = parse_settings(&text)?;
    info!(path = %path.as_ref().display(), league = %settings.league, "loaded player settings");
    Ok(settings)
}

/// The settings shipped with the planner.
pub fn default_settings() -> Result<PlayerSettings, DataError> {
    parse_settings(embedded::DEFAULT_SETTINGS_YAML)
}
