//! Player profile, league ladder and the bonus tables income is derived from.

use crate::ore::{OreBundle, OreKind};
use crate::ValidationError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Lowest town hall with war bonus data.
pub const MIN_TOWN_HALL: u8 = 8;
/// Highest town hall with war bonus data.
pub const MAX_TOWN_HALL: u8 = 17;
/// Clan war attacks available per week.
pub const MAX_WAR_ATTACKS_PER_WEEK: u8 = 7;

/// Ranked competitive tier, ordered from the top of the ladder down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum League {
    #[serde(rename = "Legend")]
    Legend,
    #[serde(rename = "Titan I")]
    TitanI,
    #[serde(rename = "Titan II")]
    TitanII,
    #[serde(rename = "Titan III")]
    TitanIII,
    #[serde(rename = "Champion I")]
    ChampionI,
    #[serde(rename = "Champion II")]
    ChampionII,
    #[serde(rename = "Champion III")]
    ChampionIII,
    #[serde(rename = "Master I")]
    MasterI,
    #[serde(rename = "Master II")]
    MasterII,
    #[serde(rename = "Master III")]
    MasterIII,
    #[serde(rename = "Crystal I")]
    CrystalI,
    #[serde(rename = "Crystal II")]
    CrystalII,
    #[serde(rename = "Crystal III")]
    CrystalIII,
    #[serde(rename = "Gold I")]
    GoldI,
    #[serde(rename = "Gold II")]
    GoldII,
    #[serde(rename = "Gold III")]
    GoldIII,
    #[serde(rename = "Silver I")]
    SilverI,
    #[serde(rename = "Silver II")]
    SilverII,
    #[serde(rename = "Silver III")]
    SilverIII,
    #[serde(rename = "Bronze I")]
    BronzeI,
    #[serde(rename = "Bronze II")]
    BronzeII,
    #[serde(rename = "Bronze III")]
    BronzeIII,
}

impl League {
    /// The full ladder in display order.
    pub const ALL: [League; 22] = [
        League::Legend,
        League::TitanI,
        League::TitanII,
        League::TitanIII,
        League::ChampionI,
        League::ChampionII,
        League::ChampionIII,
        League::MasterI,
        League::MasterII,
        League::MasterIII,
        League::CrystalI,
        League::CrystalII,
        League::CrystalIII,
        League::GoldI,
        League::GoldII,
        League::GoldIII,
        League::SilverI,
        League::SilverII,
        League::SilverIII,
        League::BronzeI,
        League::BronzeII,
        League::BronzeIII,
    ];

    /// In-game name, e.g. "Titan I".
    pub fn name(self) -> &'static str {
        match self {
            League::Legend => "Legend",
            League::TitanI => "Titan I",
            League::TitanII => "Titan II",
            League::TitanIII => "Titan III",
            League::ChampionI => "Champion I",
            League::ChampionII => "Champion II",
            League::ChampionIII => "Champion III",
            League::MasterI => "Master I",
            League::MasterII => "Master II",
            League::MasterIII => "Master III",
            League::CrystalI => "Crystal I",
            League::CrystalII => "Crystal II",
            League::CrystalIII => "Crystal III",
            League::GoldI => "Gold I",
            League::GoldII => "Gold II",
            League::GoldIII => "Gold III",
            League::SilverI => "Silver I",
            League::SilverII => "Silver II",
            League::SilverIII => "Silver III",
            League::BronzeI => "Bronze I",
            League::BronzeII => "Bronze II",
            League::BronzeIII => "Bronze III",
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for League {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        League::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownLeague(s.to_string()))
    }
}

/// Daily (shiny, glowy) star bonus per league.
const DAILY_BONUS: [(League, i64, i64); 22] = [
    (League::Legend, 1000, 54),
    (League::TitanI, 925, 50),
    (League::TitanII, 850, 46),
    (League::TitanIII, 775, 42),
    (League::ChampionI, 700, 38),
    (League::ChampionII, 625, 34),
    (League::ChampionIII, 550, 30),
    (League::MasterI, 525, 28),
    (League::MasterII, 500, 26),
    (League::MasterIII, 450, 24),
    (League::CrystalI, 425, 22),
    (League::CrystalII, 400, 20),
    (League::CrystalIII, 375, 18),
    (League::GoldI, 350, 16),
    (League::GoldII, 325, 14),
    (League::GoldIII, 300, 12),
    (League::SilverI, 275, 11),
    (League::SilverII, 250, 10),
    (League::SilverIII, 200, 9),
    (League::BronzeI, 175, 8),
    (League::BronzeII, 175, 7),
    (League::BronzeIII, 125, 6),
];

/// Ore per won clan war attack, by attacking town hall.
const WAR_BONUS: [(u8, i64, i64, i64); 10] = [
    (8, 380, 15, 0),
    (9, 410, 18, 0),
    (10, 460, 21, 3),
    (11, 560, 24, 3),
    (12, 610, 27, 4),
    (13, 710, 30, 4),
    (14, 810, 33, 4),
    (15, 960, 36, 5),
    (16, 1110, 39, 6),
    (17, 1110, 39, 6),
];

/// Lookup tables for daily league bonus and per-attack war bonus.
///
/// Lookups never fail: a league or town hall without an entry reads as
/// an empty bundle, which is the expected state while data is loading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BonusTables {
    /// Ore granted per day by league.
    #[serde(default)]
    pub daily: BTreeMap<League, OreBundle>,
    /// Ore granted per war attack by attacking town hall.
    #[serde(default)]
    pub war: BTreeMap<u8, OreBundle>,
}

impl BonusTables {
    /// Tables with no entries; every lookup yields zero.
    pub fn empty() -> Self {
        Self {
            daily: BTreeMap::new(),
            war: BTreeMap::new(),
        }
    }

    pub fn daily_bonus(&self, league: Option<League>) -> OreBundle {
        league
            .and_then(|l| self.daily.get(&l))
            .copied()
            .unwrap_or(OreBundle::ZERO)
    }

    pub fn war_bonus(&self, town_hall: u8) -> OreBundle {
        self.war.get(&town_hall).copied().unwrap_or(OreBundle::ZERO)
    }
}

impl Default for BonusTables {
    fn default() -> Self {
        let daily = DAILY_BONUS
            .iter()
            .map(|&(league, shiny, glowy)| (league, OreBundle::units(shiny, glowy, 0)))
            .collect();
        let war = WAR_BONUS
            .iter()
            .map(|&(th, shiny, glowy, starry)| (th, OreBundle::units(shiny, glowy, starry)))
            .collect();
        Self { daily, war }
    }
}

/// Caps and slider steps for ore bought in one shop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PurchaseLimits {
    /// Shop name used in error messages.
    pub shop: &'static str,
    pub shiny_max: u32,
    pub shiny_step: u32,
    pub glowy_max: u32,
    pub glowy_step: u32,
    pub starry_max: u32,
    pub starry_step: u32,
}

impl PurchaseLimits {
    /// Weekly ore purchasable with raid medals.
    pub const MEDAL: PurchaseLimits = PurchaseLimits {
        shop: "raid medal",
        shiny_max: 1000,
        shiny_step: 500,
        glowy_max: 100,
        glowy_step: 50,
        starry_max: 10,
        starry_step: 5,
    };

    /// Weekly ore purchasable with gems.
    pub const GEM: PurchaseLimits = PurchaseLimits {
        shop: "gem",
        shiny_max: 1500,
        shiny_step: 300,
        glowy_max: 120,
        glowy_step: 60,
        starry_max: 15,
        starry_step: 15,
    };

    /// (max, step) for one ore kind.
    pub fn bounds(&self, kind: OreKind) -> (u32, u32) {
        match kind {
            OreKind::Shiny => (self.shiny_max, self.shiny_step),
            OreKind::Glowy => (self.glowy_max, self.glowy_step),
            OreKind::Starry => (self.starry_max, self.starry_step),
        }
    }

    /// Check every axis is within `[0, max]` and on a step boundary.
    pub fn check(&self, bundle: &OreBundle) -> Result<(), ValidationError> {
        for kind in OreKind::ALL {
            let value = bundle.get(kind);
            let (max, step) = self.bounds(kind);
            let in_range = value >= Decimal::ZERO && value <= Decimal::from(max);
            let on_step = step == 0 || (value % Decimal::from(step)).is_zero();
            if !in_range || !on_step {
                return Err(ValidationError::PurchaseOutOfRange {
                    shop: self.shop,
                    kind,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Everything about the player that feeds weekly income.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Current league; `None` contributes no daily ore.
    pub league: Option<League>,
    /// Town hall the player attacks with in clan war.
    pub attack_town_hall: u8,
    /// Clan war attacks made per week, in [0, 7].
    pub clan_war_attacks_per_week: u8,
    /// Fraction of war attacks that are won, in [0, 1].
    pub clan_war_win_ratio: Decimal,
    /// Whether the trader's free weekly glowy ore is collected.
    pub trader_free_glowy: bool,
    /// Ore bought each week with raid medals.
    pub medal_purchased_ore: OreBundle,
    /// Ore bought each week with gems.
    pub gem_purchased_ore: OreBundle,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            league: Some(League::Legend),
            attack_town_hall: 16,
            clan_war_attacks_per_week: MAX_WAR_ATTACKS_PER_WEEK,
            clan_war_win_ratio: Decimal::ONE,
            trader_free_glowy: false,
            medal_purchased_ore: OreBundle::ZERO,
            gem_purchased_ore: OreBundle::ZERO,
        }
    }
}
