//! Hero equipment items and the per-level upgrade cost table.

use crate::ore::OreBundle;
use crate::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The five heroes that carry equipment, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Hero {
    #[serde(rename = "Barbarian King")]
    BarbarianKing,
    #[serde(rename = "Archer Queen")]
    ArcherQueen,
    #[serde(rename = "Grand Warden")]
    GrandWarden,
    #[serde(rename = "Royal Champion")]
    RoyalChampion,
    #[serde(rename = "Minion Prince")]
    MinionPrince,
}

impl Hero {
    pub const ALL: [Hero; 5] = [
        Hero::BarbarianKing,
        Hero::ArcherQueen,
        Hero::GrandWarden,
        Hero::RoyalChampion,
        Hero::MinionPrince,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Hero::BarbarianKing => "Barbarian King",
            Hero::ArcherQueen => "Archer Queen",
            Hero::GrandWarden => "Grand Warden",
            Hero::RoyalChampion => "Royal Champion",
            Hero::MinionPrince => "Minion Prince",
        }
    }
}

impl fmt::Display for Hero {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Hero {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Hero::ALL
            .into_iter()
            .find(|h| h.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownHero(s.to_string()))
    }
}

/// Equipment tier. Determines the level ceiling and the cost partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Epic,
}

impl Rarity {
    /// Highest reachable level for this rarity.
    pub const fn max_level(self) -> u8 {
        match self {
            Rarity::Common => 18,
            Rarity::Epic => 27,
        }
    }

    /// Catalog spelling: `"epic"` in any case is Epic, anything else Common.
    pub fn from_catalog(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("epic") {
            Rarity::Epic
        } else {
            Rarity::Common
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rarity::Common => f.write_str("Common"),
            Rarity::Epic => f.write_str("Epic"),
        }
    }
}

/// One piece of hero equipment with the player's planned level range.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentItem {
    /// Stable catalog identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Hero the item belongs to.
    pub hero: Hero,
    /// Optional icon location for display.
    #[serde(default)]
    pub icon_url: Option<String>,
    pub rarity: Rarity,
    /// Level the item is at today (>= 1).
    pub current_level: u8,
    /// Level the player wants to reach (current..=max).
    pub target_level: u8,
    pub is_selected: bool,
    pub is_hidden: bool,
}

impl EquipmentItem {
    /// A level 1 item targeting its rarity's maximum, selected and visible.
    pub fn new(id: impl Into<String>, name: impl Into<String>, hero: Hero, rarity: Rarity) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hero,
            icon_url: None,
            rarity,
            current_level: 1,
            target_level: rarity.max_level(),
            is_selected: true,
            is_hidden: false,
        }
    }

    /// Same item with a new level range, checked against the rarity ceiling.
    pub fn with_levels(mut self, current: u8, target: u8) -> Result<Self, ValidationError> {
        check_level_range(self.rarity, current, target)?;
        self.current_level = current;
        self.target_level = target;
        Ok(self)
    }

    pub fn max_level(&self) -> u8 {
        self.rarity.max_level()
    }

    /// Hide or show the item. Hiding always clears the selection; showing
    /// leaves it unselected.
    pub fn set_hidden(&mut self, hidden: bool) {
        self.is_hidden = hidden;
        if hidden {
            self.is_selected = false;
        }
    }
}

/// Validate `1 <= current <= target <= rarity.max_level()`.
pub fn check_level_range(rarity: Rarity, current: u8, target: u8) -> Result<(), ValidationError> {
    let max = rarity.max_level();
    if current < 1 || current > max {
        return Err(ValidationError::LevelOutOfRange {
            level: current,
            min: 1,
            max,
        });
    }
    if target < current || target > max {
        return Err(ValidationError::LevelOutOfRange {
            level: target,
            min: current,
            max,
        });
    }
    Ok(())
}

/// Marginal ore cost of each upgrade step, per rarity.
///
/// The entry at `level` is the cost of going from `level` to `level + 1`.
/// Absent entries read as zero so a partially loaded table still answers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UpgradeCostTable {
    #[serde(default)]
    pub common: BTreeMap<u8, OreBundle>,
    #[serde(default)]
    pub epic: BTreeMap<u8, OreBundle>,
}

impl UpgradeCostTable {
    pub fn partition(&self, rarity: Rarity) -> &BTreeMap<u8, OreBundle> {
        match rarity {
            Rarity::Common => &self.common,
            Rarity::Epic => &self.epic,
        }
    }

    /// Cost of upgrading a `rarity` item from `level` to `level + 1`.
    pub fn marginal(&self, rarity: Rarity, level: u8) -> OreBundle {
        self.partition(rarity)
            .get(&level)
            .copied()
            .unwrap_or(OreBundle::ZERO)
    }

    /// Builder used by tests and tools to fill in single steps.
    pub fn with_step(mut self, rarity: Rarity, level: u8, cost: OreBundle) -> Self {
        let part = match rarity {
            Rarity::Common => &mut self.common,
            Rarity::Epic => &mut self.epic,
        };
        part.insert(level, cost);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.common.is_empty() && self.epic.is_empty()
    }
}
