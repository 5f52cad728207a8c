//! Display-ready results for the equipment table.

use ore_core::{EquipmentItem, Hero, OreBundle, Rarity, UpgradeCostTable};
use ore_econ::{estimate_group, estimate_weeks, upgrade_cost, Estimate, GroupEstimate, IncomeReport};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which heroes and items the table shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewFilter {
    pub heroes: BTreeSet<Hero>,
    pub show_hidden: bool,
}

impl Default for ViewFilter {
    fn default() -> Self {
        Self {
            heroes: Hero::ALL.into_iter().collect(),
            show_hidden: false,
        }
    }
}

impl ViewFilter {
    /// Show only the given heroes.
    pub fn only<I: IntoIterator<Item = Hero>>(heroes: I) -> Self {
        Self {
            heroes: heroes.into_iter().collect(),
            show_hidden: false,
        }
    }

    pub fn with_hidden(mut self, show_hidden: bool) -> Self {
        self.show_hidden = show_hidden;
        self
    }

    pub fn includes(&self, item: &EquipmentItem) -> bool {
        self.heroes.contains(&item.hero) && (self.show_hidden || !item.is_hidden)
    }
}

/// One row of the equipment table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemReport {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    pub current_level: u8,
    pub target_level: u8,
    pub cost: OreBundle,
    pub estimate: Estimate,
    pub is_selected: bool,
    pub is_hidden: bool,
}

impl ItemReport {
    pub(crate) fn new(item: &EquipmentItem, costs: &UpgradeCostTable, weekly_income: &OreBundle) -> Self {
        let cost = upgrade_cost(item, costs);
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            rarity: item.rarity,
            current_level: item.current_level,
            target_level: item.target_level,
            cost,
            estimate: estimate_weeks(&cost, weekly_income),
            is_selected: item.is_selected && !item.is_hidden,
            is_hidden: item.is_hidden,
        }
    }

    /// Level progress strip over `1..=max`: `o` current, `0` target,
    /// `-` in between, `.` elsewhere.
    pub fn level_track(&self) -> String {
        (1..=self.rarity.max_level())
            .map(|level| {
                if level == self.current_level {
                    'o'
                } else if level == self.target_level {
                    '0'
                } else if level > self.current_level && level < self.target_level {
                    '-'
                } else {
                    '.'
                }
            })
            .collect()
    }
}

/// A hero header row with its group totals, followed by its item rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroGroupReport {
    pub hero: Hero,
    /// Totals over the hero's non-hidden items.
    pub group: GroupEstimate,
    pub items: Vec<ItemReport>,
}

impl HeroGroupReport {
    /// `None` when the filter leaves nothing to show for `hero`.
    pub(crate) fn build(
        hero: Hero,
        equipment: &[EquipmentItem],
        filter: &ViewFilter,
        costs: &UpgradeCostTable,
        weekly_income: &OreBundle,
    ) -> Option<Self> {
        let shown: Vec<&EquipmentItem> = equipment
            .iter()
            .filter(|i| i.hero == hero && filter.includes(i))
            .collect();
        if shown.is_empty() {
            return None;
        }
        let group = estimate_group(
            shown.iter().copied().filter(|i| !i.is_hidden),
            costs,
            weekly_income,
        );
        let items = shown
            .into_iter()
            .map(|i| ItemReport::new(i, costs, weekly_income))
            .collect();
        Some(Self { hero, group, items })
    }
}

/// Everything the planner shows after one recomputation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerReport {
    pub income: IncomeReport,
    pub heroes: Vec<HeroGroupReport>,
    pub selected_count: usize,
    pub hidden_count: usize,
}
