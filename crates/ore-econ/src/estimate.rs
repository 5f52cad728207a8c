//! Upgrade cost lookups and time-to-complete estimates.

use ore_core::{EquipmentItem, OreBundle, OreKind, Rarity, UpgradeCostTable};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// How long an upgrade plan takes at the current income.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Estimate {
    /// Whole weeks until every required ore is earned.
    Weeks(u32),
    /// No usable estimate: nothing measurable to pay, or a required ore
    /// is never earned.
    Unknown,
    /// The group has nothing left to upgrade.
    NothingToUpgrade,
}

impl Estimate {
    pub fn weeks(self) -> Option<u32> {
        match self {
            Estimate::Weeks(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Estimate::Weeks(1) => f.write_str("≈1 week"),
            Estimate::Weeks(n) => write!(f, "≈{n} weeks"),
            Estimate::Unknown => f.write_str("-"),
            Estimate::NothingToUpgrade => f.write_str("—"),
        }
    }
}

/// Ore needed to take a `rarity` item from level `from` to level `to`.
///
/// Sums the marginal step costs for `from..to`; missing steps count as zero
/// and an empty range costs nothing.
pub fn upgrade_cost_between(rarity: Rarity, from: u8, to: u8, table: &UpgradeCostTable) -> OreBundle {
    (from..to).map(|level| table.marginal(rarity, level)).sum()
}

/// Ore needed to take `item` from its current level to its target level.
pub fn upgrade_cost(item: &EquipmentItem, table: &UpgradeCostTable) -> OreBundle {
    upgrade_cost_between(item.rarity, item.current_level, item.target_level, table)
}

/// Fractional weeks of the slowest ore kind. Kinds without income are
/// left out rather than treated as impossible.
fn bottleneck_weeks(cost: &OreBundle, income: &OreBundle) -> Decimal {
    OreKind::ALL
        .into_iter()
        .filter(|&k| income.get(k) > Decimal::ZERO)
        .map(|k| cost.get(k) / income.get(k))
        .fold(Decimal::ZERO, Decimal::max)
}

fn whole_weeks(weeks: Decimal) -> u32 {
    weeks.ceil().to_u32().unwrap_or(u32::MAX)
}

/// Weeks until `cost` is covered by `weekly_income`, rounded up.
///
/// Example:
/// let e = estimate_weeks(&OreBundle::units(2000, 0, 0), &OreBundle::units(1000, 0, 0));
/// assert_eq!(e, Estimate::Weeks(2));
pub fn estimate_weeks(cost: &OreBundle, weekly_income: &OreBundle) -> Estimate {
    let weeks = bottleneck_weeks(cost, weekly_income);
    if weeks > Decimal::ZERO {
        Estimate::Weeks(whole_weeks(weeks))
    } else {
        Estimate::Unknown
    }
}

/// Cost and completion estimate for the items of one hero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupEstimate {
    pub epic_cost: OreBundle,
    pub common_cost: OreBundle,
    pub total_cost: OreBundle,
    pub estimate: Estimate,
}

/// Estimate a group of items that share one weekly income.
///
/// Epic items are funded first. Their summed cost is assumed to be spent
/// evenly over their own completion time, and Common items only get what
/// is left each week. This is a heuristic, not an optimal schedule.
pub fn estimate_group<'a, I>(items: I, table: &UpgradeCostTable, weekly_income: &OreBundle) -> GroupEstimate
where
    I: IntoIterator<Item = &'a EquipmentItem>,
{
    let mut epic_cost = OreBundle::ZERO;
    let mut common_cost = OreBundle::ZERO;
    for item in items {
        let cost = upgrade_cost(item, table);
        match item.rarity {
            Rarity::Epic => epic_cost += cost,
            Rarity::Common => common_cost += cost,
        }
    }
    GroupEstimate {
        epic_cost,
        common_cost,
        total_cost: epic_cost + common_cost,
        estimate: schedule(&epic_cost, &common_cost, weekly_income),
    }
}

/// The Epic-first policy over already summed costs.
///
/// An Epic cost on an ore kind that is never earned makes the whole group
/// `Unknown`. The Common side has no such check: a residual income of zero
/// on every kind counts as zero extra weeks.
pub fn schedule(epic_cost: &OreBundle, common_cost: &OreBundle, weekly_income: &OreBundle) -> Estimate {
    if epic_cost.is_zero() && common_cost.is_zero() {
        return Estimate::NothingToUpgrade;
    }

    let epic_infeasible = OreKind::ALL
        .into_iter()
        .any(|k| epic_cost.get(k) > Decimal::ZERO && weekly_income.get(k) <= Decimal::ZERO);
    if epic_infeasible {
        debug!(%epic_cost, %weekly_income, "epic upgrades need ore that is never earned");
        return Estimate::Unknown;
    }

    let epic_weeks = estimate_weeks(epic_cost, weekly_income).weeks().unwrap_or(0);
    let residual = if epic_weeks == 0 {
        *weekly_income
    } else {
        let weeks = Decimal::from(epic_weeks);
        weekly_income.saturating_sub(epic_cost.map(|_, v| v / weeks))
    };

    let common_weeks = if residual.is_zero() {
        0
    } else {
        estimate_weeks(common_cost, &residual).weeks().unwrap_or(0)
    };

    match epic_weeks.saturating_add(common_weeks) {
        0 => Estimate::Unknown,
        n => Estimate::Weeks(n),
    }
}
