//! Weekly and monthly ore income derived from the player profile.

use ore_core::{BonusTables, OreBundle, OreKind, PlayerProfile};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Days in a week; daily league bonus is paid every day.
pub const DAYS_PER_WEEK: u32 = 7;

/// Glowy ore the trader hands out for free every week.
pub const TRADER_FREE_GLOWY: i64 = 10;

/// Average number of weeks in a month (4.33).
pub fn weeks_per_month() -> Decimal {
    Decimal::new(433, 2)
}

/// Where a slice of income comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IncomeSource {
    Daily,
    War,
    Trader,
    RaidMedal,
    Gem,
}

impl IncomeSource {
    pub const ALL: [IncomeSource; 5] = [
        IncomeSource::Daily,
        IncomeSource::War,
        IncomeSource::Trader,
        IncomeSource::RaidMedal,
        IncomeSource::Gem,
    ];

    pub fn label(self) -> &'static str {
        match self {
            IncomeSource::Daily => "Daily",
            IncomeSource::War => "War",
            IncomeSource::Trader => "Trader Free",
            IncomeSource::RaidMedal => "Raid Medal",
            IncomeSource::Gem => "Gem",
        }
    }
}

impl fmt::Display for IncomeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One bundle per income source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeSources {
    pub daily: OreBundle,
    pub war: OreBundle,
    pub trader: OreBundle,
    pub raid_medal: OreBundle,
    pub gem: OreBundle,
}

impl IncomeSources {
    pub fn get(&self, source: IncomeSource) -> OreBundle {
        match source {
            IncomeSource::Daily => self.daily,
            IncomeSource::War => self.war,
            IncomeSource::Trader => self.trader,
            IncomeSource::RaidMedal => self.raid_medal,
            IncomeSource::Gem => self.gem,
        }
    }

    /// Sources paired with their bundles, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (IncomeSource, OreBundle)> + '_ {
        IncomeSource::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    /// Pointwise sum of every source.
    pub fn total(&self) -> OreBundle {
        self.iter().map(|(_, b)| b).sum()
    }

    fn map(&self, f: impl Fn(OreBundle) -> OreBundle) -> Self {
        Self {
            daily: f(self.daily),
            war: f(self.war),
            trader: f(self.trader),
            raid_medal: f(self.raid_medal),
            gem: f(self.gem),
        }
    }
}

/// Income over one period, by source and in total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeBreakdown {
    pub sources: IncomeSources,
    pub total: OreBundle,
}

impl IncomeBreakdown {
    /// Percentage (0..=100) of `kind` income contributed by `source`.
    /// Zero when nothing of that kind is earned.
    pub fn share(&self, source: IncomeSource, kind: OreKind) -> Decimal {
        let total = self.total.get(kind);
        if total.is_zero() {
            return Decimal::ZERO;
        }
        self.sources.get(source).get(kind) / total * Decimal::ONE_HUNDRED
    }

    /// Sources that earn anything this period.
    pub fn active_sources(&self) -> impl Iterator<Item = (IncomeSource, OreBundle)> + '_ {
        self.sources.iter().filter(|(_, b)| !b.is_zero())
    }
}

/// Reporting period.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    #[default]
    Month,
}

/// Weekly income and its monthly projection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeReport {
    pub weekly: IncomeBreakdown,
    pub monthly: IncomeBreakdown,
}

impl IncomeReport {
    pub fn for_period(&self, period: Period) -> &IncomeBreakdown {
        match period {
            Period::Week => &self.weekly,
            Period::Month => &self.monthly,
        }
    }
}

/// Weekly ore income by source.
///
/// Daily = league bonus x 7; War = town hall bonus x attacks x win ratio;
/// Trader = 10 glowy when collected; Raid Medal and Gem pass through.
/// Leagues or town halls missing from `tables` contribute nothing.
pub fn weekly_income(profile: &PlayerProfile, tables: &BonusTables) -> IncomeBreakdown {
    let daily = tables
        .daily_bonus(profile.league)
        .scale(Decimal::from(DAYS_PER_WEEK));

    let war_bonus = tables.war_bonus(profile.attack_town_hall);
    if war_bonus.is_zero() && profile.clan_war_attacks_per_week > 0 {
        debug!(
            town_hall = profile.attack_town_hall,
            "no war bonus for town hall, war income is zero"
        );
    }
    let war = war_bonus
        .scale(Decimal::from(profile.clan_war_attacks_per_week) * profile.clan_war_win_ratio);

    let trader = if profile.trader_free_glowy {
        OreBundle::units(0, TRADER_FREE_GLOWY, 0)
    } else {
        OreBundle::ZERO
    };

    let sources = IncomeSources {
        daily,
        war,
        trader,
        raid_medal: profile.medal_purchased_ore,
        gem: profile.gem_purchased_ore,
    };
    let total = sources.total();
    debug!(%total, league = ?profile.league, "weekly income computed");
    IncomeBreakdown { sources, total }
}

/// Project weekly income to a month.
///
/// Every source and ore kind is scaled by 4.33 and rounded on its own; the
/// monthly total is the sum of those rounded figures, so it can differ by a
/// unit per ore kind from rounding the scaled weekly total.
pub fn monthly_income(weekly: &IncomeBreakdown) -> IncomeBreakdown {
    let factor = weeks_per_month();
    let sources = weekly.sources.map(|b| b.scale(factor).round_units());
    let total = sources.total();
    IncomeBreakdown { sources, total }
}

/// Weekly income together with its monthly projection.
pub fn income_report(profile: &PlayerProfile, tables: &BonusTables) -> IncomeReport {
    let weekly = weekly_income(profile, tables);
    let monthly = monthly_income(&weekly);
    IncomeReport { weekly, monthly }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ore_core::League;
    use proptest::prelude::*;

    fn legend_th16() -> PlayerProfile {
        PlayerProfile {
            league: Some(League::Legend),
            attack_town_hall: 16,
            clan_war_attacks_per_week: 7,
            clan_war_win_ratio: Decimal::ONE,
            trader_free_glowy: false,
            medal_purchased_ore: OreBundle::ZERO,
            gem_purchased_ore: OreBundle::ZERO,
        }
    }

    #[test]
    fn legend_th16_full_war() {
        let w = weekly_income(&legend_th16(), &BonusTables::default());
        assert_eq!(w.sources.daily, OreBundle::units(7000, 378, 0));
        assert_eq!(w.sources.war, OreBundle::units(7770, 273, 42));
        assert_eq!(w.sources.trader, OreBundle::ZERO);
        assert_eq!(w.total, OreBundle::units(14770, 651, 42));
    }

    #[test]
    fn trader_and_purchases_pass_through() {
        let p = PlayerProfile {
            trader_free_glowy: true,
            medal_purchased_ore: OreBundle::units(500, 50, 5),
            gem_purchased_ore: OreBundle::units(300, 0, 15),
            ..legend_th16()
        };
        let w = weekly_income(&p, &BonusTables::default());
        assert_eq!(w.sources.trader, OreBundle::units(0, 10, 0));
        assert_eq!(w.sources.raid_medal, OreBundle::units(500, 50, 5));
        assert_eq!(w.sources.gem, OreBundle::units(300, 0, 15));
        assert_eq!(w.total, OreBundle::units(15570, 711, 62));
    }

    #[test]
    fn win_ratio_scales_war_linearly() {
        let p = PlayerProfile {
            clan_war_win_ratio: Decimal::new(1, 1),
            ..legend_th16()
        };
        let w = weekly_income(&p, &BonusTables::default());
        assert_eq!(w.sources.war, OreBundle::new(Decimal::new(777, 0), Decimal::new(273, 1), Decimal::new(42, 1)));
    }

    #[test]
    fn unknown_league_and_town_hall_yield_zero() {
        let p = PlayerProfile {
            league: None,
            attack_town_hall: 7,
            ..legend_th16()
        };
        let w = weekly_income(&p, &BonusTables::default());
        assert_eq!(w.sources.daily, OreBundle::ZERO);
        assert_eq!(w.sources.war, OreBundle::ZERO);
        assert_eq!(w.total, OreBundle::ZERO);

        let w = weekly_income(&legend_th16(), &BonusTables::empty());
        assert_eq!(w.total, OreBundle::ZERO);
    }

    #[test]
    fn monthly_rounds_each_field() {
        let report = income_report(&legend_th16(), &BonusTables::default());
        let m = report.monthly;
        assert_eq!(m.sources.daily, OreBundle::units(30310, 1637, 0));
        assert_eq!(m.sources.war, OreBundle::units(33644, 1182, 182));
        assert_eq!(m.total, OreBundle::units(63954, 2819, 182));
        assert_eq!(report.for_period(Period::Week), &report.weekly);
        assert_eq!(report.for_period(Period::Month), &report.monthly);
    }

    #[test]
    fn monthly_total_is_sum_of_rounded_sources() {
        // 140 glowy/day-week -> 606.2, trader 10 -> 43.3; the rounded sum is
        // 649 where rounding the scaled weekly total would give 650.
        let p = PlayerProfile {
            league: Some(League::CrystalII),
            clan_war_attacks_per_week: 0,
            trader_free_glowy: true,
            ..legend_th16()
        };
        let w = weekly_income(&p, &BonusTables::default());
        assert_eq!(w.total.glowy, Decimal::from(150));
        let m = monthly_income(&w);
        assert_eq!(m.sources.daily.glowy, Decimal::from(606));
        assert_eq!(m.sources.trader.glowy, Decimal::from(43));
        assert_eq!(m.total.glowy, Decimal::from(649));
    }

    #[test]
    fn monthly_of_zero_is_zero() {
        let m = monthly_income(&IncomeBreakdown::default());
        assert_eq!(m, IncomeBreakdown::default());
    }

    #[test]
    fn shares_sum_to_one_hundred() {
        let w = weekly_income(&legend_th16(), &BonusTables::default());
        let shiny: Decimal = IncomeSource::ALL
            .into_iter()
            .map(|s| w.share(s, OreKind::Shiny))
            .sum();
        assert_eq!(shiny.round_dp(6), Decimal::ONE_HUNDRED);
        assert_eq!(w.share(IncomeSource::War, OreKind::Starry), Decimal::ONE_HUNDRED);
        assert_eq!(IncomeBreakdown::default().share(IncomeSource::Daily, OreKind::Shiny), Decimal::ZERO);
    }

    #[test]
    fn active_sources_skip_empty_ones() {
        let w = weekly_income(&legend_th16(), &BonusTables::default());
        let active: Vec<IncomeSource> = w.active_sources().map(|(s, _)| s).collect();
        assert_eq!(active, vec![IncomeSource::Daily, IncomeSource::War]);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let p = legend_th16();
        let t = BonusTables::default();
        assert_eq!(income_report(&p, &t), income_report(&p, &t));
    }

    proptest! {
        #[test]
        fn total_is_sum_of_sources(league_idx in 0usize..22, th in 6u8..=19, attacks in 0u8..=7,
                                   tenths in 0i64..=10, trader in any::<bool>(),
                                   medal in 0i64..=2, gem in 0i64..=5) {
            let p = PlayerProfile {
                league: Some(League::ALL[league_idx]),
                attack_town_hall: th,
                clan_war_attacks_per_week: attacks,
                clan_war_win_ratio: Decimal::new(tenths, 1),
                trader_free_glowy: trader,
                medal_purchased_ore: OreBundle::units(medal * 500, medal * 50, medal * 5),
                gem_purchased_ore: OreBundle::units(gem * 300, 0, 0),
            };
            let w = weekly_income(&p, &BonusTables::default());
            let sum = w.sources.daily + w.sources.war + w.sources.trader + w.sources.raid_medal + w.sources.gem;
            prop_assert_eq!(w.total, sum);
            let m = monthly_income(&w);
            prop_assert_eq!(m.total, m.sources.total());
            prop_assert!(m.total.is_non_negative());
        }
    }
}
