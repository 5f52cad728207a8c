#![deny(warnings)]

//! Ore economy calculators for the hero equipment planner.
//!
//! This crate provides pure functions for:
//! - Weekly ore income by source and its monthly projection
//! - Upgrade cost of an equipment level range from the cost table
//! - Time-to-complete estimates for single items and Epic-first hero groups
//!
//! Nothing here fails: missing reference data reads as zero and
//! infeasible plans come back as [`Estimate::Unknown`].

pub mod estimate;
pub mod income;

pub use estimate::{
    estimate_group, estimate_weeks, schedule, upgrade_cost, upgrade_cost_between, Estimate,
    GroupEstimate,
};
pub use income::{
    income_report, monthly_income, weekly_income, weeks_per_month, IncomeBreakdown, IncomeReport,
    IncomeSource, IncomeSources, Period, DAYS_PER_WEEK, TRADER_FREE_GLOWY,
};
