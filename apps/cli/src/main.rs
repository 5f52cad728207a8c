#![deny(warnings)]

//! Headless ore planner: prints income and per-hero upgrade estimates.

use anyhow::{bail, Context, Result};
use ore_core::{Hero, OreBundle, OreKind, PlayerProfile};
use ore_data::{
    default_catalog, default_cost_table, default_settings, load_catalog, load_cost_table,
    load_settings, seed_equipment,
};
use ore_econ::Period;
use ore_runtime::{PlannerReport, Session, ViewFilter};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    settings: Option<String>,
    catalog: Option<String>,
    costs: Option<String>,
    period: Period,
    heroes: Vec<Hero>,
    show_hidden: bool,
    json: bool,
}

fn parse_args<I: Iterator<Item = String>>(mut it: I) -> Result<Args> {
    let mut args = Args::default();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--settings" => {
                args.settings = Some(it.next().context("--settings expects a path")?);
            }
            "--catalog" => args.catalog = Some(it.next().context("--catalog expects a path")?),
            "--costs" => args.costs = Some(it.next().context("--costs expects a path")?),
            "--period" => {
                args.period = match it.next().as_deref() {
                    Some("week") => Period::Week,
                    Some("month") => Period::Month,
                    other => bail!("--period expects week or month, got {other:?}"),
                }
            }
            "--hero" => {
                let name = it.next().context("--hero expects a hero name")?;
                args.heroes.push(name.parse()?);
            }
            "--show-hidden" => args.show_hidden = true,
            "--json" => args.json = true,
            other => warn!(arg = other, "ignoring unknown argument"),
        }
    }
    Ok(args)
}

fn load_session(args: &Args) -> Result<Session> {
    let settings = match &args.settings {
        Some(path) => load_settings(path).with_context(|| format!("reading settings {path}"))?,
        None => default_settings().context("embedded settings")?,
    };
    let profile: PlayerProfile = settings.into_profile().context("invalid player settings")?;

    let catalog = match &args.catalog {
        Some(path) => load_catalog(path).with_context(|| format!("reading catalog {path}"))?,
        None => default_catalog().context("embedded catalog")?,
    };
    let costs = match &args.costs {
        Some(path) => load_cost_table(path).with_context(|| format!("reading cost table {path}"))?,
        None => default_cost_table().context("embedded cost table")?,
    };
    let equipment = seed_equipment(&catalog).context("invalid equipment catalog")?;
    Ok(Session::new(profile, equipment, costs)?)
}

/// Whole units with `,` between thousands; halves round away from zero.
fn format_thousands(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string();
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("{sign}{out}")
}

fn format_bundle(b: &OreBundle) -> String {
    OreKind::ALL
        .into_iter()
        .map(|k| format!("{:>9}", format_thousands(b.get(k))))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_report(report: &PlannerReport, period: Period) {
    let income = report.income.for_period(period);
    let label = match period {
        Period::Week => "Weekly",
        Period::Month => "Monthly",
    };
    println!("{label} income {:>18} {:>9} {:>9}", "shiny", "glowy", "starry");
    for (source, bundle) in income.active_sources() {
        println!("  {:<24} {}", source.label(), format_bundle(&bundle));
    }
    println!("  {:<24} {}", "Total", format_bundle(&income.total));

    for group in &report.heroes {
        println!();
        println!(
            "{:<48} {}  {}",
            group.hero.name(),
            format_bundle(&group.group.total_cost),
            group.group.estimate
        );
        for item in &group.items {
            let mark = if item.is_hidden {
                "h"
            } else if item.is_selected {
                "x"
            } else {
                " "
            };
            println!(
                "  [{mark}] {:<20} {:<6} {:<27} {}  {}",
                item.name,
                item.rarity.to_string(),
                item.level_track(),
                format_bundle(&item.cost),
                item.estimate
            );
        }
    }
    println!();
    println!(
        "{} selected, {} hidden",
        report.selected_count, report.hidden_count
    );
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    info!(?args, "starting planner");

    let session = load_session(&args)?;
    let view = if args.heroes.is_empty() {
        ViewFilter::default()
    } else {
        ViewFilter::only(args.heroes.iter().copied())
    }
    .with_hidden(args.show_hidden);

    let report = session.report(&view);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, args.period);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(format_thousands(Decimal::ZERO), "0");
        assert_eq!(format_thousands(Decimal::from(999)), "999");
        assert_eq!(format_thousands(Decimal::from(14770)), "14,770");
        assert_eq!(format_thousands(Decimal::from(1_234_567)), "1,234,567");
        assert_eq!(format_thousands(Decimal::from(-63954)), "-63,954");
        assert_eq!(format_thousands(Decimal::new(8190, 2)), "82");
        assert_eq!(format_thousands(Decimal::new(25, 1)), "3");
    }

    #[test]
    fn flags_are_parsed() {
        let a = args(&[
            "--period", "week", "--hero", "Archer Queen", "--hero", "minion prince",
            "--show-hidden", "--costs", "c.json",
        ])
        .unwrap();
        assert_eq!(a.period, Period::Week);
        assert_eq!(a.heroes, vec![Hero::ArcherQueen, Hero::MinionPrince]);
        assert!(a.show_hidden && !a.json);
        assert_eq!(a.costs.as_deref(), Some("c.json"));
        assert_eq!(a.settings, None);
    }

    #[test]
    fn bad_flag_values_fail() {
        assert!(args(&["--period", "year"]).is_err());
        assert!(args(&["--hero", "Battle Machine"]).is_err());
        assert!(args(&["--hero"]).is_err());
        assert!(args(&["--settings"]).is_err());
        assert!(args(&["--json", "--catalog"]).is_err());
        assert!(args(&["--costs"]).is_err());
    }

    #[test]
    fn defaults_load_from_embedded_data() {
        let a = args(&[]).unwrap();
        assert_eq!(a.period, Period::Month);
        let session = load_session(&a).unwrap();
        let report = session.report(&ViewFilter::default());
        assert_eq!(report.heroes.len(), Hero::ALL.len());
        assert_eq!(report.income.weekly.total, OreBundle::units(14770, 651, 42));
    }
}
