#![deny(warnings)]

//! Core domain models and invariants for the hero equipment ore planner.
//!
//! This crate defines serializable types shared by the calculators with
//! validation helpers to guarantee basic invariants.

mod equipment;
mod ore;
mod profile;

pub use equipment::{check_level_range, EquipmentItem, Hero, Rarity, UpgradeCostTable};
pub use ore::{OreBundle, OreKind};
pub use profile::{
    BonusTables, League, PlayerProfile, PurchaseLimits, MAX_TOWN_HALL, MAX_WAR_ATTACKS_PER_WEEK,
    MIN_TOWN_HALL,
};

use rust_decimal::Decimal;
use std::collections::BTreeSet;
use thiserror::Error;

/// Validation errors for domain invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// League name not on the 22-tier ladder.
    #[error("unknown league: {0}")]
    UnknownLeague(String),
    /// Hero name not one of the five equipment carriers.
    #[error("unknown hero: {0}")]
    UnknownHero(String),
    /// Attack town hall outside [8, 17].
    #[error("town hall {0} is out of supported range [8, 17]")]
    TownHallOutOfRange(u8),
    /// More war attacks than a week allows.
    #[error("{0} war attacks per week exceeds the maximum of 7")]
    WarAttacksOutOfRange(u8),
    /// Win ratio must be within [0, 1] in steps of 0.1.
    #[error("war win ratio {0} must be within [0, 1] in steps of 0.1")]
    InvalidWinRatio(Decimal),
    /// Purchased ore outside the shop cap or off the slider step.
    #[error("{shop} purchase of {value} {kind} ore is not allowed")]
    PurchaseOutOfRange {
        shop: &'static str,
        kind: crate::OreKind,
        value: Decimal,
    },
    /// Level outside the allowed window.
    #[error("level {level} is out of range [{min}, {max}]")]
    LevelOutOfRange { level: u8, min: u8, max: u8 },
    /// A hidden item cannot stay selected.
    #[error("hidden item {0} cannot be selected")]
    HiddenItemSelected(String),
    /// Two items share the same identifier.
    #[error("duplicate equipment id: {0}")]
    DuplicateId(String),
    /// Identifier must not be blank.
    #[error("equipment id must not be empty")]
    EmptyId,
    /// Upgrade step with a negative ore amount.
    #[error("{rarity} upgrade step at level {level} has a negative cost")]
    NegativeCost { rarity: Rarity, level: u8 },
}

/// Validate the settings surface of a player profile.
///
/// An absent league is allowed and simply earns no daily ore.
pub fn validate_profile(p: &PlayerProfile) -> Result<(), ValidationError> {
    if !(MIN_TOWN_HALL..=MAX_TOWN_HALL).contains(&p.attack_town_hall) {
        return Err(ValidationError::TownHallOutOfRange(p.attack_town_hall));
    }
    if p.clan_war_attacks_per_week > MAX_WAR_ATTACKS_PER_WEEK {
        return Err(ValidationError::WarAttacksOutOfRange(
            p.clan_war_attacks_per_week,
        ));
    }
    let ratio = p.clan_war_win_ratio;
    let tenths = ratio * Decimal::TEN;
    if ratio < Decimal::ZERO || ratio > Decimal::ONE || !tenths.fract().is_zero() {
        return Err(ValidationError::InvalidWinRatio(ratio));
    }
    PurchaseLimits::MEDAL.check(&p.medal_purchased_ore)?;
    PurchaseLimits::GEM.check(&p.gem_purchased_ore)?;
    Ok(())
}

/// Validate a single equipment item.
pub fn validate_equipment_item(item: &EquipmentItem) -> Result<(), ValidationError> {
    if item.id.trim().is_empty() {
        return Err(ValidationError::EmptyId);
    }
    check_level_range(item.rarity, item.current_level, item.target_level)?;
    if item.is_hidden && item.is_selected {
        return Err(ValidationError::HiddenItemSelected(item.id.clone()));
    }
    Ok(())
}

/// Validate an equipment list, including identifier uniqueness.
pub fn validate_equipment(items: &[EquipmentItem]) -> Result<(), ValidationError> {
    let mut ids: BTreeSet<&str> = BTreeSet::new();
    for item in items {
        validate_equipment_item(item)?;
        if !ids.insert(item.id.as_str()) {
            return Err(ValidationError::DuplicateId(item.id.clone()));
        }
    }
    Ok(())
}

/// Every step of the cost table must cost a non-negative amount of ore.
pub fn validate_cost_table(table: &UpgradeCostTable) -> Result<(), ValidationError> {
    for rarity in [Rarity::Common, Rarity::Epic] {
        if let Some((&level, _)) = table
            .partition(rarity)
            .iter()
            .find(|(_, cost)| !cost.is_non_negative())
        {
            return Err(ValidationError::NegativeCost { rarity, level });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(id: &str, rarity: Rarity) -> EquipmentItem {
        EquipmentItem::new(id, id, Hero::ArcherQueen, rarity)
    }

    #[test]
    fn default_profile_is_valid() {
        validate_profile(&PlayerProfile::default()).unwrap();
    }

    #[test]
    fn absent_league_is_valid() {
        let p = PlayerProfile {
            league: None,
            ..PlayerProfile::default()
        };
        assert!(validate_profile(&p).is_ok());
    }

    #[test]
    fn town_hall_bounds() {
        for (th, ok) in [(7, false), (8, true), (17, true), (18, false)] {
            let p = PlayerProfile {
                attack_town_hall: th,
                ..PlayerProfile::default()
            };
            assert_eq!(validate_profile(&p).is_ok(), ok, "TH{th}");
        }
    }

    #[test]
    fn war_attack_bounds() {
        let p = PlayerProfile {
            clan_war_attacks_per_week: 8,
            ..PlayerProfile::default()
        };
        assert_eq!(
            validate_profile(&p),
            Err(ValidationError::WarAttacksOutOfRange(8))
        );
    }

    #[test]
    fn win_ratio_must_be_tenths() {
        let ok = PlayerProfile {
            clan_war_win_ratio: Decimal::new(7, 1),
            ..PlayerProfile::default()
        };
        assert!(validate_profile(&ok).is_ok());
        for bad in [Decimal::new(75, 2), Decimal::new(11, 1), Decimal::new(-1, 1)] {
            let p = PlayerProfile {
                clan_war_win_ratio: bad,
                ..PlayerProfile::default()
            };
            assert_eq!(validate_profile(&p), Err(ValidationError::InvalidWinRatio(bad)));
        }
    }

    #[test]
    fn purchases_are_checked_per_shop() {
        let p = PlayerProfile {
            gem_purchased_ore: OreBundle::units(0, 60, 0),
            medal_purchased_ore: OreBundle::units(500, 0, 0),
            ..PlayerProfile::default()
        };
        assert!(validate_profile(&p).is_ok());
        let p = PlayerProfile {
            medal_purchased_ore: OreBundle::units(0, 0, 15),
            ..PlayerProfile::default()
        };
        assert!(matches!(
            validate_profile(&p),
            Err(ValidationError::PurchaseOutOfRange { shop: "raid medal", kind: OreKind::Starry, .. })
        ));
    }

    #[test]
    fn equipment_ids_are_unique() {
        let items = vec![item("a", Rarity::Common), item("b", Rarity::Epic)];
        validate_equipment(&items).unwrap();
        let dup = vec![item("a", Rarity::Common), item("a", Rarity::Epic)];
        assert_eq!(
            validate_equipment(&dup),
            Err(ValidationError::DuplicateId("a".to_string()))
        );
        assert_eq!(
            validate_equipment(&[item("  ", Rarity::Common)]),
            Err(ValidationError::EmptyId)
        );
    }

    #[test]
    fn hidden_items_cannot_be_selected() {
        let mut it = item("frozen_arrow", Rarity::Epic);
        it.is_hidden = true;
        assert!(validate_equipment_item(&it).is_err());
        it.is_selected = false;
        assert!(validate_equipment_item(&it).is_ok());
    }

    #[test]
    fn negative_cost_steps_are_rejected() {
        let table = UpgradeCostTable::default()
            .with_step(Rarity::Common, 1, OreBundle::units(500, 0, 0))
            .with_step(Rarity::Epic, 4, OreBundle::units(100, 0, -5));
        assert_eq!(
            validate_cost_table(&table),
            Err(ValidationError::NegativeCost {
                rarity: Rarity::Epic,
                level: 4
            })
        );
        assert!(validate_cost_table(&UpgradeCostTable::default()).is_ok());
    }

    #[test]
    fn profile_serde_roundtrip() {
        let p = PlayerProfile {
            league: Some(League::GoldII),
            trader_free_glowy: true,
            ..PlayerProfile::default()
        };
        let s = serde_json::to_string(&p).unwrap();
        let back: PlayerProfile = serde_json::from_str(&s).unwrap();
        assert_eq!(back, p);
    }

    proptest! {
        #[test]
        fn valid_ranges_pass(th in 8u8..=17, attacks in 0u8..=7, tenths in 0i64..=10) {
            let p = PlayerProfile {
                attack_town_hall: th,
                clan_war_attacks_per_week: attacks,
                clan_war_win_ratio: Decimal::new(tenths, 1),
                ..PlayerProfile::default()
            };
            prop_assert!(validate_profile(&p).is_ok());
        }

        #[test]
        fn level_ranges_within_ceiling_pass(current in 1u8..=27, extra in 0u8..=26) {
            let target = current.saturating_add(extra).min(27);
            let it = item("x", Rarity::Epic);
            prop_assert!(it.with_levels(current, target).is_ok());
        }
    }
}
