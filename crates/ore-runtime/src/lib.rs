#![deny(warnings)]

//! Planner session: the single source of truth the calculators read from.
//!
//! A [`Session`] owns the player profile, the equipment list and the
//! reference tables. Edits are validated before they land; a rejected edit
//! leaves the session exactly as it was. Reports are recomputed from
//! scratch on every call.

mod report;

pub use report::{HeroGroupReport, ItemReport, PlannerReport, ViewFilter};

use ore_core::{
    validate_cost_table, validate_equipment, validate_equipment_item, validate_profile,
    BonusTables, EquipmentItem, Hero, OreBundle, PlayerProfile, UpgradeCostTable,
    ValidationError,
};
use ore_econ::{income_report, IncomeReport};
use thiserror::Error;
use tracing::{debug, warn};

/// Why an edit was not applied.
#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("no equipment with id {0}")]
    UnknownItem(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Current planner state for one player.
#[derive(Clone, Debug)]
pub struct Session {
    profile: PlayerProfile,
    equipment: Vec<EquipmentItem>,
    costs: UpgradeCostTable,
    tables: BonusTables,
}

impl Session {
    /// Start a session from validated snapshots, using the default bonus
    /// tables.
    pub fn new(
        profile: PlayerProfile,
        equipment: Vec<EquipmentItem>,
        costs: UpgradeCostTable,
    ) -> Result<Self, EditError> {
        validate_profile(&profile)?;
        validate_equipment(&equipment)?;
        validate_cost_table(&costs)?;
        debug!(items = equipment.len(), "session started");
        Ok(Self {
            profile,
            equipment,
            costs,
            tables: BonusTables::default(),
        })
    }

    /// Replace the league and war bonus tables. Leagues and town halls
    /// missing from `tables` earn nothing.
    pub fn with_bonus_tables(mut self, tables: BonusTables) -> Self {
        self.tables = tables;
        self
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    pub fn equipment(&self) -> &[EquipmentItem] {
        &self.equipment
    }

    pub fn item(&self, id: &str) -> Option<&EquipmentItem> {
        self.equipment.iter().find(|i| i.id == id)
    }

    pub fn set_profile(&mut self, profile: PlayerProfile) -> Result<(), EditError> {
        if let Err(e) = validate_profile(&profile) {
            warn!(error = %e, "profile update rejected");
            return Err(e.into());
        }
        debug!(league = ?profile.league, town_hall = profile.attack_town_hall, "profile updated");
        self.profile = profile;
        Ok(())
    }

    /// Set the level an item is at. Must stay within `1..=target`.
    pub fn set_current_level(&mut self, id: &str, level: u8) -> Result<(), EditError> {
        self.update_item(id, |item| {
            let target = item.target_level;
            item.with_levels(level, target)
        })
    }

    /// Set the level an item should reach. Must stay within `current..=max`.
    pub fn set_target_level(&mut self, id: &str, level: u8) -> Result<(), EditError> {
        self.update_item(id, |item| {
            let current = item.current_level;
            item.with_levels(current, level)
        })
    }

    /// Hide or show an item. Hiding clears its selection.
    pub fn set_hidden(&mut self, id: &str, hidden: bool) -> Result<(), EditError> {
        self.update_item(id, |mut item| {
            item.set_hidden(hidden);
            Ok(item)
        })
    }

    pub fn toggle_hidden(&mut self, id: &str) -> Result<(), EditError> {
        let hidden = self
            .item(id)
            .map(|i| !i.is_hidden)
            .ok_or_else(|| EditError::UnknownItem(id.to_string()))?;
        self.set_hidden(id, hidden)
    }

    /// Row checkbox: checking selects and shows the item, unchecking
    /// deselects and hides it.
    pub fn set_selected(&mut self, id: &str, selected: bool) -> Result<(), EditError> {
        self.update_item(id, |mut item| {
            item.set_hidden(!selected);
            item.is_selected = selected;
            Ok(item)
        })
    }

    /// Select every visible item. Hidden items stay unselected.
    pub fn select_all(&mut self) {
        self.equipment = self
            .equipment
            .iter()
            .cloned()
            .map(|mut i| {
                i.is_selected = !i.is_hidden;
                i
            })
            .collect();
        debug!("all visible equipment selected");
    }

    pub fn deselect_all(&mut self) {
        self.equipment = self
            .equipment
            .iter()
            .cloned()
            .map(|mut i| {
                i.is_selected = false;
                i
            })
            .collect();
        debug!("all equipment deselected");
    }

    /// Swap in a whole new equipment list.
    pub fn replace_equipment(&mut self, equipment: Vec<EquipmentItem>) -> Result<(), EditError> {
        if let Err(e) = validate_equipment(&equipment) {
            warn!(error = %e, "equipment replacement rejected");
            return Err(e.into());
        }
        debug!(items = equipment.len(), "equipment replaced");
        self.equipment = equipment;
        Ok(())
    }

    /// Swap in a new upgrade cost table.
    pub fn replace_costs(&mut self, costs: UpgradeCostTable) -> Result<(), EditError> {
        if let Err(e) = validate_cost_table(&costs) {
            warn!(error = %e, "cost table replacement rejected");
            return Err(e.into());
        }
        debug!(
            common_steps = costs.common.len(),
            epic_steps = costs.epic.len(),
            "cost table replaced"
        );
        self.costs = costs;
        Ok(())
    }

    pub fn income(&self) -> IncomeReport {
        income_report(&self.profile, &self.tables)
    }

    /// Total weekly ore income, which every estimate draws from.
    pub fn weekly_income(&self) -> OreBundle {
        self.income().weekly.total
    }

    /// Selected items the filter lets through.
    pub fn selected_count(&self, filter: &ViewFilter) -> usize {
        self.equipment
            .iter()
            .filter(|i| i.is_selected && filter.includes(i))
            .count()
    }

    /// Hidden items across all heroes.
    pub fn hidden_count(&self) -> usize {
        self.equipment.iter().filter(|i| i.is_hidden).count()
    }

    /// Recompute income and every hero group the filter shows.
    pub fn report(&self, filter: &ViewFilter) -> PlannerReport {
        let income = self.income();
        let weekly = income.weekly.total;
        let heroes: Vec<HeroGroupReport> = Hero::ALL
            .into_iter()
            .filter(|h| filter.heroes.contains(h))
            .filter_map(|h| HeroGroupReport::build(h, &self.equipment, filter, &self.costs, &weekly))
            .collect();
        debug!(heroes = heroes.len(), %weekly, "planner report recomputed");
        PlannerReport {
            income,
            heroes,
            selected_count: self.selected_count(filter),
            hidden_count: self.hidden_count(),
        }
    }

    fn update_item<F>(&mut self, id: &str, edit: F) -> Result<(), EditError>
    where
        F: FnOnce(EquipmentItem) -> Result<EquipmentItem, ValidationError>,
    {
        let Some(idx) = self.equipment.iter().position(|i| i.id == id) else {
            warn!(id, "edit for unknown equipment");
            return Err(EditError::UnknownItem(id.to_string()));
        };
        let next = edit(self.equipment[idx].clone())
            .and_then(|item| validate_equipment_item(&item).map(|_| item));
        match next {
            Ok(item) => {
                debug!(
                    id,
                    current = item.current_level,
                    target = item.target_level,
                    selected = item.is_selected,
                    hidden = item.is_hidden,
                    "equipment updated"
                );
                self.equipment[idx] = item;
                Ok(())
            }
            Err(e) => {
                warn!(id, error = %e, "equipment edit rejected");
                Err(e.into())
            }
        }
    }
}
