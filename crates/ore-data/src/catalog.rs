//! Equipment catalog and upgrade cost table decoding.

use crate::{embedded, DataError};
use ore_core::{
    validate_cost_table, validate_equipment, EquipmentItem, Hero, Rarity, UpgradeCostTable,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// One row of the static equipment catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    /// Hero display name, e.g. "Archer Queen".
    pub hero: String,
    /// `"epic"` for Epic items; any other value is Common.
    pub rarity: String,
    #[serde(default)]
    pub icon_url: Option<String>,
    pub max_level: u8,
}

impl CatalogEntry {
    pub fn rarity(&self) -> Rarity {
        Rarity::from_catalog(&self.rarity)
    }
}

/// Decode a catalog from JSON text.
pub fn parse_catalog(text: &str) -> Result<Vec<CatalogEntry>, DataError> {
    Ok(serde_json::from_str(text)?)
}

/// Decode an upgrade cost table from JSON text.
///
/// A rarity partition that is absent decodes as empty, and so does an ore
/// field missing from a step. Negative amounts are rejected.
pub fn parse_cost_table(text: &str) -> Result<UpgradeCostTable, DataError> {
    let table: UpgradeCostTable = serde_json::from_str(text)?;
    validate_cost_table(&table)?;
    Ok(table)
}

pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<CatalogEntry>, DataError> {
    let text = fs::read_to_string(path.as_ref())?;
    let entries = parse_catalog(&text)?;
    info!(path = %path.as_ref().display(), entries = entries.len(), "loaded equipment catalog");
    Ok(entries)
}

pub fn load_cost_table<P: AsRef<Path>>(path: P) -> Result<UpgradeCostTable, DataError> {
    let text = fs::read_to_string(path.as_ref())?;
    let table = parse_cost_table(&text)?;
    info!(
        path = %path.as_ref().display(),
        common_steps = table.common.len(),
        epic_steps = table.epic.len(),
        "loaded upgrade cost table"
    );
    Ok(table)
}

/// The catalog shipped with the planner.
pub fn default_catalog() -> Result<Vec<CatalogEntry>, DataError> {
    parse_catalog(embedded::EQUIPMENT_JSON)
}

/// The cost table shipped with the planner.
pub fn default_cost_table() -> Result<UpgradeCostTable, DataError> {
    parse_cost_table(embedded::UPGRADE_COST_JSON)
}

/// Turn catalog rows into the initial equipment list.
///
/// Every item starts at level 1, targets the catalog maximum (clamped to
/// its rarity's ceiling), selected and visible. Catalog order is kept.
pub fn seed_equipment(entries: &[CatalogEntry]) -> Result<Vec<EquipmentItem>, DataError> {
    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        let hero: Hero = entry.hero.parse()?;
        let rarity = entry.rarity();
        let ceiling = rarity.max_level();
        let target = entry.max_level.clamp(1, ceiling);
        if target != entry.max_level {
            warn!(
                id = %entry.id,
                catalog_max = entry.max_level,
                ceiling,
                "catalog max level clamped to rarity ceiling"
            );
        }
        let mut item = EquipmentItem::new(entry.id.clone(), entry.name.clone(), hero, rarity)
            .with_levels(1, target)?;
        item.icon_url = entry.icon_url.clone();
        items.push(item);
    }
    validate_equipment(&items)?;
    Ok(items)
}
