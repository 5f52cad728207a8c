#![deny(warnings)]

//! Reference data and settings documents for the ore planner.
//!
//! Decodes the equipment catalog and upgrade cost table (JSON) and player
//! settings (YAML), and ships embedded defaults for all three.

mod catalog;
mod embedded;
mod settings;

pub use catalog::{
    default_catalog, default_cost_table, load_catalog, load_cost_table, parse_catalog,
    parse_cost_table, seed_equipment, CatalogEntry,
};
pub use settings::{default_settings, load_settings, parse_settings, PlayerSettings};

use ore_core::ValidationError;
use thiserror::Error;

/// Errors raised while reading reference data or settings.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("io error: {0}")]
    Io(String),
    #[error("invalid json: {0}")]
    Json(String),
    #[error("invalid yaml: {0}")]
    Yaml(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<std::io::Error> for DataError {
    fn from(e: std::io::Error) -> Self {
        DataError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for DataError {
    fn from(e: serde_json::Error) -> Self {
        DataError::Json(e.to_string())
    }
}

impl From<serde_yaml::Error> for DataError {
    fn from(e: serde_yaml::Error) -> Self {
        DataError::Yaml(e.to_string())
    }
}
