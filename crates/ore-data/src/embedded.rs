//! Reference data compiled into the binary so the planner works without
//! any files on disk.

pub(crate) const EQUIPMENT_JSON: &str = include_str!("../../../assets/data/equipment.json");
pub(crate) const UPGRADE_COST_JSON: &str = include_str!("../../../assets/data/upgrade-cost.json");
pub(crate) const DEFAULT_SETTINGS_YAML: &str = include_str!("../../../assets/settings/default.yaml");
