//! Serde data file structs for upgrade catalogs.
//!
//! A catalog file is a list of upgrade entries. RON and JSON files hold the
//! list directly; TOML files hold it under an `[[upgrades]]` array of tables.
//! List order becomes catalog order.

use serde::{Deserialize, Serialize};

use crumb_core::Upgrade;

// ===========================================================================
// Upgrades
// ===========================================================================

/// One upgrade definition in a data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeData {
    pub name: String,
    /// Base price at level 0.
    pub price: f64,
    /// Production per owned level.
    pub cps: f64,
    /// Level the upgrade starts at, and returns to on reset.
    #[serde(default)]
    pub seed_level: u32,
}

impl UpgradeData {
    /// Engine upgrade at its seed level and the given catalog position.
    pub fn to_upgrade(&self, position: u32) -> Upgrade {
        Upgrade::new(self.name.clone(), self.price, self.cps)
            .with_level(self.seed_level)
            .at_position(position)
    }
}

/// Wrapper for TOML files: `[[upgrades]]` tables.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlUpgrades {
    pub upgrades: Vec<UpgradeData>,
}
