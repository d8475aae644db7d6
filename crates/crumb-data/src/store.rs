//! In-memory catalog store.
//!
//! Holds the live catalog levels alongside the seed entries they were loaded
//! from. Purchases and decreases mutate the live levels; [`CatalogStore::reset`]
//! puts every level back to its seed. The planner never sees the store, only
//! [`CatalogStore::snapshot`] copies.

use std::path::Path;

use crumb_core::Catalog;

use crate::loader::{self, DataLoadError};
use crate::schema::UpgradeData;
use crate::seeds;

/// Errors raised by store mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("upgrade '{0}' not found")]
    UpgradeNotFound(String),

    #[error("level of '{0}' is already zero")]
    LevelAlreadyZero(String),
}

#[derive(Debug, Clone)]
pub struct CatalogStore {
    seeds: Vec<UpgradeData>,
    catalog: Catalog,
}

impl CatalogStore {
    /// Build a store from validated seed entries.
    pub fn new(seeds: Vec<UpgradeData>) -> Result<Self, DataLoadError> {
        loader::validate_catalog(&seeds)?;
        let catalog = loader::build_catalog(&seeds);
        Ok(Self { seeds, catalog })
    }

    /// A store over the stock catalog.
    pub fn seeded() -> Self {
        let seeds = seeds::seed_data();
        let catalog = loader::build_catalog(&seeds);
        Self { seeds, catalog }
    }

    /// A store over a catalog file.
    pub fn open(path: &Path) -> Result<Self, DataLoadError> {
        let seeds = loader::load_catalog(path)?;
        let catalog = loader::build_catalog(&seeds);
        Ok(Self { seeds, catalog })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn seeds(&self) -> &[UpgradeData] {
        &self.seeds
    }

    /// Owned copy of the live catalog for the planner.
    pub fn snapshot(&self) -> Catalog {
        self.catalog.clone()
    }

    pub fn level(&self, name: &str) -> Option<u32> {
        self.catalog.get_by_name(name).map(|u| u.level)
    }

    /// Buy one level of `name`. Returns the new level.
    pub fn purchase(&mut self, name: &str) -> Result<u32, StoreError> {
        let (index, level) = self.locate(name)?;
        let level = level.saturating_add(1);
        self.catalog.set_level(index, level);
        log::info!("purchased {name}, now level {level}");
        Ok(level)
    }

    /// Sell back one level of `name`. Returns the new level.
    pub fn decrease(&mut self, name: &str) -> Result<u32, StoreError> {
        let (index, level) = self.locate(name)?;
        if level == 0 {
            return Err(StoreError::LevelAlreadyZero(name.to_string()));
        }
        let level = level - 1;
        self.catalog.set_level(index, level);
        log::info!("decreased {name}, now level {level}");
        Ok(level)
    }

    /// Put every upgrade back at its seed level.
    pub fn reset(&mut self) {
        self.catalog = loader::build_catalog(&self.seeds);
        log::info!("reset {} upgrades to seed levels", self.seeds.len());
    }

    fn locate(&self, name: &str) -> Result<(usize, u32), StoreError> {
        self.catalog
            .index_of(name)
            .and_then(|i| self.catalog.get(i).map(|u| (i, u.level)))
            .ok_or_else(|| StoreError::UpgradeNotFound(name.to_string()))
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crumb_core::Planner;

    #[test]
    fn purchase_increments_level() {
        let mut store = CatalogStore::seeded();
        assert_eq!(store.purchase("GrandMa"), Ok(1));
        assert_eq!(store.purchase("GrandMa"), Ok(2));
        assert_eq!(store.level("GrandMa"), Some(2));
        assert!(store.catalog().is_unlocked(2));
    }

    #[test]
    fn unknown_upgrade_is_reported() {
        let mut store = CatalogStore::seeded();
        assert_eq!(
            store.purchase("Cookie Devil"),
            Err(StoreError::UpgradeNotFound("Cookie Devil".into()))
        );
        assert_eq!(
            store.decrease("Cookie Devil"),
            Err(StoreError::UpgradeNotFound("Cookie Devil".into()))
        );
    }

    #[test]
    fn decrease_stops_at_zero() {
        let mut store = CatalogStore::seeded();
        assert_eq!(store.decrease("AutoClick"), Ok(0));
        let err = store.decrease("AutoClick").unwrap_err();
        assert_eq!(err, StoreError::LevelAlreadyZero("AutoClick".into()));
        assert_eq!(err.to_string(), "level of 'AutoClick' is already zero");
        assert_eq!(store.level("AutoClick"), Some(0));
    }

    #[test]
    fn reset_restores_seed_levels() {
        let mut store = CatalogStore::seeded();
        store.purchase("AutoClick").unwrap();
        store.purchase("GrandMa").unwrap();
        store.purchase("C-Robot").unwrap();

        store.reset();
        assert_eq!(store.catalog(), &seeds::seed_catalog());
    }

    #[test]
    fn snapshot_is_detached() {
        let mut store = CatalogStore::seeded();
        let snapshot = store.snapshot();
        store.purchase("GrandMa").unwrap();
        assert_eq!(snapshot.get_by_name("GrandMa").map(|u| u.level), Some(0));
    }

    #[test]
    fn new_validates_entries() {
        assert!(matches!(
            CatalogStore::new(Vec::new()),
            Err(DataLoadError::EmptyCatalog)
        ));
    }

    #[test]
    fn store_drives_the_planner() {
        let mut store = CatalogStore::seeded();
        let planner = Planner::default();

        let best = planner.best_upgrade(&store.snapshot()).unwrap();
        assert_eq!(best.name, "AutoClick");
        store.purchase(&best.name).unwrap();

        assert_eq!(store.level("AutoClick"), Some(2));
        assert!((planner.aggregate_cps(&store.snapshot()) - 0.2).abs() < 1e-12);
    }
}
