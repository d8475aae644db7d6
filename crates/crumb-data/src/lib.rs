//! Data layer for the Crumb planner: catalog files, the stock catalog, the
//! live catalog store, and report export.

pub mod export;
pub mod loader;
pub mod schema;
pub mod seeds;
pub mod store;

pub use export::{ExportError, read_report, write_report};
pub use loader::{DataLoadError, load_catalog, load_config};
pub use schema::UpgradeData;
pub use seeds::seed_catalog;
pub use store::{CatalogStore, StoreError};
