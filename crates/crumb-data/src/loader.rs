//! Reads catalog and planner config files.
//!
//! Provides format detection (RON/JSON/TOML), deserialization, and the
//! validation that runs before any entry reaches the engine.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crumb_core::config::ConfigError;
use crumb_core::{Catalog, PlannerConfig};

use crate::schema::{TomlUpgrades, UpgradeData};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// Two entries share a name.
    #[error("duplicate upgrade name '{name}'")]
    DuplicateName { name: String },

    /// A base price that is not a positive finite number.
    #[error("upgrade '{name}' has invalid price {price}")]
    InvalidPrice { name: String, price: f64 },

    /// A yield that is negative or not finite.
    #[error("upgrade '{name}' has invalid cps {cps}")]
    InvalidCps { name: String, cps: f64 },

    /// The catalog has no entries.
    #[error("catalog has no upgrades")]
    EmptyCatalog,

    /// A config file parsed but does not describe a usable planner.
    #[error("invalid config in {file}: {source}")]
    Config {
        file: PathBuf,
        #[source]
        source: ConfigError,
    },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// Deserialization
// ===========================================================================

fn parse_error(file: &Path, e: impl std::fmt::Display) -> DataLoadError {
    DataLoadError::Parse {
        file: file.to_path_buf(),
        detail: e.to_string(),
    }
}

/// Deserialize `content` as a single value in the given format. `file` is
/// only used for error reporting.
pub fn deserialize_str<T: DeserializeOwned>(
    content: &str,
    format: Format,
    file: &Path,
) -> Result<T, DataLoadError> {
    match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_error(file, e)),
        Format::Json => serde_json::from_str(content).map_err(|e| parse_error(file, e)),
        Format::Toml => toml::from_str(content).map_err(|e| parse_error(file, e)),
    }
}

/// Read a file and deserialize it according to its format (detected from extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    deserialize_str(&content, format, path)
}

// ===========================================================================
// Catalogs
// ===========================================================================

/// Parse and validate catalog entries from a string.
pub fn parse_catalog(
    content: &str,
    format: Format,
    file: &Path,
) -> Result<Vec<UpgradeData>, DataLoadError> {
    let entries = match format {
        Format::Toml => deserialize_str::<TomlUpgrades>(content, format, file)?.upgrades,
        Format::Ron | Format::Json => deserialize_str(content, format, file)?,
    };
    validate_catalog(&entries)?;
    Ok(entries)
}

/// Load and validate catalog entries from a RON, JSON, or TOML file.
pub fn load_catalog(path: &Path) -> Result<Vec<UpgradeData>, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    let entries = parse_catalog(&content, format, path)?;
    log::debug!(
        "loaded {} upgrades from {} ({format:?})",
        entries.len(),
        path.display()
    );
    Ok(entries)
}

/// Reject catalogs the engine cannot price: empty lists, repeated names,
/// non-positive or non-finite prices, and negative or non-finite yields.
pub fn validate_catalog(entries: &[UpgradeData]) -> Result<(), DataLoadError> {
    if entries.is_empty() {
        return Err(DataLoadError::EmptyCatalog);
    }

    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.name.as_str()) {
            return Err(DataLoadError::DuplicateName {
                name: entry.name.clone(),
            });
        }
        if !entry.price.is_finite() || entry.price <= 0.0 {
            return Err(DataLoadError::InvalidPrice {
                name: entry.name.clone(),
                price: entry.price,
            });
        }
        if !entry.cps.is_finite() || entry.cps < 0.0 {
            return Err(DataLoadError::InvalidCps {
                name: entry.name.clone(),
                cps: entry.cps,
            });
        }
    }
    Ok(())
}

/// Engine catalog at seed levels. Entry order becomes catalog position.
pub fn build_catalog(entries: &[UpgradeData]) -> Catalog {
    Catalog::new(
        entries
            .iter()
            .zip(0u32..)
            .map(|(entry, position)| entry.to_upgrade(position))
            .collect(),
    )
}

// ===========================================================================
// Config
// ===========================================================================

/// Load and validate a planner config from a RON, JSON, or TOML file.
/// Missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<PlannerConfig, DataLoadError> {
    let config: PlannerConfig = deserialize_file(path)?;
    config.validate().map_err(|source| DataLoadError::Config {
        file: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded planner config from {}", path.display());
    Ok(config)
}

// ===========================================================================
// Tests
// ===========================================================================
