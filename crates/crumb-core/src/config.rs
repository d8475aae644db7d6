//! Planner configuration.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::income::BonusCycle;
use crate::simulation::MAX_PURCHASES;

/// Default capacity of the time-to-afford memo.
pub const DEFAULT_CACHE_CAPACITY: usize = 2048;

/// Default timeline sampling period, in purchases.
pub const DEFAULT_CHECKPOINT_INTERVAL: u32 = 10;

/// Errors reported by [`PlannerConfig::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("cache capacity must be greater than zero")]
    ZeroCacheCapacity,

    #[error("checkpoint interval must be greater than zero")]
    ZeroCheckpointInterval,

    #[error("max purchases must be between 1 and {MAX_PURCHASES}, got {0}")]
    MaxPurchasesOutOfRange(u32),

    #[error("bonus cycle has no segments")]
    EmptyBonusCycle,

    #[error("bonus cycle durations must be finite and non-negative")]
    InvalidCycleDuration,

    #[error("bonus cycle produces nothing per cycle")]
    BarrenBonusCycle,
}

/// Tunables for the planner and simulation driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Capacity of the time-to-afford memo.
    pub cache_capacity: usize,
    /// Record a timeline checkpoint every this many purchases (and at the
    /// first purchase).
    pub checkpoint_interval: u32,
    /// Largest purchase target a simulation request may ask for.
    pub max_purchases: u32,
    /// Income cycle used to answer time-to-afford queries.
    pub bonus_cycle: BonusCycle,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
            max_purchases: MAX_PURCHASES,
            bonus_cycle: BonusCycle::default(),
        }
    }
}

impl PlannerConfig {
    /// `cache_capacity` as the non-zero size the memo needs.
    pub fn memo_capacity(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.cache_capacity).ok_or(ConfigError::ZeroCacheCapacity)
    }

    /// Check that the configuration can drive a planner.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.memo_capacity()?;
        if self.checkpoint_interval == 0 {
            return Err(ConfigError::ZeroCheckpointInterval);
        }
        if self.max_purchases == 0 || self.max_purchases > MAX_PURCHASES {
            return Err(ConfigError::MaxPurchasesOutOfRange(self.max_purchases));
        }

        let cycle = &self.bonus_cycle;
        if cycle.bonus_minutes.is_empty() {
            return Err(ConfigError::EmptyBonusCycle);
        }
        let durations_ok = std::iter::once(cycle.wait_seconds)
            .chain(cycle.bonus_minutes.iter().copied())
            .all(|d| d.is_finite() && d >= 0.0);
        if !durations_ok {
            return Err(ConfigError::InvalidCycleDuration);
        }
        if cycle.cookies_per_cycle(1.0) <= 0.0 {
            return Err(ConfigError::BarrenBonusCycle);
        }

        Ok(())
    }
}
