//! Time-to-afford calculator with a shared, bounded memo.
//!
//! The selector asks "how many minutes until this price is covered" for every
//! unlocked upgrade on every simulation round, so answers are memoized. The
//! rate is quantized to thousandths (truncated) and the cost is a whole
//! price; the answer is computed from the quantized rate, so a cache hit and
//! a miss always agree.
//!
//! One calculator is meant to be built at startup and shared (behind an
//! [`Arc`](std::sync::Arc)) by every planner and simulation in the process.
//! The memo sits behind a [`Mutex`], so concurrent simulations may share it.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use lru::LruCache;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, DEFAULT_CACHE_CAPACITY, PlannerConfig};
use crate::income::BonusCycle;
use crate::upgrade::Price;

/// Scale applied to a rate before truncating it into a cache key.
pub const RATE_KEY_SCALE: f64 = 1000.0;

const DEFAULT_MEMO_CAPACITY: NonZeroUsize = match NonZeroUsize::new(DEFAULT_CACHE_CAPACITY) {
    Some(capacity) => capacity,
    None => panic!("default cache capacity is zero"),
};

/// Quantize a rate to integer thousandths, truncating toward zero.
#[inline]
pub fn quantize_rate(rate: f64) -> i64 {
    (rate * RATE_KEY_SCALE) as i64
}

/// Memo key: quantized rate plus the bit pattern of the whole-cookie cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AffordKey {
    pub rate_milli: i64,
    pub cost_bits: u64,
}

impl AffordKey {
    pub fn new(rate: f64, cost: Price) -> Self {
        Self {
            rate_milli: quantize_rate(rate),
            cost_bits: cost.to_bits(),
        }
    }

    /// The rate the answer is computed from.
    pub fn rate(&self) -> f64 {
        self.rate_milli as f64 / RATE_KEY_SCALE
    }

    pub fn cost(&self) -> Price {
        f64::from_bits(self.cost_bits)
    }
}

/// Counters describing memo usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
    pub capacity: usize,
}

/// Answers time-to-afford queries against a [`BonusCycle`].
#[derive(Debug)]
pub struct AffordCalculator {
    cycle: BonusCycle,
    memo: Mutex<LruCache<AffordKey, Option<f64>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl AffordCalculator {
    /// Create a calculator with an empty memo of `capacity` entries.
    pub fn new(cycle: BonusCycle, capacity: NonZeroUsize) -> Self {
        Self {
            cycle,
            memo: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Build from the cycle and memo size of `config`.
    pub fn from_config(config: &PlannerConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.bonus_cycle.clone(), config.memo_capacity()?))
    }

    pub fn cycle(&self) -> &BonusCycle {
        &self.cycle
    }

    /// Minutes until `cost` is covered at `rate`, or `None` if it never is.
    pub fn minutes_to_afford(&self, rate: f64, cost: Price) -> Option<f64> {
        let key = AffordKey::new(rate, cost);

        if let Some(&cached) = self.memo().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return cached;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let minutes = self.cycle.minutes_to_reach(key.rate(), key.cost());
        self.memo().put(key, minutes);
        minutes
    }

    pub fn stats(&self) -> CacheStats {
        let memo = self.memo();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            len: memo.len(),
            capacity: memo.cap().get(),
        }
    }

    /// Forget every memoized answer and reset the counters.
    pub fn clear(&self) {
        self.memo().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    fn memo(&self) -> MutexGuard<'_, LruCache<AffordKey, Option<f64>>> {
        // The memo holds plain values; a panic mid-update cannot corrupt it.
        self.memo.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for AffordCalculator {
    fn default() -> Self {
        Self::new(BonusCycle::default(), DEFAULT_MEMO_CAPACITY)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
