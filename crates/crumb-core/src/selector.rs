//! Best-upgrade selection.
//!
//! Every unlocked upgrade is priced, its time-to-afford is looked up at the
//! current aggregate rate, and its value is divided by that time to give an
//! efficiency. The upgrade with the highest efficiency wins; ties go to the
//! earliest catalog entry.
//!
//! Upgrades that are already affordable (zero minutes) are left out of the
//! ranking rather than treated as free. This mirrors the game planner this
//! engine models and is kept as-is.

use serde::{Deserialize, Serialize};

use crate::afford::AffordCalculator;
use crate::upgrade::{Catalog, Price, Upgrade};

// ---------------------------------------------------------------------------
// Candidates
// ---------------------------------------------------------------------------

/// One ranked purchase option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyCandidate {
    /// Catalog index of the upgrade.
    pub index: usize,
    pub name: String,
    pub level: u32,
    /// Price of the next level.
    pub price: Price,
    pub cps_per_level: f64,
    /// `cps_per_level / price`.
    pub value: f64,
    /// Minutes until `price` is affordable at the current rate.
    pub minutes: f64,
    /// `value / minutes`.
    pub efficiency: f64,
}

fn evaluate(
    index: usize,
    upgrade: &Upgrade,
    rate: f64,
    calculator: &AffordCalculator,
) -> Option<EfficiencyCandidate> {
    let price = upgrade.current_price();
    let minutes = calculator.minutes_to_afford(rate, price)?;
    if !minutes.is_finite() || minutes <= 0.0 {
        return None;
    }

    let value = upgrade.value();
    Some(EfficiencyCandidate {
        index,
        name: upgrade.name.clone(),
        level: upgrade.level,
        price,
        cps_per_level: upgrade.cps_per_level,
        value,
        minutes,
        efficiency: value / minutes,
    })
}

/// Every rankable candidate at `rate`, in catalog order.
pub fn candidates_at_rate(
    catalog: &Catalog,
    rate: f64,
    calculator: &AffordCalculator,
) -> Vec<EfficiencyCandidate> {
    catalog
        .unlocked()
        .filter_map(|(i, u)| evaluate(i, u, rate, calculator))
        .collect()
}

/// Every rankable candidate at the catalog's own aggregate rate.
pub fn rank_candidates(catalog: &Catalog, calculator: &AffordCalculator) -> Vec<EfficiencyCandidate> {
    candidates_at_rate(catalog, catalog.aggregate_cps(), calculator)
}

/// The most efficient candidate at `rate`, or `None` if nothing unlocked can
/// ever be afforded.
pub fn best_at_rate(
    catalog: &Catalog,
    rate: f64,
    calculator: &AffordCalculator,
) -> Option<EfficiencyCandidate> {
    catalog
        .unlocked()
        .filter_map(|(i, u)| evaluate(i, u, rate, calculator))
        .fold(None, |best: Option<EfficiencyCandidate>, c| match best {
            // Strictly greater: the first of equal candidates is kept.
            Some(b) if b.efficiency >= c.efficiency => Some(b),
            _ => Some(c),
        })
}

/// The best next purchase for a catalog snapshot.
pub fn best_upgrade(catalog: &Catalog, calculator: &AffordCalculator) -> Option<EfficiencyCandidate> {
    best_at_rate(catalog, catalog.aggregate_cps(), calculator)
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

/// Metrics for one unlocked upgrade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeInsight {
    pub name: String,
    pub level: u32,
    pub base_price: f64,
    pub cps_per_level: f64,
    pub current_price: Price,
    /// `None` when the price can never be reached at the current rate.
    pub minutes_to_afford: Option<f64>,
    pub value: f64,
    pub is_best: bool,
}

/// Snapshot-wide view: aggregate rate, best pick, and per-upgrade metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub total_cps: f64,
    pub best: Option<EfficiencyCandidate>,
    pub upgrades: Vec<UpgradeInsight>,
}

/// Describe every unlocked upgrade of a snapshot.
pub fn overview(catalog: &Catalog, calculator: &AffordCalculator) -> Overview {
    let total_cps = catalog.aggregate_cps();
    let best = best_at_rate(catalog, total_cps, calculator);

    let upgrades = catalog
        .unlocked()
        .map(|(_, u)| {
            let current_price = u.current_price();
            UpgradeInsight {
                name: u.name.clone(),
                level: u.level,
                base_price: u.base_price,
                cps_per_level: u.cps_per_level,
                current_price,
                minutes_to_afford: calculator.minutes_to_afford(total_cps, current_price),
                value: u.value(),
                is_best: best.as_ref().is_some_and(|b| b.name == u.name),
            }
        })
        .collect();

    Overview {
        total_cps,
        best,
        upgrades,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
