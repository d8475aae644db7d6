//! Greedy purchase simulation.
//!
//! The driver copies a catalog snapshot, clears every level, gives the first
//! upgrade one free level so production never starts at zero, and then
//! repeatedly buys whatever the selector ranks best. It stops when the
//! purchase target is met ([`Termination::Completed`]) or when nothing
//! unlocked can ever be afforded ([`Termination::Stalled`]). Neither outcome
//! is an error; a stalled run reports what it accumulated.
//!
//! The caller's catalog is never touched.

use serde::{Deserialize, Serialize};

use crate::afford::AffordCalculator;
use crate::config::DEFAULT_CHECKPOINT_INTERVAL;
use crate::selector::best_at_rate;
use crate::upgrade::{Catalog, Price};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Smallest purchase target a request may ask for.
pub const MIN_PURCHASES: u32 = 1;

/// Largest purchase target a request may ask for. The driver also clamps to
/// this when invoked directly.
pub const MAX_PURCHASES: u32 = 10_000;

/// Errors raised while building a [`SimulationRequest`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    #[error("invalid purchase count {requested} (expected {min}-{max})")]
    TargetOutOfRange { requested: i64, min: u32, max: u32 },
}

/// A validated purchase target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    purchases: u32,
}

impl SimulationRequest {
    /// Validate `purchases` against `[MIN_PURCHASES, MAX_PURCHASES]`.
    pub fn new(purchases: i64) -> Result<Self, SimulationError> {
        Self::with_limit(purchases, MAX_PURCHASES)
    }

    /// Validate `purchases` against `[MIN_PURCHASES, max]`. `max` itself is
    /// clamped to [`MAX_PURCHASES`].
    pub fn with_limit(purchases: i64, max: u32) -> Result<Self, SimulationError> {
        let max = max.min(MAX_PURCHASES);
        if purchases < i64::from(MIN_PURCHASES) || purchases > i64::from(max) {
            return Err(SimulationError::TargetOutOfRange {
                requested: purchases,
                min: MIN_PURCHASES,
                max,
            });
        }
        Ok(Self {
            purchases: purchases as u32,
        })
    }

    pub fn purchases(self) -> u32 {
        self.purchases
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Why a simulation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The purchase target was reached.
    Completed,
    /// No unlocked upgrade could ever be afforded.
    Stalled,
}

/// A sampled point on the purchase timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Purchases made so far, including this one.
    pub purchase: u32,
    /// Aggregate rate after this purchase.
    pub cps: f64,
    /// Simulated minutes elapsed so far.
    pub minutes: f64,
    /// Upgrade bought at this point.
    pub upgrade: String,
}

/// Totals for one upgrade across a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeOutcome {
    pub name: String,
    pub purchases: u32,
    pub total_cost: Price,
    pub avg_cost: f64,
    /// `cps_per_level * purchases`.
    pub cps_contribution: f64,
    /// Share of the final rate, in percent.
    pub cps_percentage: f64,
    pub minutes_spent: f64,
    /// Share of total simulated minutes, in percent.
    pub time_percentage: f64,
}

/// Everything a simulation run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub total_purchases: u32,
    pub final_cps: f64,
    pub total_minutes: f64,
    pub total_cookies: Price,
    pub termination: Termination,
    /// Upgrades bought at least once, in catalog order.
    pub results: Vec<UpgradeOutcome>,
    pub timeline: Vec<Checkpoint>,
}

impl SimulationResult {
    pub fn is_complete(&self) -> bool {
        self.termination == Termination::Completed
    }

    pub fn outcome(&self, name: &str) -> Option<&UpgradeOutcome> {
        self.results.iter().find(|r| r.name == name)
    }
}

// ---------------------------------------------------------------------------
// Run state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    purchases: u32,
    cost: Price,
    minutes: f64,
}

/// Mutable state of one run. Owns the working copy of the catalog.
#[derive(Debug)]
struct Run {
    working: Catalog,
    tallies: Vec<Tally>,
    purchases: u32,
    minutes: f64,
    cookies: Price,
    timeline: Vec<Checkpoint>,
}

impl Run {
    fn new(snapshot: &Catalog) -> Self {
        Self {
            working: snapshot.fresh_start(),
            tallies: vec![Tally::default(); snapshot.len()],
            purchases: 0,
            minutes: 0.0,
            cookies: 0.0,
            timeline: Vec::new(),
        }
    }

    fn record(&mut self, index: usize, price: Price, minutes: f64) {
        if let Some(upgrade) = self.working.upgrade_mut(index) {
            upgrade.level += 1;
        }
        let tally = &mut self.tallies[index];
        tally.purchases += 1;
        tally.cost += price;
        tally.minutes += minutes;

        self.purchases += 1;
        self.minutes += minutes;
        self.cookies += price;
    }

    fn finish(self, termination: Termination) -> SimulationResult {
        let final_cps = self.working.aggregate_cps();
        let total_minutes = self.minutes;

        let results = self
            .working
            .iter()
            .zip(&self.tallies)
            .filter(|(_, t)| t.purchases > 0)
            .map(|(u, t)| {
                let cps_contribution = u.cps_per_level * f64::from(t.purchases);
                UpgradeOutcome {
                    name: u.name.clone(),
                    purchases: t.purchases,
                    total_cost: t.cost,
                    avg_cost: t.cost / f64::from(t.purchases),
                    cps_contribution,
                    cps_percentage: percentage(cps_contribution, final_cps),
                    minutes_spent: t.minutes,
                    time_percentage: percentage(t.minutes, total_minutes),
                }
            })
            .collect();

        SimulationResult {
            total_purchases: self.purchases,
            final_cps,
            total_minutes,
            total_cookies: self.cookies,
            termination,
            results,
            timeline: self.timeline,
        }
    }
}

fn percentage(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole * 100.0 } else { 0.0 }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Runs greedy purchase simulations against a shared calculator.
#[derive(Debug, Clone, Copy)]
pub struct Simulator<'a> {
    calculator: &'a AffordCalculator,
    checkpoint_interval: u32,
}

impl<'a> Simulator<'a> {
    pub fn new(calculator: &'a AffordCalculator) -> Self {
        Self {
            calculator,
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
        }
    }

    /// Sample the timeline every `interval` purchases (minimum 1).
    pub fn with_checkpoint_interval(mut self, interval: u32) -> Self {
        self.checkpoint_interval = interval.max(1);
        self
    }

    /// Simulate up to `target` purchases starting from a fresh copy of
    /// `snapshot`. `target` is clamped to [`MAX_PURCHASES`].
    pub fn run(&self, snapshot: &Catalog, target: u32) -> SimulationResult {
        let target = target.min(MAX_PURCHASES);
        log::debug!(
            "simulating {target} purchases over {} upgrades",
            snapshot.len()
        );

        let mut run = Run::new(snapshot);
        let termination = loop {
            if run.purchases >= target {
                break Termination::Completed;
            }
            if !self.step(&mut run) {
                log::info!("simulation stalled after {} purchases", run.purchases);
                break Termination::Stalled;
            }
        };

        let result = run.finish(termination);
        log::debug!(
            "simulation finished: {} purchases, {:.3} cps, {:.2} minutes",
            result.total_purchases,
            result.final_cps,
            result.total_minutes
        );
        result
    }

    /// Buy the best candidate. Returns `false` if there is none.
    fn step(&self, run: &mut Run) -> bool {
        let rate = run.working.aggregate_cps();
        let Some(best) = best_at_rate(&run.working, rate, self.calculator) else {
            return false;
        };
        // Re-derived at the purchase price rather than reused from ranking.
        let Some(minutes) = self.calculator.minutes_to_afford(rate, best.price) else {
            return false;
        };

        run.record(best.index, best.price, minutes);
        log::trace!(
            "purchase {}: {} for {} ({:.3} min)",
            run.purchases,
            best.name,
            best.price,
            minutes
        );

        if run.purchases == 1 || run.purchases % self.checkpoint_interval == 0 {
            run.timeline.push(Checkpoint {
                purchase: run.purchases,
                cps: run.working.aggregate_cps(),
                minutes: run.minutes,
                upgrade: best.name,
            });
        }
        true
    }
}

/// Simulate up to `target` purchases with the default checkpoint interval.
pub fn run_simulation(
    snapshot: &Catalog,
    target: u32,
    calculator: &AffordCalculator,
) -> SimulationResult {
    Simulator::new(calculator).run(snapshot, target)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    const SEGMENT: f64 = 70.0 / 60.0;

    // -----------------------------------------------------------------------
    // Requests
    // -----------------------------------------------------------------------

    #[test]
    fn request_bounds() {
        assert_eq!(SimulationRequest::new(1).unwrap().purchases(), 1);
        assert_eq!(SimulationRequest::new(10_000).unwrap().purchases(), 10_000);

        for bad in [0, -5, 10_001] {
            assert_eq!(
                SimulationRequest::new(bad),
                Err(SimulationError::TargetOutOfRange {
                    requested: bad,
                    min: 1,
                    max: 10_000,
                })
            );
        }
    }

    #[test]
    fn request_with_lower_limit() {
        assert!(SimulationRequest::with_limit(50, 50).is_ok());
        assert!(SimulationRequest::with_limit(51, 50).is_err());
        // A limit above the hard cap is clamped.
        assert!(SimulationRequest::with_limit(10_001, u32::MAX).is_err());
    }

    #[test]
    fn request_error_message() {
        let err = SimulationRequest::new(0).unwrap_err();
        assert_eq!(err.to_string(), "invalid purchase count 0 (expected 1-10000)");
    }

    // -----------------------------------------------------------------------
    // Driver
    // -----------------------------------------------------------------------

    #[test]
    fn single_purchase_on_two_upgrades() {
        let calc = calculator();
        let result = run_simulation(&starter_catalog(), 1, &calc);

        assert_eq!(result.total_purchases, 1);
        assert_eq!(result.termination, Termination::Completed);
        assert_eq!(result.total_cookies, 39.0);
        assert_eq!(result.total_minutes, SEGMENT);
        assert!((result.final_cps - 0.2).abs() < 1e-12);

        assert_eq!(result.timeline.len(), 1);
        let point = &result.timeline[0];
        assert_eq!(point.purchase, 1);
        assert_eq!(point.upgrade, "AutoClick");
        assert_eq!(point.minutes, SEGMENT);
        assert!((point.cps - 0.2).abs() < 1e-12);

        assert_eq!(result.results.len(), 1);
        let auto = &result.results[0];
        assert_eq!(auto.name, "AutoClick");
        assert_eq!(auto.purchases, 1);
        assert_eq!(auto.total_cost, 39.0);
        assert_eq!(auto.avg_cost, 39.0);
        assert!((auto.cps_contribution - 0.1).abs() < 1e-12);
        assert!((auto.cps_percentage - 50.0).abs() < 1e-9);
        assert!((auto.time_percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn per_upgrade_purchases_sum_to_total() {
        let result = run_simulation(&ladder_catalog(), 250, &calculator());
        assert_eq!(result.total_purchases, 250);
        let sum: u32 = result.results.iter().map(|r| r.purchases).sum();
        assert_eq!(sum, result.total_purchases);

        let cost: Price = result.results.iter().map(|r| r.total_cost).sum();
        assert!((cost - result.total_cookies).abs() <= result.total_cookies * 1e-12);
    }

    #[test]
    fn timeline_samples_first_and_every_tenth() {
        let result = run_simulation(&ladder_catalog(), 35, &calculator());
        let points: Vec<u32> = result.timeline.iter().map(|c| c.purchase).collect();
        assert_eq!(points, [1, 10, 20, 30]);
    }

    #[test]
    fn custom_checkpoint_interval() {
        let calc = calculator();
        let result = Simulator::new(&calc)
            .with_checkpoint_interval(4)
            .run(&ladder_catalog(), 12);
        let points: Vec<u32> = result.timeline.iter().map(|c| c.purchase).collect();
        assert_eq!(points, [1, 4, 8, 12]);
    }

    #[test]
    fn timeline_is_monotonic() {
        let result = run_simulation(&ladder_catalog(), 400, &calculator());
        for pair in result.timeline.windows(2) {
            assert!(pair[1].purchase > pair[0].purchase);
            assert!(pair[1].minutes >= pair[0].minutes);
            assert!(pair[1].cps >= pair[0].cps);
        }
        let last = result.timeline.last().unwrap();
        assert_eq!(last.minutes, result.total_minutes);
    }

    #[test]
    fn snapshot_is_not_mutated() {
        let catalog = ladder_catalog();
        let before = catalog.clone();
        let _ = run_simulation(&catalog, 100, &calculator());
        assert_eq!(catalog, before);
    }

    #[test]
    fn existing_levels_are_ignored() {
        let calc = calculator();
        let fresh = run_simulation(&ladder_catalog(), 60, &calc);

        let mut levelled = ladder_catalog();
        levelled.set_level(3, 12);
        levelled.set_level(5, 2);
        let from_levelled = run_simulation(&levelled, 60, &calc);

        assert_eq!(fresh, from_levelled);
    }

    #[test]
    fn empty_catalog_stalls_immediately() {
        let result = run_simulation(&Catalog::default(), 10, &calculator());
        assert_eq!(result.total_purchases, 0);
        assert_eq!(result.termination, Termination::Stalled);
        assert!(result.results.is_empty());
        assert!(result.timeline.is_empty());
        assert_eq!(result.final_cps, 0.0);
    }

    #[test]
    fn zero_yield_start_stalls() {
        let catalog = catalog_of(&[("dud", 10.0, 0.0, 0), ("real", 50.0, 1.0, 0)]);
        let result = run_simulation(&catalog, 10, &calculator());
        assert_eq!(result.total_purchases, 0);
        assert!(!result.is_complete());
    }

    #[test]
    fn target_is_hard_capped() {
        let catalog = catalog_of(&[("a", 10.0, 1.0, 0), ("b", 100.0, 5.0, 0)]);
        let result = run_simulation(&catalog, u32::MAX, &calculator());
        assert_eq!(result.total_purchases, MAX_PURCHASES);
        assert!(result.is_complete());
    }

    #[test]
    fn runs_are_deterministic() {
        let a = run_simulation(&ladder_catalog(), 300, &calculator());
        let b = run_simulation(&ladder_catalog(), 300, &calculator());
        assert_eq!(a, b);
    }

    #[test]
    fn outcome_lookup() {
        let result = run_simulation(&starter_catalog(), 1, &calculator());
        assert!(result.outcome("AutoClick").is_some());
        assert!(result.outcome("GrandMa").is_none());
    }

    #[test]
    fn termination_serializes_snake_case() {
        let json = serde_json::to_string(&Termination::Stalled).unwrap();
        assert_eq!(json, "\"stalled\"");
    }
}
