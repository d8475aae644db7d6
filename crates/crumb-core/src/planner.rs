//! The planner: the engine's surface toward its host application.
//!
//! A [`Planner`] bundles a validated [`PlannerConfig`] with a shared
//! [`AffordCalculator`]. Cloning a planner is cheap and every clone shares
//! the same memo, so a host can build one at startup and hand it to every
//! request handler or worker thread.

use std::sync::Arc;

use crate::afford::{AffordCalculator, CacheStats};
use crate::config::{ConfigError, PlannerConfig};
use crate::selector::{self, EfficiencyCandidate, Overview};
use crate::simulation::{SimulationError, SimulationRequest, SimulationResult, Simulator};
use crate::stats::{self, CpsShare};
use crate::upgrade::{Catalog, Price, Upgrade};

#[derive(Debug, Clone)]
pub struct Planner {
    config: PlannerConfig,
    calculator: Arc<AffordCalculator>,
}

impl Planner {
    /// Build a planner with its own calculator.
    pub fn new(config: PlannerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let calculator = Arc::new(AffordCalculator::from_config(&config)?);
        Ok(Self { config, calculator })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn calculator(&self) -> &Arc<AffordCalculator> {
        &self.calculator
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.calculator.stats()
    }

    pub fn aggregate_cps(&self, catalog: &Catalog) -> f64 {
        catalog.aggregate_cps()
    }

    pub fn current_price(&self, upgrade: &Upgrade) -> Price {
        upgrade.current_price()
    }

    /// Minutes until `cost` is affordable at `rate`; `None` if never.
    pub fn minutes_to_afford(&self, rate: f64, cost: Price) -> Option<f64> {
        self.calculator.minutes_to_afford(rate, cost)
    }

    pub fn best_upgrade(&self, catalog: &Catalog) -> Option<EfficiencyCandidate> {
        selector::best_upgrade(catalog, &self.calculator)
    }

    pub fn overview(&self, catalog: &Catalog) -> Overview {
        selector::overview(catalog, &self.calculator)
    }

    pub fn cps_distribution(&self, catalog: &Catalog) -> Vec<CpsShare> {
        stats::cps_distribution(catalog)
    }

    /// Validate a purchase target against this planner's limit.
    pub fn request(&self, purchases: i64) -> Result<SimulationRequest, SimulationError> {
        SimulationRequest::with_limit(purchases, self.config.max_purchases)
    }

    pub fn run_simulation(&self, catalog: &Catalog, request: SimulationRequest) -> SimulationResult {
        self.simulator().run(catalog, request.purchases())
    }

    /// Run several independent simulations over the same snapshot. Results
    /// come back in request order.
    #[cfg(not(feature = "parallel"))]
    pub fn run_batch(
        &self,
        catalog: &Catalog,
        requests: &[SimulationRequest],
    ) -> Vec<SimulationResult> {
        let simulator = self.simulator();
        requests
            .iter()
            .map(|r| simulator.run(catalog, r.purchases()))
            .collect()
    }

    /// Run several independent simulations over the same snapshot on the
    /// rayon pool. Results come back in request order.
    #[cfg(feature = "parallel")]
    pub fn run_batch(
        &self,
        catalog: &Catalog,
        requests: &[SimulationRequest],
    ) -> Vec<SimulationResult> {
        use rayon::prelude::*;

        let simulator = self.simulator();
        requests
            .par_iter()
            .map(|r| simulator.run(catalog, r.purchases()))
            .collect()
    }

    fn simulator(&self) -> Simulator<'_> {
        Simulator::new(&self.calculator).with_checkpoint_interval(self.config.checkpoint_interval)
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self {
            config: PlannerConfig::default(),
            calculator: Arc::new(AffordCalculator::default()),
        }
    }
}
