//! Crumb Core -- purchase planning for idle "cookie clicker" economies.
//!
//! Given a catalog of upgrades (base price, per-level yield, owned level),
//! the engine answers which upgrade to buy next and simulates long greedy
//! purchase sequences.
//!
//! # Pipeline
//!
//! Each selection round runs, leaf first:
//!
//! 1. **Income** -- [`income::BonusCycle`] turns a production rate and a cost
//!    into elapsed minutes under the periodic bonus cycle.
//! 2. **Time-to-afford** -- [`afford::AffordCalculator`] memoizes those
//!    answers in a bounded LRU cache shared across simulations.
//! 3. **Valuation** -- [`upgrade::Upgrade::current_price`] (`floor(base *
//!    1.3^level)`) and [`upgrade::Upgrade::value`] (yield per cookie).
//! 4. **Unlock** -- [`upgrade::Catalog::is_unlocked`] gates visibility on
//!    the predecessor's level.
//! 5. **Selection** -- [`selector::best_upgrade`] ranks unlocked upgrades by
//!    value per minute.
//! 6. **Simulation** -- [`simulation::Simulator`] repeats selection on a
//!    private copy of the catalog, collecting totals and a timeline.
//!
//! # Key Types
//!
//! - [`planner::Planner`] -- Configured entry point for host applications.
//! - [`upgrade::Catalog`] -- Ordered upgrade snapshot.
//! - [`selector::EfficiencyCandidate`] -- A ranked purchase option.
//! - [`simulation::SimulationResult`] -- Totals, per-upgrade outcomes, and
//!   timeline of one run.
//!
//! The engine is synchronous and performs no I/O. Only the memo inside the
//! calculator is shared between runs.

pub mod afford;
pub mod config;
pub mod income;
pub mod planner;
pub mod selector;
pub mod simulation;
pub mod stats;
pub mod upgrade;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use afford::AffordCalculator;
pub use config::PlannerConfig;
pub use planner::Planner;
pub use selector::{EfficiencyCandidate, best_upgrade};
pub use simulation::{SimulationRequest, SimulationResult, Termination, run_simulation};
pub use upgrade::{Catalog, Price, Upgrade, aggregate_cps, current_price};
