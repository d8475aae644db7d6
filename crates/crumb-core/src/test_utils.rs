//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::afford::AffordCalculator;
use crate::upgrade::{Catalog, Upgrade};

/// A fresh calculator with the default cycle and memo size.
pub fn calculator() -> AffordCalculator {
    AffordCalculator::default()
}

/// Build a catalog from `(name, base_price, cps_per_level, level)` rows, in
/// order.
pub fn catalog_of(rows: &[(&str, f64, f64, u32)]) -> Catalog {
    Catalog::from_ordered(
        rows.iter()
            .map(|&(name, price, cps, level)| Upgrade::new(name, price, cps).with_level(level))
            .collect(),
    )
}

/// AutoClick owned once, GrandMa unowned.
pub fn starter_catalog() -> Catalog {
    catalog_of(&[("AutoClick", 30.0, 0.1, 1), ("GrandMa", 100.0, 0.3, 0)])
}

/// The first eight tiers of the stock catalog, nothing owned.
pub fn ladder_catalog() -> Catalog {
    catalog_of(&[
        ("AutoClick", 30.0, 0.1, 0),
        ("GrandMa", 100.0, 0.3, 0),
        ("C-Robot", 1_000.0, 1.0, 0),
        ("CookieFarm", 10_000.0, 3.1, 0),
        ("C-Factory", 50_000.0, 6.0, 0),
        ("S-Factory", 200_000.0, 20.0, 0),
        ("X-Factory", 500_000.0, 40.0, 0),
        ("CookieCloner", 1_000_000.0, 70.0, 0),
    ])
}
