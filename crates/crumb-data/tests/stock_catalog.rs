//! Long runs over the stock catalog.

use crumb_core::afford::AffordCalculator;
use crumb_core::simulation::{MAX_PURCHASES, run_simulation};
use crumb_core::upgrade::price_at_level;
use crumb_data::seed_catalog;

#[test]
fn prices_keep_growing_at_the_purchase_cap() {
    let catalog = seed_catalog();
    let result = run_simulation(&catalog, MAX_PURCHASES, &AffordCalculator::default());

    assert!(result.is_complete());
    assert_eq!(result.total_purchases, MAX_PURCHASES);
    assert!(result.total_cookies.is_finite());
    assert_eq!(result.timeline.last().map(|c| c.purchase), Some(MAX_PURCHASES));

    for (index, upgrade) in catalog.iter().enumerate() {
        let Some(outcome) = result.outcome(&upgrade.name) else {
            continue;
        };
        // The run starts from a fresh catalog: only the first entry owns a level.
        let start = u32::from(index == 0);
        let end = start + outcome.purchases;

        let next = price_at_level(upgrade.base_price, end);
        let last = price_at_level(upgrade.base_price, end - 1);
        assert!(next.is_finite());
        assert!(next > last, "{} price stalled at level {end}", upgrade.name);

        // Every purchase paid the exact floored price of its level.
        let paid: f64 = (start..end)
            .map(|level| price_at_level(upgrade.base_price, level))
            .fold(0.0, |sum, price| sum + price);
        assert_eq!(outcome.total_cost, paid, "{}", upgrade.name);
    }
}

#[test]
fn no_tier_dominates_a_long_run() {
    let result = run_simulation(&seed_catalog(), MAX_PURCHASES, &AffordCalculator::default());
    let cap = MAX_PURCHASES / 5;
    for outcome in &result.results {
        assert!(
            outcome.purchases < cap,
            "{} bought {} times",
            outcome.name,
            outcome.purchases
        );
    }
    let god = result.outcome("Cookie God").map_or(0, |o| o.purchases);
    assert!(god > 0);
}
