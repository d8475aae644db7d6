//! The stock upgrade catalog.

use crumb_core::Catalog;

use crate::loader::build_catalog;
use crate::schema::UpgradeData;

/// `(name, base_price, cps_per_level)` for every stock upgrade, in catalog
/// order. The first entry is seeded at level 1, the rest at 0.
pub const SEEDS: [(&str, f64, f64); 30] = [
    ("AutoClick", 30.0, 0.1),
    ("GrandMa", 100.0, 0.3),
    ("C-Robot", 1_000.0, 1.0),
    ("CookieFarm", 10_000.0, 3.1),
    ("C-Factory", 50_000.0, 6.0),
    ("S-Factory", 200_000.0, 20.0),
    ("X-Factory", 500_000.0, 40.0),
    ("CookieCloner", 1e6, 70.0),
    ("C-Cern", 5e6, 300.0),
    ("Atomic-C", 3e7, 1_500.0),
    ("Alien Robot", 7e7, 3_000.0),
    ("Alien Lab", 2e8, 8_000.0),
    ("Alien Lab v2", 4e8, 15_000.0),
    ("Alien Tech", 6e8, 20_000.0),
    ("Alien C-X", 1e9, 30_000.0),
    ("Nano Cookie", 3e9, 80_000.0),
    ("Molecular-C", 5e9, 120_000.0),
    ("Virus Cookie", 1e10, 200_000.0),
    ("Proto Cookie", 2e10, 350_000.0),
    ("Synaptic-C", 5e10, 600_000.0),
    ("Hydrogenic-C", 1e11, 1e6),
    ("Uranium-C", 2e11, 1.5e6),
    ("Plutonium-C", 4e11, 2.5e6),
    ("Krypto-C", 8e11, 4e6),
    ("RedKrypto-C", 1.6e12, 7e6),
    ("Moon-C", 2.5e12, 1e7),
    ("Galaxy-C", 4e12, 1.5e7),
    ("Galaxy-X", 8e12, 2.5e7),
    ("Cookie Hack", 1.5e13, 4e7),
    ("Cookie God", 1e15, 1e9),
];

/// The stock catalog as data-file entries.
pub fn seed_data() -> Vec<UpgradeData> {
    SEEDS
        .iter()
        .enumerate()
        .map(|(i, &(name, price, cps))| UpgradeData {
            name: name.to_string(),
            price,
            cps,
            seed_level: u32::from(i == 0),
        })
        .collect()
}

/// The stock catalog at its seed levels.
pub fn seed_catalog() -> Catalog {
    build_catalog(&seed_data())
}
