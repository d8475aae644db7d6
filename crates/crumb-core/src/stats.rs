//! Production breakdown of a catalog snapshot.

use serde::{Deserialize, Serialize};

use crate::upgrade::Catalog;

/// One owned upgrade's share of the aggregate rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpsShare {
    pub name: String,
    pub level: u32,
    /// `level * cps_per_level`.
    pub cps: f64,
    /// Share of the aggregate rate, in percent. Zero when the aggregate is.
    pub percentage: f64,
}

/// How the aggregate rate splits across owned upgrades, in catalog order.
pub fn cps_distribution(catalog: &Catalog) -> Vec<CpsShare> {
    let total = catalog.aggregate_cps();
    catalog
        .iter()
        .filter(|u| u.is_owned())
        .map(|u| {
            let cps = u.cps();
            CpsShare {
                name: u.name.clone(),
                level: u.level,
                cps,
                percentage: if total > 0.0 { cps / total * 100.0 } else { 0.0 },
            }
        })
        .collect()
}
