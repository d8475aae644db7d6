//! Upgrade catalog: price curve, yield, and unlock gating.
//!
//! A [`Catalog`] is an ordered list of [`Upgrade`]s. Order is defined by
//! [`Upgrade::position`] and drives the unlock rule: an upgrade becomes
//! visible once its predecessor has been bought at least once.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Multiplicative price growth applied per owned level.
pub const PRICE_GROWTH: f64 = 1.3;

/// A whole-cookie amount: an `f64` with no fractional part.
pub type Price = f64;

/// Price of an upgrade with the given base price after `level` purchases.
///
/// `floor(base_price * 1.3^level)`. Uses `powf` so the result matches a libm
/// `pow` call bit-for-bit. Stays exact in whole cookies up to `f64::MAX`
/// and becomes `f64::INFINITY` past it.
#[inline]
pub fn price_at_level(base_price: f64, level: u32) -> Price {
    (base_price * PRICE_GROWTH.powf(f64::from(level))).floor()
}

// ---------------------------------------------------------------------------
// Upgrade
// ---------------------------------------------------------------------------

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upgrade {
    /// Unique name. Used as the key everywhere.
    pub name: String,
    /// Price at level 0.
    pub base_price: f64,
    /// Number of times purchased.
    pub level: u32,
    /// Production added per owned level.
    pub cps_per_level: f64,
    /// Catalog ordering.
    pub position: u32,
}

impl Upgrade {
    /// Create an unowned upgrade at position 0.
    pub fn new(name: impl Into<String>, base_price: f64, cps_per_level: f64) -> Self {
        Self {
            name: name.into(),
            base_price,
            level: 0,
            cps_per_level,
            position: 0,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn at_position(mut self, position: u32) -> Self {
        self.position = position;
        self
    }

    /// Price of the next level.
    pub fn current_price(&self) -> Price {
        price_at_level(self.base_price, self.level)
    }

    /// Yield per cookie spent on the next level: `cps_per_level / current_price`.
    ///
    /// Independent of how many levels are already owned except through the
    /// price. A zero price yields `f64::INFINITY`.
    pub fn value(&self) -> f64 {
        self.cps_per_level / self.current_price()
    }

    /// Production currently contributed by this upgrade.
    pub fn cps(&self) -> f64 {
        f64::from(self.level) * self.cps_per_level
    }

    pub fn is_owned(&self) -> bool {
        self.level > 0
    }
}

/// Price of the next level of `upgrade`.
pub fn current_price(upgrade: &Upgrade) -> Price {
    upgrade.current_price()
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Ordered collection of upgrades.
///
/// Serialized as a plain list. Deserializing goes through [`Catalog::new`],
/// so entries are re-sorted by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Upgrade>", into = "Vec<Upgrade>")]
pub struct Catalog {
    upgrades: Vec<Upgrade>,
}

impl Catalog {
    /// Build a catalog, ordering entries by `position` (stable for ties).
    pub fn new(mut upgrades: Vec<Upgrade>) -> Self {
        upgrades.sort_by_key(|u| u.position);
        Self { upgrades }
    }

    /// Build a catalog from an already-ordered list, assigning positions by
    /// index.
    pub fn from_ordered(upgrades: Vec<Upgrade>) -> Self {
        let upgrades = upgrades
            .into_iter()
            .enumerate()
            .map(|(i, u)| u.at_position(i as u32))
            .collect();
        Self { upgrades }
    }

    pub fn len(&self) -> usize {
        self.upgrades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upgrades.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Upgrade> {
        self.upgrades.iter()
    }

    pub fn as_slice(&self) -> &[Upgrade] {
        &self.upgrades
    }

    pub fn get(&self, index: usize) -> Option<&Upgrade> {
        self.upgrades.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.upgrades.iter().position(|u| u.name == name)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Upgrade> {
        self.upgrades.iter().find(|u| u.name == name)
    }

    /// Overwrite the level of the upgrade at `index`. Returns `false` if the
    /// index is out of range.
    pub fn set_level(&mut self, index: usize, level: u32) -> bool {
        match self.upgrades.get_mut(index) {
            Some(upgrade) => {
                upgrade.level = level;
                true
            }
            None => false,
        }
    }

    /// Sum of `level * cps_per_level` over owned upgrades, in catalog order.
    pub fn aggregate_cps(&self) -> f64 {
        self.upgrades
            .iter()
            .filter(|u| u.is_owned())
            .map(Upgrade::cps)
            .sum()
    }

    /// Whether the upgrade at `index` is currently visible.
    ///
    /// True if it is owned, is the first entry, or its predecessor is owned.
    /// Evaluated against current levels only; nothing is remembered.
    pub fn is_unlocked(&self, index: usize) -> bool {
        let Some(upgrade) = self.upgrades.get(index) else {
            return false;
        };
        upgrade.level > 0 || index == 0 || self.upgrades[index - 1].level >= 1
    }

    /// Unlocked upgrades with their catalog index, in catalog order.
    pub fn unlocked(&self) -> impl Iterator<Item = (usize, &Upgrade)> + '_ {
        self.upgrades
            .iter()
            .enumerate()
            .filter(|(i, _)| self.is_unlocked(*i))
    }

    /// Copy of this catalog with every level cleared and the first entry
    /// owned once, so production never starts at zero.
    pub fn fresh_start(&self) -> Catalog {
        let mut working = self.clone();
        for upgrade in &mut working.upgrades {
            upgrade.level = 0;
        }
        if let Some(first) = working.upgrades.first_mut() {
            first.level = 1;
        }
        working
    }

    pub(crate) fn upgrade_mut(&mut self, index: usize) -> Option<&mut Upgrade> {
        self.upgrades.get_mut(index)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Upgrade;
    type IntoIter = std::slice::Iter<'a, Upgrade>;

    fn into_iter(self) -> Self::IntoIter {
        self.upgrades.iter()
    }
}

impl From<Vec<Upgrade>> for Catalog {
    fn from(upgrades: Vec<Upgrade>) -> Self {
        Catalog::new(upgrades)
    }
}

impl From<Catalog> for Vec<Upgrade> {
    fn from(catalog: Catalog) -> Self {
        catalog.upgrades
    }
}

impl FromIterator<Upgrade> for Catalog {
    fn from_iter<I: IntoIterator<Item = Upgrade>>(iter: I) -> Self {
        Catalog::new(iter.into_iter().collect())
    }
}

/// Aggregate production of a catalog snapshot.
pub fn aggregate_cps(catalog: &Catalog) -> f64 {
    catalog.aggregate_cps()
}

// ===========================================================================
// Tests
// ===========================================================================
