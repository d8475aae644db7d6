//! Income model: how long a production rate takes to cover a cost.
//!
//! Income is modelled as a repeating bonus cycle. Each segment of the cycle
//! is a wait window (`wait_seconds` at the base rate) followed by a bonus
//! window (`bonus_minutes` at the same rate). Only wait windows are charged
//! to the elapsed clock; bonus windows are free time.
//!
//! With the default cycle one full cycle yields `rate * (5 * 70 + 90 * 60)`
//! cookies and charges `5 * 70 / 60` minutes.

use serde::{Deserialize, Serialize};

/// Wait window before each bonus, in seconds.
pub const DEFAULT_WAIT_SECONDS: f64 = 70.0;

/// Bonus window lengths, in minutes, one per cycle segment.
pub const DEFAULT_BONUS_MINUTES: [f64; 5] = [10.0, 10.0, 20.0, 20.0, 30.0];

/// The periodic bonus-income cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusCycle {
    /// Wait window before each bonus, in seconds. Charged to the clock.
    pub wait_seconds: f64,
    /// Bonus window per segment, in minutes. Not charged to the clock.
    pub bonus_minutes: Vec<f64>,
}

impl Default for BonusCycle {
    fn default() -> Self {
        Self {
            wait_seconds: DEFAULT_WAIT_SECONDS,
            bonus_minutes: DEFAULT_BONUS_MINUTES.to_vec(),
        }
    }
}

impl BonusCycle {
    /// Number of segments in one cycle.
    pub fn segments(&self) -> usize {
        self.bonus_minutes.len()
    }

    /// Cookies produced by one full cycle at `rate`.
    pub fn cookies_per_cycle(&self, rate: f64) -> f64 {
        let bonus_total: f64 = self.bonus_minutes.iter().sum();
        rate * (self.segments() as f64 * self.wait_seconds + bonus_total * 60.0)
    }

    /// Minutes charged for one full cycle (wait windows only).
    pub fn minutes_per_cycle(&self) -> f64 {
        self.segments() as f64 * self.wait_seconds / 60.0
    }

    /// Minutes until `cost` cookies are covered at `rate` cookies per second.
    ///
    /// Returns `None` when `rate <= 0` (never reachable); this check comes
    /// before the cost check. Returns `Some(0.0)` when `cost <= 0`.
    ///
    /// Whole cycles are counted first; the remainder is covered by walking
    /// the segments of one more cycle. If the segments run out before the
    /// remainder is covered the result undercounts the true time.
    pub fn minutes_to_reach(&self, rate: f64, cost: f64) -> Option<f64> {
        if rate.is_nan() || rate <= 0.0 {
            return None;
        }
        if cost <= 0.0 {
            return Some(0.0);
        }

        let per_cycle = self.cookies_per_cycle(rate);
        let full_cycles = if per_cycle > 0.0 {
            (cost / per_cycle).trunc()
        } else {
            0.0
        };
        let remaining = cost - full_cycles * per_cycle;
        let mut minutes = full_cycles * self.minutes_per_cycle();

        if remaining > 0.0 {
            let mut produced = 0.0;
            for bonus in &self.bonus_minutes {
                if produced >= remaining {
                    break;
                }
                produced += rate * self.wait_seconds;
                minutes += self.wait_seconds / 60.0;
                produced += rate * bonus * 60.0;
            }
        }

        Some(minutes)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SEGMENT: f64 = 70.0 / 60.0;

    #[test]
    fn default_cycle_constants() {
        let cycle = BonusCycle::default();
        assert_eq!(cycle.segments(), 5);
        assert_eq!(cycle.cookies_per_cycle(1.0), 5750.0);
        assert_eq!(cycle.minutes_per_cycle(), 350.0 / 60.0);
    }

    #[test]
    fn non_positive_rate_is_unreachable() {
        let cycle = BonusCycle::default();
        assert_eq!(cycle.minutes_to_reach(0.0, 100.0), None);
        assert_eq!(cycle.minutes_to_reach(-2.5, 100.0), None);
        assert_eq!(cycle.minutes_to_reach(f64::NAN, 100.0), None);
    }

    #[test]
    fn rate_check_precedes_cost_check() {
        let cycle = BonusCycle::default();
        assert_eq!(cycle.minutes_to_reach(0.0, 0.0), None);
    }

    #[test]
    fn non_positive_cost_is_free() {
        let cycle = BonusCycle::default();
        assert_eq!(cycle.minutes_to_reach(0.1, 0.0), Some(0.0));
        assert_eq!(cycle.minutes_to_reach(0.1, -50.0), Some(0.0));
    }

    #[test]
    fn remainder_walks_segments() {
        let cycle = BonusCycle::default();
        // 0.1 cps: first segment yields 7 + 60 = 67 cookies.
        assert_eq!(cycle.minutes_to_reach(0.1, 39.0), Some(SEGMENT));
        assert_eq!(cycle.minutes_to_reach(0.1, 67.0), Some(SEGMENT));
        // Second segment brings it to 134.
        assert_eq!(cycle.minutes_to_reach(0.1, 100.0), Some(SEGMENT + SEGMENT));
    }

    #[test]
    fn whole_cycles_are_charged_wait_time_only() {
        let cycle = BonusCycle::default();
        // Exactly two cycles at 1 cps: no remainder.
        let minutes = cycle.minutes_to_reach(1.0, 11_500.0).unwrap();
        assert!((minutes - 2.0 * 350.0 / 60.0).abs() < 1e-12);

        // Two cycles plus a sliver needs one more segment.
        let minutes = cycle.minutes_to_reach(1.0, 11_501.0).unwrap();
        assert!((minutes - (2.0 * 350.0 / 60.0 + SEGMENT)).abs() < 1e-12);
    }

    #[test]
    fn more_cost_never_takes_less_time() {
        let cycle = BonusCycle::default();
        let mut last = 0.0;
        for cost in (0..20_000).step_by(37) {
            let minutes = cycle.minutes_to_reach(0.7, cost as f64).unwrap();
            assert!(minutes + 1e-9 >= last, "cost {cost}: {minutes} < {last}");
            last = minutes;
        }
    }

    #[test]
    fn custom_cycle() {
        let cycle = BonusCycle {
            wait_seconds: 60.0,
            bonus_minutes: vec![1.0],
        };
        // One cycle at 1 cps yields 120 cookies for one minute.
        assert_eq!(cycle.minutes_to_reach(1.0, 240.0), Some(2.0));
        assert_eq!(cycle.minutes_to_reach(1.0, 250.0), Some(3.0));
    }
}
