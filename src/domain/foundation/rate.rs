//! Rate value object (successes over trials).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// An exact success rate `successes / total` with `total > 0`.
///
/// Rates compare by integer cross-multiplication, so `81/87` and `162/174`
/// are equal and ties between treatments are detected exactly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "RateRepr", into = "RateRepr")]
pub struct Rate {
    successes: u64,
    total: u64,
}

impl Rate {
    /// Creates a rate, or `None` when the rate is undefined.
    ///
    /// A rate is undefined when there are no trials, or when the counts are
    /// inconsistent (`successes > total`).
    pub fn new(successes: u64, total: u64) -> Option<Self> {
        if total == 0 || successes > total {
            return None;
        }
        Some(Self { successes, total })
    }

    /// Returns the number of successes.
    pub fn successes(&self) -> u64 {
        self.successes
    }

    /// Returns the number of trials.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns the rate as a fraction (0.0 to 1.0).
    pub fn as_f64(&self) -> f64 {
        self.successes as f64 / self.total as f64
    }
}

impl PartialEq for Rate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Rate {}

impl PartialOrd for Rate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rate {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = u128::from(self.successes) * u128::from(other.total);
        let rhs = u128::from(other.successes) * u128::from(self.total);
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(4);
        write!(f, "{:.*}", precision, self.as_f64())
    }
}

#[derive(Serialize, Deserialize)]
struct RateRepr {
    successes: u64,
    total: u64,
    #[serde(default)]
    rate: f64,
}

impl From<Rate> for RateRepr {
    fn from(rate: Rate) -> Self {
        Self {
            successes: rate.successes,
            total: rate.total,
            rate: rate.as_f64(),
        }
    }
}

impl TryFrom<RateRepr> for Rate {
    type Error = String;

    fn try_from(repr: RateRepr) -> Result<Self, Self::Error> {
        Rate::new(repr.successes, repr.total).ok_or_else(|| {
            format!(
                "rate {}/{} is undefined",
                repr.successes, repr.total
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_new_rejects_zero_total() {
        assert!(Rate::new(0, 0).is_none());
    }

    #[test]
    fn rate_new_rejects_more_successes_than_trials() {
        assert!(Rate::new(5, 4).is_none());
    }

    #[test]
    fn rate_as_f64_divides() {
        let rate = Rate::new(273, 350).unwrap();
        assert!((rate.as_f64() - 0.78).abs() < 1e-12);
    }

    #[test]
    fn equivalent_fractions_are_equal() {
        assert_eq!(Rate::new(81, 87).unwrap(), Rate::new(162, 174).unwrap());
    }

    #[test]
    fn ordering_uses_exact_fractions() {
        // 0.780 vs 0.826 from the kidney stone data
        let a = Rate::new(273, 350).unwrap();
        let b = Rate::new(289, 350).unwrap();
        assert!(a < b);

        // 0.931 vs 0.867
        let small_a = Rate::new(81, 87).unwrap();
        let small_b = Rate::new(234, 270).unwrap();
        assert!(small_a > small_b);
    }

    #[test]
    fn ordering_survives_large_counts() {
        let a = Rate::new(u64::MAX - 1, u64::MAX).unwrap();
        let b = Rate::new(u64::MAX - 2, u64::MAX).unwrap();
        assert!(a > b);
    }

    #[test]
    fn display_defaults_to_four_places() {
        let rate = Rate::new(1, 3).unwrap();
        assert_eq!(format!("{}", rate), "0.3333");
        assert_eq!(format!("{:.2}", rate), "0.33");
    }

    #[test]
    fn rate_serializes_with_fraction() {
        let json = serde_json::to_value(Rate::new(1, 4).unwrap()).unwrap();
        assert_eq!(json["successes"], 1);
        assert_eq!(json["total"], 4);
        assert_eq!(json["rate"], 0.25);
    }

    #[test]
    fn rate_deserialize_rejects_zero_total() {
        let result: Result<Rate, _> = serde_json::from_str(r#"{"successes":0,"total":0}"#);
        assert!(result.is_err());
    }
}
