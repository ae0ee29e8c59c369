//! Value-weighted target slot selection
//!
//! Low-value slots are drawn more often than high-value ones. Each slot value
//! `v` gets weight `1 / (v + 1)`, optionally scaled by a house bonus that
//! doubles the weight of small values (`v < 4`) and halves the rest.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Values below this threshold get the house bonus
const HOUSE_BONUS_THRESHOLD: i64 = 4;
const HOUSE_BONUS_FAVORED: f64 = 2.0;
const HOUSE_BONUS_DISFAVORED: f64 = 0.5;

/// Weighting applied to slot values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Weighting {
    /// `1 / (v + 1)`
    Inverse,
    /// `1 / (v + 1)`, doubled for small values, halved otherwise
    #[default]
    InverseWithHouseBonus,
}

impl Weighting {
    pub fn weight(&self, value: i64) -> f64 {
        let base = 1.0 / (value as f64 + 1.0);
        match self {
            Weighting::Inverse => base,
            Weighting::InverseWithHouseBonus => {
                let bonus = if value < HOUSE_BONUS_THRESHOLD {
                    HOUSE_BONUS_FAVORED
                } else {
                    HOUSE_BONUS_DISFAVORED
                };
                base * bonus
            }
        }
    }
}

/// Draw a slot index with probability proportional to its weight
///
/// Returns `None` when `values` is empty or the weights do not sum to a
/// positive finite total (negative slot values).
pub fn select_target<R: Rng + ?Sized>(
    values: &[i64],
    weighting: Weighting,
    rng: &mut R,
) -> Option<usize> {
    let weights: Vec<f64> = values.iter().map(|&v| weighting.weight(v)).collect();
    let total: f64 = weights.iter().sum();
    if weights.is_empty() || !(total.is_finite() && total > 0.0) {
        return None;
    }

    let roll = rng.random_range(0.0..total);
    let mut running = 0.0;
    for (i, w) in weights.iter().enumerate() {
        running += w;
        if running >= roll {
            return Some(i);
        }
    }

    // Rounding left the running sum short of the roll
    Some(weights.len() - 1)
}
