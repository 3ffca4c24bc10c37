//! Pure calculation layer for the 5/3/1 engine
//!
//! Everything here is synchronous and side-effect-free: weight rounding,
//! plate math, training max derivation, Epley-based max estimation, and the
//! DOTS relative-strength score. The set generators in `templates` route all
//! weight computation through [`calculate_weight`] so rounding behaves the
//! same everywhere a weight is displayed.

use serde::{Deserialize, Serialize};

use crate::models::settings::Unit;

pub const LB_TO_KG: f64 = 0.45359237;

// ---------------------------------------------------------------------------
/// Rounding & Unit Utilities
// ---------------------------------------------------------------------------

/// Round a weight to the nearest multiple of `increment`, half up.
///
/// `increment` must be > 0; the caller guarantees it (settings validation).
pub fn round_weight(weight: f64, increment: f64) -> f64 {
    (weight / increment).round() * increment
}

/// Plates loaded on one side of the bar for a single denomination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateCount {
    pub weight: f64,
    pub count: u32,
}

/// Result of breaking a target bar load into per-side plates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateBreakdown {
    /// Descending by plate weight; denominations with a zero count are omitted.
    pub plates: Vec<PlateCount>,
    /// Per-side weight the available plates could not cover, rounded to two
    /// decimals to absorb floating-point artifacts.
    pub remainder: f64,
}

impl PlateBreakdown {
    pub fn empty() -> Self {
        Self {
            plates: Vec::new(),
            remainder: 0.0,
        }
    }
}

/// Greedy largest-first plate allocation for one side of the bar.
///
/// A target at or under the bar weight is a valid request (bar-only set) and
/// yields an empty breakdown, not an error. Greedy allocation is not minimal
/// for arbitrary denominations but is exact for standard plate sets.
pub fn calculate_plates(total_weight: f64, bar_weight: f64, available_plates: &[f64]) -> PlateBreakdown {
    let per_side = (total_weight - bar_weight) / 2.0;
    if per_side <= 0.0 {
        return PlateBreakdown::empty();
    }

    let mut denominations: Vec<f64> = available_plates.to_vec();
    denominations.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

    let mut remaining = per_side;
    let mut plates = Vec::new();
    for plate in denominations {
        if plate <= 0.0 {
            continue;
        }
        let count = (remaining / plate).floor() as u32;
        if count > 0 {
            plates.push(PlateCount { weight: plate, count });
            remaining -= count as f64 * plate;
        }
    }

    PlateBreakdown {
        plates,
        remainder: (remaining * 100.0).round() / 100.0,
    }
}

// ---------------------------------------------------------------------------
/// Training Max
// ---------------------------------------------------------------------------

/// Derive the training max from a 1RM. No rounding here: rounding happens
/// once, at set-weight time, in [`calculate_weight`].
pub fn calculate_tm(one_rep_max: f64, tm_percentage: f64) -> f64 {
    one_rep_max * (tm_percentage / 100.0)
}

/// The single canonical path from a training max and a percentage to a
/// displayable weight. Every generated set goes through this.
pub fn calculate_weight(training_max: f64, percentage: f64, rounding_increment: f64) -> f64 {
    round_weight(training_max * percentage / 100.0, rounding_increment)
}

// ---------------------------------------------------------------------------
/// Performance Estimation (Epley)
// ---------------------------------------------------------------------------

/// Estimate a 1RM from an observed (weight, reps) pair.
///
/// Sentinel semantics for interactive input: zero or negative reps means "no
/// valid estimate" and returns 0; a true single is returned unchanged rather
/// than extrapolated.
pub fn estimate_1rm(weight: f64, reps: i64) -> f64 {
    if reps <= 0 {
        return 0.0;
    }
    if reps == 1 {
        return weight;
    }
    (weight * (1.0 + reps as f64 / 30.0)).round()
}

/// Inverse Epley: how many reps at `weight` a lifter with `one_rep_max`
/// should manage. Floored, so the estimate never overstates capacity.
pub fn estimate_reps(weight: f64, one_rep_max: f64) -> i64 {
    if weight <= 0.0 || one_rep_max <= 0.0 {
        return 0;
    }
    if weight >= one_rep_max {
        return 1;
    }
    (30.0 * (one_rep_max / weight - 1.0)).floor() as i64
}

/// Minimum reps at `weight` whose Epley estimate strictly exceeds
/// `target_1rm`.
///
/// The epsilon nudge before the ceiling keeps floating-point error from
/// producing a rep count that only ties the target. At or above the target
/// weight this returns 1, same as `estimate_reps` — a single there counts as
/// beating the record.
pub fn reps_to_beat(weight: f64, target_1rm: f64) -> i64 {
    if weight >= target_1rm {
        return 1;
    }
    (30.0 * (target_1rm / weight - 1.0) + 0.001).ceil() as i64
}

// ---------------------------------------------------------------------------
/// DOTS Relative-Strength Score
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl std::str::FromStr for Gender {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err(format!("Unknown gender: {}", s)),
        }
    }
}

/// Male DOTS denominator coefficients, highest power first. The polynomial is
/// defined over bodyweight in kilograms.
const DOTS_COEFFS_MALE: [f64; 5] = [
    -0.000001093,
    0.0007391293,
    -0.1918759221,
    24.9653911277,
    -1511.14028827,
];

/// Bodyweight-normalized strength score.
///
/// Female coefficients are not implemented; every gender currently scores
/// against the male polynomial. Bodyweight must be validated positive by the
/// caller — degenerate input yields a meaningless but finite number.
pub fn calculate_dots(body_weight: f64, total_lifted: f64, unit: Unit, _gender: Gender) -> f64 {
    let (bw, total) = match unit {
        Unit::Lbs => (body_weight * LB_TO_KG, total_lifted * LB_TO_KG),
        Unit::Kg => (body_weight, total_lifted),
    };

    let [c0, c1, c2, c3, c4] = DOTS_COEFFS_MALE;
    let denom = c0 * bw.powi(4) + c1 * bw.powi(3) + c2 * bw.powi(2) + c3 * bw + c4;

    (500.0 / denom) * total
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
