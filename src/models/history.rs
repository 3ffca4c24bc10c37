use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::settings::Lift;
use crate::templates::PrescribedSet;

/// One AMRAP performance, appended when the user submits their rep count.
/// Records are never mutated or deleted outside a full data reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrRecord {
  pub id: i64,
  pub lift: Lift,
  pub recorded_at: DateTime<Utc>,
  pub weight: f64,
  pub reps: i64,
  pub estimated_1rm: f64,
  pub week: u8,
}

/// One training max change, appended whenever a lift's 1RM moves after it was
/// first initialized (manual edit or end-of-cycle increment).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmRecord {
  pub id: i64,
  pub lift: Lift,
  pub recorded_at: DateTime<Utc>,
  pub one_rep_max: f64,
  pub training_max: f64,
  pub is_cycle_increment: bool,
}

/// A finished session: the prescribed set list captured as-is at finish time,
/// plus the AMRAP result if one was logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutRecord {
  pub id: i64,
  pub lift: Lift,
  pub week: u8,
  pub finished_at: DateTime<Utc>,
  pub sets: Vec<PrescribedSet>,
  pub amrap_reps: Option<i64>,
}
