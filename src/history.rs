//! Append-only history: AMRAP performance records, training-max changes, and
//! captured workout records. Nothing here is ever mutated or deleted outside
//! a full data reset; reads return rows in append order.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{Row, SqlitePool};

use crate::calculator::{calculate_tm, estimate_1rm};
use crate::models::history::{PrRecord, TmRecord, WorkoutRecord};
use crate::models::settings::Lift;
use crate::templates::PrescribedSet;

/// SQLite stores our timestamps as text: RFC3339 when bound from chrono,
/// "YYYY-MM-DD HH:MM:SS" when written by CURRENT_TIMESTAMP defaults.
fn parse_timestamp(s: &str) -> DateTime<Utc> {
  DateTime::parse_from_rfc3339(s)
    .or_else(|_| DateTime::parse_from_str(&format!("{}+00:00", s), "%Y-%m-%d %H:%M:%S%:z"))
    .map(|dt| dt.with_timezone(&Utc))
    .unwrap_or_else(|_| Utc::now())
}

/// ---------------------------------------------------------------------------
/// PR Records
/// ---------------------------------------------------------------------------

pub async fn append_pr_record(
  pool: &SqlitePool,
  lift: Lift,
  weight: f64,
  reps: i64,
  estimated_1rm: f64,
  week: u8,
) -> Result<i64, String> {
  let result = sqlx::query(
    r#"
    INSERT INTO pr_records (lift_id, recorded_at, weight, reps, estimated_1rm, week)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    "#,
  )
  .bind(lift.as_str())
  .bind(Utc::now())
  .bind(weight)
  .bind(reps)
  .bind(estimated_1rm)
  .bind(week as i64)
  .execute(pool)
  .await
  .map_err(|e| format!("Failed to append PR record: {}", e))?;

  Ok(result.last_insert_rowid())
}

pub async fn load_pr_history(pool: &SqlitePool, lift: Lift) -> Result<Vec<PrRecord>, String> {
  let rows = sqlx::query(
    r#"
    SELECT id, lift_id, recorded_at, weight, reps, estimated_1rm, week
    FROM pr_records
    WHERE lift_id = ?1
    ORDER BY id
    "#,
  )
  .bind(lift.as_str())
  .fetch_all(pool)
  .await
  .map_err(|e| format!("Failed to load PR history: {}", e))?;

  let mut records = Vec::with_capacity(rows.len());
  for row in rows {
    let lift_id: String = row.get("lift_id");
    let recorded_at: String = row.get("recorded_at");
    records.push(PrRecord {
      id: row.get("id"),
      lift: lift_id.parse()?,
      recorded_at: parse_timestamp(&recorded_at),
      weight: row.get("weight"),
      reps: row.get("reps"),
      estimated_1rm: row.get("estimated_1rm"),
      week: row.get::<i64, _>("week") as u8,
    });
  }

  Ok(records)
}

/// Best estimated 1RM on record for a lift, if any AMRAP was ever logged.
pub async fn best_estimated_max(pool: &SqlitePool, lift: Lift) -> Result<Option<f64>, String> {
  sqlx::query_scalar("SELECT MAX(estimated_1rm) FROM pr_records WHERE lift_id = ?1")
    .bind(lift.as_str())
    .fetch_one(pool)
    .await
    .map_err(|e| format!("Failed to load best estimate: {}", e))
}

/// Outcome of logging an AMRAP set, returned to the session view.
#[derive(Debug, Clone, Serialize)]
pub struct AmrapOutcome {
  pub record_id: i64,
  pub estimated_1rm: f64,
  pub previous_best: Option<f64>,
  pub is_new_best: bool,
}

/// Log an AMRAP result: estimate the 1RM, append the record, and report
/// whether it beats the previous best estimate.
pub async fn record_amrap(
  pool: &SqlitePool,
  lift: Lift,
  weight: f64,
  reps: i64,
  week: u8,
) -> Result<AmrapOutcome, String> {
  if reps < 1 {
    return Err(format!("AMRAP reps must be at least 1, got {}", reps));
  }

  let estimated = estimate_1rm(weight, reps);
  let previous_best = best_estimated_max(pool, lift).await?;
  let record_id = append_pr_record(pool, lift, weight, reps, estimated, week).await?;

  Ok(AmrapOutcome {
    record_id,
    estimated_1rm: estimated,
    previous_best,
    is_new_best: previous_best.is_none_or(|best| estimated > best),
  })
}

/// ---------------------------------------------------------------------------
/// Training Max History
/// ---------------------------------------------------------------------------

pub async fn append_tm_record(
  pool: &SqlitePool,
  lift: Lift,
  one_rep_max: f64,
  training_max: f64,
  is_cycle_increment: bool,
) -> Result<(), String> {
  sqlx::query(
    r#"
    INSERT INTO tm_history (lift_id, recorded_at, one_rep_max, training_max, is_cycle_increment)
    VALUES (?1, ?2, ?3, ?4, ?5)
    "#,
  )
  .bind(lift.as_str())
  .bind(Utc::now())
  .bind(one_rep_max)
  .bind(training_max)
  .bind(is_cycle_increment)
  .execute(pool)
  .await
  .map_err(|e| format!("Failed to append TM record: {}", e))?;

  Ok(())
}

pub async fn load_tm_history(pool: &SqlitePool, lift: Lift) -> Result<Vec<TmRecord>, String> {
  let rows = sqlx::query(
    r#"
    SELECT id, lift_id, recorded_at, one_rep_max, training_max, is_cycle_increment
    FROM tm_history
    WHERE lift_id = ?1
    ORDER BY id
    "#,
  )
  .bind(lift.as_str())
  .fetch_all(pool)
  .await
  .map_err(|e| format!("Failed to load TM history: {}", e))?;

  let mut records = Vec::with_capacity(rows.len());
  for row in rows {
    let lift_id: String = row.get("lift_id");
    let recorded_at: String = row.get("recorded_at");
    records.push(TmRecord {
      id: row.get("id"),
      lift: lift_id.parse()?,
      recorded_at: parse_timestamp(&recorded_at),
      one_rep_max: row.get("one_rep_max"),
      training_max: row.get("training_max"),
      is_cycle_increment: row.get::<i64, _>("is_cycle_increment") != 0,
    });
  }

  Ok(records)
}

/// ---------------------------------------------------------------------------
/// Workout Records
/// ---------------------------------------------------------------------------

pub async fn save_workout_record(
  pool: &SqlitePool,
  lift: Lift,
  week: u8,
  sets: &[PrescribedSet],
  amrap_reps: Option<i64>,
) -> Result<i64, String> {
  let sets_json =
    serde_json::to_string(sets).map_err(|e| format!("Failed to encode sets: {}", e))?;

  let result = sqlx::query(
    r#"
    INSERT INTO workout_records (lift_id, week, finished_at, sets_json, amrap_reps)
    VALUES (?1, ?2, ?3, ?4, ?5)
    "#,
  )
  .bind(lift.as_str())
  .bind(week as i64)
  .bind(Utc::now())
  .bind(sets_json)
  .bind(amrap_reps)
  .execute(pool)
  .await
  .map_err(|e| format!("Failed to save workout record: {}", e))?;

  Ok(result.last_insert_rowid())
}

pub async fn load_workout_records(
  pool: &SqlitePool,
  lift: Lift,
  limit: i64,
) -> Result<Vec<WorkoutRecord>, String> {
  let rows = sqlx::query(
    r#"
    SELECT id, lift_id, week, finished_at, sets_json, amrap_reps
    FROM workout_records
    WHERE lift_id = ?1
    ORDER BY id DESC
    LIMIT ?2
    "#,
  )
  .bind(lift.as_str())
  .bind(limit)
  .fetch_all(pool)
  .await
  .map_err(|e| format!("Failed to load workout records: {}", e))?;

  let mut records = Vec::with_capacity(rows.len());
  for row in rows {
    let lift_id: String = row.get("lift_id");
    let finished_at: String = row.get("finished_at");
    let sets_json: String = row.get("sets_json");
    let sets: Vec<PrescribedSet> = serde_json::from_str(&sets_json)
      .map_err(|e| format!("Corrupt workout record: {}", e))?;

    records.push(WorkoutRecord {
      id: row.get("id"),
      lift: lift_id.parse()?,
      week: row.get::<i64, _>("week") as u8,
      finished_at: parse_timestamp(&finished_at),
      sets,
      amrap_reps: row.get("amrap_reps"),
    });
  }

  Ok(records)
}

/// ---------------------------------------------------------------------------
/// Cycle Advancement & Reset
/// ---------------------------------------------------------------------------

/// End-of-cycle progression: bump every initialized lift's 1RM by the
/// standard 5/3/1 increment for the configured unit, historize each bump as a
/// cycle increment, and reset the cycle position to week 1.
pub async fn advance_cycle(pool: &SqlitePool) -> Result<Vec<crate::models::LiftSettings>, String> {
  let settings = crate::settings::load_settings(pool).await?;

  for lift_settings in crate::settings::load_all_lifts(pool).await? {
    let Some(current) = lift_settings.one_rep_max else {
      continue;
    };

    let lift = lift_settings.lift;
    let new_max = current + lift.cycle_increment(settings.unit);

    sqlx::query("UPDATE lifts SET one_rep_max = ?1, updated_at = CURRENT_TIMESTAMP WHERE id = ?2")
      .bind(new_max)
      .bind(lift.as_str())
      .execute(pool)
      .await
      .map_err(|e| format!("Failed to increment {}: {}", lift, e))?;

    let training_max = calculate_tm(new_max, settings.tm_percentage);
    append_tm_record(pool, lift, new_max, training_max, true).await?;
  }

  sqlx::query("UPDATE settings SET current_week = 1, updated_at = CURRENT_TIMESTAMP WHERE id = 1")
    .execute(pool)
    .await
    .map_err(|e| format!("Failed to reset cycle week: {}", e))?;

  crate::settings::load_all_lifts(pool).await
}

/// Full reset: the only operation that deletes history. Settings preferences
/// survive; lift maxes are cleared back to their onboarding state.
pub async fn reset_all_data(pool: &SqlitePool) -> Result<(), String> {
  for table in ["pr_records", "tm_history", "workout_records"] {
    sqlx::query(&format!("DELETE FROM {}", table))
      .execute(pool)
      .await
      .map_err(|e| format!("Failed to clear {}: {}", table, e))?;
  }

  sqlx::query("UPDATE lifts SET one_rep_max = NULL, updated_at = CURRENT_TIMESTAMP")
    .execute(pool)
    .await
    .map_err(|e| format!("Failed to clear lift maxes: {}", e))?;

  sqlx::query("UPDATE settings SET current_week = 1, updated_at = CURRENT_TIMESTAMP WHERE id = 1")
    .execute(pool)
    .await
    .map_err(|e| format!("Failed to reset cycle week: {}", e))?;

  Ok(())
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
