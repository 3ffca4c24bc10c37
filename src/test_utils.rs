//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Seed helpers
//! - Mock data factories
//! - Helper assertions

use sqlx::SqlitePool;

use crate::models::settings::{AppSettings, Lift, LiftSettings, Unit};
use crate::templates::{PrescribedSet, SetType};

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  // Run migrations
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Seed every lift with a realistic 1RM (lbs). Writes directly so no
/// training-max history is created as a side effect.
pub async fn seed_test_lift_maxes(pool: &SqlitePool) {
  let maxes = [315.0, 225.0, 405.0, 135.0];
  for (lift, max) in Lift::ALL.into_iter().zip(maxes) {
    sqlx::query("UPDATE lifts SET one_rep_max = ?1 WHERE id = ?2")
      .bind(max)
      .bind(lift.as_str())
      .execute(pool)
      .await
      .expect("Failed to seed lift max");
  }
}

/// Seed a handful of PR records for one lift, oldest first.
/// Returns the estimated 1RMs in insert order.
pub async fn seed_test_pr_records(pool: &SqlitePool, lift: Lift) -> Vec<f64> {
  let mut estimates = Vec::new();
  for (weight, reps, week) in [(200.0, 5_i64, 1_u8), (210.0, 3, 2), (220.0, 1, 3)] {
    let estimated = crate::calculator::estimate_1rm(weight, reps);
    crate::history::append_pr_record(pool, lift, weight, reps, estimated, week)
      .await
      .expect("Failed to seed PR record");
    estimates.push(estimated);
  }
  estimates
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Create mock app settings for testing (matches the migration defaults)
pub fn mock_app_settings() -> AppSettings {
  AppSettings {
    unit: Unit::Lbs,
    tm_percentage: 90.0,
    rounding_increment: 5.0,
    bar_weight: 45.0,
    available_plates: vec![45.0, 35.0, 25.0, 10.0, 5.0, 2.5],
    body_weight: Some(200.0),
    show_warmups: true,
    current_week: 1,
  }
}

/// Create mock lift settings for testing
pub fn mock_lift_settings(lift: Lift, one_rep_max: f64) -> LiftSettings {
  LiftSettings {
    lift,
    one_rep_max: Some(one_rep_max),
    template_id: "classic".to_string(),
    supplemental_percentage: 50.0,
    supplemental_tm_lift: None,
  }
}

/// Create a mock prescribed work set for testing
pub fn mock_prescribed_set(weight: f64, reps: u8, is_amrap: bool) -> PrescribedSet {
  PrescribedSet {
    set_type: SetType::Work,
    set_number: 1,
    weight,
    reps,
    percentage: 85.0,
    is_amrap,
  }
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    // Verify key tables exist
    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('settings', 'lifts', 'pr_records', 'tm_history', 'workout_records')"
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 5, "Expected 5 tables, got {}", tables.len());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_lift_maxes_covers_all_lifts() {
    let pool = setup_test_db().await;

    seed_test_lift_maxes(&pool).await;

    let count: i64 =
      sqlx::query_scalar("SELECT COUNT(*) FROM lifts WHERE one_rep_max IS NOT NULL")
        .fetch_one(&pool)
        .await
        .expect("Failed to count lifts");
    assert_eq!(count, 4);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_pr_records_inserts_in_order() {
    let pool = setup_test_db().await;

    let estimates = seed_test_pr_records(&pool, Lift::Squat).await;
    assert_eq!(estimates.len(), 3);

    let history = crate::history::load_pr_history(&pool, Lift::Squat)
      .await
      .expect("Failed to load history");
    let loaded: Vec<f64> = history.iter().map(|r| r.estimated_1rm).collect();
    assert_eq!(loaded, estimates);

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_factories_create_valid_data() {
    let settings = mock_app_settings();
    assert_eq!(settings.tm_percentage, 90.0);
    assert!(!settings.available_plates.is_empty());

    let lift = mock_lift_settings(Lift::Bench, 225.0);
    assert_eq!(lift.one_rep_max, Some(225.0));
    assert_eq!(lift.template_id, "classic");

    let set = mock_prescribed_set(240.0, 5, true);
    assert_eq!(set.set_type, SetType::Work);
    assert!(set.is_amrap);
  }
}
