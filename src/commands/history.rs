//! History and analytics commands: PR/TM history reads, record chasing,
//! DOTS scoring, cycle advancement, and the full data reset.

use std::sync::Arc;
use tauri::State;

use crate::calculator::{calculate_dots, reps_to_beat, Gender};
use crate::db::AppState;
use crate::history;
use crate::models::{Lift, LiftSettings, PrRecord, TmRecord, WorkoutRecord};
use crate::settings;

#[tauri::command]
pub async fn get_pr_history(
  state: State<'_, Arc<AppState>>,
  lift: String,
) -> Result<Vec<PrRecord>, String> {
  let lift: Lift = lift.parse()?;
  history::load_pr_history(&state.db, lift).await
}

#[tauri::command]
pub async fn get_tm_history(
  state: State<'_, Arc<AppState>>,
  lift: String,
) -> Result<Vec<TmRecord>, String> {
  let lift: Lift = lift.parse()?;
  history::load_tm_history(&state.db, lift).await
}

#[tauri::command]
pub async fn get_workout_records(
  state: State<'_, Arc<AppState>>,
  lift: String,
  limit: Option<i64>,
) -> Result<Vec<WorkoutRecord>, String> {
  let lift: Lift = lift.parse()?;
  history::load_workout_records(&state.db, lift, limit.unwrap_or(50)).await
}

/// Reps at the given weight needed to beat the lift's best estimated 1RM.
/// None when the lift has no AMRAP history yet — nothing to chase.
#[tauri::command]
pub async fn get_reps_to_beat(
  state: State<'_, Arc<AppState>>,
  lift: String,
  weight: f64,
) -> Result<Option<i64>, String> {
  let lift: Lift = lift.parse()?;
  if weight <= 0.0 {
    return Ok(None);
  }

  let best = history::best_estimated_max(&state.db, lift).await?;
  Ok(best.map(|target| reps_to_beat(weight, target)))
}

#[tauri::command]
pub async fn get_dots_score(
  state: State<'_, Arc<AppState>>,
  total_lifted: f64,
  gender: Option<String>,
) -> Result<f64, String> {
  let app = settings::load_settings(&state.db).await?;
  let body_weight = app
    .body_weight
    .ok_or_else(|| "Body weight not configured".to_string())?;
  let gender: Gender = gender.as_deref().unwrap_or("male").parse()?;

  Ok(calculate_dots(body_weight, total_lifted, app.unit, gender))
}

#[tauri::command]
pub async fn advance_cycle(state: State<'_, Arc<AppState>>) -> Result<Vec<LiftSettings>, String> {
  history::advance_cycle(&state.db).await
}

#[tauri::command]
pub async fn reset_all_data(state: State<'_, Arc<AppState>>) -> Result<(), String> {
  history::reset_all_data(&state.db).await
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{seed_test_lift_maxes, setup_test_db, teardown_test_db};
  use serial_test::serial;
  use tauri::Manager;

  #[tokio::test]
  #[serial]
  async fn test_get_reps_to_beat_without_history() {
    let pool = setup_test_db().await;
    let state = Arc::new(AppState { db: pool.clone() });
    let app = tauri::test::mock_app();
    app.manage(state);

    let result = get_reps_to_beat(app.state(), "squat".to_string(), 275.0)
      .await
      .unwrap();
    assert!(result.is_none());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  #[serial]
  async fn test_get_reps_to_beat_chases_best_estimate() {
    let pool = setup_test_db().await;
    let state = Arc::new(AppState { db: pool.clone() });
    let app = tauri::test::mock_app();
    app.manage(state.clone());

    // 200x5 -> best estimate 233
    history::record_amrap(&pool, Lift::Squat, 200.0, 5, 1).await.unwrap();

    let reps = get_reps_to_beat(app.state(), "squat".to_string(), 210.0)
      .await
      .unwrap()
      .expect("Should have a target");
    assert_eq!(reps, 4);
    assert!(crate::calculator::estimate_1rm(210.0, reps) > 233.0);

    // At or above the record weight a single counts
    let reps = get_reps_to_beat(app.state(), "squat".to_string(), 235.0)
      .await
      .unwrap()
      .unwrap();
    assert_eq!(reps, 1);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  #[serial]
  async fn test_get_dots_score_requires_body_weight() {
    let pool = setup_test_db().await;
    let state = Arc::new(AppState { db: pool.clone() });
    let app = tauri::test::mock_app();
    app.manage(state);

    let result = get_dots_score(app.state(), 1200.0, None).await;
    assert!(result.is_err());

    crate::settings::update_settings(
      &pool,
      None,
      None,
      None,
      None,
      None,
      Some(200.0),
      None,
      None,
    )
    .await
    .unwrap();

    let result = get_dots_score(app.state(), 1200.0, None).await;
    assert!(result.is_ok());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  #[serial]
  async fn test_advance_cycle_command() {
    let pool = setup_test_db().await;
    seed_test_lift_maxes(&pool).await;
    let state = Arc::new(AppState { db: pool.clone() });
    let app = tauri::test::mock_app();
    app.manage(state);

    let lifts = advance_cycle(app.state()).await.expect("Should advance");
    let deadlift = lifts.iter().find(|l| l.lift == Lift::Deadlift).unwrap();
    assert_eq!(deadlift.one_rep_max, Some(415.0)); // 405 + 10

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  #[serial]
  async fn test_reset_all_data_command() {
    let pool = setup_test_db().await;
    seed_test_lift_maxes(&pool).await;
    history::record_amrap(&pool, Lift::Bench, 185.0, 8, 1).await.unwrap();
    let state = Arc::new(AppState { db: pool.clone() });
    let app = tauri::test::mock_app();
    app.manage(state);

    reset_all_data(app.state()).await.expect("Should reset");

    let history = get_pr_history(app.state(), "bench".to_string()).await.unwrap();
    assert!(history.is_empty());

    teardown_test_db(pool).await;
  }
}
