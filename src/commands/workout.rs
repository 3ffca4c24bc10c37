//! Session commands: set generation for the current lift and week, plate
//! math, and AMRAP / session-finish recording.

use std::sync::Arc;
use tauri::State;

use crate::calculator::{calculate_plates, calculate_tm, PlateBreakdown};
use crate::db::AppState;
use crate::history::{self, AmrapOutcome};
use crate::models::settings::{AppSettings, Lift, LiftSettings};
use crate::settings;
use crate::templates::{
  generate_five_by_531_sets, generate_joker_sets, generate_supplemental_sets,
  generate_working_sets, template_by_id, PrescribedSet, SupplementalPlan,
};

/// Resolve the training max for a lift from its stored 1RM, or explain why
/// there isn't one yet.
fn training_max_for(lift_settings: &LiftSettings, app: &AppSettings) -> Result<f64, String> {
  let one_rep_max = lift_settings
    .one_rep_max
    .ok_or_else(|| format!("No one-rep max configured for {}", lift_settings.lift))?;
  Ok(calculate_tm(one_rep_max, app.tm_percentage))
}

#[tauri::command]
pub async fn get_working_sets(
  state: State<'_, Arc<AppState>>,
  lift: String,
  week: Option<u8>,
) -> Result<Vec<PrescribedSet>, String> {
  let lift: Lift = lift.parse()?;
  let app = settings::load_settings(&state.db).await?;
  let lift_settings = settings::load_lift(&state.db, lift).await?;
  let week = week.unwrap_or(app.current_week);
  let training_max = training_max_for(&lift_settings, &app)?;

  let modifies_main_sets = template_by_id(&lift_settings.template_id)
    .is_some_and(|t| t.modifies_main_sets);

  let sets = if modifies_main_sets {
    generate_five_by_531_sets(training_max, week, app.rounding_increment)
  } else {
    generate_working_sets(training_max, week, app.rounding_increment, app.show_warmups)
  };

  sets.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_supplemental_plan(
  state: State<'_, Arc<AppState>>,
  lift: String,
  week: Option<u8>,
) -> Result<Option<SupplementalPlan>, String> {
  let lift: Lift = lift.parse()?;
  let app = settings::load_settings(&state.db).await?;
  let lift_settings = settings::load_lift(&state.db, lift).await?;
  let week = week.unwrap_or(app.current_week);

  // Supplemental TM override: weight may come from another lift's max
  let tm_source = match lift_settings.supplemental_tm_lift {
    Some(other) => settings::load_lift(&state.db, other).await?,
    None => lift_settings.clone(),
  };
  let Some(source_max) = tm_source.one_rep_max else {
    return Ok(None);
  };
  let training_max = calculate_tm(source_max, app.tm_percentage);

  generate_supplemental_sets(
    &lift_settings.template_id,
    training_max,
    week,
    lift_settings.supplemental_percentage,
    app.rounding_increment,
  )
  .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_joker_sets(
  state: State<'_, Arc<AppState>>,
  lift: String,
  week: Option<u8>,
  count: Option<u8>,
) -> Result<Vec<PrescribedSet>, String> {
  let lift: Lift = lift.parse()?;
  let app = settings::load_settings(&state.db).await?;
  let lift_settings = settings::load_lift(&state.db, lift).await?;
  let week = week.unwrap_or(app.current_week);
  let training_max = training_max_for(&lift_settings, &app)?;

  generate_joker_sets(training_max, week, app.rounding_increment, count.unwrap_or(2))
    .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_plate_breakdown(
  state: State<'_, Arc<AppState>>,
  weight: f64,
) -> Result<PlateBreakdown, String> {
  let app = settings::load_settings(&state.db).await?;
  Ok(calculate_plates(weight, app.bar_weight, &app.available_plates))
}

#[tauri::command]
pub async fn record_amrap_result(
  state: State<'_, Arc<AppState>>,
  lift: String,
  weight: f64,
  reps: i64,
  week: u8,
) -> Result<AmrapOutcome, String> {
  let lift: Lift = lift.parse()?;
  history::record_amrap(&state.db, lift, weight, reps, week).await
}

#[tauri::command]
pub async fn finish_workout(
  state: State<'_, Arc<AppState>>,
  lift: String,
  week: u8,
  sets: Vec<PrescribedSet>,
  amrap_reps: Option<i64>,
) -> Result<i64, String> {
  let lift: Lift = lift.parse()?;
  history::save_workout_record(&state.db, lift, week, &sets, amrap_reps).await
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{seed_test_lift_maxes, setup_test_db, teardown_test_db};
  use serial_test::serial;
  use tauri::Manager;

  #[tokio::test]
  #[serial]
  async fn test_get_working_sets_command() {
    let pool = setup_test_db().await;
    seed_test_lift_maxes(&pool).await;
    let state = Arc::new(AppState { db: pool.clone() });
    let app = tauri::test::mock_app();
    app.manage(state);

    // Squat seeded at 315 -> TM 283.5; week 1 top set 85% -> 240
    let sets = get_working_sets(app.state(), "squat".to_string(), Some(1))
      .await
      .expect("Should generate sets");
    assert_eq!(sets.len(), 6); // warm-ups on by default
    assert_eq!(sets[5].weight, 240.0);
    assert!(sets[5].is_amrap);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  #[serial]
  async fn test_get_working_sets_requires_one_rep_max() {
    let pool = setup_test_db().await;
    let state = Arc::new(AppState { db: pool.clone() });
    let app = tauri::test::mock_app();
    app.manage(state);

    let result = get_working_sets(app.state(), "squat".to_string(), Some(1)).await;
    assert!(result.is_err());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  #[serial]
  async fn test_get_working_sets_five_by_531_template() {
    let pool = setup_test_db().await;
    seed_test_lift_maxes(&pool).await;
    crate::settings::update_lift_template(&pool, Lift::Bench, "5x531", None, None)
      .await
      .unwrap();
    let state = Arc::new(AppState { db: pool.clone() });
    let app = tauri::test::mock_app();
    app.manage(state);

    let sets = get_working_sets(app.state(), "bench".to_string(), Some(2))
      .await
      .unwrap();
    assert_eq!(sets.len(), 5);
    // Bench 225 -> TM 202.5; 90% -> 182.25 -> rounds to 180
    assert!(sets.iter().all(|s| s.weight == 180.0));

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  #[serial]
  async fn test_get_supplemental_plan_with_tm_override() {
    let pool = setup_test_db().await;
    seed_test_lift_maxes(&pool).await;
    // Bench supplemental volume computed off the press TM
    crate::settings::update_lift_template(&pool, Lift::Bench, "bbb", Some(50.0), Some(Lift::Press))
      .await
      .unwrap();
    let state = Arc::new(AppState { db: pool.clone() });
    let app = tauri::test::mock_app();
    app.manage(state);

    let plan = get_supplemental_plan(app.state(), "bench".to_string(), Some(1))
      .await
      .unwrap()
      .expect("BBB plan");
    // Press seeded at 135 -> TM 121.5; 50% -> 60.75 -> rounds to 60
    assert_eq!(plan.weight, 60.0);
    assert_eq!(plan.template_name, "BBB");

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  #[serial]
  async fn test_get_supplemental_plan_classic_is_none() {
    let pool = setup_test_db().await;
    seed_test_lift_maxes(&pool).await;
    let state = Arc::new(AppState { db: pool.clone() });
    let app = tauri::test::mock_app();
    app.manage(state);

    let plan = get_supplemental_plan(app.state(), "squat".to_string(), Some(1))
      .await
      .unwrap();
    assert!(plan.is_none());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  #[serial]
  async fn test_get_plate_breakdown_command() {
    let pool = setup_test_db().await;
    let state = Arc::new(AppState { db: pool.clone() });
    let app = tauri::test::mock_app();
    app.manage(state);

    let breakdown = get_plate_breakdown(app.state(), 225.0).await.unwrap();
    assert_eq!(breakdown.plates.len(), 1);
    assert_eq!(breakdown.plates[0].weight, 45.0);
    assert_eq!(breakdown.plates[0].count, 2);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  #[serial]
  async fn test_record_and_finish_workout_commands() {
    let pool = setup_test_db().await;
    seed_test_lift_maxes(&pool).await;
    let state = Arc::new(AppState { db: pool.clone() });
    let app = tauri::test::mock_app();
    app.manage(state);

    let outcome = record_amrap_result(app.state(), "deadlift".to_string(), 365.0, 5, 1)
      .await
      .expect("Should record AMRAP");
    assert!(outcome.is_new_best);

    let sets = get_working_sets(app.state(), "deadlift".to_string(), Some(1))
      .await
      .unwrap();
    let id = finish_workout(app.state(), "deadlift".to_string(), 1, sets, Some(5))
      .await
      .expect("Should finish workout");
    assert!(id > 0);

    teardown_test_db(pool).await;
  }
}
