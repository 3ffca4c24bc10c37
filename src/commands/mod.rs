pub mod history;
pub mod workout;

use crate::db::AppState;
use crate::models::{AppSettings, Lift, LiftSettings};
use crate::settings;
use crate::templates::{Template, TEMPLATES};
use std::sync::Arc;
use tauri::State;

/// ---------------------------------------------------------------------------
/// Settings Commands
/// ---------------------------------------------------------------------------

#[tauri::command]
pub async fn get_settings(state: State<'_, Arc<AppState>>) -> Result<AppSettings, String> {
  settings::load_settings(&state.db).await
}

#[tauri::command]
#[allow(clippy::too_many_arguments)]
pub async fn update_settings(
  state: State<'_, Arc<AppState>>,
  unit: Option<String>,
  tm_percentage: Option<f64>,
  rounding_increment: Option<f64>,
  bar_weight: Option<f64>,
  available_plates: Option<Vec<f64>>,
  body_weight: Option<f64>,
  show_warmups: Option<bool>,
  current_week: Option<u8>,
) -> Result<AppSettings, String> {
  settings::update_settings(
    &state.db,
    unit,
    tm_percentage,
    rounding_increment,
    bar_weight,
    available_plates,
    body_weight,
    show_warmups,
    current_week,
  )
  .await?;
  settings::load_settings(&state.db).await
}

#[tauri::command]
pub async fn get_lifts(state: State<'_, Arc<AppState>>) -> Result<Vec<LiftSettings>, String> {
  settings::load_all_lifts(&state.db).await
}

#[tauri::command]
pub async fn update_one_rep_max(
  state: State<'_, Arc<AppState>>,
  lift: String,
  one_rep_max: f64,
) -> Result<LiftSettings, String> {
  let lift: Lift = lift.parse()?;
  settings::update_one_rep_max(&state.db, lift, one_rep_max).await?;
  settings::load_lift(&state.db, lift).await
}

#[tauri::command]
pub async fn update_lift_template(
  state: State<'_, Arc<AppState>>,
  lift: String,
  template_id: String,
  supplemental_percentage: Option<f64>,
  supplemental_tm_lift: Option<String>,
) -> Result<LiftSettings, String> {
  let lift: Lift = lift.parse()?;
  let tm_lift = supplemental_tm_lift.map(|s| s.parse()).transpose()?;
  settings::update_lift_template(&state.db, lift, &template_id, supplemental_percentage, tm_lift)
    .await?;
  settings::load_lift(&state.db, lift).await
}

/// The static template catalog, for the settings screen.
#[tauri::command]
pub fn get_templates() -> Vec<Template> {
  TEMPLATES.to_vec()
}
