mod calculator;
mod commands;
mod db;
mod history;
mod models;
mod settings;
mod templates;

#[cfg(test)]
mod test_utils;

use db::AppState;
use std::sync::Arc;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
  tauri::Builder::default()
    .setup(|app| {
      // Initialize database
      let app_handle = app.handle().clone();
      tauri::async_runtime::block_on(async move {
        match db::initialize_db(&app_handle).await {
          Ok(pool) => {
            let state = Arc::new(AppState { db: pool });
            app_handle.manage(state);
            println!("Database ready");
          }
          Err(e) => {
            eprintln!("Failed to initialize database: {}", e);
          }
        }
      });
      Ok(())
    })
    .invoke_handler(tauri::generate_handler![
      // Settings commands
      commands::get_settings,
      commands::update_settings,
      commands::get_lifts,
      commands::update_one_rep_max,
      commands::update_lift_template,
      commands::get_templates,
      // Workout commands
      commands::workout::get_working_sets,
      commands::workout::get_supplemental_plan,
      commands::workout::get_joker_sets,
      commands::workout::get_plate_breakdown,
      commands::workout::record_amrap_result,
      commands::workout::finish_workout,
      // History commands
      commands::history::get_pr_history,
      commands::history::get_tm_history,
      commands::history::get_workout_records,
      commands::history::get_reps_to_beat,
      commands::history::get_dots_score,
      commands::history::advance_cycle,
      commands::history::reset_all_data,
    ])
    .run(tauri::generate_context!())
    .expect("error while running tauri application");
}
