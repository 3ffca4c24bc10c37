//! Settings storage: the global settings row and the per-lift configuration,
//! including the training-max historization rule applied on 1RM edits.

use sqlx::SqlitePool;

use crate::calculator::calculate_tm;
use crate::models::settings::{AppSettings, Lift, LiftSettings};
use crate::templates::template_by_id;

/// ---------------------------------------------------------------------------
/// Global Settings
/// ---------------------------------------------------------------------------

pub async fn load_settings(pool: &SqlitePool) -> Result<AppSettings, String> {
  let row: Option<(String, f64, f64, f64, String, Option<f64>, i64, i64)> = sqlx::query_as(
    r#"
    SELECT unit, tm_percentage, rounding_increment, bar_weight,
           available_plates_json, body_weight, show_warmups, current_week
    FROM settings WHERE id = 1
    "#,
  )
  .fetch_optional(pool)
  .await
  .map_err(|e| format!("Failed to load settings: {}", e))?;

  let Some((unit, tm_percentage, rounding_increment, bar_weight, plates_json, body_weight, show_warmups, current_week)) = row
  else {
    return Ok(AppSettings::default());
  };

  let unit = unit.parse()?;
  let available_plates: Vec<f64> = serde_json::from_str(&plates_json)
    .map_err(|e| format!("Corrupt plate inventory: {}", e))?;

  Ok(AppSettings {
    unit,
    tm_percentage,
    rounding_increment,
    bar_weight,
    available_plates,
    body_weight,
    show_warmups: show_warmups != 0,
    current_week: current_week as u8,
  })
}

/// Partial update: only the provided fields change.
#[allow(clippy::too_many_arguments)]
pub async fn update_settings(
  pool: &SqlitePool,
  unit: Option<String>,
  tm_percentage: Option<f64>,
  rounding_increment: Option<f64>,
  bar_weight: Option<f64>,
  available_plates: Option<Vec<f64>>,
  body_weight: Option<f64>,
  show_warmups: Option<bool>,
  current_week: Option<u8>,
) -> Result<(), String> {
  if let Some(ref u) = unit {
    u.parse::<crate::models::settings::Unit>()?;
  }
  if let Some(pct) = tm_percentage {
    if !(80.0..=95.0).contains(&pct) {
      return Err(format!("Training max percentage {} outside 80-95", pct));
    }
  }
  if let Some(inc) = rounding_increment {
    if inc <= 0.0 {
      return Err("Rounding increment must be positive".to_string());
    }
  }
  if let Some(week) = current_week {
    if !(1..=4).contains(&week) {
      return Err(format!("Invalid cycle week {}, expected 1-4", week));
    }
  }

  let plates_json = match available_plates {
    Some(plates) => Some(
      serde_json::to_string(&plates).map_err(|e| format!("Failed to encode plates: {}", e))?,
    ),
    None => None,
  };

  sqlx::query(
    r#"
    UPDATE settings SET
      unit = COALESCE(?1, unit),
      tm_percentage = COALESCE(?2, tm_percentage),
      rounding_increment = COALESCE(?3, rounding_increment),
      bar_weight = COALESCE(?4, bar_weight),
      available_plates_json = COALESCE(?5, available_plates_json),
      body_weight = COALESCE(?6, body_weight),
      show_warmups = COALESCE(?7, show_warmups),
      current_week = COALESCE(?8, current_week),
      updated_at = CURRENT_TIMESTAMP
    WHERE id = 1
    "#,
  )
  .bind(unit)
  .bind(tm_percentage)
  .bind(rounding_increment)
  .bind(bar_weight)
  .bind(plates_json)
  .bind(body_weight)
  .bind(show_warmups.map(i64::from))
  .bind(current_week.map(|w| w as i64))
  .execute(pool)
  .await
  .map_err(|e| format!("Failed to update settings: {}", e))?;

  Ok(())
}

/// ---------------------------------------------------------------------------
/// Per-Lift Settings
/// ---------------------------------------------------------------------------

fn lift_from_row(
  (id, one_rep_max, template_id, supplemental_percentage, supplemental_tm_lift): (
    String,
    Option<f64>,
    String,
    f64,
    Option<String>,
  ),
) -> Result<LiftSettings, String> {
  Ok(LiftSettings {
    lift: id.parse()?,
    one_rep_max,
    template_id,
    supplemental_percentage,
    supplemental_tm_lift: supplemental_tm_lift.map(|s| s.parse()).transpose()?,
  })
}

pub async fn load_lift(pool: &SqlitePool, lift: Lift) -> Result<LiftSettings, String> {
  let row: (String, Option<f64>, String, f64, Option<String>) = sqlx::query_as(
    r#"
    SELECT id, one_rep_max, template_id, supplemental_percentage, supplemental_tm_lift
    FROM lifts WHERE id = ?1
    "#,
  )
  .bind(lift.as_str())
  .fetch_one(pool)
  .await
  .map_err(|e| format!("Failed to load lift {}: {}", lift, e))?;

  lift_from_row(row)
}

pub async fn load_all_lifts(pool: &SqlitePool) -> Result<Vec<LiftSettings>, String> {
  let rows: Vec<(String, Option<f64>, String, f64, Option<String>)> = sqlx::query_as(
    r#"
    SELECT id, one_rep_max, template_id, supplemental_percentage, supplemental_tm_lift
    FROM lifts ORDER BY rowid
    "#,
  )
  .fetch_all(pool)
  .await
  .map_err(|e| format!("Failed to load lifts: {}", e))?;

  rows.into_iter().map(lift_from_row).collect()
}

/// Set a lift's 1RM.
///
/// Historization rule: a training-max record is appended only when the value
/// actually changed and the lift already had a 1RM. The very first entry at
/// onboarding does not historize.
pub async fn update_one_rep_max(pool: &SqlitePool, lift: Lift, one_rep_max: f64) -> Result<(), String> {
  if one_rep_max <= 0.0 {
    return Err(format!("One-rep max must be positive, got {}", one_rep_max));
  }

  let previous: Option<f64> = sqlx::query_scalar("SELECT one_rep_max FROM lifts WHERE id = ?1")
    .bind(lift.as_str())
    .fetch_one(pool)
    .await
    .map_err(|e| format!("Failed to load lift {}: {}", lift, e))?;

  if previous == Some(one_rep_max) {
    return Ok(());
  }

  sqlx::query("UPDATE lifts SET one_rep_max = ?1, updated_at = CURRENT_TIMESTAMP WHERE id = ?2")
    .bind(one_rep_max)
    .bind(lift.as_str())
    .execute(pool)
    .await
    .map_err(|e| format!("Failed to update lift {}: {}", lift, e))?;

  if previous.is_some() {
    let settings = load_settings(pool).await?;
    let training_max = calculate_tm(one_rep_max, settings.tm_percentage);
    crate::history::append_tm_record(pool, lift, one_rep_max, training_max, false).await?;
  }

  Ok(())
}

pub async fn update_lift_template(
  pool: &SqlitePool,
  lift: Lift,
  template_id: &str,
  supplemental_percentage: Option<f64>,
  supplemental_tm_lift: Option<Lift>,
) -> Result<(), String> {
  if template_by_id(template_id).is_none() {
    return Err(format!("Unknown template: {}", template_id));
  }

  sqlx::query(
    r#"
    UPDATE lifts SET
      template_id = ?1,
      supplemental_percentage = COALESCE(?2, supplemental_percentage),
      supplemental_tm_lift = ?3,
      updated_at = CURRENT_TIMESTAMP
    WHERE id = ?4
    "#,
  )
  .bind(template_id)
  .bind(supplemental_percentage)
  .bind(supplemental_tm_lift.map(|l| l.as_str()))
  .bind(lift.as_str())
  .execute(pool)
  .await
  .map_err(|e| format!("Failed to update template for {}: {}", lift, e))?;

  Ok(())
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
