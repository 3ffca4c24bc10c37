use serde::{Deserialize, Serialize};

/// Weight unit for all stored and displayed weights. Global, set once in
/// settings; every 1RM, plate, and bar weight is tagged by it implicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
  #[default]
  Lbs,
  Kg,
}

impl std::fmt::Display for Unit {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Lbs => write!(f, "lbs"),
      Self::Kg => write!(f, "kg"),
    }
  }
}

impl std::str::FromStr for Unit {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "lbs" => Ok(Self::Lbs),
      "kg" => Ok(Self::Kg),
      _ => Err(format!("Unknown unit: {}", s)),
    }
  }
}

/// The four main lifts of a 5/3/1 cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lift {
  Squat,
  Bench,
  Deadlift,
  Press,
}

impl Lift {
  pub const ALL: [Lift; 4] = [Lift::Squat, Lift::Bench, Lift::Deadlift, Lift::Press];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Squat => "squat",
      Self::Bench => "bench",
      Self::Deadlift => "deadlift",
      Self::Press => "press",
    }
  }

  pub fn is_lower_body(&self) -> bool {
    matches!(self, Self::Squat | Self::Deadlift)
  }

  /// Standard 5/3/1 end-of-cycle 1RM bump: upper body lifts move in smaller
  /// steps than lower body lifts.
  pub fn cycle_increment(&self, unit: Unit) -> f64 {
    match (self.is_lower_body(), unit) {
      (true, Unit::Lbs) => 10.0,
      (false, Unit::Lbs) => 5.0,
      (true, Unit::Kg) => 5.0,
      (false, Unit::Kg) => 2.5,
    }
  }
}

impl std::fmt::Display for Lift {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl std::str::FromStr for Lift {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "squat" => Ok(Self::Squat),
      "bench" => Ok(Self::Bench),
      "deadlift" => Ok(Self::Deadlift),
      "press" => Ok(Self::Press),
      _ => Err(format!("Unknown lift: {}", s)),
    }
  }
}

/// Global application settings, stored as a single row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
  pub unit: Unit,
  /// Training max as a percentage of 1RM, typically 85-90, sane range 80-95.
  pub tm_percentage: f64,
  /// Smallest weight step the gym's plates allow (5 lbs or 2.5 kg usually).
  pub rounding_increment: f64,
  pub bar_weight: f64,
  pub available_plates: Vec<f64>,
  /// Needed only for the DOTS score; None until the user enters it.
  pub body_weight: Option<f64>,
  pub show_warmups: bool,
  /// Current position in the 4-week cycle.
  pub current_week: u8,
}

impl Default for AppSettings {
  fn default() -> Self {
    Self {
      unit: Unit::Lbs,
      tm_percentage: 90.0,
      rounding_increment: 5.0,
      bar_weight: 45.0,
      available_plates: vec![45.0, 35.0, 25.0, 10.0, 5.0, 2.5],
      body_weight: None,
      show_warmups: true,
      current_week: 1,
    }
  }
}

/// Per-lift configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiftSettings {
  pub lift: Lift,
  /// None until entered at onboarding.
  pub one_rep_max: Option<f64>,
  pub template_id: String,
  /// Used only by templates with a fixed percentage source (BBB).
  pub supplemental_percentage: f64,
  /// When set, supplemental work for this lift is computed from another
  /// lift's training max (e.g. bench supplemental volume off the press TM).
  pub supplemental_tm_lift: Option<Lift>,
}
