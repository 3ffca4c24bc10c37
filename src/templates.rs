//! 5/3/1 week schemes, the training template registry, and set generation
//!
//! The week table and template catalog are fixed data; the generators combine
//! them with a training max and the global rounding increment to produce the
//! ordered set list a session displays. All weights go through
//! `calculator::calculate_weight`.

use serde::{Deserialize, Serialize};

use crate::calculator::calculate_weight;

// ---------------------------------------------------------------------------
/// Errors
// ---------------------------------------------------------------------------

/// A week outside 1-4 is a caller bug, not a recoverable state: fail loudly
/// instead of prescribing weights off a nonexistent scheme.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("Invalid cycle week {0}, expected 1-4")]
    InvalidWeek(u8),
}

// ---------------------------------------------------------------------------
/// Week Scheme Table
// ---------------------------------------------------------------------------

/// One prescribed work set of a cycle week: percentage of training max,
/// target reps, and whether the set is open-ended (AMRAP).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchemeEntry {
    pub percentage: f64,
    pub reps: u8,
    pub is_amrap: bool,
}

const fn entry(percentage: f64, reps: u8, is_amrap: bool) -> SchemeEntry {
    SchemeEntry {
        percentage,
        reps,
        is_amrap,
    }
}

/// The classic 5/3/1 percentages. Weeks 1-3 end in an AMRAP top set; week 4
/// is the deload, all sets fixed and light.
const WEEK_SCHEMES: [[SchemeEntry; 3]; 4] = [
    [entry(65.0, 5, false), entry(75.0, 5, false), entry(85.0, 5, true)],
    [entry(70.0, 3, false), entry(80.0, 3, false), entry(90.0, 3, true)],
    [entry(75.0, 5, false), entry(85.0, 3, false), entry(95.0, 1, true)],
    [entry(40.0, 5, false), entry(50.0, 5, false), entry(60.0, 5, false)],
];

/// Fixed warm-up prescription, ascending, never AMRAP.
const WARMUP_SCHEME: [(f64, u8); 3] = [(40.0, 5), (50.0, 5), (60.0, 3)];

pub fn week_scheme(week: u8) -> Result<&'static [SchemeEntry; 3], ScheduleError> {
    match week {
        1..=4 => Ok(&WEEK_SCHEMES[week as usize - 1]),
        other => Err(ScheduleError::InvalidWeek(other)),
    }
}

// ---------------------------------------------------------------------------
/// Prescribed Sets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetType {
    Warmup,
    Work,
    Joker,
}

/// A single set as shown in the session view. Generated on demand; only
/// persisted when captured into a workout record at session finish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescribedSet {
    pub set_type: SetType,
    /// 1-based within its group (warm-ups and work sets number separately).
    pub set_number: u8,
    pub weight: f64,
    pub reps: u8,
    pub percentage: f64,
    pub is_amrap: bool,
}

// ---------------------------------------------------------------------------
/// Main-Set Generation
// ---------------------------------------------------------------------------

/// Generate the ordered warm-up + work set sequence for a lift.
pub fn generate_working_sets(
    training_max: f64,
    week: u8,
    rounding_increment: f64,
    show_warmups: bool,
) -> Result<Vec<PrescribedSet>, ScheduleError> {
    let scheme = week_scheme(week)?;
    let mut sets = Vec::with_capacity(if show_warmups { 6 } else { 3 });

    if show_warmups {
        for (i, (percentage, reps)) in WARMUP_SCHEME.iter().enumerate() {
            sets.push(PrescribedSet {
                set_type: SetType::Warmup,
                set_number: i as u8 + 1,
                weight: calculate_weight(training_max, *percentage, rounding_increment),
                reps: *reps,
                percentage: *percentage,
                is_amrap: false,
            });
        }
    }

    for (i, entry) in scheme.iter().enumerate() {
        sets.push(PrescribedSet {
            set_type: SetType::Work,
            set_number: i as u8 + 1,
            weight: calculate_weight(training_max, entry.percentage, rounding_increment),
            reps: entry.reps,
            percentage: entry.percentage,
            is_amrap: entry.is_amrap,
        });
    }

    Ok(sets)
}

/// The "5×5/3/1" main-set variant: five straight sets at the week's top
/// percentage. Sets 1-4 use a fixed week-dependent rep count; the fifth set
/// keeps the anchor's own reps and inherits its AMRAP flag (so never on
/// deload).
pub fn generate_five_by_531_sets(
    training_max: f64,
    week: u8,
    rounding_increment: f64,
) -> Result<Vec<PrescribedSet>, ScheduleError> {
    let scheme = week_scheme(week)?;
    let anchor = &scheme[2];
    let weight = calculate_weight(training_max, anchor.percentage, rounding_increment);

    let fixed_reps = match week {
        1 => 5,
        2 => 3,
        3 => 1,
        _ => 5, // deload
    };

    let sets = (1..=5)
        .map(|n| PrescribedSet {
            set_type: SetType::Work,
            set_number: n,
            weight,
            reps: if n == 5 { anchor.reps } else { fixed_reps },
            percentage: anchor.percentage,
            is_amrap: n == 5 && anchor.is_amrap,
        })
        .collect();

    Ok(sets)
}

/// Optional above-max sets taken after the AMRAP top set, each 5 percentage
/// points over the last. Deload week has no AMRAP set to follow, so it gets
/// no jokers.
pub fn generate_joker_sets(
    training_max: f64,
    week: u8,
    rounding_increment: f64,
    count: u8,
) -> Result<Vec<PrescribedSet>, ScheduleError> {
    let scheme = week_scheme(week)?;
    let anchor = &scheme[2];
    if !anchor.is_amrap {
        return Ok(Vec::new());
    }

    let sets = (1..=count)
        .map(|n| {
            let percentage = anchor.percentage + 5.0 * n as f64;
            PrescribedSet {
                set_type: SetType::Joker,
                set_number: n,
                weight: calculate_weight(training_max, percentage, rounding_increment),
                reps: anchor.reps,
                percentage,
                is_amrap: false,
            }
        })
        .collect();

    Ok(sets)
}

// ---------------------------------------------------------------------------
/// Template Registry
// ---------------------------------------------------------------------------

/// Where a template's supplemental percentage comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentageSource {
    /// User-configured percentage (BBB, typically 40-70).
    Fixed,
    /// The week's first work-set percentage (First Set Last).
    FirstSet,
    /// The week's second work-set percentage (Second Set Last).
    SecondSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub has_supplemental: bool,
    pub percentage_source: PercentageSource,
    pub sets: u8,
    pub reps: u8,
    pub modifies_main_sets: bool,
}

pub const TEMPLATES: [Template; 5] = [
    Template {
        id: "classic",
        name: "Classic",
        has_supplemental: false,
        percentage_source: PercentageSource::Fixed,
        sets: 0,
        reps: 0,
        modifies_main_sets: false,
    },
    Template {
        id: "bbb",
        name: "BBB",
        has_supplemental: true,
        percentage_source: PercentageSource::Fixed,
        sets: 5,
        reps: 10,
        modifies_main_sets: false,
    },
    Template {
        id: "fsl",
        name: "FSL",
        has_supplemental: true,
        percentage_source: PercentageSource::FirstSet,
        sets: 5,
        reps: 5,
        modifies_main_sets: false,
    },
    Template {
        id: "ssl",
        name: "SSL",
        has_supplemental: true,
        percentage_source: PercentageSource::SecondSet,
        sets: 5,
        reps: 5,
        modifies_main_sets: false,
    },
    Template {
        id: "5x531",
        name: "5×5/3/1",
        has_supplemental: false,
        percentage_source: PercentageSource::Fixed,
        sets: 0,
        reps: 0,
        modifies_main_sets: true,
    },
];

pub fn template_by_id(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

// ---------------------------------------------------------------------------
/// Supplemental-Set Generation
// ---------------------------------------------------------------------------

/// The supplemental prescription for a session, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplementalPlan {
    pub template_name: String,
    pub sets: u8,
    pub reps: u8,
    pub weight: f64,
    pub percentage: f64,
    pub display: String,
}

fn format_weight(weight: f64) -> String {
    if weight.fract() == 0.0 {
        format!("{}", weight as i64)
    } else {
        format!("{:.1}", weight)
    }
}

/// Compute the supplemental plan for a template, or `None` when the template
/// is unknown or has no supplemental component; callers treat both the same
/// way ("nothing extra to do").
///
/// The training max passed in may belong to a different lift than the one on
/// screen (supplemental TM override); that substitution is the caller's job.
pub fn generate_supplemental_sets(
    template_id: &str,
    training_max: f64,
    week: u8,
    supplemental_percentage: f64,
    rounding_increment: f64,
) -> Result<Option<SupplementalPlan>, ScheduleError> {
    let template = match template_by_id(template_id) {
        Some(t) if t.has_supplemental => t,
        _ => return Ok(None),
    };

    let percentage = match template.percentage_source {
        PercentageSource::FirstSet => week_scheme(week)?[0].percentage,
        PercentageSource::SecondSet => week_scheme(week)?[1].percentage,
        PercentageSource::Fixed => supplemental_percentage,
    };

    let weight = calculate_weight(training_max, percentage, rounding_increment);

    Ok(Some(SupplementalPlan {
        template_name: template.name.to_string(),
        sets: template.sets,
        reps: template.reps,
        weight,
        percentage,
        display: format!("{}×{} @ {}", template.sets, template.reps, format_weight(weight)),
    }))
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
