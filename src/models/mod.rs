pub mod history;
pub mod settings;

pub use history::{PrRecord, TmRecord, WorkoutRecord};
pub use settings::{AppSettings, Lift, LiftSettings, Unit};
