pub mod policy;
pub mod record;
pub mod stats;

pub use policy::{ContinuityMode, HabitPolicy};
pub use record::{DailyRecord, HabitType};
pub use stats::{ContributionScore, DayAggregate, GoalStatus, ScoreSummary, StreakResult};
