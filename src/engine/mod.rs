pub mod aggregate;
pub mod batch;
pub mod goals;
pub mod score;
pub mod streak;

pub use aggregate::aggregate_window;
pub use batch::{compute_batch, StreakJob, StreakOutcome};
pub use goals::{goal_status, percentage, units_can_miss, units_to_reach_target};
pub use score::{heatmap, score_day, score_window, summarize};
pub use streak::{compute_streak, current_streak, longest_streak, streak_over_window};
