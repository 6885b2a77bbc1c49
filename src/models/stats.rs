use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{DailyRecord, HabitType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakResult {
    pub current: u32,
    pub longest: u32,
}

/// Merged facts for one calendar day. Built fresh per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAggregate {
    pub date: NaiveDate,
    pub practice_count: u32,
    pub gym_present: bool,
    pub class_present: bool,
}

impl DayAggregate {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            practice_count: 0,
            gym_present: false,
            class_present: false,
        }
    }

    /// View one habit of this day as a plain record.
    pub fn record_for(&self, habit: HabitType) -> DailyRecord {
        match habit {
            HabitType::Practice => DailyRecord::with_quantity(self.date, self.practice_count),
            HabitType::Gym => DailyRecord::new(self.date, self.gym_present),
            HabitType::Class => DailyRecord::new(self.date, self.class_present),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionScore {
    pub date: NaiveDate,
    pub score: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub days: u32,
    pub active_days: u32,
    pub full_days: u32,
    /// Number of days at each score level, index = score.
    pub levels: [u32; 4],
}

impl ScoreSummary {
    pub fn active_ratio(&self) -> f64 {
        if self.days == 0 {
            0.0
        } else {
            self.active_days as f64 / self.days as f64
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalStatus {
    pub percentage: f64,
    /// `None` when the target can no longer be reached.
    pub units_needed_for_target: Option<u32>,
    /// `None` when any number of misses keeps the target (target of 0%).
    pub units_can_miss: Option<u32>,
}
