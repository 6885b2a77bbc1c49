use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitType {
    Practice,
    Gym,
    Class,
}

impl HabitType {
    pub fn all() -> Vec<HabitType> {
        vec![HabitType::Practice, HabitType::Gym, HabitType::Class]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HabitType::Practice => "practice",
            HabitType::Gym => "gym",
            HabitType::Class => "class",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            HabitType::Practice => "Coding practice",
            HabitType::Gym => "Gym",
            HabitType::Class => "Classes",
        }
    }
}

impl std::fmt::Display for HabitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for HabitType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "practice" | "coding" | "code" => Ok(HabitType::Practice),
            "gym" | "workout" => Ok(HabitType::Gym),
            "class" | "classes" | "attendance" => Ok(HabitType::Class),
            _ => Err(EngineError::InvalidPolicy(format!("Unknown habit: {}", s))),
        }
    }
}

/// One day of one habit, as handed over by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub present: bool,
    /// e.g. problems solved; only meaningful for practice.
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, present: bool) -> Self {
        Self {
            date,
            present,
            quantity: None,
        }
    }

    pub fn with_quantity(date: NaiveDate, quantity: u32) -> Self {
        Self {
            date,
            present: quantity >= 1,
            quantity: Some(quantity),
        }
    }

    /// Whether this record counts toward a streak of `habit`.
    ///
    /// Practice is driven by the recorded quantity when there is one;
    /// everything else only looks at `present`.
    pub fn qualifies(&self, habit: HabitType) -> bool {
        match (habit, self.quantity) {
            (HabitType::Practice, Some(q)) => q >= 1,
            _ => self.present,
        }
    }

    /// Units of work this record contributes to a day aggregate.
    pub fn count(&self) -> u32 {
        match self.quantity {
            Some(q) => q,
            None if self.present => 1,
            None => 0,
        }
    }
}
