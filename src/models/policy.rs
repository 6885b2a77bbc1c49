use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};
use crate::models::HabitType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContinuityMode {
    /// Every day must qualify.
    Strict,
    /// Up to `miss_tolerance` consecutive misses are absorbed.
    #[serde(alias = "tolerance_window")]
    Tolerance,
}

impl ContinuityMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContinuityMode::Strict => "strict",
            ContinuityMode::Tolerance => "tolerance",
        }
    }
}

impl FromStr for ContinuityMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(ContinuityMode::Strict),
            "tolerance" | "tolerance_window" => Ok(ContinuityMode::Tolerance),
            _ => Err(EngineError::InvalidPolicy(format!(
                "Unknown continuity mode: {}",
                s
            ))),
        }
    }
}

/// Immutable per-habit continuity settings for one computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitPolicy {
    pub habit: HabitType,
    pub mode: ContinuityMode,
    miss_tolerance: u32,
    pub enabled: bool,
}

impl HabitPolicy {
    pub fn strict(habit: HabitType) -> Self {
        Self {
            habit,
            mode: ContinuityMode::Strict,
            miss_tolerance: 0,
            enabled: true,
        }
    }

    pub fn tolerance_window(habit: HabitType, miss_tolerance: i64) -> EngineResult<Self> {
        let miss_tolerance = u32::try_from(miss_tolerance).map_err(|_| {
            EngineError::InvalidPolicy(format!(
                "{} miss tolerance must be a non-negative day count, got {}",
                habit.as_str(),
                miss_tolerance
            ))
        })?;
        Ok(Self {
            habit,
            mode: ContinuityMode::Tolerance,
            miss_tolerance,
            enabled: true,
        })
    }

    pub fn disabled(habit: HabitType) -> Self {
        Self::strict(habit).with_enabled(false)
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Consecutive misses a run can absorb. Always 0 under `Strict`.
    pub fn allowed_misses(&self) -> u32 {
        match self.mode {
            ContinuityMode::Strict => 0,
            ContinuityMode::Tolerance => self.miss_tolerance,
        }
    }
}
