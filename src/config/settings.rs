use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{EngineError, EngineResult};
use crate::models::{ContinuityMode, HabitPolicy, HabitType};

fn default_timezone_offset() -> i32 {
    330
}
fn default_heatmap_days() -> u32 {
    365
}
fn default_attendance_target() -> f64 {
    75.0
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_timezone_offset")]
    pub timezone_offset: i32, // minutes from UTC
    #[serde(default = "default_heatmap_days")]
    pub heatmap_days: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            timezone_offset: default_timezone_offset(),
            heatmap_days: default_heatmap_days(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Signed so a negative value surfaces as an invalid policy, not a
    /// TOML parse error.
    #[serde(default)]
    pub miss_tolerance: i64,
}

fn default_mode() -> String {
    ContinuityMode::Strict.as_str().to_string()
}

impl HabitConfig {
    fn strict() -> Self {
        Self {
            enabled: true,
            mode: default_mode(),
            miss_tolerance: 0,
        }
    }

    fn tolerance(miss_tolerance: i64) -> Self {
        Self {
            enabled: true,
            mode: ContinuityMode::Tolerance.as_str().to_string(),
            miss_tolerance,
        }
    }

    pub fn to_policy(&self, habit: HabitType) -> EngineResult<HabitPolicy> {
        let policy = match self.mode.parse::<ContinuityMode>()? {
            ContinuityMode::Strict => HabitPolicy::strict(habit),
            ContinuityMode::Tolerance => HabitPolicy::tolerance_window(habit, self.miss_tolerance)?,
        };
        Ok(policy.with_enabled(self.enabled))
    }
}

fn default_practice() -> HabitConfig {
    HabitConfig::strict()
}
fn default_gym() -> HabitConfig {
    HabitConfig::tolerance(1)
}
fn default_class() -> HabitConfig {
    HabitConfig::strict()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalsConfig {
    #[serde(default = "default_attendance_target")]
    pub attendance_target: f64,
}

impl Default for GoalsConfig {
    fn default() -> Self {
        Self {
            attendance_target: default_attendance_target(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default = "default_practice")]
    pub practice: HabitConfig,
    #[serde(default = "default_gym")]
    pub gym: HabitConfig,
    #[serde(default = "default_class")]
    pub class: HabitConfig,
    #[serde(default)]
    pub goals: GoalsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            practice: default_practice(),
            gym: default_gym(),
            class: default_class(),
            goals: GoalsConfig::default(),
        }
    }
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "streakwise")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn habit(&self, habit: HabitType) -> &HabitConfig {
        match habit {
            HabitType::Practice => &self.practice,
            HabitType::Gym => &self.gym,
            HabitType::Class => &self.class,
        }
    }

    pub fn policy_for(&self, habit: HabitType) -> EngineResult<HabitPolicy> {
        self.habit(habit).to_policy(habit)
    }

    /// Every habit's policy, failing on the first invalid one.
    pub fn policies(&self) -> EngineResult<Vec<HabitPolicy>> {
        HabitType::all()
            .into_iter()
            .map(|habit| self.policy_for(habit))
            .collect()
    }

    pub fn validate(&self) -> EngineResult<()> {
        self.policies()?;
        if self.general.timezone_offset.abs() >= 24 * 60 {
            return Err(EngineError::InvalidTimezone(self.general.timezone_offset));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(
            config.policy_for(HabitType::Practice).unwrap(),
            HabitPolicy::strict(HabitType::Practice)
        );
        assert_eq!(
            config.policy_for(HabitType::Gym).unwrap(),
            HabitPolicy::tolerance_window(HabitType::Gym, 1).unwrap()
        );
        assert_eq!(config.goals.attendance_target, 75.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load_from(&temp.path().join("nope.toml")).unwrap();
        assert_eq!(config.general.heatmap_days, 365);
    }

    #[test]
    fn test_partial_file_and_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            "[gym]\nmode = \"tolerance\"\nmiss_tolerance = 2\n\n[class]\nenabled = false\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.policy_for(HabitType::Gym).unwrap().allowed_misses(), 2);
        assert!(!config.policy_for(HabitType::Class).unwrap().enabled);
        assert_eq!(config.general.timezone_offset, 330);

        config.save_to(&path).unwrap();
        let reloaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(reloaded.gym.miss_tolerance, 2);
        assert!(!reloaded.class.enabled);
    }

    #[test]
    fn test_negative_tolerance_is_invalid_policy() {
        let config: AppConfig =
            toml::from_str("[gym]\nmode = \"tolerance\"\nmiss_tolerance = -3\n").unwrap();
        assert!(matches!(
            config.policy_for(HabitType::Gym),
            Err(EngineError::InvalidPolicy(_))
        ));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_strict_ignores_negative_tolerance() {
        let config: AppConfig = toml::from_str("[practice]\nmiss_tolerance = -3\n").unwrap();
        assert!(config.policy_for(HabitType::Practice).is_ok());
    }
}
