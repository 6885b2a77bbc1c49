use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use log::warn;
use serde::Deserialize;
use std::path::Path;

use streakwise::dates::normalize;
use streakwise::models::{DailyRecord, HabitType};

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    date: Option<NaiveDate>,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    present: Option<bool>,
    #[serde(default)]
    quantity: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct RecordFile {
    #[serde(default)]
    practice: Vec<RawEntry>,
    #[serde(default)]
    gym: Vec<RawEntry>,
    #[serde(default, alias = "classes")]
    class: Vec<RawEntry>,
}

/// Records for all three habits, sorted by date.
#[derive(Debug, Default)]
pub struct HabitRecords {
    pub practice: Vec<DailyRecord>,
    pub gym: Vec<DailyRecord>,
    pub class: Vec<DailyRecord>,
}

impl HabitRecords {
    pub fn load(path: &Path, tz_offset_minutes: i32) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        Self::from_json(&content, tz_offset_minutes)
            .with_context(|| format!("Loading records from {:?}", path))
    }

    pub fn from_json(content: &str, tz_offset_minutes: i32) -> Result<Self> {
        let file: RecordFile = serde_json::from_str(content).context("Parsing records JSON")?;
        Ok(Self {
            practice: convert(HabitType::Practice, file.practice, tz_offset_minutes)?,
            gym: convert(HabitType::Gym, file.gym, tz_offset_minutes)?,
            class: convert(HabitType::Class, file.class, tz_offset_minutes)?,
        })
    }

    pub fn for_habit(&self, habit: HabitType) -> &[DailyRecord] {
        match habit {
            HabitType::Practice => &self.practice,
            HabitType::Gym => &self.gym,
            HabitType::Class => &self.class,
        }
    }
}

fn convert(habit: HabitType, entries: Vec<RawEntry>, tz_offset_minutes: i32) -> Result<Vec<DailyRecord>> {
    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        let date = match (entry.date, entry.timestamp) {
            (Some(date), _) => date,
            (None, Some(ts)) => normalize(ts, tz_offset_minutes)?,
            (None, None) => {
                warn!("Skipping {} entry with neither date nor timestamp", habit.as_str());
                continue;
            }
        };
        let present = entry
            .present
            .unwrap_or_else(|| entry.quantity.is_some_and(|q| q >= 1));
        records.push(DailyRecord {
            date,
            present,
            quantity: entry.quantity,
        });
    }
    records.sort_by_key(|r| r.date);
    Ok(records)
}
