use chrono::NaiveDate;
use log::debug;
use std::collections::HashMap;

use crate::dates::enumerate_range;
use crate::error::EngineResult;
use crate::models::{DailyRecord, DayAggregate};

/// Merge the three habit lists into one gap-free series covering
/// `[start, end]`. Dates without a record get zero/false defaults.
pub fn aggregate_window(
    practice: &[DailyRecord],
    gym: &[DailyRecord],
    class: &[DailyRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> EngineResult<Vec<DayAggregate>> {
    let range = enumerate_range(start, end)?;

    let practice = index_by_date(practice);
    let gym = index_by_date(gym);
    let class = index_by_date(class);

    let window: Vec<DayAggregate> = range
        .map(|date| DayAggregate {
            date,
            practice_count: practice.get(&date).map(|r| r.count()).unwrap_or(0),
            gym_present: gym.get(&date).map(|r| r.present).unwrap_or(false),
            class_present: class.get(&date).map(|r| r.present).unwrap_or(false),
        })
        .collect();

    debug!("Aggregated {} days from {} to {}", window.len(), start, end);
    Ok(window)
}

// Last record wins for a duplicated date.
fn index_by_date(records: &[DailyRecord]) -> HashMap<NaiveDate, &DailyRecord> {
    records.iter().map(|r| (r.date, r)).collect()
}
