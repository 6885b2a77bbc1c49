use chrono::NaiveDate;

use crate::dates::trailing_window;
use crate::engine::aggregate::aggregate_window;
use crate::error::EngineResult;
use crate::models::{ContributionScore, DailyRecord, DayAggregate, ScoreSummary};

/// Highest heat level. A day at this level was a genuinely full day.
pub const MAX_SCORE: u8 = 3;

/// Default rolling heatmap length.
pub const HEATMAP_DAYS: u32 = 365;

/// Heat level in `0..=3` for one day.
pub fn score_day(day: &DayAggregate) -> u8 {
    let mut score = 0u8;
    if day.practice_count >= 1 {
        score += 1;
    }
    // "did a lot" on top of "did some"
    if day.practice_count > 1 {
        score += 1;
    }
    if day.gym_present {
        score += 1;
    }
    if day.class_present {
        score += 1;
    }
    score.min(MAX_SCORE)
}

pub fn score_window(window: &[DayAggregate]) -> Vec<ContributionScore> {
    window
        .iter()
        .map(|day| ContributionScore {
            date: day.date,
            score: score_day(day),
        })
        .collect()
}

/// Scores for the `days`-long window ending at `today`.
pub fn heatmap(
    practice: &[DailyRecord],
    gym: &[DailyRecord],
    class: &[DailyRecord],
    today: NaiveDate,
    days: u32,
) -> EngineResult<Vec<ContributionScore>> {
    let (start, end) = trailing_window(today, days)?;
    let window = aggregate_window(practice, gym, class, start, end)?;
    Ok(score_window(&window))
}

pub fn summarize(scores: &[ContributionScore]) -> ScoreSummary {
    let mut summary = ScoreSummary::default();
    for s in scores {
        let level = s.score.min(MAX_SCORE) as usize;
        summary.days += 1;
        summary.levels[level] += 1;
        if level > 0 {
            summary.active_days += 1;
        }
        if s.score >= MAX_SCORE {
            summary.full_days += 1;
        }
    }
    summary
}
