//! Calendar-day helpers shared by every engine component.
//!
//! Attendance is a local calendar-day concept, so everything here works on
//! `NaiveDate` and only touches instants in [`normalize`].

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};

use crate::error::{EngineError, EngineResult};

const MAX_OFFSET_MINUTES: i32 = 24 * 60;

/// Truncate an instant to the calendar day it falls on at `offset_minutes`
/// east of UTC.
pub fn normalize(timestamp: DateTime<Utc>, offset_minutes: i32) -> EngineResult<NaiveDate> {
    if offset_minutes.abs() >= MAX_OFFSET_MINUTES {
        return Err(EngineError::InvalidTimezone(offset_minutes));
    }
    let offset = FixedOffset::east_opt(offset_minutes * 60)
        .ok_or(EngineError::InvalidTimezone(offset_minutes))?;
    Ok(offset.from_utc_datetime(&timestamp.naive_utc()).date_naive())
}

/// Calendar day of a timestamp that already carries its own offset.
pub fn normalize_local(timestamp: DateTime<FixedOffset>) -> NaiveDate {
    timestamp.date_naive()
}

/// Signed number of days `a` lies after `b`. `days_between(a, a) == 0`,
/// and `days_between(end, start) + 1` is the length of `start..=end`.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days()
}

/// Inclusive, ascending range of days.
pub fn enumerate_range(start: NaiveDate, end: NaiveDate) -> EngineResult<DayRange> {
    if start > end {
        return Err(EngineError::InvalidRange { start, end });
    }
    Ok(DayRange {
        next: Some(start),
        last: end,
    })
}

/// Window of `days` days ending at (and including) `end`. A zero-length
/// window is rejected, as is one reaching before the earliest representable
/// date.
pub fn trailing_window(end: NaiveDate, days: u32) -> EngineResult<(NaiveDate, NaiveDate)> {
    let span = i64::from(days) - 1;
    if span < 0 {
        return Err(EngineError::InvalidRange {
            start: end.succ_opt().unwrap_or(NaiveDate::MAX),
            end,
        });
    }
    let start = end
        .checked_sub_signed(Duration::days(span))
        .ok_or(EngineError::InvalidRange {
            start: NaiveDate::MIN,
            end,
        })?;
    Ok((start, end))
}

/// Lazy iterator over an inclusive range of calendar days.
#[derive(Debug, Clone)]
pub struct DayRange {
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl Iterator for DayRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = if current < self.last {
            current.succ_opt()
        } else {
            None
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self
            .next
            .map(|d| (days_between(self.last, d) + 1) as usize)
            .unwrap_or(0);
        (len, Some(len))
    }
}

impl DoubleEndedIterator for DayRange {
    fn next_back(&mut self) -> Option<NaiveDate> {
        let first = self.next?;
        let current = self.last;
        if current <= first {
            self.next = None;
        } else if let Some(prev) = current.pred_opt() {
            self.last = prev;
        } else {
            self.next = None;
        }
        Some(current)
    }
}

impl ExactSizeIterator for DayRange {}
