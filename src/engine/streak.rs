//! Current and longest streaks for a single habit.
//!
//! Both numbers are computed over the same history (records up to and
//! including `today`) so `longest >= current` always holds. A run is the
//! calendar span from its first to its last qualifying day; misses inside
//! the run are absorbed as long as no more than `allowed_misses()` of them
//! are consecutive. Strict mode is the special case of zero allowed misses.

use chrono::NaiveDate;
use log::{debug, warn};
use std::collections::BTreeMap;

use crate::dates::days_between;
use crate::models::{DailyRecord, DayAggregate, HabitPolicy, HabitType, StreakResult};

/// Current and longest streak for one habit.
pub fn compute_streak(
    records: &[DailyRecord],
    policy: &HabitPolicy,
    today: NaiveDate,
) -> StreakResult {
    if !policy.enabled {
        return StreakResult::default();
    }
    let days = qualifying_days(records, policy.habit, today);
    let allowed = i64::from(policy.allowed_misses());
    let result = StreakResult {
        current: to_days(current_run(&days, allowed, today)),
        longest: to_days(longest_run(&days, allowed)),
    };
    debug!(
        "{} streak as of {}: current={} longest={} ({} qualifying days)",
        policy.habit.as_str(),
        today,
        result.current,
        result.longest,
        days.len()
    );
    result
}

/// Run ending at `today`, or at the latest qualifying day if the misses
/// since then are still within tolerance.
pub fn current_streak(records: &[DailyRecord], policy: &HabitPolicy, today: NaiveDate) -> u32 {
    if !policy.enabled {
        return 0;
    }
    let days = qualifying_days(records, policy.habit, today);
    to_days(current_run(&days, i64::from(policy.allowed_misses()), today))
}

/// Best run anywhere in the history up to `today`.
pub fn longest_streak(records: &[DailyRecord], policy: &HabitPolicy, today: NaiveDate) -> u32 {
    if !policy.enabled {
        return 0;
    }
    let days = qualifying_days(records, policy.habit, today);
    to_days(longest_run(&days, i64::from(policy.allowed_misses())))
}

/// Streaks over a dense aggregated window.
pub fn streak_over_window(
    window: &[DayAggregate],
    policy: &HabitPolicy,
    today: NaiveDate,
) -> StreakResult {
    let records: Vec<DailyRecord> = window.iter().map(|d| d.record_for(policy.habit)).collect();
    compute_streak(&records, policy, today)
}

/// Ascending qualifying dates up to `today`. Dates without a record simply
/// never appear, which makes them misses.
fn qualifying_days(records: &[DailyRecord], habit: HabitType, today: NaiveDate) -> Vec<NaiveDate> {
    let mut by_date: BTreeMap<NaiveDate, bool> = BTreeMap::new();
    for record in records.iter().filter(|r| r.date <= today) {
        let qualifies = record.qualifies(habit);
        if let Some(seen) = by_date.get_mut(&record.date) {
            warn!(
                "Duplicate {} record for {}, keeping the qualifying one",
                habit.as_str(),
                record.date
            );
            *seen |= qualifies;
        } else {
            by_date.insert(record.date, qualifies);
        }
    }
    by_date
        .into_iter()
        .filter_map(|(date, qualifies)| qualifies.then_some(date))
        .collect()
}

fn current_run(days: &[NaiveDate], allowed: i64, today: NaiveDate) -> i64 {
    let Some((&latest, earlier)) = days.split_last() else {
        return 0;
    };
    // Days after the latest qualifying one are trailing misses.
    if days_between(today, latest) > allowed {
        return 0;
    }

    let mut run = 1;
    let mut next = latest;
    for &day in earlier.iter().rev() {
        let gap = days_between(next, day);
        if gap - 1 > allowed {
            break;
        }
        run += gap;
        next = day;
    }
    run
}

fn longest_run(days: &[NaiveDate], allowed: i64) -> i64 {
    let Some((&first, rest)) = days.split_first() else {
        return 0;
    };

    let mut best = 0;
    let mut run = 1;
    let mut prev = first;
    for &day in rest {
        let gap = days_between(day, prev);
        if gap - 1 <= allowed {
            run += gap;
        } else {
            best = best.max(run);
            run = 1;
        }
        prev = day;
    }
    best.max(run)
}

fn to_days(n: i64) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::enumerate_range;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn present_on(start: NaiveDate, end: NaiveDate, skip: &[NaiveDate]) -> Vec<DailyRecord> {
        enumerate_range(start, end)
            .unwrap()
            .filter(|day| !skip.contains(day))
            .map(|day| DailyRecord::new(day, true))
            .collect()
    }

    fn gym(tolerance: i64) -> HabitPolicy {
        HabitPolicy::tolerance_window(HabitType::Gym, tolerance).unwrap()
    }

    #[test]
    fn test_strict_gap_breaks_run() {
        let records = present_on(d(2024, 1, 1), d(2024, 1, 9), &[d(2024, 1, 6)]);
        let policy = HabitPolicy::strict(HabitType::Practice);
        let result = compute_streak(&records, &policy, d(2024, 1, 9));
        assert_eq!(result, StreakResult { current: 3, longest: 5 });
    }

    #[test]
    fn test_strict_explicit_absence_is_a_miss() {
        let mut records = present_on(d(2024, 1, 1), d(2024, 1, 9), &[]);
        records[5].present = false;
        let policy = HabitPolicy::strict(HabitType::Practice);
        let result = compute_streak(&records, &policy, d(2024, 1, 9));
        assert_eq!(result, StreakResult { current: 3, longest: 5 });
    }

    #[test]
    fn test_strict_today_missing_is_zero() {
        let records = present_on(d(2024, 1, 1), d(2024, 1, 8), &[]);
        let policy = HabitPolicy::strict(HabitType::Practice);
        let result = compute_streak(&records, &policy, d(2024, 1, 9));
        assert_eq!(result, StreakResult { current: 0, longest: 8 });
    }

    #[test]
    fn test_tolerance_absorbs_lone_miss() {
        let records = present_on(d(2024, 2, 1), d(2024, 2, 20), &[d(2024, 2, 10)]);
        let result = compute_streak(&records, &gym(1), d(2024, 2, 20));
        assert_eq!(result, StreakResult { current: 20, longest: 20 });
    }

    #[test]
    fn test_tolerance_two_consecutive_misses_break() {
        let records = present_on(
            d(2024, 2, 1),
            d(2024, 2, 20),
            &[d(2024, 2, 10), d(2024, 2, 11)],
        );
        let result = compute_streak(&records, &gym(1), d(2024, 2, 20));
        assert_eq!(result, StreakResult { current: 9, longest: 9 });
    }

    #[test]
    fn test_tolerance_trailing_misses() {
        let records = present_on(d(2024, 2, 1), d(2024, 2, 10), &[]);
        // One day since the last visit: still alive, trailing miss not counted.
        assert_eq!(current_streak(&records, &gym(1), d(2024, 2, 11)), 10);
        // Two days since: broken.
        assert_eq!(current_streak(&records, &gym(1), d(2024, 2, 12)), 0);
        assert_eq!(longest_streak(&records, &gym(1), d(2024, 2, 12)), 10);
    }

    #[test]
    fn test_tolerance_zero_behaves_strict() {
        let records = present_on(d(2024, 1, 1), d(2024, 1, 9), &[d(2024, 1, 6)]);
        let result = compute_streak(&records, &gym(0), d(2024, 1, 9));
        assert_eq!(result, StreakResult { current: 3, longest: 5 });
    }

    #[test]
    fn test_disabled_policy_is_zero() {
        let records = present_on(d(2024, 1, 1), d(2024, 1, 9), &[]);
        let policy = gym(2).with_enabled(false);
        assert_eq!(
            compute_streak(&records, &policy, d(2024, 1, 9)),
            StreakResult::default()
        );
        assert_eq!(current_streak(&records, &policy, d(2024, 1, 9)), 0);
        assert_eq!(longest_streak(&records, &policy, d(2024, 1, 9)), 0);
    }

    #[test]
    fn test_edge_cases() {
        let policy = HabitPolicy::strict(HabitType::Class);
        let today = d(2024, 6, 1);
        assert_eq!(compute_streak(&[], &policy, today), StreakResult::default());

        let absent = vec![DailyRecord::new(today, false)];
        assert_eq!(compute_streak(&absent, &policy, today), StreakResult::default());

        let single = vec![DailyRecord::new(today, true)];
        assert_eq!(
            compute_streak(&single, &policy, today),
            StreakResult { current: 1, longest: 1 }
        );
    }

    #[test]
    fn test_future_records_ignored() {
        let records = present_on(d(2024, 1, 1), d(2024, 1, 20), &[]);
        let policy = HabitPolicy::strict(HabitType::Practice);
        let result = compute_streak(&records, &policy, d(2024, 1, 5));
        assert_eq!(result, StreakResult { current: 5, longest: 5 });
    }

    #[test]
    fn test_unsorted_and_duplicate_input() {
        let mut records = present_on(d(2024, 1, 1), d(2024, 1, 4), &[]);
        records.reverse();
        records.push(DailyRecord::new(d(2024, 1, 2), false));
        let policy = HabitPolicy::strict(HabitType::Gym);
        let result = compute_streak(&records, &policy, d(2024, 1, 4));
        assert_eq!(result, StreakResult { current: 4, longest: 4 });
    }

    #[test]
    fn test_practice_zero_quantity_breaks() {
        let records = vec![
            DailyRecord::with_quantity(d(2024, 1, 1), 2),
            DailyRecord::with_quantity(d(2024, 1, 2), 0),
            DailyRecord::with_quantity(d(2024, 1, 3), 5),
        ];
        let policy = HabitPolicy::strict(HabitType::Practice);
        let result = compute_streak(&records, &policy, d(2024, 1, 3));
        assert_eq!(result, StreakResult { current: 1, longest: 1 });
    }

    #[test]
    fn test_streak_over_window_matches_records() {
        let today = d(2024, 1, 9);
        let window: Vec<DayAggregate> = enumerate_range(d(2024, 1, 1), today)
            .unwrap()
            .map(|date| DayAggregate {
                date,
                practice_count: if date == d(2024, 1, 6) { 0 } else { 2 },
                gym_present: false,
                class_present: true,
            })
            .collect();
        let practice = HabitPolicy::strict(HabitType::Practice);
        assert_eq!(
            streak_over_window(&window, &practice, today),
            StreakResult { current: 3, longest: 5 }
        );
        let class = HabitPolicy::strict(HabitType::Class);
        assert_eq!(
            streak_over_window(&window, &class, today),
            StreakResult { current: 9, longest: 9 }
        );
    }
}
