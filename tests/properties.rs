use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use proptest::test_runner::Config;

use streakwise::dates::days_between;
use streakwise::engine::{aggregate_window, compute_streak, score_day, units_to_reach_target};
use streakwise::models::{DailyRecord, DayAggregate, HabitPolicy, HabitType};

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// Up to 60 days of history: `None` means no record for that day.
fn history() -> impl Strategy<Value = Vec<Option<bool>>> {
    prop::collection::vec(prop::option::of(any::<bool>()), 0..60)
}

fn to_records(days: &[Option<bool>]) -> Vec<DailyRecord> {
    days.iter()
        .enumerate()
        .filter_map(|(i, present)| {
            present.map(|p| DailyRecord::new(base() + Duration::days(i as i64), p))
        })
        .collect()
}

fn policy(tolerance: Option<i64>) -> HabitPolicy {
    match tolerance {
        Some(n) => HabitPolicy::tolerance_window(HabitType::Gym, n).unwrap(),
        None => HabitPolicy::strict(HabitType::Gym),
    }
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn streak_is_idempotent(days in history(), tolerance in prop::option::of(0_i64..4), offset in 0_i64..70) {
        let records = to_records(&days);
        let policy = policy(tolerance);
        let today = base() + Duration::days(offset);
        prop_assert_eq!(
            compute_streak(&records, &policy, today),
            compute_streak(&records, &policy, today)
        );
    }

    #[test]
    fn longest_at_least_current(days in history(), tolerance in prop::option::of(0_i64..4), offset in 0_i64..70) {
        let records = to_records(&days);
        let result = compute_streak(&records, &policy(tolerance), base() + Duration::days(offset));
        prop_assert!(result.longest >= result.current);
    }

    #[test]
    fn strict_longest_never_exceeds_qualifying_days(days in history()) {
        let records = to_records(&days);
        let today = base() + Duration::days(60);
        let qualifying = records.iter().filter(|r| r.present).count() as u32;
        let result = compute_streak(&records, &policy(None), today);
        prop_assert!(result.longest <= qualifying);
    }

    #[test]
    fn score_in_bounds(count in 0_u32..1000, gym in any::<bool>(), class in any::<bool>()) {
        let day = DayAggregate {
            date: base(),
            practice_count: count,
            gym_present: gym,
            class_present: class,
        };
        prop_assert!(score_day(&day) <= 3);
    }

    #[test]
    fn window_length_matches_range(start_offset in 0_i64..400, len in 0_i64..400) {
        let start = base() + Duration::days(start_offset);
        let end = start + Duration::days(len);
        let window = aggregate_window(&[], &[], &[], start, end).unwrap();
        prop_assert_eq!(window.len() as i64, days_between(end, start) + 1);
    }

    #[test]
    fn units_reach_target(total in 0_u32..500, attended_pct in 0_u32..=100, target in 1_u32..100) {
        let attended = total * attended_pct / 100;
        let target = target as f64;
        let n = units_to_reach_target(attended, total, target).unwrap();
        let reached = (attended + n) as f64 / (total + n).max(1) as f64 * 100.0;
        prop_assert!(total + n == 0 || reached >= target - 1e-6);
        if n > 0 {
            let short = (attended + n - 1) as f64 / (total + n - 1) as f64 * 100.0;
            prop_assert!(short < target + 1e-6);
        }
    }
}
