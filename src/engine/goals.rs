//! Attendance percentage and target arithmetic.

use crate::models::GoalStatus;

/// Slack for float noise in the closed forms, far below one unit.
const EPSILON: f64 = 1e-9;

/// Share of `attended` over `total` in percent. Zero when `total` is zero.
pub fn percentage(attended: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        attended as f64 / total as f64 * 100.0
    }
}

/// Additional consecutive attended units needed so that
/// `(attended + n) / (total + n) >= target_percent / 100`.
///
/// Rounds up. Returns `None` when the target is 100% (or more) and a unit
/// has already been missed, since no number of attended units reaches it.
pub fn units_to_reach_target(attended: u32, total: u32, target_percent: f64) -> Option<u32> {
    let target = target_percent / 100.0;
    if target.is_nan() || target <= 0.0 {
        return Some(0);
    }
    if target >= 1.0 {
        return (attended >= total).then_some(0);
    }

    let needed = (target * total as f64 - attended as f64) / (1.0 - target);
    if needed <= 0.0 {
        return Some(0);
    }
    Some(clamp_units((needed - EPSILON).ceil()))
}

/// Units that can still be missed in a row while staying at or above the
/// target. Rounds down. `None` means unlimited (a target of 0%).
pub fn units_can_miss(attended: u32, total: u32, target_percent: f64) -> Option<u32> {
    let target = target_percent / 100.0;
    if target.is_nan() || target <= 0.0 {
        return None;
    }
    let spare = attended as f64 / target - total as f64;
    if spare <= 0.0 {
        return Some(0);
    }
    Some(clamp_units((spare + EPSILON).floor()))
}

pub fn goal_status(attended: u32, total: u32, target_percent: f64) -> GoalStatus {
    GoalStatus {
        percentage: percentage(attended, total),
        units_needed_for_target: units_to_reach_target(attended, total, target_percent),
        units_can_miss: units_can_miss(attended, total, target_percent),
    }
}

fn clamp_units(n: f64) -> u32 {
    if n >= u32::MAX as f64 {
        u32::MAX
    } else {
        n.max(0.0) as u32
    }
}
