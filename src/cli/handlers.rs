use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use std::path::Path;

use streakwise::config::AppConfig;
use streakwise::dates::{normalize, trailing_window};
use streakwise::engine::{aggregate_window, compute_streak, goal_status, heatmap, score_window, summarize};
use streakwise::models::{DailyRecord, GoalStatus, HabitType};

use crate::cli::records::HabitRecords;
use crate::utils::format::{
    format_days, format_percent, heat_glyph, heatmap_rows, progress_bar, WEEKDAY_LABELS,
};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";

/// `today` from the flag, or the wall clock resolved in the configured zone.
fn resolve_today(config: &AppConfig, today: Option<NaiveDate>) -> Result<NaiveDate> {
    match today {
        Some(day) => Ok(day),
        None => normalize(Utc::now(), config.general.timezone_offset)
            .context("Resolving today's date"),
    }
}

fn heat_color(score: u8) -> &'static str {
    match score {
        0 => DIM,
        1 | 2 => AMBER,
        _ => GREEN,
    }
}

// ─── Report ──────────────────────────────────────────────────────────────────

pub fn handle_report(config: &AppConfig, records_path: &Path, today: Option<NaiveDate>) -> Result<()> {
    let today = resolve_today(config, today)?;
    let records = HabitRecords::load(records_path, config.general.timezone_offset)?;

    println!();
    println_colored!(BOLD, "  Habit report · {}", today);
    println!();

    for habit in HabitType::all() {
        let policy = config.policy_for(habit)?;
        if !policy.enabled {
            println_colored!(DIM, "  {:<16} tracking off", habit.display_name());
            continue;
        }
        let streak = compute_streak(records.for_habit(habit), &policy, today);
        let color = if streak.current > 0 { GREEN } else { DIM };
        println_colored!(
            color,
            "  {:<16} {}  {:>8} current  |  {} best",
            habit.display_name(),
            progress_bar(streak.current, streak.longest.max(1), 12),
            format_days(streak.current),
            format_days(streak.longest)
        );
    }

    let (attended, total) = class_attendance(&records.class, today);
    let target = config.goals.attendance_target;
    println!();
    print_goal(attended, total, target, &goal_status(attended, total, target));

    // Last 7 days
    let (start, end) = trailing_window(today, 7)?;
    let week = aggregate_window(&records.practice, &records.gym, &records.class, start, end)?;
    println!();
    println_colored!(DIM, "  Last 7 days  (· = 0, ░ = 1, ▒ = 2, █ = 3)");
    print!("  ");
    for s in score_window(&week) {
        print!("{}{}\x1b[0m ", heat_color(s.score), heat_glyph(s.score));
    }
    println!();
    println!();
    Ok(())
}

/// Attended and held classes up to `today`, the same history streaks use.
fn class_attendance(class: &[DailyRecord], today: NaiveDate) -> (u32, u32) {
    let held: Vec<&DailyRecord> = class.iter().filter(|r| r.date <= today).collect();
    let attended = held.iter().filter(|r| r.present).count() as u32;
    (attended, held.len() as u32)
}

fn print_goal(attended: u32, total: u32, target: f64, status: &GoalStatus) {
    let color = if status.percentage >= target { GREEN } else { AMBER };
    println_colored!(
        color,
        "  Attendance:      {}/{}  ({})  target {}",
        attended,
        total,
        format_percent(status.percentage),
        format_percent(target)
    );
    match status.units_needed_for_target {
        Some(0) => match status.units_can_miss {
            Some(n) => println!("  Can still miss:  {}", n),
            None => println!("  Can still miss:  any number"),
        },
        Some(n) => println_colored!(AMBER, "  Need to attend:  {} more in a row", n),
        None => println_colored!(RED, "  Target can no longer be reached"),
    }
}

// ─── Heatmap ─────────────────────────────────────────────────────────────────

pub fn handle_heatmap(
    config: &AppConfig,
    records_path: &Path,
    today: Option<NaiveDate>,
    days: Option<u32>,
) -> Result<()> {
    let today = resolve_today(config, today)?;
    let records = HabitRecords::load(records_path, config.general.timezone_offset)?;
    let days = days.unwrap_or(config.general.heatmap_days);

    let scores = heatmap(&records.practice, &records.gym, &records.class, today, days)?;
    let summary = summarize(&scores);

    println!();
    println_colored!(BOLD, "  Contributions · last {} ending {}", format_days(summary.days), today);
    println!();
    for (label, row) in WEEKDAY_LABELS.iter().zip(heatmap_rows(&scores)) {
        println!("  {}  {}", label, row);
    }
    println!();
    println!(
        "  Active days: {}/{}  ({})",
        summary.active_days,
        summary.days,
        format_percent((summary.active_ratio() * 1000.0).round() / 10.0)
    );
    println_colored!(GREEN, "  Full days:   {}", summary.full_days);
    println_colored!(
        DIM,
        "  Levels:      · {}  ░ {}  ▒ {}  █ {}",
        summary.levels[0],
        summary.levels[1],
        summary.levels[2],
        summary.levels[3]
    );
    println!();
    Ok(())
}

// ─── Goal ────────────────────────────────────────────────────────────────────

pub fn handle_goal(config: &AppConfig, attended: u32, total: u32, target: Option<f64>) -> Result<()> {
    let target = target.unwrap_or(config.goals.attendance_target);
    println!();
    print_goal(attended, total, target, &goal_status(attended, total, target));
    println!();
    Ok(())
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(config: &AppConfig, init: bool) -> Result<()> {
    if init {
        let path = AppConfig::config_path()?;
        if path.exists() {
            println!("Config already exists at {:?}", path);
            return Ok(());
        }
        let path = AppConfig::default().save()?;
        println_colored!(GREEN, "  ✓ Wrote default config to {:?}", path);
        return Ok(());
    }

    config.validate()?;
    let content = toml::to_string_pretty(config).context("Serializing config")?;
    println!("# {:?}", AppConfig::config_path()?);
    print!("{}", content);
    Ok(())
}
