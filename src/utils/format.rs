use chrono::Datelike;

use streakwise::models::ContributionScore;

/// Format a percentage with one decimal, trimming a trailing ".0"
pub fn format_percent(pct: f64) -> String {
    if pct == pct.floor() {
        format!("{}%", pct as i64)
    } else {
        format!("{:.1}%", pct)
    }
}

/// "1 day" / "N days"
pub fn format_days(n: u32) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", n)
    }
}

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub fn heat_glyph(score: u8) -> &'static str {
    match score {
        0 => "·",
        1 => "░",
        2 => "▒",
        _ => "█",
    }
}

/// Lay scores out as seven weekday rows (Mon..Sun) by week columns.
/// Cells before the first day of the window are blank.
pub fn heatmap_rows(scores: &[ContributionScore]) -> Vec<String> {
    let mut rows = vec![String::new(); 7];
    let Some(first) = scores.first() else {
        return rows;
    };

    let lead = first.date.weekday().num_days_from_monday() as usize;
    for row in rows.iter_mut().take(lead) {
        row.push(' ');
    }
    for s in scores {
        let row = s.date.weekday().num_days_from_monday() as usize;
        rows[row].push_str(heat_glyph(s.score));
    }
    rows
}
