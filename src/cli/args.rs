use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "streakwise", version, author, about = "Streaks, heatmaps and attendance goals for your daily habits")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show streaks for every habit, class attendance and the last 7 days
    Report {
        /// JSON file with practice, gym and class records
        #[arg(long, short)]
        records: PathBuf,
        /// Compute as of this day (YYYY-MM-DD) instead of the local today
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Print the contribution heatmap
    Heatmap {
        /// JSON file with practice, gym and class records
        #[arg(long, short)]
        records: PathBuf,
        /// Compute as of this day (YYYY-MM-DD) instead of the local today
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Window length in days (defaults to the configured heatmap_days)
        #[arg(long)]
        days: Option<u32>,
    },
    /// Attendance percentage and what it takes to reach the target
    Goal {
        /// Units attended so far
        #[arg(long)]
        attended: u32,
        /// Units held so far
        #[arg(long)]
        total: u32,
        /// Target percentage (defaults to the configured attendance_target)
        #[arg(long)]
        target: Option<f64>,
    },
    /// Show the effective configuration
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },
}
