mod cli;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Commands};
use cli::handlers;
use streakwise::config::AppConfig;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    match cli.command {
        Commands::Report { records, today } => {
            handlers::handle_report(&config, &records, today)?;
        }
        Commands::Heatmap {
            records,
            today,
            days,
        } => {
            handlers::handle_heatmap(&config, &records, today, days)?;
        }
        Commands::Goal {
            attended,
            total,
            target,
        } => {
            handlers::handle_goal(&config, attended, total, target)?;
        }
        Commands::Config { init } => {
            handlers::handle_config(&config, init)?;
        }
    }

    Ok(())
}
