//! match-stats CLI
//!
//! Aggregates a file of tracked match events into team and player statistics.
//!
//! The input file holds `events`, `home_players` and `away_players` (the same
//! shape as the JSON API request).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use stats_core::api::{aggregate_match, aggregate_segments, AggregateRequest, SegmentsRequest};
use stats_core::{AnalyticsConfig, StatsResponse};

mod report;

#[derive(Parser)]
#[command(name = "match-stats")]
#[command(version, about = "Aggregate tracked match events into statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate the whole match
    Aggregate {
        /// Input JSON file (events and rosters)
        #[arg(long)]
        input: PathBuf,

        /// JSON config file, overrides MATCH_STATS_CONFIG
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(long, default_value = "false")]
        pretty: bool,
    },

    /// Aggregate fixed time windows of the match
    Segments {
        /// Input JSON file (events and rosters)
        #[arg(long)]
        input: PathBuf,

        /// Window length in minutes
        #[arg(long)]
        interval: f64,

        /// Match length in minutes
        #[arg(long, default_value = "90")]
        duration: f64,

        /// JSON config file, overrides MATCH_STATS_CONFIG
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(long, default_value = "false")]
        pretty: bool,
    },

    /// Print a home/away comparison table
    Summary {
        /// Input JSON file (events and rosters)
        #[arg(long)]
        input: PathBuf,

        /// JSON config file, overrides MATCH_STATS_CONFIG
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let output = run(cli.command)?;
    println!("{}", output);
    Ok(())
}

fn run(command: Commands) -> Result<String> {
    match command {
        Commands::Aggregate { input, config, pretty } => {
            let mut request: AggregateRequest = read_json(&input)?;
            if let Some(path) = config {
                request.config = Some(load_config(&path)?);
            }
            let stats = aggregate_match(request)?;
            log::info!(
                "Aggregated {}: {} players",
                input.display(),
                stats.player_stats.len()
            );
            render(&StatsResponse::new(stats), pretty)
        }

        Commands::Segments { input, interval, duration, config, pretty } => {
            let mut request: SegmentsRequest = read_json(&input)?;
            request.segments = None;
            request.interval_minutes = Some(interval);
            request.match_duration_minutes = Some(duration);
            if let Some(path) = config {
                request.config = Some(load_config(&path)?);
            }
            let data = aggregate_segments(request)?;
            log::info!(
                "Aggregated {} into {} segments of {} minutes",
                input.display(),
                data.segments.len(),
                interval
            );
            render(&StatsResponse::new(data), pretty)
        }

        Commands::Summary { input, config } => {
            let mut request: AggregateRequest = read_json(&input)?;
            if let Some(path) = config {
                request.config = Some(load_config(&path)?);
            }
            let stats = aggregate_match(request)?;
            Ok(report::render_summary(&stats))
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn load_config(path: &Path) -> Result<AnalyticsConfig> {
    AnalyticsConfig::from_path(path)
        .with_context(|| format!("Failed to load config {}", path.display()))
}

fn render<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
