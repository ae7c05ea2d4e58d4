mod analysis;
mod config;
mod error;
mod manager;
mod model;
mod report;
mod stats;

use crate::config::Config;
use crate::manager::Manager;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    /// Optional TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyses the metrics to generate a report
    AnalyseMetrics {
        /// The location of the input
        #[arg(long)]
        input: PathBuf,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let cfg = match &args.config {
        Some(file) => Config::from_file(file).context("failed to construct cfg")?,
        None => Config::default(),
    };
    log::info!("{cfg:#?}");

    let mgr = Manager::new(&cfg).context("failed to construct mgr")?;

    match args.command {
        Command::AnalyseMetrics { input, format } => {
            let result = mgr.analyze_file(input)?;
            match format {
                Format::Text => println!("{}", mgr.render(&result)),
                Format::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&result).context("failed to serialize result")?
                ),
            }
        }
    }

    Ok(())
}
