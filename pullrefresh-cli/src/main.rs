//! ptr-replay
//!
//! Drives the pull-refresh core from scripted gestures and prints what the
//! pull-refresh root and the host would have seen.

mod commands;
mod config;
mod logging;
mod output;
mod recorder;
mod script;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::logging::LoggingConfig;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output format (table, json, yaml)
    #[arg(short, long)]
    output: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a gesture script against the core
    Run {
        /// Script file (.toml or .json)
        script: std::path::PathBuf,
        /// Time to keep running after the last step, in ms
        #[arg(long)]
        settle_ms: Option<u64>,
    },
    /// Show which native events would be bound
    Events {
        /// Event names the environment supports (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        supports: Vec<String>,
    },
    /// Resolve host attributes into options
    Options {
        /// Attributes as key=value
        attributes: Vec<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    LoggingConfig {
        level: cli.log_level.clone().unwrap_or_else(|| config.log_level.clone()),
        json_format: cli.log_json,
    }
    .init()?;

    let format = OutputFormat::from_str(cli.output.as_deref().unwrap_or(&config.default_output));

    match cli.command {
        Commands::Run { script, settle_ms } => {
            let settle_ms = settle_ms.unwrap_or(config.settle_ms);
            commands::run::run(&script, settle_ms, format).await?;
        }
        Commands::Events { supports } => {
            commands::events::events(&supports, format)?;
        }
        Commands::Options { attributes } => {
            commands::options::options(&attributes, format)?;
        }
    }

    Ok(())
}
