//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Hub Exporter - pipe-fed delivery engine for a piveau hub
#[derive(Parser, Debug)]
#[command(
    name = "hub-exporter",
    author,
    version,
    about = "Delivers pipeline payloads to a catalogue hub",
    long_about = "Accepts pipeline payloads over HTTP, classifies them, and applies them \n\
                  to a remote catalogue hub: dataset descriptions and metrics graphs are \n\
                  upserted idempotently, identifier lists drive a best-effort deletion sweep."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "HUB_EXPORTER_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "HUB_EXPORTER_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the exporting service
    Serve(ServeArgs),

    /// Resolve and validate configuration without serving
    Validate(ValidateArgs),
}

/// Arguments for the `serve` command
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Path to configuration file (TOML or JSON); environment still wins
    #[arg(short, long, env = "HUB_EXPORTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Port of the inbound pipe endpoint
    #[arg(long, default_value = "8080", env = "HUB_EXPORTER_PORT")]
    pub port: u16,

    /// Queue capacity between the pipe endpoint and the dispatcher
    #[arg(long, default_value = "100", env = "HUB_EXPORTER_QUEUE_CAPACITY")]
    pub queue_capacity: usize,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "9000", env = "HUB_EXPORTER_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output the resolved configuration as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
