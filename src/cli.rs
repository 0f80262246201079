// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `pplc`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pplc",
    version,
    about = "Compile a pipeline document into a resolved timing model.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the pipeline document (`.ppl`).
    #[arg(value_name = "FILE")]
    pub input: String,

    /// Fail on dependency cycles, dangling prerequisites and events on
    /// unscheduled tasks, instead of silently leaving tasks out of the
    /// schedule.
    #[arg(long)]
    pub strict: bool,

    /// Compile and report a one-line summary, but emit no model.
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for the resolved model.
    #[arg(long, value_enum, value_name = "FORMAT", default_value = "text")]
    pub format: OutputFormat,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PPLC_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// How the resolved model is printed on stdout.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable task/event/period listing.
    Text,
    /// The full resolved model as pretty-printed JSON.
    Json,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
