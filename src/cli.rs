// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `workpool`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "workpool",
    version,
    about = "Simulate a bounded pool of workers draining a queue of fixed-duration tasks.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Workpool.toml` in the current working directory. If the
    /// default file does not exist, built-in defaults are used.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Number of workers to add at startup (overrides `[pool].initial_workers`).
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Number of tasks to enqueue at startup (overrides `[pool].initial_tasks`).
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub tasks: Option<i64>,

    /// Exit once every task has completed.
    #[arg(long)]
    pub once: bool,

    /// Do not read commands from stdin.
    #[arg(long)]
    pub no_console: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WORKPOOL_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate config, print it, but don't start the pool.
    #[arg(long)]
    pub dry_run: bool,
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
