// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `binherd`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "binherd",
    version,
    about = "Supervise a configured set of helper binaries.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `binherd.toml` in the current working directory. The
    /// `BINHERD_CONFIG` environment variable takes precedence over this flag.
    #[arg(long, value_name = "PATH", default_value = "binherd.toml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `BINHERD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the resolved launch plan, but don't start
    /// anything.
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
