//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and shared types.
//! Individual command definitions are in the `commands` module.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::Level;

use crate::commands::Command;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the JSON configuration file
    ///
    /// If not specified, `.schemagen.json` in the current directory is used
    /// when it exists.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Diagnostics written to stderr
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

/// Verbosity of the stderr log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_global_defaults() {
        let args = Args::try_parse_from(["schemagen", "presets"]).unwrap();
        assert_eq!(args.config, None);
        assert_eq!(args.format, OutputFormat::Table);
        assert_eq!(args.log_level, LogLevel::Warn);
    }

    #[rstest]
    fn test_global_options_after_subcommand() {
        let args = Args::try_parse_from([
            "schemagen",
            "tables",
            "--config",
            "ci.json",
            "-o",
            "toon",
            "--log-level",
            "trace",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("ci.json")));
        assert_eq!(args.format, OutputFormat::Toon);
        assert_eq!(args.log_level, LogLevel::Trace);
    }

    #[rstest]
    #[case(LogLevel::Error, Level::ERROR)]
    #[case(LogLevel::Info, Level::INFO)]
    #[case(LogLevel::Trace, Level::TRACE)]
    fn test_log_level_conversion(#[case] level: LogLevel, #[case] expected: Level) {
        assert_eq!(Level::from(level), expected);
    }
}
