//! CLI argument definitions for the CSV normalizer.
//!
//! The normalizer itself takes no options; every flag here only controls
//! diagnostics logging.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "csv-normalizer",
    version,
    about = "Normalize CSV rows from stdin to stdout",
    long_about = "Normalize CSV rows read from stdin and write them to stdout.\n\n\
                  Timestamps are converted from US/Pacific to US/Eastern ISO 8601,\n\
                  ZIP codes are zero-filled, names upper-cased and durations\n\
                  converted to seconds. Invalid rows are skipped and reported on stderr."
)]
pub struct Cli {
    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Include field values (names, addresses) in trace logs.
    #[arg(long = "log-data")]
    pub log_data: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_is_the_normal_invocation() {
        let cli = Cli::try_parse_from(["csv-normalizer"]).expect("parse");
        assert!(!cli.verbosity.is_present());
        assert!(cli.log_level.is_none());
        assert_eq!(cli.log_format, LogFormatArg::Pretty);
        assert!(cli.log_file.is_none());
        assert!(!cli.log_data);
    }

    #[test]
    fn test_logging_flags() {
        let cli = Cli::try_parse_from([
            "csv-normalizer",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "--log-file",
            "normalizer.log",
            "--log-data",
        ])
        .expect("parse");
        assert_eq!(cli.log_level, Some(LogLevelArg::Debug));
        assert_eq!(cli.log_format, LogFormatArg::Json);
        assert_eq!(cli.log_file, Some(PathBuf::from("normalizer.log")));
        assert!(cli.log_data);
    }

    #[test]
    fn test_positional_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["csv-normalizer", "input.csv"]).is_err());
    }
}
