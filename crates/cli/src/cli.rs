//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use contracts::{Attr, Level, Value};
use std::path::PathBuf;

use crate::error::CliError;

/// fanlog - compose log handlers from configuration and fan records out to all of them
#[derive(Parser, Debug)]
#[command(
    name = "fanlog",
    author,
    version,
    about = "Fan-out structured logging",
    long_about = "Builds a composite log handler from a TOML/JSON configuration.\n\n\
                  Every record is delivered to each configured handler that is \n\
                  enabled for its level; failures are collected per handler."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "FANLOG_VERBOSE")]
    pub verbose: u8,

    /// Suppress all diagnostics except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Diagnostic log format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "FANLOG_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default diagnostic level derived from `-v` / `-q`
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a configuration file
    Validate(ValidateArgs),

    /// Display the configured handlers and the composite shape
    Info(InfoArgs),

    /// Build the configured handlers and log one record through them
    Emit(EmitArgs),
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "logging.toml", env = "FANLOG_CONFIG")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "logging.toml", env = "FANLOG_CONFIG")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `emit` command
#[derive(Parser, Debug)]
pub struct EmitArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "logging.toml", env = "FANLOG_CONFIG")]
    pub config: PathBuf,

    /// Record level (debug, info, warn, error, or an offset such as warn+2)
    #[arg(short, long, default_value = "info")]
    pub level: Level,

    /// Record message
    #[arg(short, long)]
    pub message: String,

    /// Record attribute as key=value (repeatable)
    #[arg(short = 'a', long = "attr", value_parser = parse_attr)]
    pub attrs: Vec<Attr>,

    /// Open a group around the record attributes
    #[arg(short, long)]
    pub group: Option<String>,
}

/// Diagnostic log format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => observability::LogFormat::Json,
            LogFormat::Pretty => observability::LogFormat::Pretty,
            LogFormat::Compact => observability::LogFormat::Compact,
        }
    }
}

/// Parse `key=value`; integers, floats and booleans keep their type
pub fn parse_attr(input: &str) -> Result<Attr, CliError> {
    let (key, raw) = input
        .split_once('=')
        .ok_or_else(|| CliError::invalid_attr(input, "expected key=value"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::invalid_attr(input, "key cannot be empty"));
    }

    let value = if let Ok(v) = raw.parse::<i64>() {
        Value::Int(v)
    } else if let Ok(v) = raw.parse::<f64>() {
        Value::Float(v)
    } else if let Ok(v) = raw.parse::<bool>() {
        Value::Bool(v)
    } else {
        Value::String(raw.to_string())
    };
    Ok(Attr::new(key, value))
}
