//! Command-line interface for the `sinklog` binary.

pub mod commands;

use crate::config::Config;
use crate::level::Level;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Level argument; accepts the same names as config files.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[value(alias = "warning")]
    Warn,
    #[value(alias = "err")]
    Error,
    Fatal,
    Public,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::Trace,
            LogLevel::Debug => Self::Debug,
            LogLevel::Info => Self::Info,
            LogLevel::Warn => Self::Warn,
            LogLevel::Error => Self::Error,
            LogLevel::Fatal => Self::Fatal,
            LogLevel::Public => Self::Public,
        }
    }
}

/// sinklog - write, check and prune logs from the command line.
#[derive(Parser)]
#[command(name = "sinklog", version, about = "Write, check and prune logs")]
pub struct Cli {
    /// Config file (TOML, or JSON by extension); defaults to the user config dir
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Emit one structured record through the configured sinks.
    Log {
        #[arg(value_enum)]
        level: LogLevel,
        message: String,
        /// Trailing `key=value` fields
        fields: Vec<String>,
    },
    /// Validate the config and print the sinks it resolves to.
    Check,
    /// Run one retention pass over every configured file sink.
    Prune,
}

/// Explicit path if given, the default location otherwise.
///
/// # Errors
/// Read or parse failures.
pub fn load_config(path: Option<&Path>) -> Result<Config, crate::Error> {
    path.map_or_else(Config::load, Config::load_from)
}

pub use commands::{cmd_check, cmd_log, cmd_prune};
