//! `sinklog` binary.
//!
//! Usage:
//!   sinklog log <level> <message> [key=value...]   Emit one structured record
//!   sinklog check                                  Validate config, list resolved sinks
//!   sinklog prune                                  Delete expired files now
//!   sinklog --config <path> <command>              Use an explicit config file

use clap::Parser;
use sinklog::cli::{Cli, Command, cmd_check, cmd_log, cmd_prune, load_config};
use sinklog::internal;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            return ExitCode::FAILURE;
        }
    };
    internal::init_with_config(&config);

    match cli.command {
        Command::Log {
            level,
            message,
            fields,
        } => cmd_log(&config, level.into(), &message, &fields),
        Command::Check => cmd_check(&config),
        Command::Prune => cmd_prune(&config),
    }
}
