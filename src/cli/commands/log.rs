//! `sinklog log <level> <message> [key=value...]`

use crate::config::Config;
use crate::fmt::Field;
use crate::internal;
use crate::level::Level;
use crate::logger::Logger;
use std::process::ExitCode;

/// Splits `key=value` arguments at the first `=`. An argument without one becomes a key with an
/// empty value.
#[must_use]
pub fn parse_fields(args: &[String]) -> Vec<(&str, &str)> {
    args.iter()
        .map(|arg| arg.split_once('=').unwrap_or((arg.as_str(), "")))
        .collect()
}

#[must_use]
pub fn cmd_log(config: &Config, level: Level, message: &str, args: &[String]) -> ExitCode {
    let logger = match Logger::from_config(config) {
        Ok(logger) => logger,
        Err(e) => {
            internal::error("CLI", &format!("Failed to build logger: {e}"));
            return ExitCode::FAILURE;
        }
    };
    if !logger.enabled(level) {
        internal::info(
            "CLI",
            &format!("{level} is below the configured level {}", logger.level()),
        );
    }

    let pairs = parse_fields(args);
    let fields: Vec<Field<'_>> = pairs
        .iter()
        .map(|&(key, value)| Field::string(key, value))
        .collect();
    logger.log_fields(level, message, &fields);
    logger.close();
    ExitCode::SUCCESS
}
