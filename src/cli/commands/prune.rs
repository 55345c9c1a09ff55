//! `sinklog prune`: one retention pass, outside any running logger.

use crate::config::Config;
use crate::internal;
use crate::logger::file_sinks;
use crate::sink::{Capabilities, Sink};
use std::process::ExitCode;
use std::time::SystemTime;

#[must_use]
pub fn cmd_prune(config: &Config) -> ExitCode {
    let sinks = match file_sinks(config) {
        Ok(sinks) => sinks,
        Err(e) => {
            internal::error("PRUNE", &e.to_string());
            return ExitCode::FAILURE;
        }
    };

    let now = SystemTime::now();
    let mut status = ExitCode::SUCCESS;
    let mut total = 0;
    for sink in sinks
        .iter()
        .filter(|s| s.capabilities().contains(Capabilities::DELETE))
    {
        match sink.delete_at(now) {
            Ok(report) => {
                for path in &report.deleted {
                    println!("deleted {}", path.display());
                }
                for (path, e) in &report.failed {
                    internal::warn("PRUNE", &format!("{}: {e}", path.display()));
                }
                total += report.count();
            }
            Err(e) => {
                internal::error("PRUNE", &format!("{}: {e}", sink.name()));
                status = ExitCode::FAILURE;
            }
        }
    }
    println!("{total} files removed");
    status
}
