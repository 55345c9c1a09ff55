//! `sinklog check`: resolve the config without opening anything.

use crate::config::Config;
use crate::fmt::Encoder;
use crate::internal;
use crate::logger::file_sinks;
use crate::sink::{Capabilities, Sink};
use std::process::ExitCode;

#[must_use]
pub fn cmd_check(config: &Config) -> ExitCode {
    let mut ok = true;

    match config.try_parse_level() {
        Ok(level) => println!("level            {level}"),
        Err(e) => {
            internal::error("CHECK", &e.to_string());
            ok = false;
        }
    }
    match Encoder::new(config.general.timestamp_format.as_str()) {
        Ok(encoder) => println!("timestamp        {}", encoder.layout()),
        Err(e) => {
            internal::error("CHECK", &e.to_string());
            ok = false;
        }
    }
    println!("queue capacity   {}", config.general.queue_capacity.max(1));
    let intervals = config.intervals();
    println!(
        "intervals        flush={:?} rotate={:?} delete={:?}",
        intervals.flush, intervals.rotate, intervals.delete
    );

    match file_sinks(config) {
        Ok(sinks) => {
            for sink in &sinks {
                let band = sink.level_band();
                let caps = sink.capabilities();
                println!(
                    "{:<16} {}..={} rotate={} delete={}",
                    sink.name(),
                    band.floor,
                    band.ceil,
                    sink.pattern().map_or("-", |p| p.source()),
                    caps.contains(Capabilities::DELETE),
                );
                if let Some(pattern) = sink.pattern() {
                    println!("{:<16} archives to {}", "", pattern.current_path().display());
                }
            }
        }
        Err(e) => {
            internal::error("CHECK", &e.to_string());
            ok = false;
        }
    }
    if config.console.enabled {
        println!("console          colors={}", config.console.colors);
    }

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
