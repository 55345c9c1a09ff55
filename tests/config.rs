//! Config parsing and the sinks a config resolves to.

use sinklog::config::expand_path;
use sinklog::logger::file_sinks;
use sinklog::sink::Capabilities;
use sinklog::{Config, Level, LevelBand, Logger, Sink};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn empty_toml_gives_defaults() {
    let config = Config::from_toml_str("").unwrap();
    assert_eq!(config.parse_level(), Level::Debug);
    assert_eq!(config.general.queue_capacity, 1024);
    assert!(!config.file.enabled);
    assert_eq!(config.file.retention_secs, 604_800);
    assert!(config.console.enabled);
    let intervals = config.intervals();
    assert_eq!(intervals.flush, Duration::from_secs(1));
    assert_eq!(intervals.rotate, Duration::from_secs(10));
    assert_eq!(intervals.delete, Duration::from_secs(3600));
}

#[test]
fn toml_sections_parse() {
    let config = Config::from_toml_str(
        r#"
        [general]
        level = "warning"
        timestamp_format = "%H:%M:%S"
        queue_capacity = 64

        [file]
        enabled = true
        retention_secs = 3600
        path = "/var/log/app/app.log"
        rotate_path = "/var/log/app/app.log.%Y%M%D%H"
        root = "/var/log/app"
        compress = true

        [console]
        enabled = false

        [intervals]
        flush_ms = 250
        rotate_secs = 0
        "#,
    )
    .unwrap();

    assert_eq!(config.parse_level(), Level::Warn);
    assert_eq!(config.general.timestamp_format, "%H:%M:%S");
    assert_eq!(config.general.queue_capacity, 64);
    assert!(config.file.compress);
    assert!(!config.console.enabled);
    assert_eq!(config.intervals().flush, Duration::from_millis(250));
    assert!(config.intervals().rotate.is_zero());
    assert_eq!(config.intervals().delete, Duration::from_secs(3600));
}

#[test]
fn legacy_json_layout_parses() {
    let config = Config::from_json_str(
        r#"{
            "LogLevel": "info",
            "FileWriter": {
                "On": true,
                "DeleteCycle": 86400,
                "logPath": "/data/log/svc.log",
                "RotateLogPath": "/data/log/svc.log.%Y%M%D%H",
                "WfLogPath": "/data/log/svc.log.wf",
                "RotateWfLogPath": "/data/log/svc.log.wf.%Y%M%D%H",
                "PublicLogPath": "",
                "RotatePublicLogPath": "",
                "root": "/data/log"
            },
            "ConsoleWriter": { "On": false, "Color": true }
        }"#,
    )
    .unwrap();

    assert_eq!(config.parse_level(), Level::Info);
    assert!(config.file.enabled);
    assert_eq!(config.file.retention_secs, 86_400);
    assert_eq!(config.file.path.as_deref(), Some("/data/log/svc.log"));
    assert_eq!(config.file.root.as_deref(), Some("/data/log"));
    assert!(!config.console.enabled);
    assert!(config.console.colors);
}

#[test]
fn top_level_shorthand_wins() {
    let config = Config::from_toml_str(
        r#"
        level = "error"
        [general]
        level = "trace"
        "#,
    )
    .unwrap();
    assert_eq!(config.parse_level(), Level::Error);
}

#[test]
fn unknown_level_falls_back_or_errors() {
    let config = Config::from_toml_str("level = \"loud\"").unwrap();
    assert_eq!(config.parse_level(), Level::Debug);
    assert!(matches!(
        config.try_parse_level(),
        Err(sinklog::Error::InvalidLevel(name)) if name == "loud"
    ));
}

#[test]
fn malformed_files_are_errors() {
    assert!(matches!(
        Config::from_toml_str("[general\nlevel ="),
        Err(sinklog::Error::ConfigParse(_))
    ));
    assert!(matches!(
        Config::from_json_str("{\"LogLevel\": "),
        Err(sinklog::Error::ConfigJson(_))
    ));
}

#[test]
fn load_from_picks_format_by_extension() {
    let tmp = TempDir::new().unwrap();
    let json = tmp.path().join("log.json");
    fs::write(&json, r#"{"LogLevel": "fatal"}"#).unwrap();
    let toml = tmp.path().join("log.toml");
    fs::write(&toml, "level = \"public\"").unwrap();

    assert_eq!(Config::load_from(&json).unwrap().parse_level(), Level::Fatal);
    assert_eq!(Config::load_from(&toml).unwrap().parse_level(), Level::Public);
    assert!(Config::load_from(&tmp.path().join("missing.toml")).is_err());
}

#[test]
fn warning_file_narrows_main_band() {
    let config = Config::from_toml_str(
        r#"
        [file]
        enabled = true
        path = "/tmp/svc.log"
        warning_path = "/tmp/svc.log.wf"
        public_path = "/tmp/svc.log.pub"
        "#,
    )
    .unwrap();
    let sinks = file_sinks(&config).unwrap();
    let bands: Vec<LevelBand> = sinks.iter().map(|s| s.level_band()).collect();
    assert_eq!(
        bands,
        vec![
            LevelBand::new(Level::Trace, Level::Info),
            LevelBand::new(Level::Warn, Level::Fatal),
            LevelBand::new(Level::Public, Level::Public),
        ]
    );
}

#[test]
fn main_file_alone_takes_everything_but_public() {
    let config = Config::from_toml_str(
        r#"
        [file]
        enabled = true
        path = "/tmp/svc.log"
        "#,
    )
    .unwrap();
    let sinks = file_sinks(&config).unwrap();
    assert_eq!(sinks.len(), 1);
    assert_eq!(
        sinks[0].level_band(),
        LevelBand::new(Level::Trace, Level::Fatal)
    );
}

#[test]
fn retention_requires_root() {
    let config = Config::from_toml_str(
        r#"
        [file]
        enabled = true
        path = "/tmp/svc.log"
        rotate_path = "/tmp/svc.log.%Y%M%D%H"
        "#,
    )
    .unwrap();
    let caps = file_sinks(&config).unwrap()[0].capabilities();
    assert!(caps.contains(Capabilities::ROTATE));
    assert!(!caps.contains(Capabilities::DELETE));
}

#[test]
fn disabled_file_section_yields_no_sinks() {
    let config = Config::from_toml_str(
        r#"
        [file]
        path = "/tmp/svc.log"
        "#,
    )
    .unwrap();
    assert!(file_sinks(&config).unwrap().is_empty());
}

#[test]
fn bad_rotate_pattern_is_reported() {
    let config = Config::from_toml_str(
        r#"
        [file]
        enabled = true
        path = "/tmp/svc.log"
        rotate_path = "/tmp/svc.log.%Q"
        "#,
    )
    .unwrap();
    assert!(matches!(
        file_sinks(&config),
        Err(sinklog::Error::InvalidPattern { .. })
    ));
}

#[test]
fn logger_from_config_writes_files() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().display();
    let config = Config::from_toml_str(&format!(
        r#"
        level = "info"
        [file]
        enabled = true
        path = "{dir}/svc.log"
        warning_path = "{dir}/svc.log.wf"
        [console]
        enabled = false
        "#
    ))
    .unwrap();

    let logger = Logger::from_config(&config).unwrap();
    assert_eq!(logger.level(), Level::Info);
    logger.debug("filtered", &[]);
    logger.info("routine", &[]);
    logger.warn("odd", &[]);
    logger.close();

    let main = fs::read_to_string(tmp.path().join("svc.log")).unwrap();
    let wf = fs::read_to_string(tmp.path().join("svc.log.wf")).unwrap();
    assert_eq!(main.lines().count(), 1);
    assert!(main.contains("routine"));
    assert_eq!(wf.lines().count(), 1);
    assert!(wf.contains("[WARN]"));
}

#[test]
fn tilde_is_expanded() {
    let expanded = expand_path("~/logs");
    assert!(!expanded.to_string_lossy().starts_with('~'));
    assert!(expanded.ends_with("logs"));
}
