//! Rotation path pattern compilation and window tracking.

use chrono::{TimeZone, Utc};
use sinklog::sink::Component;
use sinklog::{Error, PathPattern};
use std::path::PathBuf;

#[test]
fn hourly_pattern_matches_manual_substitution() {
    let now = Utc.with_ymd_and_hms(2024, 3, 7, 9, 41, 5).unwrap();
    let pattern = PathPattern::compile("service.log.%Y%M%D%H", &now).unwrap();
    assert_eq!(
        pattern.current_path(),
        PathBuf::from(format!("service.log.{}{:02}{:02}{:02}", 2024, 3, 7, 9))
    );
    assert_eq!(
        pattern.components(),
        &[
            Component::Year,
            Component::Month,
            Component::Day,
            Component::Hour
        ]
    );
    assert_eq!(pattern.values(), &[2024, 3, 7, 9]);
}

#[test]
fn minute_component_is_padded() {
    let now = Utc.with_ymd_and_hms(2024, 12, 31, 23, 5, 0).unwrap();
    let pattern = PathPattern::compile("/var/log/%Y/%M/%D/app-%H%m.log", &now).unwrap();
    assert_eq!(
        pattern.current_path(),
        PathBuf::from("/var/log/2024/12/31/app-2305.log")
    );
}

#[test]
fn literal_pattern_never_advances() {
    let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut pattern = PathPattern::compile("archive.log", &t0).unwrap();
    assert!(pattern.is_literal());
    let t1 = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    assert_eq!(pattern.advance(&t1), None);
}

#[test]
fn advance_within_window_is_noop() {
    let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
    let mut pattern = PathPattern::compile("app.%Y%M%D%H", &t0).unwrap();
    let later = Utc.with_ymd_and_hms(2024, 1, 1, 10, 59, 59).unwrap();
    assert_eq!(pattern.advance(&later), None);
    assert_eq!(pattern.values(), &[2024, 1, 1, 10]);
}

#[test]
fn advance_across_hour_returns_previous_window() {
    let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 10, 15, 0).unwrap();
    let mut pattern = PathPattern::compile("app.%Y%M%D%H", &t0).unwrap();
    let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 11, 0, 1).unwrap();
    assert_eq!(
        pattern.advance(&t1),
        Some(PathBuf::from("app.2024010110"))
    );
    assert_eq!(pattern.current_path(), PathBuf::from("app.2024010111"));
    assert_eq!(pattern.advance(&t1), None);
}

#[test]
fn advance_across_year_end() {
    let t0 = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 0).unwrap();
    let mut pattern = PathPattern::compile("app.%Y%M%D", &t0).unwrap();
    let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(pattern.advance(&t1), Some(PathBuf::from("app.20231231")));
}

#[test]
fn unknown_variable_is_rejected() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let err = PathPattern::compile("app.%Y%q", &now).unwrap_err();
    match err {
        Error::InvalidPattern { pattern, reason } => {
            assert_eq!(pattern, "app.%Y%q");
            assert!(reason.contains("%q"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn dangling_percent_is_rejected() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let err = PathPattern::compile("app.%Y%", &now).unwrap_err();
    assert!(err.to_string().contains("dangling"));
}
