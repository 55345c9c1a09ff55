#![no_main]
use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;
use sinklog::PathPattern;

fuzz_target!(|data: &str| {
    let t0 = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 0).unwrap();
    let Ok(mut pattern) = PathPattern::compile(data, &t0) else {
        return;
    };
    let _ = pattern.current_path();

    // Crossing every component at once must yield the previous window exactly once
    let t1 = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let first = pattern.advance(&t1);
    assert_eq!(first.is_some(), !pattern.is_literal());
    assert!(pattern.advance(&t1).is_none());
});
