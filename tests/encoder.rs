//! Line layout produced by the record encoder.

use chrono::{Local, TimeZone};
use sinklog::fmt::{Body, Record};
use sinklog::{Encoder, Field, Level, Value};

fn record<'a>(level: Level, body: Body<'a>) -> Record<'a> {
    Record {
        time: Local.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).single().unwrap(),
        level,
        file: "/home/dev/project/src/handler.rs",
        line: 42,
        body,
    }
}

fn encode(encoder: &Encoder, record: &Record<'_>) -> String {
    let mut out = Vec::new();
    encoder.encode(record, &mut out);
    String::from_utf8(out).unwrap()
}

#[test]
fn prefix_has_time_label_and_base_name() {
    let encoder = Encoder::new("%Y-%m-%d %H:%M:%S").unwrap();
    let line = encode(
        &encoder,
        &record(
            Level::Info,
            Body::Template {
                template: "service started",
                args: &[],
            },
        ),
    );
    assert_eq!(
        line,
        "[2024-05-01 10:30:00] [INFO] [handler.rs:42] service started\n"
    );
}

#[test]
fn default_layout_has_millis_and_offset() {
    let line = encode(
        &Encoder::default(),
        &record(
            Level::Debug,
            Body::Template {
                template: "x",
                args: &[],
            },
        ),
    );
    assert!(line.starts_with("[2024-05-01T10:30:00.000"));
    assert!(line.contains("] [DEBUG] [handler.rs:42] x\n"));
}

#[test]
fn template_arguments_are_substituted() {
    let encoder = Encoder::new("%Y").unwrap();
    let args = [Value::from("/data"), Value::from(93_u8)];
    let line = encode(
        &encoder,
        &record(
            Level::Error,
            Body::Template {
                template: "disk full on {0} ({1}% used)",
                args: &args,
            },
        ),
    );
    assert_eq!(
        line,
        "[2024] [ERROR] [handler.rs:42] disk full on /data (93% used)\n"
    );
}

#[test]
fn template_without_arguments_is_verbatim() {
    let encoder = Encoder::new("%Y").unwrap();
    let line = encode(
        &encoder,
        &record(
            Level::Warn,
            Body::Template {
                template: "payload {\"id\": {}}",
                args: &[],
            },
        ),
    );
    assert_eq!(line, "[2024] [WARN] [handler.rs:42] payload {\"id\": {}}\n");
}

#[test]
fn fields_use_space_separator() {
    let encoder = Encoder::new("%Y").unwrap();
    let fields = [
        Field::string("user", "ana"),
        Field::int("attempt", -2),
        Field::bool("ok", false),
        Field::float64("ratio", 0.25),
    ];
    let line = encode(
        &encoder,
        &record(
            Level::Info,
            Body::Fields {
                message: "login",
                fields: &fields,
            },
        ),
    );
    assert_eq!(
        line,
        "[2024] [INFO] [handler.rs:42] login user=ana attempt=-2 ok=false ratio=0.25\n"
    );
}

#[test]
fn public_fields_use_double_bar() {
    let encoder = Encoder::new("%Y").unwrap();
    let fields = [Field::string("order", "A17"), Field::uint("amount", 300)];
    let line = encode(
        &encoder,
        &record(
            Level::Public,
            Body::Fields {
                message: "paid",
                fields: &fields,
            },
        ),
    );
    assert_eq!(
        line,
        "[2024] [PUBLIC] [handler.rs:42] paid||order=A17||amount=300\n"
    );
}

#[test]
fn structured_flag_follows_body() {
    let fields = [Field::bool("a", true)];
    let structured = record(
        Level::Info,
        Body::Fields {
            message: "m",
            fields: &fields,
        },
    );
    let plain = record(
        Level::Info,
        Body::Template {
            template: "m",
            args: &[],
        },
    );
    assert!(structured.is_structured());
    assert!(!plain.is_structured());
}

#[test]
fn unknown_layout_specifier_is_rejected() {
    let err = Encoder::new("%Y-%J").unwrap_err();
    assert!(matches!(err, sinklog::Error::InvalidLayout(_)));
}
