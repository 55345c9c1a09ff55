#![no_main]
use libfuzzer_sys::fuzz_target;
use sinklog::Value;
use sinklog::fmt::template;

fuzz_target!(|data: &str| {
    // Without arguments the template is copied verbatim
    assert_eq!(template::render(data, &[]), data);

    // Must not panic on any template string
    let args = [Value::from("a"), Value::from(-1_i64), Value::from(2.5_f64)];
    let _ = template::render(data, &args);
});
