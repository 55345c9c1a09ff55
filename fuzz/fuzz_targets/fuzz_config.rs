#![no_main]
use libfuzzer_sys::fuzz_target;
use sinklog::Config;

fuzz_target!(|data: &str| {
    // Parsing and mapping arbitrary input must fail cleanly, never panic
    for config in [Config::from_toml_str(data), Config::from_json_str(data)]
        .into_iter()
        .flatten()
    {
        let _ = config.parse_level();
        let _ = config.intervals();
        let _ = sinklog::logger::file_sinks(&config);
    }
});
