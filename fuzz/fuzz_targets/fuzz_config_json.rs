//! Fuzz target: `MonitorConfig` JSON decoding + validation
//!
//! Feeds arbitrary bytes to the serde_json decoder and checks that:
//! - Decoding and `validate()` never panic
//! - Every config that validates builds a `MonitorService`
//! - `report_every_ticks()` is never zero for a valid config
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use firewatch::app::service::MonitorService;
use firewatch::config::MonitorConfig;
use firewatch::status::SharedStatus;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(config) = serde_json::from_slice::<MonitorConfig>(data) else {
        return;
    };
    if config.validate().is_err() {
        return;
    }

    assert!(config.report_every_ticks() >= 1);

    let status = SharedStatus::new();
    assert!(MonitorService::new(config, &status).is_ok());
});
