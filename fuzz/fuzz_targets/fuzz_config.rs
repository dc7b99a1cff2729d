//! Fuzz target: `PlcConfig::from_json`
//!
//! Arbitrary bytes through the JSON config loader.  Verifies:
//! - No panics on malformed UTF-8 or JSON
//! - Every accepted config passes `validate()`
//!
//! cargo fuzz run fuzz_config

#![no_main]

use libfuzzer_sys::fuzz_target;
use miniplc::config::PlcConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = PlcConfig::from_json(text) {
        assert!(config.validate().is_ok());
        assert!(config.sample_period_ms > 0);
        assert!(config.settle_period_ms > 0);
    }
});
