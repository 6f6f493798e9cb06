#![no_main]

use libfuzzer_sys::fuzz_target;
use poptip::{TooltipOptions, deep_merge};
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Malformed or mistyped input is an error, never a panic.
    let _ = TooltipOptions::from_json_str(text);

    let Ok(overlay) = serde_json::from_str::<Value>(text) else {
        return;
    };
    let mut merged = TooltipOptions::defaults_json();
    deep_merge(&mut merged, overlay.clone());

    // Merging the same layer again changes nothing.
    let mut twice = merged.clone();
    deep_merge(&mut twice, overlay);
    assert_eq!(merged, twice);
});
