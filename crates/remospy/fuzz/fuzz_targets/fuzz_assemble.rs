//! Fuzz target: reconstruct arbitrary captured calls.
//!
//! The input is a JSON `CapturedCall`. A pass never fails, so any panic is a bug.

#![no_main]

use libfuzzer_sys::fuzz_target;

use remospy::{CapturedCall, GenerationSettings, render_call};

fuzz_target!(|data: &[u8]| {
    if data.len() > 16_384 {
        return;
    }
    let Ok(call) = serde_json::from_slice::<CapturedCall>(data) else {
        return;
    };

    for settings in [GenerationSettings::default(), GenerationSettings::by_path()] {
        let text = render_call(&call, &settings);
        assert!(!text.is_empty());
    }
});
