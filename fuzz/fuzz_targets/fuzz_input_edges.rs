//! Fuzz target: debounced operator inputs
//!
//! Replays an arbitrary stream of `(input, gap)` edges through
//! `InputEventSource` and verifies:
//! - No panics, including across the `u32` millisecond wrap
//! - Accepted edges on one input are never closer than the quiet interval
//! - The hazard flag equals the parity of accepted hazard edges
//!
//! cargo fuzz run fuzz_input_edges

#![no_main]

use firewatch::inputs::{InputEventSource, InputId};
use firewatch::status::SharedStatus;
use libfuzzer_sys::fuzz_target;

const QUIET_MS: u32 = 200;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let status = SharedStatus::new();
    let inputs = InputEventSource::new(&status, QUIET_MS);

    // Start near the wrap point so both halves get exercised.
    let mut now = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let mut last: [Option<u32>; 4] = [None; 4];
    let mut hazard_edges = 0u32;

    for pair in data[4..].chunks_exact(2) {
        let idx = usize::from(pair[0] % 4);
        let input = InputId::ALL[idx];
        now = now.wrapping_add(u32::from(pair[1]) * 4);

        if inputs.on_edge(input, now).is_some() {
            if let Some(prev) = last[idx] {
                assert!(now.wrapping_sub(prev) >= QUIET_MS, "edge accepted inside quiet interval");
            }
            last[idx] = Some(now);
            if input == InputId::Hazard {
                hazard_edges += 1;
            }
        }
    }

    assert_eq!(status.hazard(), hazard_edges % 2 == 1);
});
