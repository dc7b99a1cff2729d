//! Fuzz target: sampler + evaluator over arbitrary input histories
//!
//! The first byte picks how many board inputs are wired (1..=8), every
//! following byte is one scan's input levels.  Verifies:
//! - No panics for any level sequence
//! - Forwarded states never repeat back-to-back
//! - Derived bits stay inside the input table's mask
//! - Evaluated levels only use output positions that exist
//!
//! cargo fuzz run fuzz_sampler

#![no_main]

use libfuzzer_sys::fuzz_target;
use miniplc::app::ports::DigitalInputPort;
use miniplc::plc::board;
use miniplc::plc::evaluator::evaluate;
use miniplc::plc::sampler::InputSampler;
use miniplc::plc::table::{InputChannel, InputTable};

struct Bits(u8);

impl DigitalInputPort for Bits {
    fn read_level(&mut self, channel: &InputChannel) -> bool {
        self.0 & (1 << channel.index) != 0
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((&width, scans)) = data.split_first() else {
        return;
    };
    let n = usize::from(width % 8) + 1;
    let channels: Vec<InputChannel> = (0..n as u8)
        .map(|i| InputChannel::new(i, i32::from(i)))
        .collect();
    let Ok(inputs) = InputTable::try_new(&channels) else {
        return;
    };
    let outputs = board::init_outputs();

    let mut sampler = InputSampler::new();
    let mut last = None;
    for &levels in scans {
        if let Some(s) = sampler.scan(&inputs, &mut Bits(levels)) {
            assert_ne!(Some(s), last, "forwarded the same state twice");
            assert_eq!(s.bits() & !inputs.mask(), 0);
            last = Some(s);

            let out = evaluate(&outputs, s);
            assert_eq!(out.bits() & 0xF0, 0, "board has four outputs");
        }
    }
});
