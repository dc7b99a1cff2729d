//! Input sampler — folds periodic input readings into an [`InputState`].
//!
//! ## Derivation rule
//!
//! For every input, the current reading is compared with the reading from
//! the previous cycle:
//!
//! | previous | current | effect on bit `index`        | remembered level |
//! |----------|---------|------------------------------|------------------|
//! | low      | low     | unchanged                    | low              |
//! | low      | high    | unchanged                    | high             |
//! | high     | low     | unchanged                    | low              |
//! | high     | high    | **toggled**                  | high             |
//!
//! An input held high therefore flips its bit on every cycle it stays
//! high: the derived state free-runs rather than latching.  This is the
//! behaviour deployed boards exhibit and it is kept as-is.
//!
//! The derived state is forwarded only when it differs from the last
//! forwarded value.

use embedded_hal::delay::DelayNs;

use crate::app::events::PlcEvent;
use crate::app::ports::{DigitalInputPort, EventSink};

use super::handoff::HandoffSender;
use super::state::InputState;
use super::table::{InputTable, MAX_CHANNELS};

/// Pure per-cycle state of the sampler.
#[derive(Debug, Clone)]
pub struct InputSampler {
    /// Level read on the previous cycle, by table position.
    prev: [bool; MAX_CHANNELS],
    derived: InputState,
    last_sent: InputState,
}

impl Default for InputSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSampler {
    /// All remembered levels low, derived and forwarded state empty.
    pub const fn new() -> Self {
        Self {
            prev: [false; MAX_CHANNELS],
            derived: InputState::EMPTY,
            last_sent: InputState::EMPTY,
        }
    }

    /// Read every input once and update the derived state.
    ///
    /// Returns the new state if it differs from the last one returned,
    /// which is then recorded as forwarded.
    pub fn scan(
        &mut self,
        inputs: &InputTable,
        port: &mut impl DigitalInputPort,
    ) -> Option<InputState> {
        for (slot, channel) in inputs.iter().enumerate() {
            let cur = port.read_level(channel);
            if cur == self.prev[slot] {
                if cur {
                    self.derived.toggle(channel.index);
                }
            } else {
                self.prev[slot] = cur;
            }
        }

        if self.derived == self.last_sent {
            return None;
        }
        self.last_sent = self.derived;
        Some(self.derived)
    }

    pub fn derived(&self) -> InputState {
        self.derived
    }

    pub fn last_sent(&self) -> InputState {
        self.last_sent
    }
}

/// The long-running sampler task: scan, forward on change, sleep.
pub struct SamplerTask<P, D, S> {
    sampler: InputSampler,
    inputs: InputTable,
    port: P,
    tx: HandoffSender,
    delay: D,
    sink: S,
    period_ms: u32,
}

impl<P, D, S> SamplerTask<P, D, S>
where
    P: DigitalInputPort,
    D: DelayNs,
    S: EventSink,
{
    pub fn new(
        inputs: InputTable,
        port: P,
        tx: HandoffSender,
        delay: D,
        sink: S,
        period_ms: u32,
    ) -> Self {
        Self {
            sampler: InputSampler::new(),
            inputs,
            port,
            tx,
            delay,
            sink,
            period_ms,
        }
    }

    /// One sampling cycle without the trailing sleep.  Blocks while the
    /// handoff slot is still occupied.
    pub fn step(&mut self) -> Option<InputState> {
        let changed = self.sampler.scan(&self.inputs, &mut self.port)?;
        self.sink.emit(&PlcEvent::InputStateChanged(changed));
        self.tx.send(changed);
        Some(changed)
    }

    /// Never returns.
    pub fn run(mut self) {
        loop {
            self.step();
            self.delay.delay_ms(self.period_ms);
        }
    }

    pub fn sampler(&self) -> &InputSampler {
        &self.sampler
    }
}
