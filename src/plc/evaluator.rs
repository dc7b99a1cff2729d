//! Output evaluator — maps each received [`InputState`] onto output levels.
//!
//! Per output `o` and state `s`:
//!
//! ```text
//! all_bits = o.mode == AllBits && (o.mask & s) == o.mask
//! any_bit  = o.mode == AnyBit  && (o.mask | s) != 0 && s != 0
//! active   = all_bits || any_bit
//! ```
//!
//! The `o.mask | s` term of the AnyBit rule can never decide the result on
//! its own (`s != 0` already implies it), so AnyBit outputs follow "any
//! input active" whatever their mask says.

use embedded_hal::delay::DelayNs;

use crate::app::events::PlcEvent;
use crate::app::ports::{DigitalOutputPort, EventSink};

use super::handoff::HandoffReceiver;
use super::state::{InputState, OutputLevels};
use super::table::{OutputChannel, OutputTable, RuleMode};

/// Decide the level of one output for state `s`.
pub fn output_active(output: &OutputChannel, s: InputState) -> bool {
    let s = s.bits();
    let all_bits = output.mode == RuleMode::AllBits && (output.mask & s) == output.mask;
    let any_bit = output.mode == RuleMode::AnyBit && (output.mask | s) != 0 && s != 0;
    all_bits || any_bit
}

/// Levels every output would take for `s`, without touching hardware.
pub fn evaluate(outputs: &OutputTable, s: InputState) -> OutputLevels {
    let mut levels = OutputLevels::default();
    for o in outputs.iter() {
        levels.set(o.index, output_active(o, s));
    }
    levels
}

/// Evaluate and drive every output, in index order.
pub fn apply(
    outputs: &OutputTable,
    s: InputState,
    port: &mut impl DigitalOutputPort,
) -> OutputLevels {
    let mut levels = OutputLevels::default();
    for o in outputs.iter() {
        let active = output_active(o, s);
        port.write_level(o, active);
        levels.set(o.index, active);
    }
    levels
}

/// The long-running evaluator task: wait, apply, settle.
pub struct EvaluatorTask<P, D, S> {
    outputs: OutputTable,
    port: P,
    rx: HandoffReceiver,
    delay: D,
    sink: S,
    settle_ms: u32,
}

impl<P, D, S> EvaluatorTask<P, D, S>
where
    P: DigitalOutputPort,
    D: DelayNs,
    S: EventSink,
{
    pub fn new(
        outputs: OutputTable,
        port: P,
        rx: HandoffReceiver,
        delay: D,
        sink: S,
        settle_ms: u32,
    ) -> Self {
        Self {
            outputs,
            port,
            rx,
            delay,
            sink,
            settle_ms,
        }
    }

    /// Block for the next state and drive all outputs for it.
    pub fn step(&mut self) -> OutputLevels {
        let state = self.rx.receive();
        let levels = apply(&self.outputs, state, &mut self.port);
        self.sink.emit(&PlcEvent::OutputsApplied { state, levels });
        levels
    }

    /// Never returns.
    pub fn run(mut self) {
        loop {
            self.step();
            self.delay.delay_ms(self.settle_ms);
        }
    }
}
