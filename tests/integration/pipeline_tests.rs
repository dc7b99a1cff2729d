//! Sampler → handoff → evaluator, stepped by hand on one thread.
//!
//! Each sampler step that forwards a state is followed by one evaluator
//! step, so the single-slot channel never blocks the test thread.

use crate::mock_hw::{NoDelay, RecordingOutputs, RecordingSink, SharedLevels};

use miniplc::app::events::PlcEvent;
use miniplc::plc::evaluator::{EvaluatorTask, evaluate};
use miniplc::plc::handoff;
use miniplc::plc::sampler::SamplerTask;
use miniplc::plc::state::InputState;
use miniplc::plc::table::{InputChannel, InputTable, OutputChannel, OutputTable, RuleMode};

type Sampler = SamplerTask<SharedLevels, NoDelay, RecordingSink>;
type Evaluator = EvaluatorTask<RecordingOutputs, NoDelay, RecordingSink>;

fn inputs() -> InputTable {
    InputTable::try_new(&[
        InputChannel::new(0, 0),
        InputChannel::new(1, 1),
        InputChannel::new(2, 2),
        InputChannel::new(3, 3),
    ])
    .unwrap()
}

/// Output 0: AllBits 0xF, 1: AllBits 0x1, 2: AllBits 0x9, 3: AnyBit 0xF.
fn outputs(inputs: &InputTable) -> OutputTable {
    OutputTable::try_new(
        &[
            OutputChannel::new(0, 0, RuleMode::AllBits, 0xF),
            OutputChannel::new(1, 1, RuleMode::AllBits, 0x1),
            OutputChannel::new(2, 2, RuleMode::AllBits, 0x9),
            OutputChannel::new(3, 3, RuleMode::AnyBit, 0xF),
        ],
        inputs,
    )
    .unwrap()
}

struct Rig {
    levels: SharedLevels,
    outs: RecordingOutputs,
    sink: RecordingSink,
    sampler: Sampler,
    evaluator: Evaluator,
}

fn rig() -> Rig {
    let levels = SharedLevels::default();
    let outs = RecordingOutputs::default();
    let sink = RecordingSink::default();
    let (tx, rx) = handoff::channel();
    let ins = inputs();
    let outputs = outputs(&ins);
    Rig {
        sampler: SamplerTask::new(ins, levels.clone(), tx, NoDelay, sink.clone(), 50),
        evaluator: EvaluatorTask::new(outputs, outs.clone(), rx, NoDelay, sink.clone(), 10),
        levels,
        outs,
        sink,
    }
}

impl Rig {
    /// One sampling cycle, plus an evaluation if a state was forwarded.
    fn cycle(&mut self) -> Option<InputState> {
        let sent = self.sampler.step();
        if sent.is_some() {
            self.evaluator.step();
        }
        sent
    }
}

#[test]
fn all_inputs_high_twice_lights_every_all_bits_output() {
    let mut rig = rig();
    rig.levels.set_bits(0b1111);

    assert_eq!(rig.cycle(), None, "first high sample is only remembered");
    assert_eq!(rig.cycle(), Some(InputState::from_bits(0b1111)));

    assert_eq!(rig.outs.level(0), Some(true), "mask 0xF");
    assert_eq!(rig.outs.level(1), Some(true), "mask 0x1");
    assert_eq!(rig.outs.level(2), Some(true), "mask 0x9");
    assert_eq!(rig.outs.level(3), Some(true), "AnyBit");
}

#[test]
fn only_input_one_high_lights_any_bit_but_not_mask_nine() {
    let mut rig = rig();
    rig.levels.set(1, true);

    rig.cycle();
    assert_eq!(rig.cycle(), Some(InputState::from_bits(0b0010)));

    assert_eq!(rig.outs.level(2), Some(false), "0x9 & 0b0010 != 0x9");
    assert_eq!(rig.outs.level(3), Some(true), "AnyBit follows nonzero state");
    assert_eq!(rig.outs.level(0), Some(false));
    assert_eq!(rig.outs.level(1), Some(false));
}

#[test]
fn no_input_ever_high_sends_nothing() {
    let levels = SharedLevels::default();
    let sink = RecordingSink::default();
    let (tx, rx) = handoff::channel();
    let ins = inputs();
    let outs = outputs(&ins);
    let mut sampler = SamplerTask::new(ins, levels, tx, NoDelay, sink.clone(), 50);

    for _ in 0..20 {
        assert_eq!(sampler.step(), None);
    }
    assert_eq!(rx.try_receive(), None, "nothing beyond the implicit 0 baseline");
    assert!(sink.forwarded().is_empty());

    let levels = evaluate(&outs, InputState::EMPTY);
    assert!(!levels.is_active(3), "AnyBit inactive on empty state");
    assert!(!levels.is_active(0));
    assert!(!levels.is_active(1));
    assert!(!levels.is_active(2));
}

#[test]
fn held_input_oscillates_and_outputs_follow() {
    let mut rig = rig();
    rig.levels.set(0, true);

    rig.cycle();
    let mut seen = Vec::new();
    for _ in 0..4 {
        seen.push(rig.cycle().map(InputState::bits));
    }
    assert_eq!(seen, [Some(0b0001), Some(0), Some(0b0001), Some(0)]);
    assert_eq!(rig.outs.level(1), Some(false), "last forwarded state was 0");
}

#[test]
fn release_keeps_last_derived_state() {
    let mut rig = rig();
    rig.levels.set(0, true);
    rig.cycle();
    assert_eq!(rig.cycle(), Some(InputState::from_bits(0b0001)));

    rig.levels.set(0, false);
    for _ in 0..5 {
        assert_eq!(rig.cycle(), None);
    }
    assert_eq!(rig.outs.level(1), Some(true), "output stays on after release");
}

#[test]
fn outputs_written_in_index_order_once_per_state() {
    let mut rig = rig();
    rig.levels.set_bits(0b0011);
    rig.cycle();
    rig.cycle();

    let order: Vec<u8> = rig.outs.writes().iter().map(|w| w.index).collect();
    assert_eq!(order, [0, 1, 2, 3]);
}

#[test]
fn every_forwarded_state_is_announced_then_applied() {
    let mut rig = rig();
    rig.levels.set_bits(0b0100);
    for _ in 0..4 {
        rig.cycle();
    }

    let events = rig.sink.events();
    let mut pending = None;
    for e in &events {
        match e {
            PlcEvent::InputStateChanged(s) => {
                assert!(pending.is_none(), "two states in flight: {:?}", events);
                pending = Some(*s);
            }
            PlcEvent::OutputsApplied { state, .. } => {
                assert_eq!(pending.take(), Some(*state));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
    assert_eq!(rig.sink.forwarded().len(), 3);
}
