//! `PlcService::start` with real threads and mock adapters.

use std::time::{Duration, Instant};

use crate::mock_hw::{RecordingOutputs, RecordingSink, SelectiveRunner, SharedLevels};

use miniplc::adapters::delay::TaskDelay;
use miniplc::app::events::PlcEvent;
use miniplc::app::ports::{ConfigError, SpawnError, TaskKind};
use miniplc::app::service::{PlcHandles, PlcPorts, PlcService, PlcTables};
use miniplc::config::PlcConfig;
use miniplc::plc::evaluator::evaluate;
use miniplc::plc::handoff::HANDOFF_DEPTH;
use miniplc::plc::state::InputState;
use miniplc::plc::table::{InputChannel, OutputChannel, RuleMode};

fn tables() -> PlcTables {
    PlcTables::try_new(
        &[
            InputChannel::new(0, 0),
            InputChannel::new(1, 1),
            InputChannel::new(2, 2),
            InputChannel::new(3, 3),
        ],
        &[
            OutputChannel::new(0, 0, RuleMode::AllBits, 0x9),
            OutputChannel::new(1, 1, RuleMode::AllBits, 0x1),
            OutputChannel::new(2, 2, RuleMode::AllBits, 0xC),
            OutputChannel::new(3, 3, RuleMode::AnyBit, 0xF),
        ],
    )
    .unwrap()
}

fn fast_config() -> PlcConfig {
    PlcConfig {
        sample_period_ms: 1,
        settle_period_ms: 1,
        ..PlcConfig::default()
    }
}

struct Mocks {
    levels: SharedLevels,
    outs: RecordingOutputs,
    sink: RecordingSink,
}

/// Start with the inputs already at `initial_bits`, so the first scan sees
/// them all at once.
fn start(
    config: PlcConfig,
    initial_bits: u8,
    runner: &mut SelectiveRunner,
) -> (Mocks, PlcHandles) {
    let mocks = Mocks {
        levels: SharedLevels::default(),
        outs: RecordingOutputs::default(),
        sink: RecordingSink::default(),
    };
    mocks.levels.set_bits(initial_bits);
    let handles = PlcService::start(
        config,
        tables(),
        PlcPorts {
            inputs: mocks.levels.clone(),
            outputs: mocks.outs.clone(),
            delay: TaskDelay,
            sink: mocks.sink.clone(),
        },
        runner,
    );
    (mocks, handles)
}

/// Poll `cond` until it holds or two seconds pass.
fn wait_for(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    false
}

#[test]
fn startup_events_come_in_order() {
    let mut runner = SelectiveRunner::default();
    let (mocks, handles) = start(fast_config(), 0, &mut runner);

    assert!(handles.is_complete());
    assert_eq!(runner.spawned, [TaskKind::Sampler, TaskKind::Evaluator]);

    let events = mocks.sink.events();
    assert_eq!(
        &events[..3],
        &[
            PlcEvent::HandoffReady {
                depth: HANDOFF_DEPTH
            },
            PlcEvent::TaskStarted(TaskKind::Sampler),
            PlcEvent::TaskStarted(TaskKind::Evaluator),
        ]
    );
}

#[test]
fn held_inputs_reach_the_outputs() {
    let mut runner = SelectiveRunner::default();
    let (mocks, _handles) = start(fast_config(), 0b1001, &mut runner);

    let applied = wait_for(|| {
        mocks.sink.events().iter().any(|e| {
            matches!(e, PlcEvent::OutputsApplied { state, .. } if state.bits() == 0b1001)
        })
    });
    assert!(applied, "no OutputsApplied for 0b1001: {:?}", mocks.sink.events());

    let expected = evaluate(&tables().outputs, InputState::from_bits(0b1001));
    assert!(expected.is_active(0));
    assert!(expected.is_active(1));
    assert!(!expected.is_active(2));
    assert!(expected.is_active(3));

    let levels = mocks.sink.events().into_iter().find_map(|e| match e {
        PlcEvent::OutputsApplied { state, levels } if state.bits() == 0b1001 => Some(levels),
        _ => None,
    });
    assert_eq!(levels, Some(expected));
    assert!(!mocks.outs.writes().is_empty());
}

#[test]
fn invalid_config_falls_back_to_defaults_and_reports_every_failure() {
    let mut runner = SelectiveRunner::rejecting(&[TaskKind::Sampler, TaskKind::Evaluator]);
    let config = PlcConfig {
        sample_period_ms: 0,
        ..PlcConfig::default()
    };
    let (mocks, handles) = start(config, 0, &mut runner);

    assert!(handles.sampler.is_none());
    assert!(handles.evaluator.is_none());
    assert!(runner.spawned.is_empty());
    assert_eq!(
        mocks.sink.events(),
        [
            PlcEvent::ConfigRejected(ConfigError::ValidationFailed(
                "sample_period_ms must be > 0"
            )),
            PlcEvent::HandoffReady {
                depth: HANDOFF_DEPTH
            },
            PlcEvent::TaskFailed(TaskKind::Sampler, SpawnError::Rejected("test runner")),
            PlcEvent::TaskFailed(TaskKind::Evaluator, SpawnError::Rejected("test runner")),
        ]
    );

    // Nothing to wait for.
    handles.join();
}

#[test]
fn evaluator_still_starts_when_sampler_is_rejected() {
    let mut runner = SelectiveRunner::rejecting(&[TaskKind::Sampler]);
    let (mocks, handles) = start(fast_config(), 0, &mut runner);

    assert!(handles.sampler.is_none());
    assert!(handles.evaluator.is_some());
    assert!(!handles.is_complete());

    mocks.levels.set_bits(0b1111);
    std::thread::sleep(Duration::from_millis(50));
    assert!(mocks.outs.writes().is_empty(), "evaluator waits forever");
    assert!(mocks.sink.forwarded().is_empty());
}

#[test]
fn sampler_stalls_on_a_full_handoff_without_evaluator() {
    let mut runner = SelectiveRunner::rejecting(&[TaskKind::Evaluator]);
    let (mocks, handles) = start(fast_config(), 0, &mut runner);

    assert!(handles.sampler.is_some());
    assert!(handles.evaluator.is_none());
    assert!(mocks.sink.events().contains(&PlcEvent::TaskFailed(
        TaskKind::Evaluator,
        SpawnError::Rejected("test runner")
    )));

    // A held input changes the derived state every cycle.
    mocks.levels.set(2, true);
    assert!(wait_for(|| mocks.sink.forwarded().len() == 2));
    std::thread::sleep(Duration::from_millis(50));

    // One state fills the slot, the next one blocks the sampler.
    assert_eq!(mocks.sink.forwarded().len(), 2);
    assert!(mocks.outs.writes().is_empty());
}
