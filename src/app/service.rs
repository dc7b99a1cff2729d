//! PLC service — the startup entry point.
//!
//! [`PlcService::start`] wires the board tables, the handoff channel and
//! the two PLC tasks together, then hands the tasks to a [`TaskRunner`].
//!
//! ```text
//!  DigitalInputPort ──▶ SamplerTask ──[handoff]──▶ EvaluatorTask ──▶ DigitalOutputPort
//!                            │                          │
//!                            └──────── EventSink ◀──────┘
//! ```
//!
//! Start-up is fire-and-forget: a task that cannot be created is reported
//! through the [`EventSink`] and simply never runs.  Nothing is returned to
//! the caller except the join handles of the tasks that did start.

use std::thread::JoinHandle;

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::adapters::delay::TaskDelay;
use crate::adapters::gpio::{GpioInputs, GpioOutputs};
use crate::adapters::log_sink::LogEventSink;
use crate::adapters::task_runner::PinnedThreadRunner;
use crate::config::PlcConfig;
use crate::error::Result;
use crate::plc::board;
use crate::plc::evaluator::EvaluatorTask;
use crate::plc::handoff::{self, HANDOFF_DEPTH};
use crate::plc::sampler::SamplerTask;
use crate::plc::table::{InputChannel, InputTable, OutputChannel, OutputTable};

use super::events::PlcEvent;
use super::ports::{DigitalInputPort, DigitalOutputPort, EventSink, TaskKind, TaskRunner};

// ───────────────────────────────────────────────────────────────
// Inputs to start()
// ───────────────────────────────────────────────────────────────

/// The validated input and output tables.
#[derive(Debug, Clone)]
pub struct PlcTables {
    pub inputs: InputTable,
    pub outputs: OutputTable,
}

impl PlcTables {
    /// Validate arbitrary descriptor lists.
    pub fn try_new(inputs: &[InputChannel], outputs: &[OutputChannel]) -> Result<Self> {
        let inputs = InputTable::try_new(inputs)?;
        let outputs = OutputTable::try_new(outputs, &inputs)?;
        Ok(Self { inputs, outputs })
    }

    /// The reference board's control matrix.
    pub fn board() -> Self {
        Self {
            inputs: board::init_inputs(),
            outputs: board::init_outputs(),
        }
    }
}

/// Adapters moved into the tasks.  The delay and sink are cloned so each
/// task owns its own copy.
pub struct PlcPorts<I, O, D, S> {
    pub inputs: I,
    pub outputs: O,
    pub delay: D,
    pub sink: S,
}

// ───────────────────────────────────────────────────────────────
// Result of start()
// ───────────────────────────────────────────────────────────────

/// Join handles of the tasks that were created.
#[derive(Debug)]
pub struct PlcHandles {
    pub sampler: Option<JoinHandle<()>>,
    pub evaluator: Option<JoinHandle<()>>,
}

impl PlcHandles {
    /// Both tasks were created.
    pub fn is_complete(&self) -> bool {
        self.sampler.is_some() && self.evaluator.is_some()
    }

    /// Block on every created task.  The tasks never exit, so this only
    /// returns early when neither task could be created.
    pub fn join(self) {
        for handle in [self.sampler, self.evaluator].into_iter().flatten() {
            let name = handle.thread().name().unwrap_or("plc").to_owned();
            if handle.join().is_err() {
                warn!("{} panicked", name);
            }
        }
    }
}

// ───────────────────────────────────────────────────────────────
// PlcService
// ───────────────────────────────────────────────────────────────

pub struct PlcService;

impl PlcService {
    /// Create the handoff channel and spawn the sampler, then the evaluator.
    ///
    /// An invalid `config` is reported and replaced by the defaults.
    /// Call exactly once, after the digital I/O is initialised.
    pub fn start<I, O, D, S, R>(
        config: PlcConfig,
        tables: PlcTables,
        ports: PlcPorts<I, O, D, S>,
        runner: &mut R,
    ) -> PlcHandles
    where
        I: DigitalInputPort + Send + 'static,
        O: DigitalOutputPort + Send + 'static,
        D: DelayNs + Clone + Send + 'static,
        S: EventSink + Clone + Send + 'static,
        R: TaskRunner,
    {
        let PlcPorts {
            inputs: input_port,
            outputs: output_port,
            delay,
            sink,
        } = ports;
        let mut sink_main = sink.clone();

        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                sink_main.emit(&PlcEvent::ConfigRejected(e));
                PlcConfig::default()
            }
        };
        log_layout(&config, &tables);

        let (tx, rx) = handoff::channel();
        sink_main.emit(&PlcEvent::HandoffReady {
            depth: HANDOFF_DEPTH,
        });

        let sampler = SamplerTask::new(
            tables.inputs,
            input_port,
            tx,
            delay.clone(),
            sink.clone(),
            config.sample_period_ms,
        );
        let sampler = spawn_reported(
            runner,
            TaskKind::Sampler,
            &config,
            Box::new(move || sampler.run()),
            &mut sink_main,
        );

        let evaluator = EvaluatorTask::new(
            tables.outputs,
            output_port,
            rx,
            delay,
            sink,
            config.settle_period_ms,
        );
        let evaluator = spawn_reported(
            runner,
            TaskKind::Evaluator,
            &config,
            Box::new(move || evaluator.run()),
            &mut sink_main,
        );

        PlcHandles { sampler, evaluator }
    }
}

/// Start the PLC on the board: raw GPIO adapters, serial log, pinned
/// threads.  `tables` must be the ones the GPIO lines were configured for.
pub fn init_plc(config: PlcConfig, tables: PlcTables) -> PlcHandles {
    PlcService::start(
        config,
        tables,
        PlcPorts {
            inputs: GpioInputs,
            outputs: GpioOutputs,
            delay: TaskDelay,
            sink: LogEventSink,
        },
        &mut PinnedThreadRunner,
    )
}

fn spawn_reported(
    runner: &mut impl TaskRunner,
    kind: TaskKind,
    config: &PlcConfig,
    body: super::ports::TaskBody,
    sink: &mut impl EventSink,
) -> Option<JoinHandle<()>> {
    let task_config = match kind {
        TaskKind::Sampler => &config.sampler_task,
        TaskKind::Evaluator => &config.evaluator_task,
    };
    match runner.spawn(kind, task_config, body) {
        Ok(handle) => {
            sink.emit(&PlcEvent::TaskStarted(kind));
            Some(handle)
        }
        Err(e) => {
            sink.emit(&PlcEvent::TaskFailed(kind, e));
            None
        }
    }
}

/// One JSON line each for the active config and the control matrix.
fn log_layout(config: &PlcConfig, tables: &PlcTables) {
    match serde_json::to_string(config) {
        Ok(json) => info!("PLC config: {}", json),
        Err(e) => warn!("PLC config not serialisable: {}", e),
    }
    match (
        serde_json::to_string(&tables.inputs),
        serde_json::to_string(&tables.outputs),
    ) {
        (Ok(i), Ok(o)) => info!("PLC inputs: {} outputs: {}", i, o),
        _ => warn!("PLC tables not serialisable"),
    }
}
