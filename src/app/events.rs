//! Outbound diagnostic events.
//!
//! The startup entry point and both PLC tasks emit these through the
//! [`EventSink`](super::ports::EventSink) port.  None of them affect
//! control behaviour; adapters decide where they go (serial log, tests).

use crate::plc::state::{InputState, OutputLevels};

use super::ports::{ConfigError, SpawnError, TaskKind};

/// Structured events emitted by the PLC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlcEvent {
    /// The supplied config was invalid; defaults are used instead.
    ConfigRejected(ConfigError),

    /// The handoff channel between the tasks exists.
    HandoffReady { depth: usize },

    /// A task was handed to the scheduler.
    TaskStarted(TaskKind),

    /// A task could not be created and will never run.
    TaskFailed(TaskKind, SpawnError),

    /// The sampler is forwarding a new input state.
    InputStateChanged(InputState),

    /// The evaluator finished driving every output for `state`.
    OutputsApplied {
        state: InputState,
        levels: OutputLevels,
    },
}
