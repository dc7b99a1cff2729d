//! Port traits — the hexagonal boundary between the PLC core and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Sampler / Evaluator (domain)
//! ```
//!
//! Driven adapters (GPIO lines, event sinks, task runners) implement these
//! traits.  The tasks in [`crate::plc`] consume them via generics, so the
//! decision logic never touches hardware directly.

use std::thread::JoinHandle;

use crate::config::TaskConfig;
use crate::plc::table::{InputChannel, OutputChannel};

// ───────────────────────────────────────────────────────────────
// Digital I/O ports (driven adapters: hardware ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the sampler polls every input line through this.
pub trait DigitalInputPort {
    /// Current logical level of `channel`; `true` = active/high.
    fn read_level(&mut self, channel: &InputChannel) -> bool;
}

/// Write-side port: the evaluator drives every output line through this.
///
/// Writes are treated as infallible; adapters log failures themselves.
pub trait DigitalOutputPort {
    fn write_level(&mut self, channel: &OutputChannel, active: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The tasks emit structured [`PlcEvent`](super::events::PlcEvent)s through
/// this port.  Both tasks hold their own clone of the sink.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::PlcEvent);
}

// ───────────────────────────────────────────────────────────────
// Task runner port (driven adapter: domain → scheduler)
// ───────────────────────────────────────────────────────────────

/// The two long-running PLC tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Polls inputs and forwards state changes.
    Sampler,
    /// Receives state changes and drives outputs.
    Evaluator,
}

impl TaskKind {
    /// Null-terminated thread name (FreeRTOS wants a C string).
    pub const fn thread_name(self) -> &'static str {
        match self {
            Self::Sampler => "plc-inputs\0",
            Self::Evaluator => "plc-outputs\0",
        }
    }

    /// Thread name without the terminator, for logs.
    pub fn label(self) -> &'static str {
        self.thread_name().trim_end_matches('\0')
    }
}

/// Boxed task body handed to a [`TaskRunner`].
pub type TaskBody = Box<dyn FnOnce() + Send + 'static>;

/// Spawns one independently scheduled task.
///
/// A failed spawn drops `body`; the caller reports the error and carries on.
pub trait TaskRunner {
    fn spawn(
        &mut self,
        kind: TaskKind,
        config: &TaskConfig,
        body: TaskBody,
    ) -> Result<JoinHandle<()>, SpawnError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from loading or validating a [`PlcConfig`](crate::config::PlcConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The serialized config could not be parsed.
    Parse,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

/// Errors from [`TaskRunner::spawn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnError {
    /// The OS refused to create the thread (out of memory / task slots).
    OutOfResources,
    /// The runner declined the task for the given reason.
    Rejected(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Parse => write!(f, "config could not be parsed"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl core::fmt::Display for SpawnError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfResources => write!(f, "out of resources"),
            Self::Rejected(why) => write!(f, "rejected: {}", why),
        }
    }
}
