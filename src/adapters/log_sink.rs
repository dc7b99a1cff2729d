//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing PLC events to the ESP-IDF logger
//! (UART / USB-CDC in production, stderr on the host).

use log::Level;

use crate::app::events::PlcEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`PlcEvent`] to the serial console.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &PlcEvent) {
        let (level, line) = render(event);
        log::log!(level, "{}", line);
    }
}

/// Level and text of the log line for `event`.
fn render(event: &PlcEvent) -> (Level, String) {
    match event {
        PlcEvent::ConfigRejected(e) => (
            Level::Warn,
            format!("CONFIG | rejected ({}), using defaults", e),
        ),
        PlcEvent::HandoffReady { depth } => (
            Level::Info,
            format!("HANDOFF | channel created (depth={})", depth),
        ),
        PlcEvent::TaskStarted(kind) => (Level::Info, format!("TASK | {} created", kind.label())),
        PlcEvent::TaskFailed(kind, e) => (
            Level::Error,
            format!("TASK | {} creation failed: {}", kind.label(), e),
        ),
        PlcEvent::InputStateChanged(state) => {
            (Level::Info, format!("INPUT | inputs_states = {}", state))
        }
        PlcEvent::OutputsApplied { state, levels } => (
            Level::Debug,
            format!("OUTPUT | inputs={} -> outputs={}", state, levels),
        ),
    }
}
