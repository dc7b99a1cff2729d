//! Mock adapters for integration tests.
//!
//! Inputs are a shared level array the test flips; outputs and events are
//! recorded so tests can assert on the full history without real GPIO.
//! Every mock is `Clone + Send` so it can be moved into a task thread
//! while the test keeps a handle on the same state.

use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use embedded_hal::delay::DelayNs;
use miniplc::app::events::PlcEvent;
use miniplc::app::ports::{
    DigitalInputPort, DigitalOutputPort, EventSink, SpawnError, TaskBody, TaskKind, TaskRunner,
};
use miniplc::config::TaskConfig;
use miniplc::plc::state::InputState;
use miniplc::plc::table::{InputChannel, OutputChannel};

// ── Inputs ────────────────────────────────────────────────────

/// Input levels by channel index.
#[derive(Clone, Default)]
pub struct SharedLevels(Arc<Mutex<[bool; 8]>>);

#[allow(dead_code)]
impl SharedLevels {
    pub fn set(&self, index: u8, high: bool) {
        self.0.lock().unwrap()[index as usize] = high;
    }

    /// Set every level from a bitmap (bit `i` = input `i`).
    pub fn set_bits(&self, bits: u8) {
        let mut levels = self.0.lock().unwrap();
        for (i, level) in levels.iter_mut().enumerate() {
            *level = bits & (1 << i) != 0;
        }
    }
}

impl DigitalInputPort for SharedLevels {
    fn read_level(&mut self, channel: &InputChannel) -> bool {
        self.0.lock().unwrap()[channel.index as usize]
    }
}

// ── Outputs ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Write {
    pub index: u8,
    pub active: bool,
}

#[derive(Clone, Default)]
pub struct RecordingOutputs(Arc<Mutex<Vec<Write>>>);

#[allow(dead_code)]
impl RecordingOutputs {
    pub fn writes(&self) -> Vec<Write> {
        self.0.lock().unwrap().clone()
    }

    /// Most recent level written to output `index`.
    pub fn level(&self, index: u8) -> Option<bool> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|w| w.index == index)
            .map(|w| w.active)
    }
}

impl DigitalOutputPort for RecordingOutputs {
    fn write_level(&mut self, channel: &OutputChannel, active: bool) {
        self.0.lock().unwrap().push(Write {
            index: channel.index,
            active,
        });
    }
}

// ── Events ────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct RecordingSink(Arc<Mutex<Vec<PlcEvent>>>);

#[allow(dead_code)]
impl RecordingSink {
    pub fn events(&self) -> Vec<PlcEvent> {
        self.0.lock().unwrap().clone()
    }

    /// Every state the sampler announced, in order.
    pub fn forwarded(&self) -> Vec<InputState> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PlcEvent::InputStateChanged(s) => Some(s),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &PlcEvent) {
        self.0.lock().unwrap().push(event.clone());
    }
}

// ── Delay ─────────────────────────────────────────────────────

/// Delay that returns immediately.
#[derive(Clone, Copy, Default)]
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

// ── Task runners ──────────────────────────────────────────────

/// Spawns plain threads, except for the task kinds listed in `reject`.
#[derive(Default)]
pub struct SelectiveRunner {
    pub reject: Vec<TaskKind>,
    pub spawned: Vec<TaskKind>,
}

#[allow(dead_code)]
impl SelectiveRunner {
    pub fn rejecting(reject: &[TaskKind]) -> Self {
        Self {
            reject: reject.to_vec(),
            spawned: Vec::new(),
        }
    }
}

impl TaskRunner for SelectiveRunner {
    fn spawn(
        &mut self,
        kind: TaskKind,
        _config: &TaskConfig,
        body: TaskBody,
    ) -> Result<JoinHandle<()>, SpawnError> {
        if self.reject.contains(&kind) {
            return Err(SpawnError::Rejected("test runner"));
        }
        self.spawned.push(kind);
        std::thread::Builder::new()
            .name(kind.label().into())
            .spawn(body)
            .map_err(|_| SpawnError::OutOfResources)
    }
}
