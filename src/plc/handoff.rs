//! Single-slot handoff channel between the sampler and the evaluator.
//!
//! Uses an `embassy-sync` bounded channel of depth 1 shared by `Arc`.
//! Each side gets exactly one endpoint: the sampler owns the
//! [`HandoffSender`], the evaluator owns the [`HandoffReceiver`].
//!
//! ```text
//! ┌──────────────┐  InputState  ┌──────────────┐
//! │   Sampler    │─────[ 1 ]───▶│  Evaluator   │
//! └──────────────┘              └──────────────┘
//! ```
//!
//! A send while the slot is occupied blocks the producer until the
//! evaluator drains it; nothing is overwritten.

use std::sync::Arc;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use futures_lite::future::block_on;

use super::state::InputState;

/// Slot count of the handoff channel.
pub const HANDOFF_DEPTH: usize = 1;

type HandoffChannel = Channel<CriticalSectionRawMutex, InputState, HANDOFF_DEPTH>;

/// Create the channel and split it into its two endpoints.
pub fn channel() -> (HandoffSender, HandoffReceiver) {
    let shared = Arc::new(HandoffChannel::new());
    (
        HandoffSender {
            chan: Arc::clone(&shared),
        },
        HandoffReceiver { chan: shared },
    )
}

/// Producer endpoint, owned by the sampler task.
pub struct HandoffSender {
    chan: Arc<HandoffChannel>,
}

impl HandoffSender {
    /// Send `state`, parking the calling thread while the slot is full.
    /// Waits forever if the receiver never drains.
    pub fn send(&self, state: InputState) {
        block_on(self.chan.send(state));
    }

    /// Non-blocking send; hands the state back if the slot is occupied.
    pub fn try_send(&self, state: InputState) -> Result<(), InputState> {
        self.chan.try_send(state).map_err(|e| match e {
            TrySendError::Full(s) => s,
        })
    }

    /// Whether an undelivered state is sitting in the slot.
    pub fn is_full(&self) -> bool {
        self.chan.is_full()
    }
}

/// Consumer endpoint, owned by the evaluator task.
pub struct HandoffReceiver {
    chan: Arc<HandoffChannel>,
}

impl HandoffReceiver {
    /// Take the next state, parking the calling thread until one arrives.
    pub fn receive(&self) -> InputState {
        block_on(self.chan.receive())
    }

    /// Non-blocking receive.
    pub fn try_receive(&self) -> Option<InputState> {
        self.chan.try_receive().ok()
    }
}
