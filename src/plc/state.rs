//! Bit-per-channel value types carried between the PLC tasks.
//!
//! [`InputState`] is the only value that crosses the task boundary: the
//! sampler produces it, the handoff channel moves it, the evaluator
//! consumes it.  [`OutputLevels`] is a diagnostic snapshot of what the
//! evaluator just drove onto the output lines.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Number of channels an 8-bit bitmap can describe.
pub const BITMAP_WIDTH: u8 = 8;

/// Derived input state, bit `i` belongs to the input with index `i`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputState(u8);

impl InputState {
    /// All bits clear.  This is the state both tasks start from.
    pub const EMPTY: Self = Self(0);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether the bit for input `index` is set.  Indices outside the
    /// bitmap read as clear.
    pub const fn is_set(self, index: u8) -> bool {
        index < BITMAP_WIDTH && self.0 & (1 << index) != 0
    }

    /// Flip the bit for input `index`.
    pub fn toggle(&mut self, index: u8) {
        debug_assert!(index < BITMAP_WIDTH);
        self.0 ^= 1 << index;
    }
}

impl From<u8> for InputState {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}

impl From<InputState> for u8 {
    fn from(state: InputState) -> Self {
        state.0
    }
}

/// Renders as eight binary digits, MSB first (`00001001`).
impl fmt::Display for InputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08b}", self.0)
    }
}

/// Levels written by one evaluation pass, bit `i` = output with index `i`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputLevels(u8);

impl OutputLevels {
    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_active(self, index: u8) -> bool {
        index < BITMAP_WIDTH && self.0 & (1 << index) != 0
    }

    pub fn set(&mut self, index: u8, active: bool) {
        debug_assert!(index < BITMAP_WIDTH);
        if active {
            self.0 |= 1 << index;
        } else {
            self.0 &= !(1 << index);
        }
    }
}

impl fmt::Display for OutputLevels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08b}", self.0)
    }
}
