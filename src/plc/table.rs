//! Configuration tables — the fixed input/output topology of the controller.
//!
//! Both tables are built once at startup and never change afterwards.  The
//! board tables in [`crate::pins`] are checked at compile time with
//! [`check_inputs`] / [`check_outputs`]; [`InputTable::try_new`] and
//! [`OutputTable::try_new`] run the same checks at runtime for tables that
//! come from anywhere else (tests, alternative boards).

use core::fmt;
use core::ops::Deref;

use heapless::Vec;
use serde::{Deserialize, Serialize};

use super::state::BITMAP_WIDTH;

/// Raw GPIO number, the opaque line handle used by the GPIO adapters.
pub type GpioNum = i32;

/// Upper bound on channels per table; one bit each in an 8-bit bitmap.
pub const MAX_CHANNELS: usize = BITMAP_WIDTH as usize;

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

/// A monitored digital input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputChannel {
    /// Bit position of this input in the [`InputState`](super::state::InputState).
    pub index: u8,
    pub pin: GpioNum,
}

impl InputChannel {
    pub const fn new(index: u8, pin: GpioNum) -> Self {
        Self { index, pin }
    }
}

/// How an output's mask is matched against the input state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleMode {
    /// Active iff every bit of the mask is set in the input state.
    AllBits,
    /// Active iff any input is active.  The mask has no effect.
    AnyBit,
}

/// A driven digital output line and its activation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputChannel {
    pub index: u8,
    pub pin: GpioNum,
    pub mode: RuleMode,
    /// Bitmask over input indices.
    pub mask: u8,
}

impl OutputChannel {
    pub const fn new(index: u8, pin: GpioNum, mode: RuleMode, mask: u8) -> Self {
        Self {
            index,
            pin,
            mode,
            mask,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a descriptor list was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// The table has no channels.
    Empty,
    /// More channels than the bitmap has bits.
    TooManyChannels,
    /// A channel index does not fit in the bitmap.
    IndexOutOfRange(u8),
    /// Two channels in the same table share an index.
    DuplicateIndex(u8),
    /// An output mask references an input that is not configured.
    MaskOutOfRange { output: u8, mask: u8 },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "table is empty"),
            Self::TooManyChannels => write!(f, "more than {} channels", MAX_CHANNELS),
            Self::IndexOutOfRange(i) => write!(f, "index {} out of range", i),
            Self::DuplicateIndex(i) => write!(f, "duplicate index {}", i),
            Self::MaskOutOfRange { output, mask } => {
                write!(f, "output {} mask 0b{:08b} references unknown inputs", output, mask)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Const validation (usable in `const _: () = assert!(...)`)
// ---------------------------------------------------------------------------

/// Bits of every configured input index.  Assumes indices are in range.
pub const fn input_mask(inputs: &[InputChannel]) -> u8 {
    let mut mask = 0u8;
    let mut i = 0;
    while i < inputs.len() {
        if inputs[i].index < BITMAP_WIDTH {
            mask |= 1 << inputs[i].index;
        }
        i += 1;
    }
    mask
}

/// Validate an input descriptor list.
pub const fn check_inputs(inputs: &[InputChannel]) -> Result<(), TableError> {
    if inputs.is_empty() {
        return Err(TableError::Empty);
    }
    if inputs.len() > MAX_CHANNELS {
        return Err(TableError::TooManyChannels);
    }
    let mut seen = 0u8;
    let mut i = 0;
    while i < inputs.len() {
        let index = inputs[i].index;
        if index >= BITMAP_WIDTH {
            return Err(TableError::IndexOutOfRange(index));
        }
        if seen & (1 << index) != 0 {
            return Err(TableError::DuplicateIndex(index));
        }
        seen |= 1 << index;
        i += 1;
    }
    Ok(())
}

/// Validate an output descriptor list against the inputs it reads.
pub const fn check_outputs(
    outputs: &[OutputChannel],
    inputs: &[InputChannel],
) -> Result<(), TableError> {
    if outputs.is_empty() {
        return Err(TableError::Empty);
    }
    if outputs.len() > MAX_CHANNELS {
        return Err(TableError::TooManyChannels);
    }
    let known = input_mask(inputs);
    let mut seen = 0u8;
    let mut i = 0;
    while i < outputs.len() {
        let o = outputs[i];
        if o.index >= BITMAP_WIDTH {
            return Err(TableError::IndexOutOfRange(o.index));
        }
        if seen & (1 << o.index) != 0 {
            return Err(TableError::DuplicateIndex(o.index));
        }
        seen |= 1 << o.index;
        if o.mask & !known != 0 {
            return Err(TableError::MaskOutOfRange {
                output: o.index,
                mask: o.mask,
            });
        }
        i += 1;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Validated input table, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InputTable {
    channels: Vec<InputChannel, MAX_CHANNELS>,
}

impl InputTable {
    pub fn try_new(channels: &[InputChannel]) -> Result<Self, TableError> {
        check_inputs(channels)?;
        let channels = Vec::from_slice(channels).map_err(|()| TableError::TooManyChannels)?;
        Ok(Self { channels })
    }

    /// Bits of every configured input.
    pub fn mask(&self) -> u8 {
        input_mask(&self.channels)
    }
}

impl Deref for InputTable {
    type Target = [InputChannel];

    fn deref(&self) -> &Self::Target {
        &self.channels
    }
}

/// Validated output table, sorted by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OutputTable {
    channels: Vec<OutputChannel, MAX_CHANNELS>,
}

impl OutputTable {
    pub fn try_new(channels: &[OutputChannel], inputs: &InputTable) -> Result<Self, TableError> {
        check_outputs(channels, inputs)?;
        let mut channels: Vec<OutputChannel, MAX_CHANNELS> =
            Vec::from_slice(channels).map_err(|()| TableError::TooManyChannels)?;
        channels.sort_unstable_by_key(|o| o.index);
        Ok(Self { channels })
    }
}

impl Deref for OutputTable {
    type Target = [OutputChannel];

    fn deref(&self) -> &Self::Target {
        &self.channels
    }
}
