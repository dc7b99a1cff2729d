//! Unified error type for the PLC firmware.
//!
//! Every fallible setup step funnels into [`Error`], keeping the boot path's
//! error handling uniform.  The PLC loops themselves have no error path, and
//! task-spawn failures are reported as events rather than propagated.
//! All variants are `Copy` so they can be logged and passed around freely.

use core::fmt;

use crate::drivers::hw_init::HwInitError;
use crate::plc::table::TableError;

/// Every fallible setup operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// GPIO initialisation failed.
    Hardware(HwInitError),
    /// A channel table is inconsistent.
    Table(TableError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hardware(e) => write!(f, "hardware: {e}"),
            Self::Table(e) => write!(f, "table: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Hardware(e)
    }
}

impl From<TableError> for Error {
    fn from(e: TableError) -> Self {
        Self::Table(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
