//! GPIO pin assignments for the PLC I/O board.
//!
//! Single source of truth — the board tables in [`crate::plc::board`]
//! reference this module rather than hard-coding pin numbers.

use crate::plc::table::GpioNum;

// ---------------------------------------------------------------------------
// Inputs — momentary push-buttons, active HIGH (external pull-down)
// ---------------------------------------------------------------------------

pub const BTN_1_GPIO: GpioNum = 4;
pub const BTN_2_GPIO: GpioNum = 5;
pub const BTN_3_GPIO: GpioNum = 6;
pub const BTN_4_GPIO: GpioNum = 7;

// ---------------------------------------------------------------------------
// Outputs — indicator LEDs, active HIGH
// ---------------------------------------------------------------------------

pub const PLC_LED_1_GPIO: GpioNum = 10;
pub const PLC_LED_2_GPIO: GpioNum = 11;
pub const PLC_LED_3_GPIO: GpioNum = 12;
pub const PLC_LED_4_GPIO: GpioNum = 13;
