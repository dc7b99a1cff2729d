//! Raw-GPIO adapters — the board's buttons and LEDs behind the I/O ports.
//!
//! Each channel's `pin` is the GPIO number; reads and writes go straight
//! to [`hw_init`](crate::drivers::hw_init), which talks to the ESP-IDF
//! registers on target and to the simulated pin bank on the host.

use crate::app::ports::{DigitalInputPort, DigitalOutputPort};
use crate::drivers::hw_init;
use crate::plc::table::{InputChannel, OutputChannel};

/// Input lines read directly from GPIO.
#[derive(Debug, Clone, Copy, Default)]
pub struct GpioInputs;

impl DigitalInputPort for GpioInputs {
    fn read_level(&mut self, channel: &InputChannel) -> bool {
        hw_init::gpio_read(channel.pin)
    }
}

/// Output lines written directly to GPIO.
#[derive(Debug, Clone, Copy, Default)]
pub struct GpioOutputs;

impl DigitalOutputPort for GpioOutputs {
    fn write_level(&mut self, channel: &OutputChannel, active: bool) {
        hw_init::gpio_write(channel.pin, active);
    }
}
