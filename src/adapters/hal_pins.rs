//! `embedded-hal` pin banks.
//!
//! For boards where the digital lines are owned HAL pin drivers rather than
//! raw GPIO numbers.  A bank maps a channel index to one pin; the channel's
//! `pin` field is not consulted.
//!
//! HAL pins are fallible.  A read error is logged and counts as inactive,
//! a write error is logged and dropped, so the PLC loops keep their
//! no-error contract.

use embedded_hal::digital::{Error as _, InputPin, OutputPin, PinState};
use heapless::Vec;
use log::warn;

use crate::app::ports::{DigitalInputPort, DigitalOutputPort};
use crate::plc::table::{InputChannel, MAX_CHANNELS, OutputChannel};

/// Input pins keyed by channel index.
pub struct HalInputBank<P> {
    pins: Vec<(u8, P), MAX_CHANNELS>,
}

impl<P: InputPin> Default for HalInputBank<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: InputPin> HalInputBank<P> {
    pub fn new() -> Self {
        Self { pins: Vec::new() }
    }

    /// Bind `pin` to input `index`.  Hands the pin back if the index is
    /// already bound or the bank is full.
    pub fn attach(&mut self, index: u8, pin: P) -> Result<(), P> {
        if self.pins.iter().any(|(i, _)| *i == index) {
            return Err(pin);
        }
        self.pins.push((index, pin)).map_err(|(_, pin)| pin)
    }
}

impl<P: InputPin> DigitalInputPort for HalInputBank<P> {
    /// Unbound channels read as inactive.
    fn read_level(&mut self, channel: &InputChannel) -> bool {
        let Some((_, pin)) = self.pins.iter_mut().find(|(i, _)| *i == channel.index) else {
            return false;
        };
        match pin.is_high() {
            Ok(level) => level,
            Err(e) => {
                warn!("input {}: pin read failed ({:?})", channel.index, e.kind());
                false
            }
        }
    }
}

/// Output pins keyed by channel index.
pub struct HalOutputBank<P> {
    pins: Vec<(u8, P), MAX_CHANNELS>,
}

impl<P: OutputPin> Default for HalOutputBank<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: OutputPin> HalOutputBank<P> {
    pub fn new() -> Self {
        Self { pins: Vec::new() }
    }

    /// Bind `pin` to output `index`.  Hands the pin back if the index is
    /// already bound or the bank is full.
    pub fn attach(&mut self, index: u8, pin: P) -> Result<(), P> {
        if self.pins.iter().any(|(i, _)| *i == index) {
            return Err(pin);
        }
        self.pins.push((index, pin)).map_err(|(_, pin)| pin)
    }
}

impl<P: OutputPin> DigitalOutputPort for HalOutputBank<P> {
    fn write_level(&mut self, channel: &OutputChannel, active: bool) {
        let Some((_, pin)) = self.pins.iter_mut().find(|(i, _)| *i == channel.index) else {
            return;
        };
        if let Err(e) = pin.set_state(PinState::from(active)) {
            warn!("output {}: pin write failed ({:?})", channel.index, e.kind());
        }
    }
}
