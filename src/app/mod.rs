//! Application shell around the PLC core.
//!
//! The decision logic lives in [`crate::plc`]; this module holds the
//! **port traits** it is driven through ([`ports`]), the diagnostic events
//! it emits ([`events`]), and the startup entry point ([`service`]).

pub mod events;
pub mod ports;
pub mod service;
