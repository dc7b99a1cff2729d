//! MiniPLC firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod pins;
pub mod plc;

// Hardware-facing modules compile on the host too; the ESP-IDF
// implementations are guarded by cfg attributes inside.
pub mod adapters;
pub mod drivers;

pub use app::service::{PlcService, init_plc};
