//! MiniPLC Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  GpioInputs   GpioOutputs   TaskDelay   LogEventSink           │
//! │  (InputPort)  (OutputPort)  (DelayNs)   (EventSink)            │
//! │  PinnedThreadRunner (TaskRunner)                               │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │   SamplerTask ──[handoff]──▶ EvaluatorTask              │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use miniplc::app::service::PlcTables;
use miniplc::config::PlcConfig;
use miniplc::drivers::hw_init;
use miniplc::error::Error;
use miniplc::init_plc;

/// Optional JSON config baked in at build time
/// (`MINIPLC_CONFIG='{"sample_period_ms":20,...}' cargo build`).
const CONFIG_OVERRIDE: Option<&str> = option_env!("MINIPLC_CONFIG");

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("MiniPLC v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = match CONFIG_OVERRIDE.map(PlcConfig::from_json) {
        Some(Ok(cfg)) => {
            info!("Config: build-time override");
            cfg
        }
        Some(Err(e)) => {
            warn!("Config override rejected ({}), using defaults", e);
            PlcConfig::default()
        }
        None => PlcConfig::default(),
    };

    // ── 3. GPIO lines ─────────────────────────────────────────
    let tables = PlcTables::board();
    hw_init::init_plc_pins(&tables.inputs, &tables.outputs).map_err(Error::from)?;

    // ── 4. PLC tasks ──────────────────────────────────────────
    let handles = init_plc(config, tables);
    if !handles.is_complete() {
        warn!("PLC running degraded: not every task was created");
    }

    info!("System ready.");
    handles.join();
    Ok(())
}
