//! PLC core — pure decision logic, zero I/O.
//!
//! ```text
//!  board tables ──▶ SamplerTask ──[handoff]──▶ EvaluatorTask
//!                    (inputs)                   (outputs)
//! ```
//!
//! Hardware is reached only through the port traits in
//! [`crate::app::ports`], so everything here runs on the host.

pub mod board;
pub mod evaluator;
pub mod handoff;
pub mod sampler;
pub mod state;
pub mod table;
