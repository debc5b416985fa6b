// src/engine/mod.rs

//! Mission execution engine.
//!
//! - [`core`] holds the `Engine` that starts missions and answers queries.
//! - [`worker`] is the per-mission loop running on its own thread.
//! - [`signal`] provides the resume gate and the stop flag.
//! - [`state`] is the state shared between caller and worker.
//! - [`aggregate`] derives a mission status from task statuses.

pub mod aggregate;
pub mod core;
pub mod signal;
pub mod state;
pub mod worker;

pub use aggregate::{aggregate_status, deciding_rule, StatusVerdict, RULES};
pub use self::core::Engine;
pub use signal::{ResumeGate, RunSignals, StopFlag};
pub use state::{ExecutionState, RunCheckpoint};
pub use worker::battery_after;
