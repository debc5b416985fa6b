// src/mission/mod.rs

//! Mission and task model.
//!
//! - [`model`] holds the `Mission` / `Task` types handed to the engine.
//! - [`loader`] reads mission descriptions from TOML for the CLI.

pub mod loader;
pub mod model;

pub use loader::{generated_mission, load_mission, MissionFile, TaskEntry};
pub use model::{Mission, Task};
