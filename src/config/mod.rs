// src/config/mod.rs

//! Configuration loading and validation for the simulator.
//!
//! - [`model`] defines the TOML-backed data model and the validated types.
//! - [`loader`] reads a config file from disk.
//! - [`validate`] turns raw sections into typed settings.
//! - [`duration`] parses the `"250ms"` / `"10s"` duration strings.

pub mod duration;
pub mod loader;
pub mod model;
pub mod validate;

pub use duration::{parse_duration, parse_nonzero_duration};
pub use loader::{
    default_config_path, load_and_validate, load_from_path, load_or_default, resolve_config_path,
};
pub use model::{
    ApiConfig, ConfigFile, MissionSection, RawApiSection, RawConfigFile, RawTimingSection,
    TimingConfig,
};
