// src/config/validate.rs

use std::time::Duration;

use crate::config::duration::parse_duration;
use crate::config::model::{
    ApiConfig, ConfigFile, RawApiSection, RawConfigFile, RawTimingSection, TimingConfig,
};
use crate::errors::{Result, RobotError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::RobotError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let api = validate_api(&raw.api)?;
        let timing = validate_timing(&raw.timing)?;
        Ok(ConfigFile::new_unchecked(api, timing, raw.mission))
    }
}

impl ApiConfig {
    /// Check that both probabilities are usable as chances.
    ///
    /// Called on load and whenever a robot's API settings are replaced.
    pub fn validate(&self) -> Result<()> {
        check_probability("api.fail_probability", self.fail_probability)?;
        check_probability("api.timeout_probability", self.timeout_probability)?;
        Ok(())
    }
}

impl TimingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tick.is_zero() {
            return Err(RobotError::ConfigError(
                "[timing].tick must be greater than zero".to_string(),
            ));
        }
        if self.task_duration.is_zero() {
            return Err(RobotError::ConfigError(
                "[timing].task_duration must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_api(raw: &RawApiSection) -> Result<ApiConfig> {
    let api = ApiConfig {
        delay: duration_field("api.delay", &raw.delay)?,
        fail_probability: raw.fail_probability,
        timeout_probability: raw.timeout_probability,
        timeout: duration_field("api.timeout", &raw.timeout)?,
        seed: raw.seed,
    };
    api.validate()?;
    Ok(api)
}

fn validate_timing(raw: &RawTimingSection) -> Result<TimingConfig> {
    let timing = TimingConfig {
        tick: duration_field("timing.tick", &raw.tick)?,
        task_duration: duration_field("timing.task_duration", &raw.task_duration)?,
        docking_duration: duration_field("timing.docking_duration", &raw.docking_duration)?,
    };
    timing.validate()?;
    Ok(timing)
}

fn duration_field(field: &str, value: &str) -> Result<Duration> {
    parse_duration(value)
        .map_err(|e| RobotError::ConfigError(format!("[{field}] {e}")))
}

fn check_probability(field: &str, p: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(RobotError::ConfigError(format!(
            "[{field}] must be within 0.0..=1.0 (got {p})"
        )));
    }
    Ok(())
}
