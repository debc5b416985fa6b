// src/robot/api.rs

//! Simulated link to the robot's top-side API.
//!
//! Every control-surface operation goes through [`SimulatedApi::call`],
//! which applies the configured faults in a fixed order:
//! 1. sleep `delay`,
//! 2. fail with `CommunicationFailure` with `fail_probability`,
//! 3. sleep `timeout` and fail with `CommunicationTimeout` with
//!    `timeout_probability`.

use std::sync::Mutex;
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{trace, warn};

use crate::config::ApiConfig;
use crate::errors::{Result, RobotError};

pub struct SimulatedApi {
    config: ApiConfig,
    rng: Mutex<StdRng>,
}

impl SimulatedApi {
    pub fn new(config: ApiConfig) -> Result<Self> {
        config.validate()?;
        let rng = rng_for(&config);
        Ok(Self {
            config,
            rng: Mutex::new(rng),
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Replace the fault settings. A new seed reseeds the fault draws.
    pub fn reconfigure(&mut self, config: ApiConfig) -> Result<()> {
        config.validate()?;
        if config.seed != self.config.seed {
            self.rng = Mutex::new(rng_for(&config));
        }
        self.config = config;
        Ok(())
    }

    /// Simulate one round trip to the robot.
    pub fn call(&self, operation: &'static str) -> Result<()> {
        trace!(operation, "simulated API call");

        if !self.config.delay.is_zero() {
            thread::sleep(self.config.delay);
        }

        if self.draw(self.config.fail_probability) {
            warn!(operation, "simulated API call failed");
            return Err(RobotError::CommunicationFailure);
        }

        if self.draw(self.config.timeout_probability) {
            thread::sleep(self.config.timeout);
            warn!(operation, timeout = ?self.config.timeout, "simulated API call timed out");
            return Err(RobotError::CommunicationTimeout(self.config.timeout));
        }

        Ok(())
    }

    fn draw(&self, probability: f64) -> bool {
        if probability <= 0.0 {
            return false;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_bool(probability)
    }
}

fn rng_for(config: &ApiConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
