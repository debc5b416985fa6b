// src/engine/signal.rs

//! Cross-thread signals between the control surface and the mission worker.
//!
//! A fresh [`RunSignals`] is built for every mission so that a stop or pause
//! aimed at one run can never reach the next one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex};

use crate::errors::{Result, RobotError};

/// Broadcast gate: set means "run", cleared means "pause".
///
/// Waiters block until the gate is set; setting wakes all of them.
#[derive(Debug)]
pub struct ResumeGate {
    open: Mutex<bool>,
    cond: Condvar,
}

impl ResumeGate {
    /// A gate that starts out set.
    pub fn new_open() -> Self {
        Self {
            open: Mutex::new(true),
            cond: Condvar::new(),
        }
    }

    pub fn is_set(&self) -> bool {
        // A poisoned lock still holds a valid bool.
        *self.open.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set(&self) {
        let mut open = self.open.lock().unwrap_or_else(|e| e.into_inner());
        *open = true;
        self.cond.notify_all();
    }

    pub fn clear(&self) {
        let mut open = self.open.lock().unwrap_or_else(|e| e.into_inner());
        *open = false;
    }

    /// Block until the gate is set. No timeout.
    pub fn wait(&self) -> Result<()> {
        let open = self
            .open
            .lock()
            .map_err(|_| RobotError::Other(anyhow::anyhow!("resume gate lock poisoned")))?;
        let _open = self
            .cond
            .wait_while(open, |open| !*open)
            .map_err(|_| RobotError::Other(anyhow::anyhow!("resume gate lock poisoned")))?;
        Ok(())
    }
}

/// One-shot cooperative cancellation flag.
///
/// Once set it stays set for the rest of the run.
#[derive(Debug, Default)]
pub struct StopFlag(AtomicBool);

impl StopFlag {
    pub fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    pub fn set(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Signals belonging to a single mission run.
#[derive(Debug)]
pub struct RunSignals {
    pub resume: ResumeGate,
    pub stop: StopFlag,
}

impl RunSignals {
    pub fn new() -> Self {
        Self {
            resume: ResumeGate::new_open(),
            stop: StopFlag::new(),
        }
    }
}

impl Default for RunSignals {
    fn default() -> Self {
        Self::new()
    }
}
