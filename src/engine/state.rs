// src/engine/state.rs

//! Shared state between the control surface and the mission worker.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::engine::signal::RunSignals;
use crate::mission::Mission;

/// Atomic wrapper for f64 values.
/// Uses AtomicU64 with bit reinterpretation.
#[derive(Debug)]
pub struct AtomicF64(AtomicU64);

impl AtomicF64 {
    pub fn new(val: f64) -> Self {
        Self(AtomicU64::new(val.to_bits()))
    }

    pub fn load(&self, order: Ordering) -> f64 {
        f64::from_bits(self.0.load(order))
    }

    pub fn store(&self, val: f64, order: Ordering) {
        self.0.store(val.to_bits(), order);
    }
}

/// Everything about the current run that both threads look at.
///
/// Gauges (battery, home) are plain atomics. The current mission and its
/// signals are swapped as a whole at mission start, so they sit behind
/// `RwLock`s that are only held long enough to clone an `Arc`.
#[derive(Debug)]
pub struct ExecutionState {
    battery: AtomicF64,
    home: AtomicBool,
    signals: RwLock<Arc<RunSignals>>,
    current: RwLock<Option<Arc<Mission>>>,
    /// Every mission ever started, by id.
    missions: RwLock<HashMap<String, Arc<Mission>>>,
}

impl ExecutionState {
    /// Robot docked with a full battery and no mission.
    pub fn new() -> Self {
        Self {
            battery: AtomicF64::new(100.0),
            home: AtomicBool::new(true),
            signals: RwLock::new(Arc::new(RunSignals::new())),
            current: RwLock::new(None),
            missions: RwLock::new(HashMap::new()),
        }
    }

    pub fn battery(&self) -> f64 {
        self.battery.load(Ordering::Acquire)
    }

    pub fn set_battery(&self, level: f64) {
        self.battery.store(level, Ordering::Release);
    }

    pub fn is_home(&self) -> bool {
        self.home.load(Ordering::Acquire)
    }

    pub fn set_home(&self, home: bool) {
        self.home.store(home, Ordering::Release);
    }

    pub fn signals(&self) -> Arc<RunSignals> {
        let guard = self.signals.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&*guard)
    }

    pub fn current_mission(&self) -> Option<Arc<Mission>> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        guard.clone()
    }

    pub fn mission(&self, mission_id: &str) -> Option<Arc<Mission>> {
        let guard = self.missions.read().unwrap_or_else(|e| e.into_inner());
        guard.get(mission_id).cloned()
    }

    /// Install a new mission as current, with fresh signals, a full battery
    /// and the robot leaving home.
    ///
    /// Returns the signals for the new run and a checkpoint of what was
    /// replaced, for [`roll_back`](Self::roll_back) if the run never starts.
    pub fn begin_run(&self, mission: Arc<Mission>) -> (Arc<RunSignals>, RunCheckpoint) {
        let signals = Arc::new(RunSignals::new());

        let previous_signals = std::mem::replace(
            &mut *self.signals.write().unwrap_or_else(|e| e.into_inner()),
            Arc::clone(&signals),
        );
        let checkpoint = RunCheckpoint {
            mission_id: mission.id().to_string(),
            signals: previous_signals,
            current: self.current_mission(),
            displaced: self
                .missions
                .write()
                .unwrap_or_else(|e| e.into_inner())
                .insert(mission.id().to_string(), Arc::clone(&mission)),
            home: self.is_home(),
            battery: self.battery(),
        };

        self.set_home(false);
        self.set_battery(100.0);
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Some(mission);

        (signals, checkpoint)
    }

    /// Undo a [`begin_run`](Self::begin_run) whose worker never started.
    pub fn roll_back(&self, checkpoint: RunCheckpoint) {
        let RunCheckpoint {
            mission_id,
            signals,
            current,
            displaced,
            home,
            battery,
        } = checkpoint;

        *self.signals.write().unwrap_or_else(|e| e.into_inner()) = signals;
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = current;
        {
            let mut missions = self.missions.write().unwrap_or_else(|e| e.into_inner());
            match displaced {
                Some(previous) => missions.insert(mission_id, previous),
                None => missions.remove(&mission_id),
            };
        }
        self.set_home(home);
        self.set_battery(battery);
    }
}

/// State replaced by [`ExecutionState::begin_run`].
#[derive(Debug)]
pub struct RunCheckpoint {
    mission_id: String,
    signals: Arc<RunSignals>,
    current: Option<Arc<Mission>>,
    displaced: Option<Arc<Mission>>,
    home: bool,
    battery: f64,
}

impl Default for ExecutionState {
    fn default() -> Self {
        Self::new()
    }
}
