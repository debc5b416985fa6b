// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod mission;
pub mod robot;
pub mod types;

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::{load_or_default, ConfigFile};
use crate::mission::{generated_mission, load_mission, Mission};
use crate::robot::{Robot, RobotInterface};
use crate::types::RobotStatus;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config and mission loading
/// - the simulated robot
/// - scripted pause / resume / stop requests
/// - Ctrl-C handling (requests a stop; a second Ctrl-C exits)
/// - periodic status reporting until the robot is back home
pub async fn run(args: CliArgs) -> Result<RunReport> {
    let (tx, rx) = mpsc::channel(4);
    tokio::spawn(forward_ctrl_c(tx));
    run_with_interrupts(args, rx).await
}

/// Like [`run`], but interrupts arrive on `interrupts` instead of Ctrl-C.
///
/// The first interrupt stops the mission, resuming it first if it is
/// paused. If the robot rejects that, or a second interrupt arrives before
/// the robot is home, the driver gives up with an error.
pub async fn run_with_interrupts(
    args: CliArgs,
    mut interrupts: mpsc::Receiver<()>,
) -> Result<RunReport> {
    if args.poll.is_zero() {
        bail!("poll interval must be greater than zero");
    }

    let cfg = load_or_default(args.config.as_deref())?;
    let mission = Arc::new(match args.mission {
        Some(ref path) => load_mission(path)?,
        None => generated_mission("mission-1", usize::from(args.tasks)),
    });

    let mut report = RunReport::new(Arc::clone(&mission));
    if args.dry_run {
        print_dry_run(&cfg, &mission);
        return Ok(report);
    }

    let robot = Arc::new(Robot::from_config(&cfg)?);
    {
        let mission = Arc::clone(&mission);
        blocking(&robot, move |r| r.initiate_mission(mission)).await??;
    }
    report.executed = true;

    let started = Instant::now();
    let mut script = Script::from_args(&args);
    let mut interrupted = false;
    let mut interrupts_open = true;
    let mut ticker = tokio::time::interval(args.poll);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                for action in script.due(started.elapsed()) {
                    let _ = perform(&robot, action, &mut report).await?;
                }

                report_status(&robot, &mission).await?;

                match blocking(&robot, |r| Ok((r.is_home()?, r.running()?))).await? {
                    Ok((true, false)) => break,
                    Ok((false, false)) => {
                        bail!("mission {} ended without the robot returning home", mission.id());
                    }
                    Ok(_) => debug!("robot still out"),
                    Err(e) => warn!(error = %e, "robot state unavailable"),
                }
            }
            received = interrupts.recv(), if interrupts_open => {
                if received.is_none() {
                    interrupts_open = false;
                    continue;
                }
                if interrupted {
                    bail!("interrupted again before mission {} finished docking", mission.id());
                }
                interrupted = true;
                info!("interrupt received; requesting mission stop");
                interrupt(&robot, &mut report).await?;
            }
        }
    }

    print_summary(&mission);
    Ok(report)
}

/// Forward every Ctrl-C to the driver until it stops listening.
async fn forward_ctrl_c(tx: mpsc::Sender<()>) {
    loop {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("failed to listen for Ctrl+C: {e}");
            return;
        }
        if tx.send(()).await.is_err() {
            return;
        }
    }
}

/// Run a robot call on the blocking pool; simulated API faults may sleep.
async fn blocking<T, F>(robot: &Arc<Robot>, f: F) -> Result<errors::Result<T>>
where
    F: FnOnce(&Robot) -> errors::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let robot = Arc::clone(robot);
    Ok(tokio::task::spawn_blocking(move || f(&robot)).await?)
}

/// Control request sent by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Pause,
    Resume,
    Stop,
}

/// One control request and whether the robot accepted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlOutcome {
    pub action: ControlAction,
    pub accepted: bool,
}

/// What a driver run did, for callers that want more than the exit code.
#[derive(Debug)]
pub struct RunReport {
    /// The mission as the robot left it.
    pub mission: Arc<Mission>,
    /// `false` for `--dry-run`.
    pub executed: bool,
    /// Control requests in the order they were sent.
    pub requests: Vec<ControlOutcome>,
}

impl RunReport {
    fn new(mission: Arc<Mission>) -> Self {
        Self {
            mission,
            executed: false,
            requests: Vec::new(),
        }
    }

    /// Whether `action` was sent at least once and accepted.
    pub fn accepted(&self, action: ControlAction) -> bool {
        self.requests
            .iter()
            .any(|r| r.action == action && r.accepted)
    }
}

/// Control requests scheduled relative to the mission start.
#[derive(Debug)]
struct Script {
    pending: Vec<(Duration, ControlAction)>,
}

impl Script {
    fn from_args(args: &CliArgs) -> Self {
        let mut pending: Vec<(Duration, ControlAction)> = [
            (args.pause_after, ControlAction::Pause),
            (args.resume_after, ControlAction::Resume),
            (args.stop_after, ControlAction::Stop),
        ]
        .into_iter()
        .filter_map(|(at, action)| at.map(|at| (at, action)))
        .collect();
        pending.sort_by_key(|(at, _)| *at);
        Self { pending }
    }

    /// Remove and return the actions whose time has come, in order.
    fn due(&mut self, elapsed: Duration) -> Vec<ControlAction> {
        let split = self
            .pending
            .iter()
            .position(|(at, _)| *at > elapsed)
            .unwrap_or(self.pending.len());
        self.pending.drain(..split).map(|(_, action)| action).collect()
    }
}

/// Send one control request and record the outcome. Rejections are logged,
/// not fatal.
async fn perform(
    robot: &Arc<Robot>,
    action: ControlAction,
    report: &mut RunReport,
) -> Result<errors::Result<()>> {
    let outcome = match action {
        ControlAction::Pause => blocking(robot, |r| r.pause()).await?,
        ControlAction::Resume => blocking(robot, |r| r.resume()).await?,
        ControlAction::Stop => blocking(robot, |r| r.stop()).await?,
    };

    match &outcome {
        Ok(()) => info!(?action, "control request accepted"),
        Err(e) => warn!(?action, error = %e, "control request rejected"),
    }
    report.requests.push(ControlOutcome {
        action,
        accepted: outcome.is_ok(),
    });
    Ok(outcome)
}

/// Stop the mission on behalf of an interrupt. A paused mission is resumed
/// first, since stop is only accepted while the robot is busy.
async fn interrupt(robot: &Arc<Robot>, report: &mut RunReport) -> Result<()> {
    if let Ok(RobotStatus::Paused) = blocking(robot, |r| r.robot_status()).await? {
        if let Err(e) = perform(robot, ControlAction::Resume, report).await? {
            bail!("interrupted, but the paused mission could not be resumed: {e}");
        }
    }

    match blocking(robot, |r| r.robot_status()).await? {
        Ok(RobotStatus::Home) => {
            debug!("robot already home; nothing to stop");
            Ok(())
        }
        _ => match perform(robot, ControlAction::Stop, report).await? {
            Ok(()) => Ok(()),
            Err(e) => bail!("interrupted, but the mission could not be stopped: {e}"),
        },
    }
}

async fn report_status(robot: &Arc<Robot>, mission: &Arc<Mission>) -> Result<()> {
    let id = mission.id().to_string();
    let status = blocking(robot, move |r| r.mission_status(&id)).await?;
    let battery = blocking(robot, |r| r.battery_level()).await?;

    match (status, battery) {
        (Ok(status), Ok(battery)) => {
            info!(mission = %mission.id(), ?status, battery, "mission status");
        }
        (status, battery) => {
            warn!(
                mission = %mission.id(),
                status = ?status.err(),
                battery = ?battery.err(),
                "status poll incomplete"
            );
        }
    }
    Ok(())
}

fn print_summary(mission: &Mission) {
    println!("mission {} finished: {:?}", mission.id(), mission.status());
    for task in mission.tasks() {
        println!("  - {} [{}]: {:?}", task.id(), task.kind(), task.status());
    }
}

/// Simple dry-run output: print the effective config and the mission.
fn print_dry_run(cfg: &ConfigFile, mission: &Mission) {
    println!("eelink-sim dry-run");
    println!("  api.delay = {:?}", cfg.api.delay);
    println!("  api.fail_probability = {}", cfg.api.fail_probability);
    println!("  api.timeout_probability = {}", cfg.api.timeout_probability);
    println!("  api.timeout = {:?}", cfg.api.timeout);
    if let Some(seed) = cfg.api.seed {
        println!("  api.seed = {seed}");
    }
    println!("  timing.tick = {:?}", cfg.timing.tick);
    println!("  timing.task_duration = {:?}", cfg.timing.task_duration);
    println!("  timing.docking_duration = {:?}", cfg.timing.docking_duration);
    println!(
        "  mission.stopped_mission_status = {:?}",
        cfg.mission.stopped_mission_status
    );
    println!();

    println!("mission {}:", mission);
    for task in mission.tasks() {
        println!("  - {} ({})", task.id(), task.kind());
    }

    debug!("dry-run complete (no execution)");
}
