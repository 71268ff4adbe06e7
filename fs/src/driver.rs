//! Host frame loop
//!
//! Drives a [`Scheduler`] the way a game loop would: one `tick()` per frame
//! for a fixed duration, either against the real clock or a simulated one.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clock::{ManualClock, MonotonicClock, TimeSource};
use crate::config::TimerSpec;
use crate::error::ScheduleResult;
use crate::scheduler::{ItemHandle, ScheduleEntry, Scheduler, SchedulerStats};

/// Frame loop configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopConfig {
    /// Target frames per second
    #[serde(default = "default_fps")]
    pub fps: f64,

    /// How long to run, in seconds of scheduler time
    #[serde(default = "default_duration_secs")]
    pub duration_secs: f64,

    /// Advance a manual clock instead of sleeping
    #[serde(default)]
    pub simulate: bool,

    /// Max random extra frame time in simulation, in milliseconds
    #[serde(default)]
    pub jitter_ms: f64,

    /// Skip frames while nothing is due
    #[serde(default)]
    pub lazy: bool,
}

fn default_fps() -> f64 {
    60.0
}

fn default_duration_secs() -> f64 {
    5.0
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            duration_secs: default_duration_secs(),
            simulate: false,
            jitter_ms: 0.0,
            lazy: false,
        }
    }
}

/// Outcome of a frame loop run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub frames: u64,
    pub running_time: f64,
    pub average_interval: f64,
    pub stats: SchedulerStats,
}

/// A timer registered from configuration, with its fire count
#[derive(Debug, Clone)]
pub struct RegisteredTimer {
    pub name: String,
    pub handle: ItemHandle,
    pub calls: Rc<Cell<u64>>,
}

/// Register every configured timer with a counting callback
pub fn register_timers<T: TimeSource>(
    scheduler: &mut Scheduler<T>,
    timers: &[TimerSpec],
) -> ScheduleResult<Vec<RegisteredTimer>> {
    debug!(count = timers.len(), "register_timers: called");
    timers
        .iter()
        .map(|spec| {
            let calls = Rc::new(Cell::new(0u64));
            let counter = calls.clone();
            let name = spec.name.clone();
            let handle = scheduler.schedule(
                move |dt| {
                    counter.set(counter.get() + 1);
                    debug!(timer = %name, dt, "timer fired");
                },
                spec.delay,
                spec.interval,
                spec.repeat,
                spec.soft,
            )?;
            Ok(RegisteredTimer {
                name: spec.name.clone(),
                handle,
                calls,
            })
        })
        .collect()
}

/// Schedule `count` soft repeating items sharing `interval` on a fresh clock
/// and return where they landed
pub fn soft_plan(count: usize, interval: f64) -> ScheduleResult<Vec<ScheduleEntry>> {
    debug!(count, interval, "soft_plan: called");
    let mut scheduler = Scheduler::with_time_source(ManualClock::new(0.0));
    for _ in 0..count {
        scheduler.schedule_interval(|_| {}, interval, interval, true)?;
    }
    Ok(scheduler.get_schedule())
}

/// Runs a scheduler frame by frame
#[derive(Debug, Clone)]
pub struct FrameLoop {
    config: LoopConfig,
}

impl FrameLoop {
    pub fn new(config: LoopConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Run against the real clock, sleeping between frames
    pub fn run_realtime(&self, scheduler: &mut Scheduler<MonotonicClock>) -> RunReport {
        debug!(config = ?self.config, "FrameLoop::run_realtime: called");
        self.run(scheduler, |secs| std::thread::sleep(Duration::from_secs_f64(secs)))
    }

    /// Run against a manual clock, advancing it by each frame's wait plus jitter
    pub fn run_simulated(&self, clock: &ManualClock, scheduler: &mut Scheduler<ManualClock>) -> RunReport {
        debug!(config = ?self.config, "FrameLoop::run_simulated: called");
        let jitter = self.config.jitter_ms.max(0.0) / 1000.0;
        let mut rng = rand::rng();
        self.run(scheduler, |secs| {
            let extra = if jitter > 0.0 { rng.random_range(0.0..=jitter) } else { 0.0 };
            clock.advance(secs + extra);
        })
    }

    /// Drive `scheduler` until `duration_secs` of its time has passed.
    ///
    /// `wait` is handed the number of seconds to let pass before the next frame.
    pub fn run<T, W>(&self, scheduler: &mut Scheduler<T>, mut wait: W) -> RunReport
    where
        T: TimeSource,
        W: FnMut(f64),
    {
        let frame = 1.0 / self.config.fps.max(1.0);
        scheduler.tick();
        let start = scheduler.get_counter();
        let mut frames = 0u64;

        loop {
            let remaining = self.config.duration_secs - (scheduler.get_counter() - start);
            if remaining <= 1e-9 {
                break;
            }
            let secs = self.next_wait(scheduler.get_idle_time(), frame, remaining);
            wait(secs);
            scheduler.tick();
            frames += 1;
        }

        let report = RunReport {
            frames,
            running_time: scheduler.get_running_time(),
            average_interval: scheduler.get_interval(),
            stats: scheduler.stats(),
        };
        info!(
            frames = report.frames,
            running_time = report.running_time,
            calls = report.stats.calls,
            "FrameLoop::run: finished"
        );
        report
    }

    fn next_wait(&self, idle: Option<f64>, frame: f64, remaining: f64) -> f64 {
        let secs = match (self.config.lazy, idle) {
            (true, Some(idle)) => idle.max(frame),
            (true, None) => remaining,
            (false, _) => frame,
        };
        secs.min(remaining)
    }
}
