//! framesched - frame-driven callback scheduler
//!
//! A host loop calls [`Scheduler::tick`] once per frame; the scheduler runs
//! every callback whose time has come, in due-time order, on the caller's
//! thread.
//!
//! # Features
//!
//! - **One-shot and repeating callbacks**, each told how long it has been
//!   since its previous call
//! - **Per-tick items** kept out of the heap and called every frame
//! - **Soft scheduling** that spreads items sharing an interval across it
//! - **Drift correction**: late items are rescheduled, never replayed
//! - **Injectable time source** for deterministic tests and simulations
//!
//! # Example
//!
//! ```
//! use framesched::{ManualClock, Scheduler};
//!
//! let clock = ManualClock::new(0.0);
//! let mut scheduler = Scheduler::with_time_source(clock.clone());
//! scheduler.tick();
//!
//! let handle = scheduler.schedule_interval(|dt| println!("{dt}"), 0.5, 0.5, false)?;
//! clock.advance(0.5);
//! scheduler.tick();
//! assert!(scheduler.unschedule(handle));
//! # Ok::<(), framesched::ScheduleError>(())
//! ```

pub mod cli;
pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod scheduler;

pub use clock::{ManualClock, MonotonicClock, TimeSource};
pub use config::{Config, TimerSpec};
pub use driver::{FrameLoop, LoopConfig, RegisteredTimer, RunReport, register_timers, soft_plan};
pub use error::{ScheduleError, ScheduleResult};
pub use scheduler::{
    Callback, CommandQueue, ItemHandle, MAX_SOFT_SUBDIVISIONS, OverflowPolicy, ScheduleEntry, Scheduler,
    SchedulerConfig, SchedulerStats, soft_next_ts,
};
