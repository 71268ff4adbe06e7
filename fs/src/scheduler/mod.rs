//! Frame scheduler
//!
//! Dispatches one-shot and repeating callbacks from a single per-frame
//! `tick()`, with soft placement and drift correction in one component.

mod commands;
mod config;
mod core;
mod item;
mod soft;

pub use commands::CommandQueue;
pub use config::{OverflowPolicy, SchedulerConfig};
pub use self::core::Scheduler;
pub use item::{Callback, ItemHandle, ScheduleEntry, SchedulerStats};
pub use soft::{MAX_SOFT_SUBDIVISIONS, soft_next_ts};
