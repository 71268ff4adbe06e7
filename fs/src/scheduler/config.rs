//! Scheduler configuration

use serde::{Deserialize, Serialize};

/// What to do when more per-tick items are registered than allowed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Refuse the item and return an error
    #[default]
    Reject,

    /// Accept the item and log a warning
    Warn,
}

/// Scheduler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Max items that run on every tick outside the heap
    #[serde(default = "default_max_immediate_items")]
    pub max_immediate_items: usize,

    /// Behavior when `max_immediate_items` is exceeded
    #[serde(default)]
    pub immediate_overflow: OverflowPolicy,

    /// Number of recent tick deltas kept for the rolling average
    #[serde(default = "default_tick_history")]
    pub tick_history: usize,

    /// New items anchor to the wall clock once it runs this far ahead of the logical clock
    #[serde(default = "default_anchor_window_secs")]
    pub anchor_window_secs: f64,

    /// Lag below which a late repeating item is simply pushed one interval out
    #[serde(default = "default_catch_up_window_secs")]
    pub catch_up_window_secs: f64,
}

fn default_max_immediate_items() -> usize {
    10
}

fn default_tick_history() -> usize {
    10
}

fn default_anchor_window_secs() -> f64 {
    0.2
}

fn default_catch_up_window_secs() -> f64 {
    0.05
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_immediate_items: default_max_immediate_items(),
            immediate_overflow: OverflowPolicy::default(),
            tick_history: default_tick_history(),
            anchor_window_secs: default_anchor_window_secs(),
            catch_up_window_secs: default_catch_up_window_secs(),
        }
    }
}
