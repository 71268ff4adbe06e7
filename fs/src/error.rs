//! Scheduling errors

use thiserror::Error;

/// Reasons a schedule request is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("Delay must be >= 0, got {0}")]
    NegativeDelay(f64),

    #[error("Interval must be >= 0, got {0}")]
    NegativeInterval(f64),

    #[error("Delay and interval must be finite, got {0}")]
    NonFinite(f64),

    #[error("Interval {0} given for a non-repeating item")]
    IntervalWithoutRepeat(f64),

    #[error("Soft scheduling of a one-shot item requires a delay > 0")]
    SoftWithoutDelay,

    #[error("Too many per-tick items (limit {limit})")]
    ImmediateOverflow { limit: usize },
}

/// Result type for scheduling operations
pub type ScheduleResult<T> = Result<T, ScheduleError>;
