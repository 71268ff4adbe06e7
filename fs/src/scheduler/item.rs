//! Item types for the scheduler

use std::cmp::Ordering;
use std::fmt;

use crate::error::{ScheduleError, ScheduleResult};

/// Boxed callback receiving the seconds elapsed since its previous call
pub type Callback = Box<dyn FnMut(f64)>;

/// Opaque handle identifying one scheduled item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemHandle(pub(crate) u64);

impl ItemHandle {
    /// Raw id, unique per scheduler
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

/// A scheduled callback and its timing state.
///
/// Owned exclusively by the scheduler; callers only ever see its
/// [`ItemHandle`] and [`ScheduleEntry`] snapshots.
pub(crate) struct ScheduledItem {
    pub handle: ItemHandle,
    pub callback: Callback,
    pub last_ts: f64,
    pub next_ts: f64,
    pub interval: f64,
    pub repeat: bool,
}

impl ScheduledItem {
    pub fn entry(&self, immediate: bool) -> ScheduleEntry {
        ScheduleEntry {
            handle: self.handle,
            last_ts: self.last_ts,
            next_ts: self.next_ts,
            interval: self.interval,
            repeat: self.repeat,
            immediate,
        }
    }
}

impl fmt::Debug for ScheduledItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledItem")
            .field("handle", &self.handle)
            .field("last_ts", &self.last_ts)
            .field("next_ts", &self.next_ts)
            .field("interval", &self.interval)
            .field("repeat", &self.repeat)
            .finish_non_exhaustive()
    }
}

impl Eq for ScheduledItem {}

impl PartialEq for ScheduledItem {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Ord for ScheduledItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: earliest next_ts must compare greatest,
        // then the older handle
        other
            .next_ts
            .total_cmp(&self.next_ts)
            .then_with(|| other.handle.cmp(&self.handle))
    }
}

impl PartialOrd for ScheduledItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Read-only view of one scheduled item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleEntry {
    pub handle: ItemHandle,
    pub last_ts: f64,
    pub next_ts: f64,
    pub interval: f64,
    pub repeat: bool,
    /// True for items that run on every tick outside the heap
    pub immediate: bool,
}

/// Counters for the scheduler
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SchedulerStats {
    pub ticks: u64,
    pub calls: u64,
    pub tight_catch_ups: u64,
    pub soft_reschedules: u64,
    pub peak_immediate: usize,
    pub peak_heap: usize,
}

/// Check schedule arguments before anything is allocated
pub(crate) fn validate(delay: f64, interval: f64, repeat: bool, soft: bool) -> ScheduleResult<()> {
    if !delay.is_finite() {
        return Err(ScheduleError::NonFinite(delay));
    }
    if !interval.is_finite() {
        return Err(ScheduleError::NonFinite(interval));
    }
    if delay < 0.0 {
        return Err(ScheduleError::NegativeDelay(delay));
    }
    if interval < 0.0 {
        return Err(ScheduleError::NegativeInterval(interval));
    }
    if interval != 0.0 && !repeat {
        return Err(ScheduleError::IntervalWithoutRepeat(interval));
    }
    if soft && !repeat && delay <= 0.0 {
        return Err(ScheduleError::SoftWithoutDelay);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BinaryHeap;

    use super::*;

    fn item(id: u64, next_ts: f64) -> ScheduledItem {
        ScheduledItem {
            handle: ItemHandle(id),
            callback: Box::new(|_| {}),
            last_ts: 0.0,
            next_ts,
            interval: 0.0,
            repeat: false,
        }
    }

    #[test]
    fn test_heap_pops_earliest_first() {
        let mut heap = BinaryHeap::new();
        heap.push(item(1, 3.0));
        heap.push(item(2, 1.0));
        heap.push(item(3, 2.0));

        let order: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|i| i.next_ts).collect();
        assert_eq!(order, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_ties_break_by_handle() {
        let mut heap = BinaryHeap::new();
        heap.push(item(7, 1.0));
        heap.push(item(3, 1.0));
        heap.push(item(5, 1.0));

        let order: Vec<_> = std::iter::from_fn(|| heap.pop()).map(|i| i.handle.id()).collect();
        assert_eq!(order, vec![3, 5, 7]);
    }

    #[test]
    fn test_equality_is_by_handle() {
        assert_eq!(item(1, 1.0), item(1, 9.0));
        assert_ne!(item(1, 1.0), item(2, 1.0));
    }

    #[test]
    fn test_validate_rejects_bad_arguments() {
        assert_eq!(validate(-1.0, 0.0, false, false), Err(ScheduleError::NegativeDelay(-1.0)));
        assert_eq!(validate(0.0, -0.5, true, false), Err(ScheduleError::NegativeInterval(-0.5)));
        assert_eq!(
            validate(0.0, 1.0, false, false),
            Err(ScheduleError::IntervalWithoutRepeat(1.0))
        );
        assert_eq!(validate(0.0, 0.0, false, true), Err(ScheduleError::SoftWithoutDelay));
        assert!(matches!(validate(f64::NAN, 0.0, false, false), Err(ScheduleError::NonFinite(_))));
        assert!(matches!(
            validate(0.0, f64::INFINITY, true, false),
            Err(ScheduleError::NonFinite(_))
        ));
    }

    #[test]
    fn test_validate_accepts_good_arguments() {
        assert!(validate(0.0, 0.0, false, false).is_ok());
        assert!(validate(0.5, 0.0, false, true).is_ok());
        assert!(validate(0.0, 1.0, true, false).is_ok());
        assert!(validate(0.0, 1.0, true, true).is_ok());
        assert!(validate(0.0, 0.0, true, false).is_ok());
    }

    #[test]
    fn test_handle_display() {
        assert_eq!(ItemHandle(12).to_string(), "item-12");
    }
}
