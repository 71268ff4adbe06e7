//! Scheduler implementation

use std::collections::{BinaryHeap, VecDeque};

use tracing::{debug, error, trace, warn};

use super::commands::{Command, CommandQueue, HandleAllocator};
use super::config::{OverflowPolicy, SchedulerConfig};
use super::item::{Callback, ItemHandle, ScheduleEntry, ScheduledItem, SchedulerStats, validate};
use super::soft;
use crate::clock::{MonotonicClock, TimeSource};
use crate::error::{ScheduleError, ScheduleResult};

/// Time-driven callback dispatcher.
///
/// The host calls [`Scheduler::tick`] once per frame. Items that run every
/// tick live in an insertion-ordered list; everything else lives in a
/// min-heap keyed by the time it next comes due.
#[derive(Debug)]
pub struct Scheduler<T = MonotonicClock> {
    config: SchedulerConfig,
    time_source: T,

    /// Logical clock, `None` until the first `tick`/`set_time`
    last_ts: Option<f64>,
    cumulative_time: f64,
    recent_tick_durations: VecDeque<f64>,

    /// Repeating zero-interval items, called on every tick in registration order
    pending_immediate_items: Vec<ScheduledItem>,
    scheduled_items: BinaryHeap<ScheduledItem>,
    /// Heap items already fired in the current pass, pushed back when it ends
    held: Vec<ScheduledItem>,

    handles: HandleAllocator,
    commands: CommandQueue,
    stats: SchedulerStats,
}

impl Scheduler<MonotonicClock> {
    /// Create a scheduler on the monotonic clock with default configuration
    pub fn new() -> Self {
        Self::with_time_source(MonotonicClock::new())
    }
}

impl Default for Scheduler<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> Scheduler<T> {
    /// Create a scheduler reading time from `time_source`
    pub fn with_time_source(time_source: T) -> Self {
        Self::with_config(time_source, SchedulerConfig::default())
    }

    /// Create a scheduler with explicit configuration
    pub fn with_config(time_source: T, config: SchedulerConfig) -> Self {
        debug!(?config, "Scheduler::with_config: called");
        let handles = HandleAllocator::default();
        Self {
            recent_tick_durations: VecDeque::with_capacity(config.tick_history),
            config,
            time_source,
            last_ts: None,
            cumulative_time: 0.0,
            pending_immediate_items: Vec::new(),
            scheduled_items: BinaryHeap::new(),
            held: Vec::new(),
            commands: CommandQueue::new(handles.clone()),
            handles,
            stats: SchedulerStats::default(),
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn time_source(&self) -> &T {
        &self.time_source
    }

    /// Queue for requesting changes from inside callbacks
    pub fn commands(&self) -> CommandQueue {
        self.commands.clone()
    }

    /// Schedule `callback` to run once, `delay` seconds from now.
    ///
    /// A soft one-shot needs `delay > 0`.
    pub fn schedule_once<F>(&mut self, callback: F, delay: f64, soft: bool) -> ScheduleResult<ItemHandle>
    where
        F: FnMut(f64) + 'static,
    {
        self.schedule(callback, delay, 0.0, false, soft)
    }

    /// Schedule `callback` to run every `interval` seconds (every tick if 0).
    ///
    /// With `delay == 0` the first call happens on the next tick; pass
    /// `delay == interval` to wait one full interval first. Soft placement
    /// spreads the first call over `delay`, or over `interval` when `delay`
    /// is 0.
    pub fn schedule_interval<F>(&mut self, callback: F, interval: f64, delay: f64, soft: bool) -> ScheduleResult<ItemHandle>
    where
        F: FnMut(f64) + 'static,
    {
        self.schedule(callback, delay, interval, true, soft)
    }

    /// Core scheduling entry point
    pub fn schedule<F>(
        &mut self,
        callback: F,
        delay: f64,
        interval: f64,
        repeat: bool,
        soft: bool,
    ) -> ScheduleResult<ItemHandle>
    where
        F: FnMut(f64) + 'static,
    {
        debug!(delay, interval, repeat, soft, "Scheduler::schedule: called");
        validate(delay, interval, repeat, soft)?;
        let handle = self.handles.allocate();
        self.insert(handle, Box::new(callback), delay, interval, repeat, soft)?;
        Ok(handle)
    }

    fn insert(
        &mut self,
        handle: ItemHandle,
        callback: Callback,
        delay: f64,
        interval: f64,
        repeat: bool,
        soft: bool,
    ) -> ScheduleResult<()> {
        let anchor = self.nearest_ts();
        let (last_ts, next_ts) = if soft {
            // A zero span would stack every item on the anchor
            let span = if repeat && delay == 0.0 { interval } else { delay };
            let next_ts = self.soft_next_ts(anchor, span);
            (next_ts - span, next_ts)
        } else {
            (anchor, anchor + delay)
        };

        let item = ScheduledItem {
            handle,
            callback,
            last_ts,
            next_ts,
            interval,
            repeat,
        };

        if repeat && interval == 0.0 && next_ts == 0.0 {
            let limit = self.config.max_immediate_items;
            if self.pending_immediate_items.len() >= limit {
                match self.config.immediate_overflow {
                    OverflowPolicy::Reject => {
                        error!(%handle, limit, "Scheduler::insert: per-tick item limit reached, rejecting");
                        return Err(ScheduleError::ImmediateOverflow { limit });
                    }
                    OverflowPolicy::Warn => {
                        warn!(%handle, limit, "Scheduler::insert: per-tick item limit exceeded");
                    }
                }
            }
            debug!(%handle, "Scheduler::insert: immediate");
            self.pending_immediate_items.push(item);
            self.stats.peak_immediate = self.stats.peak_immediate.max(self.pending_immediate_items.len());
        } else {
            debug!(%handle, last_ts, next_ts, "Scheduler::insert: heap");
            self.scheduled_items.push(item);
            self.stats.peak_heap = self.stats.peak_heap.max(self.scheduled_items.len());
        }
        Ok(())
    }

    /// Anchor for new items: the logical clock unless the wall clock has run well ahead
    fn nearest_ts(&self) -> f64 {
        let ts = self.time_source.now();
        match self.last_ts {
            Some(last_ts) if ts - last_ts <= self.config.anchor_window_secs => last_ts,
            _ => ts,
        }
    }

    /// Heap items, including any held out of the heap by an unfinished pass
    fn timed_items(&self) -> impl Iterator<Item = &ScheduledItem> {
        self.scheduled_items.iter().chain(self.held.iter())
    }

    /// Push held items back into the heap
    fn restore_held(&mut self) {
        if !self.held.is_empty() {
            trace!(count = self.held.len(), "Scheduler::restore_held: called");
            let held = std::mem::take(&mut self.held);
            self.scheduled_items.extend(held);
        }
    }

    /// Soft placement against the heap plus items held out of it
    fn soft_next_ts(&self, last_ts: f64, interval: f64) -> f64 {
        let mut stamps: Vec<f64> = self.timed_items().map(|item| item.next_ts).collect();
        stamps.sort_by(f64::total_cmp);
        soft::soft_next_ts(&stamps, last_ts, interval)
    }

    /// Remove an item. Returns false if it was not scheduled.
    pub fn unschedule(&mut self, handle: ItemHandle) -> bool {
        debug!(%handle, "Scheduler::unschedule: called");
        self.restore_held();
        let before = self.len();
        self.pending_immediate_items.retain(|item| item.handle != handle);
        self.scheduled_items.retain(|item| item.handle != handle);

        let removed = before != self.len();
        if !removed {
            debug!(%handle, "Scheduler::unschedule: not scheduled");
        }
        removed
    }

    /// Remove every item
    pub fn unschedule_all(&mut self) {
        debug!(count = self.len(), "Scheduler::unschedule_all: called");
        self.pending_immediate_items.clear();
        self.scheduled_items.clear();
        self.held.clear();
    }

    pub fn is_scheduled(&self, handle: ItemHandle) -> bool {
        self.pending_immediate_items
            .iter()
            .chain(self.timed_items())
            .any(|item| item.handle == handle)
    }

    /// Number of live items
    pub fn len(&self) -> usize {
        self.pending_immediate_items.len() + self.scheduled_items.len() + self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Advance to the time source's current time and run everything due.
    ///
    /// Returns the seconds elapsed since the previous tick (0 on the first).
    pub fn tick(&mut self) -> f64 {
        let ts = self.time_source.now();
        let dt = self.set_time(ts);
        trace!(ts, dt, "Scheduler::tick: called");
        self.stats.ticks += 1;

        self.apply_commands();
        self.call_scheduled_functions(dt);
        self.apply_commands();
        dt
    }

    /// Move the logical clock to `ts` without dispatching anything.
    ///
    /// Returns the delta from the previous logical time (0 on the first call).
    pub fn set_time(&mut self, ts: f64) -> f64 {
        let dt = match self.last_ts {
            Some(last_ts) => ts - last_ts,
            None => 0.0,
        };
        self.last_ts = Some(ts);
        self.cumulative_time += dt;

        self.recent_tick_durations.push_back(dt);
        while self.recent_tick_durations.len() > self.config.tick_history {
            self.recent_tick_durations.pop_front();
        }
        dt
    }

    /// Run every item due at the current logical time.
    ///
    /// Per-tick items receive `dt`; heap items receive the time since their
    /// own last call. Returns true if any callback ran.
    pub fn call_scheduled_functions(&mut self, dt: f64) -> bool {
        let now = self.get_counter();
        let mut fired = false;

        for item in self.pending_immediate_items.iter_mut() {
            (item.callback)(dt);
            self.stats.calls += 1;
            fired = true;
        }

        // Rescheduled items stay out of the heap until the pass ends so a
        // zero-interval item is not picked up again in the same tick.
        // A pass that unwound from a panicking callback may have left some.
        self.restore_held();
        while self.scheduled_items.peek().is_some_and(|item| item.next_ts <= now) {
            let Some(mut item) = self.scheduled_items.pop() else {
                break;
            };

            trace!(handle = %item.handle, next_ts = item.next_ts, "Scheduler::call_scheduled_functions: firing");
            (item.callback)(now - item.last_ts);
            self.stats.calls += 1;
            fired = true;

            if !item.repeat {
                continue;
            }

            item.next_ts = item.last_ts + item.interval;
            item.last_ts = now;

            if item.next_ts <= now {
                if now - item.next_ts < self.config.catch_up_window_secs {
                    item.next_ts = now + item.interval;
                    self.stats.tight_catch_ups += 1;
                } else {
                    debug!(
                        handle = %item.handle,
                        lag = now - item.next_ts,
                        "Scheduler::call_scheduled_functions: missed slot, soft rescheduling"
                    );
                    item.next_ts = self.soft_next_ts(now, item.interval);
                    item.last_ts = item.next_ts - item.interval;
                    self.stats.soft_reschedules += 1;
                }
            }
            self.held.push(item);
        }

        self.restore_held();
        fired
    }

    fn apply_commands(&mut self) {
        for command in self.commands.take() {
            debug!(?command, "Scheduler::apply_commands: applying");
            match command {
                Command::Schedule {
                    handle,
                    callback,
                    delay,
                    interval,
                    repeat,
                    soft,
                } => {
                    if let Err(err) = self.insert(handle, callback, delay, interval, repeat, soft) {
                        warn!(%handle, %err, "Scheduler::apply_commands: deferred schedule dropped");
                    }
                }
                Command::Unschedule(handle) => {
                    self.unschedule(handle);
                }
                Command::UnscheduleAll => self.unschedule_all(),
            }
        }
    }

    /// Total time accumulated over all ticks
    pub fn get_running_time(&self) -> f64 {
        self.cumulative_time
    }

    /// Current logical time (0 before the first tick)
    pub fn get_counter(&self) -> f64 {
        self.last_ts.unwrap_or(0.0)
    }

    /// Average of the recent tick deltas
    pub fn get_interval(&self) -> f64 {
        if self.recent_tick_durations.is_empty() {
            return 0.0;
        }
        self.recent_tick_durations.iter().sum::<f64>() / self.recent_tick_durations.len() as f64
    }

    /// Snapshot of all live items: per-tick items first, then the heap by due time
    pub fn get_schedule(&self) -> Vec<ScheduleEntry> {
        let mut heap: Vec<_> = self.timed_items().map(|item| item.entry(false)).collect();
        heap.sort_by(|a, b| a.next_ts.total_cmp(&b.next_ts).then_with(|| a.handle.cmp(&b.handle)));

        self.pending_immediate_items
            .iter()
            .map(|item| item.entry(true))
            .chain(heap)
            .collect()
    }

    /// How long the host may sleep before the next item is due.
    ///
    /// `None` when nothing is scheduled.
    pub fn get_idle_time(&self) -> Option<f64> {
        if !self.pending_immediate_items.is_empty() || !self.commands.is_empty() {
            return Some(0.0);
        }
        self.timed_items()
            .map(|item| item.next_ts)
            .min_by(f64::total_cmp)
            .map(|next_ts| (next_ts - self.time_source.now()).max(0.0))
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::clock::ManualClock;

    fn counter() -> (Rc<Cell<u32>>, impl FnMut(f64) + 'static) {
        let calls = Rc::new(Cell::new(0));
        let inner = calls.clone();
        (calls, move |_| inner.set(inner.get() + 1))
    }

    fn scheduler_at(start: f64) -> (ManualClock, Scheduler<ManualClock>) {
        let clock = ManualClock::new(start);
        let scheduler = Scheduler::with_time_source(clock.clone());
        (clock, scheduler)
    }

    #[test]
    fn test_anchor_prefers_logical_clock_when_close() {
        let (clock, mut scheduler) = scheduler_at(0.0);
        scheduler.tick();

        clock.set(0.1);
        let near = scheduler.schedule_once(|_| {}, 1.0, false).unwrap();
        clock.set(0.5);
        let far = scheduler.schedule_once(|_| {}, 1.0, false).unwrap();

        let schedule = scheduler.get_schedule();
        assert_eq!(schedule[0].handle, near);
        assert_eq!(schedule[0].last_ts, 0.0);
        assert_eq!(schedule[0].next_ts, 1.0);
        assert_eq!(schedule[1].handle, far);
        assert_eq!(schedule[1].last_ts, 0.5);
        assert_eq!(schedule[1].next_ts, 1.5);
    }

    #[test]
    fn test_every_tick_item_takes_fast_path() {
        let (clock, mut scheduler) = scheduler_at(0.0);
        let args = Rc::new(RefCell::new(Vec::new()));
        let sink = args.clone();
        scheduler
            .schedule_interval(move |dt| sink.borrow_mut().push(dt), 0.0, 0.0, false)
            .unwrap();

        let schedule = scheduler.get_schedule();
        assert_eq!(schedule.len(), 1);
        assert!(schedule[0].immediate);

        scheduler.tick();
        clock.set(0.25);
        scheduler.tick();
        assert_eq!(*args.borrow(), vec![0.0, 0.25]);
    }

    #[test]
    fn test_immediate_overflow_rejected_by_default() {
        let (_clock, mut scheduler) = scheduler_at(0.0);
        for _ in 0..10 {
            scheduler.schedule_interval(|_| {}, 0.0, 0.0, false).unwrap();
        }
        let result = scheduler.schedule_interval(|_| {}, 0.0, 0.0, false);
        assert_eq!(result, Err(ScheduleError::ImmediateOverflow { limit: 10 }));
        assert_eq!(scheduler.len(), 10);
    }

    #[test]
    fn test_immediate_overflow_warn_policy_accepts() {
        let config = SchedulerConfig {
            max_immediate_items: 2,
            immediate_overflow: OverflowPolicy::Warn,
            ..Default::default()
        };
        let mut scheduler = Scheduler::with_config(ManualClock::new(0.0), config);
        for _ in 0..3 {
            scheduler.schedule_interval(|_| {}, 0.0, 0.0, false).unwrap();
        }
        assert_eq!(scheduler.len(), 3);
        assert_eq!(scheduler.stats().peak_immediate, 3);
    }

    #[test]
    fn test_zero_interval_heap_item_fires_once_per_tick() {
        let (clock, mut scheduler) = scheduler_at(1.0);
        scheduler.tick();
        let (calls, cb) = counter();
        scheduler.schedule_interval(cb, 0.0, 0.0, false).unwrap();
        assert!(!scheduler.get_schedule()[0].immediate);

        scheduler.tick();
        assert_eq!(calls.get(), 1);
        clock.set(1.5);
        scheduler.tick();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_tight_catch_up() {
        let (clock, mut scheduler) = scheduler_at(0.0);
        scheduler.tick();
        let handle = scheduler.schedule_interval(|_| {}, 0.5, 0.5, false).unwrap();

        clock.set(0.52);
        scheduler.tick();

        let entry = scheduler.get_schedule()[0];
        assert_eq!(entry.handle, handle);
        assert_eq!(entry.last_ts, 0.52);
        assert!((entry.next_ts - 1.02).abs() < 1e-9);
        assert_eq!(scheduler.stats().tight_catch_ups, 1);
        assert_eq!(scheduler.stats().soft_reschedules, 0);
    }

    #[test]
    fn test_large_lag_soft_reschedules() {
        let (clock, mut scheduler) = scheduler_at(0.0);
        scheduler.tick();
        let args = Rc::new(RefCell::new(Vec::new()));
        let sink = args.clone();
        scheduler
            .schedule_interval(move |dt| sink.borrow_mut().push(dt), 1.0, 1.0, false)
            .unwrap();

        clock.set(2.5);
        scheduler.tick();

        let entry = scheduler.get_schedule()[0];
        assert_eq!(entry.next_ts, 3.5);
        assert_eq!(entry.last_ts, 2.5);
        assert_eq!(*args.borrow(), vec![2.5]);
        assert_eq!(scheduler.stats().soft_reschedules, 1);
    }

    #[test]
    fn test_soft_reschedule_avoids_items_rescheduled_same_pass() {
        let (clock, mut scheduler) = scheduler_at(0.0);
        scheduler.tick();
        let a = scheduler.schedule_interval(|_| {}, 1.0, 1.0, false).unwrap();
        let b = scheduler.schedule_interval(|_| {}, 1.0, 1.0, false).unwrap();

        clock.set(2.5);
        scheduler.tick();

        let schedule = scheduler.get_schedule();
        assert_eq!(schedule[0].handle, b);
        assert_eq!(schedule[0].next_ts, 3.0);
        assert_eq!(schedule[1].handle, a);
        assert_eq!(schedule[1].next_ts, 3.5);
    }

    #[test]
    fn test_unschedule_self_through_commands() {
        let (clock, mut scheduler) = scheduler_at(0.0);
        scheduler.tick();

        let commands = scheduler.commands();
        let calls = Rc::new(Cell::new(0));
        let slot: Rc<Cell<Option<ItemHandle>>> = Rc::new(Cell::new(None));
        let (inner_calls, inner_slot) = (calls.clone(), slot.clone());
        let handle = scheduler
            .schedule_interval(
                move |_| {
                    inner_calls.set(inner_calls.get() + 1);
                    if let Some(handle) = inner_slot.get() {
                        commands.unschedule(handle);
                    }
                },
                1.0,
                1.0,
                false,
            )
            .unwrap();
        slot.set(Some(handle));

        clock.set(1.0);
        scheduler.tick();
        assert!(!scheduler.is_scheduled(handle));

        clock.set(2.0);
        scheduler.tick();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_callback_schedules_follow_up() {
        let (clock, mut scheduler) = scheduler_at(0.0);
        scheduler.tick();

        let commands = scheduler.commands();
        let (follow_calls, follow) = counter();
        let mut follow = Some(follow);
        scheduler
            .schedule_once(
                move |_| {
                    if let Some(cb) = follow.take() {
                        commands.schedule_once(cb, 0.5, false).unwrap();
                    }
                },
                1.0,
                false,
            )
            .unwrap();

        clock.set(1.0);
        scheduler.tick();
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.get_schedule()[0].next_ts, 1.5);

        clock.set(1.5);
        scheduler.tick();
        assert_eq!(follow_calls.get(), 1);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_set_time_tracks_history_and_running_time() {
        let (_clock, mut scheduler) = scheduler_at(100.0);
        assert_eq!(scheduler.get_interval(), 0.0);
        assert_eq!(scheduler.set_time(5.0), 0.0);
        assert_eq!(scheduler.set_time(6.0), 1.0);
        assert_eq!(scheduler.set_time(9.0), 3.0);

        assert_eq!(scheduler.get_counter(), 9.0);
        assert_eq!(scheduler.get_running_time(), 4.0);
        assert!((scheduler.get_interval() - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_tick_history_is_bounded() {
        let config = SchedulerConfig {
            tick_history: 2,
            ..Default::default()
        };
        let mut scheduler = Scheduler::with_config(ManualClock::new(0.0), config);
        scheduler.set_time(0.0);
        scheduler.set_time(10.0);
        scheduler.set_time(11.0);
        scheduler.set_time(12.0);
        assert_eq!(scheduler.get_interval(), 1.0);
        assert_eq!(scheduler.get_running_time(), 12.0);
    }

    #[test]
    fn test_pending_commands_report_no_idle_time() {
        let (_clock, scheduler) = scheduler_at(0.0);
        assert_eq!(scheduler.get_idle_time(), None);
        scheduler.commands().schedule_once(|_| {}, 3.0, false).unwrap();
        assert_eq!(scheduler.get_idle_time(), Some(0.0));
    }

    #[test]
    fn test_unschedule_all() {
        let (_clock, mut scheduler) = scheduler_at(0.0);
        scheduler.schedule_interval(|_| {}, 0.0, 0.0, false).unwrap();
        scheduler.schedule_once(|_| {}, 1.0, false).unwrap();
        scheduler.unschedule_all();
        assert!(scheduler.is_empty());
        assert!(scheduler.get_schedule().is_empty());
    }

    #[test]
    fn test_panicking_callback_keeps_already_fired_items() {
        let (clock, mut scheduler) = scheduler_at(0.0);
        scheduler.tick();
        let (calls, callback) = counter();
        let steady = scheduler.schedule_interval(callback, 1.0, 1.0, false).unwrap();
        scheduler.schedule_once(|_| panic!("callback failed"), 1.0, false).unwrap();

        clock.set(1.0);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| scheduler.tick()));
        assert!(result.is_err());
        assert_eq!(calls.get(), 1);

        assert!(scheduler.is_scheduled(steady));
        assert_eq!(scheduler.len(), 1);
        let schedule = scheduler.get_schedule();
        assert_eq!(schedule[0].handle, steady);
        assert_eq!(schedule[0].next_ts, 2.0);
        assert_eq!(scheduler.get_idle_time(), Some(1.0));

        clock.set(2.0);
        scheduler.tick();
        assert_eq!(calls.get(), 2);
        assert_eq!(scheduler.get_schedule()[0].next_ts, 3.0);
    }

    #[test]
    fn test_unschedule_after_panicking_pass() {
        let (clock, mut scheduler) = scheduler_at(0.0);
        scheduler.tick();
        let steady = scheduler.schedule_interval(|_| {}, 1.0, 1.0, false).unwrap();
        scheduler.schedule_once(|_| panic!("callback failed"), 1.0, false).unwrap();

        clock.set(1.0);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| scheduler.tick()));
        assert!(result.is_err());

        assert!(scheduler.unschedule(steady));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_soft_interval_without_delay_spreads_over_interval() {
        let (_clock, mut scheduler) = scheduler_at(0.0);
        scheduler.tick();
        let first = scheduler.schedule_interval(|_| {}, 1.0, 0.0, true).unwrap();
        let second = scheduler.schedule_interval(|_| {}, 1.0, 0.0, true).unwrap();

        let schedule = scheduler.get_schedule();
        assert_eq!(schedule[0].handle, second);
        assert_eq!(schedule[0].next_ts, 0.5);
        assert_eq!(schedule[0].last_ts, -0.5);
        assert_eq!(schedule[1].handle, first);
        assert_eq!(schedule[1].next_ts, 1.0);
        assert_eq!(schedule[1].last_ts, 0.0);
    }

    #[test]
    fn test_rejected_deferred_request_never_goes_live() {
        let config = SchedulerConfig {
            max_immediate_items: 1,
            ..Default::default()
        };
        let mut scheduler = Scheduler::with_config(ManualClock::new(0.0), config);
        let direct = scheduler.schedule_interval(|_| {}, 0.0, 0.0, false).unwrap();
        let deferred = scheduler
            .commands()
            .schedule_interval(|_| {}, 0.0, 0.0, false)
            .unwrap();

        scheduler.tick();
        assert!(scheduler.is_scheduled(direct));
        assert!(!scheduler.is_scheduled(deferred));
        assert_eq!(scheduler.len(), 1);
        assert!(scheduler.commands().is_empty());
    }
}
