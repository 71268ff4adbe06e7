//! Deferred scheduler operations
//!
//! Callbacks run while the scheduler is mutably borrowed, so they cannot call
//! it directly. A [`CommandQueue`] lets them (or any other subsystem holding
//! a clone) request work that the scheduler applies around each dispatch pass.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use super::item::{Callback, ItemHandle, validate};
use crate::error::ScheduleResult;

/// Commands applied by the scheduler at the next tick boundary
pub(crate) enum Command {
    Schedule {
        handle: ItemHandle,
        callback: Callback,
        delay: f64,
        interval: f64,
        repeat: bool,
        soft: bool,
    },
    Unschedule(ItemHandle),
    UnscheduleAll,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Schedule {
                handle,
                delay,
                interval,
                repeat,
                soft,
                ..
            } => f
                .debug_struct("Schedule")
                .field("handle", handle)
                .field("delay", delay)
                .field("interval", interval)
                .field("repeat", repeat)
                .field("soft", soft)
                .finish_non_exhaustive(),
            Command::Unschedule(handle) => f.debug_tuple("Unschedule").field(handle).finish(),
            Command::UnscheduleAll => f.write_str("UnscheduleAll"),
        }
    }
}

/// Shared handle id counter
#[derive(Debug, Clone, Default)]
pub(crate) struct HandleAllocator {
    next: Rc<Cell<u64>>,
}

impl HandleAllocator {
    pub fn allocate(&self) -> ItemHandle {
        let id = self.next.get();
        self.next.set(id + 1);
        ItemHandle(id)
    }
}

/// Cloneable queue of scheduler requests.
///
/// Requests are validated and assigned a handle right away; they take effect
/// at the start or end of the scheduler's next `tick()`. A returned handle
/// only means the arguments were valid: the scheduler can still reject the
/// request when it applies it (a full per-tick list under
/// [`OverflowPolicy::Reject`](super::OverflowPolicy::Reject)), in which case
/// it is logged at `warn!` and the handle never becomes live.
#[derive(Clone)]
pub struct CommandQueue {
    pending: Rc<RefCell<VecDeque<Command>>>,
    handles: HandleAllocator,
}

impl CommandQueue {
    pub(crate) fn new(handles: HandleAllocator) -> Self {
        Self {
            pending: Rc::new(RefCell::new(VecDeque::new())),
            handles,
        }
    }

    /// Request a one-shot callback `delay` seconds after it is applied
    pub fn schedule_once<F>(&self, callback: F, delay: f64, soft: bool) -> ScheduleResult<ItemHandle>
    where
        F: FnMut(f64) + 'static,
    {
        self.schedule(callback, delay, 0.0, false, soft)
    }

    /// Request a repeating callback
    pub fn schedule_interval<F>(&self, callback: F, interval: f64, delay: f64, soft: bool) -> ScheduleResult<ItemHandle>
    where
        F: FnMut(f64) + 'static,
    {
        self.schedule(callback, delay, interval, true, soft)
    }

    /// Request an arbitrary schedule.
    ///
    /// Check [`Scheduler::is_scheduled`](super::Scheduler::is_scheduled)
    /// after the next tick to confirm the request was accepted.
    pub fn schedule<F>(&self, callback: F, delay: f64, interval: f64, repeat: bool, soft: bool) -> ScheduleResult<ItemHandle>
    where
        F: FnMut(f64) + 'static,
    {
        validate(delay, interval, repeat, soft)?;
        let handle = self.handles.allocate();
        debug!(%handle, delay, interval, repeat, soft, "CommandQueue::schedule: queued");
        self.pending.borrow_mut().push_back(Command::Schedule {
            handle,
            callback: Box::new(callback),
            delay,
            interval,
            repeat,
            soft,
        });
        Ok(handle)
    }

    /// Request removal of an item
    pub fn unschedule(&self, handle: ItemHandle) {
        debug!(%handle, "CommandQueue::unschedule: queued");
        self.pending.borrow_mut().push_back(Command::Unschedule(handle));
    }

    /// Request removal of every item
    pub fn unschedule_all(&self) {
        debug!("CommandQueue::unschedule_all: queued");
        self.pending.borrow_mut().push_back(Command::UnscheduleAll);
    }

    /// Number of requests not yet applied
    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    pub(crate) fn take(&self) -> VecDeque<Command> {
        std::mem::take(&mut *self.pending.borrow_mut())
    }
}

impl fmt::Debug for CommandQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandQueue").field("pending", &self.len()).finish()
    }
}
