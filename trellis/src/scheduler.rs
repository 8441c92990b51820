//! Virtual-clock task scheduler.
//!
//! Two kinds of deferred work exist:
//! - Delay timers: run once the clock has advanced past their due time.
//! - Paint-boundary tasks: run at the next call to [`Scheduler::take_frame`].
//!   Tasks requested while a frame is being run land in the following frame,
//!   so nested staging always executes exactly one boundary apart.
//!
//! The clock only moves when the host advances it, which keeps every timing
//! sequence deterministic.

use std::time::Duration;

/// Cancellation token for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug)]
struct Timer<T> {
    id: TaskId,
    due: Duration,
    task: T,
}

/// Single-threaded task queue with timers and paint boundaries.
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    timers: Vec<Timer<T>>,
    frame: Vec<(TaskId, T)>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            timers: Vec::new(),
            frame: Vec::new(),
        }
    }

    /// Current position of the virtual clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    fn allocate(&mut self) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Schedule a task to run once `delay` has elapsed.
    pub fn after(&mut self, delay: Duration, task: T) -> TaskId {
        let id = self.allocate();
        self.timers.push(Timer {
            id,
            due: self.now + delay,
            task,
        });
        id
    }

    /// Schedule a task for the next paint boundary.
    pub fn next_frame(&mut self, task: T) -> TaskId {
        let id = self.allocate();
        self.frame.push((id, task));
        id
    }

    /// Cancel a pending task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        if let Some(index) = self.timers.iter().position(|timer| timer.id == id) {
            self.timers.remove(index);
            return true;
        }
        if let Some(index) = self.frame.iter().position(|(frame_id, _)| *frame_id == id) {
            self.frame.remove(index);
            return true;
        }
        false
    }

    /// Returns true if the task is still waiting to run.
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.timers.iter().any(|timer| timer.id == id)
            || self.frame.iter().any(|(frame_id, _)| *frame_id == id)
    }

    /// Returns true if a paint boundary has work queued.
    pub fn has_frame_work(&self) -> bool {
        !self.frame.is_empty()
    }

    /// Time until the earliest timer is due, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers
            .iter()
            .map(|timer| timer.due.saturating_sub(self.now))
            .min()
    }

    /// Remove and return the earliest timer due at or before `until`.
    ///
    /// Ties resolve in scheduling order. The clock moves to the timer's due
    /// time, so tasks scheduled by the returned one are measured from there.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= until)
            .min_by_key(|(_, timer)| (timer.due, timer.id))
            .map(|(index, _)| index)?;
        let timer = self.timers.remove(index);
        self.now = self.now.max(timer.due);
        Some(timer.task)
    }

    /// Move the clock forward to `until` (never backwards).
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Take every task queued for the current paint boundary.
    pub fn take_frame(&mut self) -> Vec<T> {
        std::mem::take(&mut self.frame)
            .into_iter()
            .map(|(_, task)| task)
            .collect()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
