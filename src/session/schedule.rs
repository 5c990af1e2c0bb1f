//! Delayed-task scheduling for the countdown loop.
//!
//! The controller chains single-shot tasks instead of using a recurring
//! timer: each tick schedules the next one, so cancellation is "do not
//! reschedule" plus clearing the pending slot. At most one task is
//! pending at any time. Tasks carry the controller epoch at scheduling
//! time so a fire that races a cancellation can be discarded.

use std::time::{Duration, Instant};

/// A task the controller can schedule for later dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// One countdown step.
    Tick,
    /// Automatic start of the next phase.
    AutoStart,
}

/// A scheduled task with its deadline and epoch stamp.
#[derive(Debug, Clone, Copy)]
pub struct Scheduled {
    /// What to dispatch.
    pub task: Task,
    /// When the task becomes due.
    pub due: Instant,
    /// Controller epoch at scheduling time.
    pub epoch: u64,
}

/// Single-slot scheduler polled by the event loop.
#[derive(Debug, Default)]
pub struct TickScheduler {
    pending: Option<Scheduled>,
}

impl TickScheduler {
    /// Schedule `task` to fire after `delay`, replacing any pending task.
    pub fn schedule(&mut self, task: Task, delay: Duration, epoch: u64) {
        self.pending = Some(Scheduled {
            task,
            due: Instant::now() + delay,
            epoch,
        });
    }

    /// Cancel the pending task, if any. Once cancelled it can never fire.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Take the pending task if its deadline has passed.
    pub fn pop_due(&mut self, now: Instant) -> Option<Scheduled> {
        if self.pending.is_some_and(|s| s.due <= now) {
            self.pending.take()
        } else {
            None
        }
    }

    /// Deadline of the pending task, used to size the event-loop poll.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|s| s.due)
    }

    /// Kind of the pending task, if any.
    #[must_use]
    pub fn next_task(&self) -> Option<Task> {
        self.pending.map(|s| s.task)
    }
}
