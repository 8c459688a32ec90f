use foundation::time::Time;
use tracing::debug;

use crate::timer::{TimerId, TimerQueue};

/// A replaceable one-shot task.
///
/// Each [`Debounce::trigger`] cancels the previously scheduled firing and
/// schedules a fresh one `delay_ms` later, so only the last request in a
/// burst survives. The owner reports firings back through
/// [`Debounce::acknowledge`] so stale ids are recognized.
#[derive(Debug, Clone)]
pub struct Debounce {
    label: &'static str,
    delay_ms: f64,
    pending: Option<TimerId>,
}

impl Debounce {
    pub fn new(label: &'static str, delay_ms: f64) -> Self {
        Self {
            label,
            delay_ms: delay_ms.max(0.0),
            pending: None,
        }
    }

    pub fn pending(&self) -> Option<TimerId> {
        self.pending
    }

    pub fn trigger<T>(&mut self, now: Time, queue: &mut TimerQueue<T>, payload: T) -> TimerId {
        if let Some(previous) = self.pending.take() {
            if queue.cancel(previous) {
                debug!(task = self.label, "replaced pending timer");
            }
        }
        let due = now.after(self.delay_ms);
        let id = queue.schedule(due, payload);
        debug!(task = self.label, due_ms = due.as_ms(), "scheduled");
        self.pending = Some(id);
        id
    }

    /// Marks `id` as fired. Returns `true` if it was this task's live timer.
    pub fn acknowledge(&mut self, id: TimerId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
