//! Deterministic one-shot timer queue.
//!
//! Key properties:
//! - Timers fire in `(due, id)` order; timers with equal deadlines fire in
//!   scheduling order.
//! - Cancellation does not perturb the order of remaining timers.
//! - Time never advances on its own: callers pass `now` to [`TimerQueue::pop_due`].
//!
//! Vec-backed. A page rarely holds more than two pending timers.

use foundation::time::Time;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

#[derive(Debug)]
struct Entry<T> {
    id: TimerId,
    due: Time,
    payload: T,
}

impl<T> Entry<T> {
    fn fires_before(&self, other: &Entry<T>) -> bool {
        match self.due.0.total_cmp(&other.due.0) {
            core::cmp::Ordering::Less => true,
            core::cmp::Ordering::Greater => false,
            core::cmp::Ordering::Equal => self.id < other.id,
        }
    }
}

#[derive(Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn schedule(&mut self, due: Time, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push(Entry { id, due, payload });
        id
    }

    /// Removes a pending timer. Returns `false` if it already fired or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Earliest pending deadline, if any.
    pub fn next_due(&self) -> Option<Time> {
        self.earliest().map(|idx| self.entries[idx].due)
    }

    /// Pops the earliest timer whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Time) -> Option<(TimerId, T)> {
        let idx = self.earliest()?;
        if self.entries[idx].due.0 > now.0 {
            return None;
        }
        let entry = self.entries.remove(idx);
        Some((entry.id, entry.payload))
    }

    fn earliest(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (idx, entry) in self.entries.iter().enumerate() {
            match best {
                None => best = Some(idx),
                Some(b) => {
                    if entry.fires_before(&self.entries[b]) {
                        best = Some(idx);
                    }
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::TimerQueue;
    use foundation::time::Time;

    #[test]
    fn fires_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(Time(30.0), "late");
        q.schedule(Time(10.0), "early");

        assert_eq!(q.next_due(), Some(Time(10.0)));
        let (_, a) = q.pop_due(Time(100.0)).unwrap();
        let (_, b) = q.pop_due(Time(100.0)).unwrap();
        assert_eq!((a, b), ("early", "late"));
    }

    #[test]
    fn equal_deadlines_fire_in_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(Time(5.0), "a");
        q.schedule(Time(5.0), "b");
        let (_, a) = q.pop_due(Time(5.0)).unwrap();
        let (_, b) = q.pop_due(Time(5.0)).unwrap();
        assert_eq!((a, b), ("a", "b"));
    }

    #[test]
    fn nothing_fires_before_its_deadline() {
        let mut q = TimerQueue::new();
        q.schedule(Time(500.0), ());
        assert!(q.pop_due(Time(499.9)).is_none());
        assert_eq!(q.len(), 1);
        assert!(q.pop_due(Time(500.0)).is_some());
        assert!(q.is_empty());
    }

    #[test]
    fn cancel_removes_only_that_timer() {
        let mut q = TimerQueue::new();
        let a = q.schedule(Time(1.0), "a");
        q.schedule(Time(2.0), "b");
        assert!(q.cancel(a));
        assert!(!q.cancel(a));
        assert_eq!(q.len(), 1);

        let (_, v) = q.pop_due(Time(10.0)).unwrap();
        assert_eq!(v, "b");
        assert!(q.pop_due(Time(10.0)).is_none());
    }
}
