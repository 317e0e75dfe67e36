//! Deadline-ordered one-shot timers on the component's own clock.

use std::time::Duration;

use crate::ids::{IdAllocator, TimerId};

#[derive(Debug)]
struct Timer<T> {
    id: TimerId,
    due: Duration,
    task: T,
}

/// Pending one-shot timers. Nothing fires on its own: the owner passes its clock to
/// [`TimerQueue::take_due`] and runs whatever comes back.
#[derive(Debug)]
pub struct TimerQueue<T> {
    ids: IdAllocator,
    timers: Vec<Timer<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            ids: IdAllocator::new(),
            timers: Vec::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Duration, delay: Duration, task: T) -> TimerId {
        let id = self.ids.alloc_timer();
        self.timers.push(Timer {
            id,
            due: now + delay,
            task,
        });
        id
    }

    /// Returns false if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Drop every pending timer, returning how many there were.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.timers.len();
        self.timers.clear();
        n
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Remove and return the timers due at `now`, earliest deadline first; ties fire in
    /// scheduling order.
    pub fn take_due(&mut self, now: Duration) -> Vec<(TimerId, T)> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.timers.len() {
            if self.timers[i].due <= now {
                due.push(self.timers.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.due.cmp(&b.due).then(a.id.cmp(&b.id)));
        due.into_iter().map(|t| (t.id, t.task)).collect()
    }
}
