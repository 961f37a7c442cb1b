use std::collections::BTreeMap;

use crate::foundation::core::TimeMs;

/// Handle of one scheduled timer; ties on `due` break by insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimerKey {
    due: TimeMs,
    seq: u64,
}

impl TimerKey {
    pub fn due(self) -> TimeMs {
        self.due
    }
}

/// Ordered one-shot timers carrying a payload.
#[derive(Debug)]
pub struct TimerQueue<T> {
    timers: BTreeMap<TimerKey, T>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            timers: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: TimeMs, payload: T) -> TimerKey {
        let key = TimerKey {
            due,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        let _ = self.timers.insert(key, payload);
        key
    }

    pub fn cancel(&mut self, key: TimerKey) -> Option<T> {
        self.timers.remove(&key)
    }

    pub fn next_due(&self) -> Option<TimeMs> {
        self.timers.keys().next().map(|k| k.due)
    }

    /// Remove and return the earliest timer if it is due at or before `now`.
    pub fn pop_due(&mut self, now: TimeMs) -> Option<(TimerKey, T)> {
        let key = *self.timers.keys().next()?;
        if key.due > now {
            return None;
        }
        self.timers.remove(&key).map(|payload| (key, payload))
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/timers.rs"]
mod tests;
