//! Timeouts and intervals for a single-threaded event loop.
//!
//! The queue never reads the clock: callers pass `now` in, so the same code
//! runs under a real loop and under tests that step time by hand.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Handle returned when scheduling; used to cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer<T> {
    deadline: Instant,
    /// Some for intervals.
    period: Option<Duration>,
    payload: T,
}

#[derive(Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    timers: BTreeMap<TimerId, Timer<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            timers: BTreeMap::new(),
        }
    }
}

impl<T: Clone> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `payload` once, `delay` after `now`.
    pub fn set_timeout(&mut self, now: Instant, delay: Duration, payload: T) -> TimerId {
        self.schedule(now + delay, None, payload)
    }

    /// Fire `payload` every `period` starting `period` after `now`.
    /// A zero period is raised to one millisecond.
    pub fn set_interval(&mut self, now: Instant, period: Duration, payload: T) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        self.schedule(now + period, Some(period), payload)
    }

    fn schedule(&mut self, deadline: Instant, period: Option<Duration>, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(
            id,
            Timer {
                deadline,
                period,
                payload,
            },
        );
        id
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn clear(&mut self, id: TimerId) -> bool {
        let cleared = self.timers.remove(&id).is_some();
        log::trace!("clear {id:?} cleared={cleared}");
        cleared
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().map(|t| t.deadline).min()
    }

    /// Pop the earliest timer due at `now` (ties go to the oldest).
    ///
    /// Timeouts are removed. Intervals are re-armed at the first period
    /// boundary after `now`; ticks missed during a stall are dropped.
    pub fn pop_due(&mut self, now: Instant) -> Option<(TimerId, T)> {
        let (&id, _) = self
            .timers
            .iter()
            .filter(|(_, t)| t.deadline <= now)
            .min_by_key(|(id, t)| (t.deadline, **id))?;

        let timer = self.timers.get_mut(&id)?;
        match timer.period {
            Some(period) => {
                let behind = now.duration_since(timer.deadline).as_nanos() / period.as_nanos();
                let skipped = u32::try_from(behind).unwrap_or(u32::MAX - 1);
                timer.deadline += period * (skipped + 1);
                Some((id, timer.payload.clone()))
            }
            None => self.timers.remove(&id).map(|t| (id, t.payload)),
        }
    }
}
