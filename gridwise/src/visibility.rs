//! Overflow gate for the fullscreen affordance.

use std::time::{Duration, Instant};

use celldom::element::find_element_mut;
use celldom::{Element, TimerId, TimerQueue};

use crate::markup::OPEN_BUTTON_ID;

/// Runs a task once the trigger has been quiet for `delay`. Each trigger
/// replaces the pending timer, so a burst fires once, timed from its last
/// trigger.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<TimerId>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn pending(&self) -> Option<TimerId> {
        self.pending
    }

    pub fn trigger<T: Clone>(&mut self, timers: &mut TimerQueue<T>, now: Instant, payload: T) -> TimerId {
        if let Some(pending) = self.pending.take() {
            timers.clear(pending);
        }
        let id = timers.set_timeout(now, self.delay, payload);
        self.pending = Some(id);
        id
    }

    /// Accept a fired timer. False for timers this debouncer no longer owns.
    pub fn take_fired(&mut self, id: TimerId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel<T: Clone>(&mut self, timers: &mut TimerQueue<T>) {
        if let Some(pending) = self.pending.take() {
            timers.clear(pending);
        }
    }
}

pub fn is_overflowing(table_width: u16, wrapper_width: u16) -> bool {
    table_width > wrapper_width
}

/// Show or hide the open affordance. Returns false if it isn't rendered.
pub fn set_open_affordance(shadow: &mut Element, visible: bool) -> bool {
    match find_element_mut(shadow, OPEN_BUTTON_ID) {
        Some(button) => {
            button.hidden = !visible;
            true
        }
        None => {
            log::warn!("[visibility] open affordance missing");
            false
        }
    }
}
