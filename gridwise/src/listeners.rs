//! Listener bookkeeping.
//!
//! Every handler the engine installs is bound once into a slot holding its
//! `ListenerId`; deregistration goes through the same id, so teardown can
//! always find what it registered.

use std::collections::BTreeMap;

use celldom::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListenerTarget {
    Window,
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListenerKind {
    Resize,
    KeyDown,
    PointerMove,
    Click,
}

impl ListenerKind {
    /// Which listener kind receives `event`.
    pub fn of(event: &Event) -> Self {
        match event {
            Event::Key(_) => Self::KeyDown,
            Event::Click { .. } => Self::Click,
            Event::PointerMove { .. } | Event::PointerLeave => Self::PointerMove,
            Event::Resize { .. } => Self::Resize,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Debug, Default)]
pub struct Listeners {
    next_id: u64,
    bound: BTreeMap<ListenerId, (ListenerTarget, ListenerKind)>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, target: ListenerTarget, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.bound.insert(id, (target, kind));
        log::trace!("[listeners] add {id:?} {target:?} {kind:?}");
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let removed = self.bound.remove(&id).is_some();
        log::trace!("[listeners] remove {id:?} removed={removed}");
        removed
    }

    /// Register into `slot` unless it already holds a listener.
    /// Returns true if a listener was added.
    pub fn bind(
        &mut self,
        slot: &mut Option<ListenerId>,
        target: ListenerTarget,
        kind: ListenerKind,
    ) -> bool {
        if slot.is_some() {
            return false;
        }
        *slot = Some(self.add(target, kind));
        true
    }

    /// Remove the listener held by `slot`, leaving it empty.
    pub fn unbind(&mut self, slot: &mut Option<ListenerId>) -> bool {
        slot.take().is_some_and(|id| self.remove(id))
    }

    pub fn is_listening(&self, target: ListenerTarget, kind: ListenerKind) -> bool {
        self.count(target, kind) > 0
    }

    pub fn count(&self, target: ListenerTarget, kind: ListenerKind) -> usize {
        self.bound
            .values()
            .filter(|(t, k)| *t == target && *k == kind)
            .count()
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }
}
