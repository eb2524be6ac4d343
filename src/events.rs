//! Observable window events.
//!
//! The registry queues an event for every mutation; the window manager drains
//! the queue before returning from each operation, so observers see state
//! changes in the same call that produced them.

use crate::geometry::Bounds;
use crate::window::{SnapRegion, WindowId, WindowRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEventKind {
    Created,
    Closed,
    Focused,
    Minimized,
    Maximized,
    Restored,
    Resized(Bounds),
    Moved(Bounds),
    Snapped(SnapRegion),
    TitleUpdated,
    ContentUpdated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowEvent {
    pub id: WindowId,
    pub kind: WindowEventKind,
}

impl WindowEvent {
    pub fn new(id: WindowId, kind: WindowEventKind) -> Self {
        Self { id, kind }
    }
}

/// Derived views that need read access to the registry when reacting.
pub trait WindowObserver<C> {
    fn on_window_event(&mut self, event: &WindowEvent, registry: &WindowRegistry<C>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

pub type Listener = Box<dyn FnMut(&WindowEvent)>;

#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.listeners.push((id, listener));
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn publish(&mut self, event: &WindowEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn publish_reaches_every_listener_until_unsubscribed() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        let a = {
            let seen = Rc::clone(&seen);
            bus.subscribe(Box::new(move |e| seen.borrow_mut().push(("a", e.kind))))
        };
        {
            let seen = Rc::clone(&seen);
            bus.subscribe(Box::new(move |e| seen.borrow_mut().push(("b", e.kind))));
        }
        let id = WindowId::new(7);
        bus.publish(&WindowEvent::new(id, WindowEventKind::Focused));
        assert!(bus.unsubscribe(a));
        assert!(!bus.unsubscribe(a));
        bus.publish(&WindowEvent::new(id, WindowEventKind::Closed));

        assert_eq!(
            *seen.borrow(),
            vec![
                ("a", WindowEventKind::Focused),
                ("b", WindowEventKind::Focused),
                ("b", WindowEventKind::Closed),
            ]
        );
        assert_eq!(bus.len(), 1);
    }
}
