// ABOUTME: Window-level listener registry that tracks pointer and touch drags.
// ABOUTME: Subscriptions are scope guards that unregister their listeners on drop.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerMove,
    PointerUp,
    TouchMove,
    TouchEnd,
}

/// An event delivered at window level, outside any particular divider
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    /// Active touch points; the first one drives a drag
    TouchMove { touches: Vec<(f64, f64)> },
    TouchEnd,
}

impl HostEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            HostEvent::PointerMove { .. } => EventKind::PointerMove,
            HostEvent::PointerUp { .. } => EventKind::PointerUp,
            HostEvent::TouchMove { .. } => EventKind::TouchMove,
            HostEvent::TouchEnd => EventKind::TouchEnd,
        }
    }

    /// Horizontal coordinate of a move event, if it carries one
    pub fn move_x(&self) -> Option<f64> {
        match self {
            HostEvent::PointerMove { x, .. } => Some(*x),
            HostEvent::TouchMove { touches } => touches.first().map(|(x, _)| *x),
            _ => None,
        }
    }

    pub fn is_release(&self) -> bool {
        matches!(self, HostEvent::PointerUp { .. } | HostEvent::TouchEnd)
    }
}

type Handler = Rc<dyn Fn(&HostEvent)>;

struct Listener {
    id: u64,
    kind: EventKind,
    handler: Handler,
}

/// Single-threaded stand-in for the window's event target
#[derive(Default)]
pub struct EventHub {
    listeners: RefCell<Vec<Listener>>,
    next_id: Cell<u64>,
}

impl EventHub {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Register one handler for every kind in `kinds`. The listeners live
    /// until the returned guard is dropped.
    pub fn subscribe(
        self: &Rc<Self>,
        kinds: &[EventKind],
        handler: impl Fn(&HostEvent) + 'static,
    ) -> Subscription {
        let handler: Handler = Rc::new(handler);
        let mut listeners = self.listeners.borrow_mut();
        let mut ids = Vec::with_capacity(kinds.len());

        for &kind in kinds {
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            listeners.push(Listener {
                id,
                kind,
                handler: Rc::clone(&handler),
            });
            ids.push(id);
        }

        Subscription {
            hub: Rc::downgrade(self),
            ids,
        }
    }

    /// Deliver an event to every listener of its kind, in registration order.
    /// Returns how many handlers ran.
    pub fn dispatch(&self, event: &HostEvent) -> usize {
        let kind = event.kind();
        let snapshot: Vec<(u64, Handler)> = self
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.kind == kind)
            .map(|l| (l.id, Rc::clone(&l.handler)))
            .collect();

        let mut delivered = 0;
        for (id, handler) in snapshot {
            // An earlier handler in this dispatch may have unsubscribed it
            if !self.is_registered(id) {
                continue;
            }
            handler(event);
            delivered += 1;
        }
        delivered
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn listener_count_for(&self, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|l| l.kind == kind)
            .count()
    }

    fn is_registered(&self, id: u64) -> bool {
        self.listeners.borrow().iter().any(|l| l.id == id)
    }

    fn remove(&self, ids: &[u64]) {
        self.listeners
            .borrow_mut()
            .retain(|l| !ids.contains(&l.id));
    }
}

impl fmt::Debug for EventHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Guard for listeners registered through [`EventHub::subscribe`]
#[must_use = "dropping a Subscription unregisters its listeners"]
pub struct Subscription {
    hub: Weak<EventHub>,
    ids: Vec<u64>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.remove(&self.ids);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("ids", &self.ids).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_subscription_unregisters() {
        let hub = EventHub::new();
        let sub = hub.subscribe(&[EventKind::PointerMove, EventKind::PointerUp], |_| {});
        assert_eq!(hub.listener_count(), 2);

        drop(sub);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn dispatch_only_reaches_matching_kind() {
        let hub = EventHub::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let _sub = hub.subscribe(&[EventKind::TouchMove], move |_| {
            counter.set(counter.get() + 1)
        });

        assert_eq!(hub.dispatch(&HostEvent::PointerMove { x: 1.0, y: 1.0 }), 0);
        assert_eq!(
            hub.dispatch(&HostEvent::TouchMove {
                touches: vec![(1.0, 1.0)]
            }),
            1
        );
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn handler_removed_mid_dispatch_is_skipped() {
        let hub = EventHub::new();
        let second_ran = Rc::new(Cell::new(false));

        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&victim);
        let _first = hub.subscribe(&[EventKind::PointerUp], move |_| {
            slot.borrow_mut().take();
        });

        let flag = Rc::clone(&second_ran);
        *victim.borrow_mut() = Some(hub.subscribe(&[EventKind::PointerUp], move |_| {
            flag.set(true)
        }));

        assert_eq!(hub.dispatch(&HostEvent::PointerUp { x: 0.0, y: 0.0 }), 1);
        assert!(!second_ran.get());
        assert_eq!(hub.listener_count(), 1);
    }

    #[test]
    fn subscription_outliving_hub_is_harmless() {
        let hub = EventHub::new();
        let sub = hub.subscribe(&[EventKind::TouchEnd], |_| {});
        drop(hub);
        drop(sub);
    }

    #[test]
    fn move_x_uses_first_touch() {
        let event = HostEvent::TouchMove {
            touches: vec![(12.0, 3.0), (40.0, 5.0)],
        };
        assert_eq!(event.move_x(), Some(12.0));
        assert_eq!(HostEvent::TouchMove { touches: vec![] }.move_x(), None);
        assert_eq!(HostEvent::TouchEnd.move_x(), None);
    }
}
