/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::Event;
use crate::EventKind;

use log::warn;

use std::cell::Cell;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

static NEXT_BUS_ID: AtomicU64 = AtomicU64::new(0);

pub trait EventListener: 'static {
    fn on_event(&mut self, event: &Event);
}

impl<F> EventListener for F
where
    F: FnMut(&Event) + 'static,
{
    fn on_event(&mut self, event: &Event) {
        self(event)
    }
}

type ListenerPtr = Rc<RefCell<dyn EventListener>>;

/// Returned by `EventBus::subscribe`, and used to unsubscribe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    bus: u64,
    kind: EventKind,
    id: u64,
}

impl Subscription {
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

/// Publish-subscribe channels for controller events, one per `EventKind`.
///
/// Everything happens on the thread that owns the bus. Listeners may
/// subscribe and unsubscribe while an event is being dispatched: dispatch
/// works on a snapshot of the listeners taken when it starts, so changes
/// take effect from the next dispatch.
pub struct EventBus {
    id: u64,
    listeners: RefCell<HashMap<EventKind, Vec<(u64, ListenerPtr)>>>,
    next_id: Cell<u64>,
}

impl Default for EventBus {
    fn default() -> EventBus {
        EventBus {
            id: NEXT_BUS_ID.fetch_add(1, Ordering::Relaxed),
            listeners: Default::default(),
            next_id: Cell::new(0),
        }
    }
}

impl EventBus {
    pub fn new() -> EventBus {
        Default::default()
    }

    pub fn subscribe<L: EventListener>(&self, kind: EventKind, listener: L) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let listener: ListenerPtr = Rc::new(RefCell::new(listener));
        self.listeners
            .borrow_mut()
            .entry(kind)
            .or_insert_with(Vec::new)
            .push((id, listener));
        Subscription {
            bus: self.id,
            kind,
            id,
        }
    }

    /// Returns `false` if the subscription was already gone, or came
    /// from another bus.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        if subscription.bus != self.id {
            return false;
        }
        let mut listeners = self.listeners.borrow_mut();
        let entries = match listeners.get_mut(&subscription.kind) {
            Some(entries) => entries,
            None => return false,
        };
        let before = entries.len();
        entries.retain(|&(id, _)| id != subscription.id);
        entries.len() != before
    }

    pub fn has_subscribers(&self, kind: EventKind) -> bool {
        self.subscriber_count(kind) > 0
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.listeners.borrow().get(&kind).map_or(0, Vec::len)
    }

    /// Deliver an event to every listener of its kind, returning how
    /// many listeners saw it.
    pub fn dispatch(&self, event: &Event) -> usize {
        let snapshot: Vec<ListenerPtr> = match self.listeners.borrow().get(&event.kind()) {
            Some(entries) => entries.iter().map(|(_, l)| l.clone()).collect(),
            None => return 0,
        };
        let mut delivered = 0;
        for listener in snapshot {
            // A listener that dispatches on the bus can't receive its own event.
            match listener.try_borrow_mut() {
                Ok(mut listener) => {
                    listener.on_event(event);
                    delivered += 1;
                }
                Err(_) => warn!("Skipping re-entrant delivery of {:?}", event.kind()),
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ControllerId;
    use crate::InputEvent;
    use crate::TouchpadGesture;

    use euclid::RigidTransform3D;

    use std::rc::Weak;

    fn gesture_event() -> Event {
        Event::GestureContinue(TouchpadGesture::default())
    }

    #[test]
    fn dispatch_only_reaches_listeners_of_the_same_kind() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        bus.subscribe(EventKind::GestureContinue, move |_: &Event| h.set(h.get() + 1));
        let h = hits.clone();
        bus.subscribe(EventKind::TriggerDown, move |_: &Event| h.set(h.get() + 100));

        assert_eq!(bus.dispatch(&gesture_event()), 1);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let bus = EventBus::new();
        let sub = bus.subscribe(EventKind::ButtonUp, |_: &Event| {});
        assert_eq!(bus.subscriber_count(EventKind::ButtonUp), 1);
        assert!(bus.unsubscribe(sub));
        assert!(!bus.unsubscribe(sub));
        assert!(!bus.has_subscribers(EventKind::ButtonUp));
    }

    #[test]
    fn unsubscribing_a_never_used_kind_is_a_no_op() {
        let bus = EventBus::new();
        let other = EventBus::new();
        let sub = other.subscribe(EventKind::GestureEnd, |_: &Event| {});
        assert!(!bus.unsubscribe(sub));
    }

    #[test]
    fn handles_from_another_bus_are_ignored() {
        let left = EventBus::new();
        let right = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        left.subscribe(EventKind::TriggerDown, move |_: &Event| h.set(h.get() + 1));
        let right_sub = right.subscribe(EventKind::TriggerDown, |_: &Event| {});

        assert!(!left.unsubscribe(right_sub));
        assert_eq!(left.subscriber_count(EventKind::TriggerDown), 1);
        assert_eq!(right.subscriber_count(EventKind::TriggerDown), 1);

        let trigger = Event::TriggerDown(InputEvent {
            controller_id: ControllerId(0),
            payload: 1.,
            target: None,
            cursor_transform: RigidTransform3D::identity(),
        });
        assert_eq!(left.dispatch(&trigger), 1);
        assert_eq!(hits.get(), 1);
        assert!(right.unsubscribe(right_sub));
    }

    #[test]
    fn listener_can_unsubscribe_itself_during_dispatch() {
        let bus = Rc::new(EventBus::new());
        let slot: Rc<Cell<Option<Subscription>>> = Rc::new(Cell::new(None));
        let first_hits = Rc::new(Cell::new(0));
        let second_hits = Rc::new(Cell::new(0));

        let weak: Weak<EventBus> = Rc::downgrade(&bus);
        let s = slot.clone();
        let h = first_hits.clone();
        let sub = bus.subscribe(EventKind::GestureContinue, move |_: &Event| {
            h.set(h.get() + 1);
            if let (Some(bus), Some(sub)) = (weak.upgrade(), s.get()) {
                assert!(bus.unsubscribe(sub));
            }
        });
        slot.set(Some(sub));
        let h = second_hits.clone();
        bus.subscribe(EventKind::GestureContinue, move |_: &Event| h.set(h.get() + 1));

        assert_eq!(bus.dispatch(&gesture_event()), 2);
        assert_eq!((first_hits.get(), second_hits.get()), (1, 1));

        assert_eq!(bus.dispatch(&gesture_event()), 1);
        assert_eq!((first_hits.get(), second_hits.get()), (1, 2));
    }

    #[test]
    fn removing_another_listener_mid_dispatch_does_not_drop_its_event() {
        let bus = Rc::new(EventBus::new());
        let victim: Rc<Cell<Option<Subscription>>> = Rc::new(Cell::new(None));
        let victim_hits = Rc::new(Cell::new(0));

        let weak = Rc::downgrade(&bus);
        let v = victim.clone();
        bus.subscribe(EventKind::GestureContinue, move |_: &Event| {
            if let (Some(bus), Some(sub)) = (weak.upgrade(), v.take()) {
                bus.unsubscribe(sub);
            }
        });
        let h = victim_hits.clone();
        let sub = bus.subscribe(EventKind::GestureContinue, move |_: &Event| h.set(h.get() + 1));
        victim.set(Some(sub));

        bus.dispatch(&gesture_event());
        assert_eq!(victim_hits.get(), 1);
        bus.dispatch(&gesture_event());
        assert_eq!(victim_hits.get(), 1);
    }

    #[test]
    fn subscribing_mid_dispatch_takes_effect_next_time() {
        let bus = Rc::new(EventBus::new());
        let late_hits = Rc::new(Cell::new(0));

        let weak = Rc::downgrade(&bus);
        let h = late_hits.clone();
        let mut added = false;
        bus.subscribe(EventKind::GestureContinue, move |_: &Event| {
            if added {
                return;
            }
            added = true;
            if let Some(bus) = weak.upgrade() {
                let h = h.clone();
                bus.subscribe(EventKind::GestureContinue, move |_: &Event| h.set(h.get() + 1));
            }
        });

        assert_eq!(bus.dispatch(&gesture_event()), 1);
        assert_eq!(late_hits.get(), 0);
        assert_eq!(bus.dispatch(&gesture_event()), 2);
        assert_eq!(late_hits.get(), 1);
    }

    #[test]
    fn re_entrant_dispatch_skips_the_busy_listener() {
        let bus = Rc::new(EventBus::new());
        let depth = Rc::new(Cell::new(0));
        let nested = Rc::new(Cell::new(usize::MAX));

        let weak = Rc::downgrade(&bus);
        let d = depth.clone();
        let n = nested.clone();
        bus.subscribe(EventKind::GestureContinue, move |event: &Event| {
            d.set(d.get() + 1);
            if let Some(bus) = weak.upgrade() {
                n.set(bus.dispatch(event));
            }
        });

        assert_eq!(bus.dispatch(&gesture_event()), 1);
        assert_eq!(depth.get(), 1);
        assert_eq!(nested.get(), 0);
    }
}
