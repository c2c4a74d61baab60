/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use log::debug;

use xrinput_api::CursorAPI;
use xrinput_api::DeviceCallback;
use xrinput_api::Event;
use xrinput_api::EventBus;
use xrinput_api::EventKind;
use xrinput_api::InputEvent;

/// Turns device callbacks into bus events that also say what the
/// cursor was pointing at.
pub struct EventRelay {
    cursor: Box<dyn CursorAPI>,
}

impl EventRelay {
    pub fn new<C: CursorAPI>(cursor: C) -> EventRelay {
        EventRelay {
            cursor: Box::new(cursor),
        }
    }

    /// Publish `callback` on `bus`. The cursor is only consulted when
    /// somebody is listening. Returns whether an event was published.
    pub fn relay(&self, callback: DeviceCallback, bus: &EventBus) -> bool {
        let kind = EventKind::from(callback.kind());
        if !bus.has_subscribers(kind) {
            return false;
        }

        let target = self.cursor.hovered_object();
        let cursor_transform = self.cursor.adjusted_transform();
        let controller_id = callback.controller_id();
        let event = match callback {
            DeviceCallback::TriggerDown(_, value) => Event::TriggerDown(InputEvent {
                controller_id,
                payload: value,
                target,
                cursor_transform,
            }),
            DeviceCallback::TriggerUp(_, value) => Event::TriggerUp(InputEvent {
                controller_id,
                payload: value,
                target,
                cursor_transform,
            }),
            DeviceCallback::ButtonDown(_, button) => Event::ButtonDown(InputEvent {
                controller_id,
                payload: button,
                target,
                cursor_transform,
            }),
            DeviceCallback::ButtonUp(_, button) => Event::ButtonUp(InputEvent {
                controller_id,
                payload: button,
                target,
                cursor_transform,
            }),
            DeviceCallback::GestureStart(_, gesture) => Event::GestureStart(InputEvent {
                controller_id,
                payload: gesture,
                target,
                cursor_transform,
            }),
            DeviceCallback::GestureEnd(_, gesture) => Event::GestureEnd(InputEvent {
                controller_id,
                payload: gesture,
                target,
                cursor_transform,
            }),
        };
        let delivered = bus.dispatch(&event);
        debug!("Relayed {:?} to {} listeners", kind, delivered);
        true
    }
}
