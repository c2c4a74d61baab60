/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::Button;
use crate::CallbackKind;
use crate::ControllerId;
use crate::Cursor;
use crate::Native;
use crate::SceneObject;
use crate::TouchpadGesture;

use euclid::RigidTransform3D;

/// The channels an `EventBus` publishes on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "ipc", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    TriggerDown,
    TriggerUp,
    ButtonDown,
    ButtonUp,
    GestureStart,
    GestureEnd,
    /// Sent once per frame while a touchpad gesture is in progress
    GestureContinue,
}

impl From<CallbackKind> for EventKind {
    fn from(kind: CallbackKind) -> Self {
        match kind {
            CallbackKind::TriggerDown => EventKind::TriggerDown,
            CallbackKind::TriggerUp => EventKind::TriggerUp,
            CallbackKind::ButtonDown => EventKind::ButtonDown,
            CallbackKind::ButtonUp => EventKind::ButtonUp,
            CallbackKind::GestureStart => EventKind::GestureStart,
            CallbackKind::GestureEnd => EventKind::GestureEnd,
        }
    }
}

/// A device callback, together with what the cursor was pointing at
/// when it was relayed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "ipc", derive(serde::Serialize, serde::Deserialize))]
pub struct InputEvent<P> {
    pub controller_id: ControllerId,
    pub payload: P,
    /// The hovered object, if any
    pub target: Option<SceneObject>,
    pub cursor_transform: RigidTransform3D<f32, Cursor, Native>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "ipc", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// Trigger pressed, with its analog value
    TriggerDown(InputEvent<f32>),
    /// Trigger released, with its analog value
    TriggerUp(InputEvent<f32>),
    ButtonDown(InputEvent<Button>),
    ButtonUp(InputEvent<Button>),
    GestureStart(InputEvent<TouchpadGesture>),
    GestureEnd(InputEvent<TouchpadGesture>),
    GestureContinue(TouchpadGesture),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match *self {
            Event::TriggerDown(..) => EventKind::TriggerDown,
            Event::TriggerUp(..) => EventKind::TriggerUp,
            Event::ButtonDown(..) => EventKind::ButtonDown,
            Event::ButtonUp(..) => EventKind::ButtonUp,
            Event::GestureStart(..) => EventKind::GestureStart,
            Event::GestureEnd(..) => EventKind::GestureEnd,
            Event::GestureContinue(..) => EventKind::GestureContinue,
        }
    }

    /// The hovered object carried by a relayed event.
    /// Always `None` for `GestureContinue`.
    pub fn target(&self) -> Option<&SceneObject> {
        match *self {
            Event::TriggerDown(ref e) | Event::TriggerUp(ref e) => e.target.as_ref(),
            Event::ButtonDown(ref e) | Event::ButtonUp(ref e) => e.target.as_ref(),
            Event::GestureStart(ref e) | Event::GestureEnd(ref e) => e.target.as_ref(),
            Event::GestureContinue(..) => None,
        }
    }
}
