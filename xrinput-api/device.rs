/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Traits to be implemented by backends

use crate::Button;
use crate::ControllerFrame;
use crate::ControllerId;
use crate::DeviceType;
use crate::Error;
use crate::TouchpadGesture;

use std::iter::FromIterator;

/// A trait for discovering controllers
pub trait DiscoveryAPI: 'static {
    /// Bind to a controller of the given type. Fails if the device
    /// runtime can't be reached, or no controller is connected.
    fn request_device(&mut self, device_type: DeviceType) -> Result<Box<dyn DeviceAPI>, Error>;
    fn supports_device(&self, device_type: DeviceType) -> bool;
}

/// A trait for using a controller
pub trait DeviceAPI: 'static {
    fn controller_id(&self) -> ControllerId;

    /// The latest state of the controller, or `None` if the
    /// runtime has nothing to report this frame.
    fn sample(&mut self) -> Option<ControllerFrame>;

    /// Hand every pending discrete callback to `sink`, in the order
    /// the runtime produced them.
    fn poll_callbacks(&mut self, sink: &mut dyn FnMut(DeviceCallback));

    /// Release the controller. The device is dropped afterwards.
    fn quit(&mut self);
}

/// Discrete callbacks reported by the device runtime.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "ipc", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceCallback {
    TriggerDown(ControllerId, f32),
    TriggerUp(ControllerId, f32),
    ButtonDown(ControllerId, Button),
    ButtonUp(ControllerId, Button),
    GestureStart(ControllerId, TouchpadGesture),
    GestureEnd(ControllerId, TouchpadGesture),
}

impl DeviceCallback {
    pub fn kind(&self) -> CallbackKind {
        match *self {
            DeviceCallback::TriggerDown(..) => CallbackKind::TriggerDown,
            DeviceCallback::TriggerUp(..) => CallbackKind::TriggerUp,
            DeviceCallback::ButtonDown(..) => CallbackKind::ButtonDown,
            DeviceCallback::ButtonUp(..) => CallbackKind::ButtonUp,
            DeviceCallback::GestureStart(..) => CallbackKind::GestureStart,
            DeviceCallback::GestureEnd(..) => CallbackKind::GestureEnd,
        }
    }

    pub fn controller_id(&self) -> ControllerId {
        match *self {
            DeviceCallback::TriggerDown(id, _) | DeviceCallback::TriggerUp(id, _) => id,
            DeviceCallback::ButtonDown(id, _) | DeviceCallback::ButtonUp(id, _) => id,
            DeviceCallback::GestureStart(id, _) | DeviceCallback::GestureEnd(id, _) => id,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "ipc", derive(serde::Serialize, serde::Deserialize))]
pub enum CallbackKind {
    TriggerDown,
    TriggerUp,
    ButtonDown,
    ButtonUp,
    GestureStart,
    GestureEnd,
}

impl CallbackKind {
    pub const ALL: [CallbackKind; 6] = [
        CallbackKind::TriggerDown,
        CallbackKind::TriggerUp,
        CallbackKind::ButtonDown,
        CallbackKind::ButtonUp,
        CallbackKind::GestureStart,
        CallbackKind::GestureEnd,
    ];
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "ipc", derive(serde::Serialize, serde::Deserialize))]
/// The set of callbacks registered on a session
pub struct CallbackKinds {
    pub trigger_down: bool,
    pub trigger_up: bool,
    pub button_down: bool,
    pub button_up: bool,
    pub gesture_start: bool,
    pub gesture_end: bool,
}

impl CallbackKinds {
    pub fn all() -> CallbackKinds {
        CallbackKind::ALL.iter().cloned().collect()
    }

    pub fn is_empty(self) -> bool {
        self == CallbackKinds::default()
    }

    pub fn contains(self, kind: CallbackKind) -> bool {
        match kind {
            CallbackKind::TriggerDown => self.trigger_down,
            CallbackKind::TriggerUp => self.trigger_up,
            CallbackKind::ButtonDown => self.button_down,
            CallbackKind::ButtonUp => self.button_up,
            CallbackKind::GestureStart => self.gesture_start,
            CallbackKind::GestureEnd => self.gesture_end,
        }
    }

    /// Returns whether the kind was newly added.
    pub fn insert(&mut self, kind: CallbackKind) -> bool {
        !std::mem::replace(self.slot(kind), true)
    }

    /// Returns whether the kind was present.
    pub fn remove(&mut self, kind: CallbackKind) -> bool {
        std::mem::replace(self.slot(kind), false)
    }

    fn slot(&mut self, kind: CallbackKind) -> &mut bool {
        match kind {
            CallbackKind::TriggerDown => &mut self.trigger_down,
            CallbackKind::TriggerUp => &mut self.trigger_up,
            CallbackKind::ButtonDown => &mut self.button_down,
            CallbackKind::ButtonUp => &mut self.button_up,
            CallbackKind::GestureStart => &mut self.gesture_start,
            CallbackKind::GestureEnd => &mut self.gesture_end,
        }
    }
}

impl FromIterator<CallbackKind> for CallbackKinds {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = CallbackKind>,
    {
        iter.into_iter().fold(Default::default(), |mut acc, k| {
            acc.insert(k);
            acc
        })
    }
}
