/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::GestureState;
use crate::Input;
use crate::Native;
use crate::TouchpadGesture;

use euclid::RigidTransform3D;

/// The position and orientation of a tracked controller.
pub type Pose = RigidTransform3D<f32, Input, Native>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "ipc", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerId(pub u8);

/// Which kind of controller a session should bind to.
/// The preferred kind is tried first, then the other one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "ipc", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceType {
    ControllerFirst,
    MobileAppFirst,
}

impl DeviceType {
    /// The controller types to try, in order.
    pub fn preference(self) -> [ControllerType; 2] {
        match self {
            DeviceType::ControllerFirst => [ControllerType::Device, ControllerType::MobileApp],
            DeviceType::MobileAppFirst => [ControllerType::MobileApp, ControllerType::Device],
        }
    }
}

impl Default for DeviceType {
    fn default() -> Self {
        DeviceType::ControllerFirst
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "ipc", derive(serde::Serialize, serde::Deserialize))]
pub enum ControllerType {
    /// A physical handheld controller
    Device,
    /// A phone running the companion controller app
    MobileApp,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "ipc", derive(serde::Serialize, serde::Deserialize))]
pub enum Button {
    Move,
    App,
    Bumper,
    HomeTap,
}

/// The state of a controller, sampled once per frame.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "ipc", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerFrame {
    pub id: ControllerId,
    pub pose: Pose,
    /// `None` while nothing touches the touchpad
    pub gesture_state: Option<GestureState>,
    pub gesture: TouchpadGesture,
}
