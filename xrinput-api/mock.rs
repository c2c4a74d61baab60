/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::Button;
use crate::ControllerId;
use crate::ControllerType;
use crate::DiscoveryAPI;
use crate::Error;
use crate::GestureState;
use crate::Pose;
use crate::Receiver;
use crate::TouchpadGesture;

#[cfg(feature = "ipc")]
use serde::{Deserialize, Serialize};

/// A trait for discovering mock XR input devices
pub trait MockDiscoveryAPI: 'static {
    fn simulate_device_connection(
        &mut self,
        init: MockDeviceInit,
        receiver: Receiver<MockDeviceMsg>,
    ) -> Result<Box<dyn DiscoveryAPI>, Error>;
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub struct MockDeviceInit {
    /// Whether the device runtime is reachable
    pub connected: bool,
    pub controllers: Vec<MockControllerInit>,
}

impl Default for MockDeviceInit {
    fn default() -> Self {
        MockDeviceInit {
            connected: true,
            controllers: vec![],
        }
    }
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub struct MockControllerInit {
    pub id: ControllerId,
    pub controller_type: ControllerType,
    /// `None` until the controller is tracked
    pub pose: Option<Pose>,
}

#[derive(Debug)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub enum MockDeviceMsg {
    AddController(MockControllerInit),
    MessageController(ControllerId, MockControllerMsg),
    /// The runtime stops responding
    Disconnect,
    Reconnect,
}

#[derive(Debug)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub enum MockControllerMsg {
    SetPose(Option<Pose>),
    SetGesture(Option<GestureState>, TouchpadGesture),
    TriggerDown(f32),
    TriggerUp(f32),
    ButtonDown(Button),
    ButtonUp(Button),
    GestureStart(TouchpadGesture),
    GestureEnd(TouchpadGesture),
    Disconnect,
    Reconnect,
}
