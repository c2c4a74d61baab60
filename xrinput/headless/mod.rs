/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! A device runtime that exists only in memory, driven by `MockDeviceMsg`s.
//! Messages are drained on the host thread whenever the runtime is queried.

use log::debug;
use log::warn;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use xrinput_api::ControllerFrame;
use xrinput_api::ControllerId;
use xrinput_api::ControllerType;
use xrinput_api::DeviceAPI;
use xrinput_api::DeviceCallback;
use xrinput_api::DeviceType;
use xrinput_api::DiscoveryAPI;
use xrinput_api::Error;
use xrinput_api::GestureState;
use xrinput_api::MockControllerInit;
use xrinput_api::MockControllerMsg;
use xrinput_api::MockDeviceInit;
use xrinput_api::MockDeviceMsg;
use xrinput_api::MockDiscoveryAPI;
use xrinput_api::Pose;
use xrinput_api::Receiver;
use xrinput_api::TouchpadGesture;

pub struct HeadlessMockDiscovery {}

struct HeadlessDiscovery {
    data: Rc<RefCell<HeadlessDeviceData>>,
}

struct ControllerInfo {
    id: ControllerId,
    controller_type: ControllerType,
    active: bool,
    /// Whether a session has bound this controller
    attached: bool,
    pose: Option<Pose>,
    gesture_state: Option<GestureState>,
    gesture: TouchpadGesture,
}

struct HeadlessDevice {
    data: Rc<RefCell<HeadlessDeviceData>>,
    id: ControllerId,
}

struct HeadlessDeviceData {
    receiver: Receiver<MockDeviceMsg>,
    connected: bool,
    controllers: Vec<ControllerInfo>,
    callbacks: VecDeque<DeviceCallback>,
}

impl MockDiscoveryAPI for HeadlessMockDiscovery {
    fn simulate_device_connection(
        &mut self,
        init: MockDeviceInit,
        receiver: Receiver<MockDeviceMsg>,
    ) -> Result<Box<dyn DiscoveryAPI>, Error> {
        let controllers = init.controllers.into_iter().map(ControllerInfo::new).collect();
        let data = HeadlessDeviceData {
            receiver,
            connected: init.connected,
            controllers,
            callbacks: VecDeque::new(),
        };
        Ok(Box::new(HeadlessDiscovery {
            data: Rc::new(RefCell::new(data)),
        }))
    }
}

impl HeadlessMockDiscovery {
    pub fn new() -> HeadlessMockDiscovery {
        HeadlessMockDiscovery {}
    }
}

impl DiscoveryAPI for HeadlessDiscovery {
    fn request_device(&mut self, device_type: DeviceType) -> Result<Box<dyn DeviceAPI>, Error> {
        let mut data = self.data.borrow_mut();
        data.pump();
        if !data.connected {
            return Err(Error::DeviceUnavailable);
        }
        let id = data.find(device_type).ok_or(Error::NoMatchingDevice)?;
        if let Some(info) = data.controller_mut(id) {
            info.attached = true;
        }
        Ok(Box::new(HeadlessDevice {
            data: self.data.clone(),
            id,
        }))
    }

    fn supports_device(&self, device_type: DeviceType) -> bool {
        let mut data = self.data.borrow_mut();
        data.pump();
        data.connected && data.find(device_type).is_some()
    }
}

impl DeviceAPI for HeadlessDevice {
    fn controller_id(&self) -> ControllerId {
        self.id
    }

    fn sample(&mut self) -> Option<ControllerFrame> {
        let mut data = self.data.borrow_mut();
        data.pump();
        if !data.connected {
            return None;
        }
        let info = data.controller_mut(self.id).filter(|info| info.active)?;
        Some(ControllerFrame {
            id: info.id,
            pose: info.pose?,
            gesture_state: info.gesture_state,
            gesture: info.gesture,
        })
    }

    fn poll_callbacks(&mut self, sink: &mut dyn FnMut(DeviceCallback)) {
        // The data must not stay borrowed while the sink runs.
        loop {
            let callback = {
                let mut data = self.data.borrow_mut();
                data.pump();
                data.callbacks.pop_front()
            };
            match callback {
                Some(callback) => sink(callback),
                None => break,
            }
        }
    }

    fn quit(&mut self) {
        let mut data = self.data.borrow_mut();
        let id = self.id;
        if let Some(info) = data.controller_mut(id) {
            info.attached = false;
        }
        data.callbacks.retain(|callback| callback.controller_id() != id);
    }
}

impl ControllerInfo {
    fn new(init: MockControllerInit) -> ControllerInfo {
        ControllerInfo {
            id: init.id,
            controller_type: init.controller_type,
            active: true,
            attached: false,
            pose: init.pose,
            gesture_state: None,
            gesture: TouchpadGesture::default(),
        }
    }
}

impl HeadlessDeviceData {
    fn pump(&mut self) {
        while let Ok(msg) = self.receiver.try_recv() {
            self.handle_msg(msg);
        }
    }

    fn find(&self, device_type: DeviceType) -> Option<ControllerId> {
        device_type.preference().iter().find_map(|ty| {
            self.controllers
                .iter()
                .find(|info| info.active && info.controller_type == *ty)
                .map(|info| info.id)
        })
    }

    fn controller_mut(&mut self, id: ControllerId) -> Option<&mut ControllerInfo> {
        self.controllers.iter_mut().find(|info| info.id == id)
    }

    fn handle_msg(&mut self, msg: MockDeviceMsg) {
        match msg {
            MockDeviceMsg::AddController(init) => {
                if self.controllers.iter().any(|info| info.id == init.id) {
                    warn!("Controller {:?} was already added", init.id);
                    return;
                }
                self.controllers.push(ControllerInfo::new(init));
            }
            MockDeviceMsg::Disconnect => {
                self.connected = false;
                self.callbacks.clear();
            }
            MockDeviceMsg::Reconnect => self.connected = true,
            MockDeviceMsg::MessageController(id, msg) => {
                let connected = self.connected;
                let info = match self.controllers.iter_mut().find(|info| info.id == id) {
                    Some(info) => info,
                    None => {
                        warn!("Message for unknown controller {:?}", id);
                        return;
                    }
                };
                let callback = match msg {
                    MockControllerMsg::SetPose(pose) => {
                        info.pose = pose;
                        None
                    }
                    MockControllerMsg::SetGesture(state, gesture) => {
                        info.gesture_state = state;
                        info.gesture = gesture;
                        None
                    }
                    MockControllerMsg::TriggerDown(v) => Some(DeviceCallback::TriggerDown(id, v)),
                    MockControllerMsg::TriggerUp(v) => Some(DeviceCallback::TriggerUp(id, v)),
                    MockControllerMsg::ButtonDown(b) => Some(DeviceCallback::ButtonDown(id, b)),
                    MockControllerMsg::ButtonUp(b) => Some(DeviceCallback::ButtonUp(id, b)),
                    MockControllerMsg::GestureStart(g) => {
                        Some(DeviceCallback::GestureStart(id, g))
                    }
                    MockControllerMsg::GestureEnd(g) => Some(DeviceCallback::GestureEnd(id, g)),
                    MockControllerMsg::Disconnect => {
                        info.active = false;
                        None
                    }
                    MockControllerMsg::Reconnect => {
                        info.active = true;
                        None
                    }
                };
                if let Some(callback) = callback {
                    // Nobody is bound to hear it.
                    if !(connected && info.active && info.attached) {
                        debug!("Dropping {:?}", callback);
                        return;
                    }
                    self.callbacks.push_back(callback);
                }
            }
        }
    }
}
