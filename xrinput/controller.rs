/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::EventRelay;

use log::debug;
use log::info;

use std::rc::Rc;

use xrinput_api::CallbackKind;
use xrinput_api::CursorAPI;
use xrinput_api::DeviceType;
use xrinput_api::DiscoveryAPI;
use xrinput_api::Error;
use xrinput_api::EventBus;
use xrinput_api::SceneNodeAPI;
use xrinput_api::Session;

/// Which callbacks `InputController::disable` unregisters.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ipc", derive(serde::Serialize, serde::Deserialize))]
pub enum DisablePolicy {
    /// Unregister everything `enable` registered.
    Mirror,
    /// Unregister trigger and gesture callbacks, but keep button
    /// callbacks registered so buttons are still relayed while disabled.
    PreserveButtons,
}

impl DisablePolicy {
    fn released(self) -> &'static [CallbackKind] {
        match self {
            DisablePolicy::Mirror => &CallbackKind::ALL,
            DisablePolicy::PreserveButtons => &[
                CallbackKind::TriggerUp,
                CallbackKind::TriggerDown,
                CallbackKind::GestureStart,
                CallbackKind::GestureEnd,
            ],
        }
    }
}

#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "ipc", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerInit {
    pub device_type: DeviceType,
    pub disable_policy: DisablePolicy,
    /// Panic, in debug builds, when an enabled controller's open session
    /// stops producing samples.
    pub strict: bool,
}

impl Default for ControllerInit {
    fn default() -> Self {
        ControllerInit {
            device_type: DeviceType::ControllerFirst,
            disable_policy: DisablePolicy::Mirror,
            strict: false,
        }
    }
}

/// Binds a scene node to a controller: the node follows the controller's
/// pose, and the controller's callbacks are published on an `EventBus`
/// along with what the cursor is hovering.
///
/// The host drives it through `initialize`, `enable`, `tick`, `disable`
/// and `shutdown`, all on the same thread.
pub struct InputController {
    init: ControllerInit,
    session: Session,
    relay: EventRelay,
    node: Box<dyn SceneNodeAPI>,
    bus: Rc<EventBus>,
    enabled: bool,
}

impl InputController {
    pub fn new<D, C, N>(discovery: D, cursor: C, node: N, init: ControllerInit) -> InputController
    where
        D: DiscoveryAPI,
        C: CursorAPI,
        N: SceneNodeAPI,
    {
        Self::with_discovery(Box::new(discovery), cursor, node, init)
    }

    /// Like `new`, for discoveries that are already boxed, such as the ones
    /// handed out by a `MockDiscoveryAPI`.
    pub fn with_discovery<C, N>(
        discovery: Box<dyn DiscoveryAPI>,
        cursor: C,
        node: N,
        init: ControllerInit,
    ) -> InputController
    where
        C: CursorAPI,
        N: SceneNodeAPI,
    {
        InputController {
            init,
            session: Session::new(discovery, init.device_type),
            relay: EventRelay::new(cursor),
            node: Box::new(node),
            bus: Rc::new(EventBus::new()),
            enabled: false,
        }
    }

    /// The bus events are published on. Listeners can be added at any
    /// time, including before the session is open.
    pub fn events(&self) -> Rc<EventBus> {
        self.bus.clone()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Open the session.
    pub fn initialize(&mut self) -> Result<(), Error> {
        self.session.open()
    }

    /// Open the session if needed, and register every device callback.
    /// The callbacks are registered even if the session fails to open,
    /// in which case `tick` keeps trying to open it.
    pub fn enable(&mut self) -> Result<(), Error> {
        let opened = self.session.open();
        for kind in CallbackKind::ALL.iter() {
            self.session.register(*kind);
        }
        self.enabled = true;
        info!("Enabled input controller ({:?})", self.init.disable_policy);
        opened
    }

    pub fn disable(&mut self) {
        for kind in self.init.disable_policy.released() {
            self.session.unregister(*kind);
        }
        self.enabled = false;
        info!("Disabled input controller");
    }

    /// Close the session, whatever state the controller is in.
    pub fn shutdown(&mut self) {
        self.enabled = false;
        self.session.close();
    }

    /// Run one frame. While enabled, a session that failed to open is
    /// retried, the node is moved to the controller's pose and gesture
    /// progress is reported. Callbacks are relayed whenever their kind is
    /// registered.
    pub fn tick(&mut self) {
        if self.enabled && !self.session.retry_open() {
            debug!("Controller session still closed");
        } else if self.enabled {
            let sampled = self.session.poll(&mut *self.node, &self.bus);
            debug_assert!(
                sampled || !self.init.strict,
                "open controller session produced no sample"
            );
            if !sampled {
                debug!("Skipping pose update");
            }
        }

        let relay = &self.relay;
        let bus = &*self.bus;
        self.session.dispatch_callbacks(|callback| {
            relay.relay(callback, bus);
        });
    }
}

impl Drop for InputController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
