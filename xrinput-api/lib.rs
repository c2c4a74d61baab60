/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! This crate defines the Rust API for relaying XR controller input.
//! It is implemented by the `xrinput` crate.

mod bus;
mod device;
mod error;
mod events;
mod gesture;
mod input;
mod mock;
mod scene;
mod session;
mod space;

pub use bus::EventBus;
pub use bus::EventListener;
pub use bus::Subscription;

pub use device::CallbackKind;
pub use device::CallbackKinds;
pub use device::DeviceAPI;
pub use device::DeviceCallback;
pub use device::DiscoveryAPI;

pub use error::Error;

pub use events::Event;
pub use events::EventKind;
pub use events::InputEvent;

pub use gesture::GestureDirection;
pub use gesture::GestureKind;
pub use gesture::GestureState;
pub use gesture::TouchpadGesture;

pub use input::Button;
pub use input::ControllerFrame;
pub use input::ControllerId;
pub use input::ControllerType;
pub use input::DeviceType;
pub use input::Pose;

pub use mock::MockControllerInit;
pub use mock::MockControllerMsg;
pub use mock::MockDeviceInit;
pub use mock::MockDeviceMsg;
pub use mock::MockDiscoveryAPI;

pub use scene::CursorAPI;
pub use scene::SceneNodeAPI;
pub use scene::SceneObject;

pub use session::Session;

pub use space::Cursor;
pub use space::Input;
pub use space::Native;
pub use space::Touchpad;

#[cfg(feature = "ipc")]
pub use ipc_channel::ipc::IpcSender as Sender;

#[cfg(feature = "ipc")]
pub use ipc_channel::ipc::IpcReceiver as Receiver;

#[cfg(not(feature = "ipc"))]
pub use crossbeam_channel::{Receiver, Sender};

#[cfg(not(feature = "ipc"))]
pub fn channel<T>() -> Result<(Sender<T>, Receiver<T>), Error> {
    Ok(crossbeam_channel::unbounded())
}

#[cfg(feature = "ipc")]
pub fn channel<T>() -> Result<(Sender<T>, Receiver<T>), Error>
where
    T: serde::Serialize + for<'a> serde::Deserialize<'a>,
{
    ipc_channel::ipc::channel().or(Err(Error::CommunicationError))
}
