/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! This crate binds XR controllers to a scene, relaying their input
//! through an `xrinput_api::EventBus`.

#[cfg(feature = "headless")]
pub mod headless;

mod controller;
mod relay;

pub use controller::ControllerInit;
pub use controller::DisablePolicy;
pub use controller::InputController;

pub use relay::EventRelay;
