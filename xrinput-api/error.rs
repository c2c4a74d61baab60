/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::fmt;

#[cfg(feature = "ipc")]
use serde::{Deserialize, Serialize};

/// Errors that can be produced by XR input devices and sessions.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub enum Error {
    /// No connected controller matches the requested device type.
    NoMatchingDevice,
    /// A channel to the device runtime could not be created or has hung up.
    CommunicationError,
    /// The device runtime is not running.
    DeviceUnavailable,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::NoMatchingDevice => write!(f, "no matching input device"),
            Error::CommunicationError => write!(f, "failed to communicate with the device"),
            Error::DeviceUnavailable => write!(f, "the device runtime is unavailable"),
        }
    }
}

impl std::error::Error for Error {}
