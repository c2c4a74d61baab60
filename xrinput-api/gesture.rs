/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::Touchpad;

use euclid::Vector3D;

/// The phase of a continuous touchpad gesture, as reported by the device.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "ipc", derive(serde::Serialize, serde::Deserialize))]
pub enum GestureState {
    Start,
    Continue,
    End,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "ipc", derive(serde::Serialize, serde::Deserialize))]
pub enum GestureKind {
    Tap,
    ForceTapDown,
    ForceTapUp,
    ForceDwell,
    SecondForceDown,
    LongHold,
    RadialScroll,
    Swipe,
    Scroll,
    Pinch,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "ipc", derive(serde::Serialize, serde::Deserialize))]
pub enum GestureDirection {
    Up,
    Down,
    Left,
    Right,
    In,
    Out,
    Clockwise,
    CounterClockwise,
}

/// A touchpad gesture as recognized by the device runtime.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "ipc", derive(serde::Serialize, serde::Deserialize))]
pub struct TouchpadGesture {
    /// `None` when the runtime has not classified the touch yet
    pub kind: Option<GestureKind>,
    pub direction: Option<GestureDirection>,
    pub position_and_force: Vector3D<f32, Touchpad>,
    /// Touchpad distance units per second
    pub speed: f32,
    pub distance: f32,
    /// Distance between two fingers, for pinches
    pub finger_gap: f32,
    /// Radius of a radial scroll
    pub radius: f32,
    /// Angle of a radial scroll, in radians
    pub angle: f32,
}

impl TouchpadGesture {
    pub fn new(kind: GestureKind, direction: Option<GestureDirection>) -> Self {
        TouchpadGesture {
            kind: Some(kind),
            direction,
            ..Default::default()
        }
    }
}

impl Default for TouchpadGesture {
    fn default() -> Self {
        TouchpadGesture {
            kind: None,
            direction: None,
            position_and_force: Vector3D::zero(),
            speed: 0.,
            distance: 0.,
            finger_gap: 0.,
            radius: 0.,
            angle: 0.,
        }
    }
}
