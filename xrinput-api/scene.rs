/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Traits to be implemented by the scene hosting the controller.

use crate::Cursor;
use crate::Native;
use crate::Pose;

use euclid::RigidTransform3D;

use std::fmt;

/// A reference to an object in the scene, by name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "ipc", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneObject(pub String);

impl SceneObject {
    pub fn new<S: Into<String>>(name: S) -> SceneObject {
        SceneObject(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SceneObject {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The cursor at the end of the controller's picking ray.
pub trait CursorAPI: 'static {
    /// The object currently intersected by the picking ray, if any.
    fn hovered_object(&self) -> Option<SceneObject>;

    /// The cursor transform, adjusted onto the hovered surface.
    fn adjusted_transform(&self) -> RigidTransform3D<f32, Cursor, Native>;
}

/// The scene node that mirrors the physical controller.
pub trait SceneNodeAPI: 'static {
    fn set_transform(&mut self, transform: Pose);
}
