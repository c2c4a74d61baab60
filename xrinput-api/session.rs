/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::CallbackKind;
use crate::CallbackKinds;
use crate::ControllerId;
use crate::DeviceAPI;
use crate::DeviceCallback;
use crate::DeviceType;
use crate::DiscoveryAPI;
use crate::Error;
use crate::Event;
use crate::EventBus;
use crate::EventKind;
use crate::GestureState;
use crate::Pose;
use crate::SceneNodeAPI;
use crate::TouchpadGesture;

use log::debug;
use log::info;
use log::warn;

/// The connection between the host and one controller.
///
/// A session starts closed. Opening binds it to a controller found by
/// its discovery; closing releases the controller and forgets the last
/// sample.
pub struct Session {
    discovery: Box<dyn DiscoveryAPI>,
    device_type: DeviceType,
    device: Option<Box<dyn DeviceAPI>>,
    pose: Option<Pose>,
    gesture_state: Option<GestureState>,
    gesture: Option<TouchpadGesture>,
    registered: CallbackKinds,
}

impl Session {
    pub fn new(discovery: Box<dyn DiscoveryAPI>, device_type: DeviceType) -> Session {
        Session {
            discovery,
            device_type,
            device: None,
            pose: None,
            gesture_state: None,
            gesture: None,
            registered: CallbackKinds::default(),
        }
    }

    /// Opening an open session does nothing.
    pub fn open(&mut self) -> Result<(), Error> {
        if self.device.is_some() {
            return Ok(());
        }
        match self.discovery.request_device(self.device_type) {
            Ok(device) => {
                info!("Opened session for controller {:?}", device.controller_id());
                self.device = Some(device);
                Ok(())
            }
            Err(err) => {
                warn!("Failed to open {:?} session ({})", self.device_type, err);
                Err(err)
            }
        }
    }

    /// Open the session if discovery can currently find its controller,
    /// without logging a failure when it can't. Returns whether the
    /// session is open.
    pub fn retry_open(&mut self) -> bool {
        if self.device.is_some() {
            return true;
        }
        if !self.discovery.supports_device(self.device_type) {
            debug!("No {:?} controller to open yet", self.device_type);
            return false;
        }
        self.open().is_ok()
    }

    /// Closing a closed session does nothing.
    pub fn close(&mut self) {
        if let Some(mut device) = self.device.take() {
            info!("Closing session for controller {:?}", device.controller_id());
            device.quit();
        }
        self.pose = None;
        self.gesture_state = None;
        self.gesture = None;
    }

    pub fn is_open(&self) -> bool {
        self.device.is_some()
    }

    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    pub fn controller_id(&self) -> Option<ControllerId> {
        self.device.as_ref().map(|device| device.controller_id())
    }

    /// The last sampled pose, `None` until the first sample.
    pub fn current_pose(&self) -> Option<Pose> {
        self.pose
    }

    pub fn current_gesture_signal(&self) -> Option<GestureState> {
        self.gesture_state
    }

    /// The gesture in progress, if the last sample had one.
    pub fn current_gesture(&self) -> Option<TouchpadGesture> {
        self.gesture
    }

    /// Returns whether the kind was newly registered.
    pub fn register(&mut self, kind: CallbackKind) -> bool {
        self.registered.insert(kind)
    }

    /// Returns whether the kind was registered.
    pub fn unregister(&mut self, kind: CallbackKind) -> bool {
        self.registered.remove(kind)
    }

    pub fn is_registered(&self, kind: CallbackKind) -> bool {
        self.registered.contains(kind)
    }

    pub fn registered(&self) -> CallbackKinds {
        self.registered
    }

    /// Sample the controller, move `node` to its pose, and tell
    /// `GestureContinue` listeners about a gesture in progress.
    /// Returns `false` when there was nothing to sample.
    pub fn poll(&mut self, node: &mut dyn SceneNodeAPI, bus: &EventBus) -> bool {
        let device = match self.device {
            Some(ref mut device) => device,
            None => return false,
        };
        let frame = match device.sample() {
            Some(frame) => frame,
            None => {
                debug!("No sample from controller {:?}", device.controller_id());
                return false;
            }
        };
        debug_assert_eq!(frame.id, device.controller_id(), "sample from another controller");

        self.pose = Some(frame.pose);
        self.gesture_state = frame.gesture_state;
        self.gesture = frame.gesture_state.map(|_| frame.gesture);
        node.set_transform(frame.pose);

        // Start and End arrive as discrete callbacks.
        if frame.gesture_state == Some(GestureState::Continue)
            && bus.has_subscribers(EventKind::GestureContinue)
        {
            bus.dispatch(&Event::GestureContinue(frame.gesture));
        }
        true
    }

    /// Forward the controller's pending callbacks of registered kinds to
    /// `handler` as they come, dropping the others. Returns how many were
    /// forwarded.
    pub fn dispatch_callbacks<F>(&mut self, mut handler: F) -> usize
    where
        F: FnMut(DeviceCallback),
    {
        let registered = self.registered;
        let device = match self.device {
            Some(ref mut device) => device,
            None => return 0,
        };
        let mut forwarded = 0;
        device.poll_callbacks(&mut |callback| {
            if registered.contains(callback.kind()) {
                handler(callback);
                forwarded += 1;
            } else {
                debug!("Dropping unregistered {:?} callback", callback.kind());
            }
        });
        forwarded
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Button;
    use crate::ControllerFrame;
    use crate::GestureKind;

    use euclid::RigidTransform3D;
    use euclid::Vector3D;

    use std::cell::Cell;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    const ID: ControllerId = ControllerId(1);

    #[derive(Default)]
    struct FakeRuntime {
        reachable: bool,
        requests: usize,
        quits: usize,
        frames: VecDeque<Option<ControllerFrame>>,
        callbacks: Vec<DeviceCallback>,
    }

    struct FakeDiscovery(Rc<RefCell<FakeRuntime>>);

    struct FakeDevice(Rc<RefCell<FakeRuntime>>);

    impl DiscoveryAPI for FakeDiscovery {
        fn request_device(&mut self, _: DeviceType) -> Result<Box<dyn DeviceAPI>, Error> {
            let mut runtime = self.0.borrow_mut();
            runtime.requests += 1;
            if !runtime.reachable {
                return Err(Error::DeviceUnavailable);
            }
            Ok(Box::new(FakeDevice(self.0.clone())))
        }

        fn supports_device(&self, _: DeviceType) -> bool {
            self.0.borrow().reachable
        }
    }

    impl DeviceAPI for FakeDevice {
        fn controller_id(&self) -> ControllerId {
            ID
        }

        fn sample(&mut self) -> Option<ControllerFrame> {
            self.0.borrow_mut().frames.pop_front().and_then(|frame| frame)
        }

        fn poll_callbacks(&mut self, sink: &mut dyn FnMut(DeviceCallback)) {
            let callbacks: Vec<_> = self.0.borrow_mut().callbacks.drain(..).collect();
            for callback in callbacks {
                sink(callback);
            }
        }

        fn quit(&mut self) {
            self.0.borrow_mut().quits += 1;
        }
    }

    #[derive(Clone, Default)]
    struct RecordingNode(Rc<RefCell<Vec<Pose>>>);

    impl SceneNodeAPI for RecordingNode {
        fn set_transform(&mut self, transform: Pose) {
            self.0.borrow_mut().push(transform);
        }
    }

    fn runtime(reachable: bool) -> Rc<RefCell<FakeRuntime>> {
        Rc::new(RefCell::new(FakeRuntime {
            reachable,
            ..Default::default()
        }))
    }

    fn session(runtime: &Rc<RefCell<FakeRuntime>>) -> Session {
        Session::new(
            Box::new(FakeDiscovery(runtime.clone())),
            DeviceType::ControllerFirst,
        )
    }

    fn frame(x: f32, gesture_state: Option<GestureState>) -> ControllerFrame {
        ControllerFrame {
            id: ID,
            pose: RigidTransform3D::from_translation(Vector3D::new(x, 0., 0.)),
            gesture_state,
            gesture: TouchpadGesture::new(GestureKind::Swipe, None),
        }
    }

    #[test]
    fn open_twice_binds_one_device() {
        let runtime = runtime(true);
        let mut session = session(&runtime);
        assert!(session.open().is_ok());
        assert!(session.open().is_ok());
        assert!(session.is_open());
        assert_eq!(session.controller_id(), Some(ID));
        assert_eq!(runtime.borrow().requests, 1);
    }

    #[test]
    fn close_twice_quits_once() {
        let runtime = runtime(true);
        let mut session = session(&runtime);
        session.open().unwrap();
        session.close();
        session.close();
        assert!(!session.is_open());
        assert_eq!(runtime.borrow().quits, 1);
    }

    #[test]
    fn unreachable_runtime_fails_to_open() {
        let runtime = runtime(false);
        let mut session = session(&runtime);
        assert_eq!(session.open(), Err(Error::DeviceUnavailable));
        assert!(!session.is_open());
        assert_eq!(session.controller_id(), None);
    }

    #[test]
    fn retry_open_waits_for_the_runtime() {
        let runtime = runtime(false);
        let mut session = session(&runtime);
        assert!(!session.retry_open());
        assert_eq!(runtime.borrow().requests, 0);

        runtime.borrow_mut().reachable = true;
        assert!(session.retry_open());
        assert!(session.retry_open());
        assert_eq!(session.controller_id(), Some(ID));
        assert_eq!(runtime.borrow().requests, 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "sample from another controller")]
    fn samples_must_come_from_the_bound_controller() {
        let runtime = runtime(true);
        let mut session = session(&runtime);
        session.open().unwrap();
        let mut stray = frame(0., None);
        stray.id = ControllerId(9);
        runtime.borrow_mut().frames.push_back(Some(stray));
        session.poll(&mut RecordingNode::default(), &EventBus::new());
    }

    #[test]
    fn poll_without_a_device_is_a_no_op() {
        let runtime = runtime(false);
        let mut session = session(&runtime);
        let node = RecordingNode::default();
        assert!(!session.poll(&mut node.clone(), &EventBus::new()));
        assert!(node.0.borrow().is_empty());
        assert_eq!(session.current_pose(), None);
    }

    #[test]
    fn no_pose_is_reported_before_the_first_sample() {
        let runtime = runtime(true);
        let mut session = session(&runtime);
        session.open().unwrap();
        runtime.borrow_mut().frames.push_back(None);

        let node = RecordingNode::default();
        assert!(!session.poll(&mut node.clone(), &EventBus::new()));
        assert_eq!(session.current_pose(), None);
        assert_eq!(session.current_gesture_signal(), None);
        assert!(node.0.borrow().is_empty());

        runtime.borrow_mut().frames.push_back(Some(frame(2., None)));
        assert!(session.poll(&mut node.clone(), &EventBus::new()));
        assert_eq!(session.current_pose(), Some(frame(2., None).pose));
        assert_eq!(node.0.borrow().len(), 1);
    }

    #[test]
    fn gesture_continue_fires_only_on_continue_frames() {
        let runtime = runtime(true);
        let mut session = session(&runtime);
        session.open().unwrap();
        for (i, state) in [
            GestureState::Start,
            GestureState::Continue,
            GestureState::Continue,
            GestureState::End,
        ]
        .iter()
        .enumerate()
        {
            runtime
                .borrow_mut()
                .frames
                .push_back(Some(frame(i as f32, Some(*state))));
        }

        let bus = EventBus::new();
        let node = RecordingNode::default();
        let seen = Rc::new(RefCell::new(vec![]));
        let writes = node.0.clone();
        let s = seen.clone();
        bus.subscribe(EventKind::GestureContinue, move |event: &Event| {
            // The node has already moved for this frame.
            s.borrow_mut().push((writes.borrow().len(), event.clone()));
        });

        let mut signals = vec![];
        for _ in 0..4 {
            assert!(session.poll(&mut node.clone(), &bus));
            signals.push(session.current_gesture_signal());
        }

        let gesture = TouchpadGesture::new(GestureKind::Swipe, None);
        assert_eq!(
            *seen.borrow(),
            vec![
                (2, Event::GestureContinue(gesture)),
                (3, Event::GestureContinue(gesture)),
            ]
        );
        assert_eq!(signals[3], Some(GestureState::End));
        assert_eq!(session.current_gesture(), Some(gesture));
    }

    #[test]
    fn only_registered_callbacks_are_forwarded() {
        let runtime = runtime(true);
        let mut session = session(&runtime);
        session.open().unwrap();
        assert!(session.register(CallbackKind::ButtonDown));
        assert!(!session.register(CallbackKind::ButtonDown));
        runtime.borrow_mut().callbacks = vec![
            DeviceCallback::TriggerDown(ID, 0.5),
            DeviceCallback::ButtonDown(ID, Button::Bumper),
        ];

        let forwarded = Rc::new(Cell::new(0));
        let f = forwarded.clone();
        let count = session.dispatch_callbacks(|callback| {
            assert_eq!(callback, DeviceCallback::ButtonDown(ID, Button::Bumper));
            f.set(f.get() + 1);
        });
        assert_eq!((count, forwarded.get()), (1, 1));

        assert!(session.unregister(CallbackKind::ButtonDown));
        assert!(!session.unregister(CallbackKind::ButtonDown));
        assert!(session.registered().is_empty());
    }

    #[test]
    fn close_forgets_the_last_sample() {
        let runtime = runtime(true);
        let mut session = session(&runtime);
        session.open().unwrap();
        runtime
            .borrow_mut()
            .frames
            .push_back(Some(frame(1., Some(GestureState::Start))));
        session.poll(&mut RecordingNode::default(), &EventBus::new());
        assert!(session.current_pose().is_some());

        session.close();
        assert_eq!(session.current_pose(), None);
        assert_eq!(session.current_gesture_signal(), None);
    }
}
