// This is free and unencumbered software released into the public domain.

use crate::shared::{
    CameraError, CameraInfoSource, CaptureConfig, ExifOrientationReader, Facing, LegacyCamera,
    OrientationReader, PictureCallbacks, PictureSignal, PreviewSink, Rotation, ShutterSignal,
    calculate_capture_rotation, resolve_rotation,
};
use bytes::Bytes;
use dogma::Named;
use std::{
    sync::mpsc::{Receiver, RecvTimeoutError},
    time::Instant,
};

#[cfg(feature = "tracing")]
use asimov_module::tracing::{debug, info, warn};

/// What the caller asked for, snapshotted when the capture is initiated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaptureSession {
    /// Rotation applied to the driver's parameters before the capture.
    pub rotation: Rotation,
    pub display_orientation: i32,
    pub device_orientation: i32,
    /// Facing of the camera this session drives.
    pub facing: Facing,
}

impl CaptureSession {
    pub fn new(rotation: Rotation, display_orientation: i32, device_orientation: i32) -> Self {
        Self {
            rotation,
            display_orientation,
            device_orientation,
            facing: Facing::Back,
        }
    }

    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureResult {
    /// The picture exactly as the driver delivered it.
    pub data: Bytes,
    /// Rotation needed to display `data` upright. Holds the requested rotation
    /// until the picture arrives.
    pub rotation: Rotation,
    pub facing: Facing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    CaptureRequested,
    ShutterFired,
    ImageReady,
    Dispatched,
    Failed,
}

/// Receives the notifications of one capture.
pub trait ResultSink: Send {
    /// The exposure happened. The picture follows later.
    fn on_shutter(&mut self) {}

    /// Called exactly once, with the finished picture.
    fn on_result(&mut self, result: CaptureResult);
}

impl<F: FnMut(CaptureResult) + Send> ResultSink for F {
    fn on_result(&mut self, result: CaptureResult) {
        self(result)
    }
}

/// Drives one still capture on a legacy camera.
///
/// Holds the camera exclusively from [`initiate`](Self::initiate) until it is
/// dropped, so nothing else can touch the parameter set or the preview while
/// the capture is in flight.
pub struct CaptureCoordinator<'cam, C: LegacyCamera + ?Sized> {
    camera: &'cam mut C,
    session: CaptureSession,
    config: CaptureConfig,
    preview: Option<PreviewSink>,
    reader: Box<dyn OrientationReader>,
    sink: Box<dyn ResultSink>,
    result: Option<CaptureResult>,
    state: CaptureState,
    shutter_rx: Option<Receiver<()>>,
    picture_rx: Option<Receiver<Bytes>>,
    requested_at: Option<Instant>,
}

impl<C: LegacyCamera + ?Sized> core::fmt::Debug for CaptureCoordinator<'_, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CaptureCoordinator")
            .field("camera", &self.camera.name())
            .field("session", &self.session)
            .field("config", &self.config)
            .field("state", &self.state)
            .finish()
    }
}

impl<'cam, C: LegacyCamera + ?Sized> CaptureCoordinator<'cam, C> {
    /// Applies the session's rotation to the camera parameters.
    ///
    /// The camera must be open and previewing.
    pub fn initiate(
        camera: &'cam mut C,
        session: CaptureSession,
        config: CaptureConfig,
        sink: impl ResultSink + 'static,
    ) -> Result<Self, CameraError> {
        let params = camera.parameters()?.with_rotation(session.rotation);
        camera.set_parameters(&params)?;

        if config.verify_parameters {
            let applied = camera.parameters()?.rotation;
            if applied != session.rotation {
                return Err(CameraError::ParameterRejected {
                    requested: session.rotation,
                    applied,
                });
            }
        }

        #[cfg(feature = "tracing")]
        debug!(
            target: "still_capture",
            camera = %camera.name(),
            rotation = %session.rotation,
            facing = %session.facing,
            "capture initiated"
        );

        Ok(Self {
            camera,
            session,
            config,
            preview: None,
            reader: Box::new(ExifOrientationReader),
            sink: Box::new(sink),
            result: Some(CaptureResult {
                data: Bytes::new(),
                rotation: session.rotation,
                facing: session.facing,
            }),
            state: CaptureState::Idle,
            shutter_rx: None,
            picture_rx: None,
            requested_at: None,
        })
    }

    /// Preview callback to put back once the picture is in.
    pub fn with_preview_callback(mut self, sink: PreviewSink) -> Self {
        self.preview = Some(sink);
        self
    }

    pub fn with_orientation_reader(mut self, reader: impl OrientationReader + 'static) -> Self {
        self.reader = Box::new(reader);
        self
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    /// The pending result; `None` once it has been dispatched.
    pub fn result(&self) -> Option<&CaptureResult> {
        self.result.as_ref()
    }

    /// Rotation to request for this session's camera, from its reported
    /// sensor mount and the session's display and device orientation.
    pub fn capture_rotation(&self, source: &impl CameraInfoSource) -> Result<Rotation, CameraError> {
        let info = source.camera_info(self.session.facing)?;
        Ok(calculate_capture_rotation(
            info,
            self.session.display_orientation,
            self.session.device_orientation,
        ))
    }

    /// Takes the picture and waits for it to be dispatched.
    pub fn capture(&mut self) -> Result<(), CameraError> {
        self.take()?;
        self.await_result()
    }

    /// Issues the capture request without waiting for it.
    pub fn take(&mut self) -> Result<(), CameraError> {
        if self.state != CaptureState::Idle {
            return Err(CameraError::invalid_state(format!(
                "take() called while {:?}",
                self.state
            )));
        }

        #[cfg(feature = "tracing")]
        info!(target: "still_capture", camera = %self.camera.name(), "taking picture");

        // old drivers hang in take_picture while a buffered preview callback is installed
        self.camera.set_preview_callback(None)?;

        let (shutter, shutter_rx) = ShutterSignal::channel();
        let (jpeg, picture_rx) = PictureSignal::channel();
        let callbacks = PictureCallbacks {
            shutter: Some(shutter),
            raw: None,
            jpeg: Some(jpeg),
        };
        if let Err(err) = self.camera.take_picture(callbacks) {
            return Err(self.fail(err));
        }

        self.shutter_rx = Some(shutter_rx);
        self.picture_rx = Some(picture_rx);
        self.requested_at = Some(Instant::now());
        self.state = CaptureState::CaptureRequested;
        Ok(())
    }

    /// Waits for the shutter and the picture, then finishes the capture.
    ///
    /// The shutter is always reported before the picture is processed, even
    /// when the driver delivers them the other way round.
    pub fn await_result(&mut self) -> Result<(), CameraError> {
        let (CaptureState::CaptureRequested, Some(shutter_rx), Some(picture_rx)) =
            (self.state, self.shutter_rx.take(), self.picture_rx.take())
        else {
            return Err(CameraError::invalid_state(format!(
                "await_result() called while {:?}",
                self.state
            )));
        };
        let deadline = self.config.timeout.map(|t| Instant::now() + t);

        match recv_until(&shutter_rx, deadline) {
            Ok(()) => self.on_shutter(),
            Err(RecvTimeoutError::Timeout) => return Err(self.fail(CameraError::Timeout("shutter"))),
            Err(RecvTimeoutError::Disconnected) => {
                #[cfg(feature = "tracing")]
                warn!(target: "still_capture", "driver dropped the shutter callback");
            },
        }

        let data = match recv_until(&picture_rx, deadline) {
            Ok(data) => data,
            Err(RecvTimeoutError::Timeout) => return Err(self.fail(CameraError::Timeout("picture"))),
            Err(RecvTimeoutError::Disconnected) => {
                return Err(self.fail(CameraError::Closed("picture")));
            },
        };

        self.on_picture_taken(data)
    }

    fn on_shutter(&mut self) {
        self.report_latency("shutter");
        self.state = CaptureState::ShutterFired;
        self.sink.on_shutter();
    }

    /// Resolves the picture's rotation, restarts the preview and dispatches.
    fn on_picture_taken(&mut self, data: Bytes) -> Result<(), CameraError> {
        if !matches!(
            self.state,
            CaptureState::CaptureRequested | CaptureState::ShutterFired
        ) {
            return Err(CameraError::invalid_state(format!(
                "picture delivered while {:?}",
                self.state
            )));
        }

        self.report_latency("picture");
        let rotation = resolve_rotation(self.reader.as_ref(), &data);

        #[cfg(feature = "tracing")]
        info!(
            target: "still_capture",
            bytes = data.len(),
            rotation = %rotation,
            "picture taken"
        );

        if let Some(result) = self.result.as_mut() {
            result.data = data;
            result.rotation = rotation;
        }
        self.state = CaptureState::ImageReady;

        // the driver stops previewing for a still capture and will not resume by itself
        if let Err(err) = self.restart_preview() {
            self.state = CaptureState::Failed;
            return Err(CameraError::preview_restart(err));
        }

        self.dispatch_result()
    }

    /// Hands the finished result to the sink. Succeeds once per capture.
    pub fn dispatch_result(&mut self) -> Result<(), CameraError> {
        match self.state {
            CaptureState::ImageReady => {},
            CaptureState::Dispatched => return Err(CameraError::AlreadyDispatched),
            state => {
                return Err(CameraError::invalid_state(format!(
                    "nothing to dispatch while {state:?}"
                )));
            },
        }
        let result = self.result.take().ok_or(CameraError::AlreadyDispatched)?;
        self.state = CaptureState::Dispatched;

        #[cfg(feature = "tracing")]
        debug!(target: "still_capture", rotation = %result.rotation, "dispatching result");

        self.sink.on_result(result);
        Ok(())
    }

    fn report_latency(&self, callback: &'static str) {
        #[cfg(feature = "tracing")]
        {
            let elapsed = self.requested_at.map(|t| t.elapsed()).unwrap_or_default();
            if self.config.diagnostics {
                info!(target: "still_capture", callback, ?elapsed, "driver callback");
            } else {
                debug!(target: "still_capture", callback, ?elapsed, "driver callback");
            }
        }
        #[cfg(not(feature = "tracing"))]
        let _ = callback;
    }

    fn restart_preview(&mut self) -> Result<(), CameraError> {
        self.camera.set_preview_callback(self.preview.clone())?;
        self.camera.start_preview()
    }

    fn fail(&mut self, err: CameraError) -> CameraError {
        self.state = CaptureState::Failed;
        if let Err(_restore) = self.restart_preview() {
            #[cfg(feature = "tracing")]
            warn!(
                target: "still_capture",
                error = %_restore,
                "could not restore preview after failed capture"
            );
        }
        err
    }
}

fn recv_until<T>(rx: &Receiver<T>, deadline: Option<Instant>) -> Result<T, RecvTimeoutError> {
    match deadline {
        Some(deadline) => rx.recv_timeout(deadline.saturating_duration_since(Instant::now())),
        None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{
        CameraInfo, CameraParameters, Frame, metadata::fixtures::jpeg_with_orientation,
    };
    use alloc::borrow::Cow;
    use dogma::Named;
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum Call {
        SetParameters(Rotation),
        PreviewCallback(bool),
        TakePicture,
        StartPreview,
    }

    #[derive(Default)]
    struct FakeCamera {
        params: CameraParameters,
        calls: Vec<Call>,
        picture: Option<Vec<u8>>,
        picture_first: bool,
        drop_callbacks: bool,
        ignore_rotation: bool,
        fail_start_preview: bool,
        held: Option<PictureCallbacks>,
    }

    impl FakeCamera {
        fn delivering(picture: Vec<u8>) -> Self {
            Self {
                picture: Some(picture),
                ..Default::default()
            }
        }
    }

    impl Named for FakeCamera {
        fn name(&self) -> Cow<'_, str> {
            "fake".into()
        }
    }

    impl LegacyCamera for FakeCamera {
        fn parameters(&self) -> Result<CameraParameters, CameraError> {
            Ok(self.params.clone())
        }

        fn set_parameters(&mut self, params: &CameraParameters) -> Result<(), CameraError> {
            self.calls.push(Call::SetParameters(params.rotation));
            if !self.ignore_rotation {
                self.params = params.clone();
            }
            Ok(())
        }

        fn set_preview_callback(&mut self, sink: Option<PreviewSink>) -> Result<(), CameraError> {
            self.calls.push(Call::PreviewCallback(sink.is_some()));
            Ok(())
        }

        fn take_picture(&mut self, callbacks: PictureCallbacks) -> Result<(), CameraError> {
            self.calls.push(Call::TakePicture);
            if self.drop_callbacks {
                return Ok(());
            }
            let Some(picture) = self.picture.clone() else {
                self.held = Some(callbacks);
                return Ok(());
            };
            let PictureCallbacks { shutter, jpeg, .. } = callbacks;
            let (shutter, jpeg) = (shutter.unwrap(), jpeg.unwrap());
            if self.picture_first {
                jpeg.fire(picture);
                shutter.fire();
            } else {
                shutter.fire();
                jpeg.fire(picture);
            }
            Ok(())
        }

        fn start_preview(&mut self) -> Result<(), CameraError> {
            self.calls.push(Call::StartPreview);
            if self.fail_start_preview {
                return Err(CameraError::other("preview surface gone"));
            }
            Ok(())
        }
    }

    impl CameraInfoSource for FakeCamera {
        fn camera_info(&self, facing: Facing) -> Result<CameraInfo, CameraError> {
            let orientation = match facing {
                Facing::Back => Rotation::Deg90,
                Facing::Front => Rotation::Deg270,
            };
            Ok(CameraInfo {
                facing,
                orientation,
            })
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum Event {
        Shutter,
        Result(CaptureResult),
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Event>>>);

    impl Recorder {
        fn events(&self) -> Vec<Event> {
            self.0.lock().unwrap().clone()
        }
    }

    impl ResultSink for Recorder {
        fn on_shutter(&mut self) {
            self.0.lock().unwrap().push(Event::Shutter);
        }

        fn on_result(&mut self, result: CaptureResult) {
            self.0.lock().unwrap().push(Event::Result(result));
        }
    }

    fn preview() -> PreviewSink {
        Arc::new(|_: Frame| {})
    }

    fn session(rotation: Rotation) -> CaptureSession {
        CaptureSession::new(rotation, 0, 0)
    }

    fn quick() -> CaptureConfig {
        CaptureConfig::new().with_timeout(Duration::from_millis(50))
    }

    #[test]
    fn resolves_rotation_from_exif() {
        for (tag, expected) in [
            (1, Rotation::Deg0),
            (6, Rotation::Deg90),
            (3, Rotation::Deg180),
            (8, Rotation::Deg270),
        ] {
            let picture = jpeg_with_orientation(tag);
            let mut camera = FakeCamera::delivering(picture.clone());
            let recorder = Recorder::default();
            let mut coordinator = CaptureCoordinator::initiate(
                &mut camera,
                session(Rotation::Deg90),
                quick(),
                recorder.clone(),
            )
            .unwrap();
            coordinator.capture().unwrap();
            assert_eq!(coordinator.state(), CaptureState::Dispatched);

            let events = recorder.events();
            assert_eq!(
                events,
                vec![
                    Event::Shutter,
                    Event::Result(CaptureResult {
                        data: Bytes::from(picture),
                        rotation: expected,
                        facing: Facing::Back,
                    }),
                ],
                "tag {tag}"
            );
        }
    }

    #[test]
    fn unreadable_metadata_resolves_to_zero() {
        let mut camera = FakeCamera::delivering(b"\xFF\xD8\xFF\xE1\x00".to_vec());
        let recorder = Recorder::default();
        let mut coordinator = CaptureCoordinator::initiate(
            &mut camera,
            session(Rotation::Deg270),
            quick(),
            recorder.clone(),
        )
        .unwrap();
        coordinator.capture().unwrap();

        let events = recorder.events();
        let Some(Event::Result(result)) = events.last() else {
            panic!("no result dispatched: {events:?}");
        };
        assert_eq!(result.rotation, Rotation::Deg0);
        assert_eq!(&result.data[..], b"\xFF\xD8\xFF\xE1\x00");
    }

    #[test]
    fn rotation_reflects_request_until_picture_arrives() {
        let mut camera = FakeCamera::default();
        let coordinator = CaptureCoordinator::initiate(
            &mut camera,
            session(Rotation::Deg180),
            quick(),
            Recorder::default(),
        )
        .unwrap();
        assert_eq!(coordinator.result().unwrap().rotation, Rotation::Deg180);
        assert_eq!(coordinator.state(), CaptureState::Idle);
    }

    #[test]
    fn hardware_call_order() {
        let mut camera = FakeCamera::delivering(jpeg_with_orientation(6));
        let mut coordinator = CaptureCoordinator::initiate(
            &mut camera,
            session(Rotation::Deg90),
            quick(),
            Recorder::default(),
        )
        .unwrap()
        .with_preview_callback(preview());
        coordinator.capture().unwrap();
        drop(coordinator);

        assert_eq!(
            camera.calls,
            vec![
                Call::SetParameters(Rotation::Deg90),
                Call::PreviewCallback(false),
                Call::TakePicture,
                Call::PreviewCallback(true),
                Call::StartPreview,
            ]
        );
        assert_eq!(camera.params.rotation, Rotation::Deg90);
    }

    #[test]
    fn shutter_precedes_picture_regardless_of_driver_order() {
        let mut camera = FakeCamera::delivering(jpeg_with_orientation(3));
        camera.picture_first = true;
        let recorder = Recorder::default();
        let mut coordinator = CaptureCoordinator::initiate(
            &mut camera,
            session(Rotation::Deg0),
            quick(),
            recorder.clone(),
        )
        .unwrap();
        coordinator.capture().unwrap();

        let events = recorder.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], Event::Shutter);
        assert!(matches!(&events[1], Event::Result(r) if r.rotation == Rotation::Deg180));
    }

    #[test]
    fn dispatches_exactly_once() {
        let mut camera = FakeCamera::delivering(jpeg_with_orientation(1));
        let recorder = Recorder::default();
        let mut coordinator = CaptureCoordinator::initiate(
            &mut camera,
            session(Rotation::Deg0),
            quick(),
            recorder.clone(),
        )
        .unwrap();
        coordinator.capture().unwrap();

        assert!(matches!(
            coordinator.dispatch_result(),
            Err(CameraError::AlreadyDispatched)
        ));
        assert!(coordinator.result().is_none());
        let results = recorder
            .events()
            .into_iter()
            .filter(|e| matches!(e, Event::Result(_)))
            .count();
        assert_eq!(results, 1);
    }

    #[test]
    fn dispatch_before_picture_is_rejected() {
        let mut camera = FakeCamera::default();
        let mut coordinator = CaptureCoordinator::initiate(
            &mut camera,
            session(Rotation::Deg0),
            quick(),
            Recorder::default(),
        )
        .unwrap();
        assert!(matches!(
            coordinator.dispatch_result(),
            Err(CameraError::InvalidState(_))
        ));
    }

    #[test]
    fn take_twice_is_rejected() {
        let mut camera = FakeCamera::delivering(jpeg_with_orientation(1));
        let mut coordinator = CaptureCoordinator::initiate(
            &mut camera,
            session(Rotation::Deg0),
            quick(),
            Recorder::default(),
        )
        .unwrap();
        coordinator.take().unwrap();
        assert!(matches!(coordinator.take(), Err(CameraError::InvalidState(_))));
        coordinator.await_result().unwrap();
        assert!(matches!(coordinator.take(), Err(CameraError::InvalidState(_))));
    }

    #[test]
    fn rejected_rotation_fails_loudly() {
        let mut camera = FakeCamera {
            ignore_rotation: true,
            ..Default::default()
        };
        let err = CaptureCoordinator::initiate(
            &mut camera,
            session(Rotation::Deg270),
            quick(),
            Recorder::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CameraError::ParameterRejected {
                requested: Rotation::Deg270,
                applied: Rotation::Deg0,
            }
        ));

        let unchecked = CaptureCoordinator::initiate(
            &mut camera,
            session(Rotation::Deg270),
            quick().with_parameter_verification(false),
            Recorder::default(),
        );
        assert!(unchecked.is_ok());
    }

    #[test]
    fn silent_driver_times_out_and_restores_preview() {
        let mut camera = FakeCamera::default();
        let recorder = Recorder::default();
        let mut coordinator = CaptureCoordinator::initiate(
            &mut camera,
            session(Rotation::Deg0),
            quick(),
            recorder.clone(),
        )
        .unwrap()
        .with_preview_callback(preview());
        let err = coordinator.capture().unwrap_err();
        assert!(matches!(err, CameraError::Timeout("shutter")));
        assert_eq!(coordinator.state(), CaptureState::Failed);
        drop(coordinator);

        assert!(recorder.events().is_empty());
        assert_eq!(
            &camera.calls[camera.calls.len() - 2..],
            &[Call::PreviewCallback(true), Call::StartPreview]
        );
    }

    #[test]
    fn dropped_callbacks_close_the_capture() {
        let mut camera = FakeCamera {
            drop_callbacks: true,
            ..Default::default()
        };
        let mut coordinator = CaptureCoordinator::initiate(
            &mut camera,
            session(Rotation::Deg0),
            CaptureConfig::new().without_timeout(),
            Recorder::default(),
        )
        .unwrap();
        assert!(matches!(
            coordinator.capture(),
            Err(CameraError::Closed("picture"))
        ));
    }

    #[test]
    fn preview_restart_failure_prevents_dispatch() {
        let mut camera = FakeCamera::delivering(jpeg_with_orientation(6));
        camera.fail_start_preview = true;
        let recorder = Recorder::default();
        let mut coordinator = CaptureCoordinator::initiate(
            &mut camera,
            session(Rotation::Deg0),
            quick(),
            recorder.clone(),
        )
        .unwrap();
        let err = coordinator.capture().unwrap_err();
        assert!(matches!(err, CameraError::PreviewRestart { .. }));
        assert_eq!(coordinator.state(), CaptureState::Failed);
        assert_eq!(recorder.events(), vec![Event::Shutter]);
    }

    #[test]
    fn await_after_dispatch_leaves_capture_closed() {
        let mut camera = FakeCamera::delivering(jpeg_with_orientation(8));
        let recorder = Recorder::default();
        let mut coordinator = CaptureCoordinator::initiate(
            &mut camera,
            session(Rotation::Deg0),
            quick(),
            recorder.clone(),
        )
        .unwrap()
        .with_preview_callback(preview());
        assert!(matches!(
            coordinator.await_result(),
            Err(CameraError::InvalidState(_))
        ));
        coordinator.capture().unwrap();

        assert!(matches!(
            coordinator.await_result(),
            Err(CameraError::InvalidState(_))
        ));
        assert_eq!(coordinator.state(), CaptureState::Dispatched);
        drop(coordinator);

        assert_eq!(recorder.events().first(), Some(&Event::Shutter));
        assert_eq!(recorder.events().len(), 2);
        let restarts = camera
            .calls
            .iter()
            .filter(|c| **c == Call::StartPreview)
            .count();
        assert_eq!(restarts, 1);
    }

    #[test]
    fn closure_sink() {
        let seen = Arc::new(Mutex::new(None));
        let seen2 = Arc::clone(&seen);
        let mut camera = FakeCamera::delivering(jpeg_with_orientation(6));
        let mut coordinator = CaptureCoordinator::initiate(
            &mut camera,
            session(Rotation::Deg0).with_facing(Facing::Front),
            quick(),
            move |result: CaptureResult| {
                *seen2.lock().unwrap() = Some(result);
            },
        )
        .unwrap();
        coordinator.capture().unwrap();
        let result = seen.lock().unwrap().take().unwrap();
        assert_eq!(result.rotation, Rotation::Deg90);
        assert_eq!(result.facing, Facing::Front);
    }

    #[test]
    fn capture_rotation_uses_active_facing() {
        let mut camera = FakeCamera::default();
        let info = FakeCamera::default();
        let front = CaptureCoordinator::initiate(
            &mut camera,
            CaptureSession::new(Rotation::Deg0, 0, 0).with_facing(Facing::Front),
            quick(),
            Recorder::default(),
        )
        .unwrap();
        // front sensor at 270: (270 + 0) % 360, no skew
        assert_eq!(front.capture_rotation(&info).unwrap(), Rotation::Deg270);
        drop(front);

        let back = CaptureCoordinator::initiate(
            &mut camera,
            CaptureSession::new(Rotation::Deg0, 0, 0),
            quick(),
            Recorder::default(),
        )
        .unwrap();
        assert_eq!(back.capture_rotation(&info).unwrap(), Rotation::Deg90);
    }
}
