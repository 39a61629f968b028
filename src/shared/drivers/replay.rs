// This is free and unencumbered software released into the public domain.

//! A legacy camera that replays a stored JPEG.
//!
//! Follows the legacy driver contract closely enough to exercise a capture
//! end to end: capture callbacks arrive on a driver thread, a still capture
//! stops the preview, and capturing with a preview callback installed is
//! refused (real drivers hang there).

use crate::shared::{
    CameraError, CameraInfo, CameraInfoSource, CameraParameters, Facing, Frame, LegacyCamera,
    PictureCallbacks, PreviewSink, Rotation,
};
use alloc::borrow::Cow;
use bytes::Bytes;
use dogma::Named;
use scopeguard::defer;
use std::{
    path::Path,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    thread::JoinHandle,
    time::{Duration, Instant},
};

#[cfg(feature = "tracing")]
use asimov_module::tracing::debug;

#[derive(Clone, Debug)]
pub struct ReplayConfig {
    /// Delay between the capture request and the shutter callback.
    pub shutter_delay: Duration,
    /// Delay between the shutter and the picture callback.
    pub picture_delay: Duration,
    pub frame_interval: Duration,
    pub preview_width: usize,
    pub preview_height: usize,
    pub back_orientation: Rotation,
    pub front_orientation: Rotation,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            shutter_delay: Duration::from_millis(20),
            picture_delay: Duration::from_millis(80),
            frame_interval: Duration::from_millis(33),
            preview_width: 320,
            preview_height: 240,
            back_orientation: Rotation::Deg90,
            front_orientation: Rotation::Deg270,
        }
    }
}

impl ReplayConfig {
    pub fn with_delays(mut self, shutter: Duration, picture: Duration) -> Self {
        self.shutter_delay = shutter;
        self.picture_delay = picture;
        self
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval.max(Duration::from_millis(1));
        self
    }

    pub fn with_preview_size(mut self, width: usize, height: usize) -> Self {
        self.preview_width = width;
        self.preview_height = height;
        self
    }

    pub fn with_sensor_orientation(mut self, facing: Facing, orientation: Rotation) -> Self {
        match facing {
            Facing::Back => self.back_orientation = orientation,
            Facing::Front => self.front_orientation = orientation,
        }
        self
    }
}

/// A driver call as seen by [`ReplayCamera`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplayCall {
    PreviewCallback(bool),
    TakePicture,
    StartPreview,
    StopPreview,
}

pub struct ReplayCamera {
    picture: Bytes,
    history: Vec<ReplayCall>,
    config: ReplayConfig,
    params: CameraParameters,
    preview_sink: Arc<Mutex<Option<PreviewSink>>>,
    previewing: Arc<AtomicBool>,
    frames: Arc<AtomicU64>,
    preview_join: Option<JoinHandle<()>>,
    capture_join: Option<JoinHandle<()>>,
}

impl core::fmt::Debug for ReplayCamera {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReplayCamera")
            .field("picture", &self.picture.len())
            .field("config", &self.config)
            .field("params", &self.params)
            .field("previewing", &self.is_previewing())
            .finish()
    }
}

impl ReplayCamera {
    pub fn new(picture: impl Into<Bytes>, config: ReplayConfig) -> Self {
        Self {
            picture: picture.into(),
            history: Vec::new(),
            config,
            params: CameraParameters::default(),
            preview_sink: Arc::new(Mutex::new(None)),
            previewing: Arc::new(AtomicBool::new(false)),
            frames: Arc::new(AtomicU64::new(0)),
            preview_join: None,
            capture_join: None,
        }
    }

    pub fn open(path: impl AsRef<Path>, config: ReplayConfig) -> Result<Self, CameraError> {
        let picture = std::fs::read(path.as_ref()).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CameraError::NoCamera,
            _ => CameraError::driver("reading replay picture", e),
        })?;
        Ok(Self::new(picture, config))
    }

    pub fn is_previewing(&self) -> bool {
        self.previewing.load(Ordering::Relaxed)
    }

    /// Preview frames handed to a preview callback so far.
    pub fn frames_delivered(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    /// Preview and capture calls made on this camera, oldest first.
    pub fn history(&self) -> &[ReplayCall] {
        &self.history
    }

    fn has_preview_callback(&self) -> bool {
        self.preview_sink
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .is_some()
    }

    fn join_capture(&mut self) {
        if let Some(j) = self.capture_join.take() {
            let _ = j.join();
        }
    }

    fn halt_preview(&mut self) {
        self.previewing.store(false, Ordering::SeqCst);
        if let Some(j) = self.preview_join.take() {
            let _ = j.join();
        }
    }
}

impl Named for ReplayCamera {
    fn name(&self) -> Cow<'_, str> {
        "replay".into()
    }
}

impl LegacyCamera for ReplayCamera {
    fn parameters(&self) -> Result<CameraParameters, CameraError> {
        Ok(self.params.clone())
    }

    fn set_parameters(&mut self, params: &CameraParameters) -> Result<(), CameraError> {
        self.params = params.clone();
        Ok(())
    }

    fn set_preview_callback(&mut self, sink: Option<PreviewSink>) -> Result<(), CameraError> {
        self.history.push(ReplayCall::PreviewCallback(sink.is_some()));
        *self.preview_sink.lock().unwrap_or_else(|p| p.into_inner()) = sink;
        Ok(())
    }

    fn take_picture(&mut self, callbacks: PictureCallbacks) -> Result<(), CameraError> {
        self.history.push(ReplayCall::TakePicture);
        if self.has_preview_callback() {
            return Err(CameraError::invalid_state(
                "preview callback still registered at capture",
            ));
        }
        self.join_capture();
        // a still capture ends the preview
        self.halt_preview();

        let picture = self.picture.clone();
        let shutter_delay = self.config.shutter_delay;
        let picture_delay = self.config.picture_delay;

        #[cfg(feature = "tracing")]
        debug!(target: "still_capture", bytes = picture.len(), "replay capture started");

        let join = std::thread::spawn(move || {
            let PictureCallbacks { shutter, raw, jpeg } = callbacks;
            // the raw slot never carries data on this path
            drop(raw);

            std::thread::sleep(shutter_delay);
            if let Some(shutter) = shutter {
                shutter.fire();
            }
            std::thread::sleep(picture_delay);
            if let Some(jpeg) = jpeg {
                jpeg.fire(picture);
            }
        });
        self.capture_join = Some(join);
        Ok(())
    }

    fn start_preview(&mut self) -> Result<(), CameraError> {
        self.history.push(ReplayCall::StartPreview);
        if self.previewing.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let previewing = Arc::clone(&self.previewing);
        let sink = Arc::clone(&self.preview_sink);
        let frames = Arc::clone(&self.frames);
        let interval = self.config.frame_interval;
        let (width, height) = (self.config.preview_width, self.config.preview_height);
        let format = self.params.preview_format;
        let blank = Bytes::from(vec![0u8; format.frame_len(width, height)]);

        let join = std::thread::spawn(move || {
            let started = Instant::now();
            defer! {
                // a panicking preview callback ends the preview
                previewing.store(false, Ordering::SeqCst);
            }
            while previewing.load(Ordering::Relaxed) {
                let current = sink.lock().unwrap_or_else(|p| p.into_inner()).clone();
                if let Some(sink) = current {
                    let ts = started.elapsed().as_nanos() as u64;
                    (sink)(Frame::new(blank.clone(), width, height, format).with_timestamp_ns(ts));
                    frames.fetch_add(1, Ordering::Relaxed);
                }
                std::thread::sleep(interval);
            }
        });
        self.preview_join = Some(join);
        Ok(())
    }

    fn stop_preview(&mut self) -> Result<(), CameraError> {
        self.history.push(ReplayCall::StopPreview);
        self.halt_preview();
        Ok(())
    }
}

impl CameraInfoSource for ReplayConfig {
    fn camera_info(&self, facing: Facing) -> Result<CameraInfo, CameraError> {
        let orientation = match facing {
            Facing::Back => self.back_orientation,
            Facing::Front => self.front_orientation,
        };
        Ok(CameraInfo {
            facing,
            orientation,
        })
    }
}

impl CameraInfoSource for ReplayCamera {
    fn camera_info(&self, facing: Facing) -> Result<CameraInfo, CameraError> {
        self.config.camera_info(facing)
    }
}

impl Drop for ReplayCamera {
    fn drop(&mut self) {
        self.halt_preview();
        self.join_capture();
    }
}
