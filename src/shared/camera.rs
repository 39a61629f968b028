// This is free and unencumbered software released into the public domain.

use crate::shared::{CameraError, PixelFormat, PreviewSink, Rotation};
use bytes::Bytes;
use derive_more::Display;
use dogma::Named;
use std::sync::mpsc::{Receiver, SyncSender, sync_channel};

#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Facing {
    #[default]
    #[display("back")]
    Back,
    #[display("front")]
    Front,
}

/// Static description of a camera as reported by the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CameraInfo {
    pub facing: Facing,
    /// Sensor mount orientation relative to the device's natural orientation.
    pub orientation: Rotation,
}

/// The driver's mutable parameter set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CameraParameters {
    /// Rotation the driver applies (or records in Exif) for still pictures.
    pub rotation: Rotation,
    pub preview_format: PixelFormat,
}

impl CameraParameters {
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Single-shot shutter notification handed to the driver.
#[derive(Debug)]
pub struct ShutterSignal {
    tx: SyncSender<()>,
}

impl ShutterSignal {
    pub fn channel() -> (Self, Receiver<()>) {
        let (tx, rx) = sync_channel(1);
        (Self { tx }, rx)
    }

    pub fn fire(self) {
        let _ = self.tx.try_send(());
    }
}

/// Single-shot picture delivery handed to the driver.
#[derive(Debug)]
pub struct PictureSignal {
    tx: SyncSender<Bytes>,
}

impl PictureSignal {
    pub fn channel() -> (Self, Receiver<Bytes>) {
        let (tx, rx) = sync_channel(1);
        (Self { tx }, rx)
    }

    pub fn fire(self, data: impl Into<Bytes>) {
        let _ = self.tx.try_send(data.into());
    }
}

/// The callback slots of a still-capture request.
///
/// Every slot is consumed by firing it, so the driver can deliver each
/// notification at most once. Dropping a slot unfired tells the waiting side
/// the notification will never come.
#[derive(Debug)]
pub struct PictureCallbacks {
    pub shutter: Option<ShutterSignal>,
    pub raw: Option<PictureSignal>,
    pub jpeg: Option<PictureSignal>,
}

/// A legacy camera handle: one mutable parameter set, a preview stream with an
/// optional frame callback and a callback-driven still capture.
pub trait LegacyCamera: Named + Send {
    fn parameters(&self) -> Result<CameraParameters, CameraError>;

    fn set_parameters(&mut self, params: &CameraParameters) -> Result<(), CameraError>;

    /// Registers (or with `None`, clears) the preview frame callback.
    fn set_preview_callback(&mut self, sink: Option<PreviewSink>) -> Result<(), CameraError>;

    /// Issues the capture and returns immediately; the callbacks are fired
    /// later from a driver-owned thread.
    fn take_picture(&mut self, callbacks: PictureCallbacks) -> Result<(), CameraError>;

    fn start_preview(&mut self) -> Result<(), CameraError>;

    fn stop_preview(&mut self) -> Result<(), CameraError> {
        Ok(())
    }
}

pub trait CameraInfoSource {
    fn camera_info(&self, facing: Facing) -> Result<CameraInfo, CameraError>;
}
