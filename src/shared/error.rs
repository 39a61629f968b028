// This is free and unencumbered software released into the public domain.

use crate::shared::Rotation;
use std::error::Error as StdError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CameraError {
    #[error("no suitable camera driver available")]
    NoDriver,

    #[error("no camera device available")]
    NoCamera,

    #[error("invalid rotation: {0} degrees is not a multiple of 90")]
    InvalidRotation(i32),

    #[error("camera rejected rotation {requested}, parameters report {applied}")]
    ParameterRejected {
        requested: Rotation,
        applied: Rotation,
    },

    #[error("invalid capture state: {0}")]
    InvalidState(String),

    #[error("capture result was already dispatched")]
    AlreadyDispatched,

    #[error("timed out waiting for the {0} callback")]
    Timeout(&'static str),

    #[error("driver closed the {0} callback without firing it")]
    Closed(&'static str),

    #[error("failed to restart the preview stream")]
    PreviewRestart {
        #[source]
        source: Box<CameraError>,
    },

    #[error("driver error while {context}")]
    DriverError {
        context: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("{0}")]
    Other(String),
}

impl CameraError {
    #[inline]
    pub fn driver(context: &'static str, source: impl StdError + Send + Sync + 'static) -> Self {
        Self::DriverError {
            context,
            source: Box::new(source),
        }
    }

    #[inline]
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    #[inline]
    pub fn preview_restart(source: CameraError) -> Self {
        Self::PreviewRestart {
            source: Box::new(source),
        }
    }

    #[inline]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Failure to read the orientation out of a picture's embedded metadata.
///
/// Never surfaced past the coordinator: a picture whose metadata cannot be
/// read is treated as unrotated.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("not a JPEG stream")]
    NotJpeg,

    #[error("failed to read JPEG headers: {0}")]
    Decode(#[from] image::ImageError),
}
