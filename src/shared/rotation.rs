// This is free and unencumbered software released into the public domain.

use crate::shared::{CameraError, CameraInfo, Facing};
use derive_more::Display;
use image::metadata::Orientation;

/// A clockwise rotation by a right angle.
#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq, Hash)]
pub enum Rotation {
    #[default]
    #[display("0")]
    Deg0,
    #[display("90")]
    Deg90,
    #[display("180")]
    Deg180,
    #[display("270")]
    Deg270,
}

impl Rotation {
    /// Accepts any multiple of 90, normalized into `[0, 360)`.
    pub fn from_degrees(degrees: i32) -> Result<Self, CameraError> {
        match degrees.rem_euclid(360) {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            _ => Err(CameraError::InvalidRotation(degrees)),
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }
}

impl TryFrom<i32> for Rotation {
    type Error = CameraError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees)
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// Collapses the eight Exif orientation states to pure rotation.
///
/// The legacy capture path never mirrors, so the flip component of the
/// mirrored states is dropped.
impl From<Orientation> for Rotation {
    fn from(orientation: Orientation) -> Self {
        match orientation {
            Orientation::NoTransforms | Orientation::FlipHorizontal => Self::Deg0,
            Orientation::Rotate180 | Orientation::FlipVertical => Self::Deg180,
            Orientation::Rotate90 | Orientation::Rotate90FlipH => Self::Deg90,
            Orientation::Rotate270 | Orientation::Rotate270FlipH => Self::Deg270,
        }
    }
}

/// Rotation to request from the driver so the saved picture comes out
/// upright, given where the sensor is mounted and how the display and the
/// device itself are turned.
///
/// The second step accounts for a device held at a different angle than the
/// display (e.g. UI locked to portrait, picture taken in landscape).
pub fn calculate_capture_rotation(
    info: CameraInfo,
    display_orientation: i32,
    device_orientation: i32,
) -> Rotation {
    let sensor = info.orientation.degrees();
    let display_orientation = display_orientation.rem_euclid(360);
    let device_orientation = device_orientation.rem_euclid(360);
    let skew = display_orientation - device_orientation;
    let degrees = match info.facing {
        Facing::Front => {
            let base = (sensor + display_orientation).rem_euclid(360);
            (base - skew + 360).rem_euclid(360)
        },
        Facing::Back => {
            let base = (sensor - display_orientation + 360).rem_euclid(360);
            (base + skew + 360).rem_euclid(360)
        },
    };
    // right angles in, right angle out; anything else snaps down
    Rotation::from_degrees(degrees - degrees % 90).unwrap_or_default()
}
