// This is free and unencumbered software released into the public domain.

//! Orientation lookup in a picture's embedded Exif block.

use crate::shared::{MetadataError, Rotation};
use image::{ImageDecoder, codecs::jpeg::JpegDecoder, metadata::Orientation};
use std::io::Cursor;

pub trait OrientationReader: Send {
    fn read_orientation(&self, data: &[u8]) -> Result<Orientation, MetadataError>;
}

/// Reads the orientation tag from the Exif block of a JPEG stream.
///
/// A well-formed JPEG without an Exif block, or whose Exif block has no usable
/// orientation tag, reads as [`Orientation::NoTransforms`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ExifOrientationReader;

impl OrientationReader for ExifOrientationReader {
    fn read_orientation(&self, data: &[u8]) -> Result<Orientation, MetadataError> {
        if !data.starts_with(&[0xFF, 0xD8]) {
            return Err(MetadataError::NotJpeg);
        }
        let mut decoder = JpegDecoder::new(Cursor::new(data))?;
        Ok(decoder.orientation()?)
    }
}

/// Rotation the picture needs for display. Unreadable metadata means none.
pub fn resolve_rotation(reader: &dyn OrientationReader, data: &[u8]) -> Rotation {
    match reader.read_orientation(data) {
        Ok(orientation) => orientation.into(),
        Err(err) => {
            #[cfg(feature = "tracing")]
            asimov_module::tracing::debug!(
                target: "still_capture",
                error = %err,
                "unreadable orientation metadata, assuming no rotation"
            );
            #[cfg(not(feature = "tracing"))]
            let _ = err;
            Rotation::Deg0
        },
    }
}
