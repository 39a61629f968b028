// This is free and unencumbered software released into the public domain.

use super::{
    CameraError, LegacyCamera,
    drivers::replay::{ReplayCamera, ReplayConfig},
};

/// Opens the camera named by `input_url`.
///
/// `replay:` and `file:` URLs, as well as bare paths, replay a stored JPEG.
pub fn open_camera(
    input_url: impl AsRef<str>,
    config: ReplayConfig,
) -> Result<Box<dyn LegacyCamera>, CameraError> {
    let url = input_url.as_ref().trim();
    if url.is_empty() {
        return Err(CameraError::NoDriver);
    }
    let path = url
        .strip_prefix("replay:")
        .or_else(|| url.strip_prefix("file:"))
        .unwrap_or(url);
    Ok(Box::new(ReplayCamera::open(path, config)?))
}
