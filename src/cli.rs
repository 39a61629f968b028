// This is free and unencumbered software released into the public domain.

//! CLI helpers (error reporting, verbosity handling, argument parsing).
//!
//! This module must compile even when the crate feature `cli` is disabled,
//! because the library is built in non-CLI configurations.

use crate::shared::Rotation;

#[cfg(feature = "cli")]
use crate::shared::CameraError;

#[cfg(feature = "cli")]
use asimov_module::SysexitsError::{self, *};

#[cfg(feature = "cli")]
use clientele::StandardOptions;

/// Verbosity requested on the command line; `--debug` counts as the maximum.
#[cfg(feature = "cli")]
fn verbosity(flags: &StandardOptions) -> u8 {
    if flags.debug { u8::MAX } else { flags.verbose }
}

/// Logs a failed capture command, explains it on stderr and picks the exit
/// code.
#[cfg(feature = "cli")]
pub fn handle_error(err: &CameraError, flags: &StandardOptions) -> SysexitsError {
    #[cfg(feature = "tracing")]
    asimov_module::tracing::error!(target: "still_capture", error = ?err, "capture command failed");

    eprintln!("ERROR: {err}");
    if verbosity(flags) >= 2 {
        let causes = core::iter::successors(std::error::Error::source(err), |&e| e.source());
        for cause in causes {
            eprintln!("  caused by: {cause}");
        }
    }
    if let Some(next) = hint(err) {
        eprintln!("  hint: {next}");
    }
    map_error_to_sysexit(err)
}

#[cfg(feature = "cli")]
pub fn info_user(flags: &StandardOptions, msg: &str) {
    #[cfg(feature = "tracing")]
    asimov_module::tracing::info!(target: "still_capture", "{msg}");

    if verbosity(flags) >= 1 {
        eprintln!("INFO: {msg}");
    }
}

/// Reports a per-file problem the command recovers from.
#[cfg(feature = "cli")]
pub fn warn_user_with_error(flags: &StandardOptions, msg: &str, error: &dyn std::error::Error) {
    #[cfg(feature = "tracing")]
    asimov_module::tracing::warn!(target: "still_capture", %error, "{msg}");

    match verbosity(flags) {
        0 => {},
        1 => eprintln!("WARN: {msg}"),
        _ => eprintln!("WARN: {msg}: {error}"),
    }
}

/// What the user can try next, for failures they can do something about.
#[cfg(feature = "cli")]
fn hint(err: &CameraError) -> Option<&'static str> {
    Some(match err {
        CameraError::NoDriver => "pass a picture path or a replay: URL as input",
        CameraError::NoCamera => "check that the input file exists",
        CameraError::Timeout(_) => "the driver went quiet; raise --timeout or pass 0 to wait",
        CameraError::ParameterRejected { .. } => "the driver only accepts some rotations",
        _ => return None,
    })
}

#[cfg(feature = "cli")]
pub fn map_error_to_sysexit(err: &CameraError) -> SysexitsError {
    match err {
        CameraError::NoDriver => EX_UNAVAILABLE,
        CameraError::NoCamera => EX_NOINPUT,
        CameraError::InvalidRotation(_) => EX_USAGE,
        CameraError::ParameterRejected { .. } => EX_CONFIG,
        CameraError::Timeout(_) => EX_TEMPFAIL,
        CameraError::Closed(_) | CameraError::PreviewRestart { .. } => EX_IOERR,
        CameraError::InvalidState(_)
        | CameraError::AlreadyDispatched
        | CameraError::DriverError { .. }
        | CameraError::Other(_) => EX_SOFTWARE,
    }
}

/// Parses a rotation in degrees (`90`, `-90`, `270deg`).
pub fn parse_rotation(s: &str) -> Result<Rotation, String> {
    let t = s.trim();
    let t = t
        .strip_suffix("deg")
        .or_else(|| t.strip_suffix('°'))
        .unwrap_or(t)
        .trim();
    let degrees: i32 = t.parse().map_err(|_| format!("Invalid rotation: {s}"))?;
    Rotation::from_degrees(degrees).map_err(|e| e.to_string())
}

/// Parses an orientation angle in degrees, which must be a right angle.
pub fn parse_orientation(s: &str) -> Result<i32, String> {
    parse_rotation(s).map(Rotation::degrees)
}
