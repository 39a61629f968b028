// This is free and unencumbered software released into the public domain.

use std::time::Duration;

#[derive(Clone, Debug)]
pub struct CaptureConfig {
    /// Deadline for the shutter and the picture together, counted from the
    /// start of the wait; `None` waits forever.
    pub timeout: Option<Duration>,
    /// Read the parameter set back after applying the rotation.
    pub verify_parameters: bool,
    /// Log driver callback latencies at info level instead of debug.
    pub diagnostics: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(10)),
            verify_parameters: true,
            diagnostics: false,
        }
    }
}

impl CaptureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    pub fn with_parameter_verification(mut self, enabled: bool) -> Self {
        self.verify_parameters = enabled;
        self
    }

    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }
}
