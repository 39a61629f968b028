// This is free and unencumbered software released into the public domain.

use bytes::Bytes;
use std::sync::Arc;

pub type PreviewSink = Arc<dyn Fn(Frame) + Send + Sync + 'static>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PixelFormat {
    /// YCrCb 4:2:0 semi-planar, the legacy preview default.
    #[default]
    Nv21,
    Yv12,
}

impl PixelFormat {
    /// Buffer size of one `width` x `height` frame.
    pub fn frame_len(self, width: usize, height: usize) -> usize {
        match self {
            Self::Nv21 => width * height * 3 / 2,
            Self::Yv12 => {
                let y_stride = width.div_ceil(16) * 16;
                let c_stride = (y_stride / 2).div_ceil(16) * 16;
                y_stride * height + c_stride * height / 2 * 2
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct Frame {
    pub data: Bytes,
    pub width: usize,
    pub height: usize,
    pub pixel_format: PixelFormat,
    pub timestamp_ns: u64,
}

impl Frame {
    pub fn new(data: Bytes, width: usize, height: usize, pixel_format: PixelFormat) -> Self {
        Self {
            data,
            width,
            height,
            pixel_format,
            timestamp_ns: 0,
        }
    }

    pub fn with_timestamp_ns(mut self, ts: u64) -> Self {
        self.timestamp_ns = ts;
        self
    }
}
