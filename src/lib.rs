// This is free and unencumbered software released into the public domain.

//! Still-picture capture against legacy, callback-based camera drivers.
//!
//! The [`shared::CaptureCoordinator`] applies the capture rotation, pauses the
//! preview callback, issues the capture, resolves the final rotation from the
//! JPEG's Exif orientation and puts the camera back into preview before
//! handing the result to a [`shared::ResultSink`].

#![deny(unsafe_code)]

extern crate alloc;

pub mod cli;
pub mod shared;
