// This is free and unencumbered software released into the public domain.

mod camera;
pub use camera::*;

mod config;
pub use config::*;

mod coordinator;
pub use coordinator::*;

pub mod drivers {
    pub mod replay;
}

mod error;
pub use error::*;

mod frame;
pub use frame::*;

mod metadata;
pub use metadata::*;

mod open;
pub use open::*;

mod rotation;
pub use rotation::*;
