//! Infrared pointer tracking: turns the four blob slots of an IR camera and
//! an accelerometer reading into a pointer position, then post-processes the
//! stream with a chain of filters.

pub mod error;
pub mod modules;
pub mod settings;

pub use error::{Error, Result};
pub use modules::filter::FilterChain;
pub use modules::tracking::IrPointer;
pub use modules::{FilterModule, Frame, Health, InputModule, OutputModule};
pub use settings::Settings;
