//! Input handling module
//!
//! Maps raw controller input to chisel events.

mod input_mapper;

pub use input_mapper::{InputMapper, RawInput};
