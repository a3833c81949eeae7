//! Application systems
//!
//! Per-frame systems driven by the host loop.

mod session;

pub use session::{SessionResult, SessionSystem};
