//! Time subsystem.
//!
//! - `FrameClock`: logical frame counter + target frame rate, advanced once per `update()`
//! - `FramePacer`: wall-clock sleeping for the loop that calls `update()`

mod frame_clock;
mod pacer;

pub use frame_clock::{FrameClock, DEFAULT_FRAME_RATE};
pub use pacer::FramePacer;
