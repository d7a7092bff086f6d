//! Frame pump.
//!
//! Owns the loop that calls `Graphics::update()` once per frame, paces it against
//! wall time and routes focus changes. Game code plugs in through [`App`].

mod app;
mod ctx;
mod runner;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, RuntimeCtx};
pub use runner::{Runtime, RuntimeConfig};
