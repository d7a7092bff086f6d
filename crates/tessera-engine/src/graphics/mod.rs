//! Render scheduler.
//!
//! [`Graphics`] is the per-frame entry point: it advances the frame clock, applies
//! queued sprite commands and presents either the registry or a transition frame.

mod commands;
mod scheduler;

pub use commands::{SpriteCommand, SpriteCommandSender};
pub use scheduler::{FrameReport, Graphics};
