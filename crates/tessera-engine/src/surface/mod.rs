//! Software presentation surface.
//!
//! Canonical pixel space:
//! - integer pixels, origin top-left
//! - +X right, +Y down
//! - straight-alpha RGBA, 8 bits per channel
//!
//! Sprites render into a [`FrameBuffer`]; the transition engine blends two of them.

mod buffer;
mod pixel;

pub use buffer::FrameBuffer;
pub use pixel::Rgba8;
