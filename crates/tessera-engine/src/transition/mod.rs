//! Screen transitions.
//!
//! A transition blends a frozen capture into the live frame over a number of
//! frames. Reveal order comes from a grayscale threshold map; without one the
//! blend is a plain cross-fade.

mod blend;
mod engine;
mod map;

pub use blend::{blend_frames, linear_weight, threshold_weight};
pub use engine::{TransitionEngine, TransitionPhase};
pub use map::TransitionMap;
