//! Tessera engine crate.
//!
//! The rendering core of a 2D game runtime: an ordered sprite registry, a logical
//! frame clock, freeze/blend screen transitions and the scheduler tying them
//! together once per frame.

pub mod config;
pub mod error;
pub mod graphics;
pub mod logging;
pub mod runtime;
pub mod scene;
pub mod surface;
pub mod time;
pub mod transition;

pub use config::EngineConfig;
pub use error::{GraphicsError, GraphicsResult};
pub use graphics::{FrameReport, Graphics};
