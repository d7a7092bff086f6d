//! Engine error types.
//!
//! Only conditions the caller must act on are represented here. Invalid parameters,
//! benign registry misuse and missing transition maps are resolved where they occur.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal rendering failures surfaced by [`Graphics`](crate::graphics::Graphics).
#[derive(Error, Debug)]
pub enum GraphicsError {
    /// A full-frame pixel buffer could not be allocated.
    #[error("failed to allocate a {width}x{height} frame buffer")]
    FrameAllocation {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
}

/// Result type for graphics operations.
pub type GraphicsResult<T> = Result<T, GraphicsError>;

/// Failure to load a transition map image.
#[derive(Error, Debug)]
pub enum TransitionMapError {
    /// The image could not be opened or decoded.
    #[error("failed to load transition map {path}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The image decoded to zero pixels.
    #[error("transition map {0} is empty")]
    EmptyImage(PathBuf),
}

/// Failure to read an engine configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
