use std::path::Path;

use image::imageops::{self, FilterType};

use crate::error::TransitionMapError;

/// Per-pixel reveal thresholds for a transition.
///
/// Dark pixels (low luma) are revealed first, bright pixels last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionMap {
    width: u32,
    height: u32,
    thresholds: Vec<u8>,
}

impl TransitionMap {
    /// Loads an image as an 8-bit luma threshold map sized `width` x `height`.
    ///
    /// Images of a different size are resampled to fit the surface.
    pub fn load(path: &Path, width: u32, height: u32) -> Result<Self, TransitionMapError> {
        let luma = image::open(path)
            .map_err(|source| TransitionMapError::Image {
                path: path.to_path_buf(),
                source,
            })?
            .to_luma8();

        if luma.width() == 0 || luma.height() == 0 {
            return Err(TransitionMapError::EmptyImage(path.to_path_buf()));
        }

        let luma = if luma.dimensions() == (width, height) {
            luma
        } else {
            log::debug!(
                "resampling transition map {} from {}x{} to {width}x{height}",
                path.display(),
                luma.width(),
                luma.height(),
            );
            imageops::resize(&luma, width, height, FilterType::Triangle)
        };

        Ok(Self {
            width,
            height,
            thresholds: luma.into_raw(),
        })
    }

    /// Wraps raw thresholds. Returns `None` when `data` does not hold `width * height` bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != (width as usize) * (height as usize) || data.is_empty() {
            return None;
        }
        Some(Self {
            width,
            height,
            thresholds: data,
        })
    }

    /// Builds a map by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> Option<Self> {
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self::from_raw(width, height, data)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Threshold at `(x, y)`, clamping coordinates to the map edges.
    #[inline]
    pub fn threshold(&self, x: u32, y: u32) -> u8 {
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        self.thresholds[y * self.width as usize + x]
    }
}
