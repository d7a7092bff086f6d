use crate::error::{GraphicsError, GraphicsResult};

use super::Rgba8;

/// 2D buffer of RGBA pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl FrameBuffer {
    /// Allocates a buffer filled with `fill`.
    ///
    /// Allocation failure is reported instead of aborting the process.
    pub fn try_new(width: u32, height: u32, fill: Rgba8) -> GraphicsResult<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(GraphicsError::FrameAllocation { width, height })?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| GraphicsError::FrameAllocation { width, height })?;
        pixels.resize(len, fill);

        Ok(Self { width, height, pixels })
    }

    /// Fallible deep copy, used when capturing frames.
    pub fn try_clone(&self) -> GraphicsResult<Self> {
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(self.pixels.len())
            .map_err(|_| GraphicsError::FrameAllocation {
                width: self.width,
                height: self.height,
            })?;
        pixels.extend_from_slice(&self.pixels);

        Ok(Self {
            width: self.width,
            height: self.height,
            pixels,
        })
    }

    /// Copies `other` into `self`, reusing the allocation when sizes match.
    pub fn copy_from(&mut self, other: &FrameBuffer) {
        self.width = other.width;
        self.height = other.height;
        self.pixels.clone_from(&other.pixels);
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgba8] {
        &mut self.pixels
    }

    /// Raw `RGBA` bytes, suitable for `image::save_buffer` or texture upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline(always)]
    fn idx(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: i64, y: i64) -> Option<Rgba8> {
        self.idx(x, y).map(|i| self.pixels[i])
    }

    /// Writes a pixel; out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i64, y: i64, px: Rgba8) {
        if let Some(i) = self.idx(x, y) {
            self.pixels[i] = px;
        }
    }

    pub fn clear(&mut self, px: Rgba8) {
        self.pixels.fill(px);
    }

    /// Composites `px` over the rectangle `(x, y, w, h)`, clipped to the buffer.
    pub fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, px: Rgba8) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, w, h) else {
            return;
        };

        let stride = self.width as usize;
        for row in y0..y1 {
            let line = &mut self.pixels[row * stride + x0..row * stride + x1];
            if px.a == 255 {
                line.fill(px);
            } else {
                for dst in line {
                    *dst = dst.over(px);
                }
            }
        }
    }

    /// Composites `src` with its top-left corner at `(x, y)`, clipped to the buffer.
    pub fn blit(&mut self, src: &FrameBuffer, x: i64, y: i64) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, src.width, src.height) else {
            return;
        };

        for dy in y0..y1 {
            for dx in x0..x1 {
                let sx = (dx as i64 - x) as usize;
                let sy = (dy as i64 - y) as usize;
                let s = src.pixels[sy * src.width as usize + sx];
                let d = &mut self.pixels[dy * self.width as usize + dx];
                *d = d.over(s);
            }
        }
    }

    /// Intersects a rectangle with the buffer bounds; `None` when nothing is visible.
    fn clip(&self, x: i64, y: i64, w: u32, h: u32) -> Option<(usize, usize, usize, usize)> {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w as i64).min(self.width as i64);
        let y1 = y.saturating_add(h as i64).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_filled() {
        let fb = FrameBuffer::try_new(3, 2, Rgba8::WHITE).unwrap();
        assert_eq!(fb.pixels().len(), 6);
        assert!(fb.pixels().iter().all(|&p| p == Rgba8::WHITE));
    }

    #[test]
    fn out_of_bounds_access_is_ignored() {
        let mut fb = FrameBuffer::try_new(2, 2, Rgba8::BLACK).unwrap();
        fb.set(-1, 0, Rgba8::WHITE);
        fb.set(2, 1, Rgba8::WHITE);
        assert_eq!(fb.get(5, 5), None);
        assert!(fb.pixels().iter().all(|&p| p == Rgba8::BLACK));
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut fb = FrameBuffer::try_new(4, 4, Rgba8::BLACK).unwrap();
        fb.fill_rect(-2, 2, 4, 10, Rgba8::WHITE);
        assert_eq!(fb.get(0, 2), Some(Rgba8::WHITE));
        assert_eq!(fb.get(1, 3), Some(Rgba8::WHITE));
        assert_eq!(fb.get(2, 2), Some(Rgba8::BLACK));
        assert_eq!(fb.get(0, 1), Some(Rgba8::BLACK));
    }

    #[test]
    fn blit_composites_with_offset() {
        let mut dst = FrameBuffer::try_new(3, 3, Rgba8::BLACK).unwrap();
        let mut src = FrameBuffer::try_new(2, 2, Rgba8::WHITE).unwrap();
        src.set(1, 1, Rgba8::TRANSPARENT);
        dst.blit(&src, 1, 1);
        assert_eq!(dst.get(1, 1), Some(Rgba8::WHITE));
        assert_eq!(dst.get(2, 2), Some(Rgba8::BLACK));
        assert_eq!(dst.get(0, 0), Some(Rgba8::BLACK));
    }

    #[test]
    fn far_off_screen_rects_are_clipped_away() {
        let mut fb = FrameBuffer::try_new(4, 4, Rgba8::BLACK).unwrap();
        let before = fb.clone();

        fb.fill_rect(i64::MAX - 1, 0, 10, 10, Rgba8::WHITE);
        fb.fill_rect(0, i64::MAX - 1, 10, 10, Rgba8::WHITE);
        fb.fill_rect(i64::MIN, i64::MIN, u32::MAX, u32::MAX, Rgba8::WHITE);
        assert_eq!(fb, before);

        let src = FrameBuffer::try_new(3, 3, Rgba8::WHITE).unwrap();
        fb.blit(&src, i64::MAX - 1, i64::MAX - 1);
        fb.blit(&src, i64::MIN, 0);
        assert_eq!(fb, before);
    }

    #[test]
    fn oversized_allocation_is_reported() {
        let err = FrameBuffer::try_new(u32::MAX, u32::MAX, Rgba8::BLACK).unwrap_err();
        assert!(matches!(err, GraphicsError::FrameAllocation { .. }));
    }
}
