use bytemuck::{Pod, Zeroable};

/// Straight-alpha RGBA pixel.
///
/// `#[repr(C)]` + `Pod` so a pixel slice can be viewed as raw bytes in `R, G, B, A` order.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Linear interpolation towards `to` with an 8-bit weight.
    ///
    /// `weight == 0` returns `self`, `weight == 255` returns `to` exactly.
    #[inline]
    pub fn mix(self, to: Self, weight: u8) -> Self {
        #[inline]
        fn ch(from: u8, to: u8, w: u32) -> u8 {
            ((from as u32 * (255 - w) + to as u32 * w + 127) / 255) as u8
        }

        let w = weight as u32;
        Self {
            r: ch(self.r, to.r, w),
            g: ch(self.g, to.g, w),
            b: ch(self.b, to.b, w),
            a: ch(self.a, to.a, w),
        }
    }

    /// Source-over composition of `src` onto `self` (the destination).
    #[inline]
    pub fn over(self, src: Self) -> Self {
        match src.a {
            255 => src,
            0 => self,
            a => {
                let mixed = self.mix(src, a);
                Self { a: self.a.max(src.a), ..mixed }
            }
        }
    }
}
