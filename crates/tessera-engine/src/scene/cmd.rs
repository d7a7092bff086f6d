use std::fmt;
use std::sync::Arc;

use crate::surface::{FrameBuffer, Rgba8};

/// Solid rectangle in surface pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RectCmd {
    pub x: i64,
    pub y: i64,
    pub w: u32,
    pub h: u32,
    pub color: Rgba8,
}

/// Shared bitmap drawn with its top-left corner at `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct BitmapCmd {
    pub x: i64,
    pub y: i64,
    pub bitmap: Arc<FrameBuffer>,
}

type DrawFn = dyn Fn(&mut FrameBuffer) + Send + Sync;

/// Caller-provided render routine.
#[derive(Clone)]
pub struct CustomCmd(Arc<DrawFn>);

impl CustomCmd {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut FrameBuffer) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }
}

impl fmt::Debug for CustomCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomCmd(..)")
    }
}

/// Render command carried by a sprite.
///
/// Extending:
/// - add a new `*Cmd` struct here
/// - add a variant and its arm in [`DrawCmd::draw`]
#[derive(Debug, Clone)]
pub enum DrawCmd {
    /// Composites a colour over the whole surface.
    Fill(Rgba8),
    Rect(RectCmd),
    Bitmap(BitmapCmd),
    Custom(CustomCmd),
}

impl DrawCmd {
    pub fn rect(x: i64, y: i64, w: u32, h: u32, color: Rgba8) -> Self {
        Self::Rect(RectCmd { x, y, w, h, color })
    }

    pub fn bitmap(x: i64, y: i64, bitmap: Arc<FrameBuffer>) -> Self {
        Self::Bitmap(BitmapCmd { x, y, bitmap })
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&mut FrameBuffer) + Send + Sync + 'static,
    {
        Self::Custom(CustomCmd::new(f))
    }

    /// Executes the command against `target`.
    pub fn draw(&self, target: &mut FrameBuffer) {
        match self {
            DrawCmd::Fill(color) => {
                let (w, h) = (target.width(), target.height());
                target.fill_rect(0, 0, w, h, *color);
            }
            DrawCmd::Rect(r) => target.fill_rect(r.x, r.y, r.w, r.h, r.color),
            DrawCmd::Bitmap(b) => target.blit(&b.bitmap, b.x, b.y),
            DrawCmd::Custom(c) => (*c.0)(target),
        }
    }
}
