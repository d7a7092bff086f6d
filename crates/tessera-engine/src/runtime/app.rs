use anyhow::Result;

use crate::graphics::Graphics;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Game logic driven by the frame pump.
pub trait App {
    /// Called once after `Graphics` is built, before the first frame.
    fn on_start(&mut self, graphics: &mut Graphics) -> Result<()> {
        let _ = graphics;
        Ok(())
    }

    /// Called when focus changes through [`RuntimeCtx::set_focused`](super::RuntimeCtx::set_focused).
    fn on_focus_changed(&mut self, focused: bool) {
        let _ = focused;
    }

    /// Called once per loop iteration, before `Graphics::update()`.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;
}
