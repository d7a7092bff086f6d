use crate::graphics::{FrameReport, Graphics};

/// Runtime context passed to the application.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    pub(super) commands: Vec<Command>,
}

impl RuntimeCtx {
    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }

    /// Reports a focus change from the platform layer.
    ///
    /// Regaining focus resets the frame counter and the pacer baseline.
    pub fn set_focused(&mut self, focused: bool) {
        self.commands.push(Command::SetFocused(focused));
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(super) enum Command {
    SetFocused(bool),
    Exit,
}

/// Per-iteration context passed to [`App::on_frame`](super::App::on_frame).
#[derive(Debug)]
pub struct FrameCtx<'a> {
    pub graphics: &'a mut Graphics,
    pub runtime: &'a mut RuntimeCtx,
    /// Report of the previous `update()`, `None` before the first frame.
    pub last_frame: Option<FrameReport>,
    pub focused: bool,
}
