use super::{DrawCmd, ZIndex};

/// A drawable record: paint priority, visibility and render command.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub z: ZIndex,
    pub visible: bool,
    pub cmd: DrawCmd,
}

impl Sprite {
    /// Visible sprite at layer `z`.
    pub fn new(z: impl Into<ZIndex>, cmd: DrawCmd) -> Self {
        Self {
            z: z.into(),
            visible: true,
            cmd,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}
