use crossbeam_channel::{Receiver, Sender};

use crate::scene::{SpriteId, ZIndex};

/// Registry mutation queued for the next `update()`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SpriteCommand {
    Add(SpriteId),
    Remove(SpriteId),
    Update(SpriteId),
    SetZ(SpriteId, ZIndex),
    SetVisible(SpriteId, bool),
    Destroy(SpriteId),
}

/// Cloneable, `Send` handle for queueing sprite commands from other threads.
///
/// Commands are applied in arrival order on the frame-pump thread.
#[derive(Debug, Clone)]
pub struct SpriteCommandSender {
    tx: Sender<SpriteCommand>,
}

impl SpriteCommandSender {
    /// Queues `cmd`. Returns `false` once the owning `Graphics` is gone.
    pub fn send(&self, cmd: SpriteCommand) -> bool {
        self.tx.send(cmd).is_ok()
    }

    pub fn add(&self, id: SpriteId) -> bool {
        self.send(SpriteCommand::Add(id))
    }

    pub fn remove(&self, id: SpriteId) -> bool {
        self.send(SpriteCommand::Remove(id))
    }

    pub fn set_z(&self, id: SpriteId, z: impl Into<ZIndex>) -> bool {
        self.send(SpriteCommand::SetZ(id, z.into()))
    }

    pub fn set_visible(&self, id: SpriteId, visible: bool) -> bool {
        self.send(SpriteCommand::SetVisible(id, visible))
    }

    pub fn destroy(&self, id: SpriteId) -> bool {
        self.send(SpriteCommand::Destroy(id))
    }
}

#[derive(Debug)]
pub(super) struct CommandQueue {
    tx: Sender<SpriteCommand>,
    rx: Receiver<SpriteCommand>,
}

impl CommandQueue {
    pub(super) fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    pub(super) fn sender(&self) -> SpriteCommandSender {
        SpriteCommandSender {
            tx: self.tx.clone(),
        }
    }

    /// Number of commands waiting.
    pub(super) fn len(&self) -> usize {
        self.rx.len()
    }

    /// Next queued command; never blocks.
    pub(super) fn try_next(&self) -> Option<SpriteCommand> {
        self.rx.try_recv().ok()
    }
}
