//! Sprite storage and the ordered draw registry.
//!
//! Responsibilities:
//! - own sprite records behind stable ids (`SpriteArena`)
//! - keep registered ids in deterministic paint order (z + registration rank)
//! - render visible sprites back-to-front

mod arena;
mod cmd;
mod key;
mod registry;
mod sprite;
mod z_index;

pub use arena::{SpriteArena, SpriteId};
pub use cmd::{BitmapCmd, CustomCmd, DrawCmd, RectCmd};
pub use key::SortKey;
pub use registry::DrawRegistry;
pub use sprite::Sprite;
pub use z_index::ZIndex;
