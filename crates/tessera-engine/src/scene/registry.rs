use std::collections::HashMap;

use crate::surface::FrameBuffer;

use super::{SortKey, SpriteArena, SpriteId};

/// Ordered set of registered sprites, kept in paint order at all times.
///
/// Entries are sorted by [`SortKey`]; every mutation restores the order before
/// returning, so no caller can observe a partially sorted sequence.
///
/// Performance characteristics:
/// - `add_sprite` / `update_sprite`: O(log n) search + O(k) shift
/// - `remove_sprite`: O(log n) search + O(k) shift
/// - `render`: one pass, no allocation
#[derive(Debug, Default)]
pub struct DrawRegistry {
    entries: Vec<(SortKey, SpriteId)>,
    keys: HashMap<SpriteId, SortKey>,
    next_order: u64,
}

impl DrawRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: SpriteId) -> bool {
        self.keys.contains_key(&id)
    }

    /// Registered ids in paint order (back-to-front).
    pub fn ids(&self) -> impl Iterator<Item = SpriteId> + '_ {
        self.entries.iter().map(|&(_, id)| id)
    }

    /// Registers `id` at its z position. No-op if already registered or unknown to `arena`.
    pub fn add_sprite(&mut self, arena: &SpriteArena, id: SpriteId) {
        if self.keys.contains_key(&id) {
            log::trace!("add_sprite: {id:?} already registered");
            return;
        }
        let Some(sprite) = arena.get(id) else {
            log::trace!("add_sprite: {id:?} is not a live sprite");
            return;
        };

        let key = SortKey::new(sprite.z, self.next_order);
        self.next_order += 1;

        self.insert_entry(key, id);
        self.keys.insert(id, key);
    }

    /// Unregisters `id`. No-op if absent.
    pub fn remove_sprite(&mut self, id: SpriteId) {
        let Some(key) = self.keys.remove(&id) else {
            log::trace!("remove_sprite: {id:?} not registered");
            return;
        };
        self.remove_entry(key);
    }

    /// Moves `id` to match its current z in `arena`.
    ///
    /// The sprite keeps its registration rank, so among equal-z sprites it lands
    /// where it would have been had it always carried the new z.
    pub fn update_sprite(&mut self, arena: &SpriteArena, id: SpriteId) {
        let Some(&old) = self.keys.get(&id) else {
            return;
        };
        let Some(sprite) = arena.get(id) else {
            // Destroyed behind our back; drop the dangling entry.
            log::warn!("update_sprite: {id:?} no longer exists, unregistering");
            self.remove_sprite(id);
            return;
        };

        let new = old.with_z(sprite.z);
        if new == old {
            return;
        }

        self.remove_entry(old);
        self.insert_entry(new, id);
        self.keys.insert(id, new);
    }

    /// Draws every visible sprite into `target`, back-to-front.
    pub fn render(&self, arena: &SpriteArena, target: &mut FrameBuffer) {
        for &(_, id) in &self.entries {
            match arena.get(id) {
                Some(sprite) if sprite.visible => sprite.cmd.draw(target),
                Some(_) => {}
                None => log::warn!("render: registered sprite {id:?} no longer exists"),
            }
        }
    }

    fn insert_entry(&mut self, key: SortKey, id: SpriteId) {
        let at = self.entries.partition_point(|(k, _)| *k < key);
        self.entries.insert(at, (key, id));
    }

    fn remove_entry(&mut self, key: SortKey) {
        // Keys are unique (distinct `order`), so the search is exact.
        if let Ok(at) = self.entries.binary_search_by(|(k, _)| k.cmp(&key)) {
            self.entries.remove(at);
        }
    }
}
