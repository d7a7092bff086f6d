use super::Sprite;

/// Stable handle to a sprite stored in a [`SpriteArena`].
///
/// Slots are reused after removal; the generation makes stale handles miss instead of
/// aliasing the new occupant.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SpriteId {
    index: u32,
    generation: u32,
}

impl SpriteId {
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    sprite: Option<Sprite>,
}

/// Owning store of sprite records.
#[derive(Debug, Default)]
pub struct SpriteArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl SpriteArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sprite: Sprite) -> SpriteId {
        self.len += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.sprite = Some(sprite);
            return SpriteId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            sprite: Some(sprite),
        });
        SpriteId { index, generation: 0 }
    }

    /// Removes and returns the sprite; `None` for stale or unknown ids.
    pub fn remove(&mut self, id: SpriteId) -> Option<Sprite> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }

        let sprite = slot.sprite.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        Some(sprite)
    }

    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.sprite.as_ref())
    }

    pub fn get_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.sprite.as_mut())
    }

    #[inline]
    pub fn contains(&self, id: SpriteId) -> bool {
        self.get(id).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawCmd;
    use crate::surface::Rgba8;

    fn sprite(z: i32) -> Sprite {
        Sprite::new(z, DrawCmd::Fill(Rgba8::WHITE))
    }

    #[test]
    fn stale_id_does_not_alias_reused_slot() {
        let mut arena = SpriteArena::new();
        let a = arena.insert(sprite(1));
        assert!(arena.remove(a).is_some());

        let b = arena.insert(sprite(2));
        assert_eq!(a.index(), b.index());
        assert_eq!(b.generation(), a.generation() + 1);
        assert_ne!(a, b);
        assert!(!arena.contains(a));
        assert!(arena.contains(b));
        assert!(arena.get(a).is_none());
        assert_eq!(arena.get(b).map(|s| s.z.0), Some(2));
    }

    #[test]
    fn double_remove_is_harmless() {
        let mut arena = SpriteArena::new();
        let a = arena.insert(sprite(1));
        assert!(arena.remove(a).is_some());
        assert!(arena.remove(a).is_none());
        assert!(arena.is_empty());
    }
}
