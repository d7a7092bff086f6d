use std::path::Path;

use crate::config::EngineConfig;
use crate::error::GraphicsResult;
use crate::scene::{DrawRegistry, Sprite, SpriteArena, SpriteId, ZIndex};
use crate::surface::{FrameBuffer, Rgba8};
use crate::time::FrameClock;
use crate::transition::{TransitionEngine, TransitionMap, TransitionPhase};

use super::commands::{CommandQueue, SpriteCommand, SpriteCommandSender};

/// Result of one `update()`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameReport {
    /// Frame counter after the tick.
    pub frame_count: u64,
    /// Transition progress presented this frame, if a transition ran.
    pub transition_progress: Option<f32>,
}

/// Render scheduler: owns the sprites, the frame clock, the transition engine and
/// the presentation surface.
///
/// Constructed explicitly and handed to the frame-pump loop; all methods run on
/// that loop's thread. Other threads go through [`command_sender`](Self::command_sender).
#[derive(Debug)]
pub struct Graphics {
    clock: FrameClock,
    arena: SpriteArena,
    registry: DrawRegistry,
    transition: TransitionEngine,
    queue: CommandQueue,

    /// Last presented frame.
    screen: FrameBuffer,
    /// Off-screen target for the live frame while transitioning.
    scratch: FrameBuffer,
    background: Rgba8,
    frames_presented: u64,
}

impl Graphics {
    pub fn new(config: &EngineConfig) -> GraphicsResult<Self> {
        Self::with_size(
            config.resolution.width,
            config.resolution.height,
            config.frame_rate,
        )
    }

    pub fn with_size(width: u32, height: u32, frame_rate: u32) -> GraphicsResult<Self> {
        let background = Rgba8::BLACK;
        let screen = FrameBuffer::try_new(width, height, background)?;
        let scratch = FrameBuffer::try_new(width, height, background)?;

        log::info!("graphics initialized: {width}x{height} @ {frame_rate} fps");

        Ok(Self {
            clock: FrameClock::new(frame_rate),
            arena: SpriteArena::new(),
            registry: DrawRegistry::new(),
            transition: TransitionEngine::new(),
            queue: CommandQueue::new(),
            screen,
            scratch,
            background,
            frames_presented: 0,
        })
    }

    // ---- frame -------------------------------------------------------------

    /// Produces exactly one presented frame.
    ///
    /// Order: clock tick, queued sprite commands, then either a transition frame
    /// or a direct render of the registry.
    pub fn update(&mut self) -> FrameReport {
        let frame_count = self.clock.tick();
        self.apply_commands();

        let transition_progress = if self.transition.is_transitioning() {
            self.scratch.clear(self.background);
            self.registry.render(&self.arena, &mut self.scratch);
            self.transition.step(&self.scratch, &mut self.screen)
        } else {
            self.screen.clear(self.background);
            self.registry.render(&self.arena, &mut self.screen);
            None
        };

        self.frames_presented += 1;

        FrameReport {
            frame_count,
            transition_progress,
        }
    }

    /// The last presented frame.
    #[inline]
    pub fn screen(&self) -> &FrameBuffer {
        &self.screen
    }

    #[inline]
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.screen.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.screen.height()
    }

    pub fn background(&self) -> Rgba8 {
        self.background
    }

    /// Colour the surface is cleared to before each render pass.
    pub fn set_background(&mut self, color: Rgba8) {
        self.background = color;
    }

    // ---- clock -------------------------------------------------------------

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }

    #[inline]
    pub fn set_frame_count(&mut self, value: u64) {
        self.clock.set_frame_count(value);
    }

    #[inline]
    pub fn frame_rate(&self) -> u32 {
        self.clock.frame_rate()
    }

    /// Zero is ignored.
    #[inline]
    pub fn set_frame_rate(&mut self, value: u32) {
        self.clock.set_frame_rate(value);
    }

    #[inline]
    pub fn frame_reset(&mut self) {
        self.clock.reset();
    }

    // ---- transitions -------------------------------------------------------

    /// Captures the last presented frame for a following [`transition`](Self::transition).
    ///
    /// The only fallible operation of the scheduler: failing to allocate the capture
    /// is reported rather than presenting a corrupt frame later.
    pub fn freeze(&mut self) -> GraphicsResult<()> {
        self.transition.freeze(&self.screen)
    }

    /// Starts a transition from the frozen frame over `duration` frames.
    ///
    /// `filename` names a grayscale threshold map; an empty name or an unloadable
    /// file gives a cross-fade. `vagueness` in `[0, 1]` softens the reveal edge.
    /// Returns `false` if nothing was frozen.
    pub fn transition(&mut self, duration: i32, filename: &str, vagueness: f32) -> bool {
        let path = (!filename.is_empty()).then(|| Path::new(filename));
        self.transition.transition(duration, path, vagueness)
    }

    /// Like [`transition`](Self::transition) with a map built in memory.
    pub fn transition_with_map(
        &mut self,
        duration: i32,
        map: Option<TransitionMap>,
        vagueness: f32,
    ) -> bool {
        self.transition.transition_with_map(duration, map, vagueness)
    }

    #[inline]
    pub fn transition_phase(&self) -> TransitionPhase {
        self.transition.phase()
    }

    /// Makes the next `update()` present the final transition frame.
    pub fn skip_transition(&mut self) {
        self.transition.skip();
    }

    // ---- sprites -----------------------------------------------------------

    /// Stores `sprite` and registers it for rendering.
    pub fn create_sprite(&mut self, sprite: Sprite) -> SpriteId {
        let id = self.arena.insert(sprite);
        self.registry.add_sprite(&self.arena, id);
        id
    }

    /// Unregisters and drops the sprite. Stale ids are ignored.
    pub fn destroy_sprite(&mut self, id: SpriteId) -> Option<Sprite> {
        self.registry.remove_sprite(id);
        self.arena.remove(id)
    }

    pub fn sprite(&self, id: SpriteId) -> Option<&Sprite> {
        self.arena.get(id)
    }

    /// Mutable access to a sprite record.
    ///
    /// Changing `z` through this reference requires a following
    /// [`update_sprite`](Self::update_sprite); prefer [`set_sprite_z`](Self::set_sprite_z).
    pub fn sprite_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.arena.get_mut(id)
    }

    pub fn set_sprite_z(&mut self, id: SpriteId, z: impl Into<ZIndex>) {
        if let Some(sprite) = self.arena.get_mut(id) {
            sprite.z = z.into();
            self.registry.update_sprite(&self.arena, id);
        }
    }

    pub fn set_sprite_visible(&mut self, id: SpriteId, visible: bool) {
        if let Some(sprite) = self.arena.get_mut(id) {
            sprite.visible = visible;
        }
    }

    /// Registers an existing sprite. No-op if already registered.
    pub fn add_sprite(&mut self, id: SpriteId) {
        self.registry.add_sprite(&self.arena, id);
    }

    /// Unregisters a sprite without destroying it. No-op if absent.
    pub fn remove_sprite(&mut self, id: SpriteId) {
        self.registry.remove_sprite(id);
    }

    /// Re-sorts a sprite after its z changed.
    pub fn update_sprite(&mut self, id: SpriteId) {
        self.registry.update_sprite(&self.arena, id);
    }

    pub fn is_registered(&self, id: SpriteId) -> bool {
        self.registry.contains(id)
    }

    /// Registered sprite ids in paint order (back-to-front).
    pub fn render_order(&self) -> impl Iterator<Item = SpriteId> + '_ {
        self.registry.ids()
    }

    #[inline]
    pub fn registered_len(&self) -> usize {
        self.registry.len()
    }

    // ---- deferred commands -------------------------------------------------

    /// Handle for queueing sprite commands from outside the frame-pump thread.
    pub fn command_sender(&self) -> SpriteCommandSender {
        self.queue.sender()
    }

    /// Applies queued sprite commands in arrival order. Called by `update()`.
    ///
    /// Only commands already queued on entry are applied; later ones wait for the
    /// next call.
    pub fn apply_commands(&mut self) {
        let pending = self.queue.len();
        for _ in 0..pending {
            let Some(cmd) = self.queue.try_next() else {
                break;
            };
            log::trace!("applying {cmd:?}");
            match cmd {
                SpriteCommand::Add(id) => self.add_sprite(id),
                SpriteCommand::Remove(id) => self.remove_sprite(id),
                SpriteCommand::Update(id) => self.update_sprite(id),
                SpriteCommand::SetZ(id, z) => self.set_sprite_z(id, z),
                SpriteCommand::SetVisible(id, visible) => self.set_sprite_visible(id, visible),
                SpriteCommand::Destroy(id) => {
                    self.destroy_sprite(id);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawCmd;

    fn gfx() -> Graphics {
        Graphics::with_size(4, 4, 60).unwrap()
    }

    #[test]
    fn update_ticks_once_and_presents_once() {
        let mut g = gfx();
        let report = g.update();
        assert_eq!(report.frame_count, 1);
        assert_eq!(report.transition_progress, None);
        assert_eq!(g.frames_presented(), 1);
    }

    #[test]
    fn destroy_unregisters_before_dropping() {
        let mut g = gfx();
        let id = g.create_sprite(Sprite::new(0, DrawCmd::Fill(Rgba8::WHITE)));
        assert!(g.is_registered(id));
        assert!(g.destroy_sprite(id).is_some());
        assert!(!g.is_registered(id));
        assert!(g.destroy_sprite(id).is_none());
    }

    #[test]
    fn transition_before_freeze_is_rejected() {
        let mut g = gfx();
        assert!(!g.transition(10, "", 0.0));
        assert_eq!(g.transition_phase(), TransitionPhase::Idle);
    }

    #[test]
    fn queued_commands_apply_on_next_update() {
        let mut g = gfx();
        let id = g.create_sprite(Sprite::new(0, DrawCmd::Fill(Rgba8::WHITE)));
        let tx = g.command_sender();

        assert!(tx.set_visible(id, false));
        assert!(g.sprite(id).unwrap().visible);

        g.update();
        assert!(!g.sprite(id).unwrap().visible);
        assert_eq!(g.screen().get(0, 0), Some(Rgba8::BLACK));
    }

    #[test]
    fn background_is_cleared_each_frame() {
        let mut g = gfx();
        assert_eq!(g.background(), Rgba8::BLACK);
        g.set_background(Rgba8::rgb(9, 9, 9));
        assert_eq!(g.background(), Rgba8::rgb(9, 9, 9));
        g.update();
        assert!(g.screen().pixels().iter().all(|&p| p == Rgba8::rgb(9, 9, 9)));
    }

    #[test]
    fn sprite_far_off_screen_renders_nothing() {
        let mut g = gfx();
        g.create_sprite(Sprite::new(0, DrawCmd::rect(i64::MAX - 1, 0, 10, 10, Rgba8::WHITE)));
        g.create_sprite(Sprite::new(1, DrawCmd::rect(0, i64::MAX - 1, 10, 10, Rgba8::WHITE)));
        g.update();
        assert!(g.screen().pixels().iter().all(|&p| p == Rgba8::BLACK));
    }
}
