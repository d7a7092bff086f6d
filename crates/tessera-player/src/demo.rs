use std::sync::Arc;

use anyhow::Result;

use tessera_engine::Graphics;
use tessera_engine::runtime::{App, AppControl, FrameCtx};
use tessera_engine::scene::{DrawCmd, Sprite, SpriteId};
use tessera_engine::surface::{FrameBuffer, Rgba8};

#[derive(Debug, Clone)]
pub struct DemoOptions {
    pub transition_at: u64,
    pub duration: i32,
    /// Empty = cross-fade.
    pub transition_map: String,
    pub vagueness: f32,
}

struct Bouncer {
    id: SpriteId,
    x: i64,
    y: i64,
    vx: i64,
    vy: i64,
    size: u32,
    color: Rgba8,
}

/// Bouncing squares over a gradient; at `transition_at` the backdrop changes
/// behind a freeze + transition.
pub struct Demo {
    opts: DemoOptions,
    bouncers: Vec<Bouncer>,
    backdrop: Option<SpriteId>,
    frame: u64,
}

impl Demo {
    pub fn new(opts: DemoOptions) -> Self {
        Self {
            opts,
            bouncers: Vec::new(),
            backdrop: None,
            frame: 0,
        }
    }

    fn step_bouncers(&mut self, gfx: &mut Graphics) {
        let (w, h) = (gfx.width() as i64, gfx.height() as i64);

        for b in &mut self.bouncers {
            let size = b.size as i64;
            b.x += b.vx;
            b.y += b.vy;
            if b.x < 0 || b.x + size > w {
                b.vx = -b.vx;
                b.x = b.x.clamp(0, (w - size).max(0));
            }
            if b.y < 0 || b.y + size > h {
                b.vy = -b.vy;
                b.y = b.y.clamp(0, (h - size).max(0));
            }

            if let Some(sprite) = gfx.sprite_mut(b.id) {
                sprite.cmd = DrawCmd::rect(b.x, b.y, b.size, b.size, b.color);
            }
        }
    }

    fn start_transition(&mut self, gfx: &mut Graphics) -> Result<()> {
        gfx.freeze()?;

        if let Some(old) = self.backdrop.take() {
            gfx.destroy_sprite(old);
        }
        self.backdrop = Some(gfx.create_sprite(Sprite::new(
            -100,
            DrawCmd::bitmap(0, 0, Arc::new(checkerboard(gfx.width(), gfx.height())?)),
        )));

        // Swap front and back squares in the new scene.
        for b in &self.bouncers {
            if let Some(z) = gfx.sprite(b.id).map(|s| s.z.0) {
                gfx.set_sprite_z(b.id, -z);
            }
        }

        gfx.transition(self.opts.duration, &self.opts.transition_map, self.opts.vagueness);
        Ok(())
    }
}

impl App for Demo {
    fn on_start(&mut self, gfx: &mut Graphics) -> Result<()> {
        let height = gfx.height().max(1);
        self.backdrop = Some(gfx.create_sprite(Sprite::new(
            -100,
            DrawCmd::custom(move |fb: &mut FrameBuffer| {
                let w = fb.width();
                for y in 0..fb.height() {
                    let shade = (y * 160 / height) as u8;
                    fb.fill_rect(0, y as i64, w, 1, Rgba8::rgb(20, 30, 60 + shade / 2));
                }
            }),
        )));

        let palette = [
            Rgba8::rgb(230, 80, 70),
            Rgba8::rgb(250, 200, 60),
            Rgba8::rgb(90, 200, 120),
            Rgba8::new(120, 160, 255, 200),
        ];
        for (i, color) in palette.into_iter().enumerate() {
            let i = i as i64;
            let id = gfx.create_sprite(Sprite::new(i as i32 - 1, DrawCmd::Fill(Rgba8::TRANSPARENT)));
            self.bouncers.push(Bouncer {
                id,
                x: 20 + i * 60,
                y: 30 + i * 40,
                vx: 3 + i,
                vy: 2 + (i % 2) * 2,
                size: 48,
                color,
            });
        }

        self.step_bouncers(gfx);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        self.frame += 1;
        self.step_bouncers(ctx.graphics);

        if self.frame == self.opts.transition_at {
            if let Err(e) = self.start_transition(ctx.graphics) {
                log::error!("transition failed: {e:#}");
                return AppControl::Exit;
            }
        }

        if let Some(progress) = ctx.last_frame.and_then(|f| f.transition_progress) {
            log::trace!("transition progress {progress:.2}");
        }

        AppControl::Continue
    }
}

fn checkerboard(width: u32, height: u32) -> Result<FrameBuffer> {
    let mut fb = FrameBuffer::try_new(width, height, Rgba8::rgb(40, 40, 40))?;
    let cell = 32;
    for cy in 0..height.div_ceil(cell) {
        for cx in 0..width.div_ceil(cell) {
            if (cx + cy) % 2 == 0 {
                fb.fill_rect((cx * cell) as i64, (cy * cell) as i64, cell, cell, Rgba8::rgb(70, 70, 70));
            }
        }
    }
    Ok(fb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_engine::EngineConfig;
    use tessera_engine::runtime::{Runtime, RuntimeConfig};
    use tessera_engine::transition::TransitionPhase;

    #[test]
    fn demo_runs_through_a_transition() {
        let demo = Demo::new(DemoOptions {
            transition_at: 3,
            duration: 4,
            transition_map: String::new(),
            vagueness: 0.0,
        });
        let config = RuntimeConfig {
            engine: EngineConfig::parse("resolution:160x120\n"),
            max_frames: Some(12),
            paced: false,
        };

        let gfx = Runtime::run(config, demo).unwrap();
        assert_eq!(gfx.frames_presented(), 12);
        assert_eq!(gfx.transition_phase(), TransitionPhase::Idle);
        // Four squares plus the replaced backdrop.
        assert_eq!(gfx.registered_len(), 5);
    }
}
