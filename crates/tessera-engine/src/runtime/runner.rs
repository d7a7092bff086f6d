use anyhow::{Context, Result};

use crate::config::EngineConfig;
use crate::graphics::{FrameReport, Graphics};
use crate::time::FramePacer;

use super::app::{App, AppControl};
use super::ctx::{Command, FrameCtx, RuntimeCtx};

/// Frame-pump configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub engine: EngineConfig,
    /// Stop after this many loop iterations.
    pub max_frames: Option<u64>,
    /// Sleep to the frame rate between iterations. Off for tests and offline renders.
    pub paced: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            max_frames: None,
            paced: true,
        }
    }
}

struct LoopState {
    focused: bool,
    exit_requested: bool,
    iterations: u64,
    last_frame: Option<FrameReport>,
}

/// Entry point for the frame pump.
pub struct Runtime;

impl Runtime {
    /// Runs `app` until it exits or `max_frames` iterations have passed.
    ///
    /// Returns the scheduler so callers can inspect the final frame.
    pub fn run<A: App>(config: RuntimeConfig, mut app: A) -> Result<Graphics> {
        let mut graphics = Graphics::new(&config.engine).context("failed to initialize graphics")?;
        app.on_start(&mut graphics).context("app failed to start")?;

        let mut pacer = FramePacer::new(graphics.frame_rate());
        let mut state = LoopState {
            focused: true,
            exit_requested: false,
            iterations: 0,
            last_frame: None,
        };

        log::info!("{} v{} running", config.engine.title, config.engine.game_version);

        while !config.max_frames.is_some_and(|max| state.iterations >= max) {
            let mut runtime = RuntimeCtx::default();
            let control = app.on_frame(&mut FrameCtx {
                graphics: &mut graphics,
                runtime: &mut runtime,
                last_frame: state.last_frame,
                focused: state.focused,
            });

            apply_commands(&mut state, &mut runtime, &mut app, &mut graphics, &mut pacer);

            if control == AppControl::Exit || state.exit_requested {
                break;
            }

            // Unfocused: keep pumping at the frame rate but freeze the game screen.
            if state.focused {
                state.last_frame = Some(graphics.update());
            }
            state.iterations += 1;

            if config.paced {
                pacer.set_frame_rate(graphics.frame_rate());
                pacer.wait();
            }
        }

        log::info!("frame pump stopped after {} iterations", state.iterations);
        Ok(graphics)
    }
}

fn apply_commands<A: App>(
    state: &mut LoopState,
    runtime: &mut RuntimeCtx,
    app: &mut A,
    graphics: &mut Graphics,
    pacer: &mut FramePacer,
) {
    for cmd in runtime.commands.drain(..) {
        match cmd {
            Command::SetFocused(focused) if focused != state.focused => {
                state.focused = focused;
                app.on_focus_changed(focused);
                if focused {
                    log::debug!("focus regained, resetting frame timing");
                    graphics.frame_reset();
                    pacer.reset();
                }
            }
            Command::SetFocused(_) => {}
            Command::Exit => state.exit_requested = true,
        }
    }
}
