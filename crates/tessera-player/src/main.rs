use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use tessera_engine::EngineConfig;
use tessera_engine::logging::{LoggingConfig, init_logging};
use tessera_engine::runtime::{Runtime, RuntimeConfig};

mod demo;

use demo::{Demo, DemoOptions};

/// Headless frame pump: runs a small sprite scene with a screen transition and
/// writes the last presented frame to disk.
#[derive(Parser, Debug)]
#[command(name = "tessera-player", version, about)]
struct Cli {
    /// `key:value` game configuration file. Missing file = defaults.
    #[arg(long, default_value = "game.cfg")]
    config: PathBuf,

    /// Number of frames to run.
    #[arg(long, default_value_t = 180)]
    frames: u64,

    /// Frame at which the scene is frozen and the transition starts.
    #[arg(long, default_value_t = 60)]
    transition_at: u64,

    /// Transition length in frames.
    #[arg(long, default_value_t = 40)]
    duration: i32,

    /// Grayscale transition map image. Omit for a cross-fade.
    #[arg(long)]
    transition_map: Option<PathBuf>,

    /// Softness of the reveal edge, 0..=1.
    #[arg(long, default_value_t = 0.25)]
    vagueness: f32,

    /// Write the final frame as PNG.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Run as fast as possible instead of at the configured frame rate.
    #[arg(long)]
    unpaced: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let engine = EngineConfig::load(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    init_logging(LoggingConfig::from_engine_config(&engine));

    let demo = Demo::new(DemoOptions {
        transition_at: cli.transition_at,
        duration: cli.duration,
        transition_map: cli
            .transition_map
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default(),
        vagueness: cli.vagueness,
    });

    let graphics = Runtime::run(
        RuntimeConfig {
            engine,
            max_frames: Some(cli.frames),
            paced: !cli.unpaced,
        },
        demo,
    )?;

    if let Some(path) = cli.output {
        let screen = graphics.screen();
        image::save_buffer(
            &path,
            screen.as_bytes(),
            screen.width(),
            screen.height(),
            image::ColorType::Rgba8,
        )
        .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("wrote final frame to {}", path.display());
    }

    Ok(())
}
