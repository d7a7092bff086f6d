use std::sync::Once;

use crate::config::EngineConfig;

/// How the player wants its log output.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directive string such as `"warn,tessera_engine::transition=debug"`.
    /// `None` defers to `RUST_LOG`, then to `info`.
    pub env_filter: Option<String>,
    /// Colour policy for terminal output.
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Silences all output.
    pub fn disabled() -> Self {
        Self {
            env_filter: Some("off".to_string()),
            ..Self::default()
        }
    }

    /// Honours the config's `logging` switch.
    pub fn from_engine_config(config: &EngineConfig) -> Self {
        if config.logging {
            Self::default()
        } else {
            Self::disabled()
        }
    }
}

static INIT: Once = Once::new();

/// Installs `env_logger` as the `log` backend.
///
/// Only the first call in a process has an effect, and a logger installed by a
/// host application is left in place. Call it before `Runtime::run` so the
/// scheduler's startup line is captured.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.write_style(config.write_style);

        // Another logger may already be installed (e.g. by a host application).
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized");
    });
}
