//! Engine configuration source.
//!
//! A small fixed set of settings read from a `key:value` text file. Every setting has
//! a default, and malformed values fall back to it, so loading never fails on content.

mod parse;

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigError;
use crate::time::DEFAULT_FRAME_RATE;

pub const KEY_TITLE: &str = "title";
pub const KEY_RESOLUTION: &str = "resolution";
pub const KEY_FULLSCREEN: &str = "fullscreen";
pub const KEY_FRAME_RATE: &str = "frame_rate";
pub const KEY_LOGGING: &str = "logging";
pub const KEY_GAME_VERSION: &str = "game_version";

/// Surface size in pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const DEFAULT: Self = Self {
        width: 640,
        height: 480,
    };
}

impl Default for Resolution {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Settings consumed by the engine and the frame pump.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub title: String,
    pub resolution: Resolution,
    pub fullscreen: bool,
    pub frame_rate: u32,
    pub logging: bool,
    pub game_version: String,
    /// Keys the engine does not interpret, kept for the caller.
    pub extra: BTreeMap<String, String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "Tessera Game".to_string(),
            resolution: Resolution::DEFAULT,
            fullscreen: false,
            frame_rate: DEFAULT_FRAME_RATE,
            logging: true,
            game_version: "1.0.0".to_string(),
            extra: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    /// Reads `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(&text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("{} not found, using default config", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parses `key:value` lines over the defaults.
    pub fn parse(text: &str) -> Self {
        let mut config = Self::default();

        for (key, value) in parse::entries(text) {
            match key {
                KEY_TITLE => config.title = value.to_string(),
                KEY_RESOLUTION => {
                    config.resolution = parse::resolution(value).unwrap_or_else(|| {
                        log::warn!("invalid resolution {value:?}, using 640x480");
                        Resolution::DEFAULT
                    });
                }
                KEY_FULLSCREEN => config.fullscreen = parse::boolean(value),
                KEY_FRAME_RATE => {
                    config.frame_rate = match value.parse::<u32>() {
                        Ok(rate) if rate > 0 => rate,
                        _ => {
                            log::warn!("invalid frame rate {value:?}, using {DEFAULT_FRAME_RATE}");
                            DEFAULT_FRAME_RATE
                        }
                    };
                }
                KEY_LOGGING => config.logging = parse::boolean(value),
                KEY_GAME_VERSION => config.game_version = value.to_string(),
                _ => {
                    config.extra.insert(key.to_string(), value.to_string());
                }
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_gives_defaults() {
        assert_eq!(EngineConfig::parse(""), EngineConfig::default());
    }

    #[test]
    fn parses_known_and_extra_keys() {
        let cfg = EngineConfig::parse(
            "title: Dungeon Crawl\nresolution:800x600\nfullscreen:yes\n\
             frame_rate:40\nlogging:0\nvoice_volume:80\nurl:http://x.y\n",
        );
        assert_eq!(cfg.title, "Dungeon Crawl");
        assert_eq!(cfg.resolution, Resolution { width: 800, height: 600 });
        assert!(cfg.fullscreen);
        assert_eq!(cfg.frame_rate, 40);
        assert!(!cfg.logging);
        assert_eq!(cfg.extra.get("voice_volume").map(String::as_str), Some("80"));
        assert_eq!(cfg.extra.get("url").map(String::as_str), Some("http://x.y"));
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = EngineConfig::parse("resolution:0x480\nframe_rate:0\n");
        assert_eq!(cfg.resolution, Resolution::DEFAULT);
        assert_eq!(cfg.frame_rate, DEFAULT_FRAME_RATE);

        let cfg = EngineConfig::parse("resolution:wide\nframe_rate:fast\n");
        assert_eq!(cfg.resolution, Resolution::DEFAULT);
        assert_eq!(cfg.frame_rate, DEFAULT_FRAME_RATE);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = EngineConfig::load(Path::new("definitely/not/here.cfg")).unwrap();
        assert_eq!(cfg, EngineConfig::default());
    }
}
