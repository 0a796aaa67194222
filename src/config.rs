//! Engine configuration
//!
//! Uses RON (Rusty Object Notation) for a small human-editable config
//! file read before the window opens. A missing file means defaults; a
//! malformed file logs a warning and falls back to defaults, so a bad
//! edit never takes the engine down.

use serde::{Deserialize, Serialize};

pub const CONFIG_PATH: &str = "assets/config.ron";

/// FPS cap applied between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FpsLimit {
    Fps30,
    #[default]
    Fps60,
    Uncapped,
}

impl FpsLimit {
    /// Target frame time in seconds (None = uncapped).
    pub fn frame_time(&self) -> Option<f64> {
        match self {
            FpsLimit::Fps30 => Some(1.0 / 30.0),
            FpsLimit::Fps60 => Some(1.0 / 60.0),
            FpsLimit::Uncapped => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window_title: String,
    pub window_width: i32,
    pub window_height: i32,
    /// Draw the debug overlay (FPS, animations, camera, game log).
    pub overlay: bool,
    pub fps_limit: FpsLimit,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            window_title: "EMBER-2D".to_string(),
            window_width: 1280,
            window_height: 720,
            overlay: true,
            fps_limit: FpsLimit::default(),
        }
    }
}

impl EngineConfig {
    /// Load from `path`, falling back to defaults when the file is
    /// absent or malformed.
    pub fn load(path: &str) -> EngineConfig {
        let Ok(text) = std::fs::read_to_string(path) else {
            return EngineConfig::default();
        };
        match ron::from_str(&text) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("[ember-2d:config] bad config {}: {}", path, e);
                EngineConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_defaults() {
        let config = EngineConfig::load("no/such/config.ron");
        assert_eq!(config.window_title, "EMBER-2D");
        assert!(config.overlay);
        assert_eq!(config.fps_limit, FpsLimit::Fps60);
    }

    #[test]
    fn test_partial_file_keeps_defaults_for_rest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(window_title: \"Test\", fps_limit: Uncapped)").unwrap();

        let config = EngineConfig::load(file.path().to_str().unwrap());
        assert_eq!(config.window_title, "Test");
        assert_eq!(config.fps_limit, FpsLimit::Uncapped);
        assert_eq!(config.window_width, 1280);
        assert!(config.overlay);
    }

    #[test]
    fn test_malformed_file_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not ron at all {{").unwrap();

        let config = EngineConfig::load(file.path().to_str().unwrap());
        assert_eq!(config.window_title, "EMBER-2D");
    }

    #[test]
    fn test_frame_time() {
        assert_eq!(FpsLimit::Uncapped.frame_time(), None);
        let t60 = FpsLimit::Fps60.frame_time().unwrap();
        assert!((t60 - 1.0 / 60.0).abs() < 1e-9);
    }
}
