//! Settings persistence for OLA
//!
//! Stores the default engine geometry and frame effect between runs.

use ola_engine::{ConfigError, FrameEffectKind, OlaConfig};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Persisted renderer defaults
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Samples per analysis frame
    pub frame_length: usize,
    /// Overlapping frames
    pub overlap: f64,
    /// Samples per processing block
    pub block_size: usize,
    /// Effect applied to each frame
    pub effect: FrameEffectKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_length: 1024,
            overlap: 4.0,
            block_size: 64,
            effect: FrameEffectKind::None,
        }
    }
}

impl Settings {
    /// Load settings from the default location
    ///
    /// Returns defaults if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        let path = Self::settings_path();
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %e, "using default settings");
                }
                Self::default()
            }
        }
    }

    /// Load settings from a specific path
    pub fn load_from(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Save settings to the default location
    pub fn save(&self) -> io::Result<()> {
        let path = Self::settings_path();
        self.save_to(&path)
    }

    /// Save settings to a specific path
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.serialize())
    }

    /// Get the default settings file path
    pub fn settings_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ola")
            .join("settings.txt")
    }

    /// Validate into an engine configuration
    pub fn ola_config(&self) -> Result<OlaConfig, ConfigError> {
        OlaConfig::new(self.frame_length, self.overlap, self.block_size)
    }

    /// Parse settings from simple key=value format
    fn parse(content: &str) -> Self {
        let mut settings = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim();

            // Malformed values keep the default
            match key.trim() {
                "frame_length" => {
                    if let Ok(v) = value.parse() {
                        settings.frame_length = v;
                    }
                }
                "overlap" => {
                    if let Ok(v) = value.parse() {
                        settings.overlap = v;
                    }
                }
                "block_size" => {
                    if let Ok(v) = value.parse() {
                        settings.block_size = v;
                    }
                }
                "effect" => {
                    if let Ok(v) = value.parse() {
                        settings.effect = v;
                    }
                }
                _ => {}
            }
        }

        settings
    }

    /// Serialize settings to simple key=value format
    fn serialize(&self) -> String {
        let lines = [
            "# OLA Settings".to_string(),
            format!("frame_length={}", self.frame_length),
            format!("overlap={}", self.overlap),
            format!("block_size={}", self.block_size),
            format!("effect={}", self.effect),
        ];
        lines.join("\n")
    }
}
