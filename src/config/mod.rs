//! Configuration for the overlay engine
//!
//! Carried as an explicit object passed down to the pieces that need it;
//! the engine itself holds no global state.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::style::Palette;

/// Selector popover geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopoverConfig {
    /// Popover width in px
    pub width: f64,
    /// Popover height in px
    pub height: f64,
    /// Gap between the anchor and the popover in px
    pub gap: f64,
}

impl Default for PopoverConfig {
    fn default() -> Self {
        Self { width: 280.0, height: 44.0, gap: 8.0 }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Action-to-style table
    pub palette: Palette,

    /// Selector popover geometry
    pub popover: PopoverConfig,

    /// Emphasize each block's primary annotation when no active/preview id
    /// is supplied
    pub fallback_emphasis: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { palette: Palette::default(), popover: PopoverConfig::default(), fallback_emphasis: true }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "marginalia")
            .context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }
}
