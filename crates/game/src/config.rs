//! Game configuration (window, variant, restart rules). Loaded from config.ron at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::tuning::Variant;

/// What a restart puts back to its starting pose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestartScope {
    /// Only the rat and its dash; the roomba keeps patrolling from where it is.
    #[default]
    PlayerOnly,
    /// The rat and the roomba, which returns to the start of its route.
    Full,
}

/// Game settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Overhead prototype or chase-camera build.
    #[serde(default)]
    pub variant: Variant,
    #[serde(default)]
    pub restart_scope: RestartScope,
    /// Model bundles the third-person variant must load before play starts.
    #[serde(default = "default_asset_paths")]
    pub asset_paths: Vec<PathBuf>,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_asset_paths() -> Vec<PathBuf> {
    vec![PathBuf::from("assets/rat.glb"), PathBuf::from("assets/human.glb")]
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            variant: Variant::default(),
            restart_scope: RestartScope::default(),
            asset_paths: default_asset_paths(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match Self::parse(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    pub fn parse(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(data)
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}
