//! Configuration management for raven-pointer

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub pointer: PointerConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// How often the event loop drains device events
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Default device specification, overridden by `RAVEN_POINTER_PARAMETERS`
    pub specification: String,
    pub natural_scroll: bool,
    pub acceleration: f64,
    pub scroll_factor: f64,
    pub left_handed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub scale_factor: f64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            poll_interval_ms: 8,
        }
    }
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            specification: String::new(),
            natural_scroll: false,
            acceleration: 0.0,
            scroll_factor: 1.0,
            left_handed: false,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 1920,
            height: 1080,
            scale_factor: 1.0,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`, writing the defaults there if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            let config: Config =
                toml::from_str(&content).with_context(|| format!("parse {}", path.display()))?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        xdg::BaseDirectories::with_prefix("raven")
            .map(|dirs| dirs.get_config_home().join("pointer.toml"))
            .unwrap_or_else(|_| PathBuf::from("~/.config/raven/pointer.toml"))
    }
}
