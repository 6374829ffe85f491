use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::rendering::RenderConfig;
use super::window::WindowConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuarkConfig {
    pub log_level: LevelFilter,
    pub window: WindowConfig,
    pub render: RenderConfig,
}

impl Default for QuarkConfig {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Info,
            window: WindowConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl QuarkConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file {:?}", path))
    }

    /// Like [`QuarkConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !path.as_ref().exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
