pub mod core;
pub mod rendering;
pub mod window;

pub use self::core::QuarkConfig;
pub use rendering::RenderConfig;
pub use window::WindowConfig;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Loads the per-user config, writing the defaults on first run.
pub fn load_or_create_config() -> Result<QuarkConfig> {
    let config_path = get_config_path()?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    if !config_path.exists() {
        let default_config = QuarkConfig::default();
        std::fs::write(&config_path, default_config.to_toml()?)
            .context("Failed to write default config")?;
        return Ok(default_config);
    }

    QuarkConfig::load(&config_path)
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("org", "rtb", "quark")
        .context("Couldn't determine project directory")?;
    Ok(proj_dirs.config_dir().join("quark.toml"))
}
