use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use crate::config::panel_config::PanelConfig;

pub mod panel_config;

pub fn default_poll_interval() -> Duration {
    Duration::from_secs(5)
}

pub fn default_command_timeout() -> Duration {
    Duration::from_secs(10)
}

/// Reads the panel configuration; a missing file yields the defaults.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<PanelConfig> {
    let path = path.as_ref();
    if !path.exists() {
        info!(?path, "Config file not found, using defaults");
        return Ok(PanelConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    Ok(config)
}
