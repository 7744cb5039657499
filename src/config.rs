use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "tune-queue";
const SETTINGS_FILE: &str = "settings.json";

/// What `next`/`previous` resolve to when `current` is no longer in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StaleCurrent {
    /// `next` falls back to the head of the queue, `previous` to nothing.
    #[default]
    Fallback,
    /// Both `next` and `previous` resolve to nothing.
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QueueSettings {
    #[serde(default)]
    pub stale_current: StaleCurrent,
    /// Fixed seed for reproducible shuffles. Seeded from the OS when unset.
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

/// Config directory: `TUNE_QUEUE_CONFIG_DIR`, then `$XDG_CONFIG_HOME/tune-queue`,
/// then `$HOME/.config/tune-queue`.
pub fn config_root() -> Result<PathBuf> {
    if let Some(override_dir) = env::var_os("TUNE_QUEUE_CONFIG_DIR") {
        return Ok(PathBuf::from(override_dir));
    }

    if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join(APP_DIR));
    }

    let home = env::var_os("HOME").context("neither XDG_CONFIG_HOME nor HOME is set")?;
    Ok(PathBuf::from(home).join(".config").join(APP_DIR))
}

pub fn settings_path() -> Result<PathBuf> {
    Ok(config_root()?.join(SETTINGS_FILE))
}

pub fn load_settings() -> Result<QueueSettings> {
    load_settings_from(&settings_path()?)
}

pub fn load_settings_from(path: &Path) -> Result<QueueSettings> {
    if !path.exists() {
        log::debug!("no settings at {}, using defaults", path.display());
        return Ok(QueueSettings::default());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    let settings: QueueSettings = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse settings file {}", path.display()))?;
    Ok(settings)
}

pub fn save_settings(settings: &QueueSettings) -> Result<()> {
    let root = config_root()?;
    fs::create_dir_all(&root).with_context(|| format!("failed to create {}", root.display()))?;
    save_settings_to(&root.join(SETTINGS_FILE), settings)
}

pub fn save_settings_to(path: &Path, settings: &QueueSettings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
