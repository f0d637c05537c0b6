use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use hk_platform::{KeyCode, Modifiers, combination_string};
use serde::{Deserialize, Serialize};

use crate::defaults::*;

/// Where hotkey listeners run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// One thread per press.
    #[default]
    Thread,
    /// A Tokio runtime's blocking pool.
    Runtime,
}

/// Persisted hotkey settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    // Hotkey settings (Win32-style modifier bitmask + virtual key)
    #[serde(default = "default_hotkey_modifiers")]
    pub hotkey_modifiers: u32,
    #[serde(default = "default_hotkey_key")]
    pub hotkey_key: u32,

    #[serde(default)]
    pub dispatch: DispatchMode,

    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hotkey_modifiers: default_hotkey_modifiers(),
            hotkey_key: default_hotkey_key(),
            dispatch: DispatchMode::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    pub fn settings_path() -> PathBuf {
        default_config_dir().join("settings.json")
    }

    /// Load settings from the default location.
    ///
    /// Falls back to defaults (and persists them) if loading fails.
    pub fn load() -> Self {
        let path = Self::settings_path();

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "using default settings");
                let default_settings = Self::default();
                if let Err(e) = default_settings.save_to(&path) {
                    tracing::warn!(path = %path.display(), error = %e, "failed to persist settings");
                }
                default_settings
            }
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings = serde_json::from_str(&content)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    #[inline]
    pub fn modifiers(&self) -> Modifiers {
        Modifiers::from_mask(self.hotkey_modifiers)
    }

    #[inline]
    pub fn key(&self) -> KeyCode {
        KeyCode(self.hotkey_key)
    }

    /// Get hotkey display string (e.g. "Ctrl+Alt+S").
    pub fn hotkey_string(&self) -> String {
        combination_string(self.modifiers(), self.key())
    }
}
