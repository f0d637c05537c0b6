use std::sync::RwLock;

use hk_platform::{KeyCode, Modifiers};

use crate::{DispatchMode, Settings};

/// Unified config manager.
pub struct ConfigManager {
    settings: RwLock<Settings>,
}

impl ConfigManager {
    /// Create a new config manager (loads settings once and caches them).
    pub fn new() -> Self {
        Self::with_settings(Settings::load())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }

    /// Get a snapshot copy of current settings.
    pub fn get(&self) -> Settings {
        self.settings
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|_| Settings::default())
    }

    // Convenience accessors.

    #[inline]
    pub fn hotkey(&self) -> (Modifiers, KeyCode) {
        let s = self.get();
        (s.modifiers(), s.key())
    }

    #[inline]
    pub fn dispatch(&self) -> DispatchMode {
        self.get().dispatch
    }

    #[inline]
    pub fn log_filter(&self) -> String {
        self.get().log_filter
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_read_the_cached_settings() {
        let manager = ConfigManager::with_settings(Settings {
            hotkey_key: 0x52,
            dispatch: DispatchMode::Runtime,
            log_filter: "hk_core=trace".to_string(),
            ..Settings::default()
        });

        let (modifiers, key) = manager.hotkey();
        assert_eq!(key, KeyCode(0x52));
        assert!(modifiers.ctrl && modifiers.alt);
        assert_eq!(manager.dispatch(), DispatchMode::Runtime);
        assert_eq!(manager.log_filter(), "hk_core=trace");
        assert_eq!(manager.get().hotkey_string(), "Ctrl+Alt+R");
    }
}
