use std::path::PathBuf;

use hk_platform::Modifiers;

// Hotkey defaults
pub fn default_hotkey_modifiers() -> u32 {
    Modifiers::CTRL.with_alt().with_no_repeat().to_mask()
}

pub fn default_hotkey_key() -> u32 {
    'S' as u32
}

pub fn default_log_filter() -> String {
    "hk=debug".to_string()
}

/// Directory settings live in.
pub fn default_config_dir() -> PathBuf {
    // Prefer the roaming app-data directory, then the user's home.
    for var in ["APPDATA", "USERPROFILE", "HOME"] {
        if let Ok(dir) = std::env::var(var) {
            return PathBuf::from(dir).join("hk");
        }
    }

    // Fallback: program directory.
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.to_path_buf();
    }

    // Last resort: cwd.
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
