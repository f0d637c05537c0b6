use thiserror::Error;

use crate::{KeyCode, Modifiers, combination_string};

pub type Result<T> = std::result::Result<T, HotkeyError>;

/// Errors surfaced by hotkey construction.
///
/// Cleanup never produces one of these; disposal failures are logged and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HotkeyError {
    /// The OS refused the registration, usually because another process or window already owns
    /// the combination.
    #[error("hotkey {} is already in use", combination_string(*.modifiers, *.key))]
    AlreadyInUse { modifiers: Modifiers, key: KeyCode },

    /// `WindowSource::Window` was given the zero handle.
    #[error("invalid window handle")]
    InvalidWindow,

    /// `WindowSource::Foreground` was requested but no window has focus.
    #[error("no foreground window to bind the hotkey to")]
    NoForegroundWindow,
}
