use crate::{KeyCode, Modifiers, WindowId};

/// OS input subsystem that owns the global hotkey table.
///
/// Registrations are keyed by `(window, id)`. The subsystem is expected to reject duplicate
/// claims atomically: registering a `(window, id)` pair that is already live, or a combination
/// that another owner already holds, returns `false`.
pub trait HotkeySubsystem: Send + Sync {
    /// Claim `modifiers + key` for `window` under `id`.
    fn register(&self, window: WindowId, id: i32, modifiers: Modifiers, key: KeyCode) -> bool;

    /// Release the `(window, id)` registration. Returns `false` if nothing was released.
    fn unregister(&self, window: WindowId, id: i32) -> bool;

    /// Window currently in the foreground, if any.
    fn foreground_window(&self) -> Option<WindowId> {
        None
    }
}
