use hk_platform::{HotkeySubsystem, KeyCode, Modifiers, WindowId};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    HOT_KEY_MODIFIERS, RegisterHotKey, UnregisterHotKey,
};
use windows::Win32::UI::WindowsAndMessaging::GetForegroundWindow;

/// Register a global hotkey.
///
/// `window == None` binds the hotkey to the calling thread's message queue.
pub fn register_hotkey(
    window: Option<WindowId>,
    hotkey_id: i32,
    modifiers: u32,
    key: u32,
) -> windows::core::Result<()> {
    // SAFETY: RegisterHotKey is an OS API. Caller provides the target HWND and key/modifier values.
    unsafe {
        RegisterHotKey(
            window.map(super::hwnd),
            hotkey_id,
            HOT_KEY_MODIFIERS(modifiers),
            key,
        )
    }
}

/// Unregister a global hotkey.
///
/// Must run on the thread that registered it.
pub fn unregister_hotkey(window: Option<WindowId>, hotkey_id: i32) -> windows::core::Result<()> {
    // SAFETY: UnregisterHotKey is an OS API.
    unsafe { UnregisterHotKey(window.map(super::hwnd), hotkey_id) }
}

/// Window currently in the foreground, if any.
pub fn foreground_window() -> Option<WindowId> {
    // SAFETY: GetForegroundWindow is a read-only query with no preconditions.
    let hwnd = unsafe { GetForegroundWindow() };
    let window = super::window_id(hwnd);
    window.is_valid().then_some(window)
}

#[inline]
fn target(window: WindowId) -> Option<WindowId> {
    window.is_valid().then_some(window)
}

/// Win32 hotkey table (`RegisterHotKey` / `UnregisterHotKey`).
///
/// Win32 hotkeys have thread affinity: register, unregister and pump messages on the same
/// thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Hotkeys;

impl Win32Hotkeys {
    pub fn new() -> Self {
        Self
    }
}

impl HotkeySubsystem for Win32Hotkeys {
    fn register(&self, window: WindowId, id: i32, modifiers: Modifiers, key: KeyCode) -> bool {
        match register_hotkey(target(window), id, modifiers.to_mask(), key.virtual_key()) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(id, window = window.raw(), error = %e, "RegisterHotKey failed");
                false
            }
        }
    }

    fn unregister(&self, window: WindowId, id: i32) -> bool {
        match unregister_hotkey(target(window), id) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(id, window = window.raw(), error = %e, "UnregisterHotKey failed");
                false
            }
        }
    }

    fn foreground_window(&self) -> Option<WindowId> {
        foreground_window()
    }
}
