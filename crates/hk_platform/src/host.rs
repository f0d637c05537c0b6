/// Opaque window identifier.
///
/// This is used to avoid leaking platform window handles (e.g. Win32 `HWND`) across crate
/// boundaries. Platform backends can convert to/from raw handles as needed.
///
/// The zero value doubles as "no window": a hotkey registered against it is delivered to the
/// registering thread's message queue instead of a window procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(usize);

impl WindowId {
    pub const INVALID: WindowId = WindowId(0);

    #[inline]
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn raw(self) -> usize {
        self.0
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 != 0
    }
}

/// Where a hotkey should be delivered.
///
/// There is no implicit fallback between these: a caller always says which one it wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSource {
    /// A specific window. Must be a valid (non-zero) id.
    Window(WindowId),
    /// Whatever window is in the foreground at construction time.
    Foreground,
    /// No window; notifications go to the registering thread's message queue.
    ThreadQueue,
}

impl From<WindowId> for WindowSource {
    fn from(window: WindowId) -> Self {
        WindowSource::Window(window)
    }
}

/// Win32 `WM_HOTKEY`.
pub const WM_HOTKEY: u32 = 0x0312;

/// Raw platform message as seen by message-loop preprocess hooks.
///
/// Mirrors the fields of a Win32 `MSG` that hooks care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMessage {
    pub window: WindowId,
    pub msg: u32,
    pub wparam: usize,
    pub lparam: isize,
}

impl RawMessage {
    pub fn new(window: WindowId, msg: u32, wparam: usize, lparam: isize) -> Self {
        Self {
            window,
            msg,
            wparam,
            lparam,
        }
    }

    /// A `WM_HOTKEY` notification carrying `id`, as the OS would post it.
    pub fn hotkey(window: WindowId, id: i32) -> Self {
        Self::new(window, WM_HOTKEY, id as u32 as usize, 0)
    }

    /// Hotkey id carried in the low 32 bits of `wparam`.
    #[inline]
    pub fn hotkey_id(&self) -> i32 {
        self.wparam as u32 as i32
    }
}
