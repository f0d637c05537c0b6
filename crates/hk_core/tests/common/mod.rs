#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

use hk_core::{
    HotKeyContext, HotKeyPressed, HotkeySubsystem, KeyCode, MessageHooks, Modifiers, WindowId,
};
use parking_lot::Mutex;

pub const WAIT: Duration = Duration::from_secs(5);
pub const QUIET: Duration = Duration::from_millis(150);

#[derive(Debug, Default)]
struct Table {
    live: HashMap<(WindowId, i32), (u32, KeyCode)>,
    register_calls: usize,
    unregister_calls: usize,
}

/// In-memory stand-in for the OS hotkey table.
///
/// Like Win32 it rejects a second claim on a live `(window, id)` slot and a second claim on a
/// combination someone already holds.
#[derive(Debug, Default)]
pub struct FakeSubsystem {
    table: Mutex<Table>,
    foreground: Option<WindowId>,
}

impl FakeSubsystem {
    pub fn with_foreground(window: WindowId) -> Self {
        Self {
            foreground: Some(window),
            ..Self::default()
        }
    }

    pub fn register_calls(&self) -> usize {
        self.table.lock().register_calls
    }

    pub fn unregister_calls(&self) -> usize {
        self.table.lock().unregister_calls
    }

    pub fn live_count(&self) -> usize {
        self.table.lock().live.len()
    }

    pub fn holds(&self, window: WindowId, id: i32) -> bool {
        self.table.lock().live.contains_key(&(window, id))
    }
}

fn combination(modifiers: Modifiers) -> u32 {
    modifiers.to_mask() & !Modifiers::MOD_NOREPEAT
}

impl HotkeySubsystem for FakeSubsystem {
    fn register(&self, window: WindowId, id: i32, modifiers: Modifiers, key: KeyCode) -> bool {
        let mut table = self.table.lock();
        table.register_calls += 1;

        let wanted = (combination(modifiers), key);
        if table.live.contains_key(&(window, id)) || table.live.values().any(|held| *held == wanted)
        {
            return false;
        }
        table.live.insert((window, id), wanted);
        true
    }

    fn unregister(&self, window: WindowId, id: i32) -> bool {
        let mut table = self.table.lock();
        table.unregister_calls += 1;
        table.live.remove(&(window, id)).is_some()
    }

    fn foreground_window(&self) -> Option<WindowId> {
        self.foreground
    }
}

pub fn setup() -> (HotKeyContext, Arc<FakeSubsystem>) {
    setup_with(FakeSubsystem::default())
}

pub fn setup_with(subsystem: FakeSubsystem) -> (HotKeyContext, Arc<FakeSubsystem>) {
    let subsystem = Arc::new(subsystem);
    let context = HotKeyContext::new(subsystem.clone(), MessageHooks::new());
    (context, subsystem)
}

/// Listener that forwards every firing into a channel.
pub fn channel_listener() -> (
    impl Fn(&HotKeyPressed) + Send + Sync + 'static,
    mpsc::Receiver<HotKeyPressed>,
) {
    let (tx, rx) = mpsc::channel();
    let listener = move |pressed: &HotKeyPressed| {
        let _ = tx.send(*pressed);
    };
    (listener, rx)
}

/// Collect whatever arrives within [`QUIET`] after the first event (or nothing).
pub fn drain(rx: &mpsc::Receiver<HotKeyPressed>) -> Vec<HotKeyPressed> {
    let mut events = Vec::new();
    while let Ok(pressed) = rx.recv_timeout(QUIET) {
        events.push(pressed);
    }
    events
}

pub fn window(raw: usize) -> WindowId {
    WindowId::from_raw(raw)
}
