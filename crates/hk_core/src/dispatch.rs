use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use hk_platform::{KeyCode, Modifiers, WindowId};
use parking_lot::RwLock;

use crate::HotKeyId;

/// Payload handed to listeners when a hotkey fires.
///
/// Identifies the registration that fired, so one listener can serve several hotkeys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotKeyPressed {
    pub id: HotKeyId,
    pub window: WindowId,
    pub modifiers: Modifiers,
    pub key: KeyCode,
}

pub type Listener = dyn Fn(&HotKeyPressed) + Send + Sync;

/// Handle returned by [`HotKey::subscribe`](crate::HotKey::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Where listener invocations run. Never on the pump thread.
#[derive(Debug, Clone, Default)]
pub enum Dispatcher {
    /// One short-lived OS thread per firing.
    #[default]
    Thread,
    /// Tokio's blocking pool on the given runtime.
    Runtime(tokio::runtime::Handle),
}

impl Dispatcher {
    /// Use the Tokio runtime the caller is running in.
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn current_runtime() -> Self {
        Dispatcher::Runtime(tokio::runtime::Handle::current())
    }

    pub(crate) fn spawn<F>(&self, work: F)
    where
        F: FnOnce() + Send + 'static,
    {
        match self {
            Dispatcher::Thread => {
                if let Err(e) = thread::Builder::new()
                    .name("hotkey-dispatch".into())
                    .spawn(work)
                {
                    tracing::error!(error = %e, "failed to spawn hotkey dispatch thread");
                }
            }
            Dispatcher::Runtime(handle) => {
                // Detached: a firing runs to completion on its own.
                drop(handle.spawn_blocking(work));
            }
        }
    }
}

/// Multicast listener list.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: AtomicU64,
    entries: RwLock<Vec<(ListenerId, Arc<Listener>)>>,
}

impl Listeners {
    pub(crate) fn add(&self, listener: Arc<Listener>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.entries.write().push((id, listener));
        id
    }

    pub(crate) fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub(crate) fn snapshot(&self) -> Vec<Arc<Listener>> {
        self.entries
            .read()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }
}

/// Call every listener once, isolating panics so one bad listener can't starve the rest.
pub(crate) fn invoke_all(pressed: &HotKeyPressed, listeners: &[Arc<Listener>]) {
    for listener in listeners {
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| (**listener)(pressed))) {
            tracing::error!(
                id = pressed.id.get(),
                "hotkey listener panicked: {}",
                panic_message(payload.as_ref())
            );
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "<non-string panic payload>"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    fn pressed() -> HotKeyPressed {
        HotKeyPressed {
            id: HotKeyId::next(),
            window: WindowId::INVALID,
            modifiers: Modifiers::CTRL,
            key: KeyCode(0x41),
        }
    }

    #[test]
    fn panicking_listener_does_not_stop_the_rest() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let failing: Arc<Listener> = Arc::new(|_: &HotKeyPressed| panic!("listener failure"));
        let counting: Arc<Listener> = Arc::new(move |_: &HotKeyPressed| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        invoke_all(&pressed(), &[failing, counting]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn listeners_add_and_remove() {
        let listeners = Listeners::default();
        let a = listeners.add(Arc::new(|_: &HotKeyPressed| {}));
        let b = listeners.add(Arc::new(|_: &HotKeyPressed| {}));
        assert_ne!(a, b);
        assert_eq!(listeners.len(), 2);

        assert!(listeners.remove(a));
        assert!(!listeners.remove(a));
        assert_eq!(listeners.snapshot().len(), 1);
    }

    #[test]
    fn panic_message_handles_common_payloads() {
        let payload: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(payload.as_ref()), "static");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");
        let payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(payload.as_ref()), "<non-string panic payload>");
    }
}
