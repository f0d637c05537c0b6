use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::RawMessage;

/// Preprocess hook body: sees every pumped message before default processing.
///
/// The second argument is the shared "handled" flag. A hook that claims a message sets it to
/// `true`; hooks are expected to leave already-handled messages alone.
pub type PreprocessHook = dyn Fn(&mut RawMessage, &mut bool) + Send + Sync;

/// Handle returned by [`MessageHooks::add_hook`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(u64);

struct HookEntry {
    id: HookId,
    active: AtomicBool,
    hook: Box<PreprocessHook>,
}

struct HooksInner {
    next_id: AtomicU64,
    hooks: RwLock<Arc<[Arc<HookEntry>]>>,
}

/// Registry of message-loop preprocess hooks, owned by whoever runs the pump.
///
/// Cloning is cheap and yields a handle to the same registry.
///
/// Mutation during a pump pass:
/// - [`preprocess`](Self::preprocess) runs against a snapshot of the list taken when the pass
///   starts, and holds no lock while hook bodies run.
/// - A hook removed mid-pass is skipped for the rest of that pass.
/// - A hook added mid-pass first sees the next message.
#[derive(Clone)]
pub struct MessageHooks {
    inner: Arc<HooksInner>,
}

impl Default for MessageHooks {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MessageHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageHooks")
            .field("len", &self.len())
            .finish()
    }
}

impl MessageHooks {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(HooksInner {
                next_id: AtomicU64::new(1),
                hooks: RwLock::new(Arc::from(Vec::new())),
            }),
        }
    }

    /// Subscribe a hook. It runs after every hook added before it.
    pub fn add_hook<F>(&self, hook: F) -> HookId
    where
        F: Fn(&mut RawMessage, &mut bool) + Send + Sync + 'static,
    {
        let id = HookId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let entry = Arc::new(HookEntry {
            id,
            active: AtomicBool::new(true),
            hook: Box::new(hook),
        });

        let mut hooks = self.inner.hooks.write();
        let mut next = hooks.to_vec();
        next.push(entry);
        *hooks = Arc::from(next);
        id
    }

    /// Unsubscribe a hook. Returns `false` if `id` is not (or no longer) subscribed.
    pub fn remove_hook(&self, id: HookId) -> bool {
        let mut hooks = self.inner.hooks.write();
        let Some(pos) = hooks.iter().position(|entry| entry.id == id) else {
            return false;
        };

        hooks[pos].active.store(false, Ordering::Release);
        let mut next = hooks.to_vec();
        next.remove(pos);
        *hooks = Arc::from(next);
        true
    }

    pub fn contains(&self, id: HookId) -> bool {
        self.inner.hooks.read().iter().any(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.inner.hooks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run every hook over `msg`. Returns the final "handled" flag.
    pub fn preprocess(&self, msg: &mut RawMessage) -> bool {
        let snapshot = Arc::clone(&*self.inner.hooks.read());

        let mut handled = false;
        for entry in snapshot.iter() {
            if entry.active.load(Ordering::Acquire) {
                (entry.hook)(msg, &mut handled);
            }
        }
        handled
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    use super::*;
    use crate::{WM_HOTKEY, WindowId};

    fn message() -> RawMessage {
        RawMessage::hotkey(WindowId::INVALID, 1)
    }

    #[test]
    fn hooks_run_in_subscription_order() {
        let hooks = MessageHooks::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in 0..3 {
            let order = Arc::clone(&order);
            hooks.add_hook(move |_, _| order.lock().unwrap().push(tag));
        }

        assert!(!hooks.preprocess(&mut message()));
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn handled_flag_is_shared_between_hooks() {
        let hooks = MessageHooks::new();
        let saw_handled = Arc::new(AtomicBool::new(false));

        hooks.add_hook(|msg, handled| {
            if msg.msg == WM_HOTKEY {
                *handled = true;
            }
        });
        let saw = Arc::clone(&saw_handled);
        hooks.add_hook(move |_, handled| saw.store(*handled, Ordering::SeqCst));

        assert!(hooks.preprocess(&mut message()));
        assert!(saw_handled.load(Ordering::SeqCst));
    }

    #[test]
    fn remove_hook_is_idempotent() {
        let hooks = MessageHooks::new();
        let id = hooks.add_hook(|_, _| {});
        assert!(hooks.contains(id));
        assert!(hooks.remove_hook(id));
        assert!(!hooks.remove_hook(id));
        assert!(hooks.is_empty());
    }

    #[test]
    fn hook_removed_during_pass_is_skipped() {
        let hooks = MessageHooks::new();
        let victim_calls = Arc::new(AtomicUsize::new(0));
        let victim_id = Arc::new(Mutex::new(None::<HookId>));

        let registry = hooks.clone();
        let slot = Arc::clone(&victim_id);
        hooks.add_hook(move |_, _| {
            if let Some(id) = *slot.lock().unwrap() {
                registry.remove_hook(id);
            }
        });

        let calls = Arc::clone(&victim_calls);
        let id = hooks.add_hook(move |_, _| {
            calls.fetch_add(1, Ordering::SeqCst);
        });
        *victim_id.lock().unwrap() = Some(id);

        hooks.preprocess(&mut message());
        hooks.preprocess(&mut message());

        assert_eq!(victim_calls.load(Ordering::SeqCst), 0);
        assert_eq!(hooks.len(), 1);
    }

    #[test]
    fn hook_added_during_pass_waits_for_next_message() {
        let hooks = MessageHooks::new();
        let late_calls = Arc::new(AtomicUsize::new(0));
        let added = Arc::new(AtomicBool::new(false));

        let registry = hooks.clone();
        let calls = Arc::clone(&late_calls);
        let added_flag = Arc::clone(&added);
        hooks.add_hook(move |_, _| {
            if !added_flag.swap(true, Ordering::SeqCst) {
                let calls = Arc::clone(&calls);
                registry.add_hook(move |_, _| {
                    calls.fetch_add(1, Ordering::SeqCst);
                });
            }
        });

        hooks.preprocess(&mut message());
        assert_eq!(late_calls.load(Ordering::SeqCst), 0);

        hooks.preprocess(&mut message());
        assert_eq!(late_calls.load(Ordering::SeqCst), 1);
    }
}
