use std::fmt;
use std::sync::Arc;

use hk_platform::{
    HookId, HotkeyError, HotkeySubsystem, KeyCode, MessageHooks, Modifiers, RawMessage, Result,
    WM_HOTKEY, WindowId, WindowSource,
};

use crate::HotKeyId;
use crate::dispatch::{Dispatcher, HotKeyPressed, Listener, ListenerId, Listeners, invoke_all};

/// Lifecycle of a [`HotKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotKeyState {
    /// Not held by the OS. Initial state, and the permanent state of an inert
    /// (`KeyCode::NONE`) hotkey.
    Unregistered,
    /// The OS holds `(window, id, modifiers, key)`.
    Registered,
    /// The OS refused the combination. Terminal.
    RegistrationFailed,
    /// Disposed after construction. Terminal.
    Disposed,
}

/// The collaborators every hotkey needs: the OS hotkey table, the message-loop hook registry,
/// and where listener calls run.
#[derive(Clone)]
pub struct HotKeyContext {
    subsystem: Arc<dyn HotkeySubsystem>,
    hooks: MessageHooks,
    dispatcher: Dispatcher,
}

impl fmt::Debug for HotKeyContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HotKeyContext")
            .field("hooks", &self.hooks)
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

impl HotKeyContext {
    pub fn new(subsystem: Arc<dyn HotkeySubsystem>, hooks: MessageHooks) -> Self {
        Self {
            subsystem,
            hooks,
            dispatcher: Dispatcher::default(),
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn hooks(&self) -> &MessageHooks {
        &self.hooks
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Shorthand for [`HotKey::new`].
    pub fn register<F>(
        &self,
        modifiers: Modifiers,
        key: KeyCode,
        source: impl Into<WindowSource>,
        callback: F,
    ) -> Result<HotKey>
    where
        F: Fn(&HotKeyPressed) + Send + Sync + 'static,
    {
        HotKey::new(self, modifiers, key, source, callback)
    }
}

/// State the message hook and dispatch workers share with the owning [`HotKey`].
struct Shared {
    pressed: HotKeyPressed,
    listeners: Listeners,
    dispatcher: Dispatcher,
}

impl Shared {
    /// Message-loop hook body. Runs on the pump thread for every message.
    fn intercept(&self, msg: &mut RawMessage, handled: &mut bool) {
        if *handled {
            return;
        }
        if msg.msg != WM_HOTKEY || msg.hotkey_id() != self.pressed.id.get() {
            return;
        }

        self.dispatch_pressed();
        *handled = true;
    }

    fn dispatch_pressed(&self) {
        let listeners = self.listeners.snapshot();
        if listeners.is_empty() {
            return;
        }

        let pressed = self.pressed;
        tracing::trace!(id = pressed.id.get(), "hotkey pressed");
        self.dispatcher.spawn(move || invoke_all(&pressed, &listeners));
    }
}

/// A global hotkey registered with the OS for as long as this value lives.
///
/// Construction registers the combination and subscribes to the message loop; [`dispose`]
/// (or dropping the value) unsubscribes and releases the OS registration. Listeners run off the
/// pump thread, see [`Dispatcher`].
///
/// [`dispose`]: HotKey::dispose
pub struct HotKey {
    shared: Arc<Shared>,
    subsystem: Arc<dyn HotkeySubsystem>,
    hooks: MessageHooks,
    hook: Option<HookId>,
    state: HotKeyState,
}

impl HotKey {
    /// Register `modifiers + key` and start listening for it.
    ///
    /// `KeyCode::NONE` yields an inert hotkey: nothing is registered, nothing ever fires.
    pub fn new<F>(
        context: &HotKeyContext,
        modifiers: Modifiers,
        key: KeyCode,
        source: impl Into<WindowSource>,
        callback: F,
    ) -> Result<Self>
    where
        F: Fn(&HotKeyPressed) + Send + Sync + 'static,
    {
        let id = HotKeyId::next();
        let window = resolve_window(context.subsystem.as_ref(), source.into())?;

        let shared = Arc::new(Shared {
            pressed: HotKeyPressed {
                id,
                window,
                modifiers,
                key,
            },
            listeners: Listeners::default(),
            dispatcher: context.dispatcher.clone(),
        });
        shared.listeners.add(Arc::new(callback));

        let mut hotkey = HotKey {
            shared,
            subsystem: Arc::clone(&context.subsystem),
            hooks: context.hooks.clone(),
            hook: None,
            state: HotKeyState::Unregistered,
        };

        if key.is_none() {
            tracing::debug!(id = id.get(), "hotkey has no key; not registering");
            return Ok(hotkey);
        }

        if !hotkey.subsystem.register(window, id.get(), modifiers, key) {
            hotkey.state = HotKeyState::RegistrationFailed;
            tracing::warn!(
                id = id.get(),
                window = window.raw(),
                "hotkey {} is already in use",
                hk_platform::combination_string(modifiers, key)
            );
            return Err(HotkeyError::AlreadyInUse { modifiers, key });
        }
        hotkey.state = HotKeyState::Registered;

        let shared = Arc::clone(&hotkey.shared);
        let hook = hotkey
            .hooks
            .add_hook(move |msg, handled| shared.intercept(msg, handled));
        hotkey.hook = Some(hook);

        tracing::debug!(
            id = id.get(),
            window = window.raw(),
            "registered hotkey {}",
            hk_platform::combination_string(modifiers, key)
        );
        Ok(hotkey)
    }

    #[inline]
    pub fn id(&self) -> HotKeyId {
        self.shared.pressed.id
    }

    #[inline]
    pub fn key(&self) -> KeyCode {
        self.shared.pressed.key
    }

    #[inline]
    pub fn modifiers(&self) -> Modifiers {
        self.shared.pressed.modifiers
    }

    #[inline]
    pub fn window(&self) -> WindowId {
        self.shared.pressed.window
    }

    #[inline]
    pub fn state(&self) -> HotKeyState {
        self.state
    }

    #[inline]
    pub fn is_registered(&self) -> bool {
        self.state == HotKeyState::Registered
    }

    /// Attach another listener. It runs after the constructor callback and any listener added
    /// before it.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&HotKeyPressed) + Send + Sync + 'static,
    {
        let listener: Arc<Listener> = Arc::new(listener);
        self.shared.listeners.add(listener)
    }

    /// Detach a listener added with [`subscribe`](Self::subscribe).
    pub fn unsubscribe(&self, listener: ListenerId) -> bool {
        self.shared.listeners.remove(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.shared.listeners.len()
    }

    /// Unsubscribe from the message loop and release the OS registration.
    ///
    /// Safe to call any number of times, in any state. Failures are logged, never returned; if
    /// the OS refuses to unregister, the hotkey stays [`Registered`](HotKeyState::Registered)
    /// (with its hook already gone) and a later call tries again. A firing already handed to
    /// the dispatcher still runs.
    pub fn dispose(&mut self) {
        let id = self.id().get();

        if let Some(hook) = self.hook.take()
            && !self.hooks.remove_hook(hook)
        {
            tracing::warn!(id, "message hook was already removed");
        }

        match self.state {
            HotKeyState::Registered => {
                let window = self.window();
                if self.subsystem.unregister(window, id) {
                    tracing::debug!(id, window = window.raw(), "unregistered hotkey");
                    self.state = HotKeyState::Disposed;
                } else {
                    // Still held by the OS as far as we know; the next dispose (or drop) retries.
                    tracing::warn!(id, window = window.raw(), "failed to unregister hotkey");
                }
            }
            HotKeyState::Unregistered => self.state = HotKeyState::Disposed,
            HotKeyState::RegistrationFailed | HotKeyState::Disposed => {}
        }
    }
}

impl Drop for HotKey {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for HotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HotKey")
            .field("id", &self.id())
            .field("window", &self.window())
            .field("modifiers", &self.modifiers())
            .field("key", &self.key())
            .field("state", &self.state)
            .finish()
    }
}

fn resolve_window(subsystem: &dyn HotkeySubsystem, source: WindowSource) -> Result<WindowId> {
    match source {
        WindowSource::Window(window) if window.is_valid() => Ok(window),
        WindowSource::Window(_) => Err(HotkeyError::InvalidWindow),
        WindowSource::Foreground => subsystem
            .foreground_window()
            .filter(|window| window.is_valid())
            .ok_or(HotkeyError::NoForegroundWindow),
        WindowSource::ThreadQueue => Ok(WindowId::INVALID),
    }
}
