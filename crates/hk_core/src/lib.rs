//! Global hotkey lifecycle: OS registration, message-loop interception, off-thread dispatch
//! and guaranteed cleanup.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use hk_core::{HotKeyContext, MessageHooks, Modifiers, KeyCode, WindowSource};
//! # fn demo(subsystem: Arc<dyn hk_core::HotkeySubsystem>) -> hk_core::Result<()> {
//! let hooks = MessageHooks::new();
//! let context = HotKeyContext::new(subsystem, hooks.clone());
//!
//! let _hotkey = context.register(
//!     Modifiers::CTRL.with_shift(),
//!     KeyCode(0x52),
//!     WindowSource::ThreadQueue,
//!     |pressed| println!("hotkey {} fired", pressed.id),
//! )?;
//! // Feed every pumped message through `hooks.preprocess(..)`.
//! # Ok(())
//! # }
//! ```

pub mod dispatch;
pub mod hotkey;
pub mod id;

pub use dispatch::{Dispatcher, HotKeyPressed, Listener, ListenerId};
pub use hotkey::{HotKey, HotKeyContext, HotKeyState};
pub use id::HotKeyId;

pub use hk_platform::{
    HookId, HotkeyError, HotkeySubsystem, KeyCode, MessageHooks, Modifiers, RawMessage, Result,
    WM_HOTKEY, WindowId, WindowSource, combination_string,
};
