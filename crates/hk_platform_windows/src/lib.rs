#![cfg(target_os = "windows")]

pub mod hotkeys;
pub mod message_loop;

pub use hotkeys::Win32Hotkeys;
pub use message_loop::{pump_pending, quit_message_loop, run_message_loop};

use std::ffi::c_void;

use hk_platform::WindowId;
use windows::Win32::Foundation::HWND;

#[inline]
pub fn window_id(hwnd: HWND) -> WindowId {
    WindowId::from_raw(hwnd.0 as usize)
}

#[inline]
pub fn hwnd(window: WindowId) -> HWND {
    HWND(window.raw() as *mut c_void)
}
