use hk_platform::{MessageHooks, RawMessage};
use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, MSG, PM_REMOVE, PeekMessageW, PostQuitMessage,
    TranslateMessage, WM_QUIT,
};

/// Run `hooks` over `msg`, write any edits back, and report whether a hook claimed it.
fn preprocess(hooks: &MessageHooks, msg: &mut MSG) -> bool {
    let mut raw = RawMessage::new(
        super::window_id(msg.hwnd),
        msg.message,
        msg.wParam.0,
        msg.lParam.0,
    );

    let handled = hooks.preprocess(&mut raw);

    msg.hwnd = super::hwnd(raw.window);
    msg.message = raw.msg;
    msg.wParam = WPARAM(raw.wparam);
    msg.lParam = LPARAM(raw.lparam);
    handled
}

fn translate_and_dispatch(msg: &MSG) {
    // SAFETY: `msg` was filled in by GetMessageW/PeekMessageW on this thread.
    unsafe {
        let _ = TranslateMessage(msg);
        DispatchMessageW(msg);
    }
}

/// Block on the calling thread's message queue until `WM_QUIT`.
///
/// Every message goes through `hooks` first; messages a hook marks handled skip
/// translate/dispatch.
pub fn run_message_loop(hooks: &MessageHooks) {
    let mut msg = MSG::default();
    // SAFETY: GetMessageW writes into a valid, owned MSG.
    while unsafe { GetMessageW(&mut msg, None, 0, 0) }.as_bool() {
        if preprocess(hooks, &mut msg) {
            continue;
        }
        translate_and_dispatch(&msg);
    }
}

/// Drain pending messages without blocking.
///
/// Returns `false` once `WM_QUIT` has been pulled off the queue.
pub fn pump_pending(hooks: &MessageHooks) -> bool {
    let mut msg = MSG::default();
    // SAFETY: PeekMessageW writes into a valid, owned MSG.
    while unsafe { PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE) }.as_bool() {
        if msg.message == WM_QUIT {
            return false;
        }
        if preprocess(hooks, &mut msg) {
            continue;
        }
        translate_and_dispatch(&msg);
    }
    true
}

/// Post `WM_QUIT` to the calling thread.
pub fn quit_message_loop(exit_code: i32) {
    // SAFETY: PostQuitMessage only touches the calling thread's queue.
    unsafe { PostQuitMessage(exit_code) }
}
