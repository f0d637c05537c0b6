use std::sync::OnceLock;

use hk_core::{RawMessage, WM_HOTKEY};
use hk_settings::ConfigManager;
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &ConfigManager) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let config = ConfigManager::new();
    init_tracing(&config);

    if let Err(e) = run(&config) {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}

/// Pump-side hook that calls `on_quit` when the quit hotkey's message comes through.
///
/// Subscribed before the quit hotkey registers, so it sees the message unclaimed; it leaves
/// `handled` alone so the hotkey's own listeners still fire.
#[cfg_attr(not(any(target_os = "windows", test)), allow(dead_code))]
fn quit_hook(
    quit_id: &'static OnceLock<i32>,
    on_quit: impl Fn() + Send + Sync + 'static,
) -> impl Fn(&mut RawMessage, &mut bool) + Send + Sync + 'static {
    move |msg, handled| {
        if *handled || msg.msg != WM_HOTKEY {
            return;
        }
        if quit_id.get() == Some(&msg.hotkey_id()) {
            on_quit();
        }
    }
}

#[cfg(target_os = "windows")]
fn run(config: &ConfigManager) -> anyhow::Result<()> {
    use std::sync::Arc;

    use hk_core::{Dispatcher, HotKeyContext, KeyCode, MessageHooks, Modifiers, WindowSource};
    use hk_platform_windows::{Win32Hotkeys, quit_message_loop, run_message_loop};
    use hk_settings::DispatchMode;

    const QUIT_KEY: KeyCode = KeyCode(0x51);
    static QUIT_ID: OnceLock<i32> = OnceLock::new();

    // Must outlive the message loop when listeners run on its blocking pool.
    let runtime = match config.dispatch() {
        DispatchMode::Thread => None,
        DispatchMode::Runtime => Some(
            tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .thread_name("hotkey-runtime")
                .build()?,
        ),
    };
    let dispatcher = runtime
        .as_ref()
        .map(|rt| Dispatcher::Runtime(rt.handle().clone()))
        .unwrap_or_default();

    let hooks = MessageHooks::new();
    let context =
        HotKeyContext::new(Arc::new(Win32Hotkeys::new()), hooks.clone()).with_dispatcher(dispatcher);

    let (modifiers, key) = config.hotkey();
    let hotkey = context.register(modifiers, key, WindowSource::ThreadQueue, |pressed| {
        tracing::info!(
            id = %pressed.id,
            combination = %hk_core::combination_string(pressed.modifiers, pressed.key),
            "hotkey pressed"
        );
    })?;
    tracing::info!(id = %hotkey.id(), "listening for {}", config.get().hotkey_string());

    // PostQuitMessage only reaches the calling thread, so stop from the pump side.
    let quit_hook_id = hooks.add_hook(quit_hook(&QUIT_ID, || quit_message_loop(0)));
    let quit = context.register(
        Modifiers::CTRL.with_alt().with_no_repeat(),
        QUIT_KEY,
        WindowSource::ThreadQueue,
        |_| tracing::info!("quit requested"),
    )?;
    let _ = QUIT_ID.set(quit.id().get());
    tracing::info!("press Ctrl+Alt+Q to exit");

    run_message_loop(&hooks);

    hooks.remove_hook(quit_hook_id);
    drop(quit);
    drop(hotkey);
    Ok(())
}

#[cfg(not(target_os = "windows"))]
fn run(config: &ConfigManager) -> anyhow::Result<()> {
    anyhow::bail!(
        "global hotkeys need Win32; {} was not registered",
        config.get().hotkey_string()
    )
}
