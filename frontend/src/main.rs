use leptos::prelude::*;
use ledger_frontend::{App, load_config};

// Use lol_alloc as the global allocator for smaller WASM size
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();

    // LevelFilter::Off 时不安装日志；启动时只会初始化这一次
    if let Some(level) = load_config().log_level.to_level() {
        let _ = console_log::init_with_level(level);
    }

    mount_to_body(App);
}
