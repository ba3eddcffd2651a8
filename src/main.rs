use emotion_ai::{App, AppConfig, ConsoleLogger, LocalStorage};
use leptos::prelude::*;

// lol_alloc keeps the wasm binary small
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::load(&LocalStorage);
    ConsoleLogger::init(config.log_level);
    log::info!("[App] backend {}", config.api_base);

    mount_to_body(move || view! { <App config=config /> });
}
