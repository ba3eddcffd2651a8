//! `log` backend
//!
//! On wasm targets records go to the browser console at the matching level;
//! elsewhere they go to stderr.

use log::{LevelFilter, Log, Metadata, Record};

pub struct ConsoleLogger {
    level: LevelFilter,
}

impl ConsoleLogger {
    /// Install as the global logger. A second call is ignored.
    pub fn init(level: LevelFilter) {
        let logger = Box::leak(Box::new(ConsoleLogger { level }));
        if log::set_logger(logger).is_ok() {
            log::set_max_level(level);
        }
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("{} {}", record.level(), record.args());

        #[cfg(target_arch = "wasm32")]
        {
            use log::Level;

            let msg = wasm_bindgen::JsValue::from_str(&line);
            match record.level() {
                Level::Error => web_sys::console::error_1(&msg),
                Level::Warn => web_sys::console::warn_1(&msg),
                Level::Info => web_sys::console::info_1(&msg),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&msg),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            eprintln!("{}", line);
        }
    }

    fn flush(&self) {}
}
