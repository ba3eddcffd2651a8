//! Timer module
//!
//! `setInterval` through `web_sys`.

use wasm_bindgen::prelude::*;

/// Periodic timer
///
/// Wraps `setInterval`. The interval is cleared when `Interval` is dropped.
pub struct Interval {
    handle: i32,
    #[allow(dead_code)]
    closure: Closure<dyn Fn()>,
}

impl Interval {
    /// Start a periodic timer
    ///
    /// # Arguments
    /// - `millis`: period in milliseconds
    /// - `callback`: invoked on every tick
    ///
    /// Returns `None` when there is no window or the browser refuses the timer.
    pub fn new<F>(millis: u32, callback: F) -> Option<Self>
    where
        F: Fn() + 'static,
    {
        let closure = Closure::<dyn Fn()>::new(callback);
        let window = web_sys::window()?;

        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis as i32,
            )
            .ok()?;

        Some(Self { handle, closure })
    }

    /// Clear the timer
    ///
    /// Dropping does the same; call this only to stop early.
    pub fn cancel(&self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}
