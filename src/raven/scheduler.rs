//! Start/cancel wrappers over the browser's `setInterval` / `setTimeout`.
//!
//! Keeping scheduling out of the controller means `step()`, `advance_tick()`
//! and the death sweep are plain state transitions driven from here. The
//! callback closures are handed to the page for its whole lifetime
//! (`Closure::forget`), so cancelling only detaches the timer; that also
//! makes it safe for a callback to cancel its own interval.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

/// Handle to a repeating timer.
#[derive(Clone, Copy, Debug)]
pub struct Interval {
    handle: i32,
}

impl Interval {
    pub fn start(period_ms: i32, callback: Box<dyn FnMut()>) -> Result<Interval, JsValue> {
        let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
        let closure = Closure::wrap(callback);
        let handle = win.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period_ms,
        )?;
        closure.forget();
        Ok(Interval { handle })
    }

    pub fn cancel(self) {
        if let Some(win) = window() {
            win.clear_interval_with_handle(self.handle);
        }
    }
}

/// One-shot delayed callback. Fires once; no handle is kept because nothing
/// in the widget ever cancels a pending timeout.
pub fn timeout(delay_ms: i32, callback: Box<dyn FnMut()>) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let closure = Closure::wrap(callback);
    win.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        delay_ms,
    )?;
    closure.forget();
    Ok(())
}
