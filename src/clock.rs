//! Elapsed-session clock: an `HH:MM:SS` display in `#timer`, updated once a
//! second from an owned start timestamp, frozen once the pet is dead.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::{Element, window};

use crate::raven::dom;
use crate::raven::scheduler::Interval;

const CLOCK_PERIOD_MS: i32 = 1000;

struct ClockState {
    element: Element,
    /// performance.now() at startup; the only timestamp the clock ever keeps.
    start_ms: f64,
    interval: Option<Interval>,
}

thread_local! {
    static CLOCK: RefCell<Option<ClockState>> = RefCell::new(None);
}

/// Format a whole-second duration as `HH:MM:SS`. Hours count the full
/// elapsed hours and are not wrapped.
pub fn format_elapsed(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let mins = (total_secs / 60) % 60;
    let secs = total_secs % 60;
    format!("{hours:02}:{mins:02}:{secs:02}")
}

/// Start the once-a-second display updates. A page without a `#timer`
/// element simply has no clock.
pub fn start_clock() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let Some(element) = doc.get_element_by_id("timer") else {
        return Ok(());
    };
    let start_ms = win.performance().map(|p| p.now()).unwrap_or(0.0);
    CLOCK.with(|cell| {
        cell.replace(Some(ClockState {
            element,
            start_ms,
            interval: None,
        }))
    });

    let interval = Interval::start(
        CLOCK_PERIOD_MS,
        Box::new(|| {
            let now = window()
                .and_then(|w| w.performance())
                .map(|p| p.now())
                .unwrap_or(0.0);
            CLOCK.with(|cell| {
                if let Some(clock) = cell.borrow_mut().as_mut() {
                    let elapsed = ((now - clock.start_ms) / 1000.0).max(0.0) as u64;
                    clock
                        .element
                        .set_text_content(Some(&format_elapsed(elapsed)));
                    if dom::is_dead() {
                        if let Some(interval) = clock.interval.take() {
                            interval.cancel();
                        }
                    }
                }
            });
        }),
    )?;
    CLOCK.with(|cell| {
        if let Some(clock) = cell.borrow_mut().as_mut() {
            clock.interval = Some(interval);
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_elapsed(0), "00:00:00");
    }

    #[test]
    fn formats_each_unit() {
        assert_eq!(format_elapsed(59), "00:00:59");
        assert_eq!(format_elapsed(60), "00:01:00");
        assert_eq!(format_elapsed(3661), "01:01:01");
    }

    #[test]
    fn hours_accumulate_past_the_minute_wrap() {
        assert_eq!(format_elapsed(25 * 3600 + 90), "25:01:30");
    }
}
