//! Decorative heightmap backdrop: a full-screen canvas behind the page,
//! filled block-by-block with contour-banded Perlin noise and slowly
//! animated on requestAnimationFrame.

use std::cell::RefCell;
use std::rc::Rc;

use noise::{NoiseFn, Perlin};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window, window};

/// Side length of one painted block in screen pixels.
const PIXEL_SIZE: u32 = 8;
/// Noise-space divisor; larger values stretch the terrain features.
const NOISE_SCALE: f64 = 500.0;
const CONTOUR_LEVELS: u32 = 6;
/// Noise-time advance per rendered frame.
const ANIMATION_SPEED: f64 = 0.0001;

const MAX_LIGHTNESS: f64 = 70.0;
const MIN_LIGHTNESS: f64 = 52.0;

struct BackdropState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    noise: Perlin,
    time: f64,
}

thread_local! {
    static BACKDROP: RefCell<Option<BackdropState>> = RefCell::new(None);
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Create (or reuse) the `#heightmap` canvas, pin it behind the page, and
/// start the render loop. The canvas tracks the window size.
pub fn start_backdrop() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id("heightmap") {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id("heightmap");
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&c)?;
        c
    };
    canvas
        .set_attribute(
            "style",
            "position:fixed; top:0; left:0; z-index:-1; pointer-events:none;",
        )
        .ok();
    size_to_window(&win, &canvas);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    BACKDROP.with(|cell| {
        cell.replace(Some(BackdropState {
            canvas,
            ctx,
            noise: Perlin::new(0),
            time: 0.0,
        }))
    });

    let on_resize = Closure::wrap(Box::new(move || {
        if let Some(win) = window() {
            BACKDROP.with(|cell| {
                if let Some(state) = cell.borrow().as_ref() {
                    size_to_window(&win, &state.canvas);
                }
            });
        }
    }) as Box<dyn FnMut()>);
    win.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    start_render_loop();
    Ok(())
}

fn size_to_window(win: &Window, canvas: &HtmlCanvasElement) {
    let width = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
}

fn start_render_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        BACKDROP.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                state.time += ANIMATION_SPEED;
                paint(state);
            }
        });
        if let Some(w) = window() {
            let _ =
                w.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

fn paint(state: &mut BackdropState) {
    let width = state.canvas.width();
    let height = state.canvas.height();
    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let value = state.noise.get([
                x as f64 / NOISE_SCALE,
                y as f64 / NOISE_SCALE,
                state.time,
            ]);
            let band = contour_band(value, CONTOUR_LEVELS);
            state.ctx.set_fill_style_str(&band_color(band));
            state
                .ctx
                .fill_rect(x as f64, y as f64, PIXEL_SIZE as f64, PIXEL_SIZE as f64);
            x += PIXEL_SIZE;
        }
        y += PIXEL_SIZE;
    }
}

/// Quantize a noise sample in `[-1, 1]` into one of `levels` contour bands.
fn contour_band(value: f64, levels: u32) -> u32 {
    let normalized = (value + 1.0) / 2.0;
    ((normalized * levels as f64) as u32).min(levels - 1)
}

/// Violet contour shade for a band, darkest at the lowest terrain.
fn band_color(band: u32) -> String {
    let step = (MAX_LIGHTNESS - MIN_LIGHTNESS) / (CONTOUR_LEVELS - 1) as f64;
    let lightness = MIN_LIGHTNESS + band as f64 * step;
    format!("hsl(260, 30%, {lightness}%)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_cover_the_noise_range() {
        assert_eq!(contour_band(-1.0, 6), 0);
        assert_eq!(contour_band(0.0, 6), 3);
        // exact top of the range stays inside the last band
        assert_eq!(contour_band(1.0, 6), 5);
    }

    #[test]
    fn band_lightness_spans_the_palette() {
        assert_eq!(band_color(0), "hsl(260, 30%, 52%)");
        assert_eq!(band_color(5), "hsl(260, 30%, 70%)");
    }
}
