//! Pixel Raven core crate.
//!
//! A pixel-art raven desktop pet for the browser: the sprite chases the
//! cursor through walk / idle / fly states, can be killed into a terminal
//! death animation, and is framed by a noise-heightmap backdrop and an
//! elapsed-session clock. The behavior controller in [`raven`] is pure Rust
//! and natively testable; [`raven::dom`], [`backdrop`] and [`clock`] are the
//! browser adapters around it.

use wasm_bindgen::prelude::*;

pub mod backdrop;
pub mod clock;
pub mod raven;

pub use raven::motion::Vec2;
pub use raven::sprites::{PetConfig, PetState, RestPolicy, SpriteSheet};
pub use raven::{DrawCommand, Raven};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Wire up the whole page on load: backdrop canvas, elapsed clock, and the
/// pet itself (constructed once its sprite sheets finish preloading).
#[wasm_bindgen]
pub fn start_widget() -> Result<(), JsValue> {
    backdrop::start_backdrop()?;
    clock::start_clock()?;
    raven::dom::start_pet(PetConfig::default())
}

/// `start_widget` with a JSON-encoded [`PetConfig`] override from the page.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_widget_with_config(json: &str) -> Result<(), JsValue> {
    let config = PetConfig::from_json(json).map_err(|err| JsValue::from_str(&err.to_string()))?;
    backdrop::start_backdrop()?;
    clock::start_clock()?;
    raven::dom::start_pet(config)
}
