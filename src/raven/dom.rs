//! Browser wiring for the pet: element lookup, asset preloading, input
//! listeners, timer-driven stepping, and draw-command application.
//!
//! The page provides `#pet` (the sprite element, required), `#trigger` (the
//! kill button, optional) and `#text` (the epitaph line, optional). The
//! controller is constructed only after every sprite sheet has loaded; a
//! failed load is logged and aborts construction with no retry.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlImageElement, Window, console, window};

use super::motion::Vec2;
use super::scheduler::{self, Interval};
use super::sprites::{EPITAPH, PetConfig, PetState, SPRITE_IMAGES};
use super::{DrawCommand, Raven};

const STEP_PERIOD_MS: i32 = 50; // ~20 simulation steps per second
const TICK_PERIOD_MS: i32 = 100; // animation phase cadence
const SWEEP_PERIOD_MS: i32 = 100; // death sweep cadence
const REVEAL_DELAY_MS: i32 = 2000;
const REVEAL_PERIOD_MS: i32 = 400;

/// Controller plus the DOM handles and timers it is wired to.
struct PetDom {
    element: Element,
    text_element: Option<Element>,
    raven: Raven,
    step_interval: Option<Interval>,
    sweep_interval: Option<Interval>,
    reveal_interval: Option<Interval>,
    applied_class: Option<&'static str>,
    revealed: String,
    reveal_index: usize,
}

thread_local! {
    static PET: RefCell<Option<PetDom>> = RefCell::new(None);
}

/// Entry point: verify the surface element exists, then preload the sprite
/// sheets and construct the controller once they have all resolved.
pub fn start_pet(config: PetConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    if doc.get_element_by_id("pet").is_none() {
        return Err(JsValue::from_str("missing #pet element"));
    }
    preload_then_wire(config)
}

/// Whether the pet has reached its terminal state. Used by the clock to stop
/// counting.
pub fn is_dead() -> bool {
    PET.with(|cell| {
        cell.borrow()
            .as_ref()
            .map(|pet| pet.raven.state() == PetState::Dead)
            .unwrap_or(false)
    })
}

fn preload_then_wire(config: PetConfig) -> Result<(), JsValue> {
    let pending = Rc::new(Cell::new(SPRITE_IMAGES.len()));
    let failed = Rc::new(Cell::new(false));
    for url in SPRITE_IMAGES {
        let img = HtmlImageElement::new()?;
        {
            let pending = pending.clone();
            let failed = failed.clone();
            let on_load = Closure::wrap(Box::new(move || {
                pending.set(pending.get().saturating_sub(1));
                if pending.get() == 0 && !failed.get() {
                    if let Err(err) = wire_up(config) {
                        console::error_1(&err);
                    }
                }
            }) as Box<dyn FnMut()>);
            img.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
            on_load.forget();
        }
        {
            let failed = failed.clone();
            let on_error = Closure::wrap(Box::new(move || {
                failed.set(true);
                console::error_1(&JsValue::from_str(&format!("failed to load {url}")));
            }) as Box<dyn FnMut()>);
            img.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())?;
            on_error.forget();
        }
        img.set_src(url);
    }
    Ok(())
}

/// All assets resolved: construct the controller, attach input listeners, and
/// start the periodic simulation and tick timers.
fn wire_up(config: PetConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let element = doc
        .get_element_by_id("pet")
        .ok_or_else(|| JsValue::from_str("missing #pet element"))?;
    let text_element = doc.get_element_by_id("text");

    let raven = Raven::new(config, spawn_point(&win), seed(&win));
    PET.with(|cell| {
        cell.replace(Some(PetDom {
            element,
            text_element,
            raven,
            step_interval: None,
            sweep_interval: None,
            reveal_interval: None,
            applied_class: None,
            revealed: String::new(),
            reveal_index: 0,
        }))
    });

    attach_listeners(&doc)?;

    let step = Interval::start(
        STEP_PERIOD_MS,
        Box::new(|| {
            PET.with(|cell| {
                if let Some(pet) = cell.borrow_mut().as_mut() {
                    if let Some(cmd) = pet.raven.step() {
                        apply_draw(pet, &cmd);
                    }
                }
            });
        }),
    )?;
    PET.with(|cell| {
        if let Some(pet) = cell.borrow_mut().as_mut() {
            pet.step_interval = Some(step);
        }
    });

    // The tick counter runs for the page lifetime; its handle is never needed.
    Interval::start(
        TICK_PERIOD_MS,
        Box::new(|| {
            PET.with(|cell| {
                if let Some(pet) = cell.borrow_mut().as_mut() {
                    pet.raven.advance_tick();
                }
            });
        }),
    )?;

    Ok(())
}

fn attach_listeners(doc: &Document) -> Result<(), JsValue> {
    let on_move = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
        PET.with(|cell| {
            if let Some(pet) = cell.borrow_mut().as_mut() {
                pet.raven
                    .pointer_moved(evt.client_x() as f64, evt.client_y() as f64);
            }
        });
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
    on_move.forget();

    if let Some(button) = doc.get_element_by_id("trigger") {
        let on_click = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            if let Err(err) = trigger_death() {
                console::error_1(&err);
            }
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}

/// Kill-button handler: enter the terminal state, cancel the simulation timer
/// exactly once, and start the self-terminating sweep and epitaph reveal.
fn trigger_death() -> Result<(), JsValue> {
    let transitioned = PET.with(|cell| {
        let mut slot = cell.borrow_mut();
        let Some(pet) = slot.as_mut() else {
            return false;
        };
        if !pet.raven.die() {
            return false;
        }
        if let Some(step) = pet.step_interval.take() {
            step.cancel();
        }
        true
    });
    if !transitioned {
        return Ok(());
    }

    let sweep = Interval::start(
        SWEEP_PERIOD_MS,
        Box::new(|| {
            PET.with(|cell| {
                if let Some(pet) = cell.borrow_mut().as_mut() {
                    match pet.raven.advance_death() {
                        Some(cmd) => apply_draw(pet, &cmd),
                        None => {
                            if let Some(interval) = pet.sweep_interval.take() {
                                interval.cancel();
                            }
                        }
                    }
                }
            });
        }),
    )?;
    PET.with(|cell| {
        if let Some(pet) = cell.borrow_mut().as_mut() {
            pet.sweep_interval = Some(sweep);
        }
    });

    scheduler::timeout(
        REVEAL_DELAY_MS,
        Box::new(|| {
            if let Err(err) = start_reveal() {
                console::error_1(&err);
            }
        }),
    )?;
    Ok(())
}

fn start_reveal() -> Result<(), JsValue> {
    let has_text = PET.with(|cell| {
        cell.borrow()
            .as_ref()
            .map(|pet| pet.text_element.is_some())
            .unwrap_or(false)
    });
    if !has_text {
        return Ok(());
    }

    PET.with(|cell| {
        if let Some(pet) = cell.borrow_mut().as_mut() {
            pet.revealed.clear();
            pet.reveal_index = 0;
            if let Some(el) = &pet.text_element {
                el.set_text_content(Some(""));
            }
        }
    });

    let reveal = Interval::start(
        REVEAL_PERIOD_MS,
        Box::new(|| {
            PET.with(|cell| {
                if let Some(pet) = cell.borrow_mut().as_mut() {
                    if pet.reveal_index < EPITAPH.len() {
                        pet.revealed.push_str(EPITAPH[pet.reveal_index]);
                        pet.reveal_index += 1;
                        if let Some(el) = &pet.text_element {
                            el.set_text_content(Some(&pet.revealed));
                        }
                    } else if let Some(interval) = pet.reveal_interval.take() {
                        interval.cancel();
                    }
                }
            });
        }),
    )?;
    PET.with(|cell| {
        if let Some(pet) = cell.borrow_mut().as_mut() {
            pet.reveal_interval = Some(reveal);
        }
    });
    Ok(())
}

/// Rewrite the pet element's inline style from a draw command and swap the
/// state class. Only the two affected class-list entries are touched.
fn apply_draw(pet: &mut PetDom, cmd: &DrawCommand) {
    let style = format!(
        "position:absolute; left:{}px; top:{}px; width:{}px; height:{}px; \
         background-image:url('{}'); background-size:auto 100%; background-repeat:no-repeat; \
         background-position:{}px 0px; image-rendering:pixelated; transform:scaleX({});",
        cmd.left_px,
        cmd.top_px,
        cmd.width_px,
        cmd.height_px,
        cmd.image,
        cmd.frame_offset_px,
        if cmd.flip_horizontal { -1 } else { 1 },
    );
    pet.element.set_attribute("style", &style).ok();

    if pet.applied_class != Some(cmd.class_name) {
        if let Some(prev) = pet.applied_class {
            pet.element.class_list().remove_1(prev).ok();
        }
        pet.element.class_list().add_1(cmd.class_name).ok();
        pet.applied_class = Some(cmd.class_name);
    }
}

/// Default spawn point: horizontally centered, upper quarter of the viewport.
fn spawn_point(win: &Window) -> Vec2 {
    let width = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Vec2::new(width / 2.0, height / 4.0)
}

fn seed(win: &Window) -> u64 {
    #[cfg(feature = "rng")]
    {
        let mut bytes = [0u8; 8];
        if getrandom::getrandom(&mut bytes).is_ok() {
            return u64::from_le_bytes(bytes);
        }
    }
    win.performance().map(|p| p.now() as u64).unwrap_or(0)
}
