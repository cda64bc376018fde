//! Raven behavior controller: the desktop pet's state machine.
//!
//! The controller is pure Rust with no browser types. It owns the pet's
//! state, position, target, and animation counters, and turns each
//! simulation step into a [`DrawCommand`] the DOM adapter applies to the
//! on-screen element. Timers live outside (see [`scheduler`] and [`dom`]),
//! so every transition here is testable natively without a browser:
//! - `step()` runs on the ~50ms simulation cadence,
//! - `advance_tick()` on the ~100ms animation-phase cadence,
//! - `advance_death()` on the dedicated post-mortem sweep cadence.

pub mod dom;
pub mod frames;
pub mod motion;
pub mod scheduler;
pub mod sprites;

use frames::{DeathSweep, Lcg};
use motion::{Vec2, step_toward};
use sprites::{PetConfig, PetState};

/// One rendered frame: everything the surface adapter needs to place and
/// style the pet element.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DrawCommand {
    pub image: &'static str,
    pub class_name: &'static str,
    /// Negative horizontal background offset selecting the current frame.
    pub frame_offset_px: i32,
    /// Top-left corner, already centered on the pet's position.
    pub left_px: i32,
    pub top_px: i32,
    pub width_px: u32,
    pub height_px: u32,
    /// Mirror the sprite so it faces its target.
    pub flip_horizontal: bool,
}

/// The creature controller. Constructed once, after asset preloading, and
/// driven by external timers until the terminal `Dead` state's sweep ends.
pub struct Raven {
    config: PetConfig,
    state: PetState,
    position: Vec2,
    target: Vec2,
    tick: u64,
    current_frame: u32,
    flipped: bool,
    sweep: Option<DeathSweep>,
    rng: Lcg,
}

impl Raven {
    pub fn new(config: PetConfig, spawn: Vec2, seed: u64) -> Self {
        Self {
            config,
            state: PetState::Walking,
            position: spawn,
            target: spawn,
            tick: 0,
            current_frame: 0,
            flipped: false,
            sweep: None,
            rng: Lcg::new(seed),
        }
    }

    pub fn state(&self) -> PetState {
        self.state
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    pub fn config(&self) -> &PetConfig {
        &self.config
    }

    /// Pointer input: retarget the chase. Ignored once dead.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        if self.state == PetState::Dead {
            return;
        }
        self.target = Vec2::new(x, y);
    }

    /// Animation phase counter, on its own cadence. Never reset; keeps
    /// running after death (the sweep counts independently).
    pub fn advance_tick(&mut self) {
        self.tick += 1;
    }

    /// One simulation step: pick the state from the cursor distance, move,
    /// select a frame. Returns `None` once dead; the simulation is frozen.
    pub fn step(&mut self) -> Option<DrawCommand> {
        if self.state == PetState::Dead {
            return None;
        }

        let delta = self.position.delta_to(self.target);
        let distance = self.position.distance_to(self.target);
        self.flipped = delta.x > 0.0;

        let next = if distance > self.config.fly_threshold {
            PetState::Flying
        } else if distance > self.config.walk_threshold {
            PetState::Walking
        } else {
            self.config.rest.state()
        };
        if next == PetState::Walking && self.state != PetState::Walking {
            self.current_frame = 0;
        }
        self.state = next;

        let sheet = self.state.sheet();
        match self.state {
            PetState::Flying => {
                // zero axis threshold: flight approaches arbitrarily close
                self.position = step_toward(
                    self.position,
                    self.target,
                    self.config.step_size(),
                    self.config.fly_speed,
                    0.0,
                );
                self.current_frame = frames::cycle(self.tick, sheet.frame_count);
            }
            PetState::Walking => {
                self.position = step_toward(
                    self.position,
                    self.target,
                    self.config.step_size(),
                    1.0,
                    self.config.step_size(),
                );
                self.current_frame = frames::cycle(self.tick, sheet.frame_count);
            }
            PetState::Idle => {
                let roll = self.rng.next_f64();
                self.current_frame = frames::advance_idle(self.current_frame, sheet.frame_count, roll);
            }
            PetState::Staying => {
                self.current_frame = 0;
            }
            PetState::Dead => return None,
        }

        Some(self.draw_command())
    }

    /// Enter the terminal state. Idempotent; `true` only on the actual
    /// transition, so the caller cancels the simulation timer exactly once.
    pub fn die(&mut self) -> bool {
        if self.state == PetState::Dead {
            return false;
        }
        self.state = PetState::Dead;
        self.current_frame = 0;
        self.sweep = Some(DeathSweep::new(PetState::Dead.sheet().frame_count));
        true
    }

    /// One step of the post-mortem sweep. Yields a draw command per death
    /// frame, in order, then `None` forever once the sweep is exhausted.
    pub fn advance_death(&mut self) -> Option<DrawCommand> {
        let frame = self.sweep.as_mut()?.advance()?;
        self.current_frame = frame;
        Some(self.draw_command())
    }

    fn draw_command(&self) -> DrawCommand {
        let sheet = self.state.sheet();
        let (width, height) = self.config.footprint();
        DrawCommand {
            image: sheet.image,
            class_name: sheet.class_name,
            frame_offset_px: frames::strip_offset_px(
                self.current_frame,
                self.config.frame_width,
                self.config.scale,
            ),
            left_px: self.position.x.round() as i32 - width as i32 / 2,
            top_px: self.position.y.round() as i32 - height as i32 / 2,
            width_px: width,
            height_px: height,
            flip_horizontal: self.flipped,
        }
    }
}
