//! Static sprite-sheet metadata and widget configuration.
//!
//! Every behavior state maps to one horizontal filmstrip image. The table is
//! immutable `'static` data resolved by exhaustive match, so adding a state
//! without wiring its sheet is a compile error.

/// Behavior states of the raven. `Dead` is terminal.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PetState {
    Idle,
    Staying,
    Walking,
    Flying,
    Dead,
}

/// Per-state sprite sheet descriptor: a horizontal strip of equally sized
/// frames selected at render time via a negative background offset.
#[derive(Clone, Copy, Debug)]
pub struct SpriteSheet {
    pub image: &'static str,
    pub frame_count: u32,
    pub class_name: &'static str,
}

const IDLE_SHEET: SpriteSheet = SpriteSheet {
    image: "animation/raven_idle.png",
    frame_count: 5,
    class_name: "idle",
};
const STAY_SHEET: SpriteSheet = SpriteSheet {
    image: "animation/raven_stay.png",
    frame_count: 1,
    class_name: "staying",
};
const WALK_SHEET: SpriteSheet = SpriteSheet {
    image: "animation/raven_walk.png",
    frame_count: 4,
    class_name: "walking",
};
const FLY_SHEET: SpriteSheet = SpriteSheet {
    image: "animation/raven_fly.png",
    frame_count: 6,
    class_name: "flying",
};
const DEAD_SHEET: SpriteSheet = SpriteSheet {
    image: "animation/raven_death.png",
    frame_count: 11,
    class_name: "dead",
};

impl PetState {
    pub fn sheet(self) -> &'static SpriteSheet {
        match self {
            PetState::Idle => &IDLE_SHEET,
            PetState::Staying => &STAY_SHEET,
            PetState::Walking => &WALK_SHEET,
            PetState::Flying => &FLY_SHEET,
            PetState::Dead => &DEAD_SHEET,
        }
    }
}

/// All sprite images the preloader must resolve before the controller may be
/// constructed.
pub const SPRITE_IMAGES: [&str; 5] = [
    IDLE_SHEET.image,
    STAY_SHEET.image,
    WALK_SHEET.image,
    FLY_SHEET.image,
    DEAD_SHEET.image,
];

/// Message revealed chunk-by-chunk after the death sweep starts.
pub const EPITAPH: [&str; 9] = ["Why", " did", " you", " kill", " me", ".", ".", ".", "?"];

/// Which state the raven rests in once it has caught up with the cursor.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RestPolicy {
    /// Probabilistic eye-blink animation (the `Idle` sheet).
    #[default]
    Blink,
    /// Single static frame (the `Staying` sheet).
    Stand,
}

impl RestPolicy {
    pub fn state(self) -> PetState {
        match self {
            RestPolicy::Blink => PetState::Idle,
            RestPolicy::Stand => PetState::Staying,
        }
    }
}

/// Tunable widget parameters. One parameterized controller replaces the
/// copy-pasted prototype variants; everything that differed between them is a
/// field here.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PetConfig {
    /// Integer pixel-scale factor applied to the 27px source frames. Also the
    /// per-axis step size in screen pixels.
    pub scale: u32,
    /// Source frame dimensions within each sheet.
    pub frame_width: u32,
    pub frame_height: u32,
    /// Beyond this cursor distance the raven takes wing.
    pub fly_threshold: f64,
    /// Beyond this cursor distance (but within `fly_threshold`) it walks.
    pub walk_threshold: f64,
    /// Step-size multiplier while flying.
    pub fly_speed: f64,
    pub rest: RestPolicy,
}

impl Default for PetConfig {
    fn default() -> Self {
        Self {
            scale: 2,
            frame_width: 27,
            frame_height: 27,
            fly_threshold: 1000.0,
            walk_threshold: 20.0,
            fly_speed: 3.0,
            rest: RestPolicy::Blink,
        }
    }
}

impl PetConfig {
    /// Step size in screen pixels per simulation step, per axis.
    pub fn step_size(&self) -> f64 {
        self.scale as f64
    }

    /// Rendered sprite footprint (width, height) in screen pixels.
    pub fn footprint(&self) -> (u32, u32) {
        (self.frame_width * self.scale, self.frame_height * self.scale)
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
