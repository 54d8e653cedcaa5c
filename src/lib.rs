//! Cloudhop - an endless vertical platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic fixed-timestep simulation (entities, collisions,
//!   procedural platforms, spawn orchestration)
//! - `input`: Logical action snapshot the driver feeds into each tick
//! - `audio`: Named sound-effect events the driver drains and plays
//! - `highscores`: Single-integer high score persistence seam
//!
//! The crate performs no drawing, audio synthesis or device polling; the
//! outer frame pump owns those and calls `Stage::tick` at a fixed rate plus
//! `Stage::interpolate` once per rendered frame.

pub mod audio;
pub mod highscores;
pub mod input;
pub mod sim;

pub use audio::{SoundEffect, SoundQueue};
pub use highscores::ScoreStore;
pub use input::{ActionState, InputSnapshot};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second); all speeds are in px/tick
    pub const TICK_RATE: u32 = 60;
    /// Maximum simulation ticks consumed per rendered frame
    pub const MAX_SUBSTEPS: u32 = 5;

    /// Playfield dimensions in pixels
    pub const SCREEN_WIDTH: f32 = 144.0;
    pub const SCREEN_HEIGHT: f32 = 192.0;

    /// Platform tiles are 16 px wide
    pub const TILE_WIDTH: f32 = 16.0;
    /// Tiles per platform row
    pub const PLATFORM_WIDTH: usize = 9;
    /// Extra scroll room above and below the visible area
    pub const PLATFORM_OFFSET: f32 = 32.0;
    /// Rows on the conveyor; together they span SCREEN_HEIGHT + 2*OFFSET
    pub const PLATFORM_COUNT: usize = 4;
    /// Vertical distance between consecutive rows
    pub const PLATFORM_SPACING: f32 = 64.0;

    /// Points awarded when the player clears a platform
    pub const PLATFORM_SCORE: u32 = 10;
    /// Points awarded for stomping an enemy
    pub const ENEMY_SCORE: u32 = 50;

    /// Game time (in ticks) over which enemy spawn weights ramp to the
    /// late-game table
    pub const DIFFICULTY_RAMP_TICKS: f32 = 120.0 * 60.0;
}

/// Modulo that always returns a non-negative result
#[inline]
pub fn neg_mod(m: f32, n: f32) -> f32 {
    ((m % n) + n) % n
}
