//! Flappy Sim - the simulation core of a Flappy Bird clone
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bird physics, pipes, collisions, scoring, lives)
//! - `config`: Session configuration, loadable from JSON
//! - `highscores`: Best-score leaderboard
//!
//! Rendering, input polling and audio live outside this crate. They read
//! [`sim::Snapshot`]s and [`sim::GameEvent`]s and feed [`sim::TickInput`]s back.

pub mod config;
pub mod error;
pub mod highscores;
pub mod sim;

pub use config::GameConfig;
pub use error::{Error, Result};
pub use highscores::HighScores;

use glam::Vec2;

/// Default tuning constants (world units are pixels, time is seconds)
pub mod consts {
    /// Playfield dimensions
    pub const WINDOW_WIDTH: f32 = 400.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;
    pub const GROUND_HEIGHT: f32 = 110.0;

    /// Scroll speed of pipes, ground and pickups at the start of a run
    pub const INITIAL_SCROLL_SPEED: f32 = 200.0;
    /// Seconds between pipe spawns at the start of a run
    pub const INITIAL_SPAWN_INTERVAL: f32 = 1.5;

    /// Bird physics
    pub const GRAVITY: f32 = -700.0;
    pub const FLAP_IMPULSE: f32 = 300.0;
    pub const BIRD_WIDTH: f32 = 40.0;
    pub const BIRD_HEIGHT: f32 = 28.0;
    /// Rotation limits in degrees
    pub const BIRD_MAX_TILT: f32 = 20.0;
    pub const BIRD_DEAD_TILT: f32 = -90.0;
    /// Degrees per second the dead bird noses down
    pub const BIRD_DEAD_SPIN_RATE: f32 = 350.0;
    /// Weight of the target rotation in the per-update blend
    pub const BIRD_TILT_BLEND: f32 = 0.99;
    /// Seconds the wing-up frame is held after a flap
    pub const WING_UP_HOLD: f32 = 0.2;
    /// Falling speed below which the wings fold down
    pub const WING_DOWN_VELOCITY: f32 = -50.0;

    /// Pipes
    pub const PIPE_GAP_MIN: f32 = 100.0;
    pub const PIPE_GAP_MAX: f32 = 180.0;
    pub const PIPE_WIDTH: f32 = 70.0;
    pub const PIPE_HEIGHT: f32 = 400.0;
    /// Shortest visible pipe segment above the ground / below the top edge
    pub const PIPE_MIN_STUB: f32 = 60.0;
    /// Pipes spawn this far past the right edge
    pub const PIPE_SPAWN_OFFSET: f32 = 100.0;

    /// Lives and difficulty
    pub const MAX_LIVES: u32 = 3;
    pub const SPEED_INCREASE_FREQUENCY: u32 = 5;
    pub const SPEED_INCREASE_MULTIPLIER: f32 = 1.10;

    /// Life pickup
    pub const HEART_ITEM_FREQUENCY: u32 = 20;
    pub const HEART_ITEM_WIDTH: f32 = 40.0;
    pub const HEART_ITEM_HEIGHT: f32 = 40.0;
    pub const HEART_FLOAT_AMPLITUDE: f32 = 10.0;
    pub const HEART_FLOAT_SPEED: f32 = 2.0;
    pub const HEART_SPAWN_OFFSET: f32 = 100.0;

    /// Restart button on the game-over overlay
    pub const RESTART_BUTTON_WIDTH: f32 = 120.0;
    pub const RESTART_BUTTON_HEIGHT: f32 = 40.0;

    /// Largest simulation step accepted per frame
    pub const MAX_FRAME_DT: f32 = 0.05;
}

/// Convert a window-space point (origin top-left, y down) to world space
/// (origin bottom-left, y up)
#[inline]
pub fn screen_to_world(point: Vec2, window_height: f32) -> Vec2 {
    Vec2::new(point.x, window_height - point.y)
}

/// Linear interpolation from `a` toward `b` by weight `t`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
