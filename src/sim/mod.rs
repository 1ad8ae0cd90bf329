//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Delta-time clamped per frame
//! - Seeded RNG only
//! - Pipes iterate in creation order
//! - No rendering, audio or platform dependencies

pub mod bird;
pub mod collision;
pub mod ground;
pub mod pipe;
pub mod powerup;
pub mod rect;
pub mod state;
pub mod tick;

pub use bird::{Bird, WingPhase};
pub use collision::{CollisionReport, bird_out_of_bounds, evaluate};
pub use ground::Ground;
pub use pipe::{GapZone, Pipe, PipeLayout, PipeStream, pick_gap};
pub use powerup::Powerup;
pub use rect::Rect;
pub use state::{
    BirdView, Difficulty, GameEvent, GamePhase, GameState, PipeView, PowerupView, Snapshot,
    restart_button_rect,
};
pub use tick::{TickInput, tick};
