//! Bird physics
//!
//! Vertical-only motion under gravity with discrete flap impulses. The bird
//! never moves horizontally; the world scrolls past it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::GameConfig;
use crate::consts::*;
use crate::lerp;

/// Wing animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WingPhase {
    /// Just flapped
    Up,
    /// Gliding
    #[default]
    Mid,
    /// Falling
    Down,
}

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// Sprite centre
    pub pos: Vec2,
    /// Sprite size
    pub size: Vec2,
    /// Vertical velocity (positive is up)
    pub velocity: f32,
    /// Tilt in degrees (positive is nose up)
    pub rotation: f32,
    pub wing: WingPhase,
    /// Time spent in the wing-up frame
    pub wing_timer: f32,
    alive: bool,
    gravity: f32,
    flap_impulse: f32,
    hitbox: Rect,
}

impl Bird {
    /// Fresh bird at a third of the playfield width, a little above centre
    pub fn new(config: &GameConfig) -> Self {
        let pos = Vec2::new(config.window_width / 3.0, config.window_height / 2.0 + 50.0);
        let size = Vec2::new(config.bird_width, config.bird_height);
        Self {
            pos,
            size,
            velocity: 0.0,
            rotation: 0.0,
            wing: WingPhase::Mid,
            wing_timer: 0.0,
            alive: true,
            gravity: config.gravity,
            flap_impulse: config.flap_impulse,
            hitbox: hitbox_for(pos, size),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Collision box: 2/3 of the sprite in each axis, centred on it
    pub fn hitbox(&self) -> Rect {
        self.hitbox
    }

    /// Sprite bounds (used for the screen-edge checks)
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    /// Upward impulse. Ignored once dead.
    pub fn flap(&mut self) {
        if !self.alive {
            return;
        }
        self.velocity = self.flap_impulse;
        self.wing = WingPhase::Up;
        self.wing_timer = 0.0;
    }

    /// Integrate one step. Velocity is updated first and the new velocity
    /// moves the bird (semi-implicit Euler).
    pub fn update(&mut self, dt: f32) {
        if self.alive {
            self.velocity += self.gravity * dt;
            self.pos.y += self.velocity * dt;

            let target = self
                .velocity
                .atan2(self.flap_impulse)
                .to_degrees()
                .clamp(-BIRD_MAX_TILT, BIRD_MAX_TILT);
            self.rotation = lerp(self.rotation, target, BIRD_TILT_BLEND)
                .clamp(-BIRD_MAX_TILT, BIRD_MAX_TILT);

            match self.wing {
                WingPhase::Up => {
                    self.wing_timer += dt;
                    if self.wing_timer >= WING_UP_HOLD {
                        self.wing = WingPhase::Mid;
                        self.wing_timer = 0.0;
                    }
                }
                WingPhase::Mid if self.velocity < WING_DOWN_VELOCITY => {
                    self.wing = WingPhase::Down;
                }
                _ => {}
            }
        } else {
            // Falls twice as hard and noses down
            self.velocity += 2.0 * self.gravity * dt;
            self.pos.y += self.velocity * dt;
            self.rotation = (self.rotation - BIRD_DEAD_SPIN_RATE * dt).max(BIRD_DEAD_TILT);
            self.wing = WingPhase::Down;
        }

        self.hitbox = hitbox_for(self.pos, self.size);
    }

    /// Strict AABB test against the current collision box
    pub fn check_collision(&self, rect: &Rect) -> bool {
        self.hitbox.overlaps(rect)
    }

    /// Irreversible; calling again is a no-op
    pub fn die(&mut self) {
        self.alive = false;
    }
}

fn hitbox_for(pos: Vec2, size: Vec2) -> Rect {
    Rect::from_center(pos, size * (2.0 / 3.0))
}
