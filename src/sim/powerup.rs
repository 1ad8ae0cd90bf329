//! Life pickup
//!
//! A single reusable heart that floats in from the right on a sine bob.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::GameConfig;
use crate::consts::HEART_SPAWN_OFFSET;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub active: bool,
    /// Bottom-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Height the bob oscillates around
    pub base_y: f32,
    /// Seconds since spawn
    pub float_time: f32,
    /// Random phase so consecutive spawns do not bob in lockstep
    pub float_phase: f32,
    amplitude: f32,
    float_speed: f32,
    window_width: f32,
    window_height: f32,
}

impl Powerup {
    /// Inactive pickup parked off-screen right
    pub fn new(config: &GameConfig) -> Self {
        let base_y = config.window_height / 2.0;
        Self {
            active: false,
            pos: Vec2::new(config.window_width + HEART_SPAWN_OFFSET, base_y),
            size: Vec2::new(config.heart_item_width, config.heart_item_height),
            base_y,
            float_time: 0.0,
            float_phase: 0.0,
            amplitude: config.heart_float_amplitude,
            float_speed: config.heart_float_speed,
            window_width: config.window_width,
            window_height: config.window_height,
        }
    }

    /// Activate past the right edge at a random height in the middle half
    pub fn spawn<R: Rng>(&mut self, rng: &mut R) {
        let min_y = self.window_height * 0.25;
        let max_y = (self.window_height * 0.75 - self.size.y).max(min_y);
        self.base_y = rng.random_range(min_y..=max_y);
        self.float_phase = rng.random_range(0.0..TAU);
        self.float_time = 0.0;
        self.pos = Vec2::new(self.window_width + HEART_SPAWN_OFFSET, self.base_y);
        self.active = true;
    }

    /// Scroll left and bob. Deactivates once fully past the left edge.
    pub fn update(&mut self, dt: f32, scroll_speed: f32) {
        if !self.active {
            return;
        }
        self.pos.x -= scroll_speed * dt;
        self.float_time += dt;
        self.pos.y = self.base_y
            + self.amplitude * (self.float_time * self.float_speed + self.float_phase).sin();

        if self.pos.x + self.size.x < 0.0 {
            self.active = false;
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Strict overlap with `rect`; always false while inactive
    pub fn is_colliding(&self, rect: &Rect) -> bool {
        self.active && self.rect().overlaps(rect)
    }

    pub fn reset(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_starts_inactive() {
        let p = Powerup::new(&GameConfig::default());
        assert!(!p.active);
        assert!(!p.is_colliding(&p.rect()));
    }

    #[test]
    fn test_spawn_position_bounds() {
        let config = GameConfig::default();
        let mut p = Powerup::new(&config);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            p.spawn(&mut rng);
            assert!(p.active);
            assert_eq!(p.pos.x, config.window_width + HEART_SPAWN_OFFSET);
            assert!(p.base_y >= config.window_height * 0.25);
            assert!(p.base_y <= config.window_height * 0.75 - config.heart_item_height);
            assert!(p.float_phase >= 0.0 && p.float_phase < TAU);
        }
    }

    #[test]
    fn test_bob_stays_within_amplitude() {
        let config = GameConfig::default();
        let mut p = Powerup::new(&config);
        let mut rng = Pcg32::seed_from_u64(8);
        p.spawn(&mut rng);
        for _ in 0..50 {
            p.update(0.016, 200.0);
            assert!((p.pos.y - p.base_y).abs() <= config.heart_float_amplitude + 1e-3);
        }
    }

    #[test]
    fn test_deactivates_off_screen() {
        let mut p = Powerup::new(&GameConfig::default());
        let mut rng = Pcg32::seed_from_u64(9);
        p.spawn(&mut rng);
        // 540 units to travel: 500 + 40 width
        for _ in 0..60 {
            p.update(0.05, 200.0);
        }
        assert!(!p.active);
    }

    #[test]
    fn test_collision_requires_active() {
        let mut p = Powerup::new(&GameConfig::default());
        let mut rng = Pcg32::seed_from_u64(10);
        p.spawn(&mut rng);
        let probe = Rect::from_center(p.rect().center(), Vec2::splat(4.0));
        assert!(p.is_colliding(&probe));
        p.reset();
        assert!(!p.is_colliding(&probe));
    }
}
