//! Ground strip along the bottom of the playfield

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::GameConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ground {
    pub rect: Rect,
    /// Horizontal texture scroll, wrapped to `[0, width)`
    pub offset_x: f32,
}

impl Ground {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, config.window_width, config.ground_height),
            offset_x: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32, scroll_speed: f32) {
        self.offset_x = (self.offset_x + scroll_speed * dt).rem_euclid(self.rect.width);
    }

    pub fn check_collision(&self, rect: &Rect) -> bool {
        self.rect.overlaps(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_wraps() {
        let mut g = Ground::new(&GameConfig::default());
        g.update(1.0, 200.0);
        assert_eq!(g.offset_x, 200.0);
        g.update(1.0, 250.0);
        assert!((g.offset_x - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_collision_strip() {
        let g = Ground::new(&GameConfig::default());
        assert!(g.check_collision(&Rect::new(100.0, 100.0, 10.0, 20.0)));
        // Resting on top of the strip
        assert!(!g.check_collision(&Rect::new(100.0, 110.0, 10.0, 20.0)));
    }
}
