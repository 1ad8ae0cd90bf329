//! Per-frame collision evaluation
//!
//! Tests the bird against everything it can touch and folds the results into
//! one [`CollisionReport`]. Any number of simultaneous fatal causes still make
//! a single hit; the pickup is reported separately and is never fatal.

use super::bird::Bird;
use super::ground::Ground;
use super::pipe::PipeStream;
use super::powerup::Powerup;

/// Result of one frame's collision checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionReport {
    /// Bird overlaps the ground strip
    pub ground: bool,
    /// Bird overlaps a pipe
    pub pipe: bool,
    /// Bird left the playfield vertically
    pub out_of_bounds: bool,
    /// Bird touched the active life pickup
    pub pickup: bool,
}

impl CollisionReport {
    pub fn miss() -> Self {
        Self::default()
    }

    /// Whether this frame costs a life
    pub fn is_fatal(&self) -> bool {
        self.ground || self.pipe || self.out_of_bounds
    }
}

/// Sprite dropped below the bottom of the playfield or rose above the top
pub fn bird_out_of_bounds(bird: &Bird, window_height: f32) -> bool {
    let bounds = bird.bounds();
    bounds.bottom() < 0.0 || bounds.top() > window_height
}

/// Run every check for this frame
pub fn evaluate(
    bird: &Bird,
    ground: &Ground,
    pipes: &PipeStream,
    powerup: &Powerup,
    window_height: f32,
) -> CollisionReport {
    let hitbox = bird.hitbox();
    CollisionReport {
        ground: ground.check_collision(&hitbox),
        pipe: pipes.check_collision(&hitbox),
        out_of_bounds: bird_out_of_bounds(bird, window_height),
        pickup: powerup.is_colliding(&hitbox),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::pipe::PipeLayout;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Scene {
        config: GameConfig,
        bird: Bird,
        ground: Ground,
        pipes: PipeStream,
        powerup: Powerup,
    }

    impl Scene {
        fn new() -> Self {
            let config = GameConfig::default();
            Self {
                bird: Bird::new(&config),
                ground: Ground::new(&config),
                pipes: PipeStream::new(PipeLayout::from_config(&config)),
                powerup: Powerup::new(&config),
                config,
            }
        }

        fn place_bird(&mut self, y: f32) {
            self.bird.pos.y = y;
            self.bird.update(0.0);
        }

        fn evaluate(&self) -> CollisionReport {
            evaluate(
                &self.bird,
                &self.ground,
                &self.pipes,
                &self.powerup,
                self.config.window_height,
            )
        }
    }

    #[test]
    fn test_open_air_is_a_miss() {
        let scene = Scene::new();
        let report = scene.evaluate();
        assert_eq!(report, CollisionReport::miss());
        assert!(!report.is_fatal());
    }

    #[test]
    fn test_ground_hit() {
        let mut scene = Scene::new();
        scene.place_bird(100.0);
        let report = scene.evaluate();
        assert!(report.ground);
        assert!(report.is_fatal());
    }

    #[test]
    fn test_pipe_hit() {
        let mut scene = Scene::new();
        let x = scene.bird.pos.x;
        // Gap far above the bird
        scene.pipes.spawn(x, 450.0, 100.0);
        let report = scene.evaluate();
        assert!(report.pipe);
        assert!(report.is_fatal());
    }

    #[test]
    fn test_through_gap_is_safe() {
        let mut scene = Scene::new();
        let (x, y) = (scene.bird.pos.x, scene.bird.pos.y);
        scene.pipes.spawn(x, y, 150.0);
        assert!(!scene.evaluate().is_fatal());
    }

    #[test]
    fn test_out_of_bounds_both_edges() {
        let mut scene = Scene::new();
        scene.place_bird(5.0);
        let report = scene.evaluate();
        assert!(report.out_of_bounds);
        assert!(report.ground);

        scene.place_bird(scene.config.window_height + 5.0);
        let report = scene.evaluate();
        assert!(report.out_of_bounds);
        assert!(!report.ground);
        assert!(report.is_fatal());
    }

    #[test]
    fn test_pickup_is_not_fatal() {
        let mut scene = Scene::new();
        let mut rng = Pcg32::seed_from_u64(1);
        scene.powerup.spawn(&mut rng);
        scene.powerup.pos = scene.bird.pos - Vec2::splat(10.0);
        let report = scene.evaluate();
        assert!(report.pickup);
        assert!(!report.is_fatal());
    }

    #[test]
    fn test_many_causes_still_one_report() {
        let mut scene = Scene::new();
        let x = scene.bird.pos.x;
        scene.pipes.spawn(x, 450.0, 100.0);
        scene.place_bird(5.0);
        let report = scene.evaluate();
        assert!(report.ground && report.pipe && report.out_of_bounds);
        assert!(report.is_fatal());
    }
}
