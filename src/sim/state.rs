//! Game state and core simulation types
//!
//! [`GameState`] is the single owner of every entity in a session. The tick
//! mutates it; renderers only ever see a [`Snapshot`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bird::{Bird, WingPhase};
use super::ground::Ground;
use super::pipe::{PipeLayout, PipeStream};
use super::powerup::Powerup;
use super::rect::Rect;
use crate::config::GameConfig;
use crate::consts::{RESTART_BUTTON_HEIGHT, RESTART_BUTTON_WIDTH};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, waiting for the first input
    #[default]
    NotStarted,
    /// Active round
    Playing,
    /// A life was just lost; the round is soft-reset and resumes immediately
    LifeLost,
    /// Out of lives, waiting for restart
    GameOver,
}

/// Live pace of the run. Only ever ratchets up; reset on full restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub scroll_speed: f32,
    pub spawn_interval: f32,
    /// Number of speed-ups applied so far
    pub level: u32,
    /// Score that last triggered a speed-up
    pub last_speed_increase_score: u32,
    /// Score that last spawned a life pickup
    pub last_heart_spawn_score: u32,
}

impl Difficulty {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            scroll_speed: config.initial_scroll_speed,
            spawn_interval: config.initial_spawn_interval,
            level: 0,
            last_speed_increase_score: 0,
            last_heart_spawn_score: 0,
        }
    }

    /// Faster scrolling and denser pipes by the same factor
    pub fn speed_up(&mut self, multiplier: f32) {
        self.scroll_speed *= multiplier;
        self.spawn_interval /= multiplier;
        self.level += 1;
    }
}

/// Something that happened during a tick, for audio and presentation hooks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Round began from the start screen
    Started,
    Flapped,
    PipeSpawned { id: u32 },
    Scored { score: u32 },
    SpeedIncreased { scroll_speed: f32, spawn_interval: f32 },
    PowerupSpawned,
    LifeCollected { lives: u32 },
    /// Fatal hit with lives to spare
    LifeLost { lives: u32 },
    GameOver { score: u32 },
    Restarted,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub lives: u32,
    pub score: u32,
    pub difficulty: Difficulty,
    pub bird: Bird,
    pub pipes: PipeStream,
    pub powerup: Powerup,
    pub ground: Ground,
    /// Simulated seconds since the session began
    pub time: f64,
}

impl GameState {
    /// New session on the start screen
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
            lives: config.max_lives,
            score: 0,
            difficulty: Difficulty::new(&config),
            bird: Bird::new(&config),
            pipes: PipeStream::new(PipeLayout::from_config(&config)),
            powerup: Powerup::new(&config),
            ground: Ground::new(&config),
            time: 0.0,
            config,
        }
    }

    /// Mid-round reset after a lost life. Keeps score, lives and pace.
    pub fn soft_reset(&mut self) {
        self.bird = Bird::new(&self.config);
        self.pipes.reset();
        self.powerup.reset();
    }

    /// Back to a fresh run after game over, straight into play
    pub fn full_restart(&mut self) {
        self.lives = self.config.max_lives;
        self.score = 0;
        self.difficulty = Difficulty::new(&self.config);
        self.soft_reset();
        self.phase = GamePhase::Playing;
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn has_started(&self) -> bool {
        self.phase != GamePhase::NotStarted
    }

    /// Restart button on the game-over overlay, in world space
    pub fn restart_button(&self) -> Rect {
        restart_button_rect(&self.config)
    }

    /// Whether a world-space point lands on the restart button.
    /// Only true while the game-over overlay is up.
    pub fn restart_button_hit(&self, point: Vec2) -> bool {
        self.is_game_over() && self.restart_button().contains_point(point)
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            lives: self.lives,
            max_lives: self.config.max_lives,
            score: self.score,
            bird: BirdView {
                pos: self.bird.pos,
                rotation: self.bird.rotation,
                wing: self.bird.wing,
                alive: self.bird.is_alive(),
            },
            pipes: self
                .pipes
                .pipes
                .iter()
                .map(|p| PipeView {
                    id: p.id,
                    top: p.top_rect(),
                    bottom: p.bottom_rect(),
                })
                .collect(),
            powerup: PowerupView {
                active: self.powerup.active,
                pos: self.powerup.pos,
            },
            ground_offset: self.ground.offset_x,
            scroll_speed: self.difficulty.scroll_speed,
            restart_button: self.is_game_over().then(|| self.restart_button()),
        }
    }
}

/// 120x40, horizontally centred, bottom edge 60 below mid-height
pub fn restart_button_rect(config: &GameConfig) -> Rect {
    Rect::new(
        config.window_width / 2.0 - RESTART_BUTTON_WIDTH / 2.0,
        config.window_height / 2.0 - RESTART_BUTTON_HEIGHT - 20.0,
        RESTART_BUTTON_WIDTH,
        RESTART_BUTTON_HEIGHT,
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirdView {
    pub pos: Vec2,
    pub rotation: f32,
    pub wing: WingPhase,
    pub alive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeView {
    pub id: u32,
    pub top: Rect,
    pub bottom: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerupView {
    pub active: bool,
    /// Bottom-left corner
    pub pos: Vec2,
}

/// Per-frame output for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub lives: u32,
    pub max_lives: u32,
    pub score: u32,
    pub bird: BirdView,
    pub pipes: Vec<PipeView>,
    pub powerup: PowerupView,
    pub ground_offset: f32,
    pub scroll_speed: f32,
    /// Present only while the game-over overlay is shown
    pub restart_button: Option<Rect>,
}
