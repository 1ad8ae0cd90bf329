//! Per-frame simulation step
//!
//! Runs one frame in a fixed order: input, bird, pipes, pickup, scoring,
//! collisions, then the life/difficulty reactions to what happened.

use glam::Vec2;

use super::collision::{self, CollisionReport};
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (space / tap)
    pub flap: bool,
    /// Leave the start screen
    pub start: bool,
    /// Restart after game over
    pub restart: bool,
    /// Pointer click, in world space
    pub click: Option<Vec2>,
    /// Let the controller play: auto-start and flap to hold the next gap
    pub autopilot: bool,
}

/// Clearance kept above a gap's lower lip before the autopilot flaps
const AUTOPILOT_MARGIN: f32 = 20.0;

/// Advance the game by one frame. `dt` is clamped to the configured maximum.
/// Returns the events produced this frame, in order.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let dt = if dt.is_finite() {
        dt.clamp(0.0, state.config.max_frame_dt)
    } else {
        0.0
    };
    state.time += dt as f64;

    let mut events = Vec::new();
    let mut input = input.clone();

    // A click means restart, start or flap depending on where we are
    if let Some(point) = input.click {
        if state.restart_button_hit(point) {
            input.restart = true;
        } else {
            match state.phase {
                GamePhase::NotStarted => input.start = true,
                GamePhase::Playing => input.flap = true,
                _ => {}
            }
        }
    }

    if input.autopilot {
        autopilot(state, &mut input);
    }

    match state.phase {
        GamePhase::NotStarted => {
            state.ground.update(dt, state.difficulty.scroll_speed);
            if input.start || input.flap {
                state.phase = GamePhase::Playing;
                events.push(GameEvent::Started);
                log::info!("Round started (seed {})", state.seed);
            }
            return events;
        }
        GamePhase::GameOver => {
            if input.restart {
                state.full_restart();
                events.push(GameEvent::Restarted);
                log::info!("Game restarted");
            } else {
                // Frozen world; the dead bird keeps falling
                state.bird.update(dt);
            }
            return events;
        }
        GamePhase::LifeLost => {
            // apply_collisions leaves this phase in the same tick; only a
            // caller writing `phase` directly lands here
            state.phase = GamePhase::Playing;
        }
        GamePhase::Playing => {}
    }

    if input.flap && state.bird.is_alive() {
        state.bird.flap();
        events.push(GameEvent::Flapped);
    }

    let speed = state.difficulty.scroll_speed;
    state.ground.update(dt, speed);
    state.bird.update(dt);

    let interval = state.difficulty.spawn_interval;
    if let Some(id) = state.pipes.update(dt, speed, interval, &mut state.rng) {
        events.push(GameEvent::PipeSpawned { id });
    }

    state.powerup.update(dt, speed);

    let points = state.pipes.check_score(state.bird.pos.x);
    for _ in 0..points {
        award_point(state, &mut events);
    }

    let report = collision::evaluate(
        &state.bird,
        &state.ground,
        &state.pipes,
        &state.powerup,
        state.config.window_height,
    );
    apply_collisions(state, report, &mut events);

    events
}

/// One point, plus the score-driven speed-up and pickup spawn
fn award_point(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.score += 1;
    let score = state.score;
    events.push(GameEvent::Scored { score });

    let config = &state.config;
    let difficulty = &mut state.difficulty;

    // A frequency of zero disables the ratchet
    if score.checked_rem(config.speed_increase_frequency) == Some(0)
        && score > difficulty.last_speed_increase_score
    {
        difficulty.speed_up(config.speed_increase_multiplier);
        difficulty.last_speed_increase_score = score;
        events.push(GameEvent::SpeedIncreased {
            scroll_speed: difficulty.scroll_speed,
            spawn_interval: difficulty.spawn_interval,
        });
        log::info!(
            "Score {}: speed up to {:.1} (spawn every {:.2}s)",
            score,
            difficulty.scroll_speed,
            difficulty.spawn_interval
        );
    }

    if score.checked_rem(config.heart_item_frequency) == Some(0)
        && score > difficulty.last_heart_spawn_score
        && !state.powerup.active
    {
        state.powerup.spawn(&mut state.rng);
        difficulty.last_heart_spawn_score = score;
        events.push(GameEvent::PowerupSpawned);
        log::info!("Score {}: life pickup spawned", score);
    }
}

/// Pickup first (never fatal), then at most one fatal hit
fn apply_collisions(state: &mut GameState, report: CollisionReport, events: &mut Vec<GameEvent>) {
    if report.pickup {
        state.lives = (state.lives + 1).min(state.config.max_lives);
        state.powerup.reset();
        events.push(GameEvent::LifeCollected { lives: state.lives });
        log::info!("Extra life collected, lives: {}", state.lives);
    }

    if !report.is_fatal() {
        return;
    }

    state.bird.die();
    state.lives = state.lives.saturating_sub(1);
    log::info!(
        "Hit (ground={}, pipe={}, out_of_bounds={}), lives left: {}",
        report.ground,
        report.pipe,
        report.out_of_bounds,
        state.lives
    );

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver { score: state.score });
        log::info!("Game over with score {}", state.score);
    } else {
        state.phase = GamePhase::LifeLost;
        events.push(GameEvent::LifeLost { lives: state.lives });
        state.soft_reset();
        state.phase = GamePhase::Playing;
    }
}

/// Start the round and hold the bird just above the next gap's lower lip
fn autopilot(state: &GameState, input: &mut TickInput) {
    match state.phase {
        GamePhase::NotStarted => input.start = true,
        GamePhase::Playing if state.bird.is_alive() => {
            let bird_left = state.bird.hitbox().left();
            let threshold = match state.pipes.pipes.iter().find(|p| p.right() > bird_left) {
                Some(pipe) => pipe.gap_bottom() + AUTOPILOT_MARGIN,
                None => (state.config.floor_y() + state.config.window_height) / 2.0,
            };
            if state.bird.pos.y < threshold && state.bird.velocity <= 0.0 {
                input.flap = true;
            }
        }
        _ => {}
    }
}
