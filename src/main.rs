//! Flappy Sim headless runner
//!
//! Plays sessions on autopilot with no window, logging what happens. Useful
//! for soak-testing the simulation and for tuning a config file.
//!
//! Usage: `flappy-sim [--config FILE] [--seed N] [--seconds S] [--scores FILE]`

use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use flappy_sim::sim::{GameEvent, GameState, TickInput, tick};
use flappy_sim::{GameConfig, HighScores};

/// Simulated frame rate
const FRAME_DT: f32 = 1.0 / 60.0;

/// Longest session the runner accepts (one day)
const MAX_SECONDS: f32 = 86_400.0;

struct Options {
    config: Option<String>,
    seed: u64,
    seconds: f32,
    scores: Option<String>,
}

impl Options {
    fn parse() -> Result<Self, String> {
        Self::parse_from(std::env::args().skip(1))
    }

    fn parse_from(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut options = Options {
            config: None,
            seed: 1,
            seconds: 120.0,
            scores: None,
        };
        while let Some(arg) = args.next() {
            let mut value = || args.next().ok_or_else(|| format!("{} needs a value", arg));
            match arg.as_str() {
                "--config" => options.config = Some(value()?),
                "--seed" => {
                    options.seed = value()?.parse().map_err(|e| format!("bad --seed: {}", e))?
                }
                "--seconds" => {
                    let seconds: f32 = value()?
                        .parse()
                        .map_err(|e| format!("bad --seconds: {}", e))?;
                    if !seconds.is_finite() || seconds <= 0.0 || seconds > MAX_SECONDS {
                        return Err(format!(
                            "--seconds must be in (0, {}], got {}",
                            MAX_SECONDS, seconds
                        ));
                    }
                    options.seconds = seconds;
                }
                "--scores" => options.scores = Some(value()?),
                other => return Err(format!("unknown argument: {}", other)),
            }
        }
        Ok(options)
    }
}

/// Session summary
struct RunStats {
    score: u32,
    level: u32,
    lives_lost: u32,
    pickups: u32,
    game_over: bool,
}

fn run(config: GameConfig, seed: u64, seconds: f32) -> RunStats {
    let mut state = GameState::new(config, seed);
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let mut stats = RunStats {
        score: 0,
        level: 0,
        lives_lost: 0,
        pickups: 0,
        game_over: false,
    };

    let frames = (seconds / FRAME_DT).ceil() as u64;
    for _ in 0..frames {
        for event in tick(&mut state, &input, FRAME_DT) {
            match event {
                GameEvent::LifeLost { .. } => stats.lives_lost += 1,
                GameEvent::LifeCollected { .. } => stats.pickups += 1,
                GameEvent::GameOver { .. } => stats.game_over = true,
                GameEvent::Scored { score } => log::debug!("Score: {}", score),
                _ => {}
            }
        }
        if stats.game_over {
            break;
        }
    }

    stats.score = state.score;
    stats.level = state.difficulty.level;
    stats
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Flappy Sim (headless) starting...");

    let options = match Options::parse() {
        Ok(options) => options,
        Err(msg) => {
            log::error!("{}", msg);
            eprintln!("usage: flappy-sim [--config FILE] [--seed N] [--seconds S] [--scores FILE]");
            return ExitCode::FAILURE;
        }
    };

    let config = match &options.config {
        Some(path) => match GameConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Could not load config {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };

    let stats = run(config, options.seed, options.seconds);
    println!(
        "seed {}: score {}, speed level {}, lives lost {}, pickups {}, {}",
        options.seed,
        stats.score,
        stats.level,
        stats.lives_lost,
        stats.pickups,
        if stats.game_over { "game over" } else { "time up" }
    );

    if let Some(path) = &options.scores {
        let mut scores = match HighScores::load(path) {
            Ok(scores) => scores,
            Err(e) => {
                log::warn!("Ignoring unreadable high scores {}: {}", path, e);
                HighScores::new()
            }
        };
        if let Some(rank) = scores.add_score(stats.score, stats.level, unix_now()) {
            println!("New high score! Rank #{}", rank);
            if let Err(e) = scores.save(path) {
                log::error!("Could not save high scores: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
