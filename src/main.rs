//! Ball Duel headless runner
//!
//! Plays one match against the computer with a scripted human: the fire key
//! locks aim once the arrow points at the opponent and fires once the power
//! pulse is near its peak. Usage: `ball-duel [seed] [config.json]`.

use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use ball_duel::consts::TICK_MS;
use ball_duel::sim::{GameEvent, GameState, TickInput, TurnPhase, tick};
use ball_duel::{Config, angle_delta_degrees};

/// Ten minutes of simulated time
const MAX_TICKS: u64 = 10 * 60 * 1000 / TICK_MS;

/// Fraction of max power the scripted human waits for before firing
const FIRE_AT_POWER: f32 = 0.8;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => match arg.parse::<u64>() {
            Ok(seed) => seed,
            Err(e) => {
                log::error!("Invalid seed {arg:?}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0),
    };

    let config = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match Config::from_json(&json) {
                Ok(config) => config,
                Err(e) => {
                    log::error!("Bad config {path}: {e}");
                    return ExitCode::FAILURE;
                }
            },
            Err(e) => {
                log::error!("Cannot read {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    let mut state = match GameState::new(config, seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "Ball Duel starting: seed {}, {} obstacles, difficulty {}",
        seed,
        state.obstacles.len(),
        state.config.difficulty.as_str()
    );

    let mut shots = [0u32; 2];
    let mut pickups = 0u32;
    while state.time_ticks < MAX_TICKS {
        let input = if scripted_press(&state) {
            TickInput::fire()
        } else {
            TickInput::default()
        };
        tick(&mut state, &input, TICK_MS);

        for event in &state.events {
            match event {
                GameEvent::Fired { side, .. } => shots[*side as usize] += 1,
                GameEvent::PickupCollected { .. } => pickups += 1,
                _ => {}
            }
        }
        if state.game_over {
            break;
        }
    }

    let seconds = state.time_ms as f64 / 1000.0;
    match (state.game_over, state.winner) {
        (true, Some(side)) => log::info!("{} wins after {seconds:.1}s", side.as_str()),
        (true, None) => log::info!("Match ended without a winner after {seconds:.1}s"),
        (false, _) => log::info!("No result after {seconds:.1}s"),
    }
    log::info!(
        "Shots: player {}, computer {}; pickups collected: {}",
        shots[0],
        shots[1],
        pickups
    );
    ExitCode::SUCCESS
}

/// Decide whether the scripted human presses fire this tick
fn scripted_press(state: &GameState) -> bool {
    let me = &state.player;
    match state.phase() {
        TurnPhase::PlayerIdle => true,
        TurnPhase::PlayerAiming => {
            let offset = state.computer.pos - me.pos;
            let bearing = offset.y.atan2(offset.x).to_degrees();
            angle_delta_degrees(me.angle, bearing).abs() <= me.rotation_speed
        }
        TurnPhase::PlayerPowerAdjust => me.power >= me.max_power * FIRE_AT_POWER,
        _ => false,
    }
}
