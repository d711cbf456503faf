//! Fixed-cadence simulation tick
//!
//! Order within a tick: input → human aim sweep → effect expiry → physics →
//! obstacles → agent collision → pickup spawner → pickup collection → turn
//! handoff → opponent controller.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::{agent_touches_pickup, agents_touching, resolve_obstacles};
use super::effects::{EffectKind, EffectOutcome, apply_effect, expire_effects};
use super::entity::{Agent, Pickup, PickupClass, Side};
use super::physics::integrate;
use super::spawner::SpawnArea;
use super::state::{GameEvent, GameState};
use super::turn::update_human_controls;
use crate::Config;

/// Keys the simulation cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Single control that drives aim → power → fire, and restarts after a match
    Fire,
    Other,
}

/// Discrete input from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMoved(Vec2),
    PointerPressed(Vec2),
    KeyPressed(Key),
}

/// Input gathered since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
}

impl TickInput {
    /// A single fire-key press
    pub fn fire() -> Self {
        Self {
            events: vec![InputEvent::KeyPressed(Key::Fire)],
        }
    }
}

/// Advance the match by one tick, moving the clock forward `dt_ms`
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u64) {
    state.events.clear();
    state.time_ms += dt_ms;
    state.time_ticks += 1;

    for event in &input.events {
        match *event {
            InputEvent::PointerMoved(pos) => state.pointer = Some(pos),
            InputEvent::PointerPressed(pos) => {
                state.pointer = Some(pos);
                state.events.push(GameEvent::PointerPressed { pos });
            }
            InputEvent::KeyPressed(Key::Fire) => state.handle_fire(),
            InputEvent::KeyPressed(Key::Other) => {}
        }
    }

    if state.game_over {
        return;
    }

    let now = state.time_ms;
    let arena = state.arena();

    if state.turn == Side::Player {
        update_human_controls(&mut state.player, &state.config);
    }

    for side in [Side::Player, Side::Computer] {
        for kind in expire_effects(state.agent_mut(side), now, arena) {
            state.events.push(GameEvent::EffectExpired { side, kind });
        }
    }

    // Physics and static collisions
    for side in [Side::Player, Side::Computer] {
        let agent = match side {
            Side::Player => &mut state.player,
            Side::Computer => &mut state.computer,
        };
        if !agent.moving {
            continue;
        }
        let step = integrate(agent, &state.config);
        if step.hit_wall {
            state.events.push(GameEvent::WallBounce { side });
        }
        if agent.moving && resolve_obstacles(agent, &state.obstacles) > 0 {
            state.events.push(GameEvent::ObstacleBounce { side });
        }
    }

    if agents_touching(&state.player, &state.computer) {
        end_match(state);
        return;
    }

    // Spawner
    let area = SpawnArea {
        config: &state.config,
        obstacles: &state.obstacles,
        agents: [&state.player, &state.computer],
    };
    if let Some(idx) = state
        .spawner
        .update(&area, &mut state.pickups, now, &mut state.rng, &mut state.next_id)
    {
        let p = &state.pickups[idx];
        state.events.push(GameEvent::PickupSpawned {
            id: p.id,
            class: p.class,
        });
    }

    // Pickup collection
    for side in [Side::Player, Side::Computer] {
        let agent = match side {
            Side::Player => &mut state.player,
            Side::Computer => &mut state.computer,
        };
        if agent.moving {
            collect_pickups(
                agent,
                &mut state.pickups,
                &state.config,
                &mut state.rng,
                now,
                &mut state.events,
            );
        }
    }

    state.advance_turn();

    if state.turn == Side::Computer && !state.computer.moving {
        let fired = state.controller.step(
            &mut state.computer,
            &state.player,
            &state.obstacles,
            &state.config,
            &mut state.rng,
        );
        if fired {
            state.last_mover = Some(Side::Computer);
            state.events.push(GameEvent::Fired {
                side: Side::Computer,
                angle: state.computer.angle,
                speed: state.computer.vel.length(),
            });
        }
    }
}

/// Collision between the agents ends the match
///
/// The moving agent wins. When both or neither are moving the side that
/// fired last is credited; with no shot fired yet there is no winner.
fn end_match(state: &mut GameState) {
    let winner = match (state.player.moving, state.computer.moving) {
        (true, false) => Some(Side::Player),
        (false, true) => Some(Side::Computer),
        _ => state.last_mover,
    };
    state.game_over = true;
    state.winner = winner;
    state.player.moving = false;
    state.computer.moving = false;
    log::info!(
        "Match over at tick {}: winner {}",
        state.time_ticks,
        winner.map_or("none", Side::as_str)
    );
    state.events.push(GameEvent::MatchOver { winner });
}

/// Apply every pickup the agent touches this tick
fn collect_pickups(
    agent: &mut Agent,
    pickups: &mut [Pickup],
    config: &Config,
    rng: &mut Pcg32,
    now: u64,
    events: &mut Vec<GameEvent>,
) {
    let arena = (config.arena_width, config.arena_height);
    for pickup in pickups.iter_mut() {
        if !agent_touches_pickup(agent, pickup) || !pickup.collect() {
            continue;
        }

        let effect = match pickup.class {
            PickupClass::Concrete(kind) => kind,
            PickupClass::Mystery => EffectKind::random(rng),
        };
        let side = agent.side;
        log::info!("{} collected {:?} -> {:?}", side.as_str(), pickup.class, effect);
        events.push(GameEvent::PickupCollected {
            id: pickup.id,
            side,
            class: pickup.class,
            effect,
        });

        let duration = rng.random_range(config.effect_duration_min_ms..=config.effect_duration_max_ms);
        match apply_effect(agent, effect, now, duration, arena) {
            EffectOutcome::Timed {
                kind, expires_at_ms, ..
            } => events.push(GameEvent::EffectApplied {
                side,
                kind,
                expires_at_ms,
            }),
            EffectOutcome::Reset => {
                events.push(GameEvent::PositionReset { side });
                // Teleported home; nothing else along the old path counts
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TICK_MS;
    use crate::sim::effects::EffectCategory;
    use crate::sim::rect::Rect;
    use crate::sim::turn::TurnPhase;

    fn open_state(seed: u64) -> GameState {
        GameState::with_obstacles(Config::default(), seed, Vec::new()).expect("valid config")
    }

    #[test]
    fn test_tick_advances_clock() {
        let mut state = open_state(1);
        tick(&mut state, &TickInput::default(), TICK_MS);
        tick(&mut state, &TickInput::default(), TICK_MS);
        assert_eq!(state.time_ticks, 2);
        assert_eq!(state.time_ms, 2 * TICK_MS);
    }

    #[test]
    fn test_fire_key_starts_aiming_and_sweeps() {
        let mut state = open_state(1);
        tick(&mut state, &TickInput::fire(), TICK_MS);
        assert_eq!(state.phase(), TurnPhase::PlayerAiming);
        assert_eq!(state.player.angle, 3.0);

        tick(&mut state, &TickInput::default(), TICK_MS);
        assert_eq!(state.player.angle, 6.0);
    }

    #[test]
    fn test_determinism() {
        let script = |t: u64| {
            if t % 40 == 0 { TickInput::fire() } else { TickInput::default() }
        };
        let mut a = GameState::new(Config::default(), 12345).expect("valid config");
        let mut b = GameState::new(Config::default(), 12345).expect("valid config");
        for t in 0..3_000 {
            tick(&mut a, &script(t), TICK_MS);
            tick(&mut b, &script(t), TICK_MS);
            assert_eq!(a.events, b.events, "diverged at tick {t}");
        }
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.computer.pos, b.computer.pos);
        assert_eq!(a.turn, b.turn);
        assert_eq!(a.pickups.len(), b.pickups.len());
    }

    #[test]
    fn test_pointer_events() {
        let mut state = open_state(1);
        let input = TickInput {
            events: vec![
                InputEvent::PointerMoved(Vec2::new(10.0, 20.0)),
                InputEvent::PointerPressed(Vec2::new(11.0, 21.0)),
                InputEvent::KeyPressed(Key::Other),
            ],
        };
        tick(&mut state, &input, TICK_MS);
        assert_eq!(state.pointer, Some(Vec2::new(11.0, 21.0)));
        assert!(state.events.contains(&GameEvent::PointerPressed {
            pos: Vec2::new(11.0, 21.0)
        }));
        assert_eq!(state.phase(), TurnPhase::PlayerIdle);
    }

    #[test]
    fn test_reset_pickup_hands_turn_over() {
        let mut state = open_state(2);
        let home = state.player.origin();
        state.player.pos = Vec2::new(700.0, 540.0);
        state.player.vel = Vec2::new(5.0, 0.0);
        state.player.moving = true;
        state.player.angle = 30.0;
        state.last_mover = Some(Side::Player);
        state.add_pickup(
            Vec2::new(730.0, 540.0),
            PickupClass::Concrete(EffectKind::ResetPosition),
            16.0,
            45_000,
        );

        tick(&mut state, &TickInput::default(), TICK_MS);

        assert_eq!(state.player.pos, home);
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert_eq!(state.player.angle, 0.0);
        assert!(!state.player.moving);
        assert_eq!(state.turn, Side::Computer);
        assert!(state.events.contains(&GameEvent::PositionReset { side: Side::Player }));
        assert!(state.events.contains(&GameEvent::TurnChanged { to: Side::Computer }));
        assert!(state.pickups.iter().all(|p| p.is_collected()));
    }

    #[test]
    fn test_timed_pickup_applies_effect() {
        let mut state = open_state(3);
        state.player.pos = Vec2::new(700.0, 540.0);
        state.player.vel = Vec2::new(5.0, 0.0);
        state.player.moving = true;
        state.add_pickup(
            Vec2::new(730.0, 540.0),
            PickupClass::Concrete(EffectKind::PowerUp),
            13.0,
            35_000,
        );

        tick(&mut state, &TickInput::default(), TICK_MS);

        let slot = state.player.effects.slot(EffectCategory::Power);
        assert_eq!(slot.kind, Some(EffectKind::PowerUp));
        let duration = slot.expires_at_ms - state.time_ms;
        assert!((30_000..=60_000).contains(&duration));
        assert_eq!(state.player.max_power, 150.0);
        assert_eq!(state.turn, Side::Player);

        // Effect ends and the base value comes back
        tick(&mut state, &TickInput::default(), 60_000);
        assert_eq!(state.player.max_power, 100.0);
        assert!(state.events.contains(&GameEvent::EffectExpired {
            side: Side::Player,
            kind: EffectKind::PowerUp
        }));
    }

    #[test]
    fn test_stationary_agent_collects_nothing() {
        let mut state = open_state(3);
        let pos = state.player.pos + Vec2::new(10.0, 0.0);
        state.add_pickup(pos, PickupClass::Concrete(EffectKind::SizeUp), 22.0, 55_000);
        tick(&mut state, &TickInput::default(), TICK_MS);
        assert!(!state.pickups[0].is_collected());
    }

    #[test]
    fn test_moving_agent_wins_on_contact() {
        let mut state = open_state(4);
        state.player.pos = state.computer.pos - Vec2::new(55.0, 0.0);
        state.player.vel = Vec2::new(8.0, 0.0);
        state.player.moving = true;

        tick(&mut state, &TickInput::default(), TICK_MS);
        assert!(state.game_over);
        assert_eq!(state.winner, Some(Side::Player));
        assert_eq!(state.phase(), TurnPhase::GameOver);

        // Frozen until fire restarts the match
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default(), TICK_MS);
        assert!(state.game_over);
        assert_eq!(state.time_ticks, ticks + 1);

        tick(&mut state, &TickInput::fire(), TICK_MS);
        assert!(!state.game_over);
        assert_eq!(state.winner, None);
    }

    #[test]
    fn test_contact_without_mover_credits_last_shooter() {
        let mut state = open_state(4);
        state.computer.pos = state.player.pos + Vec2::new(40.0, 0.0);
        state.last_mover = Some(Side::Computer);
        tick(&mut state, &TickInput::default(), TICK_MS);
        assert!(state.game_over);
        assert_eq!(state.winner, Some(Side::Computer));

        let mut state = open_state(4);
        state.computer.pos = state.player.pos + Vec2::new(40.0, 0.0);
        tick(&mut state, &TickInput::default(), TICK_MS);
        assert!(state.game_over);
        assert_eq!(state.winner, None);
    }

    #[test]
    fn test_obstacle_bounce_event() {
        let layout = vec![Rect::new(800.0, 500.0, 40.0, 80.0)];
        let mut state =
            GameState::with_obstacles(Config::default(), 9, layout).expect("valid config");
        state.player.pos = Vec2::new(770.0, 540.0);
        state.player.vel = Vec2::new(6.0, 0.0);
        state.player.moving = true;
        tick(&mut state, &TickInput::default(), TICK_MS);
        assert!(state.events.contains(&GameEvent::ObstacleBounce { side: Side::Player }));
        assert!(state.player.vel.x < 0.0);
    }
}
