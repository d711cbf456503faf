//! Per-tick ball integration
//!
//! Motion is per tick, not per second: the cadence is fixed, so friction and
//! velocity are expressed in units per tick.

use glam::Vec2;

use super::entity::Agent;
use crate::Config;

/// What happened to an agent during one integration step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepResult {
    /// Came to rest this tick (turn complete)
    pub stopped: bool,
    /// Bounced off an arena wall this tick
    pub hit_wall: bool,
}

/// Integrate one moving agent: move, apply friction, stop, bounce, clamp
pub fn integrate(agent: &mut Agent, config: &Config) -> StepResult {
    let mut result = StepResult::default();
    if !agent.moving {
        return result;
    }

    agent.pos += agent.vel;
    agent.vel *= config.friction;

    if agent.vel.x.abs() < config.stop_epsilon && agent.vel.y.abs() < config.stop_epsilon {
        agent.vel = Vec2::ZERO;
        agent.moving = false;
        agent.turn_complete = true;
        result.stopped = true;
        log::debug!("{} stopped at {:?}", agent.side.as_str(), agent.pos);
    }

    result.hit_wall = bounce_off_walls(agent, config.arena_width, config.arena_height);
    agent.clamp_to_arena((config.arena_width, config.arena_height));

    result
}

/// Elastic bounce when the ball's edge reaches an arena wall
///
/// The component is pointed back into the arena, so a ball resting against
/// a wall after clamping is not flipped outward again.
fn bounce_off_walls(agent: &mut Agent, width: f32, height: f32) -> bool {
    let r = agent.radius;
    let mut hit = false;

    if agent.pos.x - r <= 0.0 {
        agent.vel.x = agent.vel.x.abs();
        hit = true;
    } else if agent.pos.x + r >= width {
        agent.vel.x = -agent.vel.x.abs();
        hit = true;
    }

    if agent.pos.y - r <= 0.0 {
        agent.vel.y = agent.vel.y.abs();
        hit = true;
    } else if agent.pos.y + r >= height {
        agent.vel.y = -agent.vel.y.abs();
        hit = true;
    }

    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Side;

    fn moving_agent(pos: Vec2, vel: Vec2) -> (Agent, Config) {
        let config = Config::default();
        let mut a = Agent::new(Side::Player, pos, &config);
        a.vel = vel;
        a.moving = true;
        (a, config)
    }

    #[test]
    fn test_single_step_friction() {
        let (mut a, config) = moving_agent(Vec2::new(500.0, 500.0), Vec2::new(5.0, 0.0));
        let result = integrate(&mut a, &config);
        assert!((a.pos.x - 505.0).abs() < 1e-4);
        assert!((a.vel.x - 4.9).abs() < 1e-5);
        assert_eq!(a.vel.y, 0.0);
        assert!(!result.stopped);
        assert!(a.moving);
    }

    #[test]
    fn test_stops_below_epsilon() {
        let (mut a, config) = moving_agent(Vec2::new(500.0, 500.0), Vec2::new(0.1, -0.05));
        let result = integrate(&mut a, &config);
        assert!(result.stopped);
        assert_eq!(a.vel, Vec2::ZERO);
        assert!(!a.moving);
        assert!(a.turn_complete);
    }

    #[test]
    fn test_stationary_agent_untouched() {
        let config = Config::default();
        let mut a = Agent::new(Side::Player, Vec2::new(500.0, 500.0), &config);
        a.vel = Vec2::new(3.0, 3.0);
        assert_eq!(integrate(&mut a, &config), StepResult::default());
        assert_eq!(a.pos, Vec2::new(500.0, 500.0));
    }

    #[test]
    fn test_wall_bounce_and_clamp() {
        let (mut a, config) = moving_agent(Vec2::new(30.0, 500.0), Vec2::new(-10.0, 0.0));
        let result = integrate(&mut a, &config);
        assert!(result.hit_wall);
        assert!(a.vel.x > 0.0);
        assert_eq!(a.pos.x, a.radius);
    }

    #[test]
    fn test_far_wall_bounce() {
        let (mut a, config) = moving_agent(Vec2::new(1000.0, 1050.0), Vec2::new(0.0, 10.0));
        integrate(&mut a, &config);
        assert!(a.vel.y < 0.0);
        assert_eq!(a.pos.y, config.arena_height - a.radius);
    }

    #[test]
    fn test_rolls_to_rest() {
        let (mut a, config) = moving_agent(Vec2::new(960.0, 540.0), Vec2::new(3.0, 2.0));
        let mut ticks = 0;
        while a.moving && ticks < 10_000 {
            let before = a.vel.length();
            integrate(&mut a, &config);
            assert!(a.vel.length() <= before);
            ticks += 1;
        }
        assert!(!a.moving);
        assert_eq!(a.vel, Vec2::ZERO);
    }
}
