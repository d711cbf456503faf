//! Ball Duel - A turn-based physics duel between two balls
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, pickups, turns, opponent AI)
//! - `config`: Tunable match configuration with validation
//! - `error`: Configuration errors surfaced before the loop starts

pub mod config;
pub mod error;
pub mod sim;

pub use config::{Config, Difficulty};
pub use error::ConfigError;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation step (~60 Hz), in milliseconds
    pub const TICK_MS: u64 = 16;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 1920.0;
    pub const ARENA_HEIGHT: f32 = 1080.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 25.0;
    /// Velocity retained per tick
    pub const FRICTION: f32 = 0.98;
    /// Below this on both axes a ball is considered stopped
    pub const STOP_EPSILON: f32 = 0.1;

    /// Shot power bounds (also the aim arrow length)
    pub const POWER_MIN: f32 = 30.0;
    pub const POWER_MAX: f32 = 100.0;
    /// Power change per tick while adjusting
    pub const POWER_STEP: f32 = 2.0;
    /// Shot speed per unit of power
    pub const POWER_TO_VELOCITY: f32 = 0.1;

    /// Aim rotation per tick (degrees)
    pub const ROTATION_SPEED: f32 = 3.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Shortest signed rotation from `from` to `to`, in degrees within (-180, 180]
#[inline]
pub fn angle_delta_degrees(from: f32, to: f32) -> f32 {
    let mut delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}

/// Unit direction vector for an angle in degrees
#[inline]
pub fn direction_from_degrees(angle: f32) -> glam::Vec2 {
    let rad = angle.to_radians();
    glam::Vec2::new(rad.cos(), rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert!((normalize_degrees(370.0) - 10.0).abs() < 1e-4);
        assert!((normalize_degrees(-90.0) - 270.0).abs() < 1e-4);
        assert!(normalize_degrees(-1e-9) < 360.0);
    }

    #[test]
    fn test_angle_delta_takes_short_way() {
        assert!((angle_delta_degrees(350.0, 10.0) - 20.0).abs() < 1e-4);
        assert!((angle_delta_degrees(10.0, 350.0) + 20.0).abs() < 1e-4);
        assert!((angle_delta_degrees(0.0, 180.0) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_direction_from_degrees() {
        let d = direction_from_degrees(90.0);
        assert!(d.x.abs() < 1e-5);
        assert!((d.y - 1.0).abs() < 1e-5);
    }
}
