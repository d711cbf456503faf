//! Match configuration and difficulty presets
//!
//! Every tunable constant of the simulation lives in [`Config`]. Defaults
//! mirror [`crate::consts`]; a config can also be loaded from JSON.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, Result};
use crate::sim::Rect;
use crate::sim::effects::{EffectCategory, EffectKind};

/// Opponent difficulty presets
///
/// Only consulted by [`crate::sim::OpponentController::calculate_shot`], which
/// is not part of the active aiming path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Maximum random aim offset (degrees, applied as ±)
    pub fn angle_offset(&self) -> f32 {
        match self {
            Difficulty::Easy => 20.0,
            Difficulty::Normal => 10.0,
            Difficulty::Hard => 5.0,
        }
    }

    /// Power accuracy (1.0 = always the ideal power)
    pub fn accuracy(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.6,
            Difficulty::Normal => 0.8,
            Difficulty::Hard => 0.95,
        }
    }
}

/// Complete match configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    /// Fraction of the arena width covered by each side's safe zone
    pub safe_zone_width_frac: f32,
    /// Height of the safe zone band, centred vertically
    pub safe_zone_height: f32,
    pub player_start: Vec2,
    pub computer_start: Vec2,

    // === Balls ===
    pub ball_radius: f32,
    pub friction: f32,
    pub stop_epsilon: f32,
    pub power_min: f32,
    pub power_max: f32,
    pub power_step: f32,
    pub power_to_velocity: f32,
    /// Degrees per tick
    pub rotation_speed: f32,

    // === Obstacles ===
    pub obstacle_count_min: u32,
    pub obstacle_count_max: u32,
    pub obstacle_size_min: f32,
    pub obstacle_size_max: f32,
    pub obstacle_attempts: u32,

    // === Pickups ===
    pub pickup_max_active: usize,
    pub pickup_interval_min_ms: u64,
    pub pickup_interval_max_ms: u64,
    /// Chance that an elapsed interval produces a placement attempt
    pub pickup_spawn_chance: f64,
    pub pickup_place_attempts: u32,
    /// Distance kept from the arena edges
    pub pickup_margin: f32,
    /// Base separation from other pickups (doubled) and agents (plus radius)
    pub pickup_clearance: f32,
    /// Extra separation from obstacle rectangles (0 = only reject inside)
    pub pickup_obstacle_clearance: f32,
    pub mystery_chance: f64,
    /// Pickups show a countdown once their remaining life drops to this
    pub pickup_countdown_ms: u64,

    // === Effects ===
    pub effect_duration_min_ms: u64,
    pub effect_duration_max_ms: u64,

    // === Opponent ===
    /// Consecutive on-target ticks before the opponent locks its aim
    pub ai_settle_ticks: u32,
    /// Target power per unit of distance to the target
    pub ai_power_per_distance: f32,
    /// Spacing of the alternate directions searched around a blocked shot
    pub ai_search_step_degrees: u32,
    pub difficulty: Difficulty,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            safe_zone_width_frac: 0.3,
            safe_zone_height: 200.0,
            player_start: Vec2::new(ARENA_WIDTH * 0.2, ARENA_HEIGHT / 2.0),
            computer_start: Vec2::new(ARENA_WIDTH * 0.8, ARENA_HEIGHT / 2.0),

            ball_radius: BALL_RADIUS,
            friction: FRICTION,
            stop_epsilon: STOP_EPSILON,
            power_min: POWER_MIN,
            power_max: POWER_MAX,
            power_step: POWER_STEP,
            power_to_velocity: POWER_TO_VELOCITY,
            rotation_speed: ROTATION_SPEED,

            obstacle_count_min: 5,
            obstacle_count_max: 10,
            obstacle_size_min: 30.0,
            obstacle_size_max: 80.0,
            obstacle_attempts: 50,

            pickup_max_active: 10,
            pickup_interval_min_ms: 5_000,
            pickup_interval_max_ms: 10_000,
            pickup_spawn_chance: 0.5,
            pickup_place_attempts: 10,
            pickup_margin: 50.0,
            pickup_clearance: 30.0,
            pickup_obstacle_clearance: 0.0,
            mystery_chance: 0.3,
            pickup_countdown_ms: 5_000,

            effect_duration_min_ms: 30_000,
            effect_duration_max_ms: 60_000,

            ai_settle_ticks: 30,
            ai_power_per_distance: 0.5,
            ai_search_step_degrees: 30,
            difficulty: Difficulty::Normal,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Left and right no-obstacle zones around the starting positions
    pub fn safe_zones(&self) -> [Rect; 2] {
        let zone_w = self.arena_width * self.safe_zone_width_frac;
        let top = self.arena_height / 2.0 - self.safe_zone_height / 2.0;
        [
            Rect::new(0.0, top, zone_w, self.safe_zone_height),
            Rect::new(self.arena_width - zone_w, top, zone_w, self.safe_zone_height),
        ]
    }

    /// Check the config for structural problems
    ///
    /// Called by [`crate::sim::GameState::new`]; a failure here means the
    /// match cannot be played at all.
    pub fn validate(&self) -> Result<()> {
        if !(self.arena_width.is_finite()
            && self.arena_height.is_finite()
            && self.arena_width > 0.0
            && self.arena_height > 0.0)
        {
            return Err(ConfigError::InvalidArena {
                width: self.arena_width,
                height: self.arena_height,
            });
        }

        positive("ball_radius", self.ball_radius)?;
        positive("power_min", self.power_min)?;
        positive("power_step", self.power_step)?;
        positive("power_to_velocity", self.power_to_velocity)?;
        positive("rotation_speed", self.rotation_speed)?;
        positive("stop_epsilon", self.stop_epsilon)?;
        positive("obstacle_size_min", self.obstacle_size_min)?;
        positive("pickup_clearance", self.pickup_clearance)?;

        if !(self.friction > 0.0 && self.friction < 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "friction",
                value: self.friction,
                expected: "0 < friction < 1",
            });
        }
        if !(0.0..=1.0).contains(&self.safe_zone_width_frac) {
            return Err(ConfigError::OutOfRange {
                field: "safe_zone_width_frac",
                value: self.safe_zone_width_frac,
                expected: "0..=1",
            });
        }
        probability("pickup_spawn_chance", self.pickup_spawn_chance)?;
        probability("mystery_chance", self.mystery_chance)?;
        if self.ai_search_step_degrees == 0 || self.ai_search_step_degrees > 360 {
            return Err(ConfigError::OutOfRange {
                field: "ai_search_step_degrees",
                value: self.ai_search_step_degrees as f32,
                expected: "1..=360",
            });
        }

        ordered("power", self.power_min, self.power_max)?;
        ordered(
            "obstacle_count",
            self.obstacle_count_min as f32,
            self.obstacle_count_max as f32,
        )?;
        ordered("obstacle_size", self.obstacle_size_min, self.obstacle_size_max)?;
        ordered_ms(
            "pickup_interval_ms",
            self.pickup_interval_min_ms,
            self.pickup_interval_max_ms,
        )?;
        ordered_ms(
            "effect_duration_ms",
            self.effect_duration_min_ms,
            self.effect_duration_max_ms,
        )?;

        let weakest = EffectKind::ALL
            .into_iter()
            .filter(|k| k.category() == Some(EffectCategory::Power))
            .map(EffectKind::multiplier)
            .fold(1.0f32, f32::min);
        let weakened_max = self.power_max * weakest;
        if weakened_max < self.power_min {
            return Err(ConfigError::PowerFloor {
                weakened_max,
                min: self.power_min,
            });
        }

        for (side, start) in [("Player", self.player_start), ("Computer", self.computer_start)] {
            let r = self.ball_radius;
            let fits = start.x >= r
                && start.x <= self.arena_width - r
                && start.y >= r
                && start.y <= self.arena_height - r;
            if !fits {
                return Err(ConfigError::StartOutsideArena {
                    side,
                    x: start.x,
                    y: start.y,
                });
            }
        }

        if self.obstacle_count_max > 0 {
            self.check_obstacle_room()?;
        }

        if self.pickup_margin * 2.0 > self.arena_width || self.pickup_margin * 2.0 > self.arena_height
        {
            return Err(ConfigError::NoPickupRoom {
                margin: self.pickup_margin,
            });
        }

        Ok(())
    }

    /// The smallest obstacle must fit somewhere the safe zones do not cover
    fn check_obstacle_room(&self) -> Result<()> {
        let min = self.obstacle_size_min;
        let no_room = ConfigError::NoObstacleRoom { min_size: min };

        if self.obstacle_size_max > self.arena_width || self.obstacle_size_max > self.arena_height {
            return Err(no_room);
        }

        let [left, right] = self.safe_zones();
        let above = left.y;
        let below = self.arena_height - left.bottom();
        let between = right.x - left.right();

        if above >= min || below >= min || between >= min {
            Ok(())
        } else {
            Err(no_room)
        }
    }

    /// Check a fixed obstacle layout against the arena and safe zones
    ///
    /// Obstacles must lie inside the arena, stay clear of both safe zones and
    /// not overlap one another.
    pub fn validate_layout(&self, layout: &[Rect]) -> Result<()> {
        let zones = self.safe_zones();
        for (index, rect) in layout.iter().enumerate() {
            let inside = rect.w > 0.0
                && rect.h > 0.0
                && rect.left() >= 0.0
                && rect.top() >= 0.0
                && rect.right() <= self.arena_width
                && rect.bottom() <= self.arena_height;
            if !inside {
                return Err(ConfigError::ObstacleOutsideArena { index });
            }
            if zones.iter().any(|z| rect.overlaps(z)) {
                return Err(ConfigError::ObstacleInSafeZone { index });
            }
            if let Some(first) = layout[..index].iter().position(|o| o.overlaps(rect)) {
                return Err(ConfigError::ObstaclesOverlap {
                    first,
                    second: index,
                });
            }
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected: "> 0",
        })
    }
}

fn probability(field: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value: value as f32,
            expected: "0..=1",
        })
    }
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<()> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { field, min, max })
    }
}

fn ordered_ms(field: &'static str, min: u64, max: u64) -> Result<()> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedDuration { field, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_default_start_positions() {
        let config = Config::new();
        assert_eq!(config.player_start, Vec2::new(384.0, 540.0));
        assert_eq!(config.computer_start, Vec2::new(1536.0, 540.0));
    }

    #[test]
    fn test_safe_zones_cover_starts() {
        let config = Config::new();
        let [left, right] = config.safe_zones();
        assert!(left.contains_point(config.player_start));
        assert!(right.contains_point(config.computer_start));
        assert_eq!(left.y, 440.0);
        assert_eq!(left.h, 200.0);
    }

    #[test]
    fn test_safe_zones_without_room_are_fatal() {
        let config = Config {
            safe_zone_width_frac: 0.5,
            safe_zone_height: 1080.0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NoObstacleRoom { min_size }) if min_size == 30.0
        ));

        // Same zones are fine when no obstacles are requested
        let config = Config {
            obstacle_count_min: 0,
            obstacle_count_max: 0,
            ..config
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = Config {
            friction: 1.2,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { field: "friction", .. })
        ));

        let config = Config {
            power_min: 120.0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedRange { field: "power", .. })
        ));

        let config = Config {
            player_start: Vec2::new(5.0, 540.0),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartOutsideArena { side: "Player", .. })
        ));
    }

    #[test]
    fn test_inverted_ms_ranges_rejected() {
        // Adjacent values that collapse to the same f32
        let config = Config {
            pickup_interval_min_ms: 16_777_217,
            pickup_interval_max_ms: 16_777_216,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedDuration {
                field: "pickup_interval_ms",
                min: 16_777_217,
                max: 16_777_216,
            })
        ));

        let config = Config {
            effect_duration_min_ms: 60_001,
            effect_duration_max_ms: 60_000,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedDuration { field: "effect_duration_ms", .. })
        ));
    }

    #[test]
    fn test_power_down_must_stay_above_min_power() {
        let config = Config {
            power_max: 40.0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PowerFloor { min, .. }) if min == 30.0
        ));

        // 0.7 * 43 = 30.1 still clears the floor
        let config = Config {
            power_max: 43.0,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_layout_checks() {
        let config = Config::default();
        assert!(config.validate_layout(&[]).is_ok());
        assert!(config.validate_layout(&[Rect::new(900.0, 100.0, 50.0, 50.0)]).is_ok());

        let start = config.player_start;
        let on_start = Rect::new(start.x - 10.0, start.y - 10.0, 20.0, 20.0);
        assert!(matches!(
            config.validate_layout(&[on_start]),
            Err(ConfigError::ObstacleInSafeZone { index: 0 })
        ));

        assert!(matches!(
            config.validate_layout(&[Rect::new(1900.0, 100.0, 50.0, 50.0)]),
            Err(ConfigError::ObstacleOutsideArena { index: 0 })
        ));

        let layout = [
            Rect::new(900.0, 100.0, 50.0, 50.0),
            Rect::new(1000.0, 800.0, 40.0, 40.0),
            Rect::new(920.0, 120.0, 50.0, 50.0),
        ];
        assert!(matches!(
            config.validate_layout(&layout),
            Err(ConfigError::ObstaclesOverlap { first: 0, second: 2 })
        ));
    }

    #[test]
    fn test_from_json_partial() {
        let config = Config::from_json(r#"{ "arena_width": 800.0, "difficulty": "Hard" }"#)
            .expect("valid json");
        assert_eq!(config.arena_width, 800.0);
        assert_eq!(config.arena_height, ARENA_HEIGHT);
        assert_eq!(config.difficulty, Difficulty::Hard);

        assert!(matches!(
            Config::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_difficulty_presets() {
        assert_eq!(Difficulty::from_str("EASY"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("impossible"), None);
        assert_eq!(Difficulty::Hard.as_str(), "Hard");
        assert!(Difficulty::Easy.angle_offset() > Difficulty::Hard.angle_offset());
        assert!(Difficulty::Easy.accuracy() < Difficulty::Hard.accuracy());
    }
}
