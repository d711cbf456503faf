//! Configuration errors
//!
//! The simulation has no recoverable runtime errors; everything here is caught
//! when a match is constructed, before the first tick.

use thiserror::Error;

/// Result type alias using [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Structural misconfiguration detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Arena extents must be positive and finite.
    #[error("Invalid arena size: {width}x{height}")]
    InvalidArena { width: f32, height: f32 },

    /// A named value is outside its allowed range.
    #[error("Invalid value for '{field}': {value} (expected {expected})")]
    OutOfRange {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },

    /// A min/max pair is inverted.
    #[error("Invalid range for '{field}': min {min} > max {max}")]
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },

    /// A millisecond min/max pair is inverted.
    #[error("Invalid range for '{field}': min {min}ms > max {max}ms")]
    InvertedDuration {
        field: &'static str,
        min: u64,
        max: u64,
    },

    /// The weakest power effect would push max power below min power.
    #[error("Weakened max power {weakened_max} falls below min power {min}")]
    PowerFloor { weakened_max: f32, min: f32 },

    /// A start position does not fit inside the arena with its radius.
    #[error("{side} start position ({x}, {y}) does not fit inside the arena")]
    StartOutsideArena { side: &'static str, x: f32, y: f32 },

    /// Safe zones leave no room for even the smallest obstacle.
    #[error("Safe zones leave no room for a {min_size}x{min_size} obstacle")]
    NoObstacleRoom { min_size: f32 },

    /// Pickup spawn margins leave no area to place pickups.
    #[error("Pickup spawn margin {margin} leaves no room in the arena")]
    NoPickupRoom { margin: f32 },

    /// A fixed obstacle lies outside the arena.
    #[error("Obstacle {index} extends outside the arena")]
    ObstacleOutsideArena { index: usize },

    /// A fixed obstacle covers part of a safe zone.
    #[error("Obstacle {index} overlaps a safe zone")]
    ObstacleInSafeZone { index: usize },

    /// Two fixed obstacles overlap each other.
    #[error("Obstacles {first} and {second} overlap")]
    ObstaclesOverlap { first: usize, second: usize },

    /// Config JSON could not be parsed.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
