//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed cadence only (one tick per call, clock advanced by the caller)
//! - Seeded RNG only, owned by `GameState`
//! - Stable iteration order (player before computer, pickups by spawn order)
//! - No rendering or platform dependencies

pub mod ai;
pub mod arena;
pub mod collision;
pub mod effects;
pub mod entity;
pub mod physics;
pub mod rect;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod turn;

pub use ai::{ControllerPhase, OpponentController, ShotPlan, plan_shot, predict_collision};
pub use arena::generate_obstacles;
pub use collision::{has_line_of_sight, segment_intersects_rect, segments_intersect};
pub use effects::{Band, EffectCategory, EffectKind, EffectOutcome, apply_effect, expire_effects};
pub use entity::{Agent, Obstacle, Pickup, PickupClass, Side};
pub use physics::{StepResult, integrate};
pub use rect::Rect;
pub use snapshot::{AgentView, EffectView, PickupView, Snapshot};
pub use spawner::{PickupSpawner, SpawnArea};
pub use state::{GameEvent, GameState};
pub use tick::{InputEvent, Key, TickInput, tick};
pub use turn::TurnPhase;
