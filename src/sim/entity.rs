//! Agents, obstacles and pickups

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::{Band, EffectCategory, EffectKind, EffectTable};
use super::rect::Rect;
use crate::{Config, direction_from_degrees, normalize_degrees};

/// Which side an agent plays for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Human-controlled
    Player,
    /// Driven by the opponent controller
    Computer,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Computer,
            Side::Computer => Side::Player,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Computer => "Computer",
        }
    }
}

/// A ball agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub side: Side,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Aim angle in degrees, kept in [0, 360)
    pub angle: f32,
    /// Shot power, kept in [min_power, max_power]
    pub power: f32,
    pub min_power: f32,
    pub base_max_power: f32,
    pub max_power: f32,
    pub base_radius: f32,
    pub radius: f32,
    /// Degrees per tick
    pub base_rotation_speed: f32,
    pub rotation_speed: f32,

    pub aiming: bool,
    pub power_adjusting: bool,
    pub moving: bool,
    pub turn_complete: bool,
    /// Direction of the power oscillation while a human adjusts power
    pub power_rising: bool,

    pub effects: EffectTable,
    /// Start position, restored by the reset effect
    origin: Vec2,
}

impl Agent {
    pub fn new(side: Side, origin: Vec2, config: &Config) -> Self {
        Self {
            side,
            pos: origin,
            vel: Vec2::ZERO,
            angle: 0.0,
            power: config.power_min,
            min_power: config.power_min,
            base_max_power: config.power_max,
            max_power: config.power_max,
            base_radius: config.ball_radius,
            radius: config.ball_radius,
            base_rotation_speed: config.rotation_speed,
            rotation_speed: config.rotation_speed,
            aiming: false,
            power_adjusting: false,
            moving: false,
            turn_complete: false,
            power_rising: true,
            effects: EffectTable::default(),
            origin,
        }
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Not aiming, adjusting power or rolling
    pub fn is_idle(&self) -> bool {
        !self.aiming && !self.power_adjusting && !self.moving
    }

    /// Launch along the aim angle with the current power
    pub fn fire(&mut self, power_to_velocity: f32) {
        self.vel = direction_from_degrees(self.angle) * self.power * power_to_velocity;
        self.moving = true;
        self.aiming = false;
        self.power_adjusting = false;
        self.turn_complete = false;
        log::debug!(
            "{} fired: vel={:?} angle={:.1} power={:.1}",
            self.side.as_str(),
            self.vel,
            self.angle,
            self.power
        );
        self.power = self.min_power;
        self.power_rising = true;
    }

    /// Teleport home and drop all motion and aim state
    pub fn reset_to_origin(&mut self) {
        self.pos = self.origin;
        self.vel = Vec2::ZERO;
        self.moving = false;
        self.aiming = false;
        self.power_adjusting = false;
        self.power = self.min_power;
        self.power_rising = true;
        self.angle = 0.0;
    }

    /// Clear per-turn flags when the turn changes hands
    pub fn clear_turn_flags(&mut self) {
        self.aiming = false;
        self.power_adjusting = false;
        self.moving = false;
        self.turn_complete = false;
        self.vel = Vec2::ZERO;
    }

    /// Advance the aim angle by one rotation step
    pub fn rotate_aim(&mut self, degrees: f32) {
        self.angle = normalize_degrees(self.angle + degrees);
    }

    /// Keep the ball fully inside a `width` x `height` arena
    pub fn clamp_to_arena(&mut self, arena: (f32, f32)) {
        let (w, h) = arena;
        // A ball wider than the arena pins to the centre line
        self.pos.x = self.pos.x.clamp(self.radius.min(w / 2.0), (w - self.radius).max(w / 2.0));
        self.pos.y = self.pos.y.clamp(self.radius.min(h / 2.0), (h - self.radius).max(h / 2.0));
    }

    /// Recompute current attributes from base values and the effect table
    pub fn refresh_modifiers(&mut self, arena: (f32, f32)) {
        self.rotation_speed =
            self.base_rotation_speed * self.effects.multiplier(EffectCategory::Speed);
        self.max_power = self.base_max_power * self.effects.multiplier(EffectCategory::Power);
        self.radius = self.base_radius * self.effects.multiplier(EffectCategory::Size);
        self.clamp_power();
        self.clamp_to_arena(arena);
    }

    pub fn clamp_power(&mut self) {
        self.power = self.power.clamp(self.min_power, self.max_power.max(self.min_power));
    }

    /// Enclosing square for obstacle tests
    pub fn bounds(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }
}

/// A static rectangular obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
}

/// What a pickup does when collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupClass {
    Concrete(EffectKind),
    /// Resolved to a random concrete effect on collection
    Mystery,
}

impl PickupClass {
    pub fn band(self) -> Band {
        match self {
            PickupClass::Concrete(kind) => kind.band(),
            PickupClass::Mystery => Band::Mystery,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            PickupClass::Concrete(kind) => kind.symbol(),
            PickupClass::Mystery => "?",
        }
    }
}

/// A collectible on the arena floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub pos: Vec2,
    pub class: PickupClass,
    pub radius: f32,
    pub lifetime_ms: u64,
    pub created_ms: u64,
    collected: bool,
}

impl Pickup {
    pub fn new(
        id: u32,
        pos: Vec2,
        class: PickupClass,
        radius: f32,
        lifetime_ms: u64,
        created_ms: u64,
    ) -> Self {
        Self {
            id,
            pos,
            class,
            radius,
            lifetime_ms,
            created_ms,
            collected: false,
        }
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Mark collected; returns false if it already was
    pub fn collect(&mut self) -> bool {
        !std::mem::replace(&mut self.collected, true)
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.created_ms) >= self.lifetime_ms
    }

    /// Neither collected nor expired
    pub fn is_live(&self, now_ms: u64) -> bool {
        !self.collected && !self.is_expired(now_ms)
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        (self.created_ms + self.lifetime_ms).saturating_sub(now_ms)
    }
}
