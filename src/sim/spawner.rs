//! Pickup spawning and expiry
//!
//! The spawner limits spawn *attempts* to roughly one per random interval:
//! each time the interval elapses it rolls once, and whether or not a pickup
//! lands the timer restarts with a freshly drawn interval.

use glam::Vec2;
use rand::Rng;

use super::effects::EffectKind;
use super::entity::{Agent, Obstacle, Pickup, PickupClass};
use crate::Config;

/// Read-only world the spawner must keep clear of
pub struct SpawnArea<'a> {
    pub config: &'a Config,
    pub obstacles: &'a [Obstacle],
    pub agents: [&'a Agent; 2],
}

impl SpawnArea<'_> {
    /// Check a candidate point against every clearance rule
    pub fn is_clear(&self, p: Vec2, pickups: &[Pickup]) -> bool {
        let clearance = self.config.pickup_clearance;
        let obstacle_margin = self.config.pickup_obstacle_clearance;

        let hits_obstacle = self.obstacles.iter().any(|o| {
            if obstacle_margin > 0.0 {
                o.rect.distance_to_point(p) < obstacle_margin || o.rect.contains_point(p)
            } else {
                o.rect.contains_point(p)
            }
        });
        if hits_obstacle {
            return false;
        }

        if pickups.iter().any(|k| k.pos.distance(p) < clearance * 2.0) {
            return false;
        }

        !self
            .agents
            .iter()
            .any(|a| a.pos.distance(p) < clearance + a.radius)
    }
}

/// Spawn timer state
#[derive(Debug, Clone)]
pub struct PickupSpawner {
    pub last_check_ms: u64,
    pub interval_ms: u64,
}

impl PickupSpawner {
    pub fn new<R: Rng>(now_ms: u64, config: &Config, rng: &mut R) -> Self {
        Self {
            last_check_ms: now_ms,
            interval_ms: draw_interval(config, rng),
        }
    }

    /// Prune dead pickups, then maybe attempt one placement
    ///
    /// Returns the index of a newly placed pickup, if any.
    pub fn update<R: Rng>(
        &mut self,
        area: &SpawnArea<'_>,
        pickups: &mut Vec<Pickup>,
        now_ms: u64,
        rng: &mut R,
        next_id: &mut u32,
    ) -> Option<usize> {
        pickups.retain(|p| p.is_live(now_ms));

        let config = area.config;
        if pickups.len() >= config.pickup_max_active
            || now_ms.saturating_sub(self.last_check_ms) < self.interval_ms
        {
            return None;
        }

        let mut placed = None;
        if rng.random_bool(config.pickup_spawn_chance) {
            if let Some(pos) = find_spot(area, pickups, rng) {
                let pickup = roll_pickup(*next_id, pos, now_ms, config, rng);
                *next_id += 1;
                log::debug!(
                    "Spawned pickup #{} {:?} at {:?} (r={}, life={}ms)",
                    pickup.id,
                    pickup.class,
                    pickup.pos,
                    pickup.radius,
                    pickup.lifetime_ms
                );
                pickups.push(pickup);
                placed = Some(pickups.len() - 1);
            }
        }

        self.last_check_ms = now_ms;
        self.interval_ms = draw_interval(config, rng);
        placed
    }
}

fn draw_interval<R: Rng>(config: &Config, rng: &mut R) -> u64 {
    rng.random_range(config.pickup_interval_min_ms..=config.pickup_interval_max_ms)
}

/// Random candidate positions inside the margins until one is clear
pub fn find_spot<R: Rng>(area: &SpawnArea<'_>, pickups: &[Pickup], rng: &mut R) -> Option<Vec2> {
    let config = area.config;
    let m = config.pickup_margin;
    for _ in 0..config.pickup_place_attempts {
        let p = Vec2::new(
            rng.random_range(m..=config.arena_width - m),
            rng.random_range(m..=config.arena_height - m),
        );
        if area.is_clear(p, pickups) {
            return Some(p);
        }
    }
    None
}

/// Draw class, radius and lifetime for a new pickup
pub fn roll_pickup<R: Rng>(id: u32, pos: Vec2, now_ms: u64, config: &Config, rng: &mut R) -> Pickup {
    let kind = EffectKind::random(rng);
    let class = if rng.random_bool(config.mystery_chance) {
        PickupClass::Mystery
    } else {
        PickupClass::Concrete(kind)
    };

    let band = class.band().params();
    let radius = rng.random_range(band.radius.0..=band.radius.1).round();
    let lifetime_ms = rng.random_range(band.lifetime_ms.0..=band.lifetime_ms.1);
    Pickup::new(id, pos, class, radius, lifetime_ms, now_ms)
}
