//! Opponent controller
//!
//! Emulates a player taking a shot: pick a target, swing the aim toward it a
//! few degrees per tick, hold on target for a moment, ramp the power, fire.

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::collision::has_line_of_sight;
use super::entity::{Agent, Obstacle};
use crate::{Config, Difficulty, angle_delta_degrees, direction_from_degrees, normalize_degrees};

/// Controller phase while the computer holds the turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControllerPhase {
    /// Turn just started; a target is picked on the next step
    #[default]
    Waiting,
    Aiming,
    PowerAdjusting,
    /// Shot fired; waits for the ball to stop
    Shooting,
}

/// A planned shot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotPlan {
    pub target: Vec2,
    /// Degrees in [0, 360)
    pub angle: f32,
    pub power: f32,
    /// Direct line to the opponent was blocked
    pub occluded: bool,
}

/// Drives the computer agent one tick at a time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpponentController {
    pub phase: ControllerPhase,
    pub plan: Option<ShotPlan>,
    /// Consecutive ticks spent on target while aiming
    pub settle_ticks: u32,
    /// Only used by [`Self::calculate_shot`]
    pub difficulty: Difficulty,
}

impl OpponentController {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Default::default()
        }
    }

    /// Prepare for a fresh turn
    pub fn begin_turn(&mut self) {
        self.phase = ControllerPhase::Waiting;
        self.plan = None;
        self.settle_ticks = 0;
    }

    /// Advance one tick; returns true on the tick the shot is fired
    pub fn step<R: Rng>(
        &mut self,
        me: &mut Agent,
        opponent: &Agent,
        obstacles: &[Obstacle],
        config: &Config,
        rng: &mut R,
    ) -> bool {
        match self.phase {
            ControllerPhase::Waiting => {
                let plan = plan_shot(me, opponent.pos, obstacles, config, rng);
                log::info!(
                    "Computer targets {:?} (angle={:.1}, power={:.1}, occluded={})",
                    plan.target,
                    plan.angle,
                    plan.power,
                    plan.occluded
                );
                self.plan = Some(plan);
                self.settle_ticks = 0;
                self.phase = ControllerPhase::Aiming;
                me.aiming = true;
                false
            }
            ControllerPhase::Aiming => {
                let Some(plan) = self.plan else {
                    self.phase = ControllerPhase::Waiting;
                    return false;
                };
                let delta = angle_delta_degrees(me.angle, plan.angle);
                if delta.abs() > me.rotation_speed {
                    me.rotate_aim(me.rotation_speed.copysign(delta));
                } else {
                    me.angle = plan.angle;
                    self.settle_ticks += 1;
                }

                if self.settle_ticks >= config.ai_settle_ticks {
                    self.phase = ControllerPhase::PowerAdjusting;
                    self.settle_ticks = 0;
                    me.aiming = false;
                    me.power_adjusting = true;
                    log::debug!("Computer locked aim at {:.1}", me.angle);
                }
                false
            }
            ControllerPhase::PowerAdjusting => {
                let Some(plan) = self.plan else {
                    self.phase = ControllerPhase::Waiting;
                    return false;
                };
                // Effects may have changed max power since the plan was made
                let target = plan.power.clamp(me.min_power, me.max_power.max(me.min_power));
                let step = config.power_step;
                if (me.power - target).abs() > step {
                    me.power += step.copysign(target - me.power);
                    false
                } else {
                    me.power = target;
                    me.clamp_power();
                    self.phase = ControllerPhase::Shooting;
                    me.fire(config.power_to_velocity);
                    true
                }
            }
            ControllerPhase::Shooting => false,
        }
    }

    /// Noisy shot straight at `to`, scaled by the difficulty preset
    ///
    /// Not used by [`Self::step`]; kept for difficulty-driven opponents.
    pub fn calculate_shot<R: Rng>(&self, from: Vec2, to: Vec2, me: &Agent, rng: &mut R) -> (f32, f32) {
        let offset = to - from;
        let distance = offset.length();
        let base_angle = offset.y.atan2(offset.x).to_degrees();

        let spread = self.difficulty.angle_offset();
        let angle = normalize_degrees(base_angle + rng.random_range(-spread..=spread));

        let ideal = (distance / 5.0).min(me.max_power);
        let variation = ideal * (1.0 - self.difficulty.accuracy());
        let power = if variation > 0.0 {
            ideal + rng.random_range(-variation..=variation)
        } else {
            ideal
        };
        (angle, power.clamp(me.min_power, me.max_power.max(me.min_power)))
    }
}

/// One-step look-ahead: would moving `speed` along `angle` from `from` land
/// within two radii of `other`?
pub fn predict_collision(from: Vec2, other: Vec2, speed: f32, angle: f32, radius: f32) -> bool {
    let future = from + direction_from_degrees(angle) * speed;
    future.distance(other) < radius * 2.0
}

/// Choose target, angle and power for the controlled agent
///
/// Aims at the opponent when the line is clear. Otherwise tries directions
/// around the full circle, in random order, at the same distance, taking the
/// first clear one; if none is clear it keeps the blocked direct shot.
pub fn plan_shot<R: Rng>(
    me: &Agent,
    opponent_pos: Vec2,
    obstacles: &[Obstacle],
    config: &Config,
    rng: &mut R,
) -> ShotPlan {
    let distance = me.pos.distance(opponent_pos);
    let mut target = opponent_pos;
    let occluded = !has_line_of_sight(me.pos, target, obstacles);

    if occluded {
        let mut angles: Vec<u32> = (0..360).step_by(config.ai_search_step_degrees as usize).collect();
        angles.shuffle(rng);
        let alternative = angles.into_iter().find_map(|a| {
            let candidate = me.pos + direction_from_degrees(a as f32) * distance;
            has_line_of_sight(me.pos, candidate, obstacles).then_some(candidate)
        });
        match alternative {
            Some(candidate) => target = candidate,
            None => log::debug!("No clear direction found, shooting through obstacles"),
        }
    }

    let offset = target - me.pos;
    let angle = normalize_degrees(offset.y.atan2(offset.x).to_degrees());
    let power = (distance * config.ai_power_per_distance)
        .min(me.max_power)
        .max(me.min_power);

    ShotPlan {
        target,
        angle,
        power,
        occluded,
    }
}
