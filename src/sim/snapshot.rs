//! Read-only per-tick view for presentation layers

use glam::Vec2;
use serde::Serialize;

use super::effects::{Band, EffectCategory, EffectKind};
use super::entity::{Agent, Pickup, Side};
use super::rect::Rect;
use super::state::GameState;
use super::turn::TurnPhase;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectView {
    pub category: EffectCategory,
    pub kind: EffectKind,
    pub remaining_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentView {
    /// Doubles as the colour class
    pub side: Side,
    pub pos: Vec2,
    pub radius: f32,
    pub angle: f32,
    pub power: f32,
    pub max_power: f32,
    pub aiming: bool,
    pub power_adjusting: bool,
    pub moving: bool,
    pub effects: Vec<EffectView>,
}

impl AgentView {
    fn new(agent: &Agent, now_ms: u64) -> Self {
        Self {
            side: agent.side,
            pos: agent.pos,
            radius: agent.radius,
            angle: agent.angle,
            power: agent.power,
            max_power: agent.max_power,
            aiming: agent.aiming,
            power_adjusting: agent.power_adjusting,
            moving: agent.moving,
            effects: agent
                .effects
                .active()
                .filter_map(|(category, slot)| {
                    slot.kind.map(|kind| EffectView {
                        category,
                        kind,
                        remaining_ms: slot.remaining_ms(now_ms),
                    })
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickupView {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub symbol: &'static str,
    pub band: Band,
    pub color: [u8; 3],
    /// Remaining lifetime, only once it drops into the countdown window
    pub countdown_ms: Option<u64>,
}

impl PickupView {
    fn new(pickup: &Pickup, now_ms: u64, countdown_window_ms: u64) -> Self {
        let band = pickup.class.band();
        let remaining = pickup.remaining_ms(now_ms);
        Self {
            id: pickup.id,
            pos: pickup.pos,
            radius: pickup.radius,
            symbol: pickup.class.symbol(),
            band,
            color: band.params().color,
            countdown_ms: (remaining <= countdown_window_ms).then_some(remaining),
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub time_ms: u64,
    pub agents: [AgentView; 2],
    pub obstacles: Vec<Rect>,
    pub pickups: Vec<PickupView>,
    pub turn: Side,
    pub phase: TurnPhase,
    pub game_over: bool,
    pub winner: Option<Side>,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        let now = self.time_ms;
        let window = self.config.pickup_countdown_ms;
        Snapshot {
            time_ms: now,
            agents: [
                AgentView::new(&self.player, now),
                AgentView::new(&self.computer, now),
            ],
            obstacles: self.obstacles.iter().map(|o| o.rect).collect(),
            pickups: self
                .pickups
                .iter()
                .filter(|p| p.is_live(now))
                .map(|p| PickupView::new(p, now, window))
                .collect(),
            turn: self.turn,
            phase: self.phase(),
            game_over: self.game_over,
            winner: self.winner,
        }
    }
}
