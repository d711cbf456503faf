//! Turn state machine
//!
//! The human side moves through idle → aiming → power → shot on fire-key
//! presses; the computer side is driven by the opponent controller. The turn
//! passes only when the active agent reports turn-complete.

use serde::{Deserialize, Serialize};

use super::ai::ControllerPhase;
use super::entity::{Agent, Side};
use super::state::{GameEvent, GameState};
use crate::Config;

/// Combined view of whose turn it is and how far along it is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    PlayerIdle,
    PlayerAiming,
    PlayerPowerAdjust,
    PlayerShot,
    ComputerWaiting,
    ComputerAiming,
    ComputerPowerAdjust,
    ComputerShooting,
    GameOver,
}

impl GameState {
    pub fn phase(&self) -> TurnPhase {
        if self.game_over {
            return TurnPhase::GameOver;
        }
        match self.turn {
            Side::Player => {
                let p = &self.player;
                if p.moving {
                    TurnPhase::PlayerShot
                } else if p.power_adjusting {
                    TurnPhase::PlayerPowerAdjust
                } else if p.aiming {
                    TurnPhase::PlayerAiming
                } else {
                    TurnPhase::PlayerIdle
                }
            }
            Side::Computer => match self.controller.phase {
                ControllerPhase::Waiting => TurnPhase::ComputerWaiting,
                ControllerPhase::Aiming => TurnPhase::ComputerAiming,
                ControllerPhase::PowerAdjusting => TurnPhase::ComputerPowerAdjust,
                ControllerPhase::Shooting => TurnPhase::ComputerShooting,
            },
        }
    }

    /// React to the fire control
    ///
    /// Game over: start a new match. Human's turn: idle → aim → power → fire.
    /// Ignored at any other time.
    pub fn handle_fire(&mut self) {
        if self.game_over {
            self.reset();
            return;
        }
        if self.turn != Side::Player || self.player.moving {
            return;
        }

        let p = &mut self.player;
        if p.aiming {
            p.aiming = false;
            p.power_adjusting = true;
            log::debug!("Player locked aim at {:.1}", p.angle);
        } else if p.power_adjusting {
            let angle = p.angle;
            p.fire(self.config.power_to_velocity);
            let speed = p.vel.length();
            self.last_mover = Some(Side::Player);
            self.events.push(GameEvent::Fired {
                side: Side::Player,
                angle,
                speed,
            });
        } else {
            p.aiming = true;
        }
    }

    /// Hand the turn over once the active agent is done
    ///
    /// Both agents' transient flags are cleared so the outgoing agent's
    /// motion state does not leak into the next turn.
    pub fn advance_turn(&mut self) -> Option<Side> {
        if self.game_over || !self.agent(self.turn).turn_complete {
            return None;
        }

        let next = self.turn.opponent();
        self.player.clear_turn_flags();
        self.computer.clear_turn_flags();
        self.turn = next;
        if next == Side::Computer {
            self.controller.begin_turn();
        }

        log::info!("Turn passes to {}", next.as_str());
        self.events.push(GameEvent::TurnChanged { to: next });
        Some(next)
    }
}

/// Per-tick human aim sweep: spin the arrow while aiming, pulse the power
/// between its bounds while adjusting
pub fn update_human_controls(agent: &mut Agent, config: &Config) {
    if agent.aiming {
        agent.rotate_aim(agent.rotation_speed);
    }

    if agent.power_adjusting {
        let max = agent.max_power.max(agent.min_power);
        if agent.power_rising {
            agent.power += config.power_step;
            if agent.power >= max {
                agent.power = max;
                agent.power_rising = false;
            }
        } else {
            agent.power -= config.power_step;
            if agent.power <= agent.min_power {
                agent.power = agent.min_power;
                agent.power_rising = true;
            }
        }
    }
}
