//! Match state and simulation context
//!
//! Everything the simulation reads or mutates lives in [`GameState`], which
//! is passed explicitly to every operation. The only randomness is the seeded
//! RNG stored here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai::OpponentController;
use super::arena::generate_obstacles;
use super::effects::EffectKind;
use super::entity::{Agent, Obstacle, Pickup, PickupClass, Side};
use super::rect::Rect;
use super::spawner::PickupSpawner;
use crate::Config;
use crate::error::Result;

/// Something notable that happened during the last tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Fired { side: Side, angle: f32, speed: f32 },
    TurnChanged { to: Side },
    WallBounce { side: Side },
    ObstacleBounce { side: Side },
    PickupSpawned { id: u32, class: PickupClass },
    /// `effect` is the resolved effect (mystery pickups resolve on collection)
    PickupCollected { id: u32, side: Side, class: PickupClass, effect: EffectKind },
    EffectApplied { side: Side, kind: EffectKind, expires_at_ms: u64 },
    EffectExpired { side: Side, kind: EffectKind },
    PositionReset { side: Side },
    MatchOver { winner: Option<Side> },
    /// Fresh arena after a reset
    Reset,
    /// Pointer press forwarded for UI hit-testing (not simulated)
    PointerPressed { pos: Vec2 },
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: Config,
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Monotonic match clock (ms), advanced once per tick
    pub time_ms: u64,
    pub time_ticks: u64,
    /// Side allowed to act
    pub turn: Side,
    pub player: Agent,
    pub computer: Agent,
    pub obstacles: Vec<Obstacle>,
    pub pickups: Vec<Pickup>,
    pub spawner: PickupSpawner,
    pub controller: OpponentController,
    pub game_over: bool,
    pub winner: Option<Side>,
    /// Side that fired most recently (collision tie-break)
    pub last_mover: Option<Side>,
    /// Last known pointer position
    pub pointer: Option<Vec2>,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    /// Fixed obstacle layout reused on reset instead of random generation
    layout: Option<Vec<Rect>>,
    pub(crate) next_id: u32,
}

impl GameState {
    /// Create a match with a random arena
    ///
    /// Fails if the config is structurally unusable.
    pub fn new(config: Config, seed: u64) -> Result<Self> {
        Self::build(config, seed, None)
    }

    /// Create a match with a fixed obstacle layout
    pub fn with_obstacles(config: Config, seed: u64, layout: Vec<Rect>) -> Result<Self> {
        Self::build(config, seed, Some(layout))
    }

    fn build(config: Config, seed: u64, layout: Option<Vec<Rect>>) -> Result<Self> {
        config.validate()?;
        if let Some(rects) = &layout {
            config.validate_layout(rects)?;
        }

        let mut rng = Pcg32::seed_from_u64(seed);
        let spawner = PickupSpawner::new(0, &config, &mut rng);
        let mut state = Self {
            seed,
            rng,
            time_ms: 0,
            time_ticks: 0,
            turn: Side::Player,
            player: Agent::new(Side::Player, config.player_start, &config),
            computer: Agent::new(Side::Computer, config.computer_start, &config),
            obstacles: Vec::new(),
            pickups: Vec::new(),
            spawner,
            controller: OpponentController::new(config.difficulty),
            game_over: false,
            winner: None,
            last_mover: None,
            pointer: None,
            events: Vec::new(),
            layout,
            next_id: 1,
            config,
        };
        state.populate_arena();
        Ok(state)
    }

    /// Replace the whole match with a fresh one (clock keeps running)
    pub fn reset(&mut self) {
        let config = &self.config;
        self.player = Agent::new(Side::Player, config.player_start, config);
        self.computer = Agent::new(Side::Computer, config.computer_start, config);
        self.turn = Side::Player;
        self.controller = OpponentController::new(config.difficulty);
        self.game_over = false;
        self.winner = None;
        self.last_mover = None;
        self.pickups.clear();
        self.spawner = PickupSpawner::new(self.time_ms, &self.config, &mut self.rng);
        self.populate_arena();
        self.events.push(GameEvent::Reset);
        log::info!("Match reset ({} obstacles)", self.obstacles.len());
    }

    fn populate_arena(&mut self) {
        self.obstacles = match &self.layout {
            Some(rects) => rects
                .iter()
                .map(|&rect| {
                    let id = self.next_id;
                    self.next_id += 1;
                    Obstacle { id, rect }
                })
                .collect(),
            None => generate_obstacles(&self.config, &mut self.rng, &mut self.next_id),
        };
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn agent(&self, side: Side) -> &Agent {
        match side {
            Side::Player => &self.player,
            Side::Computer => &self.computer,
        }
    }

    pub fn agent_mut(&mut self, side: Side) -> &mut Agent {
        match side {
            Side::Player => &mut self.player,
            Side::Computer => &mut self.computer,
        }
    }

    /// Place a pickup directly (scripted scenarios, debugging)
    pub fn add_pickup(&mut self, pos: Vec2, class: PickupClass, radius: f32, lifetime_ms: u64) -> u32 {
        let id = self.next_entity_id();
        self.pickups
            .push(Pickup::new(id, pos, class, radius, lifetime_ms, self.time_ms));
        id
    }

    /// Arena size as (width, height)
    pub fn arena(&self) -> (f32, f32) {
        (self.config.arena_width, self.config.arena_height)
    }
}
