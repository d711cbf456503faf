//! Pickup effects and the per-agent modifier table
//!
//! Seven concrete effects exist. Six are timed modifiers scoped to a category
//! (Speed, Power, Size); `ResetPosition` is instantaneous. Display and spawn
//! parameters are looked up per [`Band`] from a static table.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Agent;

/// Attribute family a timed effect modifies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectCategory {
    /// Aim rotation speed
    Speed,
    /// Maximum shot power
    Power,
    /// Ball radius
    Size,
}

impl EffectCategory {
    pub const ALL: [EffectCategory; 3] = [Self::Speed, Self::Power, Self::Size];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A concrete pickup effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    SpeedUp,
    SpeedDown,
    PowerUp,
    PowerDown,
    SizeUp,
    SizeDown,
    ResetPosition,
}

impl EffectKind {
    pub const ALL: [EffectKind; 7] = [
        Self::SpeedUp,
        Self::SpeedDown,
        Self::PowerUp,
        Self::PowerDown,
        Self::SizeUp,
        Self::SizeDown,
        Self::ResetPosition,
    ];

    /// Uniformly random concrete effect
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Category for timed effects; `None` for the instantaneous reset
    pub fn category(self) -> Option<EffectCategory> {
        match self {
            Self::SpeedUp | Self::SpeedDown => Some(EffectCategory::Speed),
            Self::PowerUp | Self::PowerDown => Some(EffectCategory::Power),
            Self::SizeUp | Self::SizeDown => Some(EffectCategory::Size),
            Self::ResetPosition => None,
        }
    }

    /// Multiplier applied to the category's base value
    pub fn multiplier(self) -> f32 {
        match self {
            Self::SpeedUp => 2.0,
            Self::SpeedDown => 0.5,
            Self::PowerUp => 1.5,
            Self::PowerDown => 0.7,
            Self::SizeUp => 2.0,
            Self::SizeDown => 0.5,
            Self::ResetPosition => 1.0,
        }
    }

    /// Harmful effects make aiming harder (faster spin, weaker shot, bigger target)
    pub fn band(self) -> Band {
        match self {
            Self::SpeedUp | Self::PowerDown | Self::SizeUp => Band::Harmful,
            Self::SpeedDown | Self::PowerUp | Self::SizeDown => Band::Beneficial,
            Self::ResetPosition => Band::Neutral,
        }
    }

    /// Short label drawn on pickups and effect icons
    pub fn symbol(self) -> &'static str {
        match self {
            Self::SpeedUp => "fast",
            Self::SpeedDown => "slow",
            Self::PowerUp => "strong",
            Self::PowerDown => "weak",
            Self::SizeUp => "big",
            Self::SizeDown => "small",
            Self::ResetPosition => "home",
        }
    }
}

/// Spawn band a pickup belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    Harmful,
    Beneficial,
    Neutral,
    Mystery,
}

/// Static per-band spawn and display parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandParams {
    /// Inclusive radius range
    pub radius: (f32, f32),
    /// Inclusive lifetime range (ms)
    pub lifetime_ms: (u64, u64),
    pub color: [u8; 3],
}

const BANDS: [BandParams; 4] = [
    // Harmful: large, long-lived, red
    BandParams {
        radius: (20.0, 25.0),
        lifetime_ms: (50_000, 60_000),
        color: [255, 80, 80],
    },
    // Beneficial: small, short-lived, green
    BandParams {
        radius: (12.0, 15.0),
        lifetime_ms: (30_000, 40_000),
        color: [80, 255, 80],
    },
    // Neutral (reset): medium, dark
    BandParams {
        radius: (15.0, 18.0),
        lifetime_ms: (40_000, 50_000),
        color: [50, 50, 50],
    },
    // Mystery: white with a black outline
    BandParams {
        radius: (15.0, 20.0),
        lifetime_ms: (40_000, 50_000),
        color: [255, 255, 255],
    },
];

impl Band {
    pub fn params(self) -> &'static BandParams {
        &BANDS[self as usize]
    }
}

/// One category's slot in an agent's effect table
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EffectSlot {
    /// Effect currently held in this category, if any
    pub kind: Option<EffectKind>,
    pub expires_at_ms: u64,
}

impl EffectSlot {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.kind.is_some()
    }

    /// Multiplier in force (1.0 when inactive)
    pub fn multiplier(&self) -> f32 {
        self.kind.map_or(1.0, EffectKind::multiplier)
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        if self.is_active() {
            self.expires_at_ms.saturating_sub(now_ms)
        } else {
            0
        }
    }
}

/// Category-indexed effect table; at most one effect per category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectTable {
    slots: [EffectSlot; 3],
}

impl EffectTable {
    pub fn slot(&self, category: EffectCategory) -> &EffectSlot {
        &self.slots[category.index()]
    }

    /// Install `kind`, overwriting whatever the category held
    pub fn set(&mut self, category: EffectCategory, kind: EffectKind, expires_at_ms: u64) {
        self.slots[category.index()] = EffectSlot {
            kind: Some(kind),
            expires_at_ms,
        };
    }

    pub fn clear(&mut self, category: EffectCategory) {
        self.slots[category.index()] = EffectSlot::default();
    }

    pub fn multiplier(&self, category: EffectCategory) -> f32 {
        self.slot(category).multiplier()
    }

    /// Active slots in category order
    pub fn active(&self) -> impl Iterator<Item = (EffectCategory, &EffectSlot)> {
        EffectCategory::ALL
            .into_iter()
            .map(|c| (c, &self.slots[c.index()]))
            .filter(|(_, s)| s.is_active())
    }
}

/// What applying an effect did to an agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectOutcome {
    /// Timed modifier installed (replacing `replaced`, if any)
    Timed {
        kind: EffectKind,
        category: EffectCategory,
        expires_at_ms: u64,
        replaced: Option<EffectKind>,
    },
    /// Agent teleported home and its turn ended
    Reset,
}

/// Apply a concrete effect to an agent
///
/// Timed effects overwrite the category's previous effect and expiry; they
/// never stack. `arena` is used to keep a resized ball inside the bounds.
pub fn apply_effect(
    agent: &mut Agent,
    kind: EffectKind,
    now_ms: u64,
    duration_ms: u64,
    arena: (f32, f32),
) -> EffectOutcome {
    let Some(category) = kind.category() else {
        agent.reset_to_origin();
        agent.turn_complete = true;
        log::info!("{} reset to origin {:?}, turn over", agent.side.as_str(), agent.pos);
        return EffectOutcome::Reset;
    };

    let replaced = agent.effects.slot(category).kind;
    let expires_at_ms = now_ms + duration_ms;
    agent.effects.set(category, kind, expires_at_ms);
    agent.refresh_modifiers(arena);

    log::info!(
        "{} gained {:?} for {}s (rotation={}, max_power={}, radius={})",
        agent.side.as_str(),
        kind,
        duration_ms / 1000,
        agent.rotation_speed,
        agent.max_power,
        agent.radius
    );

    EffectOutcome::Timed {
        kind,
        category,
        expires_at_ms,
        replaced,
    }
}

/// Drop effects whose expiry has passed and restore base values
///
/// Returns the effects that ended this call.
pub fn expire_effects(agent: &mut Agent, now_ms: u64, arena: (f32, f32)) -> Vec<EffectKind> {
    let mut expired = Vec::new();
    for category in EffectCategory::ALL {
        let slot = *agent.effects.slot(category);
        if let Some(kind) = slot.kind {
            if now_ms >= slot.expires_at_ms {
                agent.effects.clear(category);
                expired.push(kind);
            }
        }
    }

    if !expired.is_empty() {
        agent.refresh_modifiers(arena);
        log::debug!("{} effects ended: {:?}", agent.side.as_str(), expired);
    }
    expired
}
