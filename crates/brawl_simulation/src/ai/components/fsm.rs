//! Combatant FSM components (state, cadence, tuning, target binding).

use bevy::prelude::*;
use crate::combat::{AttackCatalog, AttackDefinition};

/// Combat FSM состояния.
///
/// Каждое состояние несёт только свои таймеры: нельзя прочитать
/// протухший stun или attack timer из неактивного состояния.
#[derive(Component, Debug, Clone, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub enum CombatState {
    /// Начальное состояние / цель мертва
    #[default]
    Idle,

    /// Идём к цели по прямой
    Approaching,

    /// Атака: hit-volume живёт пока `active > 0`
    Attacking {
        attack: AttackDefinition,
        /// Seconds left in the attack window
        active: f32,
    },

    /// Guard posture while waiting for the next attack window
    Blocking,

    /// Stunned after an unguarded hit
    Hit { remaining: f32 },

    /// Stunned after a guarded hit
    BlockHit { remaining: f32 },

    /// Terminal (until an explicit respawn)
    Dead,
}

impl CombatState {
    pub fn kind(&self) -> CombatStateKind {
        match self {
            CombatState::Idle => CombatStateKind::Idle,
            CombatState::Approaching => CombatStateKind::Approaching,
            CombatState::Attacking { .. } => CombatStateKind::Attacking,
            CombatState::Blocking => CombatStateKind::Blocking,
            CombatState::Hit { .. } => CombatStateKind::Hit,
            CombatState::BlockHit { .. } => CombatStateKind::BlockHit,
            CombatState::Dead => CombatStateKind::Dead,
        }
    }

    pub fn is_dead(&self) -> bool {
        matches!(self, CombatState::Dead)
    }

    /// Remaining stun, 0 outside Hit/BlockHit.
    pub fn stun_remaining(&self) -> f32 {
        match self {
            CombatState::Hit { remaining } | CombatState::BlockHit { remaining } => *remaining,
            _ => 0.0,
        }
    }

    /// Guard absorbs the whole hit in these states.
    pub fn is_guarded(&self) -> bool {
        matches!(
            self,
            CombatState::Blocking | CombatState::Hit { .. } | CombatState::BlockHit { .. }
        )
    }

    /// Attack whose hit-volume should currently be live.
    pub fn live_attack(&self) -> Option<&AttackDefinition> {
        match self {
            CombatState::Attacking { attack, active } if *active > 0.0 => Some(attack),
            _ => None,
        }
    }
}

/// Flat state tag for animation/UI collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum CombatStateKind {
    Idle,
    Approaching,
    Attacking,
    Blocking,
    Hit,
    BlockHit,
    Dead,
}

impl CombatStateKind {
    /// Integer the animation state machine is keyed on.
    pub fn as_index(&self) -> u8 {
        match self {
            CombatStateKind::Idle => 0,
            CombatStateKind::Approaching => 1,
            CombatStateKind::Attacking => 2,
            CombatStateKind::Blocking => 3,
            CombatStateKind::Hit => 4,
            CombatStateKind::BlockHit => 5,
            CombatStateKind::Dead => 6,
        }
    }
}

/// Cooldown bookkeeping that survives state changes.
///
/// `elapsed` растёт только в Blocking; сбрасывается на старте атаки.
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AttackCadence {
    /// Blocking time accumulated since the last attack (seconds)
    pub elapsed: f32,
    /// Last selected attack
    pub current: Option<AttackDefinition>,
}

impl AttackCadence {
    /// Cooldown gate for the next attack: the last selected attack's cooldown,
    /// or the first catalog entry's before anything was selected.
    pub fn cooldown_threshold(&self, catalog: &AttackCatalog) -> f32 {
        match &self.current {
            Some(attack) => attack.cooldown,
            None => catalog.first().map_or(0.0, |attack| attack.cooldown),
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.current = None;
    }
}

/// Approach tuning.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Pursuit {
    /// Distance at which the agent stops and fights (meters)
    pub stopping_distance: f32,
    /// Meters per second
    pub approach_speed: f32,
}

impl Default for Pursuit {
    fn default() -> Self {
        Self {
            stopping_distance: 5.0,
            approach_speed: 10.0,
        }
    }
}

/// Stun durations applied by hit resolution.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HitReaction {
    pub hit_stun: f32,
    pub block_hit_stun: f32,
}

impl Default for HitReaction {
    fn default() -> Self {
        Self {
            hit_stun: 1.1,
            block_hit_stun: 0.5,
        }
    }
}

/// Non-owning reference to the agent this combatant fights.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct CombatTarget(pub Entity);

/// Monotonic attack counter; a hit-volume belongs to exactly one serial.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct AttackSerial(pub u32);

impl AttackSerial {
    pub fn bump(&mut self) -> u32 {
        self.0 = self.0.wrapping_add(1);
        self.0
    }
}
