//! Combat events: what the core tells its collaborators.
//!
//! Animation/UI слушают `CombatStateChanged`, match flow: `EntityDied`
//! и `CombatFault`. Обратно в core идут только `AgentSpawned`,
//! `RespawnRequested` и `SeedStats`.

use bevy::prelude::*;
use crate::ai::CombatStateKind;
use crate::combat::AttackDefinition;
use crate::error::CombatError;

/// Match flow → core: bind `agent`'s target once after instantiation.
#[derive(Event, Debug, Clone)]
pub struct AgentSpawned {
    pub agent: Entity,
    pub target: Entity,
}

/// An attack window opened; a hit-volume is spawned for it.
#[derive(Event, Debug, Clone)]
pub struct AttackStarted {
    pub attacker: Entity,
    pub attack: AttackDefinition,
    /// Damage the hit-volume carries
    pub damage: f32,
    pub serial: u32,
}

/// Every observable state transition.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CombatStateChanged {
    pub entity: Entity,
    pub from: CombatStateKind,
    pub to: CombatStateKind,
}

/// Unguarded hit landed.
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: f32,
    pub target_died: bool,
}

/// Hit landed on a guarding defender; no damage applied.
#[derive(Event, Debug, Clone)]
pub struct HitGuarded {
    pub attacker: Entity,
    pub target: Entity,
}

/// Entity died (Alive → Dead). `killer` is `None` for deaths not caused by a hit.
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Precondition violation surfaced from a combat system.
#[derive(Event, Debug, Clone)]
pub struct CombatFault {
    pub entity: Entity,
    pub error: CombatError,
}

/// Respawn-with-penalty: rescale vitality by `multiplier` and reset to Idle.
#[derive(Event, Debug, Clone)]
pub struct RespawnRequested {
    pub agent: Entity,
    pub multiplier: f32,
}

/// Seed `agent`'s vitality from the persisted stats held by `source`.
#[derive(Event, Debug, Clone)]
pub struct SeedStats {
    pub agent: Entity,
    pub source: Entity,
}
