//! Attack catalog: named attack definitions an agent picks from.
//!
//! Каталог задаётся на этапе конфигурации и в рантайме не меняется.
//! Выбор атаки равномерный, RNG передаётся снаружи (детерминизм реплея).

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::error::{CombatError, CombatResult};

/// One attack an agent can perform.
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct AttackDefinition {
    pub name: String,
    /// Damage applied to an unguarded defender
    pub damage: f32,
    /// Seconds the hit-volume stays live
    pub active_duration: f32,
    /// Blocking time required before the next attack (seconds)
    pub cooldown: f32,
}

impl AttackDefinition {
    pub fn new(name: impl Into<String>, damage: f32, active_duration: f32, cooldown: f32) -> Self {
        Self {
            name: name.into(),
            damage,
            active_duration,
            cooldown,
        }
    }

    pub(crate) fn validate(&self) -> CombatResult<()> {
        let fields = [
            ("damage", self.damage),
            ("active_duration", self.active_duration),
            ("cooldown", self.cooldown),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(CombatError::InvalidConfig(format!(
                    "attack '{}': {} must be finite and >= 0 (got {})",
                    self.name, field, value
                )));
            }
        }
        Ok(())
    }
}

/// Immutable list of attacks for one agent.
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AttackCatalog {
    attacks: Vec<AttackDefinition>,
}

impl AttackCatalog {
    pub fn new(attacks: Vec<AttackDefinition>) -> Self {
        Self { attacks }
    }

    pub fn len(&self) -> usize {
        self.attacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty()
    }

    pub fn first(&self) -> Option<&AttackDefinition> {
        self.attacks.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttackDefinition> {
        self.attacks.iter()
    }

    /// Uniform pick over `[0, len)`. No repeat avoidance.
    pub fn select_random<R: Rng + ?Sized>(&self, rng: &mut R) -> CombatResult<&AttackDefinition> {
        if self.attacks.is_empty() {
            return Err(CombatError::EmptyCatalog);
        }
        let index = rng.gen_range(0..self.attacks.len());
        Ok(&self.attacks[index])
    }
}
