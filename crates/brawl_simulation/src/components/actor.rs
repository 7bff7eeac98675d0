//! Базовые компоненты акторов: Actor, Vitality

use bevy::prelude::*;
use crate::error::{CombatError, CombatResult};

/// Актор (враг или игрок): базовый компонент для живых существ.
///
/// Хиты между акторами одной фракции игнорируются.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Vitality, Transform)]
pub struct Actor {
    pub faction_id: u64,
}

/// Alive/dead status. `Dead` is entered once and only left through
/// [`Vitality::rescale`] or [`Vitality::copy_from`] (respawn flows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum LifeState {
    #[default]
    Alive,
    Dead,
}

/// Result of a single [`Vitality::apply_damage`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageApplied {
    /// Health actually removed (after clamping at 0).
    pub dealt: f32,
    /// True only on the call that flipped Alive → Dead.
    pub killed: bool,
}

/// Health, max health and attack power of an agent.
///
/// Инвариант: 0 ≤ health() ≤ max_health(), max_health > 0.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Vitality {
    max_health: f32,
    current_health: f32,
    attack_power: f32,
    life: LifeState,
}

impl Default for Vitality {
    fn default() -> Self {
        Self::new(100.0, 10.0)
    }
}

impl Vitality {
    pub fn new(max_health: f32, attack_power: f32) -> Self {
        Self {
            max_health,
            current_health: max_health,
            attack_power,
            life: LifeState::Alive,
        }
    }

    /// Current health, clamped to `[0, max_health]`.
    pub fn health(&self) -> f32 {
        self.current_health.min(self.max_health).max(0.0)
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn attack_power(&self) -> f32 {
        self.attack_power
    }

    pub fn life_state(&self) -> LifeState {
        self.life
    }

    pub fn is_alive(&self) -> bool {
        self.life == LifeState::Alive
    }

    /// Health bar value in `[0, 1]`.
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health() / self.max_health).clamp(0.0, 1.0)
    }

    /// Subtracts `amount`. Negative or non-finite amounts are rejected and
    /// leave the model untouched.
    ///
    /// Damage after death keeps health at 0 and reports `killed: false`.
    pub fn apply_damage(&mut self, amount: f32) -> CombatResult<DamageApplied> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CombatError::InvalidDamage(amount));
        }

        let before = self.health();
        self.current_health = (self.current_health - amount).max(0.0);
        let dealt = before - self.health();

        let killed = self.current_health <= 0.0 && self.life == LifeState::Alive;
        if killed {
            self.life = LifeState::Dead;
        }

        Ok(DamageApplied { dealt, killed })
    }

    /// Respawn-with-penalty: scales max health and attack power, refills
    /// health and revives.
    pub fn rescale(&mut self, multiplier: f32) -> CombatResult<()> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(CombatError::InvalidMultiplier(multiplier));
        }

        self.max_health *= multiplier;
        self.current_health = self.max_health;
        self.attack_power *= multiplier;
        self.life = LifeState::Alive;
        Ok(())
    }

    /// Seeds this agent from persisted progression stats.
    pub fn copy_from(&mut self, source: &Vitality) {
        self.max_health = source.max_health;
        self.current_health = self.max_health;
        self.attack_power = source.attack_power;
        self.life = LifeState::Alive;
    }
}
