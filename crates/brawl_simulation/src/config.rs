//! Combat tuning (RON).
//!
//! Все числа баланса живут здесь; компоненты собираются из пресетов
//! в `spawn`. Пропущенные в RON поля берут значения по умолчанию.
//!
//! ```ron
//! (
//!     seed: 7,
//!     enemy: (
//!         stopping_distance: 4.0,
//!         attacks: [(name: "jab", damage: 10.0, active_duration: 0.4, cooldown: 1.5)],
//!     ),
//! )
//! ```

use serde::{Deserialize, Serialize};
use crate::ai::{HitReaction, Pursuit};
use crate::combat::{AttackCatalog, AttackDefinition, HurtVolume, Reach};
use crate::components::Vitality;
use crate::error::{CombatError, CombatResult};
use crate::player::PlayerTuning;

/// Top-level simulation tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Fixed tick rate (Hz)
    pub tick_hz: f64,
    /// Seed for attack selection
    pub seed: u64,
    pub enemy: CombatantConfig,
    pub player: PlayerConfig,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            seed: 42,
            enemy: CombatantConfig::default(),
            player: PlayerConfig::default(),
        }
    }
}

impl CombatConfig {
    /// Parses and validates a RON document.
    pub fn from_ron_str(source: &str) -> CombatResult<Self> {
        let config: CombatConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CombatResult<()> {
        if !self.tick_hz.is_finite() || self.tick_hz <= 0.0 {
            return Err(CombatError::InvalidConfig(format!(
                "tick_hz must be positive (got {})",
                self.tick_hz
            )));
        }
        self.enemy.validate()?;
        self.player.validate()
    }
}

/// Tuning of an AI-driven combatant archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatantConfig {
    pub max_health: f32,
    pub attack_power: f32,
    pub stopping_distance: f32,
    pub approach_speed: f32,
    pub hit_stun: f32,
    pub block_hit_stun: f32,
    /// Hit-volume offset along facing
    pub reach: f32,
    pub hit_radius: f32,
    pub hurt_radius: f32,
    pub attacks: Vec<AttackDefinition>,
}

impl Default for CombatantConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            attack_power: 10.0,
            stopping_distance: 5.0,
            approach_speed: 10.0,
            hit_stun: 1.1,
            block_hit_stun: 0.5,
            reach: 4.0,
            hit_radius: 1.0,
            hurt_radius: 0.5,
            attacks: vec![
                AttackDefinition::new("jab", 10.0, 0.4, 1.5),
                AttackDefinition::new("hook", 15.0, 0.6, 2.0),
                AttackDefinition::new("uppercut", 25.0, 1.0, 2.5),
            ],
        }
    }
}

impl CombatantConfig {
    pub fn validate(&self) -> CombatResult<()> {
        check_positive("enemy.max_health", self.max_health)?;
        check_non_negative("enemy.attack_power", self.attack_power)?;
        check_non_negative("enemy.stopping_distance", self.stopping_distance)?;
        check_non_negative("enemy.approach_speed", self.approach_speed)?;
        check_non_negative("enemy.hit_stun", self.hit_stun)?;
        check_non_negative("enemy.block_hit_stun", self.block_hit_stun)?;
        check_non_negative("enemy.reach", self.reach)?;
        check_non_negative("enemy.hit_radius", self.hit_radius)?;
        check_non_negative("enemy.hurt_radius", self.hurt_radius)?;

        if self.attacks.is_empty() {
            return Err(CombatError::EmptyCatalog);
        }
        self.attacks.iter().try_for_each(AttackDefinition::validate)
    }

    pub fn vitality(&self) -> Vitality {
        Vitality::new(self.max_health, self.attack_power)
    }

    pub fn catalog(&self) -> AttackCatalog {
        AttackCatalog::new(self.attacks.clone())
    }

    pub fn pursuit(&self) -> Pursuit {
        Pursuit {
            stopping_distance: self.stopping_distance,
            approach_speed: self.approach_speed,
        }
    }

    pub fn hit_reaction(&self) -> HitReaction {
        HitReaction {
            hit_stun: self.hit_stun,
            block_hit_stun: self.block_hit_stun,
        }
    }

    pub fn reach(&self) -> Reach {
        Reach {
            distance: self.reach,
            hit_radius: self.hit_radius,
        }
    }

    pub fn hurt_volume(&self) -> HurtVolume {
        HurtVolume {
            radius: self.hurt_radius,
        }
    }
}

/// Tuning of the player-controlled combatant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_health: f32,
    pub attack_power: f32,
    pub move_speed: f32,
    pub attack_cooldown: f32,
    pub attack_active_duration: f32,
    pub hit_stun: f32,
    pub block_hit_stun: f32,
    pub reach: f32,
    pub hit_radius: f32,
    pub hurt_radius: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            attack_power: 10.0,
            move_speed: 5.0,
            attack_cooldown: 0.8,
            attack_active_duration: 0.3,
            hit_stun: 0.5,
            block_hit_stun: 0.3,
            reach: 4.0,
            hit_radius: 1.0,
            hurt_radius: 0.5,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> CombatResult<()> {
        check_positive("player.max_health", self.max_health)?;
        check_non_negative("player.attack_power", self.attack_power)?;
        check_non_negative("player.move_speed", self.move_speed)?;
        check_non_negative("player.attack_cooldown", self.attack_cooldown)?;
        check_non_negative("player.attack_active_duration", self.attack_active_duration)?;
        check_non_negative("player.hit_stun", self.hit_stun)?;
        check_non_negative("player.block_hit_stun", self.block_hit_stun)?;
        check_non_negative("player.reach", self.reach)?;
        check_non_negative("player.hit_radius", self.hit_radius)?;
        check_non_negative("player.hurt_radius", self.hurt_radius)
    }

    pub fn vitality(&self) -> Vitality {
        Vitality::new(self.max_health, self.attack_power)
    }

    pub fn tuning(&self) -> PlayerTuning {
        PlayerTuning {
            move_speed: self.move_speed,
            attack_cooldown: self.attack_cooldown,
            attack_active_duration: self.attack_active_duration,
        }
    }

    pub fn hit_reaction(&self) -> HitReaction {
        HitReaction {
            hit_stun: self.hit_stun,
            block_hit_stun: self.block_hit_stun,
        }
    }

    pub fn reach(&self) -> Reach {
        Reach {
            distance: self.reach,
            hit_radius: self.hit_radius,
        }
    }

    pub fn hurt_volume(&self) -> HurtVolume {
        HurtVolume {
            radius: self.hurt_radius,
        }
    }
}

fn check_positive(field: &str, value: f32) -> CombatResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CombatError::InvalidConfig(format!("{} must be > 0 (got {})", field, value)))
    }
}

fn check_non_negative(field: &str, value: f32) -> CombatResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CombatError::InvalidConfig(format!("{} must be >= 0 (got {})", field, value)))
    }
}
