//! Combat error types.
//!
//! Все ошибки: нарушения предусловий (конфигурация, контракт на урон),
//! а не временные сбои: ретраев нигде нет.

use thiserror::Error;

/// Errors surfaced by the combat core.
#[derive(Debug, Clone, Error)]
pub enum CombatError {
    /// Attack selection was asked for on an agent without any attacks.
    #[error("attack catalog is empty")]
    EmptyCatalog,

    /// Agent ticked without a bound (or still existing) target.
    #[error("combatant has no bound target")]
    MissingTarget,

    /// Damage must be finite and non-negative.
    #[error("invalid damage amount: {0}")]
    InvalidDamage(f32),

    /// Rescale multiplier must be finite and strictly positive.
    #[error("invalid rescale multiplier: {0}")]
    InvalidMultiplier(f32),

    /// Stats may only be seeded onto a living agent; `Dead` leaves via respawn.
    #[error("cannot seed stats onto a dead agent")]
    SeedDeadAgent,

    #[error("invalid combat config: {0}")]
    InvalidConfig(String),

    #[error("failed to parse combat config: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),
}

pub type CombatResult<T> = Result<T, CombatError>;
