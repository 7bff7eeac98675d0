//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: фракция и vitality (health, max health, attack power)
//! - movement: locomotion delta и facing

pub mod actor;
pub mod movement;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
