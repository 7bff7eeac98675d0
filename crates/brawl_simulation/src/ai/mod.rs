//! AI decision-making module
//!
//! Combat FSM для автономных агентов: подход к цели по прямой,
//! attack cadence, stun, смерть. Логика переходов: `machine`,
//! ECS-обвязка: `systems`.

use bevy::prelude::*;
use crate::SimulationSet;

pub mod components;
pub mod machine;
pub mod systems;

// Re-export основных типов
pub use components::*;
pub use machine::{HitOutcome, TargetView, TickContext, TickOutcome};

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate.
/// - Bind: seed stats, respawn, AgentSpawned → CombatTarget
/// - Decide: tick_combatants (state + locomotion + AttackStarted)
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CombatState>()
            .register_type::<AttackCadence>()
            .register_type::<Pursuit>()
            .register_type::<HitReaction>()
            .register_type::<CombatTarget>()
            .register_type::<AttackSerial>();

        app.init_resource::<systems::FaultLatch>();

        app.add_systems(
            FixedUpdate,
            (
                systems::handle_seed_stats,
                systems::handle_respawn_requests,
                systems::bind_spawned_targets,
            )
                .chain()
                .in_set(SimulationSet::Bind),
        );

        app.add_systems(FixedUpdate, systems::tick_combatants.in_set(SimulationSet::Decide));
    }
}
