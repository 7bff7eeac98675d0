//! Combat system module
//!
//! ECS ответственность:
//! - Attack catalog (данные атак, random selection)
//! - Hit-volumes: spawn на AttackStarted, sync/despawn по attack window
//! - Hit resolution: CollisionEvent::Started → ApplyHit на защитнике
//! - Events: DamageDealt, HitGuarded, EntityDied, CombatStateChanged
//!
//! Overlap detection: `physics` (headless детектор или Rapier).

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;
use crate::SimulationSet;

pub mod catalog;
pub mod damage;
pub mod events;
pub mod hitbox;


// Re-export основных типов
pub use catalog::{AttackCatalog, AttackDefinition};
pub use damage::{resolve_hit, resolve_hits};
pub use events::*;
pub use hitbox::{spawn_hit_volumes, spheres_overlap, sync_hit_volumes, HitVolume, HurtVolume, Reach};

/// Combat Plugin
///
/// Порядок выполнения (FixedUpdate):
/// 1. Volumes: spawn_hit_volumes → sync_hit_volumes
/// 2. (physics) Collide: overlap → CollisionEvent
/// 3. Resolve: resolve_hits
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<AgentSpawned>()
            .add_event::<AttackStarted>()
            .add_event::<CombatStateChanged>()
            .add_event::<DamageDealt>()
            .add_event::<HitGuarded>()
            .add_event::<EntityDied>()
            .add_event::<CombatFault>()
            .add_event::<RespawnRequested>()
            .add_event::<SeedStats>()
            .add_event::<CollisionEvent>();

        app.register_type::<AttackCatalog>()
            .register_type::<AttackDefinition>()
            .register_type::<HitVolume>()
            .register_type::<HurtVolume>()
            .register_type::<Reach>();

        app.add_systems(
            FixedUpdate,
            (spawn_hit_volumes, sync_hit_volumes)
                .chain()
                .in_set(SimulationSet::Volumes),
        );

        app.add_systems(FixedUpdate, resolve_hits.in_set(SimulationSet::Resolve));
    }
}
