//! Spawn helpers: config presets → component bundles.
//!
//! Цель не привязывается при спавне: match flow шлёт `AgentSpawned`
//! (см. `notify_spawned`), и `bind_spawned_targets` ставит `CombatTarget`.

use bevy::prelude::*;
use crate::ai::{AttackCadence, AttackSerial, CombatState};
use crate::combat::AgentSpawned;
use crate::components::{Actor, Facing, Locomotion};
use crate::config::{CombatantConfig, PlayerConfig};
use crate::player::{Player, PlayerCadence, PlayerIntent};

/// AI combatant bundle.
pub fn combatant_bundle(config: &CombatantConfig, position: Vec3, faction_id: u64) -> impl Bundle {
    (
        Actor { faction_id },
        config.vitality(),
        Transform::from_translation(position),
        (
            CombatState::default(),
            AttackCadence::default(),
            AttackSerial::default(),
            config.catalog(),
            config.pursuit(),
            config.hit_reaction(),
        ),
        (
            Locomotion::default(),
            Facing::default(),
            config.reach(),
            config.hurt_volume(),
        ),
    )
}

/// Player-controlled combatant bundle.
pub fn player_bundle(config: &PlayerConfig, position: Vec3, faction_id: u64) -> impl Bundle {
    (
        Player,
        Actor { faction_id },
        config.vitality(),
        Transform::from_translation(position),
        (
            CombatState::default(),
            PlayerIntent::default(),
            PlayerCadence::default(),
            config.tuning(),
            AttackSerial::default(),
            config.hit_reaction(),
        ),
        (
            Locomotion::default(),
            Facing::default(),
            config.reach(),
            config.hurt_volume(),
        ),
    )
}

pub fn spawn_combatant(world: &mut World, config: &CombatantConfig, position: Vec3, faction_id: u64) -> Entity {
    let entity = world.spawn(combatant_bundle(config, position, faction_id)).id();
    crate::logger::log(&format!("✅ spawned combatant {:?} at {:?} (faction {})", entity, position, faction_id));
    entity
}

pub fn spawn_player(world: &mut World, config: &PlayerConfig, position: Vec3, faction_id: u64) -> Entity {
    let entity = world.spawn(player_bundle(config, position, faction_id)).id();
    crate::logger::log(&format!("✅ spawned player {:?} at {:?}", entity, position));
    entity
}

/// NotifySpawned: bind `agent`'s target on the next tick.
pub fn notify_spawned(world: &mut World, agent: Entity, target: Entity) {
    world.send_event(AgentSpawned { agent, target });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{AttackCatalog, HurtVolume};
    use crate::components::Vitality;

    #[test]
    fn test_combatant_bundle_carries_config() {
        let mut world = World::new();
        let config = CombatantConfig {
            max_health: 80.0,
            hurt_radius: 0.75,
            ..Default::default()
        };

        let entity = spawn_combatant(&mut world, &config, Vec3::new(1.0, 0.0, 2.0), 3);

        assert_eq!(world.get::<Vitality>(entity).unwrap().max_health(), 80.0);
        assert_eq!(world.get::<AttackCatalog>(entity).unwrap().len(), 3);
        assert_eq!(world.get::<HurtVolume>(entity).unwrap().radius, 0.75);
        assert_eq!(world.get::<Actor>(entity).unwrap().faction_id, 3);
        assert_eq!(world.get::<CombatState>(entity), Some(&CombatState::Idle));
        assert_eq!(
            world.get::<Transform>(entity).unwrap().translation,
            Vec3::new(1.0, 0.0, 2.0)
        );
    }

    #[test]
    fn test_player_bundle_has_no_ai_components() {
        let mut world = World::new();
        let entity = spawn_player(&mut world, &PlayerConfig::default(), Vec3::ZERO, 0);

        assert!(world.get::<Player>(entity).is_some());
        assert!(world.get::<AttackCatalog>(entity).is_none());
        assert!(world.get::<AttackCadence>(entity).is_none());
    }
}
