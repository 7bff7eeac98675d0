//! Volume overlap → CollisionEvent
//!
//! Headless backend: sphere test каждого hit-volume против каждого
//! hurt-volume. `ContactSet` помнит пары прошлого тика, наружу уходят
//! только фронты (Started/Stopped): тот же протокол что у Rapier.
//!
//! Rapier backend: volumes получают sensor colliders, события шлёт Rapier.

use std::collections::BTreeSet;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use bevy_rapier3d::rapier::prelude::CollisionEventFlags;
use crate::combat::{spheres_overlap, HitVolume, HurtVolume};

/// Pairs (hit-volume, hurt entity) overlapping as of the last detection pass.
#[derive(Resource, Debug, Default)]
pub struct ContactSet {
    pairs: BTreeSet<(Entity, Entity)>,
}

impl ContactSet {
    pub fn contains(&self, volume: Entity, hurt: Entity) -> bool {
        self.pairs.contains(&(volume, hurt))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Replaces the contact set, returning (began, ended) pairs in sorted order.
    pub fn update(&mut self, current: BTreeSet<(Entity, Entity)>) -> (Vec<(Entity, Entity)>, Vec<(Entity, Entity)>) {
        let began = current.difference(&self.pairs).copied().collect();
        let ended = self.pairs.difference(&current).copied().collect();
        self.pairs = current;
        (began, ended)
    }
}

/// Система: headless overlap detection (Collide phase)
pub fn detect_volume_overlaps(
    volumes: Query<(Entity, &HitVolume, &Transform)>,
    hurt: Query<(Entity, &HurtVolume, &Transform)>,
    mut contacts: ResMut<ContactSet>,
    mut collision_events: EventWriter<CollisionEvent>,
) {
    let mut current = BTreeSet::new();

    for (volume_entity, volume, volume_transform) in volumes.iter() {
        for (hurt_entity, hurt_volume, hurt_transform) in hurt.iter() {
            if hurt_entity == volume.owner {
                continue;
            }
            if spheres_overlap(
                volume_transform.translation,
                volume.radius,
                hurt_transform.translation,
                hurt_volume.radius,
            ) {
                current.insert((volume_entity, hurt_entity));
            }
        }
    }

    let (began, ended) = contacts.update(current);

    for (volume_entity, hurt_entity) in began {
        collision_events.write(CollisionEvent::Started(volume_entity, hurt_entity, CollisionEventFlags::SENSOR));
    }
    for (volume_entity, hurt_entity) in ended {
        collision_events.write(CollisionEvent::Stopped(volume_entity, hurt_entity, CollisionEventFlags::SENSOR));
    }
}

/// Система: sensor colliders для Rapier backend
///
/// Колайдеры без RigidBody считаются fixed, поэтому ActiveCollisionTypes::all()
/// (иначе fixed-fixed пары Rapier не проверяет).
pub fn attach_volume_colliders(
    mut commands: Commands,
    volumes: Query<(Entity, &HitVolume), Without<Collider>>,
    hurt: Query<(Entity, &HurtVolume), Without<Collider>>,
) {
    for (entity, volume) in volumes.iter() {
        commands.entity(entity).insert((
            Collider::ball(volume.radius),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            ActiveCollisionTypes::all(),
        ));
    }

    for (entity, hurt_volume) in hurt.iter() {
        commands
            .entity(entity)
            .insert((Collider::ball(hurt_volume.radius), ActiveCollisionTypes::all()));
    }
}
