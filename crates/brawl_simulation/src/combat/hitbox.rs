//! Hit/hurt volumes
//!
//! Архитектура:
//! - HurtVolume висит на самом акторе (сфера вокруг позиции)
//! - HitVolume: отдельная entity, спавнится на AttackStarted
//!   перед атакующим (facing × reach) и живёт пока открыто attack window
//! - Overlap → CollisionEvent (headless детектор или Rapier) → hit resolution

use bevy::prelude::*;
use crate::ai::{AttackSerial, CombatState};
use crate::combat::AttackStarted;
use crate::components::Facing;

/// Region an attacking agent threatens while its attack window is open.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HitVolume {
    /// Кто атакует (self-hit и friendly fire отсекаются по нему)
    pub owner: Entity,
    pub damage: f32,
    /// Радиус сферы (метры)
    pub radius: f32,
    /// Attack this volume belongs to (see [`AttackSerial`])
    pub serial: u32,
}

/// Region of an agent that receives hits.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HurtVolume {
    pub radius: f32,
}

impl Default for HurtVolume {
    fn default() -> Self {
        Self { radius: 0.5 }
    }
}

/// Where an agent's hit-volume is placed relative to it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Reach {
    /// Offset along facing (meters)
    pub distance: f32,
    pub hit_radius: f32,
}

impl Default for Reach {
    fn default() -> Self {
        Self {
            distance: 4.0,
            hit_radius: 1.0,
        }
    }
}

impl Reach {
    pub fn volume_position(&self, owner: Vec3, facing: &Facing) -> Vec3 {
        owner + facing.0 * self.distance
    }
}

/// True when two spheres overlap (touching counts).
pub fn spheres_overlap(a: Vec3, radius_a: f32, b: Vec3, radius_b: f32) -> bool {
    a.distance_squared(b) <= (radius_a + radius_b).powi(2)
}

/// Система: spawn hit-volume на AttackStarted
pub fn spawn_hit_volumes(
    mut commands: Commands,
    mut events: EventReader<AttackStarted>,
    owners: Query<(&Transform, &Facing, &Reach)>,
) {
    for event in events.read() {
        // Нулевое окно: volume так и не станет live
        if event.attack.active_duration <= 0.0 {
            continue;
        }

        let Ok((transform, facing, reach)) = owners.get(event.attacker) else {
            crate::logger::log_warning(&format!(
                "AttackStarted: attacker {:?} has no Transform/Facing/Reach",
                event.attacker
            ));
            continue;
        };

        commands.spawn((
            HitVolume {
                owner: event.attacker,
                damage: event.damage,
                radius: reach.hit_radius,
                serial: event.serial,
            },
            Transform::from_translation(reach.volume_position(transform.translation, facing)),
        ));
    }
}

/// Система: hit-volume следует за владельцем, despawn когда окно закрылось
///
/// Окно закрыто если: атака истекла, агента оглушили/убили, он ушёл из
/// range, владелец пропал или уже началась следующая атака (serial).
#[allow(clippy::type_complexity)]
pub fn sync_hit_volumes(
    mut commands: Commands,
    mut volumes: Query<(Entity, &HitVolume, &mut Transform)>,
    owners: Query<(&Transform, &Facing, &Reach, &CombatState, &AttackSerial), Without<HitVolume>>,
) {
    for (volume_entity, volume, mut volume_transform) in volumes.iter_mut() {
        let live = owners
            .get(volume.owner)
            .ok()
            .filter(|(_, _, _, state, serial)| state.live_attack().is_some() && serial.0 == volume.serial);

        match live {
            Some((owner_transform, facing, reach, _, _)) => {
                volume_transform.translation = reach.volume_position(owner_transform.translation, facing);
            }
            None => {
                commands.entity(volume_entity).despawn();
            }
        }
    }
}
