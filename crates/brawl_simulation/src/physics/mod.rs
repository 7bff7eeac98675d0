//! Physics simulation module
//!
//! Kinematic locomotion и overlap detection hit/hurt volumes.
//! Коллизии репортятся как `bevy_rapier3d::CollisionEvent` при любом backend.

use bevy::prelude::*;
use bevy::transform::TransformPlugin;
use bevy_rapier3d::prelude::{NoUserData, RapierPhysicsPlugin};
use crate::components::{Facing, Locomotion};
use crate::SimulationSet;

pub mod movement;
pub mod overlap;

// Re-export основных типов
pub use movement::apply_locomotion;
pub use overlap::{attach_volume_colliders, detect_volume_overlaps, ContactSet};

/// Who turns volume overlaps into `CollisionEvent`s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionBackend {
    /// Sphere tests in FixedUpdate; events are resolved the same tick.
    #[default]
    Headless,
    /// Rapier sensor colliders (FixedPostUpdate); events are resolved the next tick.
    Rapier,
}

/// Physics Plugin
///
/// - Move: apply_locomotion
/// - Collide: detect_volume_overlaps (Headless) / attach_volume_colliders (Rapier)
#[derive(Debug, Clone, Copy, Default)]
pub struct PhysicsPlugin {
    pub backend: CollisionBackend,
}

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Locomotion>().register_type::<Facing>();

        app.add_systems(FixedUpdate, apply_locomotion.in_set(SimulationSet::Move));

        match self.backend {
            CollisionBackend::Headless => {
                app.init_resource::<ContactSet>()
                    .add_systems(FixedUpdate, detect_volume_overlaps.in_set(SimulationSet::Collide));
            }
            CollisionBackend::Rapier => {
                if !app.is_plugin_added::<TransformPlugin>() {
                    app.add_plugins(TransformPlugin);
                }
                app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())
                    .add_systems(FixedUpdate, attach_volume_colliders.in_set(SimulationSet::Collide));
            }
        }
    }
}
