//! Kinematic locomotion
//!
//! Архитектура:
//! - FSM (AI / player) пишет `Locomotion.delta`: готовое смещение за тик
//! - Здесь только интеграция delta → Transform, без сил и гравитации
//!
//! Детерминизм: delta уже посчитана от fixed timestep.

use bevy::prelude::*;
use crate::components::Locomotion;

/// Система интеграции locomotion → Transform
///
/// Delta поглощается: следующий тик FSM пишет новую.
pub fn apply_locomotion(mut query: Query<(&mut Locomotion, &mut Transform)>) {
    for (mut locomotion, mut transform) in query.iter_mut() {
        if locomotion.delta == Vec3::ZERO {
            continue;
        }
        transform.translation += locomotion.delta;
        locomotion.delta = Vec3::ZERO;
    }
}
