//! Movement компоненты: locomotion delta и facing

use bevy::prelude::*;

/// Per-tick movement delta produced by a state machine.
///
/// FSM пишет, `apply_locomotion` прибавляет к Transform и обнуляет.
/// Ненулевой только в Approaching (AI) или при движении игрока.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Locomotion {
    pub delta: Vec3,
}

/// Direction the agent's hit-volume is projected along (normalized).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Facing(pub Vec3);

impl Default for Facing {
    fn default() -> Self {
        Self(Vec3::X)
    }
}

impl Facing {
    /// Turns toward `direction`; zero-length input keeps the old facing.
    pub fn turn_toward(&mut self, direction: Vec3) {
        let normalized = direction.normalize_or_zero();
        if normalized != Vec3::ZERO {
            self.0 = normalized;
        }
    }
}
