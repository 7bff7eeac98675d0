//! Player control components
//!
//! Отмечает entity которым управляет игрок через input (в отличие от AI).

use bevy::prelude::*;

/// Marker component для player-controlled entity
///
/// Акторы БЕЗ этого компонента управляются AI systems.
/// Акторы С этим компонентом читают `PlayerIntent`.
///
/// # Архитектурная заметка
/// - AI FSM требует `AttackCatalog`/`Pursuit`: у игрока их нет
/// - Player systems используют `With<Player>` filter
/// - Хиты по игроку идут через тот же `apply_hit` что и у AI
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Input for one tick, written by the host's input layer.
///
/// Для headless тестов: mock input через этот компонент.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerIntent {
    /// Направление движения (любой длины, нормализуется при шаге)
    pub move_direction: Vec3,
    /// Guard held
    pub guard: bool,
    /// Attack pressed
    pub attack: bool,
}

/// Player tuning.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerTuning {
    /// Meters per second
    pub move_speed: f32,
    /// Minimum seconds between attack starts
    pub attack_cooldown: f32,
    /// Hit-volume lifetime per attack
    pub attack_active_duration: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            attack_cooldown: 0.8,
            attack_active_duration: 0.3,
        }
    }
}

/// Seconds since the last attack started; `None` until the first one.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerCadence {
    pub since_attack: Option<f32>,
}

impl PlayerCadence {
    pub fn ready(&self, cooldown: f32) -> bool {
        self.since_attack.map_or(true, |elapsed| elapsed >= cooldown)
    }
}
