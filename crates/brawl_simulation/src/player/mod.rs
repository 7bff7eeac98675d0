//! Player-controlled combatant
//!
//! Input (внешний слой) → `PlayerIntent` → `tick_player` → тот же
//! CombatState / hit-volume pipeline что и у AI.

use bevy::prelude::*;
use crate::SimulationSet;

pub mod player;
pub mod systems;

pub use player::{Player, PlayerCadence, PlayerIntent, PlayerTuning};
pub use systems::{step_player, tick_player};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Player>()
            .register_type::<PlayerIntent>()
            .register_type::<PlayerTuning>()
            .register_type::<PlayerCadence>();

        app.add_systems(
            FixedUpdate,
            tick_player
                .in_set(SimulationSet::Decide)
                .after(crate::ai::systems::tick_combatants),
        );
    }
}
