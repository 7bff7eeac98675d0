//! Read-only agent status for external collaborators (HUD, match flow).

use bevy::prelude::*;
use crate::ai::{CombatState, CombatStateKind};
use crate::components::Vitality;

/// Snapshot of what the outside world may poll about an agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentStatus {
    /// health / max health, in [0, 1]
    pub health_fraction: f32,
    pub state: CombatStateKind,
    pub alive: bool,
}

impl AgentStatus {
    pub fn new(vitality: &Vitality, state: &CombatState) -> Self {
        Self {
            health_fraction: vitality.health_fraction(),
            state: state.kind(),
            alive: vitality.is_alive(),
        }
    }
}

/// `None` if `entity` is not a combatant (or was despawned).
pub fn agent_status(world: &World, entity: Entity) -> Option<AgentStatus> {
    let vitality = world.get::<Vitality>(entity)?;
    let state = world.get::<CombatState>(entity)?;
    Some(AgentStatus::new(vitality, state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reflects_components() {
        let mut world = World::new();
        let mut vitality = Vitality::new(100.0, 10.0);
        vitality.apply_damage(25.0).unwrap();
        let entity = world.spawn((vitality, CombatState::Blocking)).id();

        let status = agent_status(&world, entity).unwrap();
        assert_eq!(status.health_fraction, 0.75);
        assert_eq!(status.state, CombatStateKind::Blocking);
        assert!(status.alive);

        let bare = world.spawn_empty().id();
        assert!(agent_status(&world, bare).is_none());
    }
}
