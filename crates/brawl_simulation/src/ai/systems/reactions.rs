//! Respawn/progression reactions (единственный выход из Dead).

use bevy::prelude::*;
use crate::ai::{AttackCadence, CombatState};
use crate::combat::{CombatFault, CombatStateChanged, RespawnRequested, SeedStats};
use crate::components::{Locomotion, Vitality};
use crate::error::CombatError;

/// System: respawn-with-penalty
///
/// Rescale vitality (revives), FSM → Idle, cadence сброшен.
pub fn handle_respawn_requests(
    mut requests: EventReader<RespawnRequested>,
    mut agents: Query<(&mut Vitality, &mut CombatState, Option<&mut AttackCadence>, Option<&mut Locomotion>)>,
    mut changed_events: EventWriter<CombatStateChanged>,
    mut fault_events: EventWriter<CombatFault>,
) {
    for request in requests.read() {
        let Ok((mut vitality, mut state, cadence, locomotion)) = agents.get_mut(request.agent) else {
            continue;
        };

        if let Err(error) = vitality.rescale(request.multiplier) {
            crate::logger::log_error(&format!("❌ respawn {:?}: {}", request.agent, error));
            fault_events.write(CombatFault { entity: request.agent, error });
            continue;
        }

        let before = state.kind();
        *state = CombatState::Idle;
        if let Some(mut cadence) = cadence {
            cadence.reset();
        }
        if let Some(mut locomotion) = locomotion {
            locomotion.delta = Vec3::ZERO;
        }

        if before != state.kind() {
            changed_events.write(CombatStateChanged {
                entity: request.agent,
                from: before,
                to: state.kind(),
            });
        }

        crate::logger::log_info(&format!(
            "🔁 {:?} respawned ×{:.2} (max health {:.1}, attack power {:.1})",
            request.agent,
            request.multiplier,
            vitality.max_health(),
            vitality.attack_power()
        ));
    }
}

/// System: copy persisted stats onto a freshly spawned agent.
///
/// Dead агент не сидируется (иначе `alive` без выхода из `Dead`): `CombatFault`.
pub fn handle_seed_stats(
    mut requests: EventReader<SeedStats>,
    mut agents: Query<(&mut Vitality, Option<&CombatState>)>,
    mut fault_events: EventWriter<CombatFault>,
) {
    for request in requests.read() {
        let Ok(source) = agents.get(request.source).map(|(vitality, _)| vitality.clone()) else {
            crate::logger::log_warning(&format!("SeedStats: source {:?} has no Vitality", request.source));
            continue;
        };

        let Ok((mut vitality, state)) = agents.get_mut(request.agent) else {
            continue;
        };

        if state.is_some_and(CombatState::is_dead) || !vitality.is_alive() {
            let error = CombatError::SeedDeadAgent;
            crate::logger::log_error(&format!("❌ SeedStats {:?}: {}", request.agent, error));
            fault_events.write(CombatFault { entity: request.agent, error });
            continue;
        }

        vitality.copy_from(&source);
        crate::logger::log(&format!(
            "📋 {:?} seeded from {:?} (max health {:.1})",
            request.agent,
            request.source,
            vitality.max_health()
        ));
    }
}
