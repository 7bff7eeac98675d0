//! FSM AI systems (target binding, per-tick state transitions).

use std::collections::HashSet;
use bevy::prelude::*;
use crate::ai::{AttackCadence, AttackSerial, CombatState, CombatTarget, Pursuit, TargetView, TickContext};
use crate::combat::{AgentSpawned, AttackCatalog, AttackStarted, CombatFault, CombatStateChanged, EntityDied};
use crate::components::{Facing, Locomotion, Vitality};
use crate::error::CombatError;
use crate::DeterministicRng;

/// Система: NotifySpawned → CombatTarget
///
/// Match flow отправляет AgentSpawned один раз после спавна агента.
pub fn bind_spawned_targets(
    mut commands: Commands,
    mut spawned: EventReader<AgentSpawned>,
    agents: Query<(), With<CombatState>>,
) {
    for event in spawned.read() {
        if agents.get(event.agent).is_err() {
            crate::logger::log_warning(&format!(
                "AgentSpawned: {:?} is not a combatant, target {:?} not bound",
                event.agent, event.target
            ));
            continue;
        }

        commands.entity(event.agent).insert(CombatTarget(event.target));
        crate::logger::log(&format!("🎯 {:?} bound to target {:?}", event.agent, event.target));
    }
}

/// Агенты, чей fault уже зарепорчен в текущем эпизоде
///
/// Эпизод заканчивается первым успешным тиком агента. Деспавненные агенты
/// выпадают при следующем `tick_combatants`.
#[derive(Resource, Debug, Default)]
pub struct FaultLatch(HashSet<Entity>);

impl FaultLatch {
    /// `true` если эпизод только начался (fault надо зарепортить)
    pub fn latch(&mut self, entity: Entity) -> bool {
        self.0.insert(entity)
    }

    pub fn release(&mut self, entity: Entity) {
        self.0.remove(&entity);
    }

    pub fn is_latched(&self, entity: Entity) -> bool {
        self.0.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn retain(&mut self, mut live: impl FnMut(Entity) -> bool) {
        self.0.retain(|entity| live(*entity));
    }
}

/// Система: AI combat FSM (FixedUpdate)
///
/// Каждый агент читает свой Transform/Vitality и Transform/Vitality цели,
/// пишет только свои компоненты: порядок обхода агентов не важен.
#[allow(clippy::type_complexity)]
pub fn tick_combatants(
    mut agents: Query<(
        Entity,
        &Transform,
        &Vitality,
        &AttackCatalog,
        &Pursuit,
        Option<&CombatTarget>,
        &mut CombatState,
        &mut AttackCadence,
        &mut Locomotion,
        &mut Facing,
        &mut AttackSerial,
    )>,
    targets: Query<(&Transform, &Vitality)>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
    mut attack_events: EventWriter<AttackStarted>,
    mut changed_events: EventWriter<CombatStateChanged>,
    mut died_events: EventWriter<EntityDied>,
    mut fault_events: EventWriter<CombatFault>,
    mut faulted: ResMut<FaultLatch>,
) {
    let delta = time.delta_secs();
    faulted.retain(|entity| agents.contains(entity));

    for (entity, transform, vitality, catalog, pursuit, target, mut state, mut cadence, mut locomotion, mut facing, mut serial) in
        agents.iter_mut()
    {
        let target_view = target
            .and_then(|target| targets.get(target.0).ok())
            .map(|(target_transform, target_vitality)| TargetView {
                position: target_transform.translation,
                alive: target_vitality.is_alive(),
            });

        let ctx = TickContext {
            delta,
            position: transform.translation,
            alive: vitality.is_alive(),
            target: target_view,
            catalog,
            pursuit,
        };

        let before = state.kind();
        let outcome = match state.advance(&mut cadence, &ctx, &mut rng.rng) {
            Ok(outcome) => {
                faulted.release(entity);
                outcome
            }
            Err(error) => {
                locomotion.delta = Vec3::ZERO;
                // Один раз на эпизод, иначе спам каждый тик
                if faulted.latch(entity) {
                    report_fault(entity, error, &mut fault_events);
                }
                continue;
            }
        };

        locomotion.delta = outcome.locomotion;
        if let Some(direction) = outcome.facing {
            facing.turn_toward(direction);
        }

        if let Some(attack) = outcome.started {
            let serial = serial.bump();
            crate::logger::log(&format!(
                "⚔️ {:?} starts '{}' (damage {:.1}, window {:.2}s)",
                entity, attack.name, attack.damage, attack.active_duration
            ));
            attack_events.write(AttackStarted {
                attacker: entity,
                damage: attack.damage,
                attack,
                serial,
            });
        }

        let after = state.kind();
        if before != after {
            changed_events.write(CombatStateChanged { entity, from: before, to: after });

            if state.is_dead() {
                crate::logger::log_info(&format!("💀 {:?} died (vitality depleted)", entity));
                died_events.write(EntityDied { entity, killer: None });
            }
        }
    }
}

fn report_fault(entity: Entity, error: CombatError, fault_events: &mut EventWriter<CombatFault>) {
    crate::logger::log_error(&format!("❌ combatant {:?}: {}", entity, error));
    fault_events.write(CombatFault { entity, error });
}
