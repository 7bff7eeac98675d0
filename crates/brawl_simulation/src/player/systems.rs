//! Player state machine: intent → state, locomotion, attack windows.

use bevy::prelude::*;
use crate::ai::{AttackSerial, CombatState, TickOutcome};
use crate::combat::{AttackDefinition, AttackStarted, CombatStateChanged, EntityDied};
use crate::components::{Facing, Locomotion, Vitality};
use crate::player::{Player, PlayerCadence, PlayerIntent, PlayerTuning};

/// One fixed tick of the player's machine.
///
/// Порядок: Dead → своя смерть → stun → открытое attack window →
/// attack intent (если cooldown прошёл) → guard → Idle + движение.
pub fn step_player(
    state: &mut CombatState,
    cadence: &mut PlayerCadence,
    intent: &PlayerIntent,
    tuning: &PlayerTuning,
    vitality: &Vitality,
    delta: f32,
) -> TickOutcome {
    if state.is_dead() {
        return TickOutcome::default();
    }

    if !vitality.is_alive() {
        *state = CombatState::Dead;
        return TickOutcome::default();
    }

    match state {
        CombatState::Hit { remaining } | CombatState::BlockHit { remaining } if *remaining > 0.0 => {
            *remaining = (*remaining - delta).max(0.0);
            return TickOutcome::default();
        }
        _ => {}
    }

    if let Some(elapsed) = cadence.since_attack.as_mut() {
        *elapsed += delta;
    }

    // Окно атаки не прерывается ни движением, ни guard
    if let CombatState::Attacking { active, .. } = state {
        if *active > 0.0 {
            *active = (*active - delta).max(0.0);
            return TickOutcome::default();
        }
    }

    let direction = intent.move_direction.normalize_or_zero();
    let facing = (direction != Vec3::ZERO).then_some(direction);

    if intent.attack && cadence.ready(tuning.attack_cooldown) {
        let attack = AttackDefinition::new(
            "strike",
            vitality.attack_power(),
            tuning.attack_active_duration,
            tuning.attack_cooldown,
        );
        cadence.since_attack = Some(0.0);
        *state = CombatState::Attacking {
            active: attack.active_duration,
            attack: attack.clone(),
        };
        return TickOutcome {
            locomotion: Vec3::ZERO,
            facing,
            started: Some(attack),
        };
    }

    if intent.guard {
        *state = CombatState::Blocking;
        return TickOutcome {
            facing,
            ..Default::default()
        };
    }

    *state = CombatState::Idle;
    TickOutcome {
        locomotion: direction * tuning.move_speed * delta,
        facing,
        started: None,
    }
}

/// Система: player FSM (FixedUpdate, Decide)
#[allow(clippy::type_complexity)]
pub fn tick_player(
    mut players: Query<
        (
            Entity,
            &PlayerIntent,
            &PlayerTuning,
            &Vitality,
            &mut CombatState,
            &mut PlayerCadence,
            &mut Locomotion,
            &mut Facing,
            &mut AttackSerial,
        ),
        With<Player>,
    >,
    time: Res<Time<Fixed>>,
    mut attack_events: EventWriter<AttackStarted>,
    mut changed_events: EventWriter<CombatStateChanged>,
    mut died_events: EventWriter<EntityDied>,
) {
    let delta = time.delta_secs();

    for (entity, intent, tuning, vitality, mut state, mut cadence, mut locomotion, mut facing, mut serial) in
        players.iter_mut()
    {
        let before = state.kind();
        let outcome = step_player(&mut state, &mut cadence, intent, tuning, vitality, delta);

        locomotion.delta = outcome.locomotion;
        if let Some(direction) = outcome.facing {
            facing.turn_toward(direction);
        }

        if let Some(attack) = outcome.started {
            let serial = serial.bump();
            crate::logger::log(&format!("🗡️ player {:?} strikes (damage {:.1})", entity, attack.damage));
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
                crate::logger::log_info(&format!("💀 player {:?} died", entity));
                died_events.write(EntityDied { entity, killer: None });
            }
        }
    }
}
