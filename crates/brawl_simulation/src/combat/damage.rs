//! Hit resolution: overlap-begin → defender.apply_hit.
//!
//! Edge-triggered: читаем только `CollisionEvent::Started`.
//! Продолжающийся overlap новых Started не даёт, Stopped игнорируем.

use std::collections::HashSet;
use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;
use crate::ai::{CombatState, HitOutcome, HitReaction};
use crate::combat::{CombatFault, CombatStateChanged, DamageDealt, EntityDied, HitGuarded, HitVolume, HurtVolume};
use crate::components::{Actor, Vitality};
use crate::error::CombatResult;

/// Hit resolution protocol: a live hit-volume touched the defender.
///
/// Pure function of the volume's damage and the defender's state machine;
/// the attacker is never mutated.
pub fn resolve_hit(
    volume: &HitVolume,
    defender_state: &mut CombatState,
    defender_vitality: &mut Vitality,
    reaction: &HitReaction,
) -> CombatResult<HitOutcome> {
    defender_state.apply_hit(defender_vitality, volume.damage, reaction)
}

/// Порядок entity в CollisionEvent не гарантирован: пробуем оба.
fn split_pair(a: Entity, b: Entity, volumes: &Query<&HitVolume>) -> Option<(HitVolume, Entity)> {
    if let Ok(volume) = volumes.get(a) {
        return Some((*volume, b));
    }
    volumes.get(b).ok().map(|volume| (*volume, a))
}

/// Система: CollisionEvent::Started (hit-volume × hurt-volume) → ApplyHit
#[allow(clippy::type_complexity)]
pub fn resolve_hits(
    mut collisions: EventReader<CollisionEvent>,
    volumes: Query<&HitVolume>,
    mut defenders: Query<(&Actor, &mut CombatState, &mut Vitality, &HitReaction), With<HurtVolume>>,
    factions: Query<&Actor, Without<HurtVolume>>,
    mut damage_events: EventWriter<DamageDealt>,
    mut guarded_events: EventWriter<HitGuarded>,
    mut died_events: EventWriter<EntityDied>,
    mut changed_events: EventWriter<CombatStateChanged>,
    mut fault_events: EventWriter<CombatFault>,
) {
    // Один volume бьёт одного защитника максимум раз за батч
    let mut resolved: HashSet<(Entity, Entity)> = HashSet::new();

    for collision in collisions.read() {
        let CollisionEvent::Started(a, b, _) = collision else {
            continue;
        };

        let Some((volume, defender)) = split_pair(*a, *b, &volumes) else {
            continue;
        };

        if defender == volume.owner {
            continue;
        }

        let owner_faction = defenders
            .get(volume.owner)
            .map(|(actor, ..)| actor.faction_id)
            .ok()
            .or_else(|| factions.get(volume.owner).ok().map(|actor| actor.faction_id));

        let Ok((actor, mut state, mut vitality, reaction)) = defenders.get_mut(defender) else {
            continue;
        };

        // Friendly fire отключен
        if owner_faction == Some(actor.faction_id) {
            continue;
        }

        let volume_entity = if volumes.contains(*a) { *a } else { *b };
        if !resolved.insert((volume_entity, defender)) {
            continue;
        }

        let before = state.kind();
        let outcome = match resolve_hit(&volume, &mut state, &mut vitality, reaction) {
            Ok(outcome) => outcome,
            Err(error) => {
                crate::logger::log_error(&format!(
                    "❌ hit {:?} → {:?} rejected: {}",
                    volume.owner, defender, error
                ));
                fault_events.write(CombatFault { entity: volume.owner, error });
                continue;
            }
        };

        match outcome {
            HitOutcome::Ignored => continue,
            HitOutcome::Guarded => {
                crate::logger::log(&format!("🛡️ {:?} guarded hit from {:?}", defender, volume.owner));
                guarded_events.write(HitGuarded {
                    attacker: volume.owner,
                    target: defender,
                });
            }
            HitOutcome::Damaged { dealt } => {
                crate::logger::log(&format!(
                    "💥 {:?} → {:?}: {:.1} damage (health {:.1}/{:.1})",
                    volume.owner,
                    defender,
                    dealt,
                    vitality.health(),
                    vitality.max_health()
                ));
                damage_events.write(DamageDealt {
                    attacker: volume.owner,
                    target: defender,
                    damage: dealt,
                    target_died: false,
                });
            }
            HitOutcome::Killed { dealt } => {
                crate::logger::log_info(&format!("💀 {:?} killed by {:?} ({:.1} damage)", defender, volume.owner, dealt));
                damage_events.write(DamageDealt {
                    attacker: volume.owner,
                    target: defender,
                    damage: dealt,
                    target_died: true,
                });
                died_events.write(EntityDied {
                    entity: defender,
                    killer: Some(volume.owner),
                });
            }
        }

        let after = state.kind();
        if before != after {
            changed_events.write(CombatStateChanged {
                entity: defender,
                from: before,
                to: after,
            });
        }
    }
}
