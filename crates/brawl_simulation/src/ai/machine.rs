//! Combatant state machine: per-tick transitions and hit reaction.
//!
//! Чистая логика без ECS: системы в `ai::systems` собирают `TickContext`
//! из компонентов и применяют `TickOutcome`.
//!
//! Приоритет правил (один раз за fixed tick):
//! 1. Stun (Hit/BlockHit с remaining > 0): только тикаем таймер
//! 2. Своя смерть → Dead (терминально)
//! 3. Смерть цели → Idle
//! 4. Дистанция: Approaching, либо attack cadence (Attacking / Blocking)

use bevy::prelude::*;
use rand::Rng;
use crate::ai::{AttackCadence, CombatState, HitReaction, Pursuit};
use crate::combat::{AttackCatalog, AttackDefinition};
use crate::components::Vitality;
use crate::error::{CombatError, CombatResult};

/// What the machine needs to know about its target this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetView {
    pub position: Vec3,
    pub alive: bool,
}

/// Inputs for one tick of [`CombatState::advance`].
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    /// Fixed tick duration (seconds)
    pub delta: f32,
    pub position: Vec3,
    pub alive: bool,
    /// `None` when the target was never bound or no longer exists
    pub target: Option<TargetView>,
    pub catalog: &'a AttackCatalog,
    pub pursuit: &'a Pursuit,
}

/// Side outputs of one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Movement to apply this tick (non-zero only while approaching)
    pub locomotion: Vec3,
    /// Direction to the target when one was evaluated
    pub facing: Option<Vec3>,
    /// Attack selected this tick
    pub started: Option<AttackDefinition>,
}

/// Result of [`CombatState::apply_hit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    /// Defender already dead; nothing changed
    Ignored,
    /// Guard absorbed the hit, defender is in BlockHit
    Guarded,
    /// Damage applied, defender is in Hit
    Damaged { dealt: f32 },
    /// Damage applied and it was lethal, defender is Dead
    Killed { dealt: f32 },
}

impl CombatState {
    /// Advances the machine by one fixed tick.
    ///
    /// Ошибки (пустой каталог, нет цели) оставляют состояние как было.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        cadence: &mut AttackCadence,
        ctx: &TickContext<'_>,
        rng: &mut R,
    ) -> CombatResult<TickOutcome> {
        let delta = ctx.delta;

        // Rule 0: Dead терминален
        if self.is_dead() {
            return Ok(TickOutcome::default());
        }

        // Rule 1: self death (перебивает даже stun)
        if !ctx.alive {
            *self = CombatState::Dead;
            return Ok(TickOutcome::default());
        }

        // Rule 2: stun
        match self {
            CombatState::Hit { remaining } | CombatState::BlockHit { remaining } if *remaining > 0.0 => {
                *remaining = (*remaining - delta).max(0.0);
                return Ok(TickOutcome::default());
            }
            _ => {}
        }

        let target = ctx.target.ok_or(CombatError::MissingTarget)?;

        // Rule 3: target death → disengage
        if !target.alive {
            *self = CombatState::Idle;
            return Ok(TickOutcome::default());
        }

        // Rule 4: range
        let to_target = target.position - ctx.position;
        let direction = to_target.normalize_or_zero();
        let mut outcome = TickOutcome {
            facing: Some(direction),
            ..Default::default()
        };

        if to_target.length() > ctx.pursuit.stopping_distance {
            *self = CombatState::Approaching;
            outcome.locomotion = direction * ctx.pursuit.approach_speed * delta;
            return Ok(outcome);
        }

        if cadence.elapsed > cadence.cooldown_threshold(ctx.catalog) {
            let attack = ctx.catalog.select_random(rng)?.clone();
            cadence.elapsed = 0.0;
            cadence.current = Some(attack.clone());
            *self = CombatState::Attacking {
                active: attack.active_duration,
                attack: attack.clone(),
            };
            outcome.started = Some(attack);
            return Ok(outcome);
        }

        match self {
            CombatState::Attacking { active, .. } if *active > 0.0 => {
                *active = (*active - delta).max(0.0);
            }
            _ => {
                cadence.elapsed += delta;
                *self = CombatState::Blocking;
            }
        }

        Ok(outcome)
    }

    /// Hit reaction, invoked once per hit-volume overlap-begin.
    ///
    /// Blocking/Hit/BlockHit: guard поглощает урон целиком (perfect guard),
    /// меняется только stun. Иначе урон идёт в vitality.
    pub fn apply_hit(
        &mut self,
        vitality: &mut Vitality,
        damage: f32,
        reaction: &HitReaction,
    ) -> CombatResult<HitOutcome> {
        if !damage.is_finite() || damage < 0.0 {
            return Err(CombatError::InvalidDamage(damage));
        }

        if self.is_dead() {
            return Ok(HitOutcome::Ignored);
        }

        if self.is_guarded() {
            *self = CombatState::BlockHit {
                remaining: reaction.block_hit_stun,
            };
            return Ok(HitOutcome::Guarded);
        }

        let applied = vitality.apply_damage(damage)?;
        if vitality.is_alive() {
            *self = CombatState::Hit {
                remaining: reaction.hit_stun,
            };
            Ok(HitOutcome::Damaged { dealt: applied.dealt })
        } else {
            *self = CombatState::Dead;
            Ok(HitOutcome::Killed { dealt: applied.dealt })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn single_attack_catalog() -> AttackCatalog {
        AttackCatalog::new(vec![AttackDefinition::new("slam", 20.0, 1.0, 2.5)])
    }

    fn ctx<'a>(
        catalog: &'a AttackCatalog,
        pursuit: &'a Pursuit,
        target_position: Vec3,
        delta: f32,
    ) -> TickContext<'a> {
        TickContext {
            delta,
            position: Vec3::ZERO,
            alive: true,
            target: Some(TargetView { position: target_position, alive: true }),
            catalog,
            pursuit,
        }
    }

    #[test]
    fn test_approach_emits_scaled_delta() {
        let catalog = single_attack_catalog();
        let pursuit = Pursuit { stopping_distance: 5.0, approach_speed: 10.0 };
        let mut state = CombatState::Idle;
        let mut cadence = AttackCadence::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let outcome = state
            .advance(&mut cadence, &ctx(&catalog, &pursuit, Vec3::new(10.0, 0.0, 0.0), 0.1), &mut rng)
            .unwrap();

        assert_eq!(state, CombatState::Approaching);
        assert!((outcome.locomotion.length() - 1.0).abs() < 1e-5);
        assert!(outcome.locomotion.x > 0.0);
        assert!(outcome.started.is_none());
    }

    #[test]
    fn test_attack_when_cooldown_elapsed() {
        let catalog = single_attack_catalog();
        let pursuit = Pursuit::default();
        let mut state = CombatState::Blocking;
        let mut cadence = AttackCadence { elapsed: 3.0, current: None };
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let outcome = state
            .advance(&mut cadence, &ctx(&catalog, &pursuit, Vec3::new(2.0, 0.0, 0.0), 0.1), &mut rng)
            .unwrap();

        let expected = AttackDefinition::new("slam", 20.0, 1.0, 2.5);
        assert_eq!(state, CombatState::Attacking { attack: expected.clone(), active: 1.0 });
        assert_eq!(cadence.current, Some(expected.clone()));
        assert_eq!(cadence.elapsed, 0.0);
        assert_eq!(outcome.started, Some(expected));
        assert_eq!(outcome.locomotion, Vec3::ZERO);
    }

    #[test]
    fn test_attack_window_then_blocking() {
        let catalog = AttackCatalog::new(vec![AttackDefinition::new("jab", 5.0, 0.5, 1.0)]);
        let pursuit = Pursuit::default();
        let mut state = CombatState::Blocking;
        let mut cadence = AttackCadence { elapsed: 2.0, current: None };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let context = ctx(&catalog, &pursuit, Vec3::new(1.0, 0.0, 0.0), 0.25);

        state.advance(&mut cadence, &context, &mut rng).unwrap();
        assert!(matches!(state, CombatState::Attacking { active, .. } if active == 0.5));

        state.advance(&mut cadence, &context, &mut rng).unwrap();
        assert!(matches!(state, CombatState::Attacking { active, .. } if active == 0.25));

        state.advance(&mut cadence, &context, &mut rng).unwrap();
        assert!(matches!(state, CombatState::Attacking { active, .. } if active == 0.0));
        assert_eq!(cadence.elapsed, 0.0);

        // Окно закрыто → Blocking, cooldown копится
        state.advance(&mut cadence, &context, &mut rng).unwrap();
        assert_eq!(state, CombatState::Blocking);
        assert_eq!(cadence.elapsed, 0.25);
    }

    #[test]
    fn test_cadence_attacks_only_after_exceeding_cooldown() {
        let catalog = AttackCatalog::new(vec![AttackDefinition::new("jab", 5.0, 0.5, 1.0)]);
        let pursuit = Pursuit::default();
        let mut state = CombatState::Idle;
        let mut cadence = AttackCadence::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let context = ctx(&catalog, &pursuit, Vec3::new(1.0, 0.0, 0.0), 0.5);

        // elapsed: 0 → 0.5 → 1.0 → 1.5 (1.0 не "больше" 1.0)
        for _ in 0..3 {
            state.advance(&mut cadence, &context, &mut rng).unwrap();
            assert_eq!(state, CombatState::Blocking);
        }
        assert_eq!(cadence.elapsed, 1.5);

        let outcome = state.advance(&mut cadence, &context, &mut rng).unwrap();
        assert_eq!(state.kind(), crate::ai::CombatStateKind::Attacking);
        assert!(outcome.started.is_some());
    }

    #[test]
    fn test_stun_skips_range_rules() {
        let catalog = single_attack_catalog();
        let pursuit = Pursuit::default();
        let mut state = CombatState::Hit { remaining: 0.3 };
        let mut cadence = AttackCadence { elapsed: 10.0, current: None };
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        // Цель далеко и cooldown давно прошёл: всё равно стоим
        let far = ctx(&catalog, &pursuit, Vec3::new(50.0, 0.0, 0.0), 0.2);
        let outcome = state.advance(&mut cadence, &far, &mut rng).unwrap();
        assert_eq!(outcome, TickOutcome::default());
        assert!(matches!(state, CombatState::Hit { remaining } if (remaining - 0.1).abs() < 1e-6));
        assert_eq!(cadence.elapsed, 10.0);

        state.advance(&mut cadence, &far, &mut rng).unwrap();
        assert_eq!(state, CombatState::Hit { remaining: 0.0 });

        // Stun закончился: правила 2-4 снова работают
        state.advance(&mut cadence, &far, &mut rng).unwrap();
        assert_eq!(state, CombatState::Approaching);
    }

    #[test]
    fn test_stun_takes_priority_over_target_death() {
        let catalog = single_attack_catalog();
        let pursuit = Pursuit::default();
        let mut state = CombatState::BlockHit { remaining: 0.5 };
        let mut cadence = AttackCadence::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut context = ctx(&catalog, &pursuit, Vec3::X, 0.1);
        context.target = Some(TargetView { position: Vec3::X, alive: false });

        state.advance(&mut cadence, &context, &mut rng).unwrap();
        assert_eq!(state.kind(), crate::ai::CombatStateKind::BlockHit);
    }

    #[test]
    fn test_self_death_overrides_stun() {
        let catalog = single_attack_catalog();
        let pursuit = Pursuit::default();
        let mut state = CombatState::Hit { remaining: 0.5 };
        let mut cadence = AttackCadence::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut context = ctx(&catalog, &pursuit, Vec3::X, 0.1);
        context.alive = false;

        let outcome = state.advance(&mut cadence, &context, &mut rng).unwrap();
        assert_eq!(outcome, TickOutcome::default());
        assert_eq!(state, CombatState::Dead);

        let mut state = CombatState::BlockHit { remaining: 0.5 };
        state.advance(&mut cadence, &context, &mut rng).unwrap();
        assert_eq!(state, CombatState::Dead);
    }

    #[test]
    fn test_self_death_is_terminal() {
        let catalog = single_attack_catalog();
        let pursuit = Pursuit::default();
        let mut state = CombatState::Blocking;
        let mut cadence = AttackCadence::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut context = ctx(&catalog, &pursuit, Vec3::new(20.0, 0.0, 0.0), 0.1);
        context.alive = false;

        state.advance(&mut cadence, &context, &mut rng).unwrap();
        assert_eq!(state, CombatState::Dead);

        // Даже если "ожил" без respawn: Dead остаётся
        context.alive = true;
        let outcome = state.advance(&mut cadence, &context, &mut rng).unwrap();
        assert_eq!(state, CombatState::Dead);
        assert_eq!(outcome.locomotion, Vec3::ZERO);
    }

    #[test]
    fn test_target_death_disengages() {
        let catalog = single_attack_catalog();
        let pursuit = Pursuit::default();
        let mut state = CombatState::Approaching;
        let mut cadence = AttackCadence::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut context = ctx(&catalog, &pursuit, Vec3::new(20.0, 0.0, 0.0), 0.1);
        context.target = Some(TargetView { position: Vec3::new(20.0, 0.0, 0.0), alive: false });

        let outcome = state.advance(&mut cadence, &context, &mut rng).unwrap();
        assert_eq!(state, CombatState::Idle);
        assert_eq!(outcome.locomotion, Vec3::ZERO);
    }

    #[test]
    fn test_missing_target_is_error() {
        let catalog = single_attack_catalog();
        let pursuit = Pursuit::default();
        let mut state = CombatState::Idle;
        let mut cadence = AttackCadence::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut context = ctx(&catalog, &pursuit, Vec3::X, 0.1);
        context.target = None;

        let result = state.advance(&mut cadence, &context, &mut rng);
        assert!(matches!(result, Err(CombatError::MissingTarget)));
        assert_eq!(state, CombatState::Idle);
    }

    #[test]
    fn test_empty_catalog_in_range_is_error() {
        let catalog = AttackCatalog::default();
        let pursuit = Pursuit::default();
        let mut state = CombatState::Blocking;
        let mut cadence = AttackCadence { elapsed: 0.5, current: None };
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let result = state.advance(&mut cadence, &ctx(&catalog, &pursuit, Vec3::X, 0.1), &mut rng);
        assert!(matches!(result, Err(CombatError::EmptyCatalog)));
        assert_eq!(state, CombatState::Blocking);
    }

    #[test]
    fn test_unguarded_hit_damages_and_stuns() {
        let mut state = CombatState::Idle;
        let mut vitality = Vitality::new(100.0, 10.0);
        let reaction = HitReaction { hit_stun: 1.1, block_hit_stun: 0.4 };

        let outcome = state.apply_hit(&mut vitality, 25.0, &reaction).unwrap();
        assert_eq!(outcome, HitOutcome::Damaged { dealt: 25.0 });
        assert_eq!(state, CombatState::Hit { remaining: 1.1 });
        assert_eq!(state.stun_remaining(), 1.1);
        assert_eq!(vitality.health(), 75.0);
    }

    #[test]
    fn test_guard_absorbs_everything() {
        let reaction = HitReaction { hit_stun: 1.1, block_hit_stun: 0.4 };
        let guarded = [
            CombatState::Blocking,
            CombatState::Hit { remaining: 0.6 },
            CombatState::BlockHit { remaining: 0.1 },
        ];

        for initial in guarded {
            let mut state = initial;
            let mut vitality = Vitality::new(100.0, 10.0);
            let outcome = state.apply_hit(&mut vitality, 40.0, &reaction).unwrap();

            assert_eq!(outcome, HitOutcome::Guarded);
            assert_eq!(state, CombatState::BlockHit { remaining: 0.4 });
            assert_eq!(vitality.health(), 100.0);
        }
    }

    #[test]
    fn test_attacking_is_not_guarded() {
        let mut state = CombatState::Attacking {
            attack: AttackDefinition::new("jab", 10.0, 0.4, 1.5),
            active: 0.2,
        };
        let mut vitality = Vitality::new(100.0, 10.0);
        let outcome = state.apply_hit(&mut vitality, 10.0, &HitReaction::default()).unwrap();

        assert!(matches!(outcome, HitOutcome::Damaged { .. }));
        assert_eq!(state.kind(), crate::ai::CombatStateKind::Hit);
    }

    #[test]
    fn test_lethal_hit_bypasses_stun() {
        let mut state = CombatState::Approaching;
        let mut vitality = Vitality::new(20.0, 1.0);
        let outcome = state.apply_hit(&mut vitality, 25.0, &HitReaction::default()).unwrap();

        assert_eq!(outcome, HitOutcome::Killed { dealt: 20.0 });
        assert_eq!(state, CombatState::Dead);
        assert_eq!(state.stun_remaining(), 0.0);
    }

    #[test]
    fn test_hits_after_death_are_ignored() {
        let mut state = CombatState::Dead;
        let mut vitality = Vitality::new(20.0, 1.0);
        vitality.apply_damage(20.0).unwrap();

        let outcome = state.apply_hit(&mut vitality, 5.0, &HitReaction::default()).unwrap();
        assert_eq!(outcome, HitOutcome::Ignored);
        assert_eq!(state, CombatState::Dead);
    }

    #[test]
    fn test_negative_hit_rejected() {
        let mut state = CombatState::Idle;
        let mut vitality = Vitality::new(100.0, 10.0);
        let result = state.apply_hit(&mut vitality, -1.0, &HitReaction::default());

        assert!(matches!(result, Err(CombatError::InvalidDamage(_))));
        assert_eq!(state, CombatState::Idle);
        assert_eq!(vitality.health(), 100.0);
    }
}
