//! Tests for combatant FSM components.

#[cfg(test)]
mod tests {
    use super::super::fsm::{AttackCadence, AttackSerial, CombatState, CombatStateKind, HitReaction, Pursuit};
    use crate::combat::{AttackCatalog, AttackDefinition};

    #[test]
    fn test_combat_state_default() {
        let state = CombatState::default();
        assert!(matches!(state, CombatState::Idle));
        assert_eq!(state.kind(), CombatStateKind::Idle);
    }

    #[test]
    fn test_defaults_match_shipped_tuning() {
        let pursuit = Pursuit::default();
        assert_eq!(pursuit.stopping_distance, 5.0);
        assert_eq!(pursuit.approach_speed, 10.0);

        let reaction = HitReaction::default();
        assert_eq!(reaction.hit_stun, 1.1);
        assert!(reaction.block_hit_stun < reaction.hit_stun);
    }

    #[test]
    fn test_guarded_states() {
        assert!(CombatState::Blocking.is_guarded());
        assert!(CombatState::Hit { remaining: 0.3 }.is_guarded());
        assert!(CombatState::BlockHit { remaining: 0.0 }.is_guarded());
        assert!(!CombatState::Idle.is_guarded());
        assert!(!CombatState::Approaching.is_guarded());
        assert!(!CombatState::Dead.is_guarded());
    }

    #[test]
    fn test_live_attack_only_while_window_open() {
        let attack = AttackDefinition::new("jab", 10.0, 0.4, 1.5);
        let open = CombatState::Attacking { attack: attack.clone(), active: 0.2 };
        let closed = CombatState::Attacking { attack, active: 0.0 };

        assert!(open.live_attack().is_some());
        assert!(closed.live_attack().is_none());
        assert!(CombatState::Blocking.live_attack().is_none());
    }

    #[test]
    fn test_stun_remaining_outside_stun_is_zero() {
        assert_eq!(CombatState::Hit { remaining: 0.7 }.stun_remaining(), 0.7);
        assert_eq!(CombatState::Blocking.stun_remaining(), 0.0);
    }

    #[test]
    fn test_cooldown_threshold_falls_back_to_first_attack() {
        let catalog = AttackCatalog::new(vec![
            AttackDefinition::new("jab", 10.0, 0.4, 1.5),
            AttackDefinition::new("uppercut", 25.0, 1.0, 2.5),
        ]);
        let mut cadence = AttackCadence::default();
        assert_eq!(cadence.cooldown_threshold(&catalog), 1.5);

        cadence.current = Some(AttackDefinition::new("uppercut", 25.0, 1.0, 2.5));
        assert_eq!(cadence.cooldown_threshold(&catalog), 2.5);

        assert_eq!(AttackCadence::default().cooldown_threshold(&AttackCatalog::default()), 0.0);
    }

    #[test]
    fn test_state_kind_indices_are_distinct() {
        let kinds = [
            CombatStateKind::Idle,
            CombatStateKind::Approaching,
            CombatStateKind::Attacking,
            CombatStateKind::Blocking,
            CombatStateKind::Hit,
            CombatStateKind::BlockHit,
            CombatStateKind::Dead,
        ];
        for (expected, kind) in kinds.iter().enumerate() {
            assert_eq!(kind.as_index() as usize, expected);
        }
    }

    #[test]
    fn test_attack_serial_bump() {
        let mut serial = AttackSerial::default();
        assert_eq!(serial.bump(), 1);
        assert_eq!(serial.bump(), 2);
        assert_eq!(serial.0, 2);
    }
}
