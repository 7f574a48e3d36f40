//! Fixed opponents for measuring the heuristic engine.

use duelist_engine::{Action, BattleSnapshot, Decision, MoveSlot, Player};

/// Always lets the simulator pick a random legal action.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPlayer;

impl Player for RandomPlayer {
    fn choose_action(&mut self, _snapshot: &BattleSnapshot) -> Decision {
        Decision::Random
    }
}

/// Uses the legal move with the highest base power, ignoring typing.
///
/// The first of several equally strong moves is used, and the unit terastallizes with it at the
/// first opportunity. Without a legal move (for example when
/// a fainted unit has to be replaced) the choice falls back to [`Decision::Random`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxDamagePlayer;

impl Player for MaxDamagePlayer {
    fn choose_action(&mut self, snapshot: &BattleSnapshot) -> Decision {
        let mut best: Option<(MoveSlot, u16)> = None;
        for slot in &snapshot.legal_moves {
            let Some(mv) = snapshot.move_at(*slot) else {
                continue;
            };
            if best.is_none_or(|(_, power)| mv.base_power() > power) {
                best = Some((*slot, mv.base_power()));
            }
        }
        match best {
            Some((slot, _)) if snapshot.can_terastallize => Decision::Act(Action::Terastallize(slot)),
            Some((slot, _)) => Decision::Act(Action::Attack(slot)),
            None => Decision::Random,
        }
    }
}

#[cfg(test)]
mod tests {
    use duelist_engine::{FieldState, Move, MoveCategory, StatTable, TeamSlot, Type, Unit};

    use super::*;

    fn snapshot(powers: &[u16]) -> BattleSnapshot {
        let active = Unit::new("Active", &[Type::Normal], StatTable::new(80, 80, 80, 80, 80, 80))
            .with_moves(
                powers
                    .iter()
                    .map(|power| Move::new(format!("Hit {power}"), Type::Normal, MoveCategory::Physical, *power)),
            );
        let bench = Unit::new("Bench", &[Type::Water], StatTable::new(80, 80, 80, 80, 80, 80));
        BattleSnapshot {
            turn: 1,
            team: vec![active, bench.clone()],
            active: TeamSlot(0),
            opponent: bench,
            legal_moves: (0..powers.len()).map(MoveSlot).collect(),
            legal_switches: vec![TeamSlot(1)],
            field: FieldState::default(),
            can_terastallize: false,
        }
    }

    #[test]
    fn test_random_player() {
        assert_eq!(RandomPlayer.choose_action(&snapshot(&[90])), Decision::Random);
    }

    #[test]
    fn test_max_damage_first_max_wins() {
        let decision = MaxDamagePlayer.choose_action(&snapshot(&[40, 90, 90, 0]));
        assert_eq!(decision, Decision::Act(Action::Attack(MoveSlot(1))));
    }

    #[test]
    fn test_max_damage_terastallizes_when_allowed() {
        let mut snapshot = snapshot(&[40, 90]);
        snapshot.can_terastallize = true;
        let decision = MaxDamagePlayer.choose_action(&snapshot);
        assert_eq!(decision, Decision::Act(Action::Terastallize(MoveSlot(1))));
        assert!(snapshot.is_legal(Action::Terastallize(MoveSlot(1))));
    }

    #[test]
    fn test_max_damage_without_moves() {
        let mut snapshot = snapshot(&[90]);
        snapshot.legal_moves = vec![MoveSlot(5)];
        assert_eq!(MaxDamagePlayer.choose_action(&snapshot), Decision::Random);
    }
}
