use serde::{Deserialize, Serialize};

use crate::{
    core::{FieldState, Move, Unit},
    engine::action::{Action, MoveSlot, TeamSlot},
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SnapshotError {
    #[display("active slot {_0} is outside a team of {_1}")]
    ActiveOutOfRange(TeamSlot, usize),
    #[display("legal move slot {_0} is outside a moveset of {_1}")]
    MoveOutOfRange(MoveSlot, usize),
    #[display("legal switch slot {_0} is outside a team of {_1}")]
    SwitchOutOfRange(TeamSlot, usize),
    #[display("legal switch slot {_0} is the active unit")]
    SwitchToActive(#[error(not(source))] TeamSlot),
}

/// Read-only view of a battle from one side, taken at the start of a decision.
///
/// The snapshot is everything a player may look at: its own team (with one active unit),
/// the opposing active unit, the legal action sets, the field and the turn index.
///
/// Legal moves index the active unit's moveset; legal switches index the team and never
/// name the active slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub turn: u32,
    pub team: Vec<Unit>,
    pub active: TeamSlot,
    pub opponent: Unit,
    #[serde(default)]
    pub legal_moves: Vec<MoveSlot>,
    #[serde(default)]
    pub legal_switches: Vec<TeamSlot>,
    #[serde(default)]
    pub field: FieldState,
    /// Whether the active unit may terastallize this turn.
    #[serde(default)]
    pub can_terastallize: bool,
}

impl BattleSnapshot {
    /// Returns the acting unit.
    ///
    /// # Panics
    ///
    /// Panics if `active` is outside the team; see [`Self::validate`].
    #[must_use]
    pub fn active_unit(&self) -> &Unit {
        &self.team[self.active.0]
    }

    /// Returns the move in `slot` of the active unit, if it exists.
    #[must_use]
    pub fn move_at(&self, slot: MoveSlot) -> Option<&Move> {
        self.team.get(self.active.0)?.moves().get(slot.0)
    }

    /// Returns the team member in `slot`, if it is a legal switch target.
    #[must_use]
    pub fn switch_target(&self, slot: TeamSlot) -> Option<&Unit> {
        if slot == self.active {
            return None;
        }
        self.team.get(slot.0)
    }

    /// Returns `true` if `action` is drawn from the legal sets of this snapshot.
    #[must_use]
    pub fn is_legal(&self, action: Action) -> bool {
        match action {
            Action::Attack(slot) => {
                self.legal_moves.contains(&slot) && self.move_at(slot).is_some()
            }
            Action::Terastallize(slot) => {
                self.can_terastallize && self.is_legal(Action::Attack(slot))
            }
            Action::Switch(slot) => {
                self.legal_switches.contains(&slot) && self.switch_target(slot).is_some()
            }
        }
    }

    /// Checks that the active slot and every legal entry resolve to a unit or move.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let team_len = self.team.len();
        let Some(active) = self.team.get(self.active.0) else {
            return Err(SnapshotError::ActiveOutOfRange(self.active, team_len));
        };
        let move_count = active.moves().len();
        if let Some(slot) = self.legal_moves.iter().find(|s| s.0 >= move_count) {
            return Err(SnapshotError::MoveOutOfRange(*slot, move_count));
        }
        for slot in &self.legal_switches {
            if *slot == self.active {
                return Err(SnapshotError::SwitchToActive(*slot));
            }
            if slot.0 >= team_len {
                return Err(SnapshotError::SwitchOutOfRange(*slot, team_len));
            }
        }
        Ok(())
    }

    /// Returns the legal actions in snapshot order: moves first, then switches.
    ///
    /// Entries that do not resolve are skipped. Terastallizing variants of the moves are not
    /// listed, so the random fallback never spends the side's terastallization.
    pub fn legal_actions(&self) -> impl Iterator<Item = Action> + '_ {
        let moves = self
            .legal_moves
            .iter()
            .filter(|slot| self.move_at(**slot).is_some())
            .map(|slot| Action::Attack(*slot));
        let switches = self
            .legal_switches
            .iter()
            .filter(|slot| self.switch_target(**slot).is_some())
            .map(|slot| Action::Switch(*slot));
        moves.chain(switches)
    }
}
