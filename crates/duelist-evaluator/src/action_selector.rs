//! Action selection: choosing one legal action for the current turn.
//!
//! # How It Works
//!
//! Selection runs once per turn, in this precedence order:
//!
//! 1. **Nothing legal** - No legal moves and no legal switches: [`Decision::Random`]
//! 2. **Forced switch** - No legal moves but some legal switches (replacing a fainted unit):
//!    best switch, without scoring the turn
//! 3. **Bad matchup** - The contextual score is ≤ −1, a switch is legal and the previous action
//!    was not a switch: best switch
//! 4. **Nothing effective** - Every legal move is resisted by the opponent and a switch is
//!    allowed as in step 3: best switch
//! 5. **Attack** - Best move
//!
//! The "previous action was not a switch" condition is the anti-thrash guard: it stops the
//! engine from switching back and forth on consecutive turns while the matchup stays bad.
//!
//! # Ranking
//!
//! - **Best move**: `base_power / 100 × multiplier(move_type, defending types)`, where the
//!   defending types are the opponent's tera type while it is terastallized. Later moves win
//!   ties.
//! - **Best switch**: [`typing_advantage`] plus [`moves_advantage`] of the candidate against
//!   the opponent. Earlier candidates win ties.
//!
//! # Turn Counter
//!
//! The selector does not own the turn counter. It receives the current turn and returns the
//! next one: the turn advances exactly when the matchup is scored (steps 3 to 5).

use duelist_engine::{Action, ActionKind, BattleSnapshot, Decision, MoveSlot, TeamSlot, Unit};

use crate::{
    contextual_scorer::{ContextualScorer, ScoreBreakdown},
    matchup_feature::{Matchup, moves_advantage, typing_advantage},
};

/// Result of one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnDecision {
    pub decision: Decision,
    /// Turn counter value for the next selection.
    pub next_turn: u32,
    /// Score breakdown, if the matchup was scored this turn.
    pub breakdown: Option<ScoreBreakdown>,
}

/// Legal actions that resolve against the snapshot.
#[derive(Debug, Clone, Default)]
struct LegalActions {
    moves: Vec<MoveSlot>,
    switches: Vec<TeamSlot>,
}

impl LegalActions {
    /// Collects the legal sets, dropping entries that do not resolve.
    fn from_snapshot(snapshot: &BattleSnapshot) -> Self {
        let mut legal = Self::default();
        for slot in &snapshot.legal_moves {
            if snapshot.move_at(*slot).is_some() {
                legal.moves.push(*slot);
            } else {
                tracing::warn!(turn = snapshot.turn, slot = slot.0, "dropping unresolvable legal move");
            }
        }
        for slot in &snapshot.legal_switches {
            if snapshot.switch_target(*slot).is_some() {
                legal.switches.push(*slot);
            } else {
                tracing::warn!(turn = snapshot.turn, slot = slot.0, "dropping unresolvable legal switch");
            }
        }
        legal
    }
}

#[derive(Debug, Clone)]
pub struct ActionSelector {
    scorer: ContextualScorer,
}

impl ActionSelector {
    #[must_use]
    pub fn new(scorer: ContextualScorer) -> Self {
        Self { scorer }
    }

    #[must_use]
    pub fn scorer(&self) -> &ContextualScorer {
        &self.scorer
    }

    pub fn scorer_mut(&mut self) -> &mut ContextualScorer {
        &mut self.scorer
    }

    /// Selects the action for `snapshot`.
    ///
    /// `turn` is the engine's turn counter and `last_action` the kind of the previously
    /// chosen action. Any [`Decision::Act`] returned is drawn from the snapshot's legal sets.
    #[must_use]
    pub fn select(
        &self,
        snapshot: &BattleSnapshot,
        turn: u32,
        last_action: Option<ActionKind>,
    ) -> TurnDecision {
        let legal = LegalActions::from_snapshot(snapshot);
        let unscored = |decision| TurnDecision {
            decision,
            next_turn: turn,
            breakdown: None,
        };

        let matchup = Matchup::from_snapshot(snapshot, turn);
        let (Some(matchup), false) = (matchup, legal.moves.is_empty()) else {
            return match best_switch(snapshot, &legal.switches) {
                Some(slot) => unscored(Decision::Act(Action::Switch(slot))),
                None => unscored(Decision::Random),
            };
        };

        let breakdown = self.scorer.breakdown(&matchup);
        tracing::debug!(turn, species = matchup.unit.species(), "\n{breakdown}");

        let switch_allowed = !legal.switches.is_empty() && last_action != Some(ActionKind::Switch);
        let switch_out = switch_allowed
            && (breakdown.wants_switch() || all_moves_resisted(snapshot, &legal.moves));

        let action = match (switch_out, best_switch(snapshot, &legal.switches)) {
            (true, Some(slot)) => Action::Switch(slot),
            _ => match best_move(snapshot, &legal.moves) {
                Some(slot) => Action::Attack(slot),
                None => {
                    return TurnDecision {
                        decision: Decision::Random,
                        next_turn: turn + 1,
                        breakdown: Some(breakdown),
                    };
                }
            },
        };

        TurnDecision {
            decision: Decision::Act(action),
            next_turn: turn + 1,
            breakdown: Some(breakdown),
        }
    }
}

/// `base_power / 100 × multiplier` of the move in `slot` against the opponent.
fn move_score(snapshot: &BattleSnapshot, slot: MoveSlot) -> Option<(f32, f32)> {
    let mv = snapshot.move_at(slot)?;
    let multiplier = mv
        .move_type()
        .multiplier_against(snapshot.opponent.defensive_types());
    Some((f32::from(mv.base_power()) / 100.0 * multiplier, multiplier))
}

fn all_moves_resisted(snapshot: &BattleSnapshot, moves: &[MoveSlot]) -> bool {
    moves
        .iter()
        .filter_map(|slot| move_score(snapshot, *slot))
        .all(|(_, multiplier)| multiplier < 1.0)
}

/// Returns the best of `moves` against the snapshot's opponent.
///
/// Ties go to the later move.
#[must_use]
pub fn best_move(snapshot: &BattleSnapshot, moves: &[MoveSlot]) -> Option<MoveSlot> {
    let mut best: Option<(MoveSlot, f32)> = None;
    for slot in moves {
        let Some((score, _)) = move_score(snapshot, *slot) else {
            continue;
        };
        if best.is_none_or(|(_, best_score)| score >= best_score) {
            best = Some((*slot, score));
        }
    }
    best.map(|(slot, _)| slot)
}

/// How well `candidate` would fare against `opponent` if switched in.
#[must_use]
pub fn switch_score(candidate: &Unit, opponent: &Unit) -> f32 {
    typing_advantage(candidate, opponent) + moves_advantage(candidate, opponent)
}

/// Returns the best of `switches` against the snapshot's opponent.
///
/// Ties go to the earlier candidate.
#[must_use]
pub fn best_switch(snapshot: &BattleSnapshot, switches: &[TeamSlot]) -> Option<TeamSlot> {
    let mut best: Option<(TeamSlot, f32)> = None;
    for slot in switches {
        let Some(candidate) = snapshot.switch_target(*slot) else {
            continue;
        };
        let score = switch_score(candidate, &snapshot.opponent);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((*slot, score));
        }
    }
    best.map(|(slot, _)| slot)
}
