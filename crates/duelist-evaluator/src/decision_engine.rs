//! The heuristic player: action selection plus the state it keeps across turns.
//!
//! # State Machine
//!
//! ```text
//!            start_battle / choose_action
//!   Idle ───────────────────────────────→ AwaitingAction
//!    ↑                                     │        ↑
//!    │ finish_battle            select     │        │ next snapshot
//!    │                                     ↓        │
//!    └──────────────────────────────── ActionChosen ┘
//! ```
//!
//! Each call to [`Player::choose_action`] runs selection exactly once, stores the chosen
//! action's kind for the anti-thrash guard and advances the turn counter when the turn was
//! scored. Selection never fails: malformed input degrades to a legal action or
//! [`Decision::Random`].
//!
//! # Turn Counter
//!
//! The counter is compared against the turn a field condition was applied. By default it keeps
//! counting across battles ([`TurnCounterPolicy::Cumulative`]); with
//! [`TurnCounterPolicy::PerBattle`] it restarts at zero, together with the last action kind,
//! at the start of each battle.

use duelist_engine::{ActionKind, BattleSnapshot, Decision, Player, PlayerOutcome};
use serde::{Deserialize, Serialize};

use crate::{
    action_selector::ActionSelector,
    contextual_scorer::{ContextualScorer, ScoreBreakdown},
    weights::WeightVector,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum EnginePhase {
    Idle,
    AwaitingAction,
    ActionChosen,
}

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "kebab-case")]
pub enum TurnCounterPolicy {
    /// Keep counting across battles.
    #[default]
    Cumulative,
    /// Restart the counter and forget the last action at the start of each battle.
    PerBattle,
}

/// Battles won, lost and drawn so far.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleRecord {
    pub won: usize,
    pub lost: usize,
    pub drawn: usize,
}

impl BattleRecord {
    #[must_use]
    pub fn battles(&self) -> usize {
        self.won + self.lost + self.drawn
    }

    pub fn record(&mut self, outcome: PlayerOutcome) {
        match outcome {
            PlayerOutcome::Won => self.won += 1,
            PlayerOutcome::Lost => self.lost += 1,
            PlayerOutcome::Drew => self.drawn += 1,
        }
    }
}

/// Heuristic battle player with tunable weights.
///
/// # Example
///
/// ```
/// use duelist_engine::{Battle, BattleSeed, Player as _, Roster};
/// use duelist_evaluator::{baseline::RandomPlayer, decision_engine::DecisionEngine, weights::WeightVector};
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
///
/// let roster = Roster::default();
/// let mut rng = Pcg32::seed_from_u64(1);
/// let mut engine = DecisionEngine::new(WeightVector::TUNED);
/// let mut opponent = RandomPlayer;
///
/// for seed in 0..3 {
///     let team1 = roster.random_team(3, &mut rng).unwrap();
///     let team2 = roster.random_team(3, &mut rng).unwrap();
///     let mut battle = Battle::new(team1, team2, BattleSeed::from(seed)).unwrap();
///     battle.run(&mut engine, &mut opponent, 300);
/// }
/// assert_eq!(engine.record().battles(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    selector: ActionSelector,
    policy: TurnCounterPolicy,
    phase: EnginePhase,
    turn: u32,
    last_action: Option<ActionKind>,
    last_breakdown: Option<ScoreBreakdown>,
    record: BattleRecord,
}

impl DecisionEngine {
    #[must_use]
    pub fn new(weights: WeightVector) -> Self {
        Self {
            selector: ActionSelector::new(ContextualScorer::new(weights)),
            policy: TurnCounterPolicy::default(),
            phase: EnginePhase::Idle,
            turn: 0,
            last_action: None,
            last_breakdown: None,
            record: BattleRecord::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: TurnCounterPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn weights(&self) -> WeightVector {
        self.selector.scorer().weights()
    }

    pub fn set_weights(&mut self, weights: WeightVector) {
        self.selector.scorer_mut().set_weights(weights);
    }

    #[must_use]
    pub fn policy(&self) -> TurnCounterPolicy {
        self.policy
    }

    #[must_use]
    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn last_action(&self) -> Option<ActionKind> {
        self.last_action
    }

    /// Breakdown of the most recently scored turn.
    #[must_use]
    pub fn last_breakdown(&self) -> Option<&ScoreBreakdown> {
        self.last_breakdown.as_ref()
    }

    /// Results of every battle this engine has finished.
    #[must_use]
    pub fn record(&self) -> BattleRecord {
        self.record
    }

    /// Runs selection for one snapshot and updates the cross-turn state.
    pub fn decide(&mut self, snapshot: &BattleSnapshot) -> Decision {
        self.phase = EnginePhase::AwaitingAction;
        let result = self.selector.select(snapshot, self.turn, self.last_action);

        self.turn = result.next_turn;
        if let Some(action) = result.decision.action() {
            self.last_action = Some(action.kind());
        }
        if result.breakdown.is_some() {
            self.last_breakdown = result.breakdown;
        }
        self.phase = EnginePhase::ActionChosen;
        result.decision
    }
}

impl Player for DecisionEngine {
    fn start_battle(&mut self) {
        if self.policy.is_per_battle() {
            self.turn = 0;
            self.last_action = None;
        }
        self.phase = EnginePhase::AwaitingAction;
    }

    fn choose_action(&mut self, snapshot: &BattleSnapshot) -> Decision {
        self.decide(snapshot)
    }

    fn finish_battle(&mut self, outcome: PlayerOutcome) {
        self.record.record(outcome);
        self.phase = EnginePhase::Idle;
    }
}

impl TurnCounterPolicy {
    #[must_use]
    pub fn is_per_battle(self) -> bool {
        self == TurnCounterPolicy::PerBattle
    }
}

#[cfg(test)]
mod tests {
    use duelist_engine::{
        Action, Battle, BattleSeed, FieldState, Move, MoveCategory, MoveSlot, Roster, StatTable,
        TeamSlot, Type, Unit,
    };
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use crate::baseline::{MaxDamagePlayer, RandomPlayer};

    use super::*;

    fn unit(name: &str, ty: Type, speed: u16, move_type: Type) -> Unit {
        Unit::new(name, &[ty], StatTable::new(80, 80, 80, 80, 80, speed))
            .with_moves([Move::new("Hit", move_type, MoveCategory::Special, 90)])
    }

    fn bad_matchup() -> BattleSnapshot {
        BattleSnapshot {
            turn: 1,
            team: vec![
                unit("Fire", Type::Fire, 50, Type::Normal),
                unit("Grass", Type::Grass, 80, Type::Grass),
            ],
            active: TeamSlot(0),
            opponent: unit("Water", Type::Water, 100, Type::Water),
            legal_moves: vec![MoveSlot(0)],
            legal_switches: vec![TeamSlot(1)],
            field: FieldState::default(),
            can_terastallize: false,
        }
    }

    #[test]
    fn test_anti_thrash_across_turns() {
        let mut engine = DecisionEngine::new(WeightVector::ONES);
        let snapshot = bad_matchup();

        let first = engine.decide(&snapshot);
        assert_eq!(first, Decision::Act(Action::Switch(TeamSlot(1))));
        assert_eq!(engine.last_action(), Some(ActionKind::Switch));
        assert!(engine.last_breakdown().unwrap().wants_switch());

        let second = engine.decide(&snapshot);
        assert_eq!(second, Decision::Act(Action::Attack(MoveSlot(0))));
        assert_eq!(engine.last_action(), Some(ActionKind::Attack));
        assert_eq!(engine.turn(), 2);

        let third = engine.decide(&snapshot);
        assert_eq!(third, Decision::Act(Action::Switch(TeamSlot(1))));
    }

    #[test]
    fn test_forced_switch_does_not_advance_turn() {
        let mut engine = DecisionEngine::new(WeightVector::ONES);
        let mut snapshot = bad_matchup();
        snapshot.legal_moves.clear();
        assert_eq!(engine.decide(&snapshot), Decision::Act(Action::Switch(TeamSlot(1))));
        assert_eq!(engine.turn(), 0);
        assert_eq!(engine.last_action(), Some(ActionKind::Switch));
        assert!(engine.last_breakdown().is_none());

        snapshot.legal_switches.clear();
        assert_eq!(engine.decide(&snapshot), Decision::Random);
        assert_eq!(engine.last_action(), Some(ActionKind::Switch));
    }

    #[test]
    fn test_phases() {
        let mut engine = DecisionEngine::new(WeightVector::TUNED);
        assert!(engine.phase().is_idle());
        engine.start_battle();
        assert!(engine.phase().is_awaiting_action());
        let _ = engine.choose_action(&bad_matchup());
        assert!(engine.phase().is_action_chosen());
        engine.finish_battle(PlayerOutcome::Won);
        assert!(engine.phase().is_idle());
        assert_eq!(engine.record().won, 1);
    }

    #[test]
    fn test_turn_counter_policy() {
        let snapshot = bad_matchup();

        let mut cumulative = DecisionEngine::new(WeightVector::ONES);
        cumulative.start_battle();
        let _ = cumulative.choose_action(&snapshot);
        cumulative.finish_battle(PlayerOutcome::Lost);
        cumulative.start_battle();
        assert_eq!(cumulative.turn(), 1);
        assert_eq!(cumulative.last_action(), Some(ActionKind::Switch));

        let mut per_battle = DecisionEngine::new(WeightVector::ONES).with_policy(TurnCounterPolicy::PerBattle);
        per_battle.start_battle();
        let _ = per_battle.choose_action(&snapshot);
        per_battle.finish_battle(PlayerOutcome::Lost);
        per_battle.start_battle();
        assert_eq!(per_battle.turn(), 0);
        assert_eq!(per_battle.last_action(), None);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(
            "perbattle".parse::<TurnCounterPolicy>().ok(),
            Some(TurnCounterPolicy::PerBattle)
        );
        assert_eq!(TurnCounterPolicy::Cumulative.to_string(), "Cumulative");
    }

    #[test]
    fn test_plays_full_battles() {
        let roster = Roster::default();
        let mut rng = Pcg32::seed_from_u64(99);
        let mut engine = DecisionEngine::new(WeightVector::TUNED);
        let mut random = RandomPlayer;
        let mut max_damage = MaxDamagePlayer;

        for seed in 0..10 {
            let team1 = roster.random_team(3, &mut rng).unwrap();
            let team2 = roster.random_team(3, &mut rng).unwrap();
            let mut battle = Battle::new(team1, team2, BattleSeed::from(seed)).unwrap();
            let opponent: &mut dyn Player = if seed % 2 == 0 { &mut random } else { &mut max_damage };
            battle.run(&mut engine, opponent, 300);
        }
        assert_eq!(engine.record().battles(), 10);
        assert!(engine.phase().is_idle());
        assert!(engine.turn() > 0);
    }
}
