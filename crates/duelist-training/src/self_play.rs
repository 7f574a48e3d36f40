//! Battles between the live engine and a fixed baseline.

use duelist_engine::{
    Battle, BattleSeed, EmptyTeamError, Player, PlayerOutcome, Roster, SideId, TeamSizeError,
};
use duelist_evaluator::{
    baseline::{MaxDamagePlayer, RandomPlayer},
    decision_engine::{BattleRecord, DecisionEngine},
    weights::WeightVector,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::hill_climb::EpochDriver;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ArenaError {
    #[display("{_0}")]
    TeamSize(TeamSizeError),
    #[display("{_0}")]
    EmptyTeam(EmptyTeamError),
}

/// Fixed opponent of the live engine.
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
pub enum Baseline {
    /// Always lets the simulator choose.
    #[default]
    #[display("random")]
    Random,
    /// Always uses its strongest move ([`MaxDamagePlayer`]).
    #[display("greedy")]
    Greedy,
    /// The heuristic engine with the shipped weights.
    #[display("heuristic")]
    Heuristic,
}

#[derive(Debug, Clone)]
enum Opponent {
    Random(RandomPlayer),
    MaxDamage(MaxDamagePlayer),
    Heuristic(Box<DecisionEngine>),
}

impl Opponent {
    fn new(baseline: Baseline) -> Self {
        match baseline {
            Baseline::Random => Opponent::Random(RandomPlayer),
            Baseline::Greedy => Opponent::MaxDamage(MaxDamagePlayer),
            Baseline::Heuristic => Opponent::Heuristic(Box::new(DecisionEngine::new(WeightVector::TUNED))),
        }
    }

    fn as_player(&mut self) -> &mut dyn Player {
        match self {
            Opponent::Random(player) => player,
            Opponent::MaxDamage(player) => player,
            Opponent::Heuristic(engine) => engine.as_mut(),
        }
    }
}

/// Plays the live engine against a baseline on random teams drawn from a roster.
///
/// The engine always plays side 1. Each battle gets a fresh pair of teams and a fresh
/// [`BattleSeed`], both drawn from the arena's random number generator, so a seeded arena
/// replays the same battles.
#[derive(Debug, Clone)]
pub struct SelfPlayArena<R> {
    roster: Roster,
    opponent: Opponent,
    baseline: Baseline,
    team_size: usize,
    turn_limit: u32,
    rng: R,
}

impl<R> SelfPlayArena<R>
where
    R: Rng,
{
    pub fn new(
        roster: Roster,
        baseline: Baseline,
        team_size: usize,
        turn_limit: u32,
        rng: R,
    ) -> Result<Self, TeamSizeError> {
        if team_size == 0 || team_size > roster.len() {
            return Err(TeamSizeError {
                requested: team_size,
                available: roster.len(),
            });
        }
        Ok(Self {
            roster,
            opponent: Opponent::new(baseline),
            baseline,
            team_size,
            turn_limit,
            rng,
        })
    }

    #[must_use]
    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    /// Plays one battle with `player` on side 1.
    pub fn play_battle(&mut self, player: &mut dyn Player) -> Result<PlayerOutcome, ArenaError> {
        let team1 = self.roster.random_team(self.team_size, &mut self.rng)?;
        let team2 = self.roster.random_team(self.team_size, &mut self.rng)?;
        let seed: BattleSeed = self.rng.random();

        let mut battle = Battle::new(team1, team2, seed)?;
        let outcome = battle.run(player, self.opponent.as_player(), self.turn_limit);
        tracing::debug!(?seed, turns = battle.turn(), ?outcome, "battle finished");
        Ok(outcome.for_side(SideId::One))
    }
}

impl<R> EpochDriver for SelfPlayArena<R>
where
    R: Rng,
{
    fn play_epoch(&mut self, engine: &mut DecisionEngine, battles: usize) -> BattleRecord {
        let mut record = BattleRecord::default();
        for _ in 0..battles {
            match self.play_battle(engine) {
                Ok(outcome) => record.record(outcome),
                Err(e) => {
                    tracing::error!(error = %e, "cannot set up battle");
                    break;
                }
            }
        }
        record
    }
}
