//! Hill climbing over the engine's weights.
//!
//! # Algorithm Overview
//!
//! Each epoch follows this cycle:
//!
//! 1. **Play** - The live engine plays `battles_per_epoch` battles through an [`EpochDriver`]
//! 2. **Count** - Epoch wins are the growth of the engine's win record during the epoch
//! 3. **Accept** - If the epoch beat the best epoch so far (or is the first one), its wins and
//!    the weights that played it become the new best, and the live weights move to a neighbour
//!    of themselves
//! 4. **Reject** - Otherwise the live weights are replaced by a fresh neighbour of the best
//!    weights
//!
//! Neighbours come from [`Perturbation::apply`]. Only strictly better epochs are accepted, so
//! the best win count never decreases.
//!
//! # Design Decisions
//!
//! ## Empirical Objective
//!
//! The objective is a raw win count over a small number of noisy battles. A lucky epoch can
//! set a bar that later, better weights fail to reach; the search keeps exploring around the
//! lucky weights until something beats it.
//!
//! ## Persistence
//!
//! The search state is plain data ([`SearchState`]). Saving it is left to the caller.

use duelist_evaluator::{
    decision_engine::{BattleRecord, DecisionEngine},
    weights::WeightVector,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::weights::Perturbation;

/// Plays the battles of one epoch.
pub trait EpochDriver {
    /// Plays `battles` battles with `engine` and returns the results of those battles.
    ///
    /// Every battle must be reported to the engine through
    /// [`Player::finish_battle`](duelist_engine::Player::finish_battle).
    fn play_epoch(&mut self, engine: &mut DecisionEngine, battles: usize) -> BattleRecord;
}

/// Progress of a search run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    best_wins: Option<usize>,
    best_weights: Option<WeightVector>,
    cumulative_wins: usize,
    history: Vec<usize>,
}

impl SearchState {
    /// Starts a search from an already known best.
    #[must_use]
    pub fn from_best(weights: WeightVector, wins: usize) -> Self {
        Self {
            best_wins: Some(wins),
            best_weights: Some(weights),
            ..Self::default()
        }
    }

    /// Highest epoch win count so far, or `None` before the first epoch.
    #[must_use]
    pub fn best_wins(&self) -> Option<usize> {
        self.best_wins
    }

    #[must_use]
    pub fn best_weights(&self) -> Option<WeightVector> {
        self.best_weights
    }

    #[must_use]
    pub fn cumulative_wins(&self) -> usize {
        self.cumulative_wins
    }

    /// Wins of every epoch, oldest first.
    #[must_use]
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    #[must_use]
    pub fn epochs(&self) -> usize {
        self.history.len()
    }
}

/// What happened during one epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EpochReport {
    /// Zero-based epoch index.
    pub epoch: usize,
    pub wins: usize,
    /// Results of the epoch's battles, as reported by the driver.
    pub record: BattleRecord,
    /// Whether the epoch set a new best.
    pub accepted: bool,
    pub best_wins: usize,
    /// Weights the epoch was played with.
    pub played: WeightVector,
    /// Weights the next epoch will be played with.
    pub next: WeightVector,
}

#[derive(Debug, Clone)]
pub struct HillClimber<R> {
    perturbation: Perturbation,
    battles_per_epoch: usize,
    rng: R,
    state: SearchState,
}

impl<R> HillClimber<R>
where
    R: Rng,
{
    #[must_use]
    pub fn new(perturbation: Perturbation, battles_per_epoch: usize, rng: R) -> Self {
        Self {
            perturbation,
            battles_per_epoch,
            rng,
            state: SearchState::default(),
        }
    }

    #[must_use]
    pub fn with_state(mut self, state: SearchState) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    #[must_use]
    pub fn battles_per_epoch(&self) -> usize {
        self.battles_per_epoch
    }

    /// Plays one epoch and updates the live weights of `engine`.
    pub fn run_epoch<D>(&mut self, engine: &mut DecisionEngine, driver: &mut D) -> EpochReport
    where
        D: EpochDriver + ?Sized,
    {
        let before = engine.record().won;
        let record = driver.play_epoch(engine, self.battles_per_epoch);
        let wins = engine.record().won.saturating_sub(before);
        if wins != record.won {
            tracing::warn!(
                counted = wins,
                reported = record.won,
                "epoch driver reported a different win count"
            );
        }
        self.record_epoch(engine, wins, record)
    }

    /// Updates the search state with an epoch that won `wins` battles and moves the live
    /// weights of `engine` to the next candidate.
    pub fn record_epoch(&mut self, engine: &mut DecisionEngine, wins: usize, record: BattleRecord) -> EpochReport {
        let epoch = self.state.history.len();
        let played = engine.weights();

        self.state.cumulative_wins += wins;
        self.state.history.push(wins);

        let accepted = self.state.best_wins.is_none_or(|best| wins > best);
        let base = if accepted {
            self.state.best_wins = Some(wins);
            self.state.best_weights = Some(played);
            played
        } else {
            self.state.best_weights.unwrap_or(played)
        };
        let next = self.perturbation.apply(base, &mut self.rng);
        engine.set_weights(next);

        let best_wins = self.state.best_wins.unwrap_or(wins);
        tracing::info!(
            epoch,
            wins,
            best_wins,
            accepted,
            lost = record.lost,
            drawn = record.drawn,
            weights = ?played.to_array(),
            "epoch finished"
        );
        EpochReport {
            epoch,
            wins,
            record,
            accepted,
            best_wins,
            played,
            next,
        }
    }
}
