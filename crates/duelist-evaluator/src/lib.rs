//! Heuristic decision engine for two-player battles.
//!
//! This crate implements a three-level decision architecture:
//!
//! 1. **Matchup Features** ([`matchup_feature`]) - Five pure functions measuring how the active
//!    unit fares against the opponent: stat stages, typing, HP, status and weather.
//!
//! 2. **Contextual Scoring** ([`contextual_scorer`]) - Combines the features with a
//!    [`WeightVector`](weights::WeightVector) and a speed-order bonus into one score, with a
//!    per-feature breakdown.
//!
//! 3. **Action Selection** ([`action_selector`], [`decision_engine`]) - Turns the score into a
//!    legal action: switch out of bad matchups, otherwise use the most effective move.
//!
//! # Architecture
//!
//! ```text
//! DecisionEngine (turn counter, last action, Player impl)
//!     ↓ uses
//! ActionSelector (best move / best switch)
//!     ↓ uses
//! ContextualScorer (weighted sum + speed bonus)
//!     ↓ uses
//! Matchup Features (pure, per unit pair)
//! ```
//!
//! # Design Principles
//!
//! ## Explainable Scores
//!
//! Every score is a linear sum whose terms can be listed one by one
//! ([`ScoreBreakdown`](contextual_scorer::ScoreBreakdown)). Nothing is learned except the five
//! weights.
//!
//! ## Infallible Decisions
//!
//! Selection never returns an error. Malformed snapshots are logged and degrade to a legal
//! action or to the simulator's random fallback.
//!
//! # Example
//!
//! ```
//! use duelist_engine::{Player as _, Roster};
//! use duelist_evaluator::{decision_engine::DecisionEngine, weights::WeightVector};
//!
//! let roster = Roster::default();
//! let mut rng = rand::rng();
//! let team1 = roster.random_team(3, &mut rng).unwrap();
//! let team2 = roster.random_team(3, &mut rng).unwrap();
//! let battle = duelist_engine::Battle::new(team1, team2, rand::random()).unwrap();
//!
//! let mut engine = DecisionEngine::new(WeightVector::TUNED);
//! let decision = engine.choose_action(&battle.snapshot(duelist_engine::SideId::One));
//! assert!(decision.is_act());
//! ```

pub mod action_selector;
pub mod baseline;
pub mod contextual_scorer;
pub mod decision_engine;
pub mod matchup_feature;
pub mod weights;
