//! Training system for tuning the decision engine's weights by hill climbing.
//!
//! The decision engine scores matchups with five weights. This crate searches for weights that
//! win more battles, treating the engine as a black box: the only signal is how many battles
//! the engine wins with a given weight vector.
//!
//! # How Training Works
//!
//! 1. **Initialize** - Draw every weight from `uniform(1, 2)` (or start from known weights)
//! 2. **Play** - The engine plays an epoch of battles against a fixed baseline
//! 3. **Compare** - The epoch's wins are compared with the best epoch so far
//! 4. **Move** - Better: keep the weights as the new best and step away from them.
//!    Not better: step away from the best weights instead
//! 5. **Repeat** - Continue for a fixed number of epochs
//!
//! # Architecture
//!
//! ```text
//! HillClimber (search state, perturbation)
//!     ↓ drives
//! EpochDriver (SelfPlayArena: random teams, fixed baseline)
//!     ↓ plays
//! DecisionEngine (duelist-evaluator)
//!     ↓ reports
//! Battle results (win record)
//! ```
//!
//! See the [`hill_climb`] module for the acceptance rule and [`weights`] for the perturbation.
//!
//! # Example
//!
//! ```
//! use duelist_engine::Roster;
//! use duelist_evaluator::{decision_engine::DecisionEngine, weights::WeightVector};
//! use duelist_training::{
//!     config::SearchConfig, hill_climb::HillClimber, self_play::SelfPlayArena,
//! };
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//!
//! let config = SearchConfig { epochs: 3, battles_per_epoch: 2, ..SearchConfig::default() };
//! let mut rng = Pcg32::seed_from_u64(0);
//! let mut engine = DecisionEngine::new(WeightVector::random_initial(&mut rng));
//! let mut arena = SelfPlayArena::new(
//!     Roster::default(),
//!     config.baseline,
//!     config.team_size,
//!     config.turn_limit,
//!     Pcg32::seed_from_u64(1),
//! )
//! .unwrap();
//! let mut climber = HillClimber::new(config.perturbation().unwrap(), config.battles_per_epoch, rng);
//!
//! for _ in 0..config.epochs {
//!     climber.run_epoch(&mut engine, &mut arena);
//! }
//! assert_eq!(climber.state().epochs(), 3);
//! assert!(climber.state().best_weights().is_some());
//! ```
//!
//! # Current Limitations
//!
//! - **Noisy objective**: Win counts over a handful of battles vary a lot between runs of the
//!   same weights, and a lucky epoch is never re-evaluated.
//! - **Fixed step**: The perturbation step does not shrink as the search converges.

pub mod config;
pub mod history;
pub mod hill_climb;
pub mod self_play;
pub mod weights;
