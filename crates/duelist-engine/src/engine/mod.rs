//! Battle flow: actions, snapshots, players and the battle loop.
//!
//! This module drives the [`core`](crate::core) data model through turns:
//!
//! - [`Action`] / [`Decision`] - What a player answers each turn
//! - [`BattleSnapshot`] - Read-only view a player decides from
//! - [`Player`] - Capability the battle calls into
//! - [`Battle`] - Two-sided single battle with a deterministic [`BattleSeed`]
//! - [`Roster`] - Species templates teams are drawn from
//!
//! # Battle Flow
//!
//! A battle progresses as follows:
//!
//! 1. Draw two teams from a [`Roster`] and create a [`Battle`] with a seed
//! 2. Each turn, both players receive a [`BattleSnapshot`] and return a [`Decision`]
//! 3. Switches resolve first, then attacks in speed order
//! 4. End-of-turn damage from statuses and weather is applied
//! 5. Players whose active unit fainted are asked for a replacement
//! 6. Repeat until a side has no units left or the turn limit is reached
//!
//! # Example
//!
//! ```
//! use duelist_engine::{Battle, BattleSeed, BattleSnapshot, Decision, Player, Roster};
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//!
//! struct Randomly;
//!
//! impl Player for Randomly {
//!     fn choose_action(&mut self, _snapshot: &BattleSnapshot) -> Decision {
//!         Decision::Random
//!     }
//! }
//!
//! let roster = Roster::default();
//! let mut rng = Pcg32::seed_from_u64(0);
//! let team1 = roster.random_team(3, &mut rng).unwrap();
//! let team2 = roster.random_team(3, &mut rng).unwrap();
//!
//! let mut battle = Battle::new(team1, team2, BattleSeed::from(0)).unwrap();
//! let outcome = battle.run(&mut Randomly, &mut Randomly, 300);
//! println!("{outcome:?}");
//! ```

pub use self::{action::*, battle::*, player::*, roster::*, snapshot::*};

mod action;
mod battle;
mod player;
mod roster;
mod snapshot;
