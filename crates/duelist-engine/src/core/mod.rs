//! Battle data model: types, stats, statuses, moves, units and field state.
//!
//! These are plain value types. They carry no battle logic beyond small invariants
//! (clamped boost stages, clamped HP fraction); the [`engine`](crate::engine) module
//! drives them through turns.

pub use self::{field::*, moves::*, stats::*, status::*, types::*, unit::*};

pub(crate) mod field;
pub(crate) mod moves;
pub(crate) mod stats;
pub(crate) mod status;
pub(crate) mod types;
pub(crate) mod unit;
