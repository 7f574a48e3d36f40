use serde::{Deserialize, Serialize};

/// Number of turns a unit stays asleep before it wakes up.
pub const SLEEP_DURATION: u8 = 3;

/// Non-volatile status condition of a unit.
///
/// Toxic and sleep carry the number of turns elapsed since the condition was inflicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Status {
    Burn,
    Poison,
    Toxic { turns: u8 },
    Paralysis,
    Sleep { turns: u8 },
    Freeze,
}

/// A status condition before it is applied to a unit (counters start at zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Burn,
    Poison,
    Toxic,
    Paralysis,
    Sleep,
    Freeze,
}

impl StatusKind {
    #[must_use]
    pub const fn inflict(self) -> Status {
        match self {
            StatusKind::Burn => Status::Burn,
            StatusKind::Poison => Status::Poison,
            StatusKind::Toxic => Status::Toxic { turns: 0 },
            StatusKind::Paralysis => Status::Paralysis,
            StatusKind::Sleep => Status::Sleep { turns: 0 },
            StatusKind::Freeze => Status::Freeze,
        }
    }
}

impl Status {
    #[must_use]
    pub const fn kind(self) -> StatusKind {
        match self {
            Status::Burn => StatusKind::Burn,
            Status::Poison => StatusKind::Poison,
            Status::Toxic { .. } => StatusKind::Toxic,
            Status::Paralysis => StatusKind::Paralysis,
            Status::Sleep { .. } => StatusKind::Sleep,
            Status::Freeze => StatusKind::Freeze,
        }
    }
}
