use serde::{Deserialize, Serialize};

/// Index into the active unit's moveset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct MoveSlot(pub usize);

/// Index into a side's team.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct TeamSlot(pub usize);

/// A concrete action for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Use the move in this slot of the active unit's moveset.
    Attack(MoveSlot),
    /// Terastallize the active unit, then use the move in this slot.
    ///
    /// Legal once per battle for each side, while the active unit has a tera type.
    Terastallize(MoveSlot),
    /// Bring in the team member in this slot.
    Switch(TeamSlot),
}

impl Action {
    /// Returns the move slot of an attack, with or without terastallization.
    #[must_use]
    pub const fn move_slot(self) -> Option<MoveSlot> {
        match self {
            Action::Attack(slot) | Action::Terastallize(slot) => Some(slot),
            Action::Switch(_) => None,
        }
    }

    #[must_use]
    pub const fn kind(self) -> ActionKind {
        match self {
            Action::Attack(_) | Action::Terastallize(_) => ActionKind::Attack,
            Action::Switch(_) => ActionKind::Switch,
        }
    }
}

/// Tag of an [`Action`], kept across turns without holding on to the action itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Attack,
    Switch,
}

/// What a player answers when asked for its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Perform this action. It must be drawn from the legal sets of the snapshot.
    Act(Action),
    /// Let the simulator pick uniformly among the legal actions.
    Random,
}

impl Decision {
    #[must_use]
    pub const fn action(self) -> Option<Action> {
        match self {
            Decision::Act(action) => Some(action),
            Decision::Random => None,
        }
    }
}
