use serde::{Deserialize, Serialize};

use super::{action::Decision, snapshot::BattleSnapshot};

/// How a battle ended from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum PlayerOutcome {
    Won,
    Lost,
    Drew,
}

/// Something that can take part in a battle.
///
/// The battle calls [`Self::start_battle`] once, then [`Self::choose_action`] each time the
/// player's side has to act (including forced replacements after a faint), and finally
/// [`Self::finish_battle`] with the result.
pub trait Player {
    fn start_battle(&mut self) {}

    /// Picks one action for the current turn.
    ///
    /// An [`Decision::Act`] must name an action drawn from the snapshot's legal sets;
    /// [`Decision::Random`] delegates the choice to the battle.
    fn choose_action(&mut self, snapshot: &BattleSnapshot) -> Decision;

    fn finish_battle(&mut self, outcome: PlayerOutcome) {
        let _ = outcome;
    }
}

impl<P> Player for &mut P
where
    P: Player + ?Sized,
{
    fn start_battle(&mut self) {
        (**self).start_battle();
    }

    fn choose_action(&mut self, snapshot: &BattleSnapshot) -> Decision {
        (**self).choose_action(snapshot)
    }

    fn finish_battle(&mut self, outcome: PlayerOutcome) {
        (**self).finish_battle(outcome);
    }
}
