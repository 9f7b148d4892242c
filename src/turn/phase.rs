//! Turn phases.

use serde::{Deserialize, Serialize};

/// A phase of a turn, in turn order.
///
/// ```
/// use duel_engine::turn::Phase;
///
/// assert_eq!(Phase::Main1.next(), Some(Phase::BattleStart));
/// assert_eq!(Phase::End.next(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Draw,
    Standby,
    Main1,
    BattleStart,
    Battle,
    BattleEnd,
    Main2,
    End,
}

impl Phase {
    /// All phases in turn order.
    pub const ORDER: [Phase; 8] = [
        Phase::Draw,
        Phase::Standby,
        Phase::Main1,
        Phase::BattleStart,
        Phase::Battle,
        Phase::BattleEnd,
        Phase::Main2,
        Phase::End,
    ];

    /// The phase that follows this one within the same turn.
    ///
    /// `End` has no successor: leaving it hands the turn over.
    #[must_use]
    pub const fn next(self) -> Option<Phase> {
        match self {
            Phase::Draw => Some(Phase::Standby),
            Phase::Standby => Some(Phase::Main1),
            Phase::Main1 => Some(Phase::BattleStart),
            Phase::BattleStart => Some(Phase::Battle),
            Phase::Battle => Some(Phase::BattleEnd),
            Phase::BattleEnd => Some(Phase::Main2),
            Phase::Main2 => Some(Phase::End),
            Phase::End => None,
        }
    }

    /// Main phase 1 or 2.
    #[must_use]
    pub const fn is_main(self) -> bool {
        matches!(self, Phase::Main1 | Phase::Main2)
    }

    /// Phases from which the turn player may end the turn.
    #[must_use]
    pub const fn can_end_turn(self) -> bool {
        matches!(self, Phase::Main1 | Phase::BattleEnd | Phase::Main2 | Phase::End)
    }

    /// Wire name, as used in JSON and event descriptions.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Draw => "draw",
            Phase::Standby => "standby",
            Phase::Main1 => "main1",
            Phase::BattleStart => "battle_start",
            Phase::Battle => "battle",
            Phase::BattleEnd => "battle_end",
            Phase::Main2 => "main2",
            Phase::End => "end",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
