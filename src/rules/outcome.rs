//! Win/loss detection.
//!
//! The engine never ends a duel itself. The lifecycle collaborator asks
//! [`duel_outcome`] after each action and ends the duel when it returns
//! `Some`.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, Seat};

/// Why a duel is decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeReason {
    LifePoints,
    DeckOut,
}

/// A decided duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelOutcome {
    /// `None` for a draw.
    pub winner: Option<Seat>,
    pub reason: OutcomeReason,
}

impl DuelOutcome {
    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}

/// Whether the duel is decided, and how.
///
/// Life points are checked before deck-outs. A seat loses at 0 life points
/// or after a draw found its deck empty; both seats losing at once is a
/// draw.
#[must_use]
pub fn duel_outcome(state: &GameState) -> Option<DuelOutcome> {
    let out_of_life: Vec<Seat> = Seat::ALL
        .into_iter()
        .filter(|&s| state.seats[s].life_points <= 0)
        .collect();
    let decked: Vec<Seat> = Seat::ALL.into_iter().filter(|&s| state.seats[s].decked_out).collect();

    resolve(&out_of_life, OutcomeReason::LifePoints).or_else(|| resolve(&decked, OutcomeReason::DeckOut))
}

fn resolve(losers: &[Seat], reason: OutcomeReason) -> Option<DuelOutcome> {
    match losers {
        [] => None,
        [loser] => Some(DuelOutcome {
            winner: Some(loser.other()),
            reason,
        }),
        _ => Some(DuelOutcome { winner: None, reason }),
    }
}
