//! Shared fixtures for unit tests.

use crate::core::{DuelSetup, GameState};

/// An active duel with empty decks: host's turn 1, main phase 1,
/// 8000 life each.
pub(crate) fn blank_state() -> GameState {
    DuelSetup::new("lobby", "host", "guest").build()
}
