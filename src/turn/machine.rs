//! Turn/phase state machine.
//!
//! `TurnMachine` holds the pure transitions. Firing standby and end-phase
//! triggers needs the store, so the phase action handlers interleave those
//! between the steps below.

use tracing::{debug, info};

use super::phase::Phase;
use crate::cards::CardId;
use crate::core::{GameState, Seat};
use crate::error::DuelError;
use crate::rules::ensure_active;

/// What happened when a new turn began.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnStart {
    pub seat: Seat,
    pub turn_number: u32,
    /// Card drawn in the draw phase. `None` when the deck was empty.
    pub drawn: Option<CardId>,
    pub decked_out: bool,
}

/// Turn and phase transitions.
pub struct TurnMachine;

impl TurnMachine {
    /// Check `seat` may leave the current phase and return the next one.
    pub fn check_advance(state: &GameState, seat: Seat) -> Result<Phase, DuelError> {
        ensure_active(state)?;
        if !state.is_turn_of(seat) {
            return Err(DuelError::NotYourTurn);
        }
        if !state.chain.is_empty() {
            return Err(DuelError::invalid("resolve the chain before changing phase"));
        }
        state
            .phase
            .next()
            .ok_or_else(|| DuelError::invalid("use end turn to leave the end phase"))
    }

    /// Move to the next phase of the turn.
    pub fn advance(state: &mut GameState, seat: Seat) -> Result<Phase, DuelError> {
        let next = Self::check_advance(state, seat)?;
        debug!(from = %state.phase, to = %next, "phase advanced");
        state.phase = next;
        Ok(next)
    }

    /// Check `seat` may end the turn now.
    pub fn check_end_turn(state: &GameState, seat: Seat) -> Result<(), DuelError> {
        ensure_active(state)?;
        if !state.is_turn_of(seat) {
            return Err(DuelError::NotYourTurn);
        }
        if !state.chain.is_empty() {
            return Err(DuelError::invalid("resolve the chain before ending the turn"));
        }
        if !state.phase.can_end_turn() {
            return Err(DuelError::invalid(format!("cannot end the turn during {}", state.phase)));
        }
        Ok(())
    }

    /// Hand the turn to the other seat and run its draw phase.
    ///
    /// Resets the per-turn flags of both seats and the once-per-turn set,
    /// then leaves the state in the standby phase. The caller fires standby
    /// triggers and moves on to main phase 1. Turn 1 never comes through
    /// here (`DuelSetup` starts it in main phase 1), so every turn started
    /// here draws.
    pub fn hand_over(state: &mut GameState) -> TurnStart {
        for seat in Seat::ALL {
            state.seats[seat].reset_turn_flags();
        }
        state.opt_used.clear();

        let seat = state.current_turn.other();
        state.current_turn = seat;
        state.turn_number += 1;
        state.phase = Phase::Draw;

        let drawn = state.seats[seat].draw();
        let decked_out = drawn.is_none();

        state.phase = Phase::Standby;
        info!(lobby = %state.lobby_id, %seat, turn = state.turn_number, decked_out, "turn started");

        TurnStart {
            seat,
            turn_number: state.turn_number,
            drawn,
            decked_out,
        }
    }
}
