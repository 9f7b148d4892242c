//! Phase changes, ending the turn and listing legal actions.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{DuelEngine, TriggerReport};
use crate::cards::CardId;
use crate::core::{LobbyId, PlayerId, Seat};
use crate::effects::EffectTrigger;
use crate::error::DuelError;
use crate::lingering::CapabilityGate;
use crate::rules::AvailableAction;
use crate::store::{DuelStore, EventRecorder};
use crate::triggers::{DuelEvent, EventKind, TriggerScan};
use crate::turn::{Phase, TurnMachine};

/// Result of advancing the phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseOutcome {
    pub phase: Phase,
}

/// Result of ending the turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndTurnOutcome {
    /// Seat whose turn it is now.
    pub next_seat: Seat,
    pub turn_number: u32,
    /// Card the new turn player drew, if any.
    pub drawn: Option<CardId>,
    pub decked_out: bool,
    /// End-phase triggers of the old turn, then standby triggers of the new.
    pub triggered: Vec<TriggerReport>,
}

impl<S: DuelStore, R: EventRecorder> DuelEngine<S, R> {
    /// Move to the next phase.
    pub fn advance_phase(&mut self, caller: &PlayerId, lobby: &LobbyId) -> Result<PhaseOutcome, DuelError> {
        let (mut state, seat) = self.load_for(caller, lobby)?;
        let from = state.phase;
        let phase = TurnMachine::advance(&mut state, seat)?;
        self.commit(&mut state)?;

        let description = format!("{} -> {}", from, phase);
        self.record(DuelEvent::new(&state, EventKind::PhaseChanged, seat, description))?;
        Ok(PhaseOutcome { phase })
    }

    /// End the turn and run the next turn's draw and standby phases.
    ///
    /// The state is committed between each step: end-phase triggers, the
    /// hand-over with its draw, standby triggers, and finally main phase 1.
    pub fn end_turn(&mut self, caller: &PlayerId, lobby: &LobbyId) -> Result<EndTurnOutcome, DuelError> {
        let (mut state, seat) = self.load_for(caller, lobby)?;
        TurnMachine::check_end_turn(&state, seat)?;

        if state.phase != Phase::End {
            state.phase = Phase::End;
            self.commit(&mut state)?;
        }
        let end_phase = TriggerScan::face_up_cards(&state, &self.catalog, seat, EffectTrigger::OnEndPhase);
        let mut triggered = self.fire_triggers(lobby, end_phase)?;

        let mut state = self.store.load(lobby)?;
        let ended = state.turn_number;
        self.record(DuelEvent::new(&state, EventKind::TurnEnded, seat, format!("turn {} ended", ended)))?;

        let start = TurnMachine::hand_over(&mut state);
        let pruned = CapabilityGate::prune_expired(&mut state);
        self.commit(&mut state)?;
        info!(lobby = %lobby, from = %seat, to = %start.seat, turn = start.turn_number, pruned, "turn handed over");

        let draw = if start.decked_out {
            DuelEvent::new(&state, EventKind::DeckOut, start.seat, "could not draw from an empty deck")
        } else {
            DuelEvent::new(&state, EventKind::CardDrawn, start.seat, "drew a card")
        };
        self.record(draw)?;

        let standby = TriggerScan::face_up_cards(&state, &self.catalog, start.seat, EffectTrigger::OnStandby);
        triggered.extend(self.fire_triggers(lobby, standby)?);

        let mut state = self.store.load(lobby)?;
        state.phase = Phase::Main1;
        self.commit(&mut state)?;
        let description = format!("{} -> {}", Phase::Standby, Phase::Main1);
        self.record(DuelEvent::new(&state, EventKind::PhaseChanged, start.seat, description))?;

        Ok(EndTurnOutcome {
            next_seat: start.seat,
            turn_number: start.turn_number,
            drawn: start.drawn,
            decked_out: start.decked_out,
            triggered,
        })
    }

    /// Every action the caller could take right now.
    pub fn available_actions(&self, caller: &PlayerId, lobby: &LobbyId) -> Result<Vec<AvailableAction>, DuelError> {
        let (state, seat) = self.load_for(caller, lobby)?;
        Ok(crate::rules::available_actions(&state, &self.catalog, &self.config, seat))
    }
}
