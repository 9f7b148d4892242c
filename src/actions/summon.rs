//! Summon, set, flip summon and position changes.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{DuelEngine, TriggerReport};
use crate::cards::{BoardCard, CardId, Position};
use crate::core::{LobbyId, PlayerId, Seat};
use crate::effects::EffectTrigger;
use crate::error::DuelError;
use crate::rules::{
    check_board_capacity, validate_change_position, validate_flip_summon, validate_normal_summon,
    validate_set_monster, Tributes,
};
use crate::store::{DuelStore, EventRecorder};
use crate::triggers::{DuelEvent, EventKind, TriggerScan};

/// Result of a summon, set or flip summon.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummonOutcome {
    pub card: CardId,
    pub card_name: String,
    pub position: Position,
    pub face_down: bool,
    pub tributes: Tributes,
    /// Triggered effects that fired, in order.
    pub triggered: Vec<TriggerReport>,
}

impl SummonOutcome {
    #[must_use]
    pub fn tributes_used(&self) -> usize {
        self.tributes.len()
    }
}

/// How a monster from hand lands on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Placement {
    /// Face-up, in the chosen position.
    Summon(Position),
    /// Face-down defense.
    Set,
}

/// Result of a position change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionOutcome {
    pub card: CardId,
    pub card_name: String,
    pub position: Position,
}

impl<S: DuelStore, R: EventRecorder> DuelEngine<S, R> {
    /// Normal summon `card` face-up in `position`, tributing `tributes`
    /// if its level requires them.
    ///
    /// Tributes are committed before the card leaves the hand. If the card
    /// turns out not to be in hand the action fails with `CardNotFound` and
    /// the tributes stay in the graveyard.
    pub fn normal_summon(
        &mut self,
        caller: &PlayerId,
        lobby: &LobbyId,
        card: CardId,
        position: Position,
        tributes: &[CardId],
    ) -> Result<SummonOutcome, DuelError> {
        self.summon_from_hand(caller, lobby, card, tributes, Placement::Summon(position))
    }

    /// Set `card` face-down in defense position. Sets fire no triggers.
    pub fn set_monster(
        &mut self,
        caller: &PlayerId,
        lobby: &LobbyId,
        card: CardId,
        tributes: &[CardId],
    ) -> Result<SummonOutcome, DuelError> {
        self.summon_from_hand(caller, lobby, card, tributes, Placement::Set)
    }

    fn summon_from_hand(
        &mut self,
        caller: &PlayerId,
        lobby: &LobbyId,
        card: CardId,
        tributes: &[CardId],
        placement: Placement,
    ) -> Result<SummonOutcome, DuelError> {
        let (mut state, seat) = self.load_for(caller, lobby)?;
        let set = placement == Placement::Set;
        if set {
            validate_set_monster(&state, &self.catalog, &self.config, seat, card, tributes)?;
        } else {
            validate_normal_summon(&state, &self.catalog, &self.config, seat, card, tributes)?;
        }
        check_board_capacity(&state, &self.config, seat, tributes)?;

        let def = self.catalog.require(card)?;
        let card_name = def.name.clone();
        let (attack, defense) = def.base_stats().unwrap_or((0, 0));
        let protection = def.protection();

        if !tributes.is_empty() {
            for &tribute in tributes {
                if state.seats[seat].take_from_board(tribute).is_some() {
                    state.seats[seat].send_to_graveyard(tribute);
                }
            }
            self.commit(&mut state)?;
            for &tribute in tributes {
                let description = format!("{} was tributed", self.catalog.name_of(tribute));
                self.record(DuelEvent::new(&state, EventKind::TributePaid, seat, description).with_card(tribute))?;
            }
            state = self.store.load(lobby)?;
        }

        if !state.seats[seat].remove_from_hand(card) {
            return Err(DuelError::CardNotFound(card));
        }

        let position = match placement {
            Placement::Summon(position) => position,
            Placement::Set => Position::Defense,
        };
        let mut monster =
            BoardCard::new(card, attack, defense, position, state.turn_number).with_protection(protection);
        if set {
            monster = monster.face_down();
        }
        let zones = &mut state.seats[seat];
        zones.board.push_back(monster);
        zones.normal_summoned_this_turn = true;
        self.commit(&mut state)?;

        let event = if set {
            DuelEvent::new(&state, EventKind::MonsterSet, seat, "set a monster")
        } else {
            let kind = if tributes.is_empty() {
                EventKind::NormalSummon
            } else {
                EventKind::TributeSummon
            };
            DuelEvent::new(&state, kind, seat, format!("summoned {}", card_name)).with_card(card)
        };
        self.record(event)?;
        info!(lobby = %lobby, %seat, card = %card_name, set, tributes = tributes.len(), "monster placed");

        let triggered = if set {
            Vec::new()
        } else {
            self.fire_summon_triggers(lobby, seat, card, EffectTrigger::OnSummon)?
        };

        Ok(SummonOutcome {
            card,
            card_name,
            position,
            face_down: set,
            tributes: tributes.iter().copied().collect(),
            triggered,
        })
    }

    /// Flip a face-down monster face-up in attack position.
    ///
    /// Does not use the turn's normal summon, and keeps the monster's
    /// per-turn flags and summon turn.
    pub fn flip_summon(
        &mut self,
        caller: &PlayerId,
        lobby: &LobbyId,
        card: CardId,
    ) -> Result<SummonOutcome, DuelError> {
        let (mut state, seat) = self.load_for(caller, lobby)?;
        let slot = validate_flip_summon(&state, seat, card)?;
        let card_name = self.catalog.name_of(card);

        let monster = state.seats[seat]
            .board
            .get_mut(slot)
            .ok_or(DuelError::CardNotFound(card))?;
        monster.is_face_down = false;
        monster.position = Position::Attack;
        self.commit(&mut state)?;

        self.record(
            DuelEvent::new(&state, EventKind::FlipSummon, seat, format!("flip summoned {}", card_name)).with_card(card),
        )?;
        info!(lobby = %lobby, %seat, card = %card_name, "flip summon");

        let triggered = self.fire_summon_triggers(lobby, seat, card, EffectTrigger::OnFlip)?;
        Ok(SummonOutcome {
            card,
            card_name,
            position: Position::Attack,
            face_down: false,
            tributes: Tributes::new(),
            triggered,
        })
    }

    /// Switch a face-up monster between attack and defense position.
    pub fn change_position(
        &mut self,
        caller: &PlayerId,
        lobby: &LobbyId,
        card: CardId,
    ) -> Result<PositionOutcome, DuelError> {
        let (mut state, seat) = self.load_for(caller, lobby)?;
        let slot = validate_change_position(&state, seat, card)?;
        let card_name = self.catalog.name_of(card);

        let monster = state.seats[seat]
            .board
            .get_mut(slot)
            .ok_or(DuelError::CardNotFound(card))?;
        monster.position = monster.position.flipped();
        monster.has_changed_position = true;
        let position = monster.position;
        self.commit(&mut state)?;

        let description = format!("{} changed to {:?} position", card_name, position);
        self.record(DuelEvent::new(&state, EventKind::PositionChanged, seat, description).with_card(card))?;
        Ok(PositionOutcome {
            card,
            card_name,
            position,
        })
    }

    /// The summoned card's own `trigger` entries, then the opponent's
    /// face-up continuous traps reacting to the summon.
    fn fire_summon_triggers(
        &mut self,
        lobby: &LobbyId,
        seat: Seat,
        card: CardId,
        trigger: EffectTrigger,
    ) -> Result<Vec<TriggerReport>, DuelError> {
        let own = TriggerScan::card(&self.catalog, seat, card, trigger);
        let mut reports = self.fire_triggers(lobby, own)?;

        let state = self.store.load(lobby)?;
        let traps =
            TriggerScan::continuous_traps(&state, &self.catalog, seat.other(), EffectTrigger::OnOpponentSummon);
        reports.extend(self.fire_triggers(lobby, traps)?);
        Ok(reports)
    }
}
