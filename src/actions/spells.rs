//! Setting spells/traps and putting activations on the chain.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::DuelEngine;
use crate::cards::{CardId, SpellTrapCard, SpellType};
use crate::core::{GameState, LinkId, LobbyId, OptKey, PlayerId, Seat};
use crate::error::DuelError;
use crate::rules::{
    validate_activate_monster_effect, validate_activate_spell, validate_activate_trap, validate_set_spell_trap,
    ActivationPlan,
};
use crate::store::{DuelStore, EventRecorder};
use crate::triggers::{DuelEvent, EventKind};
use crate::zones::Zone;

/// Result of setting a spell or trap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSpellTrapOutcome {
    pub card: CardId,
    pub card_name: String,
    pub zone: Zone,
    /// Field spell sent to the graveyard to make room.
    pub replaced: Option<CardId>,
}

/// Result of an activation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationOutcome {
    pub card: CardId,
    pub card_name: String,
    /// Link added to the chain. `None` when the card was only turned
    /// face-up.
    pub link: Option<LinkId>,
    pub chain_length: usize,
    /// Seat that may respond next.
    pub priority: Option<Seat>,
}

impl<S: DuelStore, R: EventRecorder> DuelEngine<S, R> {
    /// Set a spell or trap from hand face-down.
    pub fn set_spell_trap(
        &mut self,
        caller: &PlayerId,
        lobby: &LobbyId,
        card: CardId,
    ) -> Result<SetSpellTrapOutcome, DuelError> {
        let (mut state, seat) = self.load_for(caller, lobby)?;
        validate_set_spell_trap(&state, &self.catalog, &self.config, seat, card)?;
        let def = self.catalog.require(card)?;
        let card_name = def.name.clone();
        let field = def.spell_type() == Some(SpellType::Field);

        let turn = state.turn_number;
        let zones = &mut state.seats[seat];
        if !zones.remove_from_hand(card) {
            return Err(DuelError::CardNotFound(card));
        }
        let (zone, replaced) = if field {
            let replaced = zones.place_field_spell(SpellTrapCard::set(card, turn)).map(|old| old.card_id);
            if let Some(old) = replaced {
                zones.send_to_graveyard(old);
            }
            (Zone::FieldSpell, replaced)
        } else {
            zones.spell_trap_zone.push_back(SpellTrapCard::set(card, turn));
            (Zone::SpellTrap, None)
        };
        self.commit(&mut state)?;

        self.record(DuelEvent::new(&state, EventKind::SpellTrapSet, seat, format!("set a card in the {}", zone)))?;
        Ok(SetSpellTrapOutcome {
            card,
            card_name,
            zone,
            replaced,
        })
    }

    /// Activate a spell from hand or from a face-down set.
    pub fn activate_spell(
        &mut self,
        caller: &PlayerId,
        lobby: &LobbyId,
        card: CardId,
        targets: &[CardId],
    ) -> Result<ActivationOutcome, DuelError> {
        let (state, seat) = self.load_for(caller, lobby)?;
        let plan = validate_activate_spell(&state, &self.catalog, &self.config, seat, card, targets)?;
        self.apply_activation(state, seat, plan)
    }

    /// Activate a trap set on an earlier turn.
    pub fn activate_trap(
        &mut self,
        caller: &PlayerId,
        lobby: &LobbyId,
        card: CardId,
        targets: &[CardId],
    ) -> Result<ActivationOutcome, DuelError> {
        let (state, seat) = self.load_for(caller, lobby)?;
        let plan = validate_activate_trap(&state, &self.catalog, &self.config, seat, card, targets)?;
        self.apply_activation(state, seat, plan)
    }

    /// Activate an ignition or quick effect of a face-up monster.
    pub fn activate_monster_effect(
        &mut self,
        caller: &PlayerId,
        lobby: &LobbyId,
        card: CardId,
        effect_index: Option<usize>,
        targets: &[CardId],
    ) -> Result<ActivationOutcome, DuelError> {
        let (state, seat) = self.load_for(caller, lobby)?;
        let plan =
            validate_activate_monster_effect(&state, &self.catalog, &self.config, seat, card, effect_index, targets)?;
        self.apply_activation(state, seat, plan)
    }

    /// Respond to an open chain with any activatable card.
    ///
    /// Spells, traps and monster effects are told apart by the card's kind.
    pub fn chain_response(
        &mut self,
        caller: &PlayerId,
        lobby: &LobbyId,
        card: CardId,
        effect_index: Option<usize>,
        targets: &[CardId],
    ) -> Result<ActivationOutcome, DuelError> {
        let (state, seat) = self.load_for(caller, lobby)?;
        if state.chain.is_empty() {
            return Err(DuelError::chain("there is no chain to respond to"));
        }

        let def = self.catalog.require(card)?;
        let plan = if def.is_trap() {
            validate_activate_trap(&state, &self.catalog, &self.config, seat, card, targets)?
        } else if def.is_spell() {
            validate_activate_spell(&state, &self.catalog, &self.config, seat, card, targets)?
        } else {
            validate_activate_monster_effect(&state, &self.catalog, &self.config, seat, card, effect_index, targets)?
        };
        self.apply_activation(state, seat, plan)
    }

    /// Place or flip the card, push its link and commit.
    fn apply_activation(
        &mut self,
        mut state: GameState,
        seat: Seat,
        plan: ActivationPlan,
    ) -> Result<ActivationOutcome, DuelError> {
        let def = self.catalog.require(plan.card)?;
        let card_name = def.name.clone();
        let field = def.spell_type() == Some(SpellType::Field);
        let once_per_turn = plan
            .effect_index
            .and_then(|i| def.effect(i))
            .is_some_and(|e| e.once_per_turn);

        let turn = state.turn_number;
        let zones = &mut state.seats[seat];
        match plan.from {
            Zone::Hand => {
                if !zones.remove_from_hand(plan.card) {
                    return Err(DuelError::CardNotFound(plan.card));
                }
                let placed = SpellTrapCard::activated(plan.card, turn);
                if field {
                    if let Some(old) = zones.place_field_spell(placed) {
                        zones.send_to_graveyard(old.card_id);
                    }
                } else {
                    zones.spell_trap_zone.push_back(placed);
                }
            }
            Zone::SpellTrap => {
                if let Some(set) = zones
                    .spell_trap_zone
                    .iter_mut()
                    .find(|c| c.card_id == plan.card && c.is_face_down)
                {
                    set.activate();
                }
            }
            Zone::FieldSpell => {
                if let Some(set) = zones.field_spell.as_mut() {
                    set.activate();
                }
            }
            _ => {}
        }

        let link = match plan.effect_index {
            Some(index) => {
                let link = state.chain.push(
                    seat,
                    plan.card,
                    index,
                    plan.speed,
                    plan.targets.clone(),
                    self.config.max_chain_links,
                )?;
                if once_per_turn {
                    state.mark_opt(OptKey {
                        seat,
                        card: plan.card,
                        effect_index: index,
                    });
                }
                Some(link)
            }
            None => None,
        };
        self.commit(&mut state)?;

        self.record(
            DuelEvent::new(&state, EventKind::CardActivated, seat, format!("activated {}", card_name))
                .with_card(plan.card),
        )?;
        if link.is_some() {
            let description = format!("{} is chain link {}", card_name, state.chain.len());
            self.record(DuelEvent::new(&state, EventKind::ChainLinkAdded, seat, description).with_card(plan.card))?;
        }
        info!(
            lobby = %state.lobby_id,
            %seat,
            card = %card_name,
            speed = %plan.speed,
            chain = state.chain.len(),
            "card activated"
        );

        Ok(ActivationOutcome {
            card: plan.card,
            card_name,
            link,
            chain_length: state.chain.len(),
            priority: state.chain.priority(),
        })
    }
}
