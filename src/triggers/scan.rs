//! Trigger scanning.
//!
//! A scan walks the relevant cards for a game event and collects every
//! ability entry whose trigger matches, in card order and then definition
//! order. Nothing is executed here; the caller fires each result against
//! freshly loaded state so later triggers observe earlier ones.

use crate::cards::{CardCatalog, CardId, TrapType};
use crate::core::{GameState, OptKey, Seat};
use crate::effects::EffectTrigger;

/// An ability entry selected to fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriggeredEffect {
    /// Seat the effect is attributed to.
    pub controller: Seat,
    pub card: CardId,
    pub effect_index: usize,
    pub trigger: EffectTrigger,
    pub once_per_turn: bool,
}

impl TriggeredEffect {
    /// Once-per-turn bookkeeping key.
    #[must_use]
    pub fn opt_key(&self) -> OptKey {
        OptKey {
            seat: self.controller,
            card: self.card,
            effect_index: self.effect_index,
        }
    }
}

/// Trigger scans over a game state.
pub struct TriggerScan;

impl TriggerScan {
    /// Entries on one card matching `trigger`.
    #[must_use]
    pub fn card(catalog: &CardCatalog, controller: Seat, card: CardId, trigger: EffectTrigger) -> Vec<TriggeredEffect> {
        let Some(def) = catalog.get(card) else {
            return Vec::new();
        };
        def.effects_with_trigger(trigger)
            .map(|effect_index| TriggeredEffect {
                controller,
                card,
                effect_index,
                trigger,
                once_per_turn: def.effects[effect_index].once_per_turn,
            })
            .collect()
    }

    /// Entries on `seat`'s face-up continuous traps matching `trigger`.
    ///
    /// Used for reactions to the other seat's summons and attacks.
    #[must_use]
    pub fn continuous_traps(
        state: &GameState,
        catalog: &CardCatalog,
        seat: Seat,
        trigger: EffectTrigger,
    ) -> Vec<TriggeredEffect> {
        state.seats[seat]
            .spell_trap_zone
            .iter()
            .filter(|c| c.is_face_up())
            .filter(|c| {
                catalog
                    .get(c.card_id)
                    .is_some_and(|def| def.trap_type() == Some(TrapType::Continuous))
            })
            .flat_map(|c| Self::card(catalog, seat, c.card_id, trigger))
            .collect()
    }

    /// Entries on every face-up card `seat` controls matching `trigger`:
    /// monsters, then spell/traps, then the field spell.
    #[must_use]
    pub fn face_up_cards(
        state: &GameState,
        catalog: &CardCatalog,
        seat: Seat,
        trigger: EffectTrigger,
    ) -> Vec<TriggeredEffect> {
        let zones = &state.seats[seat];
        let monsters = zones.face_up_monsters().map(|m| m.card_id);
        let others = zones.face_up_spell_traps().map(|c| c.card_id);
        monsters
            .chain(others)
            .flat_map(|card| Self::card(catalog, seat, card, trigger))
            .collect()
    }

    /// Why a selected entry can no longer fire, if it cannot.
    ///
    /// Checked against the state loaded just before firing: the card must
    /// still be face-up on its controller's field, and a once-per-turn
    /// entry must not have been used this turn.
    #[must_use]
    pub fn blocked_reason(state: &GameState, triggered: &TriggeredEffect) -> Option<&'static str> {
        if triggered.once_per_turn && state.opt_used.contains(&triggered.opt_key()) {
            return Some("already used this turn");
        }
        if !state.seats[triggered.controller].is_face_up_on_field(triggered.card) {
            return Some("card is no longer face-up on the field");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{BoardCard, CardDefinition, Position, SpellTrapCard, SpellType};
    use crate::effects::{EffectAction, EffectDef, Who};
    use crate::test_support::blank_state;

    const MONSTER: CardId = CardId::new(1);
    const CONT_TRAP: CardId = CardId::new(2);
    const NORMAL_TRAP: CardId = CardId::new(3);
    const FIELD: CardId = CardId::new(4);

    fn catalog() -> CardCatalog {
        let burn = || EffectDef::new(EffectTrigger::OnOpponentSummon, EffectAction::damage(300, Who::Opponent));
        CardCatalog::from_definitions([
            CardDefinition::monster(MONSTER, "Twin Caller", 4, 1500, 1200)
                .with_effect(EffectDef::new(EffectTrigger::OnSummon, EffectAction::draw(1, Who::Controller)))
                .with_effect(EffectDef::new(EffectTrigger::OnFlip, EffectAction::draw(1, Who::Controller)))
                .with_effect(
                    EffectDef::new(EffectTrigger::OnSummon, EffectAction::damage(200, Who::Opponent)).once_per_turn(),
                ),
            CardDefinition::trap(CONT_TRAP, "Watchtower", TrapType::Continuous).with_effect(burn()),
            CardDefinition::trap(NORMAL_TRAP, "Snare", TrapType::Normal).with_effect(burn()),
            CardDefinition::spell(FIELD, "Haunted Moor", SpellType::Field).with_effect(EffectDef::new(
                EffectTrigger::OnStandby,
                EffectAction::GainLifePoints {
                    amount: 200,
                    who: Who::Controller,
                },
            )),
        ])
        .unwrap()
    }

    #[test]
    fn test_card_scan_in_definition_order() {
        let found = TriggerScan::card(&catalog(), Seat::Host, MONSTER, EffectTrigger::OnSummon);

        let indices: Vec<_> = found.iter().map(|t| t.effect_index).collect();
        assert_eq!(indices, vec![0, 2]);
        assert!(!found[0].once_per_turn);
        assert!(found[1].once_per_turn);
    }

    #[test]
    fn test_only_face_up_continuous_traps() {
        let mut state = blank_state();
        let opp = &mut state.seats[Seat::Opponent];
        opp.spell_trap_zone.push_back(SpellTrapCard::activated(NORMAL_TRAP, 1));
        opp.spell_trap_zone.push_back(SpellTrapCard::set(CONT_TRAP, 1));

        let catalog = catalog();
        let traps = TriggerScan::continuous_traps(&state, &catalog, Seat::Opponent, EffectTrigger::OnOpponentSummon);
        assert!(traps.is_empty());

        state.seats[Seat::Opponent].spell_trap_zone[1].activate();
        let found = TriggerScan::continuous_traps(&state, &catalog, Seat::Opponent, EffectTrigger::OnOpponentSummon);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].card, CONT_TRAP);
        assert_eq!(found[0].controller, Seat::Opponent);
    }

    #[test]
    fn test_face_up_cards_include_field_spell() {
        let mut state = blank_state();
        state.seats[Seat::Host].field_spell = Some(SpellTrapCard::activated(FIELD, 1));

        let found = TriggerScan::face_up_cards(&state, &catalog(), Seat::Host, EffectTrigger::OnStandby);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].card, FIELD);
    }

    #[test]
    fn test_blocked_reason() {
        let mut state = blank_state();
        let triggered = TriggerScan::card(&catalog(), Seat::Host, MONSTER, EffectTrigger::OnSummon)[1];

        assert!(TriggerScan::blocked_reason(&state, &triggered).is_some());

        state.seats[Seat::Host]
            .board
            .push_back(BoardCard::new(MONSTER, 1500, 1200, Position::Attack, 1));
        assert_eq!(TriggerScan::blocked_reason(&state, &triggered), None);

        state.opt_used.insert(triggered.opt_key());
        assert_eq!(TriggerScan::blocked_reason(&state, &triggered), Some("already used this turn"));
    }
}
