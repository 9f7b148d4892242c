//! Legal action enumeration.
//!
//! Every entry is produced by running the validator the matching action
//! runs, with tributes and targets chosen the way an automated caller would
//! (first monsters on the board, first legal targets). An action listed
//! here is therefore accepted when requested with those choices.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::activation::{
    validate_activate_monster_effect, validate_activate_spell, validate_activate_trap, validate_set_spell_trap,
};
use super::battle::validate_attack;
use super::ensure_active;
use super::summon::{
    check_board_capacity, validate_change_position, validate_flip_summon, validate_normal_summon,
    validate_set_monster, Tributes,
};
use crate::cards::{CardCatalog, CardId, Position};
use crate::core::{DuelConfig, GameState, Seat};
use crate::effects::{EffectTrigger, TargetSelector, Targets};
use crate::turn::{Phase, TurnMachine};

/// A legal action for one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AvailableAction {
    NormalSummon { card: CardId, position: Position, tributes: Tributes },
    SetMonster { card: CardId, tributes: Tributes },
    FlipSummon { card: CardId },
    ChangePosition { card: CardId },
    SetSpellTrap { card: CardId },
    ActivateSpell { card: CardId, targets: Targets },
    ActivateTrap { card: CardId, targets: Targets },
    ActivateMonsterEffect { card: CardId, effect_index: usize, targets: Targets },
    DeclareAttack { attacker: CardId, target: Option<CardId> },
    PassPriority,
    AdvancePhase { to: Phase },
    EndTurn,
}

/// Every action `seat` could take right now.
#[must_use]
pub fn available_actions(
    state: &GameState,
    catalog: &CardCatalog,
    config: &DuelConfig,
    seat: Seat,
) -> Vec<AvailableAction> {
    let mut actions = Vec::new();
    if ensure_active(state).is_err() {
        return actions;
    }

    let zones = &state.seats[seat];
    let mut seen = FxHashSet::default();
    let hand: Vec<CardId> = zones.hand.iter().copied().filter(|&c| seen.insert(c)).collect();

    // === Hand ===
    for &card in &hand {
        let Some(def) = catalog.get(card) else {
            continue;
        };

        if def.is_monster() {
            let tributes: Tributes = zones
                .board
                .iter()
                .take(usize::from(def.tributes_required(config)))
                .map(|m| m.card_id)
                .collect();
            let fits = check_board_capacity(state, config, seat, &tributes).is_ok();
            if fits && validate_normal_summon(state, catalog, config, seat, card, &tributes).is_ok() {
                for position in [Position::Attack, Position::Defense] {
                    actions.push(AvailableAction::NormalSummon {
                        card,
                        position,
                        tributes: tributes.clone(),
                    });
                }
            }
            if fits && validate_set_monster(state, catalog, config, seat, card, &tributes).is_ok() {
                actions.push(AvailableAction::SetMonster { card, tributes });
            }
            continue;
        }

        if validate_set_spell_trap(state, catalog, config, seat, card).is_ok() {
            actions.push(AvailableAction::SetSpellTrap { card });
        }
        if def.is_spell() {
            let targets = sample_targets(state, catalog, seat, card, activation_entry(catalog, card));
            if validate_activate_spell(state, catalog, config, seat, card, &targets).is_ok() {
                actions.push(AvailableAction::ActivateSpell { card, targets });
            }
        }
    }

    // === Monster zones ===
    for monster in zones.board.iter() {
        let card = monster.card_id;
        if monster.is_face_down {
            if validate_flip_summon(state, seat, card).is_ok() {
                push_unique(&mut actions, AvailableAction::FlipSummon { card });
            }
            continue;
        }
        if validate_change_position(state, seat, card).is_ok() {
            push_unique(&mut actions, AvailableAction::ChangePosition { card });
        }

        let Some(def) = catalog.get(card) else {
            continue;
        };
        for index in 0..def.effects.len() {
            let targets = sample_targets(state, catalog, seat, card, Some(index));
            if validate_activate_monster_effect(state, catalog, config, seat, card, Some(index), &targets).is_ok() {
                push_unique(
                    &mut actions,
                    AvailableAction::ActivateMonsterEffect {
                        card,
                        effect_index: index,
                        targets,
                    },
                );
            }
        }
    }

    // === Set spells and traps ===
    let set_cards = zones
        .spell_trap_zone
        .iter()
        .chain(zones.field_spell.iter())
        .filter(|c| c.is_face_down)
        .map(|c| c.card_id);
    for card in set_cards {
        let Some(def) = catalog.get(card) else {
            continue;
        };
        let targets = sample_targets(state, catalog, seat, card, activation_entry(catalog, card));
        if def.is_spell() && validate_activate_spell(state, catalog, config, seat, card, &targets).is_ok() {
            push_unique(&mut actions, AvailableAction::ActivateSpell { card, targets });
        } else if def.is_trap() && validate_activate_trap(state, catalog, config, seat, card, &targets).is_ok() {
            push_unique(&mut actions, AvailableAction::ActivateTrap { card, targets });
        }
    }

    // === Battle ===
    for attacker in zones.board.iter().map(|m| m.card_id) {
        if validate_attack(state, seat, attacker, None).is_ok() {
            push_unique(&mut actions, AvailableAction::DeclareAttack { attacker, target: None });
        }
        for defender in state.seats[seat.other()].board.iter().map(|m| m.card_id) {
            if validate_attack(state, seat, attacker, Some(defender)).is_ok() {
                push_unique(
                    &mut actions,
                    AvailableAction::DeclareAttack {
                        attacker,
                        target: Some(defender),
                    },
                );
            }
        }
    }

    // === Turn ===
    if state.chain.priority() == Some(seat) {
        actions.push(AvailableAction::PassPriority);
    }
    if let Ok(to) = TurnMachine::check_advance(state, seat) {
        actions.push(AvailableAction::AdvancePhase { to });
    }
    if TurnMachine::check_end_turn(state, seat).is_ok() {
        actions.push(AvailableAction::EndTurn);
    }

    actions
}

fn activation_entry(catalog: &CardCatalog, card: CardId) -> Option<usize> {
    catalog
        .get(card)
        .and_then(|def| def.effects_with_trigger(EffectTrigger::OnActivate).next())
}

/// Targets an automated caller would pick for entry `index` of `card`.
fn sample_targets(state: &GameState, catalog: &CardCatalog, seat: Seat, card: CardId, index: Option<usize>) -> Targets {
    index
        .and_then(|i| catalog.get(card)?.effect(i))
        .map(|effect| TargetSelector::auto_select(state, &effect.target, seat))
        .unwrap_or_default()
}

/// Copies of a card on the board produce identical entries; list them once.
fn push_unique(actions: &mut Vec<AvailableAction>, action: AvailableAction) {
    if !actions.contains(&action) {
        actions.push(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{BoardCard, CardDefinition, SpellTrapCard, SpellType, TrapType};
    use crate::core::DuelStatus;
    use crate::effects::{EffectAction, EffectDef, TargetSide, TargetSpec, Who};
    use crate::test_support::blank_state;

    const SCOUT: CardId = CardId::new(1);
    const DRAGON: CardId = CardId::new(2);
    const POT: CardId = CardId::new(3);
    const SNARE: CardId = CardId::new(4);
    const RAID: CardId = CardId::new(5);

    fn catalog() -> CardCatalog {
        CardCatalog::from_definitions([
            CardDefinition::monster(SCOUT, "Field Scout", 4, 1400, 1200),
            CardDefinition::monster(DRAGON, "Storm Wyrm", 8, 2800, 2400),
            CardDefinition::spell(POT, "Deep Pot", SpellType::Normal).with_effect(EffectDef::new(
                EffectTrigger::OnActivate,
                EffectAction::draw(2, Who::Controller),
            )),
            CardDefinition::trap(SNARE, "Snare", TrapType::Normal).with_effect(
                EffectDef::new(EffectTrigger::OnActivate, EffectAction::Destroy)
                    .with_target(TargetSpec::monster(TargetSide::Opponent, 1)),
            ),
            CardDefinition::spell(RAID, "Raid", SpellType::Normal).with_effect(
                EffectDef::new(EffectTrigger::OnActivate, EffectAction::Destroy)
                    .with_target(TargetSpec::monster(TargetSide::Opponent, 1)),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_opening_main_phase() {
        let mut state = blank_state();
        state.seats[Seat::Host].hand = [SCOUT, SCOUT, DRAGON, POT, RAID].into_iter().collect();

        let actions = available_actions(&state, &catalog(), &DuelConfig::default(), Seat::Host);

        assert!(actions.contains(&AvailableAction::NormalSummon {
            card: SCOUT,
            position: Position::Defense,
            tributes: Tributes::new()
        }));
        // Duplicate hand cards are listed once per position
        let scout_summons = actions
            .iter()
            .filter(|a| matches!(a, AvailableAction::NormalSummon { card, .. } if *card == SCOUT))
            .count();
        assert_eq!(scout_summons, 2);
        // No tributes available for the dragon
        assert!(!actions
            .iter()
            .any(|a| matches!(a, AvailableAction::NormalSummon { card, .. } if *card == DRAGON)));
        assert!(actions.contains(&AvailableAction::ActivateSpell {
            card: POT,
            targets: Targets::new()
        }));
        // Nothing to destroy yet
        assert!(!actions
            .iter()
            .any(|a| matches!(a, AvailableAction::ActivateSpell { card, .. } if *card == RAID)));
        assert!(actions.contains(&AvailableAction::SetSpellTrap { card: RAID }));
        assert!(actions.contains(&AvailableAction::EndTurn));
        assert!(actions.contains(&AvailableAction::AdvancePhase { to: Phase::BattleStart }));
    }

    #[test]
    fn test_opponent_can_respond_with_trap() {
        let mut state = blank_state();
        state.turn_number = 2;
        state.seats[Seat::Opponent].spell_trap_zone.push_back(SpellTrapCard::set(SNARE, 1));
        state.seats[Seat::Host]
            .board
            .push_back(BoardCard::new(SCOUT, 1400, 1200, Position::Attack, 2));

        let actions = available_actions(&state, &catalog(), &DuelConfig::default(), Seat::Opponent);

        assert_eq!(
            actions,
            vec![AvailableAction::ActivateTrap {
                card: SNARE,
                targets: [SCOUT].into_iter().collect()
            }]
        );
    }

    #[test]
    fn test_ended_duel_has_no_actions() {
        let mut state = blank_state();
        state.seats[Seat::Host].hand.push_back(SCOUT);
        state.status = DuelStatus::Ended;
        assert!(available_actions(&state, &catalog(), &DuelConfig::default(), Seat::Host).is_empty());
    }

    #[test]
    fn test_listed_actions_match_validators() {
        let mut state = blank_state();
        let config = DuelConfig::default();
        state.seats[Seat::Host].hand = [DRAGON].into_iter().collect();
        for _ in 0..2 {
            state.seats[Seat::Host]
                .board
                .push_back(BoardCard::new(SCOUT, 1400, 1200, Position::Attack, 0));
        }

        let actions = available_actions(&state, &catalog(), &config, Seat::Host);
        let Some(AvailableAction::NormalSummon { card, tributes, .. }) = actions
            .iter()
            .find(|a| matches!(a, AvailableAction::NormalSummon { .. }))
        else {
            panic!("tribute summon should be available");
        };
        assert_eq!(*card, DRAGON);
        assert_eq!(tributes.as_slice(), &[SCOUT, SCOUT]);
        assert!(validate_normal_summon(&state, &catalog(), &config, Seat::Host, *card, tributes).is_ok());
    }
}
