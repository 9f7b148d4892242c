//! Spell/trap placement and chain activation validators.
//!
//! An activation validator returns an [`ActivationPlan`] describing what
//! the action will do, so the handler never re-derives the entry, speed or
//! location on its own.

use super::{ensure_active, ensure_main_phase_action};
use crate::cards::{CardCatalog, CardDefinition, CardId, SpellType};
use crate::core::{ActionKind, DuelConfig, GameState, OptKey, Seat};
use crate::effects::{EffectTrigger, SpellSpeed, TargetSelector, Targets};
use crate::error::DuelError;
use crate::lingering::CapabilityGate;
use crate::stack::check_activation_timing;
use crate::zones::Zone;

/// A checked activation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivationPlan {
    pub card: CardId,
    /// Where the card is activated from.
    pub from: Zone,
    /// Entry that goes on the chain. `None` for a card that stays on the
    /// field but has nothing to resolve; it is turned face-up without a
    /// chain link.
    pub effect_index: Option<usize>,
    pub speed: SpellSpeed,
    pub targets: Targets,
}

/// Check setting a spell or trap from hand face-down.
///
/// Field spells are set in the field slot, replacing the card there.
pub fn validate_set_spell_trap(
    state: &GameState,
    catalog: &CardCatalog,
    config: &DuelConfig,
    seat: Seat,
    card: CardId,
) -> Result<(), DuelError> {
    ensure_main_phase_action(state, seat, ActionKind::SetSpellTrap)?;

    let def = catalog.require(card)?;
    if def.is_monster() {
        return Err(DuelError::invalid(format!("{} is not a spell or trap", def.name)));
    }
    if !state.seats[seat].hand_contains(card) {
        return Err(DuelError::CardNotFound(card));
    }
    if def.spell_type() != Some(SpellType::Field) && !has_spell_trap_room(state, config, seat) {
        return Err(DuelError::invalid(format!(
            "no free spell/trap zone (maximum {})",
            config.max_spell_trap_zones
        )));
    }
    Ok(())
}

/// Check activating a spell from hand or from a face-down set.
pub fn validate_activate_spell(
    state: &GameState,
    catalog: &CardCatalog,
    config: &DuelConfig,
    seat: Seat,
    card: CardId,
    targets: &[CardId],
) -> Result<ActivationPlan, DuelError> {
    ensure_active(state)?;
    CapabilityGate::check(state, ActionKind::ActivateSpell, seat)?;

    let def = catalog.require(card)?;
    if !def.is_spell() {
        return Err(DuelError::invalid(format!("{} is not a spell", def.name)));
    }

    let zones = &state.seats[seat];
    let quick_play = def.spell_type() == Some(SpellType::QuickPlay);
    let field = def.spell_type() == Some(SpellType::Field);

    let set_copy = zones
        .spell_trap_zone
        .iter()
        .map(|c| (Zone::SpellTrap, c))
        .chain(zones.field_spell.iter().map(|c| (Zone::FieldSpell, c)))
        .find(|(_, c)| c.card_id == card && c.is_face_down);

    let from = match set_copy {
        Some((zone, set)) => {
            if quick_play && set.turn_set >= state.turn_number {
                return Err(DuelError::invalid("a set quick-play spell cannot be activated the turn it was set"));
            }
            zone
        }
        None if zones.hand_contains(card) => {
            if !state.is_turn_of(seat) {
                return Err(DuelError::NotYourTurn);
            }
            if !field && !has_spell_trap_room(state, config, seat) {
                return Err(DuelError::invalid(format!(
                    "no free spell/trap zone (maximum {})",
                    config.max_spell_trap_zones
                )));
            }
            Zone::Hand
        }
        None => return Err(DuelError::CardNotFound(card)),
    };

    let effect_index = def.effects_with_trigger(EffectTrigger::OnActivate).next();
    plan(state, config, seat, def, from, effect_index, targets)
}

/// Check activating a trap set on an earlier turn.
pub fn validate_activate_trap(
    state: &GameState,
    catalog: &CardCatalog,
    config: &DuelConfig,
    seat: Seat,
    card: CardId,
    targets: &[CardId],
) -> Result<ActivationPlan, DuelError> {
    ensure_active(state)?;
    CapabilityGate::check(state, ActionKind::ActivateTrap, seat)?;

    let def = catalog.require(card)?;
    if !def.is_trap() {
        return Err(DuelError::invalid(format!("{} is not a trap", def.name)));
    }

    let set = state.seats[seat]
        .spell_trap_zone
        .iter()
        .find(|c| c.card_id == card && c.is_face_down)
        .ok_or_else(|| DuelError::invalid(format!("{} is not set on your field", def.name)))?;
    if set.turn_set >= state.turn_number {
        return Err(DuelError::invalid("a trap cannot be activated the turn it was set"));
    }

    let effect_index = def.effects_with_trigger(EffectTrigger::OnActivate).next();
    plan(state, config, seat, def, Zone::SpellTrap, effect_index, targets)
}

/// Check activating an ignition or quick effect of a face-up monster.
///
/// Without an explicit `effect_index` the first ignition or quick entry
/// is used.
pub fn validate_activate_monster_effect(
    state: &GameState,
    catalog: &CardCatalog,
    config: &DuelConfig,
    seat: Seat,
    card: CardId,
    effect_index: Option<usize>,
    targets: &[CardId],
) -> Result<ActivationPlan, DuelError> {
    ensure_active(state)?;
    CapabilityGate::check(state, ActionKind::ActivateMonsterEffect, seat)?;

    let def = catalog.require(card)?;
    if !def.is_monster() {
        return Err(DuelError::invalid(format!("{} is not a monster", def.name)));
    }
    if !state.seats[seat].face_up_monsters().any(|m| m.card_id == card) {
        return Err(DuelError::invalid(format!("{} is not a face-up monster you control", def.name)));
    }

    let activatable = |i: usize| {
        def.effect(i)
            .is_some_and(|e| matches!(e.trigger, EffectTrigger::Ignition | EffectTrigger::Quick))
    };
    let index = match effect_index {
        Some(i) if activatable(i) => i,
        Some(i) => return Err(DuelError::invalid(format!("effect {} of {} cannot be activated", i, def.name))),
        None => (0..def.effects.len())
            .find(|&i| activatable(i))
            .ok_or_else(|| DuelError::invalid(format!("{} has no effect to activate", def.name)))?,
    };

    plan(state, config, seat, def, Zone::Board, Some(index), targets)
}

/// Timing, chain, once-per-turn and target checks shared by every
/// activation.
fn plan(
    state: &GameState,
    config: &DuelConfig,
    seat: Seat,
    def: &CardDefinition,
    from: Zone,
    effect_index: Option<usize>,
    targets: &[CardId],
) -> Result<ActivationPlan, DuelError> {
    if effect_index.is_none() && !def.stays_on_field() {
        return Err(DuelError::invalid(format!("{} has no effect to activate", def.name)));
    }

    // An index past the end falls back to the card kind's speed
    let speed = def.spell_speed(effect_index.unwrap_or(usize::MAX));
    check_activation_timing(state, seat, speed)?;

    let Some(index) = effect_index else {
        if !targets.is_empty() {
            return Err(DuelError::invalid("this card does not take targets"));
        }
        return Ok(ActivationPlan {
            card: def.id,
            from,
            effect_index: None,
            speed,
            targets: Targets::new(),
        });
    };

    state.chain.check_can_add(def.id, speed, config.max_chain_links)?;

    let effect = def
        .effect(index)
        .ok_or_else(|| DuelError::invalid(format!("{} has no effect {}", def.name, index)))?;
    let key = OptKey {
        seat,
        card: def.id,
        effect_index: index,
    };
    if effect.once_per_turn && state.is_opt_used(&key) {
        return Err(DuelError::invalid(format!("{} can only be used once per turn", def.name)));
    }
    TargetSelector::validate(state, &effect.target, seat, targets)?;

    Ok(ActivationPlan {
        card: def.id,
        from,
        effect_index: Some(index),
        speed,
        targets: targets.iter().copied().collect(),
    })
}

fn has_spell_trap_room(state: &GameState, config: &DuelConfig, seat: Seat) -> bool {
    state.seats[seat].spell_trap_zone.len() < config.max_spell_trap_zones
}
