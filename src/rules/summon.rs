//! Summon, set, flip and position-change validators.

use smallvec::SmallVec;

use super::{ensure_main_phase_action, pick_board_slot};
use crate::cards::{BoardCard, CardCatalog, CardDefinition, CardId};
use crate::core::{ActionKind, DuelConfig, GameState, Seat};
use crate::error::DuelError;

/// Monsters offered as tributes. Rarely more than two.
pub type Tributes = SmallVec<[CardId; 2]>;

/// Check a normal (or tribute) summon of `card` from hand.
///
/// The hand itself is not checked here; the action removes the card after
/// tributes are paid and reports `CardNotFound` if it is missing. Zone
/// capacity is checked separately by [`check_board_capacity`].
pub fn validate_normal_summon(
    state: &GameState,
    catalog: &CardCatalog,
    config: &DuelConfig,
    seat: Seat,
    card: CardId,
    tributes: &[CardId],
) -> Result<(), DuelError> {
    validate_from_hand(state, catalog, config, seat, card, tributes, ActionKind::NormalSummon)
}

/// Check setting `card` face-down in defense position.
///
/// Setting uses the turn's normal summon and pays tributes the same way.
pub fn validate_set_monster(
    state: &GameState,
    catalog: &CardCatalog,
    config: &DuelConfig,
    seat: Seat,
    card: CardId,
    tributes: &[CardId],
) -> Result<(), DuelError> {
    validate_from_hand(state, catalog, config, seat, card, tributes, ActionKind::SetMonster)
}

fn validate_from_hand(
    state: &GameState,
    catalog: &CardCatalog,
    config: &DuelConfig,
    seat: Seat,
    card: CardId,
    tributes: &[CardId],
    kind: ActionKind,
) -> Result<(), DuelError> {
    ensure_main_phase_action(state, seat, kind)?;

    if state.seats[seat].normal_summoned_this_turn {
        return Err(DuelError::invalid("you already normal summoned or set this turn"));
    }

    let def = require_monster(catalog, card)?;
    check_tributes(state, seat, def, config, tributes)
}

/// Check flipping a face-down monster face-up in attack position.
///
/// Flip summons do not use the turn's normal summon. Returns the board slot
/// of the first face-down copy that may flip.
pub fn validate_flip_summon(state: &GameState, seat: Seat, card: CardId) -> Result<usize, DuelError> {
    ensure_main_phase_action(state, seat, ActionKind::FlipSummon)?;

    pick_board_slot(
        state,
        seat,
        card,
        |m| m.is_face_down,
        |m| {
            (m.turn_summoned >= state.turn_number).then_some("a monster cannot be flip summoned the turn it was set")
        },
        || format!("{} is not a face-down monster you control", card),
    )
}

/// Check switching a face-up monster between attack and defense.
///
/// Returns the board slot of the first face-up copy that may switch.
pub fn validate_change_position(state: &GameState, seat: Seat, card: CardId) -> Result<usize, DuelError> {
    ensure_main_phase_action(state, seat, ActionKind::ChangePosition)?;

    pick_board_slot(
        state,
        seat,
        card,
        BoardCard::is_face_up,
        |m| {
            if m.turn_summoned >= state.turn_number {
                Some("a monster cannot change position the turn it was summoned")
            } else if m.has_changed_position {
                Some("this monster already changed position this turn")
            } else if m.has_attacked {
                Some("a monster that attacked cannot change position")
            } else {
                None
            }
        },
        || format!("{} is not a face-up monster you control", card),
    )
}

/// Check there is a free monster zone once `tributes` have left the board.
pub fn check_board_capacity(
    state: &GameState,
    config: &DuelConfig,
    seat: Seat,
    tributes: &[CardId],
) -> Result<(), DuelError> {
    if state.seats[seat].board_has_room(config.max_monster_zones, tributes.len()) {
        Ok(())
    } else {
        Err(DuelError::invalid(format!(
            "no free monster zone (maximum {})",
            config.max_monster_zones
        )))
    }
}

fn require_monster(catalog: &CardCatalog, card: CardId) -> Result<&CardDefinition, DuelError> {
    let def = catalog.require(card)?;
    if !def.is_monster() {
        return Err(DuelError::invalid(format!("{} is not a monster", def.name)));
    }
    Ok(def)
}

/// Exact tribute count, every tribute on the seat's board. Duplicate ids
/// need as many copies on the board.
fn check_tributes(
    state: &GameState,
    seat: Seat,
    def: &CardDefinition,
    config: &DuelConfig,
    tributes: &[CardId],
) -> Result<(), DuelError> {
    let required = usize::from(def.tributes_required(config));
    if tributes.len() != required {
        return Err(DuelError::invalid(format!(
            "{} requires {} tribute(s), {} offered",
            def.name,
            required,
            tributes.len()
        )));
    }

    let mut board: Vec<CardId> = state.seats[seat].board.iter().map(|m| m.card_id).collect();
    for tribute in tributes {
        match board.iter().position(|c| c == tribute) {
            Some(idx) => {
                board.swap_remove(idx);
            }
            None => {
                return Err(DuelError::invalid(format!("{} is not a monster you can tribute", tribute)));
            }
        }
    }
    Ok(())
}
