//! Attack validation and damage calculation.

use serde::{Deserialize, Serialize};

use super::{ensure_active, pick_board_slot};
use crate::cards::{BoardCard, CardId};
use crate::core::{ActionKind, GameState, Seat};
use crate::error::DuelError;
use crate::lingering::CapabilityGate;
use crate::turn::Phase;

/// Check `attacker` may attack `target` (or the opponent directly).
///
/// Returns the board slot of the first copy of `attacker` that is able to
/// attack.
pub fn validate_attack(
    state: &GameState,
    seat: Seat,
    attacker: CardId,
    target: Option<CardId>,
) -> Result<usize, DuelError> {
    ensure_active(state)?;
    CapabilityGate::check(state, ActionKind::DeclareAttack, seat)?;
    if !state.is_turn_of(seat) {
        return Err(DuelError::NotYourTurn);
    }
    if state.phase != Phase::Battle {
        return Err(DuelError::invalid("attacks are declared in the battle phase"));
    }
    if state.turn_number <= 1 {
        return Err(DuelError::invalid("no attacks on the first turn"));
    }
    if !state.chain.is_empty() {
        return Err(DuelError::invalid("resolve the chain first"));
    }

    let slot = pick_board_slot(
        state,
        seat,
        attacker,
        |_| true,
        |m| {
            if m.is_face_down || !m.in_attack_position() {
                Some("only face-up attack position monsters can attack")
            } else if m.has_attacked {
                Some("this monster already attacked this turn")
            } else {
                None
            }
        },
        || format!("{} is not a monster you control", attacker),
    )?;

    let defenders = &state.seats[seat.other()].board;
    match target {
        None if defenders.is_empty() => Ok(slot),
        None => Err(DuelError::invalid("cannot attack directly while the opponent controls a monster")),
        Some(card) if defenders.iter().any(|m| m.card_id == card) => Ok(slot),
        Some(card) => Err(DuelError::invalid(format!("{} is not an opponent's monster", card))),
    }
}

/// Outcome of damage calculation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResult {
    pub attacker_destroyed: bool,
    pub defender_destroyed: bool,
    /// Seat that takes battle damage, and how much.
    pub damage: Option<(Seat, i64)>,
}

/// Damage calculation for `attacker` controlled by `seat`.
///
/// `defender` is `None` for a direct attack. A face-down defender must
/// already be flipped face-up; only its position and stats matter here.
#[must_use]
pub fn calculate_damage(seat: Seat, attacker: &BoardCard, defender: Option<&BoardCard>) -> BattleResult {
    let Some(defender) = defender else {
        return BattleResult {
            damage: Some((seat.other(), attacker.attack)).filter(|(_, d)| *d > 0),
            ..BattleResult::default()
        };
    };

    let attack = attacker.attack;
    let defense_stat = defender.battle_stat();
    let mut result = BattleResult::default();

    if defender.in_attack_position() {
        if attack > defense_stat {
            result.defender_destroyed = true;
            result.damage = Some((seat.other(), attack - defense_stat));
        } else if attack < defense_stat {
            result.attacker_destroyed = true;
            result.damage = Some((seat, defense_stat - attack));
        } else if attack > 0 {
            result.attacker_destroyed = true;
            result.defender_destroyed = true;
        }
    } else if attack > defense_stat {
        result.defender_destroyed = true;
    } else if attack < defense_stat {
        result.damage = Some((seat, defense_stat - attack));
    }

    result.attacker_destroyed &= !attacker.protection.cannot_be_destroyed_by_battle;
    result.defender_destroyed &= !defender.protection.cannot_be_destroyed_by_battle;
    result
}
