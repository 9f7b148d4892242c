//! Rule checks.
//!
//! Validators are pure: they read a `GameState` and the catalog and return
//! `Ok(())` or the `DuelError` the action would fail with. Action handlers
//! call them before touching anything, and [`available_actions`] calls the
//! very same functions, so the two can never disagree.
//!
//! ## Check order
//!
//! Every gateable check runs in the same order:
//!
//! 1. duel status
//! 2. lingering-effect gate (a restriction beats every other rejection)
//! 3. turn ownership
//! 4. phase
//! 5. chain state
//! 6. action-specific rules

pub mod activation;
pub mod available;
pub mod battle;
pub mod outcome;
pub mod summon;

pub use activation::{
    validate_activate_monster_effect, validate_activate_spell, validate_activate_trap, validate_set_spell_trap,
    ActivationPlan,
};
pub use available::{available_actions, AvailableAction};
pub use battle::{calculate_damage, validate_attack, BattleResult};
pub use outcome::{duel_outcome, DuelOutcome, OutcomeReason};
pub use summon::{
    check_board_capacity, validate_change_position, validate_flip_summon, validate_normal_summon,
    validate_set_monster, Tributes,
};

use crate::cards::{BoardCard, CardId};
use crate::core::{ActionKind, DuelStatus, GameState, Seat};
use crate::error::DuelError;
use crate::lingering::CapabilityGate;

/// Reject everything unless the duel is active.
pub fn ensure_active(state: &GameState) -> Result<(), DuelError> {
    match state.status {
        DuelStatus::Active => Ok(()),
        DuelStatus::NotStarted => Err(DuelError::GameNotStarted),
        DuelStatus::Ended => Err(DuelError::GameNotActive),
    }
}

/// Steps 1 to 5 for actions taken by the turn player in a main phase with
/// no chain open.
pub(crate) fn ensure_main_phase_action(state: &GameState, seat: Seat, kind: ActionKind) -> Result<(), DuelError> {
    ensure_active(state)?;
    CapabilityGate::check(state, kind, seat)?;
    if !state.is_turn_of(seat) {
        return Err(DuelError::NotYourTurn);
    }
    if !state.phase.is_main() {
        return Err(DuelError::invalid(format!("{} is only allowed in a main phase", kind)));
    }
    if !state.chain.is_empty() {
        return Err(DuelError::invalid("resolve the chain first"));
    }
    Ok(())
}

/// Board slot of the first copy of `card` that `blocker` has no objection
/// to.
///
/// Copies rejected by `is_copy` are not considered. When every copy is
/// blocked the first copy's reason is reported, and `missing` is reported
/// when there is no copy at all.
pub(crate) fn pick_board_slot(
    state: &GameState,
    seat: Seat,
    card: CardId,
    is_copy: impl Fn(&BoardCard) -> bool,
    blocker: impl Fn(&BoardCard) -> Option<&'static str>,
    missing: impl FnOnce() -> String,
) -> Result<usize, DuelError> {
    let mut reason = None;
    for (slot, monster) in state.seats[seat].board.iter().enumerate() {
        if monster.card_id != card || !is_copy(monster) {
            continue;
        }
        match blocker(monster) {
            None => return Ok(slot),
            Some(found) => {
                reason.get_or_insert(found);
            }
        }
    }
    Err(DuelError::invalid(reason.map_or_else(missing, |r| r.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lingering::{EffectSource, Expiry};
    use crate::test_support::blank_state;
    use crate::turn::Phase;

    #[test]
    fn test_status_comes_first() {
        let mut state = blank_state();
        state.status = DuelStatus::NotStarted;
        assert_eq!(
            ensure_main_phase_action(&state, Seat::Opponent, ActionKind::NormalSummon),
            Err(DuelError::GameNotStarted)
        );
    }

    #[test]
    fn test_gate_beats_turn_check() {
        let mut state = blank_state();
        let source = EffectSource {
            seat: Seat::Host,
            card: CardId::new(1),
        };
        CapabilityGate::add(
            &mut state,
            ActionKind::SetMonster,
            Seat::Opponent,
            source,
            Expiry::UntilRemoved,
            "Sealed",
        );

        // Not the opponent's turn either, but the restriction is reported
        let err = ensure_main_phase_action(&state, Seat::Opponent, ActionKind::SetMonster).unwrap_err();
        assert_eq!(err.reason(), Some("Sealed"));
    }

    #[test]
    fn test_main_phase_required() {
        let mut state = blank_state();
        state.phase = Phase::Battle;
        assert!(ensure_main_phase_action(&state, Seat::Host, ActionKind::NormalSummon).is_err());
        state.phase = Phase::Main2;
        assert!(ensure_main_phase_action(&state, Seat::Host, ActionKind::NormalSummon).is_ok());
    }
}
