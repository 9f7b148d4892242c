//! Attack declaration and damage step.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{DuelEngine, TriggerReport};
use crate::cards::{BoardCard, CardId};
use crate::core::{LobbyId, PlayerId, Seat};
use crate::effects::EffectTrigger;
use crate::error::DuelError;
use crate::rules::{calculate_damage, validate_attack, BattleResult};
use crate::store::{DuelStore, EventRecorder};
use crate::triggers::{DuelEvent, EventKind, TriggerScan};

/// Result of an attack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub attacker: CardId,
    /// `None` for a direct attack.
    pub target: Option<CardId>,
    /// `None` when the battle was cut short because the attacker or its
    /// target left the field before damage.
    pub battle: Option<BattleResult>,
    /// Defender's traps that fired on the attack.
    pub triggered: Vec<TriggerReport>,
}

impl<S: DuelStore, R: EventRecorder> DuelEngine<S, R> {
    /// Attack with `attacker`, at `target` or directly.
    pub fn declare_attack(
        &mut self,
        caller: &PlayerId,
        lobby: &LobbyId,
        attacker: CardId,
        target: Option<CardId>,
    ) -> Result<AttackOutcome, DuelError> {
        let (mut state, seat) = self.load_for(caller, lobby)?;
        let slot = validate_attack(&state, seat, attacker, target)?;

        if let Some(monster) = state.seats[seat].board.get_mut(slot) {
            monster.has_attacked = true;
        }
        self.commit(&mut state)?;

        let attacker_name = self.catalog.name_of(attacker);
        let description = match target {
            Some(card) => format!("{} attacks {}", attacker_name, self.catalog.name_of(card)),
            None => format!("{} attacks directly", attacker_name),
        };
        self.record(DuelEvent::new(&state, EventKind::AttackDeclared, seat, description).with_card(attacker))?;
        info!(lobby = %lobby, %seat, attacker = %attacker_name, ?target, "attack declared");

        let defender_seat = seat.other();
        let traps =
            TriggerScan::continuous_traps(&state, &self.catalog, defender_seat, EffectTrigger::OnOpponentAttack);
        let triggered = self.fire_triggers(lobby, traps)?;

        let mut state = self.store.load(lobby)?;
        let Some(attacker_slot) = attacking_slot(&state.seats[seat].board, slot, attacker) else {
            debug!(card = %attacker, "attacker left the field before damage");
            return Ok(AttackOutcome {
                attacker,
                target,
                battle: None,
                triggered,
            });
        };
        let attacking = state.seats[seat].board[attacker_slot].clone();
        let defending = match target {
            Some(card) => {
                let Some(monster) = state.seats[defender_seat].board_card_mut(card) else {
                    debug!(%card, "attack target left the field before damage");
                    return Ok(AttackOutcome {
                        attacker,
                        target,
                        battle: None,
                        triggered,
                    });
                };
                // A face-down defender is revealed without flip effects.
                monster.is_face_down = false;
                Some(monster.clone())
            }
            None => None,
        };

        let battle = calculate_damage(seat, &attacking, defending.as_ref());
        if let Some((loser, amount)) = battle.damage {
            state.seats[loser].lose_life(amount);
        }
        let mut destroyed: Vec<(Seat, CardId)> = Vec::with_capacity(2);
        if battle.attacker_destroyed {
            let zones = &mut state.seats[seat];
            zones.board.remove(attacker_slot);
            zones.send_to_graveyard(attacker);
            destroyed.push((seat, attacker));
        }
        if let (true, Some(defender)) = (battle.defender_destroyed, &defending) {
            let zones = &mut state.seats[defender_seat];
            if zones.take_from_board(defender.card_id).is_some() {
                zones.send_to_graveyard(defender.card_id);
                destroyed.push((defender_seat, defender.card_id));
            }
        }
        self.commit(&mut state)?;

        if let Some((loser, amount)) = battle.damage {
            let description = format!("took {} battle damage ({} left)", amount, state.seats[loser].life_points);
            self.record(DuelEvent::new(&state, EventKind::BattleDamage, loser, description))?;
        }
        for &(owner, card) in &destroyed {
            let description = format!("{} was destroyed by battle", self.catalog.name_of(card));
            self.record(DuelEvent::new(&state, EventKind::MonsterDestroyed, owner, description).with_card(card))?;
        }
        debug!(?battle, "damage step done");

        Ok(AttackOutcome {
            attacker,
            target,
            battle: Some(battle),
            triggered,
        })
    }
}

/// Slot of the attacking copy after attack triggers had their chance to
/// move monsters around: the declared slot if it still holds that copy,
/// otherwise the first copy of `card` marked as having attacked.
fn attacking_slot(board: &Vector<BoardCard>, declared: usize, card: CardId) -> Option<usize> {
    let attacked = |m: &BoardCard| m.card_id == card && m.has_attacked;
    match board.get(declared) {
        Some(monster) if attacked(monster) => Some(declared),
        _ => board.iter().position(attacked),
    }
}
