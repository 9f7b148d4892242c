//! Duel events.
//!
//! Every meaningful sub-step of an action produces a `DuelEvent` for the
//! event recorder (spectators and replays). Events name the seat they are
//! attributed to, which is not always the seat that made the request: an
//! opponent's trap firing during a summon is attributed to the opponent.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{GameState, LobbyId, PlayerId, Seat};
use crate::turn::Phase;

/// What happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    NormalSummon,
    TributeSummon,
    MonsterSet,
    FlipSummon,
    TributePaid,
    PositionChanged,
    SpellTrapSet,
    CardActivated,
    ChainLinkAdded,
    ChainLinkResolved,
    ChainLinkNegated,
    ChainResolved,
    PriorityPassed,
    EffectActivated,
    EffectFailed,
    AttackDeclared,
    BattleDamage,
    MonsterDestroyed,
    PhaseChanged,
    TurnEnded,
    CardDrawn,
    DeckOut,
}

impl EventKind {
    /// Wire name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EventKind::NormalSummon => "normal_summon",
            EventKind::TributeSummon => "tribute_summon",
            EventKind::MonsterSet => "monster_set",
            EventKind::FlipSummon => "flip_summon",
            EventKind::TributePaid => "tribute_paid",
            EventKind::PositionChanged => "position_changed",
            EventKind::SpellTrapSet => "spell_trap_set",
            EventKind::CardActivated => "card_activated",
            EventKind::ChainLinkAdded => "chain_link_added",
            EventKind::ChainLinkResolved => "chain_link_resolved",
            EventKind::ChainLinkNegated => "chain_link_negated",
            EventKind::ChainResolved => "chain_resolved",
            EventKind::PriorityPassed => "priority_passed",
            EventKind::EffectActivated => "effect_activated",
            EventKind::EffectFailed => "effect_failed",
            EventKind::AttackDeclared => "attack_declared",
            EventKind::BattleDamage => "battle_damage",
            EventKind::MonsterDestroyed => "monster_destroyed",
            EventKind::PhaseChanged => "phase_changed",
            EventKind::TurnEnded => "turn_ended",
            EventKind::CardDrawn => "card_drawn",
            EventKind::DeckOut => "deck_out",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An event with the duel context it happened in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelEvent {
    pub lobby_id: LobbyId,
    pub kind: EventKind,
    /// Seat the event is attributed to.
    pub seat: Seat,
    /// Player sitting in `seat`.
    pub player: PlayerId,
    pub turn: u32,
    pub phase: Phase,
    pub card: Option<CardId>,
    pub description: String,
}

impl DuelEvent {
    /// An event attributed to `seat`, stamped with the state's turn context.
    #[must_use]
    pub fn new(state: &GameState, kind: EventKind, seat: Seat, description: impl Into<String>) -> Self {
        Self {
            lobby_id: state.lobby_id.clone(),
            kind,
            seat,
            player: state.players[seat].clone(),
            turn: state.turn_number,
            phase: state.phase,
            card: None,
            description: description.into(),
        }
    }

    /// Attach the card involved (builder pattern).
    #[must_use]
    pub fn with_card(mut self, card: CardId) -> Self {
        self.card = Some(card);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::blank_state;

    #[test]
    fn test_new_stamps_context() {
        let mut state = blank_state();
        state.turn_number = 5;
        state.phase = Phase::Battle;

        let event = DuelEvent::new(&state, EventKind::AttackDeclared, Seat::Opponent, "attack")
            .with_card(CardId::new(3));

        assert_eq!(event.turn, 5);
        assert_eq!(event.phase, Phase::Battle);
        assert_eq!(event.player, state.players[Seat::Opponent]);
        assert_eq!(event.card, Some(CardId::new(3)));
    }

    #[test]
    fn test_kind_names_match_serde() {
        for kind in [EventKind::TributePaid, EventKind::EffectActivated, EventKind::DeckOut] {
            assert_eq!(serde_json::to_string(&kind).unwrap(), format!("\"{}\"", kind.name()));
        }
    }
}
