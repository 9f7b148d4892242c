//! The capability gate.
//!
//! One place every gateable action asks "is this seat allowed to do this
//! right now?". Action handlers and validators consult it before any other
//! rule check, so a restriction always wins over ordinary rejections.

use tracing::debug;

use super::effect::{EffectSource, Expiry, LingeringEffect};
use crate::cards::CardId;
use crate::core::{ActionKind, GameState, ModifierId, Seat};
use crate::error::DuelError;

/// Result of a gate query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Prevention {
    pub prevented: bool,
    pub reason: Option<String>,
}

impl Prevention {
    /// Not prevented.
    #[must_use]
    pub fn allowed() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn blocked(reason: impl Into<String>) -> Self {
        Self {
            prevented: true,
            reason: Some(reason.into()),
        }
    }
}

/// Lingering-effect queries and bookkeeping.
///
/// ## Example
///
/// ```
/// use duel_engine::cards::CardId;
/// use duel_engine::core::{ActionKind, DuelSetup, Seat};
/// use duel_engine::lingering::{CapabilityGate, EffectSource, Expiry};
///
/// let mut state = DuelSetup::new("lobby", "host", "guest").build();
/// let source = EffectSource { seat: Seat::Host, card: CardId::new(1) };
///
/// let turn = state.turn_number;
/// CapabilityGate::add(&mut state, ActionKind::NormalSummon, Seat::Opponent, source,
///     Expiry::EndOfTurn(turn), "Summoning is sealed");
///
/// assert!(CapabilityGate::is_action_prevented(&state, ActionKind::NormalSummon, Seat::Opponent).prevented);
/// assert!(!CapabilityGate::is_action_prevented(&state, ActionKind::NormalSummon, Seat::Host).prevented);
/// ```
pub struct CapabilityGate;

impl CapabilityGate {
    /// Whether an active lingering effect prevents `kind` for `seat`.
    #[must_use]
    pub fn is_action_prevented(state: &GameState, kind: ActionKind, seat: Seat) -> Prevention {
        if !kind.is_gateable() {
            return Prevention::allowed();
        }
        state
            .temporary_modifiers
            .iter()
            .find(|e| e.applies_to(kind, seat) && e.is_active(state))
            .map_or_else(Prevention::allowed, |e| Prevention::blocked(e.description.clone()))
    }

    /// `is_action_prevented` as a `Result`, for use with `?`.
    pub fn check(state: &GameState, kind: ActionKind, seat: Seat) -> Result<(), DuelError> {
        let prevention = Self::is_action_prevented(state, kind, seat);
        if prevention.prevented {
            let reason = prevention
                .reason
                .unwrap_or_else(|| format!("{} is prevented", kind));
            return Err(DuelError::InvalidMove { reason });
        }
        Ok(())
    }

    /// Active records, in creation order.
    pub fn active(state: &GameState) -> impl Iterator<Item = &LingeringEffect> {
        state.temporary_modifiers.iter().filter(move |e| e.is_active(state))
    }

    /// Record a new lingering effect.
    pub fn add(
        state: &mut GameState,
        restricted: ActionKind,
        affected: Seat,
        source: EffectSource,
        expiry: Expiry,
        description: impl Into<String>,
    ) -> ModifierId {
        let id = state.alloc_modifier_id();
        debug!(%id, %restricted, %affected, ?expiry, "lingering effect added");
        state.temporary_modifiers.push_back(LingeringEffect {
            id,
            restricted,
            affected,
            source,
            expiry,
            description: description.into(),
        });
        id
    }

    /// Remove one record by id.
    pub fn remove(state: &mut GameState, id: ModifierId) -> bool {
        let before = state.temporary_modifiers.len();
        state.temporary_modifiers.retain(|e| e.id != id);
        state.temporary_modifiers.len() != before
    }

    /// Remove every record created by a card. Returns how many were removed.
    pub fn remove_from_source(state: &mut GameState, seat: Seat, card: CardId) -> usize {
        let before = state.temporary_modifiers.len();
        state
            .temporary_modifiers
            .retain(|e| e.source.seat != seat || e.source.card != card);
        before - state.temporary_modifiers.len()
    }

    /// Drop expired records. Never required for correctness.
    pub fn prune_expired(state: &mut GameState) -> usize {
        let before = state.temporary_modifiers.len();
        let active: im::Vector<LingeringEffect> = state
            .temporary_modifiers
            .iter()
            .filter(|e| e.is_active(state))
            .cloned()
            .collect();
        state.temporary_modifiers = active;
        before - state.temporary_modifiers.len()
    }
}
