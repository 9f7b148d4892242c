//! Lingering effect records.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{ActionKind, GameState, ModifierId, Seat};

/// When a lingering effect stops applying.
///
/// Expiry is evaluated against the state at read time; an expired record
/// stays in the document until something prunes or removes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expiry {
    /// Active through the given turn number.
    EndOfTurn(u32),
    /// Active until the given turn number begins.
    UntilTurn(u32),
    /// Active while the source card is face-up on its controller's field.
    WhileSourceFaceUp,
    /// Active until explicitly removed.
    UntilRemoved,
}

/// The card that created a lingering effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectSource {
    pub seat: Seat,
    pub card: CardId,
}

/// A temporary modifier preventing one action kind for one seat.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LingeringEffect {
    pub id: ModifierId,
    pub restricted: ActionKind,
    pub affected: Seat,
    pub source: EffectSource,
    pub expiry: Expiry,
    /// Shown to the player whose action is refused.
    pub description: String,
}

impl LingeringEffect {
    /// Whether the record still applies to `state`.
    #[must_use]
    pub fn is_active(&self, state: &GameState) -> bool {
        match self.expiry {
            Expiry::EndOfTurn(turn) => state.turn_number <= turn,
            Expiry::UntilTurn(turn) => state.turn_number < turn,
            Expiry::WhileSourceFaceUp => state.seats[self.source.seat].is_face_up_on_field(self.source.card),
            Expiry::UntilRemoved => true,
        }
    }

    /// Whether this record restricts `kind` for `seat`, ignoring expiry.
    #[must_use]
    pub fn applies_to(&self, kind: ActionKind, seat: Seat) -> bool {
        self.restricted == kind && self.affected == seat
    }
}
