//! Card instances - runtime card state on the field.
//!
//! `BoardCard` is a monster in a monster zone; `SpellTrapCard` is a card in
//! the spell/trap zone or the field slot. Both reference their definition
//! by `CardId` and carry only the state that can diverge from it.

use serde::{Deserialize, Serialize};

use super::definition::CardId;
use crate::effects::Protection;

/// Battle position of a monster.
///
/// Stored as a signed integer (attack = +1, defense = -1) so further
/// position variants can be added without changing the document shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Position {
    Attack,
    Defense,
}

impl Position {
    /// The other position.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Position::Attack => Position::Defense,
            Position::Defense => Position::Attack,
        }
    }
}

impl From<Position> for i8 {
    fn from(position: Position) -> i8 {
        match position {
            Position::Attack => 1,
            Position::Defense => -1,
        }
    }
}

impl TryFrom<i8> for Position {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Position::Attack),
            -1 => Ok(Position::Defense),
            other => Err(format!("unknown position encoding {}", other)),
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Attack => write!(f, "attack"),
            Position::Defense => write!(f, "defense"),
        }
    }
}

/// A monster on the board.
///
/// ## Example
///
/// ```
/// use duel_engine::cards::{BoardCard, CardId, Position};
///
/// let set = BoardCard::new(CardId::new(3), 1200, 1800, Position::Defense, 2).face_down();
///
/// assert!(set.is_face_down);
/// assert!(!set.is_face_up());
/// assert_eq!(set.turn_summoned, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardCard {
    pub card_id: CardId,
    pub position: Position,

    /// Current attack; may diverge from the base value due to effects.
    pub attack: i64,
    /// Current defense; may diverge from the base value due to effects.
    pub defense: i64,

    pub has_attacked: bool,
    pub is_face_down: bool,
    pub has_changed_position: bool,

    /// Turn number the card entered the board.
    pub turn_summoned: u32,

    /// Copied from the definition when the card enters the board.
    pub protection: Protection,
}

impl BoardCard {
    /// A face-up monster entering the board on `turn`.
    #[must_use]
    pub fn new(card_id: CardId, attack: i64, defense: i64, position: Position, turn: u32) -> Self {
        Self {
            card_id,
            position,
            attack,
            defense,
            has_attacked: false,
            is_face_down: false,
            has_changed_position: false,
            turn_summoned: turn,
            protection: Protection::default(),
        }
    }

    /// Mark as face-down (builder pattern).
    #[must_use]
    pub fn face_down(mut self) -> Self {
        self.is_face_down = true;
        self
    }

    /// Set protection flags (builder pattern).
    #[must_use]
    pub fn with_protection(mut self, protection: Protection) -> Self {
        self.protection = protection;
        self
    }

    #[must_use]
    pub fn is_face_up(&self) -> bool {
        !self.is_face_down
    }

    #[must_use]
    pub fn in_attack_position(&self) -> bool {
        self.position == Position::Attack
    }

    /// The stat used when this card is attacked.
    #[must_use]
    pub fn battle_stat(&self) -> i64 {
        match self.position {
            Position::Attack => self.attack,
            Position::Defense => self.defense,
        }
    }

    /// Clear the per-turn flags.
    pub fn reset_turn_flags(&mut self) {
        self.has_attacked = false;
        self.has_changed_position = false;
    }
}

/// A card in the spell/trap zone or field slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpellTrapCard {
    pub card_id: CardId,
    pub is_face_down: bool,

    /// Turn the card was placed.
    pub turn_set: u32,

    /// Whether the card has been activated and is resolving or
    /// applying continuously.
    pub is_activated: bool,
}

impl SpellTrapCard {
    /// A face-down card set on `turn`.
    #[must_use]
    pub fn set(card_id: CardId, turn: u32) -> Self {
        Self {
            card_id,
            is_face_down: true,
            turn_set: turn,
            is_activated: false,
        }
    }

    /// A card placed face-up and activated on `turn`.
    #[must_use]
    pub fn activated(card_id: CardId, turn: u32) -> Self {
        Self {
            card_id,
            is_face_down: false,
            turn_set: turn,
            is_activated: true,
        }
    }

    #[must_use]
    pub fn is_face_up(&self) -> bool {
        !self.is_face_down
    }

    /// Turn the card face-up as activated.
    pub fn activate(&mut self) {
        self.is_face_down = false;
        self.is_activated = true;
    }
}
