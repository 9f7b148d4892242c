//! Per-seat zones and the helpers that move cards between them.
//!
//! Every card movement in the engine goes through these helpers so zone
//! invariants (board entries carry their instance state, the field slot
//! holds at most one card, life never drops below zero) are kept in one
//! place. Zones use `im` vectors so cloning a `GameState` stays cheap.
//!
//! Card ids are not unique within a zone: a hand may hold two copies of
//! the same card. Lookups and removals act on the first match.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{BoardCard, CardId, SpellTrapCard};

/// A location a card can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Hand,
    Deck,
    Board,
    SpellTrap,
    FieldSpell,
    Graveyard,
    Banished,
}

impl Zone {
    /// Zones that make up the field.
    #[must_use]
    pub const fn is_field(self) -> bool {
        matches!(self, Zone::Board | Zone::SpellTrap | Zone::FieldSpell)
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Hand => "hand",
            Zone::Deck => "deck",
            Zone::Board => "monster zone",
            Zone::SpellTrap => "spell/trap zone",
            Zone::FieldSpell => "field zone",
            Zone::Graveyard => "graveyard",
            Zone::Banished => "banished zone",
        };
        f.write_str(name)
    }
}

/// Everything one seat owns in a duel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatState {
    /// Ordered hand.
    pub hand: Vector<CardId>,
    /// Ordered deck, drawn from the front.
    pub deck: Vector<CardId>,
    /// Monster zones (at most the configured limit).
    pub board: Vector<BoardCard>,
    /// Spell/trap zones (at most the configured limit).
    pub spell_trap_zone: Vector<SpellTrapCard>,
    /// Field spell slot.
    pub field_spell: Option<SpellTrapCard>,
    pub graveyard: Vector<CardId>,
    pub banished: Vector<CardId>,

    /// Never negative.
    pub life_points: i64,
    /// Resource pool, starts at zero.
    pub mana: i64,
    pub normal_summoned_this_turn: bool,

    /// Set when a draw found the deck empty.
    pub decked_out: bool,
}

impl SeatState {
    /// A seat with the given deck and life, everything else empty.
    #[must_use]
    pub fn new(deck: impl IntoIterator<Item = CardId>, life_points: i64) -> Self {
        Self {
            hand: Vector::new(),
            deck: deck.into_iter().collect(),
            board: Vector::new(),
            spell_trap_zone: Vector::new(),
            field_spell: None,
            graveyard: Vector::new(),
            banished: Vector::new(),
            life_points: life_points.max(0),
            mana: 0,
            normal_summoned_this_turn: false,
            decked_out: false,
        }
    }

    // === Deck and hand ===

    /// Draw the front card of the deck into the hand.
    ///
    /// Returns `None` (and marks the seat decked out) if the deck is empty.
    pub fn draw(&mut self) -> Option<CardId> {
        match self.deck.pop_front() {
            Some(card) => {
                self.hand.push_back(card);
                Some(card)
            }
            None => {
                self.decked_out = true;
                None
            }
        }
    }

    #[must_use]
    pub fn hand_contains(&self, card: CardId) -> bool {
        self.hand.iter().any(|&c| c == card)
    }

    /// Remove the first copy of `card` from the hand.
    pub fn remove_from_hand(&mut self, card: CardId) -> bool {
        match self.hand.iter().position(|&c| c == card) {
            Some(idx) => {
                self.hand.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove the first copy of `card` from the deck.
    pub fn remove_from_deck(&mut self, card: CardId) -> bool {
        match self.deck.iter().position(|&c| c == card) {
            Some(idx) => {
                self.deck.remove(idx);
                true
            }
            None => false,
        }
    }

    // === Monster zones ===

    #[must_use]
    pub fn board_index(&self, card: CardId) -> Option<usize> {
        self.board.iter().position(|m| m.card_id == card)
    }

    #[must_use]
    pub fn board_card(&self, card: CardId) -> Option<&BoardCard> {
        self.board.iter().find(|m| m.card_id == card)
    }

    pub fn board_card_mut(&mut self, card: CardId) -> Option<&mut BoardCard> {
        let idx = self.board_index(card)?;
        self.board.get_mut(idx)
    }

    /// Remove the first copy of `card` from the board.
    pub fn take_from_board(&mut self, card: CardId) -> Option<BoardCard> {
        let idx = self.board_index(card)?;
        Some(self.board.remove(idx))
    }

    /// Whether one more monster fits once `leaving` monsters have left
    /// the board.
    #[must_use]
    pub fn board_has_room(&self, max: usize, leaving: usize) -> bool {
        self.board.len().saturating_sub(leaving) < max
    }

    pub fn face_up_monsters(&self) -> impl Iterator<Item = &BoardCard> {
        self.board.iter().filter(|m| m.is_face_up())
    }

    // === Spell/trap zones ===

    #[must_use]
    pub fn spell_trap_index(&self, card: CardId) -> Option<usize> {
        self.spell_trap_zone.iter().position(|c| c.card_id == card)
    }

    /// The first copy of `card` in the spell/trap zone or field slot.
    #[must_use]
    pub fn spell_trap_card(&self, card: CardId) -> Option<&SpellTrapCard> {
        self.spell_trap_zone
            .iter()
            .find(|c| c.card_id == card)
            .or_else(|| self.field_spell.as_ref().filter(|c| c.card_id == card))
    }

    /// Remove `card` from the spell/trap zone or field slot.
    pub fn take_spell_trap(&mut self, card: CardId) -> Option<SpellTrapCard> {
        if let Some(idx) = self.spell_trap_index(card) {
            return Some(self.spell_trap_zone.remove(idx));
        }
        if self.field_spell.as_ref().is_some_and(|c| c.card_id == card) {
            return self.field_spell.take();
        }
        None
    }

    /// Face-up cards in the spell/trap zone, then the field slot.
    pub fn face_up_spell_traps(&self) -> impl Iterator<Item = &SpellTrapCard> {
        self.spell_trap_zone
            .iter()
            .chain(self.field_spell.iter())
            .filter(|c| c.is_face_up())
    }

    /// Put a field spell in the slot, returning the one it replaced.
    pub fn place_field_spell(&mut self, card: SpellTrapCard) -> Option<SpellTrapCard> {
        self.field_spell.replace(card)
    }

    // === Whole field ===

    /// Where the first copy of `card` is, searching the field first.
    #[must_use]
    pub fn locate(&self, card: CardId) -> Option<Zone> {
        if self.board_index(card).is_some() {
            Some(Zone::Board)
        } else if self.spell_trap_index(card).is_some() {
            Some(Zone::SpellTrap)
        } else if self.field_spell.as_ref().is_some_and(|c| c.card_id == card) {
            Some(Zone::FieldSpell)
        } else if self.hand_contains(card) {
            Some(Zone::Hand)
        } else if self.graveyard.contains(&card) {
            Some(Zone::Graveyard)
        } else if self.banished.contains(&card) {
            Some(Zone::Banished)
        } else if self.deck.contains(&card) {
            Some(Zone::Deck)
        } else {
            None
        }
    }

    /// Whether a face-up copy of `card` is anywhere on the field.
    #[must_use]
    pub fn is_face_up_on_field(&self, card: CardId) -> bool {
        self.face_up_monsters().any(|m| m.card_id == card)
            || self.face_up_spell_traps().any(|c| c.card_id == card)
    }

    /// Remove `card` from whichever field zone holds it.
    pub fn take_from_field(&mut self, card: CardId) -> Option<Zone> {
        if self.take_from_board(card).is_some() {
            return Some(Zone::Board);
        }
        let in_row = self.spell_trap_index(card).is_some();
        self.take_spell_trap(card)
            .map(|_| if in_row { Zone::SpellTrap } else { Zone::FieldSpell })
    }

    pub fn send_to_graveyard(&mut self, card: CardId) {
        self.graveyard.push_back(card);
    }

    pub fn banish(&mut self, card: CardId) {
        self.banished.push_back(card);
    }

    pub fn add_to_hand(&mut self, card: CardId) {
        self.hand.push_back(card);
    }

    // === Resources ===

    /// Lose life, floored at zero. Returns the amount actually lost.
    pub fn lose_life(&mut self, amount: i64) -> i64 {
        let lost = amount.max(0).min(self.life_points);
        self.life_points -= lost;
        lost
    }

    pub fn gain_life(&mut self, amount: i64) {
        self.life_points = self.life_points.saturating_add(amount.max(0));
    }

    /// Clear the flags that only last for one turn.
    pub fn reset_turn_flags(&mut self) {
        self.normal_summoned_this_turn = false;
        for monster in self.board.iter_mut() {
            monster.reset_turn_flags();
        }
    }
}
