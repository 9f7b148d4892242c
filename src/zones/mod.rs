//! Zone system for card locations.
//!
//! Each seat owns a hand, deck, monster zones, spell/trap zones, a field
//! slot, a graveyard and a banished zone. `SeatState` holds them together
//! with the seat's resources, and its methods are the board mutation
//! helpers the rest of the engine uses to move cards.

pub mod manager;

pub use manager::{SeatState, Zone};
