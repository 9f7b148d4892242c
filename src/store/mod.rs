//! Storage seams: the duel document store and the event sink.
//!
//! The engine never holds on to a `GameState` between steps. Every
//! multi-step action loads, mutates, commits, and loads again, so each step
//! sees what the previous one committed.
//!
//! - [`DuelStore`]: load/commit the document of a lobby
//! - [`EventRecorder`]: append-only event sink
//! - [`MemoryStore`], [`MemoryEventLog`]: in-memory implementations

mod memory;

pub use memory::{MemoryEventLog, MemoryStore, RecordedEvent};

use crate::core::{GameState, LobbyId};
use crate::error::DuelError;
use crate::triggers::DuelEvent;

/// Read/write access to duel documents.
///
/// Each call is one serialized transaction on the document.
pub trait DuelStore {
    /// Load a fresh copy of the lobby's document.
    ///
    /// # Errors
    ///
    /// `StateNotFound` if the lobby has no document, `Storage` if it cannot
    /// be read.
    fn load(&self, lobby: &LobbyId) -> Result<GameState, DuelError>;

    /// Replace the lobby's document with `state`.
    ///
    /// # Errors
    ///
    /// `Storage` if the document cannot be written.
    fn commit(&mut self, state: &GameState) -> Result<(), DuelError>;
}

/// Append-only sink for duel events.
pub trait EventRecorder {
    /// Append one event.
    ///
    /// # Errors
    ///
    /// `Storage` if the event cannot be written.
    fn record(&mut self, event: DuelEvent) -> Result<(), DuelError>;
}
