//! In-memory store and event log.
//!
//! `MemoryStore` keeps each document as a bincode snapshot, so every load
//! decodes a new value and nothing can alias a stale copy.

use rustc_hash::FxHashMap;
use tracing::trace;

use super::{DuelStore, EventRecorder};
use crate::core::{GameState, LobbyId};
use crate::error::DuelError;
use crate::triggers::{DuelEvent, EventKind};

/// Duel documents kept in memory as encoded snapshots.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    documents: FxHashMap<LobbyId, Vec<u8>>,
    commits: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an initial document (builder pattern).
    ///
    /// # Errors
    ///
    /// `Storage` if the document cannot be encoded.
    pub fn with_duel(mut self, state: &GameState) -> Result<Self, DuelError> {
        self.documents.insert(state.lobby_id.clone(), encode(state)?);
        Ok(self)
    }

    /// Number of commits made through [`DuelStore::commit`].
    #[must_use]
    pub fn commits(&self) -> usize {
        self.commits
    }

    #[must_use]
    pub fn contains(&self, lobby: &LobbyId) -> bool {
        self.documents.contains_key(lobby)
    }

    /// Drop a finished duel's document.
    pub fn remove(&mut self, lobby: &LobbyId) -> bool {
        self.documents.remove(lobby).is_some()
    }
}

impl DuelStore for MemoryStore {
    fn load(&self, lobby: &LobbyId) -> Result<GameState, DuelError> {
        let bytes = self
            .documents
            .get(lobby)
            .ok_or_else(|| DuelError::StateNotFound(lobby.clone()))?;
        bincode::deserialize(bytes).map_err(|e| DuelError::Storage(e.to_string()))
    }

    fn commit(&mut self, state: &GameState) -> Result<(), DuelError> {
        let bytes = encode(state)?;
        trace!(lobby = %state.lobby_id, bytes = bytes.len(), "document committed");
        self.documents.insert(state.lobby_id.clone(), bytes);
        self.commits += 1;
        Ok(())
    }
}

fn encode(state: &GameState) -> Result<Vec<u8>, DuelError> {
    bincode::serialize(state).map_err(|e| DuelError::Storage(e.to_string()))
}

/// An event with its position in the turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedEvent {
    /// Starts at 1 for each turn of each lobby.
    pub sequence: u32,
    pub event: DuelEvent,
}

/// Event log kept in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryEventLog {
    events: Vec<RecordedEvent>,
    sequences: FxHashMap<(LobbyId, u32), u32>,
}

impl MemoryEventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event, oldest first.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Kinds of every event, oldest first.
    #[must_use]
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.iter().map(|r| r.event.kind).collect()
    }

    /// Events of one kind.
    pub fn of_kind(&self, kind: EventKind) -> impl Iterator<Item = &DuelEvent> {
        self.events.iter().map(|r| &r.event).filter(move |e| e.kind == kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.sequences.clear();
    }
}

impl EventRecorder for MemoryEventLog {
    fn record(&mut self, event: DuelEvent) -> Result<(), DuelError> {
        let counter = self
            .sequences
            .entry((event.lobby_id.clone(), event.turn))
            .or_insert(0);
        *counter += 1;
        self.events.push(RecordedEvent {
            sequence: *counter,
            event,
        });
        Ok(())
    }
}
