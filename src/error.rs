//! Error types.
//!
//! `DuelError` is what every action handler returns. Kinds are stable and
//! carry their reason intact so callers (UI or AI agents) can react to the
//! kind without parsing messages. `LoadError` covers catalog and config
//! parsing, which happens once at startup rather than per request.

use crate::cards::CardId;
use crate::core::LobbyId;

/// Errors surfaced by duel actions.
///
/// Raised before any commit, except where an action documents a partial
/// commit (tribute processing in summon actions).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DuelError {
    #[error("it is not your turn")]
    NotYourTurn,

    #[error("the duel is not active")]
    GameNotActive,

    #[error("the duel has not started yet")]
    GameNotStarted,

    #[error("invalid move: {reason}")]
    InvalidMove { reason: String },

    #[error("card {0} not found")]
    CardNotFound(CardId),

    #[error("no duel state for lobby {0}")]
    StateNotFound(LobbyId),

    #[error("chain cannot exceed {max} links")]
    ChainLimitExceeded { max: usize },

    #[error("invalid chain state: {reason}")]
    InvalidChainState { reason: String },

    #[error("caller is not a player in this duel")]
    NotAParticipant,

    #[error("storage failure: {0}")]
    Storage(String),
}

impl DuelError {
    /// Build an `InvalidMove` from a reason.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidMove { reason: reason.into() }
    }

    /// Build an `InvalidChainState` from a reason.
    pub fn chain(reason: impl Into<String>) -> Self {
        Self::InvalidChainState { reason: reason.into() }
    }

    /// Reason text for `InvalidMove`/`InvalidChainState`, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::InvalidMove { reason } | Self::InvalidChainState { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Errors raised while loading card catalogs or configuration.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("card {0} is defined twice")]
    DuplicateCard(CardId),

    #[error("card {card}: {reason}")]
    InvalidCard { card: CardId, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
