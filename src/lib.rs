//! # duel-engine
//!
//! Turn, chain and effect resolution for a two-player Yu-Gi-Oh-style
//! trading card game played online.
//!
//! ## Design Principles
//!
//! 1. **Store-Backed**: Actions never hold a duel between steps. Each step
//!    loads the lobby's document from a [`DuelStore`], mutates it and
//!    commits, so triggers always see what came before them.
//!
//! 2. **One Rulebook**: Validators are pure functions over `GameState`.
//!    Actions and [`available_actions`](rules::available_actions) call the
//!    same ones, so the two can never disagree.
//!
//! 3. **Typed Cards**: Card effects are tagged data ([`EffectDef`]) loaded
//!    from JSON and checked when the catalog is built, not strings parsed
//!    at resolution time.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: `im` collections make cloning a duel
//!   document cheap.
//!
//! - **Chain**: Activations stack as links with spell speeds and resolve
//!   last in first out once both seats pass in a row.
//!
//! - **Lingering Effects**: Restrictions carry their own expiry and are
//!   evaluated when read.
//!
//! ## Modules
//!
//! - `core`: IDs, seats, configuration, RNG, duel setup and `GameState`
//! - `zones`: Per-seat zones (hand, deck, board, spell/trap, graveyard)
//! - `cards`: Card definitions, board instances and the catalog
//! - `effects`: Effect definitions, targeting and resolution
//! - `triggers`: Trigger conditions, scans and duel events
//! - `lingering`: Turn-bounded restrictions on actions
//! - `stack`: The chain and its resolution
//! - `turn`: Phases and the turn machine
//! - `rules`: Validators, battle, outcome and available actions
//! - `store`: Document store and event sink seams
//! - `actions`: `DuelEngine`, the player-facing entry points

pub mod actions;
pub mod cards;
pub mod core;
pub mod effects;
pub mod error;
pub mod lingering;
pub mod rules;
pub mod stack;
pub mod store;
pub mod triggers;
pub mod turn;
pub mod zones;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use crate::actions::{
    ActivationOutcome, AttackOutcome, DuelEngine, EndTurnOutcome, PassOutcome, PhaseOutcome, PositionOutcome,
    SetSpellTrapOutcome, SummonOutcome, TriggerReport,
};

pub use crate::cards::{BoardCard, CardCatalog, CardDefinition, CardId, CardKind, Position, SpellTrapCard};

pub use crate::core::{
    ActionKind, DuelConfig, DuelSetup, DuelStatus, GameState, LinkId, LobbyId, PlayerId, Seat, SeatMap,
};

pub use crate::effects::{EffectAction, EffectDef, EffectTrigger, SpellSpeed, TargetSpec};

pub use crate::error::{DuelError, LoadError};

pub use crate::lingering::{CapabilityGate, Prevention};

pub use crate::rules::{duel_outcome, AvailableAction, DuelOutcome};

pub use crate::stack::{Chain, ChainLink};

pub use crate::store::{DuelStore, EventRecorder, MemoryEventLog, MemoryStore};

pub use crate::triggers::{DuelEvent, EventKind};

pub use crate::turn::Phase;

pub use crate::zones::{SeatState, Zone};
