//! Lingering effect tracker.
//!
//! Temporary modifiers ("cannot summon until end of turn") live in
//! `GameState::temporary_modifiers`. `CapabilityGate` is the single query
//! every gateable action makes before touching the board.
//!
//! Expiry is evaluated when a record is read, so correctness never depends
//! on anything deleting expired entries.

mod effect;
mod gate;

pub use effect::{EffectSource, Expiry, LingeringEffect};
pub use gate::{CapabilityGate, Prevention};
