//! Core engine types: seats, players, ids, state, actions, RNG, configuration.
//!
//! Everything else in the crate is built on these. The duel document
//! itself is [`GameState`]; [`DuelSetup`] creates one.

pub mod action;
pub mod config;
pub mod ids;
pub mod player;
pub mod rng;
pub mod setup;
pub mod state;

pub use action::ActionKind;
pub use config::DuelConfig;
pub use ids::{LinkId, LobbyId, ModifierId};
pub use player::{PlayerId, Seat, SeatMap};
pub use rng::{GameRng, GameRngState};
pub use setup::DuelSetup;
pub use state::{DuelStatus, GameState, OptKey};
