//! Duel setup.
//!
//! `DuelSetup` builds the initial `GameState` of a duel: decks shuffled
//! with the duel's seeded RNG, opening hands drawn, status `Active` and the
//! first player in their first main phase.
//!
//! ```
//! use duel_engine::cards::CardId;
//! use duel_engine::core::{DuelSetup, Seat};
//! use duel_engine::turn::Phase;
//!
//! let deck: Vec<CardId> = (1..=40).map(CardId::new).collect();
//! let state = DuelSetup::new("lobby-1", "alice", "bob")
//!     .with_decks(deck.clone(), deck)
//!     .with_seed(7)
//!     .build();
//!
//! assert_eq!(state.seats[Seat::Host].hand.len(), 5);
//! assert_eq!(state.seats[Seat::Opponent].deck.len(), 35);
//! assert_eq!(state.phase, Phase::Main1);
//! ```

use tracing::debug;

use super::config::DuelConfig;
use super::ids::LobbyId;
use super::player::{PlayerId, Seat, SeatMap};
use super::rng::GameRng;
use super::state::{DuelStatus, GameState};
use crate::cards::CardId;
use crate::turn::Phase;

/// Builder for a duel's initial state.
#[derive(Clone, Debug)]
pub struct DuelSetup {
    lobby_id: LobbyId,
    game_id: String,
    players: SeatMap<PlayerId>,
    decks: SeatMap<Vec<CardId>>,
    seed: u64,
    first_player: Seat,
    config: DuelConfig,
    timestamp: u64,
}

impl DuelSetup {
    #[must_use]
    pub fn new(lobby_id: impl Into<LobbyId>, host: impl Into<PlayerId>, opponent: impl Into<PlayerId>) -> Self {
        Self {
            lobby_id: lobby_id.into(),
            game_id: String::new(),
            players: SeatMap::from_values(host.into(), opponent.into()),
            decks: SeatMap::with_default(),
            seed: 0,
            first_player: Seat::Host,
            config: DuelConfig::default(),
            timestamp: 0,
        }
    }

    #[must_use]
    pub fn with_game_id(mut self, game_id: impl Into<String>) -> Self {
        self.game_id = game_id.into();
        self
    }

    /// Decks in list order, before shuffling.
    #[must_use]
    pub fn with_decks(mut self, host: Vec<CardId>, opponent: Vec<CardId>) -> Self {
        self.decks = SeatMap::from_values(host, opponent);
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_first_player(mut self, seat: Seat) -> Self {
        self.first_player = seat;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: DuelConfig) -> Self {
        self.config = config;
        self
    }

    /// Creation time in milliseconds.
    #[must_use]
    pub fn with_timestamp(mut self, now_ms: u64) -> Self {
        self.timestamp = now_ms;
        self
    }

    /// Shuffle, deal and start the duel.
    ///
    /// A deck smaller than the opening hand is dealt in full; it is not
    /// a deck-out. The first player also draws for turn 1 unless the
    /// config skips that draw.
    #[must_use]
    pub fn build(self) -> GameState {
        let [host, opponent] = Seat::ALL.map(|seat| self.players[seat].clone());
        let mut state = GameState::new(self.lobby_id, host, opponent, self.config.starting_life_points);
        state.game_id = self.game_id;

        let mut rng = GameRng::new(self.seed);
        for seat in Seat::ALL {
            let mut deck = self.decks[seat].clone();
            rng.shuffle(&mut deck);

            let zones = &mut state.seats[seat];
            zones.deck = deck.into_iter().collect();
            for _ in 0..self.config.opening_hand_size.min(zones.deck.len()) {
                zones.draw();
            }
        }

        let first = &mut state.seats[self.first_player];
        if !self.config.skip_first_turn_draw && !first.deck.is_empty() {
            first.draw();
        }

        state.rng = rng.state();
        state.status = DuelStatus::Active;
        state.current_turn = self.first_player;
        state.turn_number = 1;
        state.phase = Phase::Main1;
        state.created_at = self.timestamp;
        state.last_move_at = self.timestamp;

        debug!(lobby = %state.lobby_id, first = %self.first_player, seed = self.seed, "duel set up");
        state
    }
}
