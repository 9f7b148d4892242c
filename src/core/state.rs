//! The duel document.
//!
//! `GameState` is everything the engine knows about one duel: identity,
//! both seats' zones and resources, the turn context, the open chain and
//! the lingering effects. It is loaded from and committed to a
//! [`DuelStore`](crate::store::DuelStore) as a whole.
//!
//! Collections use `im` persistent structures so a clone (taken for every
//! load) shares storage with the original.

use im::{HashSet as ImHashSet, Vector};
use serde::{Deserialize, Serialize};

use super::ids::{LobbyId, ModifierId};
use super::player::{PlayerId, Seat, SeatMap};
use super::rng::GameRngState;
use crate::cards::CardId;
use crate::lingering::LingeringEffect;
use crate::stack::Chain;
use crate::turn::Phase;
use crate::zones::{SeatState, Zone};

/// Lifecycle status of a duel, owned by the lifecycle collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuelStatus {
    #[default]
    NotStarted,
    Active,
    Ended,
}

/// Once-per-turn usage key: one ability entry of one card for one seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptKey {
    pub seat: Seat,
    pub card: CardId,
    pub effect_index: usize,
}

/// Complete state of one duel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    // === Identity ===
    pub lobby_id: LobbyId,
    /// Id of the game record kept by the lifecycle collaborator.
    pub game_id: String,
    pub players: SeatMap<PlayerId>,
    pub status: DuelStatus,

    // === Zones ===
    pub seats: SeatMap<SeatState>,

    // === Turn context ===
    /// Seat whose turn it is.
    pub current_turn: Seat,
    /// Starts at 1, only ever increases.
    pub turn_number: u32,
    pub phase: Phase,
    pub chain: Chain,
    pub temporary_modifiers: Vector<LingeringEffect>,
    /// Once-per-turn entries used this turn.
    pub opt_used: ImHashSet<OptKey>,

    pub rng: GameRngState,

    // === Timestamps (ms) ===
    pub created_at: u64,
    pub last_move_at: u64,

    next_modifier_id: u32,
}

impl GameState {
    /// A duel between two players with empty zones, not yet started.
    #[must_use]
    pub fn new(lobby_id: LobbyId, host: PlayerId, opponent: PlayerId, life_points: i64) -> Self {
        Self {
            lobby_id,
            game_id: String::new(),
            players: SeatMap::from_values(host, opponent),
            status: DuelStatus::NotStarted,
            seats: SeatMap::new(|_| SeatState::new(std::iter::empty(), life_points)),
            current_turn: Seat::Host,
            turn_number: 1,
            phase: Phase::Draw,
            chain: Chain::new(),
            temporary_modifiers: Vector::new(),
            opt_used: ImHashSet::new(),
            rng: GameRngState::default(),
            created_at: 0,
            last_move_at: 0,
            next_modifier_id: 0,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == DuelStatus::Active
    }

    /// Seat `player` sits in, if they are in this duel.
    #[must_use]
    pub fn seat_of(&self, player: &PlayerId) -> Option<Seat> {
        Seat::ALL.into_iter().find(|&seat| &self.players[seat] == player)
    }

    #[must_use]
    pub fn is_turn_of(&self, seat: Seat) -> bool {
        self.current_turn == seat
    }

    /// Field zone and controller of the first face-up or face-down copy of
    /// `card`, searching `first` then the other seat.
    #[must_use]
    pub fn locate_on_field(&self, first: Seat, card: CardId) -> Option<(Seat, Zone)> {
        [first, first.other()].into_iter().find_map(|seat| {
            self.seats[seat]
                .locate(card)
                .filter(|zone| zone.is_field())
                .map(|zone| (seat, zone))
        })
    }

    #[must_use]
    pub fn is_opt_used(&self, key: &OptKey) -> bool {
        self.opt_used.contains(key)
    }

    pub fn mark_opt(&mut self, key: OptKey) {
        self.opt_used.insert(key);
    }

    /// Next id for a lingering effect record.
    pub fn alloc_modifier_id(&mut self) -> ModifierId {
        let id = ModifierId(self.next_modifier_id);
        self.next_modifier_id += 1;
        id
    }

    /// Stamp the time of the latest committed action.
    pub fn touch(&mut self, now_ms: u64) {
        self.last_move_at = now_ms;
    }
}
