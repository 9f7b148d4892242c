//! Player identification and per-seat data storage.
//!
//! ## PlayerId
//!
//! External player identity, resolved by the auth collaborator before a
//! request reaches the engine.
//!
//! ## Seat
//!
//! A duel always has exactly two seats: the lobby host and the opponent.
//! Everything the engine stores per player is keyed by `Seat`, never by
//! `PlayerId`, so the document layout does not depend on account ids.
//!
//! ## SeatMap
//!
//! Two-entry storage indexable by `Seat`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// External player identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a new player ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One side of the duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Seat {
    /// The lobby host.
    Host,
    /// The player who joined the lobby.
    Opponent,
}

impl Seat {
    /// Both seats, host first.
    pub const ALL: [Seat; 2] = [Seat::Host, Seat::Opponent];

    /// The other seat.
    ///
    /// ```
    /// use duel_engine::core::Seat;
    ///
    /// assert_eq!(Seat::Host.other(), Seat::Opponent);
    /// assert_eq!(Seat::Opponent.other(), Seat::Host);
    /// ```
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Seat::Host => Seat::Opponent,
            Seat::Opponent => Seat::Host,
        }
    }

    /// Storage index (host = 0, opponent = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Seat::Host => 0,
            Seat::Opponent => 1,
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seat::Host => write!(f, "host"),
            Seat::Opponent => write!(f, "opponent"),
        }
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use duel_engine::core::{Seat, SeatMap};
///
/// let mut life: SeatMap<i64> = SeatMap::with_value(8000);
/// life[Seat::Opponent] -= 500;
///
/// assert_eq!(life[Seat::Host], 8000);
/// assert_eq!(life[Seat::Opponent], 7500);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    host: T,
    opponent: T,
}

impl<T> SeatMap<T> {
    /// Create a new SeatMap with values from a factory function.
    pub fn new(factory: impl Fn(Seat) -> T) -> Self {
        Self {
            host: factory(Seat::Host),
            opponent: factory(Seat::Opponent),
        }
    }

    /// Create from explicit values.
    pub fn from_values(host: T, opponent: T) -> Self {
        Self { host, opponent }
    }

    /// Create a new SeatMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            host: value.clone(),
            opponent: value,
        }
    }

    /// Create a new SeatMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, seat: Seat) -> &T {
        match seat {
            Seat::Host => &self.host,
            Seat::Opponent => &self.opponent,
        }
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, seat: Seat) -> &mut T {
        match seat {
            Seat::Host => &mut self.host,
            Seat::Opponent => &mut self.opponent,
        }
    }

    /// Iterate over (Seat, &T) pairs, host first.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        [(Seat::Host, &self.host), (Seat::Opponent, &self.opponent)].into_iter()
    }
}

impl<T> Index<Seat> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        self.get(seat)
    }
}

impl<T> IndexMut<Seat> for SeatMap<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        self.get_mut(seat)
    }
}
