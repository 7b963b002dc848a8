//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe identifier for one of the four seats. Internally 0-based,
//! but numbered 1-4 everywhere a human or a serialized document sees it.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by a fixed `[T; 4]` array, indexed by
//! `PlayerId`. There is no string-keyed access to player data.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of seats at the table. Fixed by the rules.
pub const PLAYER_COUNT: usize = 4;

/// Player identifier for one of the four seats.
///
/// Serializes as its 1-based player number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    pub const ONE: PlayerId = PlayerId(0);
    pub const TWO: PlayerId = PlayerId(1);
    pub const THREE: PlayerId = PlayerId(2);
    pub const FOUR: PlayerId = PlayerId(3);

    /// Create a player from a 0-based seat index.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < PLAYER_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Create a player from its 1-based number.
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        if number >= 1 && number as usize <= PLAYER_COUNT {
            Some(Self(number - 1))
        } else {
            None
        }
    }

    /// 0-based seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 1-based player number.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0 + 1
    }

    /// The player whose turn follows this one (4 wraps to 1).
    #[must_use]
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % PLAYER_COUNT as u8)
    }

    /// Letter prefix used in piece ids ('A' for player 1 ... 'D' for player 4).
    #[must_use]
    pub const fn letter(self) -> char {
        (b'A' + self.0) as char
    }

    /// Player owning pieces with the given letter prefix.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        let offset = (letter as u32).checked_sub('A' as u32)?;
        Self::from_index(offset as usize)
    }

    /// Iterate over all four players in turn order.
    ///
    /// ```
    /// use ludo_engine::core::PlayerId;
    ///
    /// let numbers: Vec<_> = PlayerId::all().map(PlayerId::number).collect();
    /// assert_eq!(numbers, vec![1, 2, 3, 4]);
    /// ```
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..PLAYER_COUNT as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::from_number(number).ok_or_else(|| format!("player number {number} is not in 1..=4"))
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> Self {
        player.number()
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use ludo_engine::core::{PlayerId, PlayerMap};
///
/// let mut rolls: PlayerMap<u32> = PlayerMap::with_value(0);
/// rolls[PlayerId::TWO] += 1;
/// assert_eq!(rolls[PlayerId::TWO], 1);
/// assert_eq!(rolls[PlayerId::ONE], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; PLAYER_COUNT],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: std::array::from_fn(|i| factory(PlayerId(i as u8))),
        }
    }

    /// Create a map with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs in turn order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T: Default> Default for PlayerMap<T> {
    fn default() -> Self {
        Self::new(|_| T::default())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
