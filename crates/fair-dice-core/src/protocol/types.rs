//! Protocol types.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique game identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(Uuid);

impl GameId {
    /// Create a new random game ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for GameId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl fmt::Debug for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GameId({})", self.0)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Round outcome. Party A is the computer, party B the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    AWins,
    BWins,
    Draw,
}

impl GameResult {
    /// Compare party A's throw against party B's
    pub fn compare(throw_a: u32, throw_b: u32) -> Self {
        match throw_a.cmp(&throw_b) {
            Ordering::Greater => GameResult::AWins,
            Ordering::Less => GameResult::BWins,
            Ordering::Equal => GameResult::Draw,
        }
    }

    /// The same result seen with A and B exchanged
    pub fn swapped(&self) -> Self {
        match self {
            GameResult::AWins => GameResult::BWins,
            GameResult::BWins => GameResult::AWins,
            GameResult::Draw => GameResult::Draw,
        }
    }

    pub fn winner(&self) -> Option<Party> {
        match self {
            GameResult::AWins => Some(Party::A),
            GameResult::BWins => Some(Party::B),
            GameResult::Draw => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameResult::AWins => "A wins",
            GameResult::BWins => "B wins",
            GameResult::Draw => "Draw",
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Party identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Party {
    /// The computer: commits first in every protocol, chooses autonomously
    A,
    /// The user: guesses and adds, chooses interactively
    B,
}

impl Party {
    /// The computer
    pub const COMPUTER: Party = Party::A;
    /// The user at the console
    pub const USER: Party = Party::B;

    /// Get the opponent
    pub fn opponent(&self) -> Party {
        match self {
            Party::A => Party::B,
            Party::B => Party::A,
        }
    }

    pub fn is_interactive(&self) -> bool {
        *self == Party::USER
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::A => write!(f, "computer"),
            Party::B => write!(f, "user"),
        }
    }
}

/// Who claims a die first, settled once per game by the coin flip
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOrder {
    first: Party,
}

impl TurnOrder {
    pub fn starting_with(first: Party) -> Self {
        Self { first }
    }

    /// A correct guess hands the first move to the user
    pub fn from_guess(guessed_right: bool) -> Self {
        if guessed_right {
            Self::starting_with(Party::USER)
        } else {
            Self::starting_with(Party::COMPUTER)
        }
    }

    pub fn first(&self) -> Party {
        self.first
    }

    pub fn second(&self) -> Party {
        self.first.opponent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_game_id_generation() {
        let id1 = GameId::new();
        let id2 = GameId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_game_id_parse() {
        let id = GameId::new();
        assert_eq!(id.to_string().parse::<GameId>().unwrap(), id);
    }

    #[test]
    fn test_party_opponent() {
        assert_eq!(Party::A.opponent(), Party::B);
        assert_eq!(Party::B.opponent(), Party::A);
        assert!(Party::USER.is_interactive());
        assert!(!Party::COMPUTER.is_interactive());
    }

    #[test]
    fn test_game_result_str() {
        assert_eq!(GameResult::AWins.as_str(), "A wins");
        assert_eq!(GameResult::BWins.as_str(), "B wins");
        assert_eq!(GameResult::Draw.as_str(), "Draw");
    }

    #[test]
    fn test_compare() {
        assert_eq!(GameResult::compare(9, 6), GameResult::AWins);
        assert_eq!(GameResult::compare(1, 3), GameResult::BWins);
        assert_eq!(GameResult::compare(5, 5), GameResult::Draw);
        assert_eq!(GameResult::compare(9, 6).winner(), Some(Party::A));
        assert_eq!(GameResult::Draw.winner(), None);
    }

    #[test]
    fn test_turn_order_from_guess() {
        let order = TurnOrder::from_guess(true);
        assert_eq!(order.first(), Party::USER);
        assert_eq!(order.second(), Party::COMPUTER);

        let order = TurnOrder::from_guess(false);
        assert_eq!(order.first(), Party::COMPUTER);
        assert_eq!(order.second(), Party::USER);
    }

    proptest! {
        #[test]
        fn prop_compare_is_antisymmetric(a in any::<u32>(), b in any::<u32>()) {
            let forward = GameResult::compare(a, b);
            let backward = GameResult::compare(b, a);
            prop_assert_eq!(forward.swapped(), backward);
            if a == b {
                prop_assert_eq!(forward, GameResult::Draw);
            } else {
                prop_assert!(forward != GameResult::Draw);
            }
        }
    }
}
