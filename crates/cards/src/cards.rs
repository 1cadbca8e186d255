// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Cards parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A cards string must have two characters per card.
    #[error("odd number of characters in cards {0:?}")]
    OddLength(String),
    /// Not a card.
    #[error("invalid card {0:?}")]
    InvalidCard(String),
    /// Unknown rank character.
    #[error("invalid rank {0:?}")]
    InvalidRank(char),
    /// Unknown suit character.
    #[error("invalid suit {0:?}")]
    InvalidSuit(char),
    /// A card appears more than once in a set.
    #[error("duplicated card {0}")]
    DuplicateCard(Card),
    /// Not a starting hand class like `AA`, `AKs` or `T9o`.
    #[error("invalid hand class {0:?}")]
    InvalidHandClass(String),
}

/// A Poker card.
///
/// A card is the index of its bit in a [CardSet](crate::CardSet):
///
/// ```text
///   index = rank + 13 * suit
///   rank = deuce=0,trey=1,four=2,five=3,...,ace=12
///   suit = spades=0,hearts=1,diamonds=2,clubs=3
/// ```
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Card(u8);

impl Card {
    /// Create a card given a rank and a suit.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Card(rank as u8 + 13 * suit as u8)
    }

    /// Create a card from its index, returns `None` if index >= 52.
    pub const fn from_index(index: u8) -> Option<Card> {
        if index < 52 { Some(Card(index)) } else { None }
    }

    /// This card index in 0..52.
    #[inline]
    pub const fn index(&self) -> u8 {
        self.0
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        Rank::from_index(self.0 % 13)
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        Suit::from_index(self.0 / 13)
    }

    /// Parses a string of concatenated cards like `As2dTh`.
    pub fn parse_many(s: &str) -> Result<Vec<Card>, ParseError> {
        let chars = s.chars().collect::<Vec<_>>();
        if chars.len() % 2 != 0 {
            return Err(ParseError::OddLength(s.to_string()));
        }

        chars
            .chunks_exact(2)
            .map(|c| Ok(Card::new(Rank::from_char(c[0])?, Suit::from_char(c[1])?)))
            .collect()
    }
}

impl FromStr for Card {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Card::parse_many(s)?.as_slice() {
            [card] => Ok(*card),
            _ => Err(ParseError::InvalidCard(s.to_string())),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank(), self.suit())
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Deuce
    Deuce = 0,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// The number of ranks.
    pub const COUNT: usize = 13;

    const ALL: [Rank; 13] = {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
    };

    const CHARS: [char; 13] = [
        '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A',
    ];

    /// Returns all ranks from deuce to ace.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> + ExactSizeIterator {
        Self::ALL.into_iter()
    }

    /// Returns the rank for the given index.
    ///
    /// Panics if index >= 13.
    pub fn from_index(index: u8) -> Rank {
        Self::ALL[index as usize]
    }

    /// Parses a rank from one of `23456789TJQKA`.
    pub fn from_char(c: char) -> Result<Rank, ParseError> {
        Self::CHARS
            .iter()
            .position(|&rc| rc == c)
            .map(|idx| Self::ALL[idx])
            .ok_or(ParseError::InvalidRank(c))
    }

    /// The rank character.
    pub fn to_char(self) -> char {
        Self::CHARS[self as usize]
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Spades suit.
    Spades = 0,
    /// Hearts suit.
    Hearts,
    /// Diamonds suit.
    Diamonds,
    /// Clubs suit.
    Clubs,
}

impl Suit {
    /// The number of suits.
    pub const COUNT: usize = 4;

    const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    const CHARS: [char; 4] = ['s', 'h', 'd', 'c'];

    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> + ExactSizeIterator {
        Self::ALL.into_iter()
    }

    /// Returns the suit for the given index.
    ///
    /// Panics if index >= 4.
    pub fn from_index(index: u8) -> Suit {
        Self::ALL[index as usize]
    }

    /// Parses a suit from one of `shdc`.
    pub fn from_char(c: char) -> Result<Suit, ParseError> {
        Self::CHARS
            .iter()
            .position(|&sc| sc == c)
            .map(|idx| Self::ALL[idx])
            .ok_or(ParseError::InvalidSuit(c))
    }

    /// The suit character.
    pub fn to_char(self) -> char {
        Self::CHARS[self as usize]
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
