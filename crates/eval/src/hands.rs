// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Canonical starting hands.
//!
//! There are 1326 two cards starting hands but only 169 classes of hands that
//! play differently before the flop: 13 pocket pairs, 78 suited hands and 78
//! offsuit hands.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use headsup_cards::{Card, CardSet, ParseError, Rank, Suit};

/// A starting hand class like `AA`, `AKs` or `T9o`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandClass {
    high: Rank,
    low: Rank,
    suited: bool,
}

impl HandClass {
    /// Creates a hand class, the ranks can be in any order.
    ///
    /// Returns `None` for a suited pair.
    pub fn new(r0: Rank, r1: Rank, suited: bool) -> Option<HandClass> {
        if r0 == r1 && suited {
            None
        } else {
            Some(HandClass {
                high: r0.max(r1),
                low: r0.min(r1),
                suited,
            })
        }
    }

    /// Creates a pocket pair.
    pub fn pair(rank: Rank) -> HandClass {
        HandClass {
            high: rank,
            low: rank,
            suited: false,
        }
    }

    /// The highest rank.
    pub fn high(&self) -> Rank {
        self.high
    }

    /// The lowest rank.
    pub fn low(&self) -> Rank {
        self.low
    }

    /// Checks if the two cards have the same suit.
    pub fn is_suited(&self) -> bool {
        self.suited
    }

    /// Checks if the two cards have the same rank.
    pub fn is_pair(&self) -> bool {
        self.high == self.low
    }

    /// The cards of this hand with the high card of suit `s0` and the low of suit `s1`.
    ///
    /// The caller must pick suits consistent with the hand, the same suit for a
    /// suited hand and different suits otherwise.
    pub fn cards(&self, s0: Suit, s1: Suit) -> CardSet {
        debug_assert_eq!(s0 == s1, self.suited, "{self} with suits {s0}{s1}");
        CardSet::from(Card::new(self.high, s0)) | CardSet::from(Card::new(self.low, s1))
    }
}

impl fmt::Display for HandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.high, self.low)?;
        if !self.is_pair() {
            write!(f, "{}", if self.suited { 's' } else { 'o' })?;
        }

        Ok(())
    }
}

impl FromStr for HandClass {
    type Err = ParseError;

    /// Parses `AA`, `AKs`, `AKo`, the ranks can be in any order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidHandClass(s.to_string());

        let chars = s.chars().collect::<Vec<_>>();
        let (r0, r1, suited) = match chars.as_slice() {
            [r0, r1] if r0 == r1 => (r0, r1, false),
            [r0, r1, 's'] if r0 != r1 => (r0, r1, true),
            [r0, r1, 'o'] if r0 != r1 => (r0, r1, false),
            _ => return Err(invalid()),
        };

        let r0 = Rank::from_char(*r0).map_err(|_| invalid())?;
        let r1 = Rank::from_char(*r1).map_err(|_| invalid())?;
        HandClass::new(r0, r1, suited).ok_or_else(invalid)
    }
}

/// Number of canonical starting hands.
pub const NUM_HAND_CLASSES: usize = 169;

/// The 169 canonical starting hands.
///
/// Hands are grouped by high rank. Each group starts with the pair, then
/// follows the low rank upwards with the offsuit hand before the suited one:
/// `22 33 32o 32s 44 42o 42s ...` up to `AQs AKo AKs`.
#[derive(Debug, Clone)]
pub struct HandCatalog {
    hands: Vec<HandClass>,
}

impl HandCatalog {
    /// Builds the catalog.
    pub fn build() -> Self {
        let mut hands = Vec::with_capacity(NUM_HAND_CLASSES);
        for high in Rank::ranks() {
            hands.push(HandClass::pair(high));
            for low in Rank::ranks().take_while(|&r| r < high) {
                for suited in [false, true] {
                    hands.push(HandClass { high, low, suited });
                }
            }
        }

        debug_assert_eq!(hands.len(), NUM_HAND_CLASSES);
        Self { hands }
    }

    /// The hands in catalog order.
    pub fn hands(&self) -> &[HandClass] {
        &self.hands
    }

    /// Number of hands.
    pub fn len(&self) -> usize {
        self.hands.len()
    }

    /// Checks if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    /// The position of a hand in the catalog.
    pub fn position(&self, hand: HandClass) -> Option<usize> {
        self.hands.iter().position(|&h| h == hand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;

    #[test]
    fn catalog_order() {
        let catalog = HandCatalog::build();
        assert_eq!(catalog.len(), NUM_HAND_CLASSES);

        let names = catalog.hands().iter().map(|h| h.to_string()).collect::<Vec<_>>();
        assert_eq!(names[..7], ["22", "33", "32o", "32s", "44", "42o", "42s"]);
        assert_eq!(names[NUM_HAND_CLASSES - 1], "AKs");
        assert_eq!(names[NUM_HAND_CLASSES - 2], "AKo");
        assert_eq!(names[NUM_HAND_CLASSES - 3], "AQs");

        // Aces open the last group of 1 + 2 * 12 hands.
        assert_eq!(names[NUM_HAND_CLASSES - 25], "AA");

        let unique = names.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), NUM_HAND_CLASSES);
    }

    #[test]
    fn catalog_counts() {
        let catalog = HandCatalog::build();
        let pairs = catalog.hands().iter().filter(|h| h.is_pair()).count();
        let suited = catalog.hands().iter().filter(|h| h.is_suited()).count();
        assert_eq!(pairs, 13);
        assert_eq!(suited, 78);
        assert_eq!(catalog.len() - pairs - suited, 78);
        assert_eq!(catalog.position(HandClass::pair(Rank::Deuce)), Some(0));
    }

    #[test]
    fn hand_class_parse() {
        let catalog = HandCatalog::build();
        for &hand in catalog.hands() {
            assert_eq!(hand.to_string().parse::<HandClass>(), Ok(hand));
        }

        let aks = "KAs".parse::<HandClass>().unwrap();
        assert_eq!(aks.to_string(), "AKs");
        assert_eq!(aks.high(), Rank::Ace);
        assert_eq!(aks.low(), Rank::King);

        for s in ["AAs", "AK", "AKx", "A", "1Ko", "AAo", ""] {
            assert_eq!(
                s.parse::<HandClass>(),
                Err(ParseError::InvalidHandClass(s.to_string()))
            );
        }

        assert_eq!(HandClass::new(Rank::Ten, Rank::Ten, true), None);
    }

    #[test]
    fn hand_class_cards() {
        let aks = "AKs".parse::<HandClass>().unwrap();
        assert_eq!(aks.cards(Suit::Hearts, Suit::Hearts), "AhKh".parse().unwrap());

        let t9o = "T9o".parse::<HandClass>().unwrap();
        assert_eq!(t9o.cards(Suit::Spades, Suit::Clubs), "Ts9c".parse().unwrap());
    }
}
