// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A deck of cards.
use crate::{Card, CardSet, combin};

#[cfg(feature = "parallel")]
mod parallel;

/// A cards Deck with cards in index order.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in a full deck.
    pub const SIZE: usize = 52;

    /// Creates a deck without the given cards.
    pub fn without(used: CardSet) -> Self {
        let cards = CardSet::FULL.without(used).iter().collect();
        Self { cards }
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// The deck cards.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Calls the `f` closure for each k-cards hand.
    ///
    /// Panics if k is not 1 <= k <= 7.
    pub fn for_each<F>(&self, k: usize, mut f: F)
    where
        F: FnMut(CardSet),
    {
        assert!((1..=7).contains(&k), "1 <= k <= 7");

        let n = self.cards.len();
        if k > n {
            return;
        }

        combin::for_each_ksubset(n, k, 0, combin::nck(n, k), |idx| {
            f(self.hand(idx));
        });
    }

    /// The cards at the given positions.
    #[inline]
    fn hand(&self, positions: &[usize]) -> CardSet {
        positions
            .iter()
            .fold(CardSet::EMPTY, |set, &pos| set.with(self.cards[pos]))
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::without(CardSet::EMPTY)
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;

    #[test]
    fn deck_default() {
        let deck = Deck::default();
        assert_eq!(deck.count(), Deck::SIZE);

        let indices = deck.cards().iter().map(|c| c.index()).collect::<Vec<_>>();
        assert_eq!(indices, (0..52).collect::<Vec<_>>());
    }

    #[test]
    fn deck_without() {
        let used = "AsKd".parse::<CardSet>().unwrap();
        let deck = Deck::without(used);
        assert_eq!(deck.count(), 50);
        assert!(deck.cards().iter().all(|c| !used.contains(*c)));
        assert!(!deck.is_empty());

        assert!(Deck::without(CardSet::FULL).is_empty());
    }

    #[test]
    fn deck_for_each() {
        let deck = Deck::default();

        let mut hands = HashSet::default();
        deck.for_each(2, |cards| {
            assert_eq!(cards.count(), 2);
            hands.insert(cards);
        });
        assert_eq!(hands.len(), 1_326);

        hands.clear();
        deck.for_each(3, |cards| {
            assert_eq!(cards.count(), 3);
            hands.insert(cards);
        });
        assert_eq!(hands.len(), 22_100);

        let deck = Deck::without("2s3s4s".parse().unwrap());
        let mut count = 0;
        deck.for_each(5, |cards| {
            assert_eq!(cards.count(), 5);
            count += 1;
        });
        assert_eq!(count, 1_906_884);
    }
}
