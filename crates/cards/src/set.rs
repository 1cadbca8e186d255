// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Bit sets of cards and ranks.
//!
//! A [CardSet] has one bit for each of the 52 cards and a [RankSet] one bit for
//! each of the 13 ranks. All the set operations used by the hand evaluator are
//! constant time bit operations.
use serde::{Deserialize, Serialize};
use std::{fmt, ops, str::FromStr};

use crate::{Card, ParseError, Rank, Suit};

const RANKS_MASK: u64 = (1 << Rank::COUNT) - 1;

/// A set of cards, bit `rank + 13 * suit` is set for each card in the set.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardSet(u64);

impl CardSet {
    /// The empty set.
    pub const EMPTY: CardSet = CardSet(0);

    /// The set with all 52 cards.
    pub const FULL: CardSet = CardSet((1 << 52) - 1);

    /// Creates a set from its bits, bits above 52 are dropped.
    pub const fn from_bits(bits: u64) -> CardSet {
        CardSet(bits & Self::FULL.0)
    }

    /// The set bits.
    #[inline]
    pub const fn bits(&self) -> u64 {
        self.0
    }

    /// Creates a set with a single card.
    #[inline]
    pub const fn from_card(card: Card) -> CardSet {
        CardSet(1 << card.index())
    }

    /// Returns the union of two disjoint sets.
    ///
    /// The sets must be disjoint, this is checked only in debug builds.
    #[inline]
    pub fn union(self, other: CardSet) -> CardSet {
        debug_assert!(self.is_disjoint(other), "overlapping sets {self} {other}");
        CardSet(self.0 | other.0)
    }

    /// Returns this set with the given card added.
    #[inline]
    pub fn with(self, card: Card) -> CardSet {
        self.union(CardSet::from_card(card))
    }

    /// Returns the cards in this set that are not in `other`.
    #[inline]
    pub fn without(self, other: CardSet) -> CardSet {
        CardSet(self.0 & !other.0)
    }

    /// Checks if the card is in this set.
    #[inline]
    pub fn contains(&self, card: Card) -> bool {
        self.0 & (1 << card.index()) != 0
    }

    /// Checks if the two sets have no cards in common.
    #[inline]
    pub fn is_disjoint(&self, other: CardSet) -> bool {
        self.0 & other.0 == 0
    }

    /// Checks if the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// The number of cards in this set.
    #[inline]
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Removes the card with the lowest index, the set must not be empty.
    #[inline]
    pub fn remove_lowest(self) -> CardSet {
        debug_assert!(!self.is_empty());
        CardSet(self.0 & self.0.wrapping_sub(1))
    }

    /// Removes the two cards with the lowest index.
    #[inline]
    pub fn remove_lowest_two(self) -> CardSet {
        self.remove_lowest().remove_lowest()
    }

    /// The ranks of the cards with the given suit.
    #[inline]
    pub fn suit(&self, suit: Suit) -> RankSet {
        RankSet(((self.0 >> (13 * suit as u64)) & RANKS_MASK) as u16)
    }

    /// The ranks of each suit, in [Suit::suits] order.
    #[inline]
    pub fn suits(&self) -> [RankSet; 4] {
        [
            self.suit(Suit::Spades),
            self.suit(Suit::Hearts),
            self.suit(Suit::Diamonds),
            self.suit(Suit::Clubs),
        ]
    }

    /// The ranks that appear in this set with any suit.
    #[inline]
    pub fn ranks(&self) -> RankSet {
        let [s, h, d, c] = self.suits();
        s | h | d | c
    }

    /// The ranks grouped by how many times they appear in this set.
    #[inline]
    pub fn multiples(&self) -> Multiples {
        let [s, h, d, c] = self.suits();
        Multiples {
            any: s | h | d | c,
            pairs: (s & h) | (s & d) | (s & c) | (h & d) | (h & c) | (d & c),
            trips: (s & h & d) | (s & h & c) | (s & d & c) | (h & d & c),
            quads: s & h & d & c,
        }
    }

    /// Iterates the cards in this set in index order.
    pub fn iter(&self) -> CardSetIter {
        CardSetIter(*self)
    }
}

impl ops::BitOr for CardSet {
    type Output = CardSet;

    #[inline]
    fn bitor(self, rhs: CardSet) -> CardSet {
        self.union(rhs)
    }
}

impl From<Card> for CardSet {
    fn from(card: Card) -> Self {
        CardSet::from_card(card)
    }
}

impl FromIterator<Card> for CardSet {
    /// Collects cards into a set, duplicated cards are counted once.
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        CardSet(iter.into_iter().fold(0, |bits, c| bits | (1 << c.index())))
    }
}

impl IntoIterator for CardSet {
    type Item = Card;
    type IntoIter = CardSetIter;

    fn into_iter(self) -> Self::IntoIter {
        CardSetIter(self)
    }
}

/// Iterator over the cards of a [CardSet].
#[derive(Debug, Clone)]
pub struct CardSetIter(CardSet);

impl Iterator for CardSetIter {
    type Item = Card;

    fn next(&mut self) -> Option<Card> {
        if self.0.is_empty() {
            None
        } else {
            let card = Card::from_index(self.0.0.trailing_zeros() as u8);
            self.0 = self.0.remove_lowest();
            card
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for CardSetIter {}

impl FromStr for CardSet {
    type Err = ParseError;

    /// Parses concatenated cards like `QhAh7h9dTc`, fails on duplicated cards.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Card::parse_many(s)?
            .into_iter()
            .try_fold(CardSet::EMPTY, |set, card| {
                if set.contains(card) {
                    Err(ParseError::DuplicateCard(card))
                } else {
                    Ok(set.with(card))
                }
            })
    }
}

impl fmt::Display for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

impl fmt::Debug for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardSet({self})")
    }
}

/// A set of ranks, bit `rank` is set for each rank in the set.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RankSet(u16);

impl RankSet {
    /// The empty set.
    pub const EMPTY: RankSet = RankSet(0);

    /// The wheel straight A-2-3-4-5.
    const WHEEL: RankSet = RankSet(0b1_0000_0000_1111);

    /// Creates a set from its bits, bits above 13 are dropped.
    pub const fn from_bits(bits: u16) -> RankSet {
        RankSet(bits & RANKS_MASK as u16)
    }

    /// The set bits.
    #[inline]
    pub const fn bits(&self) -> u16 {
        self.0
    }

    /// Creates a set with a single rank.
    #[inline]
    pub const fn from_rank(rank: Rank) -> RankSet {
        RankSet(1 << rank as u16)
    }

    /// Checks if the rank is in this set.
    #[inline]
    pub fn contains(&self, rank: Rank) -> bool {
        self.0 & (1 << rank as u16) != 0
    }

    /// Checks if the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// The number of ranks in this set.
    #[inline]
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Returns the ranks in this set that are not in `other`.
    #[inline]
    pub fn without(self, other: RankSet) -> RankSet {
        RankSet(self.0 & !other.0)
    }

    /// Removes the lowest rank, the set must not be empty.
    #[inline]
    pub fn remove_lowest(self) -> RankSet {
        debug_assert!(!self.is_empty());
        RankSet(self.0 & self.0.wrapping_sub(1))
    }

    /// Removes the two lowest ranks.
    #[inline]
    pub fn remove_lowest_two(self) -> RankSet {
        self.remove_lowest().remove_lowest()
    }

    /// Drops the lowest ranks until at most `n` ranks are left.
    #[inline]
    pub fn keep_highest(self, n: u32) -> RankSet {
        let mut ranks = self;
        while ranks.count() > n {
            ranks = ranks.remove_lowest();
        }
        ranks
    }

    /// The set with only the highest rank of this set, empty if this set is empty.
    #[inline]
    pub fn highest(self) -> RankSet {
        if self.is_empty() {
            RankSet::EMPTY
        } else {
            RankSet(1 << (15 - self.0.leading_zeros()))
        }
    }

    /// The highest rank of this set.
    pub fn highest_rank(&self) -> Option<Rank> {
        (!self.is_empty()).then(|| Rank::from_index(15 - self.0.leading_zeros() as u8))
    }

    /// The top rank of the highest five ranks run in this set.
    ///
    /// The ace plays low in the wheel A-2-3-4-5 whose top rank is the five,
    /// returns an empty set if there is no straight.
    #[inline]
    pub fn straight_top(self) -> RankSet {
        let r = self.0;
        let runs = r & (r << 1) & (r << 2) & (r << 3) & (r << 4) & RANKS_MASK as u16;
        let wheel = if self.0 & Self::WHEEL.0 == Self::WHEEL.0 {
            Self::from_rank(Rank::Five).0
        } else {
            0
        };

        RankSet(runs | wheel).highest()
    }

    /// Iterates the ranks from the highest to the lowest.
    pub fn iter(&self) -> impl Iterator<Item = Rank> + use<> {
        let bits = self.0;
        Rank::ranks().rev().filter(move |&r| bits & (1 << r as u16) != 0)
    }
}

impl ops::BitOr for RankSet {
    type Output = RankSet;

    #[inline]
    fn bitor(self, rhs: RankSet) -> RankSet {
        RankSet(self.0 | rhs.0)
    }
}

impl ops::BitAnd for RankSet {
    type Output = RankSet;

    #[inline]
    fn bitand(self, rhs: RankSet) -> RankSet {
        RankSet(self.0 & rhs.0)
    }
}

impl FromIterator<Rank> for RankSet {
    fn from_iter<I: IntoIterator<Item = Rank>>(iter: I) -> Self {
        iter.into_iter()
            .fold(RankSet::EMPTY, |set, r| set | RankSet::from_rank(r))
    }
}

impl fmt::Display for RankSet {
    /// Displays the ranks from highest to lowest, i.e. `AQ9`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.iter().try_for_each(|r| write!(f, "{r}"))
    }
}

impl fmt::Debug for RankSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RankSet({self})")
    }
}

/// The ranks of a card set grouped by multiplicity.
///
/// Each field holds the ranks that appear at least that many times, so a rank
/// in `trips` is also in `pairs` and `any`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multiples {
    /// Ranks with at least one card.
    pub any: RankSet,
    /// Ranks with at least two cards.
    pub pairs: RankSet,
    /// Ranks with at least three cards.
    pub trips: RankSet,
    /// Ranks with four cards.
    pub quads: RankSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(s: &str) -> CardSet {
        s.parse().unwrap()
    }

    fn ranks(s: &str) -> RankSet {
        s.chars().map(|c| Rank::from_char(c).unwrap()).collect()
    }

    #[test]
    fn card_set_ops() {
        let a = cards("AsKd");
        let b = cards("2c");
        let ab = a | b;

        assert_eq!(ab.count(), 3);
        assert!(ab.contains("Kd".parse().unwrap()));
        assert!(!ab.contains("Kc".parse().unwrap()));
        assert!(a.is_disjoint(b));
        assert!(!ab.is_disjoint(b));
        assert_eq!(ab.without(b), a);
        assert_eq!(CardSet::FULL.count(), 52);
        assert_eq!(CardSet::from_bits(u64::MAX), CardSet::FULL);
    }

    #[test]
    fn card_set_remove_lowest() {
        // 2s has index 0 and 3h index 14.
        let set = cards("3h2sAc");
        assert_eq!(set.remove_lowest(), cards("3hAc"));
        assert_eq!(set.remove_lowest_two(), cards("Ac"));
        assert_eq!(set.remove_lowest_two().remove_lowest(), CardSet::EMPTY);
    }

    #[test]
    fn card_set_iter() {
        let set = cards("AcKd2s");
        let order = set.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        assert_eq!(order, vec!["2s", "Kd", "Ac"]);
        assert_eq!(set.iter().len(), 3);
        assert_eq!(set.iter().collect::<CardSet>(), set);
    }

    #[test]
    fn card_set_parse() {
        assert_eq!(cards("").count(), 0);
        assert_eq!(cards("QhAh7h9dTc").to_string(), "7hQhAh9dTc");
        assert_eq!(
            "AsKdAs".parse::<CardSet>(),
            Err(ParseError::DuplicateCard("As".parse().unwrap()))
        );
        assert_eq!(
            "AsK".parse::<CardSet>(),
            Err(ParseError::OddLength("AsK".to_string()))
        );
    }

    #[test]
    fn card_set_suits() {
        let set = cards("AhKh2hTs3c");
        assert_eq!(set.suit(Suit::Hearts), ranks("AK2"));
        assert_eq!(set.suit(Suit::Spades), ranks("T"));
        assert_eq!(set.suit(Suit::Diamonds), RankSet::EMPTY);
        assert_eq!(set.suit(Suit::Clubs), ranks("3"));
        assert_eq!(set.ranks(), ranks("AKT32"));
    }

    #[test]
    fn card_set_multiples() {
        let m = cards("2s2h2d2c7h7dKs").multiples();
        assert_eq!(m.any, ranks("K72"));
        assert_eq!(m.pairs, ranks("72"));
        assert_eq!(m.trips, ranks("2"));
        assert_eq!(m.quads, ranks("2"));

        let m = cards("AsAhAdKsKhKdQc").multiples();
        assert_eq!(m.trips, ranks("AK"));
        assert_eq!(m.quads, RankSet::EMPTY);
    }

    #[test]
    fn rank_set_ops() {
        let set = ranks("AK952");
        assert_eq!(set.count(), 5);
        assert_eq!(set.remove_lowest(), ranks("AK95"));
        assert_eq!(set.remove_lowest_two(), ranks("AK9"));
        assert_eq!(set.keep_highest(1), ranks("A"));
        assert_eq!(set.keep_highest(7), set);
        assert_eq!(set.highest(), ranks("A"));
        assert_eq!(set.highest_rank(), Some(Rank::Ace));
        assert_eq!(RankSet::EMPTY.highest(), RankSet::EMPTY);
        assert_eq!(RankSet::EMPTY.highest_rank(), None);
        assert_eq!(set.without(ranks("K2")), ranks("A95"));
        assert_eq!(set.to_string(), "AK952");
    }

    #[test]
    fn rank_set_straights() {
        assert_eq!(ranks("AKQJT").straight_top(), ranks("A"));
        assert_eq!(ranks("65432").straight_top(), ranks("6"));
        assert_eq!(ranks("A5432").straight_top(), ranks("5"));
        assert_eq!(ranks("A65432").straight_top(), ranks("6"));
        assert_eq!(ranks("98765432").straight_top(), ranks("9"));
        assert_eq!(ranks("AKQJ9").straight_top(), RankSet::EMPTY);
        assert_eq!(ranks("KA234").straight_top(), RankSet::EMPTY);
    }
}
