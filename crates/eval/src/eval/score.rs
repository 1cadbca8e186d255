// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand scores.
use std::fmt;

use headsup_cards::RankSet;

/// The category of a poker hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandRank {
    /// No pair.
    HighCard = 0,
    /// One pair.
    OnePair,
    /// Two pairs.
    TwoPair,
    /// Three cards of the same rank.
    ThreeOfAKind,
    /// Five consecutive ranks.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four cards of the same rank.
    FourOfAKind,
    /// A straight with all cards of the same suit.
    StraightFlush,
}

impl HandRank {
    /// The number of categories.
    pub const COUNT: usize = 9;

    const ALL: [HandRank; 9] = {
        use HandRank::*;
        [
            HighCard,
            OnePair,
            TwoPair,
            ThreeOfAKind,
            Straight,
            Flush,
            FullHouse,
            FourOfAKind,
            StraightFlush,
        ]
    };

    /// Returns all categories from the lowest to the highest.
    pub fn ranks() -> impl DoubleEndedIterator<Item = HandRank> + ExactSizeIterator {
        Self::ALL.into_iter()
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandRank::HighCard => "high-card",
            HandRank::OnePair => "pair",
            HandRank::TwoPair => "two-pair",
            HandRank::ThreeOfAKind => "trips",
            HandRank::Straight => "straight",
            HandRank::Flush => "flush",
            HandRank::FullHouse => "full-house",
            HandRank::FourOfAKind => "quads",
            HandRank::StraightFlush => "straight-flush",
        };

        write!(f, "{name}")
    }
}

/// The score of a 7 cards hand.
///
/// Scores are compared as integers, a higher score wins and equal scores tie.
/// The score bits have the following layout:
///
/// ```text
///   +------+---------------+---------------+
///   | cccc | ppppppppppppp | kkkkkkkkkkkkk |
///   +------+---------------+---------------+
///    29-26     25-13            12-0
///   c = hand category (high-card=0,...,straight-flush=8)
///   p = ranks of the category cards (one bit per rank)
///   k = ranks of the kickers (one bit per rank)
/// ```
///
/// Within a category primary ranks and kickers always have the same number of
/// bits set, so comparing masks compares ranks from the highest down.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u32);

impl Score {
    /// A score lower than any hand score.
    pub const NONE: Score = Score(0);

    const CATEGORY_SHIFT: u32 = 26;
    const PRIMARY_SHIFT: u32 = 13;
    const RANKS_MASK: u32 = 0x1fff;

    /// Creates a score from its parts.
    #[inline]
    pub fn new(rank: HandRank, primary: RankSet, kickers: RankSet) -> Score {
        Score(
            ((rank as u32) << Self::CATEGORY_SHIFT)
                | ((primary.bits() as u32) << Self::PRIMARY_SHIFT)
                | kickers.bits() as u32,
        )
    }

    /// Creates a score from its integer value, `None` if the value has no
    /// valid category.
    pub const fn from_value(value: u32) -> Option<Score> {
        if (value >> Self::CATEGORY_SHIFT) as usize >= HandRank::COUNT {
            None
        } else {
            Some(Score(value))
        }
    }

    /// The score integer value.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        HandRank::ALL[(self.0 >> Self::CATEGORY_SHIFT) as usize]
    }

    /// The ranks that make the hand category.
    pub fn primary(&self) -> RankSet {
        RankSet::from_bits(((self.0 >> Self::PRIMARY_SHIFT) & Self::RANKS_MASK) as u16)
    }

    /// The kickers ranks.
    pub fn kickers(&self) -> RankSet {
        RankSet::from_bits((self.0 & Self::RANKS_MASK) as u16)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.rank(), self.primary())?;

        let kickers = self.kickers();
        if !kickers.is_empty() {
            write!(f, " {kickers}")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score(0x{:08x} {self})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use headsup_cards::Rank;

    fn ranks(s: &str) -> RankSet {
        s.chars().map(|c| Rank::from_char(c).unwrap()).collect()
    }

    #[test]
    fn score_parts() {
        let s = Score::new(HandRank::TwoPair, ranks("K7"), ranks("A"));
        assert_eq!(s.rank(), HandRank::TwoPair);
        assert_eq!(s.primary(), ranks("K7"));
        assert_eq!(s.kickers(), ranks("A"));
        assert_eq!(s.to_string(), "two-pair K7 A");

        let s = Score::new(HandRank::StraightFlush, ranks("A"), RankSet::EMPTY);
        assert_eq!(s.rank(), HandRank::StraightFlush);
        assert_eq!(s.to_string(), "straight-flush A");
        assert_eq!(Score::from_value(s.value()), Some(s));
    }

    #[test]
    fn from_value_category() {
        let max = Score::new(
            HandRank::StraightFlush,
            RankSet::from_bits(0x1fff),
            RankSet::from_bits(0x1fff),
        );
        assert_eq!(Score::from_value(max.value()), Some(max));
        assert_eq!(Score::from_value(0), Some(Score::NONE));

        assert_eq!(Score::from_value(9 << 26), None);
        assert_eq!(Score::from_value(u32::MAX), None);
    }

    #[test]
    fn category_dominates() {
        let best_pair = Score::new(HandRank::OnePair, ranks("A"), ranks("KQJ"));
        let worst_two_pair = Score::new(HandRank::TwoPair, ranks("32"), ranks("4"));
        assert!(worst_two_pair > best_pair);

        let best_high = Score::new(HandRank::HighCard, RankSet::EMPTY, ranks("AKQJ9"));
        assert!(best_pair > best_high);
        assert!(Score::NONE < Score::new(HandRank::HighCard, RankSet::EMPTY, ranks("75432")));
    }

    #[test]
    fn primary_dominates_kickers() {
        let kings = Score::new(HandRank::OnePair, ranks("K"), ranks("AQJ"));
        let queens = Score::new(HandRank::OnePair, ranks("Q"), ranks("AKJ"));
        assert!(kings > queens);

        let high = Score::new(HandRank::TwoPair, ranks("K2"), ranks("3"));
        let low = Score::new(HandRank::TwoPair, ranks("QJ"), ranks("A"));
        assert!(high > low);

        let kicker = Score::new(HandRank::TwoPair, ranks("K2"), ranks("4"));
        assert!(kicker > high);
    }
}
