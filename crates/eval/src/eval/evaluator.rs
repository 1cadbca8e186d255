// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Seven cards hand evaluator.
//!
//! Each hand category is scored independently from the others and the best
//! score is the maximum of all candidates, a category that is not present in
//! the hand scores [Score::NONE].
use headsup_cards::{CardSet, Multiples, RankSet};

use super::{HandRank, Score};
use crate::ValidationError;

/// Evaluates a 7 cards hand.
///
/// The set must have exactly 7 cards, this is checked only in debug builds,
/// use [eval_checked] to validate the input.
#[inline]
pub fn eval(cards: CardSet) -> Score {
    debug_assert_eq!(cards.count(), 7, "not a 7 cards hand {cards}");

    let suits = cards.suits();
    let m = cards.multiples();

    straight_flush(&suits)
        .max(four_of_a_kind(&m))
        .max(full_house(&m))
        .max(flush(&suits))
        .max(straight(&m))
        .max(three_of_a_kind(&m))
        .max(two_pair(&m))
        .max(one_pair(&m))
        .max(high_card(&m))
}

/// Evaluates a hand after checking it has 7 cards.
pub fn eval_checked(cards: CardSet) -> Result<Score, ValidationError> {
    match cards.count() {
        7 => Ok(eval(cards)),
        n => Err(ValidationError::HandSize(n as usize)),
    }
}

#[inline]
fn straight_flush(suits: &[RankSet; 4]) -> Score {
    suits
        .iter()
        .map(|s| s.straight_top())
        .max()
        .filter(|top| !top.is_empty())
        .map_or(Score::NONE, |top| {
            Score::new(HandRank::StraightFlush, top, RankSet::EMPTY)
        })
}

#[inline]
fn four_of_a_kind(m: &Multiples) -> Score {
    if m.quads.is_empty() {
        Score::NONE
    } else {
        let kicker = m.any.without(m.quads).highest();
        Score::new(HandRank::FourOfAKind, m.quads, kicker)
    }
}

#[inline]
fn full_house(m: &Multiples) -> Score {
    // A second trips plays as the pair.
    let trips = m.trips.highest();
    let pair = m.pairs.without(trips).highest();
    if trips.is_empty() || pair.is_empty() {
        Score::NONE
    } else {
        Score::new(HandRank::FullHouse, trips, pair)
    }
}

#[inline]
fn flush(suits: &[RankSet; 4]) -> Score {
    suits
        .iter()
        .filter(|s| s.count() >= 5)
        .map(|s| Score::new(HandRank::Flush, s.keep_highest(5), RankSet::EMPTY))
        .max()
        .unwrap_or(Score::NONE)
}

#[inline]
fn straight(m: &Multiples) -> Score {
    let top = m.any.straight_top();
    if top.is_empty() {
        Score::NONE
    } else {
        Score::new(HandRank::Straight, top, RankSet::EMPTY)
    }
}

#[inline]
fn three_of_a_kind(m: &Multiples) -> Score {
    let trips = m.trips.highest();
    if trips.is_empty() {
        Score::NONE
    } else {
        let kickers = m.any.without(trips).keep_highest(2);
        Score::new(HandRank::ThreeOfAKind, trips, kickers)
    }
}

#[inline]
fn two_pair(m: &Multiples) -> Score {
    if m.pairs.count() < 2 {
        Score::NONE
    } else {
        // A third pair can only be the kicker.
        let pairs = m.pairs.keep_highest(2);
        let kicker = m.any.without(pairs).highest();
        Score::new(HandRank::TwoPair, pairs, kicker)
    }
}

#[inline]
fn one_pair(m: &Multiples) -> Score {
    let pair = m.pairs.highest();
    if pair.is_empty() {
        Score::NONE
    } else {
        let kickers = m.any.without(pair).keep_highest(3);
        Score::new(HandRank::OnePair, pair, kickers)
    }
}

#[inline]
fn high_card(m: &Multiples) -> Score {
    Score::new(HandRank::HighCard, RankSet::EMPTY, m.any.keep_highest(5))
}
