// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Exact matchup enumeration.
//!
//! A matchup between two starting hand classes is computed by dealing the hole
//! cards for every distinct suit assignment of the second hand, with the first
//! hand suits fixed, and by running out all the 5 cards boards from the 48
//! cards left in the deck.
use log::debug;
use std::time::Instant;

use headsup_cards::{CardSet, Deck, Suit};

use crate::{
    RegressionError,
    backend::Backend,
    eval::{Score, eval},
    hands::HandClass,
    outcomes::Outcomes,
    subsets::{FREE_CARDS, FiveSubset, FreeCards, SubsetCatalog},
};

/// The hole cards of both players and the cards left in the deck.
#[derive(Debug, Clone)]
pub struct Deal {
    alice: CardSet,
    bob: CardSet,
    free: FreeCards,
}

impl Deal {
    /// Creates a deal from two disjoint sets of two cards.
    ///
    /// Returns `None` if a player doesn't have two cards or if the players
    /// share a card.
    pub fn new(alice: CardSet, bob: CardSet) -> Option<Deal> {
        if alice.count() != 2 || bob.count() != 2 || !alice.is_disjoint(bob) {
            return None;
        }

        let deck = Deck::without(alice | bob);
        let cards = deck.cards();
        debug_assert_eq!(cards.len(), FREE_CARDS);

        Some(Deal {
            alice,
            bob,
            free: std::array::from_fn(|i| CardSet::from(cards[i])),
        })
    }

    /// The first player hole cards.
    pub fn alice(&self) -> CardSet {
        self.alice
    }

    /// The second player hole cards.
    pub fn bob(&self) -> CardSet {
        self.bob
    }

    /// The cards left in the deck in index order.
    pub fn free(&self) -> &FreeCards {
        &self.free
    }

    /// Both players 7 cards hands for a board.
    #[inline]
    pub fn hands(&self, subset: FiveSubset) -> (CardSet, CardSet) {
        let board = subset.resolve(&self.free);
        (self.alice | board, self.bob | board)
    }

    /// Scores both players hands for a board.
    #[inline]
    pub fn showdown(&self, subset: FiveSubset) -> (Score, Score) {
        let (alice, bob) = self.hands(subset);
        (eval(alice), eval(bob))
    }

    /// Tallies the showdowns for a range of boards.
    pub fn reduce(&self, subsets: &[FiveSubset]) -> Outcomes {
        let mut outcomes = Outcomes::ZERO;
        for &subset in subsets {
            let (alice, bob) = self.showdown(subset);
            outcomes.record(alice, bob);
        }

        outcomes
    }
}

/// Computes matchups between starting hand classes.
pub struct Enumerator<'a> {
    catalog: &'a SubsetCatalog,
    backend: &'a dyn Backend,
}

impl<'a> Enumerator<'a> {
    /// Creates an enumerator that reduces boards with the given backend.
    pub fn new(catalog: &'a SubsetCatalog, backend: &'a dyn Backend) -> Self {
        Self { catalog, backend }
    }

    /// The backend used by this enumerator.
    pub fn backend(&self) -> &dyn Backend {
        self.backend
    }

    /// The deals of a matchup.
    ///
    /// The first player cards are spades for the high card and spades or
    /// hearts for the low card. The second player gets all the ordered suit
    /// pairs consistent with its class that don't collide with the first
    /// player cards, so pairs are dealt twice for each distinct suit pair.
    pub fn deals(alice: HandClass, bob: HandClass) -> Vec<Deal> {
        let alice_low = if alice.is_suited() {
            Suit::Spades
        } else {
            Suit::Hearts
        };
        let alice_cards = alice.cards(Suit::Spades, alice_low);

        let mut deals = Vec::with_capacity(12);
        for s0 in Suit::suits() {
            for s1 in Suit::suits() {
                if (s0 == s1) != bob.is_suited() {
                    continue;
                }

                let bob_cards = bob.cards(s0, s1);
                if let Some(deal) = Deal::new(alice_cards, bob_cards) {
                    deals.push(deal);
                }
            }
        }

        deals
    }

    /// Computes the outcomes of all the run-outs of a matchup.
    pub fn compare_hands(&self, alice: HandClass, bob: HandClass) -> Outcomes {
        let deals = Self::deals(alice, bob);
        self.reduce(alice, bob, &deals)
    }

    /// Computes a matchup and checks the run-outs count and the symmetry of
    /// identical hands.
    pub fn compare_checked(
        &self,
        alice: HandClass,
        bob: HandClass,
    ) -> Result<Outcomes, RegressionError> {
        let deals = Self::deals(alice, bob);
        let outcomes = self.reduce(alice, bob, &deals);

        let expected = (deals.len() * self.catalog.len()) as u64;
        if outcomes.total() != expected {
            return Err(RegressionError::Total {
                alice,
                bob,
                expected,
                got: outcomes.total(),
            });
        }

        if alice == bob && !outcomes.is_symmetric() {
            return Err(RegressionError::SelfInconsistency {
                hand: alice,
                outcomes,
            });
        }

        Ok(outcomes)
    }

    fn reduce(&self, alice: HandClass, bob: HandClass, deals: &[Deal]) -> Outcomes {
        let now = Instant::now();
        let outcomes = self.backend.reduce_deals(deals, self.catalog);

        debug!(
            "{alice} vs. {bob}: {} deals {} run-outs in {:.3}s with {}",
            deals.len(),
            outcomes.total(),
            now.elapsed().as_secs_f64(),
            self.backend.name()
        );

        outcomes
    }
}
