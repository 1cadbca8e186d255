// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Catalog of the 5 cards boards.
//!
//! Once the four hole cards of a matchup are dealt 48 cards are left, a board
//! is a 5-subset of the positions 0..48 of these free cards. The catalog with
//! all 1,712,304 subsets is built once and shared by all matchups.
use log::debug;
use std::time::Instant;

use headsup_cards::{CardSet, combin};

/// Number of cards left after dealing two hole cards to two players.
pub const FREE_CARDS: usize = 48;

/// Number of 5-subsets of the free cards.
pub const NUM_FIVE_SUBSETS: usize = 1_712_304;

/// The free cards of a deal, in index order.
pub type FreeCards = [CardSet; FREE_CARDS];

/// Five positions in 0..48 packed as 6-bit fields in a u32.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FiveSubset(u32);

impl FiveSubset {
    const MASK: u32 = 0x3f;

    /// Creates a subset from five distinct positions in 0..48.
    pub fn new(positions: [usize; 5]) -> Self {
        debug_assert!(positions.iter().all(|&p| p < FREE_CARDS));

        let packed = positions
            .iter()
            .enumerate()
            .fold(0u32, |acc, (i, &p)| acc | ((p as u32) << (6 * i)));
        Self(packed)
    }

    /// The five positions in the order they were packed.
    pub fn positions(&self) -> [usize; 5] {
        std::array::from_fn(|i| ((self.0 >> (6 * i)) & Self::MASK) as usize)
    }

    /// Resolves the positions to the union of the referenced free cards.
    #[inline]
    pub fn resolve(&self, free: &FreeCards) -> CardSet {
        let card = |i: u32| free[((self.0 >> (6 * i)) & Self::MASK) as usize];
        card(0) | card(1) | card(2) | card(3) | card(4)
    }
}

/// All the 5-subsets of 48 free card positions.
///
/// Subsets are stored with positions in decreasing order `(i0, i1, i2, i3, i4)`
/// and sorted lexicographically, the first one is `(4, 3, 2, 1, 0)` and the
/// last one `(47, 46, 45, 44, 43)`.
#[derive(Debug, Clone)]
pub struct SubsetCatalog {
    subsets: Vec<FiveSubset>,
}

impl SubsetCatalog {
    /// Builds the catalog.
    pub fn build() -> Self {
        let now = Instant::now();

        let mut subsets = Vec::with_capacity(NUM_FIVE_SUBSETS);
        combin::for_each_ksubset(FREE_CARDS, 5, 0, NUM_FIVE_SUBSETS, |c| {
            subsets.push(FiveSubset::new([c[4], c[3], c[2], c[1], c[0]]));
        });

        debug!(
            "Built {} five subsets in {:.3}s",
            subsets.len(),
            now.elapsed().as_secs_f64()
        );

        Self { subsets }
    }

    /// The subsets in catalog order.
    pub fn subsets(&self) -> &[FiveSubset] {
        &self.subsets
    }

    /// Number of subsets.
    pub fn len(&self) -> usize {
        self.subsets.len()
    }

    /// Checks if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.subsets.is_empty()
    }
}
