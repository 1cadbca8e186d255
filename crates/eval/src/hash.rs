// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Deterministic hashing.
//!
//! Integer mixers used to pick reproducible pseudo random hands and matchups,
//! and an xxh3 fingerprint to summarize long streams of scores and outcomes.
use xxhash_rust::xxh3::Xxh3;

use crate::{eval::Score, outcomes::Outcomes};

/// Thomas Wang's 64 bits integer hash.
#[inline]
pub const fn hash(k: u64) -> u64 {
    let mut k = (!k).wrapping_add(k << 21);
    k ^= k >> 24;
    k = k.wrapping_add(k << 3).wrapping_add(k << 8);
    k ^= k >> 14;
    k = k.wrapping_add(k << 2).wrapping_add(k << 4);
    k ^= k >> 28;
    k.wrapping_add(k << 31)
}

/// Bob Jenkins' lookup8 mix of three 64 bits values.
#[inline]
pub const fn hash3(mut a: u64, mut b: u64, mut c: u64) -> u64 {
    macro_rules! mix {
        ($x:ident, $y:ident, $z:ident, $op:tt $s:expr) => {
            $x = $x.wrapping_sub($y).wrapping_sub($z);
            $x ^= $z $op $s;
        };
    }

    mix!(a, b, c, >> 43);
    mix!(b, c, a, << 9);
    mix!(c, a, b, >> 8);
    mix!(a, b, c, >> 38);
    mix!(b, c, a, << 23);
    mix!(c, a, b, >> 5);
    mix!(a, b, c, >> 35);
    mix!(b, c, a, << 49);
    mix!(c, a, b, >> 11);
    mix!(a, b, c, >> 12);
    mix!(b, c, a, << 18);
    mix!(c, a, b, >> 22);
    c
}

/// Mix of two 64 bits values.
#[inline]
pub const fn hash2(a: u64, b: u64) -> u64 {
    hash3(hash(0), a, b)
}

/// An order dependent fingerprint of scores and outcomes.
#[derive(Clone)]
pub struct Fingerprint {
    hasher: Xxh3,
}

impl Default for Fingerprint {
    fn default() -> Self {
        Self::new()
    }
}

impl Fingerprint {
    /// Creates an empty fingerprint.
    pub fn new() -> Self {
        Self {
            hasher: Xxh3::new(),
        }
    }

    /// Adds scores to the fingerprint.
    pub fn update_scores(&mut self, scores: &[Score]) {
        for score in scores {
            self.hasher.update(&score.value().to_le_bytes());
        }
    }

    /// Adds a matchup outcomes to the fingerprint.
    pub fn update_outcomes(&mut self, outcomes: &Outcomes) {
        for n in [outcomes.alice, outcomes.bob, outcomes.tie] {
            self.hasher.update(&n.to_le_bytes());
        }
    }

    /// The fingerprint of all the values added so far.
    pub fn digest(&self) -> u64 {
        self.hasher.digest()
    }
}
