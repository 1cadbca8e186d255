// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Matchup outcomes tally.
use serde::{Deserialize, Serialize};
use std::{iter::Sum, ops};

use crate::eval::Score;

/// Number of run-outs won by each player and tied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Outcomes {
    /// Run-outs won by the first player.
    pub alice: u64,
    /// Run-outs won by the second player.
    pub bob: u64,
    /// Tied run-outs.
    pub tie: u64,
}

impl Outcomes {
    /// An empty tally.
    pub const ZERO: Outcomes = Outcomes {
        alice: 0,
        bob: 0,
        tie: 0,
    };

    /// Records the showdown of two scores.
    #[inline]
    pub fn record(&mut self, alice: Score, bob: Score) {
        self.alice += (alice > bob) as u64;
        self.bob += (alice < bob) as u64;
        self.tie += (alice == bob) as u64;
    }

    /// The number of recorded run-outs.
    pub fn total(&self) -> u64 {
        self.alice + self.bob + self.tie
    }

    /// Fraction of run-outs won by the first player.
    pub fn alice_ratio(&self) -> f64 {
        self.ratio(self.alice)
    }

    /// Fraction of run-outs won by the second player.
    pub fn bob_ratio(&self) -> f64 {
        self.ratio(self.bob)
    }

    /// Fraction of tied run-outs.
    pub fn tie_ratio(&self) -> f64 {
        self.ratio(self.tie)
    }

    /// The first player equity with ties split in half.
    pub fn equity(&self) -> f64 {
        self.alice_ratio() + self.tie_ratio() / 2.0
    }

    /// Checks if both players won the same number of run-outs.
    pub fn is_symmetric(&self) -> bool {
        self.alice == self.bob
    }

    /// The same outcomes seen from the second player.
    pub fn swapped(&self) -> Outcomes {
        Outcomes {
            alice: self.bob,
            bob: self.alice,
            tie: self.tie,
        }
    }

    fn ratio(&self, n: u64) -> f64 {
        match self.total() {
            0 => 0.0,
            total => n as f64 / total as f64,
        }
    }
}

impl ops::Add for Outcomes {
    type Output = Outcomes;

    fn add(self, rhs: Outcomes) -> Outcomes {
        Outcomes {
            alice: self.alice + rhs.alice,
            bob: self.bob + rhs.bob,
            tie: self.tie + rhs.tie,
        }
    }
}

impl ops::AddAssign for Outcomes {
    fn add_assign(&mut self, rhs: Outcomes) {
        *self = *self + rhs;
    }
}

impl Sum for Outcomes {
    fn sum<I: Iterator<Item = Outcomes>>(iter: I) -> Outcomes {
        iter.fold(Outcomes::ZERO, |acc, o| acc + o)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::eval;

    #[test]
    fn record_showdowns() {
        let flush = eval("AhKh2h3h9hTcJd".parse().unwrap());
        let pair = eval("AsAd2c3d9cTsJs".parse().unwrap());

        let mut outcomes = Outcomes::ZERO;
        outcomes.record(flush, pair);
        outcomes.record(pair, flush);
        outcomes.record(pair, pair);
        outcomes.record(flush, pair);

        assert_eq!(
            outcomes,
            Outcomes {
                alice: 2,
                bob: 1,
                tie: 1
            }
        );
        assert_eq!(outcomes.total(), 4);
        assert_eq!(outcomes.alice_ratio(), 0.5);
        assert_eq!(outcomes.bob_ratio(), 0.25);
        assert_eq!(outcomes.tie_ratio(), 0.25);
        assert_eq!(outcomes.equity(), 0.625);
        assert!(!outcomes.is_symmetric());
        assert_eq!(outcomes.swapped().alice, 1);
    }

    #[test]
    fn accumulate() {
        let a = Outcomes {
            alice: 1,
            bob: 2,
            tie: 3,
        };

        let mut b = a;
        b += a;
        assert_eq!(b, a + a);

        let sum = [a, a, a].into_iter().sum::<Outcomes>();
        assert_eq!(sum.total(), 18);
        assert_eq!(Outcomes::default(), Outcomes::ZERO);
        assert_eq!(Outcomes::ZERO.alice_ratio(), 0.0);
    }
}
