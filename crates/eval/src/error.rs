// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Evaluation errors.
use headsup_cards::ParseError;

use crate::{eval::HandRank, hands::HandClass, outcomes::Outcomes};

/// Invalid hands passed to the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A scored hand must have 7 cards.
    #[error("a hand must have 7 cards, got {0}")]
    HandSize(usize),
    /// The hole cards and the shared cards of a test case overlap.
    #[error("hands {alice} {bob} {shared} have duplicated cards")]
    DuplicatedCards {
        /// First player hole cards.
        alice: String,
        /// Second player hole cards.
        bob: String,
        /// The shared cards.
        shared: String,
    },
}

/// Execution backend initialization errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Unknown backend name.
    #[error("unknown backend {0:?}, expected cpu or batched")]
    Unknown(String),
    /// A backend needs at least one task.
    #[error("backend {0} needs at least one task")]
    NoTasks(&'static str),
    /// Block sizes must be powers of two.
    #[error("invalid block size {0}, must be a power of two")]
    BlockSize(usize),
}

/// Correctness check failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegressionError {
    /// Malformed cards in a test case.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Invalid test case.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A score table entry has the wrong categories or winner.
    #[error("score test {alice} {bob} {shared}: expected {expected}, got {got}")]
    ScoreMismatch {
        /// First player hole cards.
        alice: &'static str,
        /// Second player hole cards.
        bob: &'static str,
        /// The shared cards.
        shared: &'static str,
        /// Expected categories and winner.
        expected: String,
        /// Computed categories and winner.
        got: String,
    },
    /// Category counts over all 7 cards hands are wrong.
    #[error("{rank} count: expected {expected}, got {got}")]
    Histogram {
        /// The hand category.
        rank: HandRank,
        /// The expected count.
        expected: u64,
        /// The computed count.
        got: u64,
    },
    /// Two backends computed different results.
    #[error("backends {0} and {1} disagree on {2}")]
    BackendMismatch(&'static str, &'static str, String),
    /// Identical hands won a different number of times.
    #[error("identical hands {hand} should win equally often, got {outcomes:?}")]
    SelfInconsistency {
        /// The matched hand class.
        hand: HandClass,
        /// The matchup outcomes.
        outcomes: Outcomes,
    },
    /// The number of run-outs doesn't match the number of deals.
    #[error("{alice} vs. {bob} expected {expected} run-outs, got {got}")]
    Total {
        /// First player hand class.
        alice: HandClass,
        /// Second player hand class.
        bob: HandClass,
        /// Expected total.
        expected: u64,
        /// Computed total.
        got: u64,
    },
}
