// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! Evaluates 7 cards hands into a [Score] that can be compared directly to
//! rank two hands, the score encodes the hand category followed by the ranks
//! that make the category and the kickers. Only the best 5 cards count, suits
//! never break ties.
//!
//! ```
//! # use headsup_eval::eval::*;
//! let wheel = eval("AhJc2d3h4c5d5h".parse().unwrap());
//! let six_high = eval("6cKh2d3h4c5d5h".parse().unwrap());
//! assert_eq!(wheel.rank(), HandRank::Straight);
//! assert!(six_high > wheel);
//! ```

mod evaluator;
pub use evaluator::{eval, eval_checked};

mod score;
pub use score::{HandRank, Score};
