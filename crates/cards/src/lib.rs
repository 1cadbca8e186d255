// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Headsup cards types.
//!
//! This crate define types to create cards and sets of cards:
//!
//! ```
//! # use headsup_cards::{Card, CardSet, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd = "Kd".parse::<Card>().unwrap();
//! let hand = CardSet::from(ah) | CardSet::from(kd);
//! assert_eq!(hand, "AhKd".parse().unwrap());
//! assert_eq!(hand.count(), 2);
//! ```
//!
//! and a [Deck] type for iterating the k-cards hands of the cards left in a deck:
//!
//! ```
//! # use headsup_cards::{CardSet, Deck};
//! let used = "AhKd".parse::<CardSet>().unwrap();
//! let mut counter = 0;
//! Deck::without(used).for_each(2, |hand| {
//!     assert!(hand.is_disjoint(used));
//!     counter += 1;
//! });
//! assert_eq!(counter, 1_225);
//! ```
//!
//! The **`parallel`** feature enables parallel iteration with a given number of
//! tasks, the following example uses 4 tasks to iterate all 5 cards hands, the
//! closure `task_id` can be used to store per task data to reduce contention:
//!
//! ```
//! # #[cfg(feature = "parallel")]
//! # fn par_for_each() {
//! # use std::sync::atomic;
//! # use headsup_cards::Deck;
//! let counter = atomic::AtomicU64::new(0);
//! Deck::default().par_for_each(4, 5, |task_id, hand| {
//!     assert_eq!(hand.count(), 5);
//!     counter.fetch_add(1, atomic::Ordering::Relaxed);
//! });
//! assert_eq!(counter.load(atomic::Ordering::Relaxed), 2_598_960);
//! # }
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod cards;
pub use cards::{Card, ParseError, Rank, Suit};

pub mod combin;

mod deck;
pub use deck::Deck;

mod set;
pub use set::{CardSet, CardSetIter, Multiples, RankSet};
