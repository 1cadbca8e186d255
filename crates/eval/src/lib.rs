// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Headsup exact preflop equities.
//!
//! Computes the exact winning probabilities of two starting hands by scoring
//! all the boards that can be dealt after the hole cards. A 7 cards hand is
//! scored with [eval] into a [Score] that compares like poker hands:
//!
//! ```
//! # use headsup_eval::*;
//! let flush = eval("AhKh2h3h9hTcJd".parse().unwrap());
//! let straight = eval("AsKdQhJcTd2c3s".parse().unwrap());
//! assert_eq!(flush.rank(), HandRank::Flush);
//! assert!(flush > straight);
//! ```
//!
//! A matchup between two [HandClass] is computed by an [Enumerator] that
//! runs out the 1,712,304 boards of the [SubsetCatalog] for each deal of the
//! hole cards on a [Backend]:
//!
//! ```no_run
//! # use headsup_eval::*;
//! let catalog = SubsetCatalog::build();
//! let backend = backend::new(&Config::default()).unwrap();
//! let enumerator = Enumerator::new(&catalog, backend.as_ref());
//!
//! let outcomes = enumerator.compare_hands("AKs".parse().unwrap(), "QQ".parse().unwrap());
//! println!("AKs wins {:.2}%", outcomes.alice_ratio() * 100.0);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod backend;
pub use backend::{Backend, BackendKind};

mod config;
pub use config::{Config, default_tasks};

mod error;
pub use error::{BackendError, RegressionError, ValidationError};

pub mod eval;
pub use eval::{HandRank, Score, eval, eval_checked};

mod hands;
pub use hands::{HandCatalog, HandClass, NUM_HAND_CLASSES};

pub mod hash;

mod matchup;
pub use matchup::{Deal, Enumerator};

mod outcomes;
pub use outcomes::Outcomes;

pub mod regression;

mod subsets;
pub use subsets::{FREE_CARDS, FiveSubset, FreeCards, NUM_FIVE_SUBSETS, SubsetCatalog};

// Reexport cards types.
pub use headsup_cards::{Card, CardSet, Deck, ParseError, Rank, RankSet, Suit};
