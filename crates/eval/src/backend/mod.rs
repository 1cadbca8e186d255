// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Execution backends.
//!
//! A backend scores batches of 7 cards hands and reduces the boards of a deal
//! into [Outcomes]. All backends must return exactly the same scores as
//! [eval](crate::eval::eval).
use std::{fmt, str::FromStr};

use headsup_cards::CardSet;

use crate::{
    BackendError, Config,
    eval::Score,
    matchup::Deal,
    outcomes::Outcomes,
    subsets::{FiveSubset, SubsetCatalog},
};

mod batched;
pub use batched::{BLOCK_SIZE, BatchedBackend, EvalKernel, Kernel};

mod cpu;
pub use cpu::CpuBackend;

/// Scores hands and reduces matchup boards.
pub trait Backend: Send + Sync {
    /// The backend name.
    fn name(&self) -> &'static str;

    /// Scores a batch of 7 cards hands, scores are in the same order as hands.
    fn score_batch(&self, hands: &[CardSet]) -> Vec<Score>;

    /// Tallies the showdowns of a deal for a contiguous range of boards.
    fn reduce(&self, deal: &Deal, subsets: &[FiveSubset]) -> Outcomes;

    /// Tallies the showdowns of all the deals of a matchup for all boards.
    fn reduce_deals(&self, deals: &[Deal], catalog: &SubsetCatalog) -> Outcomes {
        deals
            .iter()
            .map(|deal| self.reduce(deal, catalog.subsets()))
            .sum()
    }
}

/// The available backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// Multi threaded scalar evaluation.
    #[default]
    Cpu,
    /// Fixed size blocks evaluation.
    Batched,
}

impl FromStr for BackendKind {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cpu" => Ok(BackendKind::Cpu),
            "batched" => Ok(BackendKind::Batched),
            _ => Err(BackendError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Cpu => write!(f, "cpu"),
            BackendKind::Batched => write!(f, "batched"),
        }
    }
}

/// Creates the backend selected by the configuration.
pub fn new(config: &Config) -> Result<Box<dyn Backend>, BackendError> {
    match config.backend {
        BackendKind::Cpu => Ok(Box::new(CpuBackend::try_new(config.tasks)?)),
        BackendKind::Batched => Ok(Box::new(BatchedBackend::try_new(
            config.tasks,
            config.block_size,
            EvalKernel,
        )?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_kind_parse() {
        assert_eq!("cpu".parse::<BackendKind>(), Ok(BackendKind::Cpu));
        assert_eq!("batched".parse::<BackendKind>(), Ok(BackendKind::Batched));
        assert_eq!(
            "opencl".parse::<BackendKind>(),
            Err(BackendError::Unknown("opencl".to_string()))
        );

        for kind in [BackendKind::Cpu, BackendKind::Batched] {
            assert_eq!(kind.to_string().parse::<BackendKind>(), Ok(kind));
        }
    }

    #[test]
    fn new_backend() {
        let config = Config {
            backend: BackendKind::Batched,
            tasks: 2,
            block_size: 64,
        };
        assert_eq!(new(&config).unwrap().name(), "batched");

        let config = Config {
            backend: BackendKind::Cpu,
            ..config
        };
        assert_eq!(new(&config).unwrap().name(), "cpu");

        let config = Config { tasks: 0, ..config };
        assert_eq!(new(&config).err(), Some(BackendError::NoTasks("cpu")));

        let config = Config {
            backend: BackendKind::Batched,
            tasks: 1,
            block_size: 100,
        };
        assert_eq!(new(&config).err(), Some(BackendError::BlockSize(100)));
    }
}
