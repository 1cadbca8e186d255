// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Block batched backend.
//!
//! Hands are scored in fixed size blocks by a [Kernel], the way an accelerator
//! device runs one work item per hand. Only full blocks are submitted to the
//! kernel, the trailing partial block is scored with the scalar evaluator so
//! counts stay exact.
use std::thread;

use headsup_cards::CardSet;

use super::Backend;
use crate::{
    BackendError,
    eval::{Score, eval},
    matchup::Deal,
    outcomes::Outcomes,
    subsets::FiveSubset,
};

/// Default number of hands in a block.
pub const BLOCK_SIZE: usize = 256;

/// Scores a full block of hands.
pub trait Kernel: Send + Sync {
    /// Scores `hands` into `scores`, both slices have the block size length.
    fn score_block(&self, hands: &[CardSet], scores: &mut [Score]);
}

/// A kernel that runs the scalar evaluator on each hand of the block.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvalKernel;

impl Kernel for EvalKernel {
    #[inline]
    fn score_block(&self, hands: &[CardSet], scores: &mut [Score]) {
        for (&hand, score) in hands.iter().zip(scores) {
            *score = eval(hand);
        }
    }
}

/// A backend that scores hands in blocks of `block_size` hands.
#[derive(Debug, Clone)]
pub struct BatchedBackend<K = EvalKernel> {
    tasks: usize,
    block_size: usize,
    kernel: K,
}

impl<K: Kernel> BatchedBackend<K> {
    /// Creates a backend checking the block size is a power of two.
    pub fn try_new(tasks: usize, block_size: usize, kernel: K) -> Result<Self, BackendError> {
        if tasks == 0 {
            return Err(BackendError::NoTasks("batched"));
        }

        if !block_size.is_power_of_two() {
            return Err(BackendError::BlockSize(block_size));
        }

        Ok(Self {
            tasks,
            block_size,
            kernel,
        })
    }

    /// The number of hands in a block.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// The kernel that scores blocks.
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Tallies full blocks of boards.
    fn reduce_blocks(&self, deal: &Deal, subsets: &[FiveSubset]) -> Outcomes {
        let mut alice_hands = vec![CardSet::EMPTY; self.block_size];
        let mut bob_hands = vec![CardSet::EMPTY; self.block_size];
        let mut alice_scores = vec![Score::NONE; self.block_size];
        let mut bob_scores = vec![Score::NONE; self.block_size];

        let mut outcomes = Outcomes::ZERO;
        for block in subsets.chunks_exact(self.block_size) {
            for (i, &subset) in block.iter().enumerate() {
                (alice_hands[i], bob_hands[i]) = deal.hands(subset);
            }

            self.kernel.score_block(&alice_hands, &mut alice_scores);
            self.kernel.score_block(&bob_hands, &mut bob_scores);

            for (&alice, &bob) in alice_scores.iter().zip(&bob_scores) {
                outcomes.record(alice, bob);
            }
        }

        outcomes
    }
}

impl BatchedBackend {
    /// Creates a backend with the scalar kernel.
    ///
    /// Panics if tasks is zero or block size is not a power of two.
    pub fn new(tasks: usize, block_size: usize) -> Self {
        assert!(tasks > 0);
        assert!(block_size.is_power_of_two());

        Self {
            tasks,
            block_size,
            kernel: EvalKernel,
        }
    }
}

impl<K: Kernel> Backend for BatchedBackend<K> {
    fn name(&self) -> &'static str {
        "batched"
    }

    fn score_batch(&self, hands: &[CardSet]) -> Vec<Score> {
        let mut scores = vec![Score::NONE; hands.len()];

        let blocks = hands.chunks_exact(self.block_size);
        let tail = blocks.remainder();
        let full = hands.len() - tail.len();

        for (hands, scores) in blocks.zip(scores.chunks_exact_mut(self.block_size)) {
            self.kernel.score_block(hands, scores);
        }

        for (&hand, score) in tail.iter().zip(&mut scores[full..]) {
            *score = eval(hand);
        }

        scores
    }

    fn reduce(&self, deal: &Deal, subsets: &[FiveSubset]) -> Outcomes {
        let num_blocks = subsets.len() / self.block_size;
        let (full, tail) = subsets.split_at(num_blocks * self.block_size);

        let mut outcomes = deal.reduce(tail);
        if num_blocks == 0 {
            return outcomes;
        }

        let per_task = num_blocks.div_ceil(self.tasks) * self.block_size;
        let mut tallies = vec![Outcomes::ZERO; self.tasks];

        thread::scope(|s| {
            for (chunk, tally) in full.chunks(per_task).zip(tallies.iter_mut()) {
                s.spawn(move || *tally = self.reduce_blocks(deal, chunk));
            }
        });

        outcomes += tallies.into_iter().sum::<Outcomes>();
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{backend::CpuBackend, subsets::SubsetCatalog};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// A kernel that counts blocks and checks their size.
    #[derive(Default)]
    struct CountingKernel {
        block_size: usize,
        blocks: AtomicUsize,
    }

    impl Kernel for CountingKernel {
        fn score_block(&self, hands: &[CardSet], scores: &mut [Score]) {
            assert_eq!(hands.len(), self.block_size);
            assert_eq!(scores.len(), self.block_size);
            self.blocks.fetch_add(1, Ordering::Relaxed);
            EvalKernel.score_block(hands, scores);
        }
    }

    fn counting_backend(tasks: usize, block_size: usize) -> BatchedBackend<CountingKernel> {
        let kernel = CountingKernel {
            block_size,
            ..Default::default()
        };
        BatchedBackend::try_new(tasks, block_size, kernel).unwrap()
    }

    #[test]
    fn score_batch_full_blocks() {
        let hands = (0..1000u64)
            .map(|i| CardSet::from_bits(0x7f << (i % 45)))
            .collect::<Vec<_>>();

        let backend = counting_backend(1, 64);
        let scores = backend.score_batch(&hands);

        // 15 full blocks and a tail of 40 hands.
        assert_eq!(backend.kernel().blocks.load(Ordering::Relaxed), 15);
        assert_eq!(scores, CpuBackend::new(2).score_batch(&hands));
    }

    #[test]
    fn reduce_full_blocks() {
        let catalog = SubsetCatalog::build();
        let subsets = &catalog.subsets()[..10_000];
        let deal = Deal::new("AsKs".parse().unwrap(), "7h7d".parse().unwrap()).unwrap();

        for tasks in [1, 3, 8] {
            let backend = counting_backend(tasks, 256);
            assert_eq!(backend.reduce(&deal, subsets), deal.reduce(subsets));

            // 39 full blocks for each player.
            assert_eq!(backend.kernel().blocks.load(Ordering::Relaxed), 2 * 39);
        }

        // Fewer boards than a block.
        let backend = counting_backend(2, 256);
        assert_eq!(backend.reduce(&deal, &subsets[..100]), deal.reduce(&subsets[..100]));
        assert_eq!(backend.kernel().blocks.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn block_size_checks() {
        assert!(matches!(
            BatchedBackend::try_new(1, 0, EvalKernel),
            Err(BackendError::BlockSize(0))
        ));
        assert!(matches!(
            BatchedBackend::try_new(1, 384, EvalKernel),
            Err(BackendError::BlockSize(384))
        ));
        assert!(matches!(
            BatchedBackend::try_new(0, 256, EvalKernel),
            Err(BackendError::NoTasks("batched"))
        ));
        assert_eq!(BatchedBackend::new(2, BLOCK_SIZE).block_size(), BLOCK_SIZE);
    }
}
