// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Multi threaded backend.
use std::thread;

use headsup_cards::CardSet;

use super::Backend;
use crate::{
    BackendError,
    eval::{Score, eval},
    matchup::Deal,
    outcomes::Outcomes,
    subsets::{FiveSubset, SubsetCatalog},
};

/// A backend that splits the work in equal contiguous chunks, one per task.
///
/// Each task runs on a scoped thread with its own tally, the tallies are
/// added after all tasks are done.
#[derive(Debug, Clone)]
pub struct CpuBackend {
    tasks: usize,
}

impl CpuBackend {
    /// Creates a backend that runs with `tasks` threads.
    ///
    /// Panics if tasks is zero.
    pub fn new(tasks: usize) -> Self {
        assert!(tasks > 0);
        Self { tasks }
    }

    /// Creates a backend checking the number of tasks.
    pub fn try_new(tasks: usize) -> Result<Self, BackendError> {
        if tasks == 0 {
            Err(BackendError::NoTasks("cpu"))
        } else {
            Ok(Self { tasks })
        }
    }

    /// The number of tasks.
    pub fn tasks(&self) -> usize {
        self.tasks
    }

    /// Reduces the flat range of (deal, board) pairs across all tasks.
    fn par_reduce(&self, deals: &[Deal], subsets: &[FiveSubset]) -> Outcomes {
        let total = deals.len() * subsets.len();
        if total == 0 {
            return Outcomes::ZERO;
        }

        let per_task = total.div_ceil(self.tasks);
        let mut tallies = vec![Outcomes::ZERO; self.tasks];

        thread::scope(|s| {
            for (task_id, tally) in tallies.iter_mut().enumerate() {
                let start = task_id * per_task;
                if start >= total {
                    break;
                }

                let end = (start + per_task).min(total);
                s.spawn(move || *tally = reduce_range(deals, subsets, start, end));
            }
        });

        tallies.into_iter().sum()
    }
}

/// Reduces positions `start..end` of the flat range where position `i` is the
/// board `i % n` of deal `i / n`.
fn reduce_range(deals: &[Deal], subsets: &[FiveSubset], start: usize, end: usize) -> Outcomes {
    let n = subsets.len();
    let mut outcomes = Outcomes::ZERO;

    let mut pos = start;
    while pos < end {
        let offset = pos % n;
        let len = (n - offset).min(end - pos);
        outcomes += deals[pos / n].reduce(&subsets[offset..offset + len]);
        pos += len;
    }

    outcomes
}

impl Backend for CpuBackend {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn score_batch(&self, hands: &[CardSet]) -> Vec<Score> {
        let mut scores = vec![Score::NONE; hands.len()];
        if hands.is_empty() {
            return scores;
        }

        let per_task = hands.len().div_ceil(self.tasks);
        thread::scope(|s| {
            for (hands, scores) in hands.chunks(per_task).zip(scores.chunks_mut(per_task)) {
                s.spawn(move || {
                    for (&hand, score) in hands.iter().zip(scores) {
                        *score = eval(hand);
                    }
                });
            }
        });

        scores
    }

    fn reduce(&self, deal: &Deal, subsets: &[FiveSubset]) -> Outcomes {
        self.par_reduce(std::slice::from_ref(deal), subsets)
    }

    fn reduce_deals(&self, deals: &[Deal], catalog: &SubsetCatalog) -> Outcomes {
        self.par_reduce(deals, catalog.subsets())
    }
}
