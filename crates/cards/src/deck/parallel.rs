// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Parallel hand iteration.
use std::thread;

use super::Deck;
use crate::{CardSet, combin};

impl Deck {
    /// Parallel for each, calls the `f` closure for each k-cards hand.
    ///
    /// The clousure takes an usize that is the task identifier (0..num_task)
    /// and the set of k cards.
    ///
    /// Panics if k is not 1 <= k <= 7.
    pub fn par_for_each<F>(&self, num_tasks: usize, k: usize, f: F)
    where
        F: Fn(usize, CardSet) + Send + Sync,
    {
        assert!((1..=7).contains(&k), "1 <= k <= 7");
        assert!(num_tasks > 0);

        let n = self.cards.len();
        if k > n {
            return;
        }

        let num_hands = combin::nck(n, k);
        let hands_per_task = num_hands.div_ceil(num_tasks);

        thread::scope(|s| {
            for task_id in 0..num_tasks {
                let start = task_id * hands_per_task;
                if start >= num_hands {
                    break;
                }

                let f = &f;
                s.spawn(move || {
                    combin::for_each_ksubset(n, k, start, hands_per_task, |p| {
                        f(task_id, self.hand(p));
                    });
                });
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn par_for_each_counts() {
        let deck = Deck::default();

        for num_tasks in [1, 3, 4, 7] {
            let task_counters = (0..num_tasks)
                .map(|_| AtomicU64::new(0))
                .collect::<Vec<_>>();
            let bits = AtomicU64::new(0);

            deck.par_for_each(num_tasks, 3, |task_id, hand| {
                assert_eq!(hand.count(), 3);
                task_counters[task_id].fetch_add(1, Ordering::Relaxed);
                bits.fetch_xor(hand.bits(), Ordering::Relaxed);
            });

            let total = task_counters
                .iter()
                .map(|c| c.load(Ordering::Relaxed))
                .sum::<u64>();
            assert_eq!(total, 22_100);

            // Each card is in nck(51, 2) = 1275 hands, an odd count.
            assert_eq!(bits.load(Ordering::Relaxed), CardSet::FULL.bits());
        }
    }

    #[test]
    fn par_for_each_more_tasks_than_hands() {
        let small = Deck {
            cards: Deck::default().cards()[..4].to_vec(),
        };

        let count = AtomicU64::new(0);
        small.par_for_each(16, 2, |_, hand| {
            assert_eq!(hand.count(), 2);
            count.fetch_add(1, Ordering::Relaxed);
        });
        assert_eq!(count.load(Ordering::Relaxed), 6);
    }
}
