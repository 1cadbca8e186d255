// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Run with:
//
// ```bash
// $ cargo r --release --example eval_all7
// ...
// Total hands      133784560
// Elapsed:         0.912s
// Hands/sec:       146693596
//
// high-card        23294460
// pair             58627800
// ...
// ```
use std::time::Instant;

use headsup_eval::{HandRank, default_tasks, regression};

fn main() {
    let tasks = default_tasks();

    let now = Instant::now();
    let counts = regression::category_histogram(tasks);
    let elapsed = now.elapsed().as_secs_f64();

    let total = counts.iter().sum::<u64>();
    println!("Total hands      {total}");
    println!("Tasks:           {tasks}");
    println!("Elapsed:         {:.3}s", elapsed);
    println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);

    let expected = regression::CATEGORY_COUNTS;
    for (rank, (&count, &expected)) in HandRank::ranks().zip(counts.iter().zip(&expected)) {
        let check = if count == expected { "" } else { " (wrong)" };
        println!("{:<16} {count}{check}", rank.to_string());
    }
}
