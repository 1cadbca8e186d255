// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Correctness checks.
//!
//! A table of hands with known categories and winners, the categories
//! histogram of all the 7 cards hands, backends agreement on pseudo random
//! hands and matchups checks. Random hands and matchups are picked with the
//! deterministic mixers in [hash](crate::hash) so runs are reproducible.
use log::{debug, info};
use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
    time::Instant,
};

use headsup_cards::{CardSet, Deck};

use crate::{
    RegressionError, ValidationError,
    backend::Backend,
    eval::{HandRank, Score, eval},
    hands::{HandCatalog, HandClass},
    hash::{Fingerprint, hash, hash2, hash3},
    matchup::Enumerator,
    outcomes::Outcomes,
    subsets::SubsetCatalog,
};

/// The winner of a showdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    /// The first player wins.
    Alice,
    /// The second player wins.
    Bob,
    /// Split pot.
    Tie,
}

impl Winner {
    /// The winner given both players scores.
    pub fn of(alice: Score, bob: Score) -> Winner {
        match alice.cmp(&bob) {
            std::cmp::Ordering::Greater => Winner::Alice,
            std::cmp::Ordering::Less => Winner::Bob,
            std::cmp::Ordering::Equal => Winner::Tie,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::Alice => write!(f, "Alice"),
            Winner::Bob => write!(f, "Bob"),
            Winner::Tie => write!(f, "tie"),
        }
    }
}

/// A showdown with known categories and winner.
#[derive(Debug, Clone, Copy)]
pub struct ScoreCase {
    /// First player hole cards.
    pub alice: &'static str,
    /// Second player hole cards.
    pub bob: &'static str,
    /// The 5 shared cards.
    pub shared: &'static str,
    /// First player hand category.
    pub alice_rank: HandRank,
    /// Second player hand category.
    pub bob_rank: HandRank,
    /// Who wins.
    pub winner: Winner,
}

const fn case(
    alice: &'static str,
    bob: &'static str,
    shared: &'static str,
    alice_rank: HandRank,
    bob_rank: HandRank,
    winner: Winner,
) -> ScoreCase {
    ScoreCase {
        alice,
        bob,
        shared,
        alice_rank,
        bob_rank,
        winner,
    }
}

/// Showdowns covering the tie-break rules of every category.
#[rustfmt::skip]
pub const SCORE_CASES: [ScoreCase; 47] = {
    use HandRank::*;
    use Winner::*;
    [
        case("As2d", "KsTc", "Qh3h7h9d4c", HighCard, HighCard, Alice),
        case("Ks2d", "AsTc", "Qh3h7h9d4c", HighCard, HighCard, Bob),
        case("4s2d", "5s3c", "QhAh7h9dTc", HighCard, HighCard, Tie),
        case("4s3d", "5s3c", "QhAh7h9d2c", HighCard, HighCard, Bob),
        case("4s3d", "4d3c", "QhAh7h9d2c", HighCard, HighCard, Tie),
        case("As2d", "KsTc", "Qh3h7h9d2c", OnePair, HighCard, Alice),
        case("Ks2d", "AsTc", "Qh3h7h9d2c", OnePair, HighCard, Alice),
        case("Ks2d", "AsTc", "KhAh7h9d3c", OnePair, OnePair, Bob),
        case("Ks2d", "KdTc", "KhAh7h9d3c", OnePair, OnePair, Bob),
        case("KsTd", "Kd2c", "KhAh7h9d3c", OnePair, OnePair, Alice),
        case("Ks3d", "Kd2c", "KhAh7h9d6c", OnePair, OnePair, Tie),
        case("7s6d", "5d4c", "KhKdJh9d8c", OnePair, OnePair, Tie),
        case("7s6d", "5d4c", "7d5h4hAdKc", OnePair, TwoPair, Bob),
        case("2s6d", "5d4c", "2d5h4hAdKc", OnePair, TwoPair, Bob),
        case("7s2d", "5d4c", "2h5h4h7dKc", TwoPair, TwoPair, Alice),
        case("7s2d", "7d2c", "2h5h4h7hKc", TwoPair, TwoPair, Tie),
        case("7sAd", "7dQc", "Kh5h4h7hKc", TwoPair, TwoPair, Alice),
        case("KsAd", "QdAc", "JhJcThTc2c", TwoPair, TwoPair, Tie),
        case("JsAd", "QdAc", "AhJcKhKc2c", TwoPair, TwoPair, Bob),
        case("JsAd", "QdKc", "JhJcQhKs2c", ThreeOfAKind, TwoPair, Alice),
        case("JsAd", "QdKc", "ThTcTs3s2c", ThreeOfAKind, ThreeOfAKind, Alice),
        case("9s8d", "7d6c", "ThTcTsAsKc", ThreeOfAKind, ThreeOfAKind, Tie),
        case("Ts8d", "QdJc", "ThTc2sAsKc", ThreeOfAKind, Straight, Bob),
        case("Ts8d", "QdJc", "2h3c4s5s6c", Straight, Straight, Tie),
        case("Ah5c", "Tc2h", "6d7h8c9dAs", Straight, Straight, Bob),
        case("AhJc", "5cKh", "2d3h4c5d5h", Straight, ThreeOfAKind, Alice),
        case("AhJc", "6cKh", "2d3h4c5d5h", Straight, Straight, Bob),
        case("AhJc", "6c2d", "Th3h4h5d5h", Flush, Straight, Alice),
        case("AhJc", "6h2d", "Th3h4h5d5h", Flush, Flush, Alice),
        case("7h6c", "6h2d", "AhKhQh9h8h", Flush, Flush, Tie),
        case("7h6h", "5h2h", "AhKhQh9h8h", Flush, Flush, Tie),
        case("7d6d", "5h2h", "7h7c6hTh8h", FullHouse, Flush, Alice),
        case("7d6d", "6c6s", "7h7c6h9h8h", FullHouse, FullHouse, Alice),
        case("7d7s", "6c6s", "7h2c6h9h9s", FullHouse, FullHouse, Alice),
        case("7d7s", "6c6s", "9c2c6h9h9s", FullHouse, FullHouse, Alice),
        case("AdKd", "QcJs", "9c6c6h9h9s", FullHouse, FullHouse, Tie),
        case("AdKd", "AcQs", "AsAhQhQdKs", FullHouse, FullHouse, Alice),
        case("2d2c", "AcQs", "AsAhQh2h2s", FourOfAKind, FullHouse, Alice),
        case("2d2c", "3c3s", "3d3hQh2h2s", FourOfAKind, FourOfAKind, Bob),
        case("Ad7c", "Qc3s", "2d2cQh2h2s", FourOfAKind, FourOfAKind, Alice),
        case("AdKc", "AcQs", "2d2cQh2h2s", FourOfAKind, FourOfAKind, Tie),
        case("2d3d", "AcAs", "AdAh4d5d6d", StraightFlush, FourOfAKind, Alice),
        case("Ts8s", "QsJs", "2s3s4s5s6s", StraightFlush, StraightFlush, Tie),
        case("Ah5c", "Tc2h", "6c7c8c9cKh", StraightFlush, StraightFlush, Bob),
        case("AhJc", "5c5s", "2h3h4h5d5h", StraightFlush, FourOfAKind, Alice),
        case("AhJc", "6hKh", "2h3h4h5h5d", StraightFlush, StraightFlush, Bob),
        case("7d8h", "7h2c", "2h3h4h5h6h", StraightFlush, StraightFlush, Bob),
    ]
};

/// Checks all the [SCORE_CASES] showdowns scoring the hands with `backend`.
///
/// Returns the number of checked cases.
pub fn check_score_cases(backend: &dyn Backend) -> Result<usize, RegressionError> {
    let mut hands = Vec::with_capacity(2 * SCORE_CASES.len());
    for case in &SCORE_CASES {
        let alice = case.alice.parse::<CardSet>()?;
        let bob = case.bob.parse::<CardSet>()?;
        let shared = case.shared.parse::<CardSet>()?;

        let all = CardSet::from_bits(alice.bits() | bob.bits() | shared.bits());
        if all.count() != 9 {
            return Err(ValidationError::DuplicatedCards {
                alice: case.alice.to_string(),
                bob: case.bob.to_string(),
                shared: case.shared.to_string(),
            }
            .into());
        }

        hands.push(alice | shared);
        hands.push(bob | shared);
    }

    let scores = backend.score_batch(&hands);
    for (case, scores) in SCORE_CASES.iter().zip(scores.chunks_exact(2)) {
        let (alice, bob) = (scores[0], scores[1]);
        let winner = Winner::of(alice, bob);
        if alice.rank() != case.alice_rank || bob.rank() != case.bob_rank || winner != case.winner
        {
            return Err(RegressionError::ScoreMismatch {
                alice: case.alice,
                bob: case.bob,
                shared: case.shared,
                expected: format!("{} {} {}", case.alice_rank, case.bob_rank, case.winner),
                got: format!("{} {} {winner}", alice.rank(), bob.rank()),
            });
        }
    }

    debug!("Score table passed {} cases", SCORE_CASES.len());
    Ok(SCORE_CASES.len())
}

/// Number of 7 cards hands in each category.
pub const CATEGORY_COUNTS: [u64; HandRank::COUNT] = [
    23_294_460, 58_627_800, 31_433_400, 6_461_620, 6_180_020, 4_047_644, 3_473_184, 224_848,
    41_584,
];

/// Counts the categories of all the 133,784,560 hands of 7 cards.
pub fn category_histogram(tasks: usize) -> [u64; HandRank::COUNT] {
    // Per task counters to avoid contention.
    let task_counters = (0..tasks)
        .map(|_| std::array::from_fn::<_, { HandRank::COUNT }, _>(|_| AtomicU64::new(0)))
        .collect::<Vec<_>>();

    let now = Instant::now();
    Deck::default().par_for_each(tasks, 7, |task_id, hand| {
        let rank = eval(hand).rank();
        task_counters[task_id][rank as usize].fetch_add(1, Ordering::Relaxed);
    });

    let counts = std::array::from_fn(|r| {
        task_counters
            .iter()
            .map(|counters| counters[r].load(Ordering::Relaxed))
            .sum()
    });

    debug!(
        "Evaluated all 7 cards hands in {:.3}s",
        now.elapsed().as_secs_f64()
    );

    counts
}

/// Checks the categories histogram, returns the number of evaluated hands.
pub fn check_category_histogram(tasks: usize) -> Result<u64, RegressionError> {
    let counts = category_histogram(tasks);
    for (rank, (&expected, &got)) in HandRank::ranks().zip(CATEGORY_COUNTS.iter().zip(&counts)) {
        if expected != got {
            return Err(RegressionError::Histogram {
                rank,
                expected,
                got,
            });
        }
    }

    Ok(counts.iter().sum())
}

/// Pseudo random 7 cards hands, 1024 rows of `multiple << 10` draws each.
///
/// Rows are generated on demand so callers can score one row at a time.
/// Draws with repeated cards are skipped.
pub fn random_hand_rows(multiple: usize) -> impl Iterator<Item = Vec<CardSet>> {
    const ROWS: u64 = 1 << 10;
    let cols = (multiple as u64) << 10;

    (0..ROWS).map(move |i| {
        (0..cols)
            .map(|j| (0..7).fold(0u64, |acc, k| acc | 1 << (hash3(i, j, k) % 52)))
            .map(CardSet::from_bits)
            .filter(|hand| hand.count() == 7)
            .collect()
    })
}

/// Number of hands and fingerprint of their scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreDigest {
    /// Number of scored hands.
    pub hands: u64,
    /// Fingerprint of the scores in order.
    pub fingerprint: u64,
}

/// Checks that two backends compute the same scores as the scalar evaluator.
///
/// Hands are scored one batch at a time, the digest covers all batches in
/// order.
pub fn check_backends_agree<I>(
    reference: &dyn Backend,
    other: &dyn Backend,
    batches: I,
) -> Result<ScoreDigest, RegressionError>
where
    I: IntoIterator,
    I::Item: AsRef<[CardSet]>,
{
    let now = Instant::now();
    let mut fingerprint = Fingerprint::new();
    let mut count = 0;

    for batch in batches {
        let hands = batch.as_ref();
        let expected = reference.score_batch(hands);
        let got = other.score_batch(hands);

        if expected.len() != hands.len() || got.len() != hands.len() {
            return Err(RegressionError::BackendMismatch(
                reference.name(),
                other.name(),
                format!("{} hands, got {} and {}", hands.len(), expected.len(), got.len()),
            ));
        }

        for ((&hand, &e), &g) in hands.iter().zip(&expected).zip(&got) {
            if e != g || e != eval(hand) {
                return Err(RegressionError::BackendMismatch(
                    reference.name(),
                    other.name(),
                    format!("{hand}: {e:?} and {g:?}"),
                ));
            }
        }

        fingerprint.update_scores(&expected);
        count += hands.len() as u64;
    }

    info!(
        "Scored {count} hands with {} and {} in {:.3}s",
        reference.name(),
        other.name(),
        now.elapsed().as_secs_f64()
    );

    Ok(ScoreDigest {
        hands: count,
        fingerprint: fingerprint.digest(),
    })
}

/// Checks that two backends compute the same outcomes for a matchup.
pub fn check_tallies_agree(
    reference: &dyn Backend,
    other: &dyn Backend,
    alice: HandClass,
    bob: HandClass,
    catalog: &SubsetCatalog,
) -> Result<Outcomes, RegressionError> {
    let deals = Enumerator::deals(alice, bob);
    let expected = reference.reduce_deals(&deals, catalog);
    let got = other.reduce_deals(&deals, catalog);

    if expected != got {
        return Err(RegressionError::BackendMismatch(
            reference.name(),
            other.name(),
            format!("{alice} vs. {bob}: {expected:?} and {got:?}"),
        ));
    }

    Ok(expected)
}

/// Pseudo random matchups, the first one is a hand against itself.
pub fn sample_pairs(catalog: &HandCatalog, n: usize) -> Vec<(HandClass, HandClass)> {
    let hands = catalog.hands();
    let pick = |h: u64| hands[(h % hands.len() as u64) as usize];

    (0..n as u64)
        .map(|i| {
            let alice = pick(hash2(i, 0));
            let bob = if i == 0 { alice } else { pick(hash2(i, 1)) };
            (alice, bob)
        })
        .collect()
}

/// Ten pseudo random matchups.
pub fn some_pairs(catalog: &HandCatalog) -> Vec<(HandClass, HandClass)> {
    let hands = catalog.hands();
    let pick = |h: u64| hands[(hash(h) % hands.len() as u64) as usize];

    (0..10).map(|i| (pick(2 * i), pick(2 * i + 1))).collect()
}

/// All the matchups between two hands, including a hand against itself.
///
/// There are 169 * 170 / 2 = 14,365 matchups, for each hand in catalog order
/// the matchups against itself and all the hands before it.
pub fn all_pairs(catalog: &HandCatalog) -> Vec<(HandClass, HandClass)> {
    let hands = catalog.hands();
    hands
        .iter()
        .enumerate()
        .flat_map(|(i, &alice)| hands[..=i].iter().map(move |&bob| (alice, bob)))
        .collect()
}

/// Computes and checks matchups, calling `f` with each result.
///
/// Returns a fingerprint of all the outcomes.
pub fn check_matchups<F>(
    enumerator: &Enumerator<'_>,
    pairs: &[(HandClass, HandClass)],
    mut f: F,
) -> Result<u64, RegressionError>
where
    F: FnMut(HandClass, HandClass, &Outcomes),
{
    let mut fingerprint = Fingerprint::new();
    for &(alice, bob) in pairs {
        let outcomes = enumerator.compare_checked(alice, bob)?;
        fingerprint.update_outcomes(&outcomes);
        f(alice, bob, &outcomes);
    }

    Ok(fingerprint.digest())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BatchedBackend, CpuBackend};
    use ahash::HashSet;

    #[test]
    fn score_cases() {
        assert_eq!(check_score_cases(&CpuBackend::new(2)), Ok(47));
        assert_eq!(check_score_cases(&BatchedBackend::new(2, 16)), Ok(47));
    }

    #[test]
    fn score_cases_are_valid() {
        let unique = SCORE_CASES
            .iter()
            .map(|c| (c.alice, c.bob, c.shared))
            .collect::<HashSet<_>>();
        assert_eq!(unique.len(), SCORE_CASES.len());

        for case in &SCORE_CASES {
            let alice = case.alice.parse::<CardSet>().unwrap();
            let shared = case.shared.parse::<CardSet>().unwrap();
            assert_eq!(alice.count(), 2);
            assert_eq!(shared.count(), 5);
            assert_eq!(eval(alice | shared).rank(), case.alice_rank, "{case:?}");
        }
    }

    #[test]
    fn winner() {
        let low = Score::from_value(1).unwrap();
        let high = Score::from_value(2).unwrap();
        assert_eq!(Winner::of(high, low), Winner::Alice);
        assert_eq!(Winner::of(low, high), Winner::Bob);
        assert_eq!(Winner::of(low, low), Winner::Tie);
        assert_eq!(Winner::Tie.to_string(), "tie");
    }

    #[test]
    fn category_counts_total() {
        assert_eq!(CATEGORY_COUNTS.iter().sum::<u64>(), 133_784_560);
        assert_eq!(CATEGORY_COUNTS[HandRank::OnePair as usize], 58_627_800);
        assert_eq!(CATEGORY_COUNTS[HandRank::StraightFlush as usize], 41_584);
    }

    #[test]
    #[ignore = "evaluates all 7 cards hands"]
    fn category_histogram_all_hands() {
        assert_eq!(check_category_histogram(8), Ok(133_784_560));
    }

    #[test]
    fn random_hands_are_deterministic() {
        let rows = random_hand_rows(1).take(4).collect::<Vec<_>>();
        for row in &rows {
            assert!(row.len() > 600 && row.len() <= 1 << 10);
            assert!(row.iter().all(|h| h.count() == 7));
        }

        assert_ne!(rows[0], rows[1]);
        assert_eq!(rows[..2], random_hand_rows(1).take(2).collect::<Vec<_>>()[..]);

        let wide = random_hand_rows(3).next().unwrap();
        assert!(wide.len() > 3 * 600 && wide.len() <= 3 << 10);
        assert_eq!(random_hand_rows(2).size_hint(), (1 << 10, Some(1 << 10)));
    }

    #[test]
    fn backends_agree() {
        let hands = random_hand_rows(1).take(100).flatten().collect::<Vec<_>>();

        let cpu = CpuBackend::new(4);
        let batched = BatchedBackend::new(3, 256);
        let d1 = check_backends_agree(&cpu, &batched, [&hands]).unwrap();
        let d2 = check_backends_agree(&batched, &cpu, [&hands]).unwrap();
        assert_eq!(d1, d2);
        assert_eq!(d1.hands, hands.len() as u64);

        let d3 = check_backends_agree(&cpu, &batched, [&hands[1..]]).unwrap();
        assert_ne!(d1.fingerprint, d3.fingerprint);
    }

    #[test]
    fn backends_agree_by_rows() {
        let cpu = CpuBackend::new(2);
        let batched = BatchedBackend::new(2, 64);

        // Streaming rows digests the same scores as one flat batch.
        let rows = check_backends_agree(&cpu, &batched, random_hand_rows(1).take(50)).unwrap();
        let flat = random_hand_rows(1).take(50).flatten().collect::<Vec<_>>();
        let whole = check_backends_agree(&cpu, &batched, [flat]).unwrap();
        assert_eq!(rows, whole);

        let empty = check_backends_agree(&cpu, &batched, Vec::<Vec<CardSet>>::new()).unwrap();
        assert_eq!(empty.hands, 0);
    }

    #[test]
    fn matchup_pairs() {
        let catalog = HandCatalog::build();

        let sample = sample_pairs(&catalog, 11);
        assert_eq!(sample.len(), 11);
        assert_eq!(sample[0].0, sample[0].1);
        assert_eq!(sample, sample_pairs(&catalog, 11));

        let some = some_pairs(&catalog);
        assert_eq!(some.len(), 10);

        let all = all_pairs(&catalog);
        assert_eq!(all.len(), 169 * 170 / 2);
        assert_eq!(all[0], (catalog.hands()[0], catalog.hands()[0]));
        assert_eq!(all[1], (catalog.hands()[1], catalog.hands()[0]));
        assert_eq!(all[2], (catalog.hands()[1], catalog.hands()[1]));

        let unique = all.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    #[ignore = "runs full matchups"]
    fn sample_matchups() {
        let catalog = SubsetCatalog::build();
        let hands = HandCatalog::build();
        let cpu = CpuBackend::new(8);
        let batched = BatchedBackend::new(8, 256);
        let pairs = sample_pairs(&hands, 2);

        let mut results = vec![];
        let enumerator = Enumerator::new(&catalog, &cpu);
        let f1 = check_matchups(&enumerator, &pairs, |a, b, o| results.push((a, b, *o))).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].2.is_symmetric());

        let enumerator = Enumerator::new(&catalog, &batched);
        let f2 = check_matchups(&enumerator, &pairs, |_, _, _| {}).unwrap();
        assert_eq!(f1, f2);

        let (alice, bob) = pairs[1];
        let outcomes = check_tallies_agree(&cpu, &batched, alice, bob, &catalog).unwrap();
        assert_eq!(outcomes, results[1].2);
    }
}
