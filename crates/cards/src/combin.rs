// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Combinations of k elements out of n.
//!
//! Combinations are visited in colexicographic order, that is sorted by the
//! largest element, then by the second largest, and so on. The same order
//! results from nested loops where each inner index runs below the outer one.

/// Largest supported set size.
pub const MAX_N: usize = 52;

/// Largest supported subset size.
pub const MAX_K: usize = 7;

/// Pascal's triangle truncated to k <= MAX_K, indexed as `[n][k]`.
const BINOMIALS: [[u32; MAX_K + 1]; MAX_N + 1] = {
    let mut t = [[0u32; MAX_K + 1]; MAX_N + 1];
    t[0][0] = 1;

    let mut n = 1;
    while n <= MAX_N {
        t[n][0] = 1;

        let mut k = 1;
        while k <= MAX_K {
            t[n][k] = t[n - 1][k - 1] + t[n - 1][k];
            k += 1;
        }

        n += 1;
    }

    t
};

/// Returns the binomial coefficient for n choose k, zero when k > n.
///
/// Panics if n > 52 or k > 7.
#[inline]
pub fn nck(n: usize, k: usize) -> usize {
    assert!(n <= MAX_N, "n={n} must be 0 <= n <= {MAX_N}");
    assert!(k <= MAX_K, "k={k} must be 0 <= k <= {MAX_K}");
    BINOMIALS[n][k] as usize
}

/// Returns the k-subset at position `rank` in colex order.
///
/// A subset `c0 < c1 < ... < ck-1` has rank `sum nck(ci, i + 1)`, so the
/// elements are recovered greedily from the largest down. Only the first k
/// entries of the returned array are set, in increasing order.
pub fn unrank(mut rank: usize, k: usize) -> [usize; MAX_K] {
    assert!(k <= MAX_K);

    let mut out = [0; MAX_K];
    for i in (0..k).rev() {
        // Largest c with nck(c, i + 1) <= rank, nck(i, i + 1) is zero.
        let mut c = i;
        while c < MAX_N && nck(c + 1, i + 1) <= rank {
            c += 1;
        }

        out[i] = c;
        rank -= nck(c, i + 1);
    }

    out
}

/// Calls the closure for `count` k-subsets of 0..n starting from the one at
/// position `first`.
///
/// The closure receives the k indices in increasing order, iteration stops
/// early after the last k-subset.
pub fn for_each_ksubset<F>(n: usize, k: usize, first: usize, count: usize, mut f: F)
where
    F: FnMut(&[usize]),
{
    assert!(1 <= k && k <= n && k <= MAX_K, "1 <= k <= min(n, {MAX_K})");

    // The slot after the last element holds n so the top element can move
    // up to n - 1.
    let mut c = [0usize; MAX_K + 1];
    c[..k].copy_from_slice(&unrank(first, k)[..k]);
    c[k] = n;

    for _ in 0..count {
        f(&c[..k]);

        // Successor: bump the lowest element with room above it and reset
        // the ones below to their smallest values.
        let Some(j) = (0..k).find(|&j| c[j] + 1 < c[j + 1]) else {
            break;
        };

        c[j] += 1;
        for (i, x) in c[..j].iter_mut().enumerate() {
            *x = i;
        }
    }
}
