//! Pivot sampling and bucket histograms.
//!
//! `BUCKETS - 1` pivots are drawn at random (with replacement) from the input and sorted. An
//! element's bucket is the number of pivots that compare strictly less than it, found by binary
//! search. Each worker tags the elements of its own range with their bucket and counts them into its
//! own histogram row, so this phase needs no synchronisation.
//!
//! The rows are then folded sequentially into global bucket boundaries and per-worker write
//! cursors. Cursors are handed out bucket by bucket and, inside a bucket, in worker order, so every
//! `(worker, bucket)` pair owns a disjoint run of the bucket's final span and elements of a bucket
//! keep their original relative order after scattering.

use crate::ranges::range_lens;
use crate::sampler::IndexSampler;
use crate::utils::carve_mut;
use rayon::prelude::*;
use std::cmp::Ordering;

pub fn select_pivots<T, S, F>(
    src: &[T],
    pivots: &mut Vec<T>,
    count: usize,
    sampler: &mut S,
    compare: &F,
) where
    T: Clone,
    S: IndexSampler + ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    debug_assert!(!src.is_empty());

    #[cfg(feature = "work_profiles")]
    println!("({}) SELECT_PIVOTS", src.len());

    pivots.clear();
    for _ in 0..count {
        let i = sampler.sample_index(src.len());
        pivots.push(src[i].clone());
    }

    pivots.sort_unstable_by(compare);
}

#[inline]
pub fn find_bucket<T, F>(pivots: &[T], value: &T, compare: &F) -> usize
where
    F: Fn(&T, &T) -> Ordering,
{
    pivots.partition_point(|p| compare(p, value) == Ordering::Less)
}

/// Fills `tags` with the bucket of each element of `src` and `histogram` with one row of
/// per-bucket counts per worker. `starts` and `ends` hold the worker ranges and `lens` is
/// refilled with their lengths.
#[allow(clippy::too_many_arguments)]
pub fn local_histograms<T, F>(
    src: &[T],
    pivots: &[T],
    tags: &mut [usize],
    histogram: &mut [usize],
    starts: &[usize],
    ends: &[usize],
    lens: &mut Vec<usize>,
    buckets: usize,
    compare: &F,
) where
    T: Sync,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    #[cfg(feature = "work_profiles")]
    println!("({}) LOCAL_HISTOGRAMS", src.len());

    let workers = starts.len();
    debug_assert_eq!(tags.len(), src.len());
    debug_assert_eq!(histogram.len(), workers * buckets);

    range_lens(starts, ends, lens);
    let tag_chunks = carve_mut(tags, lens);

    histogram
        .par_chunks_mut(buckets)
        .zip(tag_chunks.into_par_iter())
        .zip(starts.par_iter().zip(ends.par_iter()))
        .for_each(|((row, tags), (&start, &end))| {
            row.fill(0);

            for (tag, value) in tags.iter_mut().zip(&src[start..end]) {
                let k = find_bucket(pivots, value, compare);
                *tag = k;
                row[k] += 1;
            }
        });
}

/// Turns the per-worker counts in `histogram` into write cursors in place and fills `bounds` with
/// the first index of every bucket, followed by `len`.
pub fn combine_histograms(histogram: &mut [usize], bounds: &mut [usize], buckets: usize, len: usize) {
    #[cfg(feature = "work_profiles")]
    println!("({}) COMBINE_HISTOGRAMS", len);

    let workers = histogram.len() / buckets;
    debug_assert_eq!(bounds.len(), buckets + 1);

    let mut running_total = 0;
    for b in 0..buckets {
        bounds[b] = running_total;

        for w in 0..workers {
            let cell = &mut histogram[w * buckets + b];
            let count = *cell;
            *cell = running_total;
            running_total += count;
        }
    }

    debug_assert_eq!(running_total, len);
    bounds[buckets] = len;
}
