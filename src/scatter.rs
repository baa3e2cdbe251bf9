//! `scatter` moves every element of the source into its bucket's span of the scratch array.
//!
//! The write cursors produced by `combine_histograms` give each `(worker, bucket)` pair its own run
//! of the scratch array. The scratch array is cut into those runs up front (bucket-major, then
//! worker order, which is the order cursors were handed out in) and each worker receives just its
//! own runs. Workers therefore hold disjoint `&mut` slices and no locks or atomics are involved.
//!
//! This is the same tile scheme the multi-threaded LSB pass uses to stay stable: a worker walks its
//! source range front to back, so inside a bucket worker 0's elements come first, then worker 1's,
//! each in their original order.

use crate::utils::{carve_mut, deal_round_robin};
use rayon::prelude::*;
use std::mem::{self, MaybeUninit};

/// Refills `spans` with the lengths of the scratch runs owned by each `(worker, bucket)` pair, in
/// cursor order.
#[inline]
pub fn cursor_spans(cursors: &[usize], buckets: usize, len: usize, spans: &mut Vec<usize>) {
    let workers = cursors.len() / buckets;
    spans.clear();

    let mut prev = 0;
    for b in 0..buckets {
        for w in 0..workers {
            let cursor = cursors[w * buckets + b];
            if b != 0 || w != 0 {
                spans.push(cursor - prev);
            }
            prev = cursor;
        }
    }

    if !cursors.is_empty() {
        spans.push(len - prev);
    }
}

/// Clones each element of `src` into `scratch` at its worker's cursor for the element's bucket.
/// Every slot of `scratch` is written exactly once. `spans` is working space for the run lengths.
#[allow(clippy::too_many_arguments)]
pub fn scatter<T>(
    src: &[T],
    tags: &[usize],
    scratch: &mut [MaybeUninit<T>],
    cursors: &[usize],
    starts: &[usize],
    ends: &[usize],
    spans: &mut Vec<usize>,
    buckets: usize,
) where
    T: Clone + Send + Sync,
{
    #[cfg(feature = "work_profiles")]
    println!("({}) SCATTER", src.len());

    let workers = starts.len();
    debug_assert_eq!(cursors.len(), workers * buckets);
    debug_assert_eq!(scratch.len(), src.len());

    cursor_spans(cursors, buckets, src.len(), spans);
    let runs = carve_mut(scratch, spans);

    // Run `i` belongs to worker `i % workers` as cursors were assigned worker-minor.
    let lanes = deal_round_robin(runs, workers);

    lanes
        .into_par_iter()
        .zip(starts.par_iter().zip(ends.par_iter()))
        .for_each(|(mut runs, (&start, &end))| {
            for (value, &k) in src[start..end].iter().zip(&tags[start..end]) {
                // Each run is consumed from the front, so its head is the bucket's cursor.
                let run = mem::take(&mut runs[k]);
                let (slot, rest) = run.split_at_mut(1);
                slot[0].write(value.clone());
                runs[k] = rest;
            }
        });
}
