//! Sorts every bucket span of the scratch array independently.
//!
//! Buckets are dealt to workers round-robin (bucket `i` to worker `i % workers`). With many more
//! buckets than workers this evens out skewed bucket sizes without any dynamic scheduling.
//! The per-bucket sort is `sort_unstable_by`, so equal elements may be reordered.

use crate::utils::{carve_mut, deal_round_robin};
use rayon::prelude::*;
use std::cmp::Ordering;

/// Sorts `sorted[bounds[i]..bounds[i + 1]]` for every bucket `i`. `spans` is working space for
/// the bucket lengths.
pub fn sort_intervals<T, F>(
    sorted: &mut [T],
    bounds: &[usize],
    spans: &mut Vec<usize>,
    workers: usize,
    compare: &F,
) where
    T: Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    #[cfg(feature = "work_profiles")]
    println!("({}) SORT_INTERVALS", sorted.len());

    spans.clear();
    spans.extend(bounds.windows(2).map(|w| w[1] - w[0]));
    let intervals = carve_mut(sorted, spans);

    deal_round_robin(intervals, workers)
        .into_par_iter()
        .for_each(|lane| {
            for interval in lane {
                if interval.len() > 1 {
                    interval.sort_unstable_by(compare);
                }
            }
        });
}
