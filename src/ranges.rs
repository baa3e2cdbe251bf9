//! Splits `0..len` into one contiguous range per worker.
//!
//! Each worker takes `remaining / remaining_workers` elements, so range sizes never differ by more
//! than one and the ranges tile the index space exactly, whatever `len % workers` is.

#[inline]
pub fn compute_ranges(len: usize, starts: &mut [usize], ends: &mut [usize]) {
    debug_assert_eq!(starts.len(), ends.len());
    let workers = starts.len();
    if workers == 0 {
        return;
    }

    starts[0] = 0;
    for i in 0..(workers - 1) {
        let take = (len - starts[i]) / (workers - i);
        ends[i] = starts[i] + take;
        starts[i + 1] = ends[i];
    }

    ends[workers - 1] = len;
}

/// Refills `lens` with the lengths of the ranges computed by `compute_ranges`, in worker order.
#[inline]
pub fn range_lens(starts: &[usize], ends: &[usize], lens: &mut Vec<usize>) {
    lens.clear();
    lens.extend(starts.iter().zip(ends).map(|(s, e)| e - s));
}
