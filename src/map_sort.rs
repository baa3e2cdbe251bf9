//! `MapSort` is the reusable sorting engine. An engine is created empty, sized once with `init` and
//! can then sort any number of inputs that fit that capacity without allocating again.
//!
//! Each sort runs these phases, each parallel phase joining before the next one starts:
//!
//!  1. split `0..len` into one range per worker
//!  2. sample and sort `BUCKETS - 1` pivots (sequential)
//!  3. tag every element with its bucket and build per-worker histograms (parallel)
//!  4. fold the histograms into bucket bounds and write cursors (sequential)
//!  5. scatter elements into the scratch array, grouped by bucket (parallel)
//!  6. sort each bucket of the scratch array (parallel)
//!  7. move the scratch array back into the caller's slice (sequential)
//!
//! ## Characteristics
//!
//!  * out-of-place
//!  * multi-threaded
//!  * unstable
//!  * comparison based
//!
//! An engine is not reentrant, which `&mut self` already enforces. Separate engines share nothing
//! and may sort concurrently.

use crate::histogram::{combine_histograms, local_histograms, select_pivots};
use crate::interval_sort::sort_intervals;
use crate::ranges::compute_ranges;
use crate::sampler::IndexSampler;
use crate::scatter::scatter;
use crate::scratch_buffers::{assume_init_mut, ScratchBuffers};
use log::{debug, trace};
use nanorand::WyRand;
use rayon::current_num_threads;
use std::cmp::Ordering;
use std::mem::MaybeUninit;

pub struct MapSort<T, const BUCKETS: usize = 256, S = WyRand> {
    buffers: ScratchBuffers<T>,
    sampler: S,
}

impl<T, const BUCKETS: usize> MapSort<T, BUCKETS, WyRand> {
    pub fn new() -> Self {
        Self::with_sampler(WyRand::new())
    }

    /// An empty engine whose pivots are drawn from a `WyRand` seeded with `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_sampler(WyRand::new_seed(seed))
    }
}

impl<T, const BUCKETS: usize> Default for MapSort<T, BUCKETS, WyRand> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const BUCKETS: usize, S> MapSort<T, BUCKETS, S>
where
    S: IndexSampler,
{
    pub fn with_sampler(sampler: S) -> Self {
        // TODO: turn this into a compile-time check once inline const blocks are within MSRV
        assert_ne!(BUCKETS, 0, "MapSort must have at least 1 bucket");

        Self {
            buffers: ScratchBuffers::empty(BUCKETS),
            sampler,
        }
    }

    /// Drops any buffers currently held and allocates new ones for sorting up to `max_elements`
    /// elements with up to `max_workers` workers. `None` uses the size of the current rayon pool.
    ///
    /// Panics if `max_workers` is `Some(0)`.
    pub fn init(&mut self, max_elements: usize, max_workers: Option<usize>) {
        let max_workers = max_workers.unwrap_or_else(current_num_threads);
        assert!(
            max_workers >= 1,
            "max_workers must be at least 1, got {}",
            max_workers
        );

        debug!(
            "allocating map sort buffers: {} elements, {} workers, {} buckets",
            max_elements, max_workers, BUCKETS
        );

        self.buffers.reallocate(max_elements, max_workers);
    }

    #[inline]
    pub fn max_elements(&self) -> usize {
        self.buffers.max_elements()
    }

    #[inline]
    pub fn max_workers(&self) -> usize {
        self.buffers.max_workers()
    }

    #[inline]
    pub fn buckets(&self) -> usize {
        BUCKETS
    }

    pub fn sampler_mut(&mut self) -> &mut S {
        &mut self.sampler
    }
}

impl<T, const BUCKETS: usize, S> MapSort<T, BUCKETS, S>
where
    T: Clone + Send + Sync,
    S: IndexSampler,
{
    /// Sorts `data` in ascending order.
    ///
    /// ```
    /// use mapsort::MapSort;
    ///
    /// let mut engine: MapSort<i32> = MapSort::new();
    /// engine.init(5, Some(4));
    ///
    /// let mut data = [-1, 2, 0, -2, 1];
    /// engine.sort(&mut data, Some(4));
    ///
    /// assert_eq!(data, [-2, -1, 0, 1, 2]);
    /// ```
    ///
    /// Panics if `data` is longer than `max_elements`, or if the worker count is zero or above
    /// `max_workers`.
    pub fn sort(&mut self, data: &mut [T], workers: Option<usize>)
    where
        T: Ord,
    {
        self.sort_by(data, workers, T::cmp);
    }

    pub fn sort_by_key<K, F>(&mut self, data: &mut [T], workers: Option<usize>, key: F)
    where
        K: Ord,
        F: Fn(&T) -> K + Sync,
    {
        self.sort_by(data, workers, |a, b| key(a).cmp(&key(b)));
    }

    /// Sorts `data` with a comparator, which must be a strict weak order.
    pub fn sort_by<F>(&mut self, data: &mut [T], workers: Option<usize>, compare: F)
    where
        F: Fn(&T, &T) -> Ordering + Sync,
    {
        let len = data.len();
        let workers = workers.unwrap_or_else(current_num_threads);

        assert!(
            len <= self.max_elements(),
            "cannot sort {} elements, engine was initialised for at most {}",
            len,
            self.max_elements()
        );
        assert!(
            workers >= 1 && workers <= self.max_workers(),
            "worker count must be in 1..={}, got {}",
            self.max_workers(),
            workers
        );

        // By definition, this is already sorted
        if len <= 1 {
            return;
        }

        let buffers = &mut self.buffers;
        let starts = &mut buffers.range_starts[..workers];
        let ends = &mut buffers.range_ends[..workers];
        let histogram = &mut buffers.histogram[..(workers * BUCKETS)];
        let tags = &mut buffers.tags[..len];
        let scratch = &mut buffers.scratch[..len];
        let run_lens = &mut buffers.run_lens;

        trace_phase("compute_ranges", len, workers);
        compute_ranges(len, starts, ends);

        trace_phase("select_pivots", len, workers);
        select_pivots(
            data,
            &mut buffers.pivots,
            BUCKETS - 1,
            &mut self.sampler,
            &compare,
        );

        trace_phase("local_histograms", len, workers);
        local_histograms(
            data,
            &buffers.pivots,
            tags,
            histogram,
            starts,
            ends,
            run_lens,
            BUCKETS,
            &compare,
        );

        trace_phase("combine_histograms", len, workers);
        combine_histograms(histogram, &mut buffers.bounds, BUCKETS, len);

        trace_phase("scatter", len, workers);
        scatter(data, tags, scratch, histogram, starts, ends, run_lens, BUCKETS);

        // Safety: `scatter` wrote every slot of `scratch`.
        let sorted = unsafe { assume_init_mut(scratch) };
        trace_phase("sort_intervals", len, workers);
        sort_intervals(sorted, &buffers.bounds, run_lens, workers, &compare);

        trace_phase("copy_back", len, workers);
        copy_back(data, scratch);
    }
}

#[inline]
fn trace_phase(phase: &str, len: usize, workers: usize) {
    trace!("map sort {}: {} elements, {} workers", phase, len, workers);
}

/// Moves the sorted scratch contents over `dst`, leaving the scratch slots logically empty.
#[inline]
fn copy_back<T>(dst: &mut [T], scratch: &mut [MaybeUninit<T>]) {
    #[cfg(feature = "work_profiles")]
    println!("({}) COPY_BACK", dst.len());

    for (out, slot) in dst.iter_mut().zip(scratch.iter()) {
        // Safety: every slot was initialised by `scatter` and is read exactly once here. The
        // slot is not read again until a later sort has written it.
        *out = unsafe { slot.assume_init_read() };
    }
}

/// Sorts `data` with a throwaway engine sized for exactly this call. Reuse a `MapSort` instead
/// when sorting repeatedly.
pub fn map_sort<T>(data: &mut [T], workers: Option<usize>)
where
    T: Ord + Clone + Send + Sync,
{
    map_sort_by(data, workers, T::cmp);
}

pub fn map_sort_by<T, F>(data: &mut [T], workers: Option<usize>, compare: F)
where
    T: Clone + Send + Sync,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    let mut engine: MapSort<T> = MapSort::new();
    engine.init(data.len(), workers);
    engine.sort_by(data, workers, compare);
}

#[cfg(test)]
mod tests {
    use super::{map_sort, map_sort_by, MapSort};
    use crate::utils::test_utils::{
        sort_comparison_suite, validate_sort, NumericTest, SequenceSampler,
    };
    use block_pseudorand::block_rand;
    use nanorand::{Rng, WyRand};

    fn test_engine_sort<T>(shift: T)
    where
        T: NumericTest<T>,
    {
        let mut engine: MapSort<T> = MapSort::new();
        engine.init(1_000_000, Some(8));

        sort_comparison_suite(shift, |inputs| {
            if inputs.len() > engine.max_elements() {
                engine.init(inputs.len(), Some(8));
            }

            engine.sort(inputs, Some(8));
        });
    }

    #[test]
    pub fn test_u8() {
        test_engine_sort(0u8);
    }

    #[test]
    pub fn test_u16() {
        test_engine_sort(8u16);
    }

    #[test]
    pub fn test_u32() {
        test_engine_sort(16u32);
    }

    #[test]
    pub fn test_u64() {
        test_engine_sort(32u64);
    }

    #[test]
    pub fn test_u128() {
        test_engine_sort(64u128);
    }

    #[test]
    pub fn test_usize() {
        test_engine_sort(32usize);
    }

    #[test]
    pub fn test_every_worker_count() {
        let inputs: Vec<u32> = block_rand(20_000);
        let mut engine: MapSort<u32> = MapSort::new();
        engine.init(inputs.len(), Some(17));

        for workers in 1..=17 {
            validate_sort(inputs.clone(), |data| engine.sort(data, Some(workers)));
        }
    }

    #[test]
    pub fn test_small_bucket_counts() {
        let inputs: Vec<u64> = block_rand(5_000);

        let mut one: MapSort<u64, 1> = MapSort::new();
        one.init(inputs.len(), Some(3));
        validate_sort(inputs.clone(), |data| one.sort(data, Some(3)));

        let mut two: MapSort<u64, 2> = MapSort::new();
        two.init(inputs.len(), Some(3));
        validate_sort(inputs.clone(), |data| two.sort(data, Some(3)));

        let mut many: MapSort<u64, 4096> = MapSort::new();
        many.init(inputs.len(), Some(3));
        validate_sort(inputs, |data| many.sort(data, Some(3)));
    }

    #[test]
    pub fn test_reuse_with_varying_sizes() {
        let mut rng = WyRand::new_seed(0xDEAD_BEEF);
        let mut engine: MapSort<i64> = MapSort::with_seed(42);
        engine.init(10_000, Some(20));

        for _ in 0..100 {
            let len = rng.generate_range(0..=10_000usize);
            let workers = rng.generate_range(1..=20usize);
            let inputs: Vec<i64> = (0..len).map(|_| rng.generate::<i64>()).collect();

            validate_sort(inputs, |data| engine.sort(data, Some(workers)));
        }
    }

    #[test]
    pub fn test_reinit_with_varying_capacity() {
        let mut rng = WyRand::new_seed(7);
        let mut engine: MapSort<u32> = MapSort::new();

        for _ in 0..30 {
            let max_elements = rng.generate_range(1..=1_000usize);
            let max_workers = rng.generate_range(1..=20usize);
            let inputs: Vec<u32> = (0..max_elements).map(|_| rng.generate::<u32>()).collect();

            engine.init(max_elements, Some(max_workers));
            assert_eq!(engine.max_elements(), max_elements);
            assert_eq!(engine.max_workers(), max_workers);

            validate_sort(inputs, |data| engine.sort(data, Some(max_workers)));
        }
    }

    #[test]
    pub fn test_strings() {
        let mut data: Vec<String> = ["hoge", "piyo", "fuga", "foo", "bar"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        map_sort(&mut data, None);

        assert_eq!(data, vec!["bar", "foo", "fuga", "hoge", "piyo"]);
    }

    #[test]
    pub fn test_random_strings() {
        let mut rng = WyRand::new_seed(3);
        let mut engine: MapSort<String> = MapSort::new();
        engine.init(3_000, Some(6));

        for _ in 0..10 {
            let len = rng.generate_range(1..=3_000usize);
            let mut data: Vec<String> = (0..len)
                .map(|_| {
                    let mut s = String::new();
                    loop {
                        s.push((b'a' + rng.generate_range(0..26u8)) as char);
                        if rng.generate_range(0..10u8) == 0 {
                            break s;
                        }
                    }
                })
                .collect();
            let mut expected = data.clone();
            expected.sort_unstable();

            engine.sort(&mut data, Some(6));

            assert_eq!(data, expected);
        }
    }

    #[test]
    pub fn test_pairs() {
        let mut rng = WyRand::new_seed(11);
        let mut data: Vec<(i32, u32)> = (0..50_000)
            .map(|_| (rng.generate_range(0..10i32), rng.generate::<u32>()))
            .collect();
        let mut expected = data.clone();
        expected.sort_unstable();

        map_sort(&mut data, Some(5));

        assert_eq!(data, expected);
    }

    #[test]
    pub fn test_floats_with_total_cmp() {
        let mut rng = WyRand::new_seed(19);
        let mut data: Vec<f64> = (0..10_000)
            .map(|_| f64::from_bits(rng.generate::<u64>()))
            .filter(|f| !f.is_nan())
            .collect();
        let mut expected = data.clone();
        expected.sort_unstable_by(|a, b| a.total_cmp(b));

        map_sort_by(&mut data, Some(4), |a, b| a.total_cmp(b));

        assert!(data.iter().zip(&expected).all(|(a, b)| a.to_bits() == b.to_bits()));
    }

    #[test]
    pub fn test_sort_by_key_descending() {
        let mut data: Vec<u32> = block_rand(10_000);
        let mut expected = data.clone();
        expected.sort_unstable_by(|a, b| b.cmp(a));

        let mut engine: MapSort<u32> = MapSort::new();
        engine.init(data.len(), Some(4));
        engine.sort_by_key(&mut data, Some(4), |v| std::cmp::Reverse(*v));

        assert_eq!(data, expected);
    }

    #[test]
    pub fn test_all_equal() {
        let mut data = vec![7u16; 10_000];

        map_sort(&mut data, Some(8));

        assert!(data.iter().all(|v| *v == 7));
    }

    #[test]
    pub fn test_already_sorted_is_unchanged() {
        let sorted: Vec<u32> = (0..50_000).collect();
        let mut data = sorted.clone();

        map_sort(&mut data, Some(4));

        assert_eq!(data, sorted);
    }

    #[test]
    pub fn test_seeded_sampler_reproducible() {
        let inputs: Vec<u64> = block_rand(30_000);

        let mut a: MapSort<u64, 16> = MapSort::with_seed(5);
        let mut b: MapSort<u64, 16> = MapSort::with_seed(5);
        a.init(inputs.len(), Some(4));
        b.init(inputs.len(), Some(4));

        let mut out_a = inputs.clone();
        let mut out_b = inputs;
        a.sort(&mut out_a, Some(4));
        b.sort(&mut out_b, Some(4));

        assert_eq!(out_a, out_b);
        assert_eq!(a.buffers.pivots, b.buffers.pivots);
        assert_eq!(a.buffers.bounds, b.buffers.bounds);
    }

    #[test]
    pub fn test_injected_sampler_picks_pivots() {
        let mut data: Vec<u32> = vec![40, 10, 30, 20, 0, 50];
        // Pivots become data[3] = 20 and data[2] = 30
        let mut engine: MapSort<u32, 3, SequenceSampler> =
            MapSort::with_sampler(SequenceSampler::new(vec![3, 2]));
        engine.init(data.len(), Some(2));

        engine.sort(&mut data, Some(2));

        assert_eq!(data, vec![0, 10, 20, 30, 40, 50]);
        assert_eq!(engine.buffers.pivots, vec![20, 30]);
        assert_eq!(engine.buffers.bounds, vec![0, 3, 4, 6]);
    }

    #[test]
    pub fn test_sampler_mut_swaps_sampler_between_sorts() {
        let inputs: Vec<u32> = vec![40, 10, 30, 20, 0, 50];
        let mut engine: MapSort<u32, 3, SequenceSampler> =
            MapSort::with_sampler(SequenceSampler::new(vec![3, 2]));
        engine.init(inputs.len(), Some(2));

        let mut data = inputs.clone();
        engine.sort(&mut data, Some(2));
        assert_eq!(engine.buffers.pivots, vec![20, 30]);

        // Pivots become inputs[1] = 10 and inputs[5] = 50
        *engine.sampler_mut() = SequenceSampler::new(vec![1, 5]);
        let mut data = inputs;
        engine.sort(&mut data, Some(2));

        assert_eq!(data, vec![0, 10, 20, 30, 40, 50]);
        assert_eq!(engine.buffers.pivots, vec![10, 50]);
        assert_eq!(engine.buffers.bounds, vec![0, 2, 6, 6]);
    }

    #[test]
    pub fn test_seeding_through_sampler_mut() {
        let inputs: Vec<(u8, u32)> = block_rand::<u32>(20_000)
            .into_iter()
            .map(|v| ((v & 0x7) as u8, v))
            .collect();
        let by_key = |a: &(u8, u32), b: &(u8, u32)| a.0.cmp(&b.0);

        let mut fresh: MapSort<(u8, u32), 16> = MapSort::with_seed(5);
        fresh.init(inputs.len(), Some(3));
        let mut expected = inputs.clone();
        fresh.sort_by(&mut expected, Some(3), by_key);

        let mut reseeded: MapSort<(u8, u32), 16> = MapSort::with_seed(1);
        reseeded.init(inputs.len(), Some(3));
        let mut warmup = inputs.clone();
        reseeded.sort_by(&mut warmup, Some(3), by_key);
        *reseeded.sampler_mut() = WyRand::new_seed(5);

        let mut data = inputs;
        reseeded.sort_by(&mut data, Some(3), by_key);

        assert_eq!(data, expected);
    }

    #[test]
    pub fn test_empty_and_single() {
        let mut engine: MapSort<u32> = MapSort::new();
        engine.init(4, Some(2));

        let mut empty: Vec<u32> = vec![];
        engine.sort(&mut empty, Some(2));
        assert!(empty.is_empty());

        let mut single = vec![9u32];
        engine.sort(&mut single, Some(1));
        assert_eq!(single, vec![9]);

        map_sort::<u32>(&mut [], None);
    }

    #[test]
    pub fn test_default_workers_use_rayon_pool() {
        let mut engine: MapSort<u8> = MapSort::default();
        engine.init(10, None);

        assert_eq!(engine.max_workers(), rayon::current_num_threads());
        assert_eq!(engine.buckets(), 256);
    }

    #[test]
    #[should_panic(expected = "cannot sort 11 elements")]
    pub fn test_over_capacity_panics() {
        let mut engine: MapSort<u8> = MapSort::new();
        engine.init(10, Some(1));

        engine.sort(&mut [0u8; 11], Some(1));
    }

    #[test]
    #[should_panic(expected = "worker count must be in 1..=4")]
    pub fn test_too_many_workers_panics() {
        let mut engine: MapSort<u8> = MapSort::new();
        engine.init(10, Some(4));

        engine.sort(&mut [3, 2, 1], Some(5));
    }

    #[test]
    #[should_panic(expected = "worker count must be in 1..=4")]
    pub fn test_zero_workers_panics() {
        let mut engine: MapSort<u8> = MapSort::new();
        engine.init(10, Some(4));

        engine.sort(&mut [3, 2, 1], Some(0));
    }

    #[test]
    #[should_panic(expected = "max_workers must be at least 1")]
    pub fn test_init_zero_workers_panics() {
        let mut engine: MapSort<u8> = MapSort::new();
        engine.init(10, Some(0));
    }

    #[test]
    #[should_panic(expected = "at least 1 bucket")]
    pub fn test_zero_buckets_panics() {
        let _engine: MapSort<u8, 0> = MapSort::new();
    }
}
