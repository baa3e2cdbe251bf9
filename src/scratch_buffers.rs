//! `ScratchBuffers` owns every piece of working memory a `MapSort` engine needs. Buffers are sized
//! once for a maximum element count and a maximum worker count and then reused by every sort, so
//! a sort call only resets cursors and never allocates anything proportional to the input.
//!
//! The element scratch array is kept as `MaybeUninit<T>` so that element types without a cheap
//! default value (e.g. `String`) can be sorted. Slots only hold live values between the scatter
//! phase and the copy-back at the end of a sort.

use std::mem::MaybeUninit;

pub struct ScratchBuffers<T> {
    max_elements: usize,
    max_workers: usize,
    buckets: usize,

    /// Destination of the scatter phase, `max_elements` slots.
    pub(crate) scratch: Vec<MaybeUninit<T>>,
    /// Bucket id of every source element, `max_elements` entries.
    pub(crate) tags: Vec<usize>,
    /// Sorted pivot values, up to `buckets - 1` entries.
    pub(crate) pivots: Vec<T>,
    /// Global bucket boundaries, `buckets + 1` entries.
    pub(crate) bounds: Vec<usize>,
    /// `max_workers` rows of `buckets` counters. Holds local counts after the histogram phase
    /// and write cursors after they are combined.
    pub(crate) histogram: Vec<usize>,
    /// First index owned by each worker.
    pub(crate) range_starts: Vec<usize>,
    /// One past the last index owned by each worker.
    pub(crate) range_ends: Vec<usize>,
    /// Chunk lengths used to carve tags, scratch runs and bucket spans. Refilled by each phase
    /// that needs it, never grown past `max_workers * buckets`.
    pub(crate) run_lens: Vec<usize>,
}

impl<T> ScratchBuffers<T> {
    /// Buffers with no capacity at all. Any non-empty sort against these will fail its
    /// precondition checks.
    pub fn empty(buckets: usize) -> Self {
        Self {
            max_elements: 0,
            max_workers: 0,
            buckets,
            scratch: Vec::new(),
            tags: Vec::new(),
            pivots: Vec::new(),
            bounds: Vec::new(),
            histogram: Vec::new(),
            range_starts: Vec::new(),
            range_ends: Vec::new(),
            run_lens: Vec::new(),
        }
    }

    pub fn with_capacity(max_elements: usize, max_workers: usize, buckets: usize) -> Self {
        assert!(max_workers >= 1, "max_workers must be at least 1, got {}", max_workers);
        assert_ne!(buckets, 0, "MapSort must have at least 1 bucket");

        let mut scratch = Vec::with_capacity(max_elements);
        scratch.resize_with(max_elements, MaybeUninit::uninit);

        Self {
            max_elements,
            max_workers,
            buckets,
            scratch,
            tags: vec![0usize; max_elements],
            pivots: Vec::with_capacity(buckets - 1),
            bounds: vec![0usize; buckets + 1],
            histogram: vec![0usize; max_workers * buckets],
            range_starts: vec![0usize; max_workers],
            range_ends: vec![0usize; max_workers],
            run_lens: Vec::with_capacity(max_workers * buckets + 1),
        }
    }

    /// Releases everything currently held and allocates fresh buffers for the new capacity.
    pub fn reallocate(&mut self, max_elements: usize, max_workers: usize) {
        // Drop the old allocation before making the new one so peak memory stays at one set.
        *self = Self::empty(self.buckets);
        *self = Self::with_capacity(max_elements, max_workers, self.buckets);
    }

    #[inline]
    pub fn max_elements(&self) -> usize {
        self.max_elements
    }

    #[inline]
    pub fn max_workers(&self) -> usize {
        self.max_workers
    }
}

/// Reinterprets a fully written run of scratch slots as initialised values.
///
/// # Safety
///
/// Every slot in `slots` must have been written since the last time its value was moved out.
#[inline]
pub(crate) unsafe fn assume_init_mut<T>(slots: &mut [MaybeUninit<T>]) -> &mut [T] {
    // Safety: `MaybeUninit<T>` has the same layout as `T` and the caller guarantees every slot
    // is initialised.
    &mut *(slots as *mut [MaybeUninit<T>] as *mut [T])
}
