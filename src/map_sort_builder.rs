use crate::map_sort::MapSort;
use nanorand::WyRand;
use std::cmp::Ordering;

/// One-shot configuration of a sort over a borrowed slice. Created through
/// `MapSortExt::map_sort_builder`.
pub struct MapSortBuilder<'a, T> {
    data: &'a mut [T],
    workers: Option<usize>,
    seed: Option<u64>,
}

impl<'a, T> MapSortBuilder<'a, T>
where
    T: Clone + Send + Sync,
{
    pub(crate) fn new(data: &'a mut [T]) -> Self {
        Self {
            data,
            workers: None,
            seed: None,
        }
    }

    /// Splits each phase across exactly `workers` workers.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);

        self
    }

    /// Uses one worker per thread of the current rayon pool. This is the default.
    pub fn with_default_workers(mut self) -> Self {
        self.workers = None;

        self
    }

    /// Seeds the pivot sampler, making the sort fully reproducible for a given input and worker
    /// count.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);

        self
    }

    pub fn sort(self)
    where
        T: Ord,
    {
        self.sort_by(T::cmp);
    }

    pub fn sort_by<F>(self, compare: F)
    where
        F: Fn(&T, &T) -> Ordering + Sync,
    {
        // By definition, this is already sorted
        if self.data.len() <= 1 {
            return;
        }

        let sampler = match self.seed {
            Some(seed) => WyRand::new_seed(seed),
            None => WyRand::new(),
        };

        let mut engine: MapSort<T> = MapSort::with_sampler(sampler);
        engine.init(self.data.len(), self.workers);
        engine.sort_by(self.data, self.workers, compare);
    }
}
