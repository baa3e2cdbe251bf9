//! `IndexSampler` is the source of randomness used to pick pivots. Each `MapSort` engine owns one,
//! so two engines never share generator state and a seeded sampler makes a sort reproducible.
//!
//! The default is `nanorand::WyRand`, which is fast and good enough for picking sample indices.
//! Anything that can hand out uniform indices can be plugged in instead, including fixed sequences
//! for tests.

use nanorand::{Rng, WyRand};

pub trait IndexSampler: Send {
    /// Returns an index drawn uniformly from `0..len`. `len` is never zero.
    fn sample_index(&mut self, len: usize) -> usize;
}

impl IndexSampler for WyRand {
    #[inline]
    fn sample_index(&mut self, len: usize) -> usize {
        self.generate_range(0..len)
    }
}

impl<S> IndexSampler for &mut S
where
    S: IndexSampler + ?Sized,
{
    #[inline]
    fn sample_index(&mut self, len: usize) -> usize {
        (**self).sample_index(len)
    }
}
