use crate::sampler::IndexSampler;
use block_pseudorand::block_rand;
use rayon::prelude::*;
use std::fmt::Debug;
use std::ops::{Shl, ShlAssign, Shr, ShrAssign};

pub trait NumericTest<T>:
    Sized
    + Copy
    + Debug
    + PartialEq
    + Ord
    + Send
    + Sync
    + Shl<Output = T>
    + Shr<Output = T>
    + ShrAssign
    + ShlAssign
{
}

impl<T> NumericTest<T> for T where
    T: Sized
        + Copy
        + Debug
        + PartialEq
        + Ord
        + Send
        + Sync
        + Shl<Output = T>
        + Shr<Output = T>
        + ShrAssign
        + ShlAssign
{
}

/// Hands out a fixed sequence of indices, wrapping around at the end. Each index is reduced
/// modulo the requested length so it is always in bounds.
pub struct SequenceSampler {
    indices: Vec<usize>,
    next: usize,
}

impl SequenceSampler {
    pub fn new(indices: Vec<usize>) -> Self {
        assert!(!indices.is_empty(), "SequenceSampler needs at least one index");

        Self { indices, next: 0 }
    }
}

impl IndexSampler for SequenceSampler {
    fn sample_index(&mut self, len: usize) -> usize {
        let i = self.indices[self.next] % len;
        self.next = (self.next + 1) % self.indices.len();

        i
    }
}

pub fn gen_inputs<T>(n: usize, shift: T) -> Vec<T>
where
    T: NumericTest<T>,
{
    let mut inputs: Vec<T> = block_rand(n);

    inputs[0..(n / 2)].par_iter_mut().for_each(|v| *v >>= shift);
    inputs[(n / 2)..n].par_iter_mut().for_each(|v| *v <<= shift);

    inputs
}

pub fn gen_input_set<T>(shift: T) -> Vec<Vec<T>>
where
    T: NumericTest<T>,
{
    let n = 2_000_000;
    let half = n / 2;
    let inputs = gen_inputs(n, shift);

    // Middle values are used for the case where shift is provided
    let mut out = vec![
        vec![],
        inputs[..1].to_vec(),
        inputs[..2].to_vec(),
        inputs[(half - 5)..(half + 5)].to_vec(),
        inputs[(half - 50)..(half + 50)].to_vec(),
        inputs[(half - 2_500)..(half + 2_500)].to_vec(),
        inputs[(half - 5_000)..(half + 5_000)].to_vec(),
        inputs[(half - 25_000)..(half + 25_000)].to_vec(),
        inputs[(half - 50_000)..(half + 50_000)].to_vec(),
        inputs[(half - 250_000)..(half + 250_000)].to_vec(),
        inputs[(half - 500_000)..(half + 500_000)].to_vec(),
        inputs,
    ];

    out.reverse();

    out
}

/// Runs `sort_fn` over `inputs` and checks the result against `sort_unstable`, which catches
/// both ordering mistakes and lost or duplicated elements.
pub fn validate_sort<T, F>(mut inputs: Vec<T>, mut sort_fn: F)
where
    T: Ord + Clone + Debug,
    F: FnMut(&mut [T]),
{
    let mut expected = inputs.clone();
    expected.sort_unstable();

    sort_fn(&mut inputs);

    assert_eq!(inputs, expected);
}

pub fn sort_comparison_suite<T, F>(shift: T, mut sort_fn: F)
where
    F: FnMut(&mut [T]),
    T: NumericTest<T>,
{
    let input_set = gen_input_set(shift);

    for s in input_set {
        validate_sort(s, &mut sort_fn);
    }
}

/// Patterns that tend to break sample sorts: few distinct values, long runs of one value and
/// presorted data.
pub fn validate_u32_patterns<F>(mut sort_fn: F)
where
    F: FnMut(&mut [u32]),
{
    let input_sets: Vec<Vec<u32>> = vec![
        vec![u32::MAX; 128],
        block_rand(128),
        block_rand(128_000),
        block_rand(4),
    ];

    for inputs in input_sets.iter() {
        validate_sort(inputs.clone(), &mut sort_fn);

        // Few distinct values
        validate_sort(inputs.iter().map(|v| *v & 0b11).collect(), &mut sort_fn);
        validate_sort(
            inputs.iter().map(|v| *v & 0x8000_0000).collect(),
            &mut sort_fn,
        );

        // Ascending, descending and sawtooth
        let mut ascending = inputs.clone();
        ascending.sort_unstable();
        validate_sort(ascending.clone(), &mut sort_fn);
        validate_sort(ascending.iter().rev().copied().collect(), &mut sort_fn);
        validate_sort(
            (0..inputs.len() as u32).map(|v| v % 17).collect(),
            &mut sort_fn,
        );

        // One large value in a sea of zeros
        let mut spike = vec![0u32; inputs.len()];
        if let Some(mid) = spike.get_mut(inputs.len() / 2) {
            *mid = u32::MAX;
        }
        validate_sort(spike, &mut sort_fn);
    }
}
