use arbitrary_chunks::ArbitraryChunks;

/// Splits `slice` into consecutive mutable chunks with the given lengths. `lens` must sum to
/// `slice.len()`. The result always holds exactly `lens.len()` chunks, trailing zero-length
/// chunks included.
#[inline]
pub fn carve_mut<'a, T>(slice: &'a mut [T], lens: &[usize]) -> Vec<&'a mut [T]> {
    debug_assert_eq!(lens.iter().sum::<usize>(), slice.len());

    let mut chunks: Vec<&'a mut [T]> = Vec::with_capacity(lens.len());
    chunks.extend(slice.arbitrary_chunks_mut(lens));
    chunks.resize_with(lens.len(), Default::default);

    chunks
}

/// Deals `items` out to `lanes` lanes, item `i` going to lane `i % lanes`. Order within each lane
/// follows the input order.
#[inline]
pub fn deal_round_robin<I>(items: I, lanes: usize) -> Vec<Vec<I::Item>>
where
    I: IntoIterator,
{
    let mut out: Vec<Vec<I::Item>> = Vec::with_capacity(lanes);
    out.resize_with(lanes, Vec::new);

    for (i, item) in items.into_iter().enumerate() {
        out[i % lanes].push(item);
    }

    out
}
