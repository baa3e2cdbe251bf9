use crate::map_sort_builder::MapSortBuilder;

pub trait MapSortExt<T> {
    /// map_sort_unstable sorts your `Vec<T>` or `[T]` with a parallel sample sort, using one
    /// worker per thread of the current rayon pool.
    ///
    /// ```
    /// use mapsort::MapSortExt;
    ///
    /// let mut values = [3, 1, 2];
    /// values.map_sort_unstable();
    ///
    /// assert_eq!(values, [1, 2, 3]);
    /// ```
    fn map_sort_unstable(&mut self)
    where
        T: Ord;

    fn map_sort_builder(&'_ mut self) -> MapSortBuilder<'_, T>;
}

impl<T> MapSortExt<T> for Vec<T>
where
    T: Clone + Send + Sync,
{
    fn map_sort_unstable(&mut self)
    where
        T: Ord,
    {
        self.map_sort_builder().sort();
    }

    fn map_sort_builder(&'_ mut self) -> MapSortBuilder<'_, T> {
        MapSortBuilder::new(self)
    }
}

impl<T> MapSortExt<T> for [T]
where
    T: Clone + Send + Sync,
{
    fn map_sort_unstable(&mut self)
    where
        T: Ord,
    {
        self.map_sort_builder().sort();
    }

    fn map_sort_builder(&'_ mut self) -> MapSortBuilder<'_, T> {
        MapSortBuilder::new(self)
    }
}
