//! # mapsort
//!
//! mapsort is a multi-threaded, in-memory sample sort for any `Clone + Send + Sync` type.
//!
//! ## Usage
//!
//! In the simplest case, call `my_vec.map_sort_unstable()`. This builds a throwaway engine sized
//! for that one call and sorts with one worker per thread of the current rayon pool.
//!
//! ```
//! use mapsort::MapSortExt;
//!
//! let mut values = vec!["hoge", "piyo", "fuga", "foo", "bar"];
//! values.map_sort_unstable();
//!
//! assert_eq!(values, ["bar", "foo", "fuga", "hoge", "piyo"]);
//! ```
//!
//! When sorting many times, create a `MapSort` once, size it with `init` and reuse it. Its
//! scratch buffers are kept between calls so only the first sort pays for allocation.
//!
//! ```
//! use mapsort::MapSort;
//!
//! let mut engine: MapSort<u32> = MapSort::new();
//! engine.init(1_000, Some(4));
//!
//! for n in [10u32, 500, 1_000] {
//!     let mut data: Vec<u32> = (0..n).rev().collect();
//!     engine.sort(&mut data, Some(4));
//!     assert!(data.windows(2).all(|w| w[0] <= w[1]));
//! }
//! ```
//!
//! ## Algorithm
//!
//! Pivots are sampled at random from the input and split the value space into `BUCKETS` buckets
//! (256 by default). Every worker counts how many of its elements fall into each bucket, those
//! counts are turned into private write cursors and the elements are scattered into a scratch
//! array, grouped by bucket, without any locking. Finally every bucket is sorted on its own, in
//! parallel, and the scratch array is moved back into the input.
//!
//! The sort is unstable: equal elements may end up in any order.
//!
//! ## Preconditions
//!
//! Sorting more elements than an engine was initialised for, or asking for zero workers or more
//! workers than it was initialised for, panics.
//!
//! ## License
//!
//! Licensed under either of
//!
//! * Apache License, Version 2.0, ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.
//!
//! ### Contribution
//!
//! Unless you explicitly state otherwise, any contribution intentionally submitted for inclusion in the work by you, as defined in the Apache-2.0 license, shall be dual licensed as above, without any additional terms or conditions.


mod histogram;
mod interval_sort;
mod map_sort;
mod map_sort_builder;
mod ranges;
mod sampler;
mod scatter;
mod scratch_buffers;
mod sort_ext;

#[cfg(not(any(test, feature = "bench")))]
mod utils;
#[cfg(any(test, feature = "bench"))]
pub mod utils;

pub use map_sort::{map_sort, map_sort_by, MapSort};
pub use map_sort_builder::MapSortBuilder;
pub use sampler::IndexSampler;
pub use sort_ext::MapSortExt;
