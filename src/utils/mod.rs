#[cfg(any(test, feature = "bench"))]
pub mod test_utils;

mod sort_utils;

pub use sort_utils::*;
