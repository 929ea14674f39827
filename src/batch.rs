//! Order-preserving batch execution.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Applies `f` to every item, in parallel when `parallel` is set and the
/// `parallel` feature is enabled. Output order equals input order.
#[cfg(feature = "parallel")]
pub(crate) fn map_ordered<T, U, F>(items: &[T], parallel: bool, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    if parallel {
        items.par_iter().map(f).collect()
    } else {
        items.iter().map(f).collect()
    }
}

#[cfg(not(feature = "parallel"))]
pub(crate) fn map_ordered<T, U, F>(items: &[T], _parallel: bool, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    items.iter().map(f).collect()
}
