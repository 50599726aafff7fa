use std::cmp::Ordering;
use std::fmt::Debug;

/// Common surface of every sort variant, so the shared suite in [`tests`] can drive them all.
pub trait Sort {
    fn name() -> String;

    fn sort<T>(arr: &mut [T])
    where
        T: Ord + Clone;

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering;

    /// Sorts a private copy of `arr` and returns it together with the rendered step log.
    fn sort_traced<T>(arr: &[T]) -> (Vec<T>, Vec<String>)
    where
        T: Ord + Clone + Debug;

    /// Longest input the implementation is expected to handle, `None` if unbounded.
    ///
    /// Recursive variants grow the call stack with the input and set this.
    fn max_len() -> Option<usize> {
        None
    }
}

pub mod patterns;
