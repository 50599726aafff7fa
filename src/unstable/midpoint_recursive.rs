//! Recursive quicksort, middle element as pivot, splits into new vectors at every level.
//!
//! Recursion depth grows with the input, all equal values reach depth `len`. Meant for small
//! demonstration inputs only, [`lomuto_stack`](super::lomuto_stack) is the general sorter.

use std::cmp::Ordering;

use tracing::debug;

use crate::trace::{Recorder, Sorted, Trace};

sort_impl!("midpoint_recursive_unstable", Some(MAX_LEN));

/// Longest input the shared test suite feeds this variant.
pub const MAX_LEN: usize = 1_000;

#[inline]
pub fn sort<T>(v: &mut [T])
where
    T: Ord + Clone,
{
    sort_by(v, T::cmp);
}

pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if v.len() < 2 {
        return;
    }

    let sorted = quicksort(
        v.to_vec(),
        &mut |a, b| compare(a, b) == Ordering::Less,
        &mut (),
    );
    v.clone_from_slice(&sorted);
}

/// Sorts a copy of `v`, recording a pivot, a split and a merge step for every call that had
/// at least two elements.
pub fn sort_traced<T>(v: &[T]) -> Sorted<T>
where
    T: Ord + Clone,
{
    let mut trace = Trace::new();
    let sorted = quicksort(v.to_vec(), &mut |a, b| a.lt(b), &mut trace);

    debug!(len = sorted.len(), steps = trace.len(), "midpoint_recursive sort done");

    Sorted { sorted, trace }
}

fn quicksort<T, F, R>(mut v: Vec<T>, is_less: &mut F, recorder: &mut R) -> Vec<T>
where
    F: FnMut(&T, &T) -> bool,
    R: Recorder<T>,
{
    if v.len() < 2 {
        return v;
    }

    let pivot_pos = v.len() / 2;
    recorder.pivot(&v[pivot_pos], &v);

    let pivot = v.remove(pivot_pos);
    let (left, right): (Vec<T>, Vec<T>) = v.into_iter().partition(|e| is_less(e, &pivot));
    recorder.split(&left, &right);

    let mut merged = quicksort(left, is_less, recorder);
    let right = quicksort(right, is_less, recorder);

    merged.reserve(right.len() + 1);
    merged.push(pivot);
    merged.extend(right);

    recorder.merge(&merged);

    merged
}
