//! Iterative quicksort, Lomuto partition around the last element, pending ranges on an explicit
//! work list instead of the call stack.

use std::cmp::Ordering;

use tracing::debug;

use crate::trace::{Range, Recorder, Sorted, Trace};

sort_impl!("lomuto_stack_unstable");

#[inline]
pub fn sort<T>(v: &mut [T])
where
    T: Ord,
{
    quicksort(v, &mut |a, b| a.lt(b), &mut ());
}

#[inline]
pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    quicksort(v, &mut |a, b| compare(a, b) == Ordering::Less, &mut ());
}

/// Sorts a copy of `v` and records one [`Step::Partition`](crate::Step::Partition) per
/// partitioned range.
///
/// Empty and single element input comes back unchanged with an empty trace.
pub fn sort_traced<T>(v: &[T]) -> Sorted<T>
where
    T: Ord + Clone,
{
    let mut sorted = v.to_vec();
    let mut trace = Trace::new();

    quicksort(&mut sorted, &mut |a, b| a.lt(b), &mut trace);

    debug!(len = sorted.len(), steps = trace.len(), "lomuto_stack sort done");

    Sorted { sorted, trace }
}

////////////////////////////////////////////////////////////////////////////////
// Sorting
////////////////////////////////////////////////////////////////////////////////

fn quicksort<T, F, R>(v: &mut [T], is_less: &mut F, recorder: &mut R)
where
    F: FnMut(&T, &T) -> bool,
    R: Recorder<T>,
{
    if v.len() < 2 {
        return;
    }

    // Last pushed is processed next. Worst case, already ordered input, holds one pending range
    // per element.
    let mut work_list = vec![Range::new(0, v.len())];

    while let Some(range) = work_list.pop() {
        if range.is_trivial() {
            continue;
        }

        let pivot_pos = range.start + lomuto_partition(&mut v[range.start..range.end], is_less);

        work_list.push(Range::new(range.start, pivot_pos));
        work_list.push(Range::new(pivot_pos + 1, range.end));

        recorder.partition(v, range, pivot_pos, &work_list);
    }
}

/// Partitions `v` around its last element and returns the position the pivot ends up at.
///
/// Everything left of that position is `<=` the pivot, everything right of it is `>`. Elements
/// equal to the pivot go left.
fn lomuto_partition<T, F>(v: &mut [T], is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let last = v.len() - 1;

    // `lt_count` is one past the boundary `i` of the textbook formulation, which starts at
    // `low - 1`.
    let mut lt_count = 0;
    {
        let (rest, pivot) = v.split_at_mut(last);
        let pivot = &pivot[0];

        for j in 0..rest.len() {
            if !is_less(pivot, &rest[j]) {
                rest.swap(lt_count, j);
                lt_count += 1;
            }
        }
    }

    // Place the pivot between the two partitions.
    v.swap(lt_count, last);

    lt_count
}
