//! Quicksort variants that record every step they take, for display next to the sorted result.
//!
//! [`unstable::lomuto_stack`] is the main sorter: an iterative Lomuto quicksort driven by an
//! explicit work list. [`unstable::midpoint_recursive`] is the textbook recursive formulation kept
//! for side-by-side comparison. Both return a [`Trace`] whose steps render to plain text.
//!
//! [`stack`] and [`frequency`] hold the two smaller demos: a bounded stack with a bracket
//! matcher, and letter counts checked against a language's usual frequencies.

macro_rules! sort_impl {
    ($name:expr) => {
        sort_impl!($name, None);
    };
    ($name:expr, $max_len:expr) => {
        pub struct SortImpl;

        impl sort_test_tools::Sort for SortImpl {
            fn name() -> String {
                $name.into()
            }

            #[inline]
            fn sort<T>(arr: &mut [T])
            where
                T: Ord + Clone,
            {
                sort(arr);
            }

            #[inline]
            fn sort_by<T, F>(arr: &mut [T], compare: F)
            where
                T: Clone,
                F: FnMut(&T, &T) -> std::cmp::Ordering,
            {
                sort_by(arr, compare);
            }

            fn sort_traced<T>(arr: &[T]) -> (Vec<T>, Vec<String>)
            where
                T: Ord + Clone + std::fmt::Debug,
            {
                let $crate::trace::Sorted { sorted, trace } = sort_traced(arr);
                (sorted, trace.lines())
            }

            fn max_len() -> Option<usize> {
                $max_len
            }
        }
    };
}

pub mod config;
pub mod frequency;
pub mod input;
pub mod stack;
pub mod trace;
pub mod unstable;

pub use trace::{Range, Recorder, Sorted, Step, Trace};
