//! Step records produced while sorting, and their text rendering.
//!
//! Steps are append-only and never read back by the sorts. Rendering needs `T: Debug`, buffers
//! print the way `Vec`'s `Debug` does, e.g. `[11, 12, 22]`.

use std::fmt;
use std::slice;

/// Half-open index range `start..end` into the working buffer.
///
/// Lomuto partitioning pushes empty ranges such as `(0, -1)` in inclusive terms. Storing the
/// exclusive end keeps those representable with `usize`, and [`fmt::Display`] still prints the
/// inclusive form: `Range::new(0, 0)` renders as `[0--1]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The range `low..=high`.
    #[inline]
    pub fn inclusive(low: usize, high: usize) -> Self {
        Self::new(low, high + 1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fewer than two elements, nothing left to partition.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.len() < 2
    }

    #[inline]
    pub fn low(&self) -> usize {
        self.start
    }

    /// Inclusive upper bound. Negative only for the empty range at index 0.
    #[inline]
    pub fn high(&self) -> isize {
        self.end as isize - 1
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{}]", self.low(), self.high())
    }
}

/// One recorded event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step<T> {
    /// A Lomuto partition of `range` finished.
    Partition {
        range: Range,
        pivot: T,
        /// Whole working buffer after the partition.
        buffer: Vec<T>,
        /// Final sorted position of `pivot`.
        pivot_index: usize,
        /// Work list after both sub-ranges were pushed, bottom first.
        pending: Vec<Range>,
    },
    /// The recursive variant picked `pivot` out of `input`.
    Pivot { pivot: T, input: Vec<T> },
    /// The recursive variant split the remaining elements around the pivot.
    Split { left: Vec<T>, right: Vec<T> },
    /// The recursive variant joined `left ++ [pivot] ++ right`.
    Merge { result: Vec<T> },
}

impl<T: fmt::Debug> fmt::Display for Step<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Partition {
                range,
                pivot,
                buffer,
                pivot_index,
                pending,
            } => {
                write!(
                    f,
                    "Partitioning range {} to {}, pivot: {:?}. \
                     After partition: {:?}, pivot position: {}. Work list: ",
                    range.low(),
                    range.high(),
                    pivot,
                    buffer,
                    pivot_index
                )?;

                if pending.is_empty() {
                    return f.write_str("empty");
                }

                for (i, range) in pending.iter().enumerate() {
                    if i != 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{range}")?;
                }

                Ok(())
            }
            Step::Pivot { pivot, input } => write!(f, "Pivot: {pivot:?}, array: {input:?}"),
            Step::Split { left, right } => write!(f, "Left: {left:?}, right: {right:?}"),
            Step::Merge { result } => write!(f, "Merged: {result:?}"),
        }
    }
}

/// Ordered log of the steps one sort call took.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trace<T> {
    steps: Vec<Step<T>>,
}

impl<T> Default for Trace<T> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<T> Trace<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, step: Step<T>) {
        self.steps.push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step<T>] {
        &self.steps
    }

    pub fn iter(&self) -> slice::Iter<'_, Step<T>> {
        self.steps.iter()
    }

    /// Only the [`Step::Partition`] entries.
    pub fn partitions(&self) -> impl Iterator<Item = &Step<T>> {
        self.steps
            .iter()
            .filter(|step| matches!(step, Step::Partition { .. }))
    }
}

impl<T: fmt::Debug> Trace<T> {
    /// One line per step.
    pub fn lines(&self) -> Vec<String> {
        self.steps.iter().map(|step| step.to_string()).collect()
    }

    /// Lines prefixed with their 1-based position, the way the visualizer lists them.
    pub fn numbered(&self) -> Vec<String> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{}. {step}", i + 1))
            .collect()
    }
}

impl<'a, T> IntoIterator for &'a Trace<T> {
    type Item = &'a Step<T>;
    type IntoIter = slice::Iter<'a, Step<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Result of a traced sort: the sorted copy and how it got there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sorted<T> {
    pub sorted: Vec<T>,
    pub trace: Trace<T>,
}

/// Receives sort events as they happen.
///
/// `()` ignores everything and is what the untraced entry points use, [`Trace`] snapshots each
/// event into a [`Step`].
pub trait Recorder<T> {
    fn partition(&mut self, _buffer: &[T], _range: Range, _pivot_index: usize, _pending: &[Range]) {
    }

    fn pivot(&mut self, _pivot: &T, _input: &[T]) {}

    fn split(&mut self, _left: &[T], _right: &[T]) {}

    fn merge(&mut self, _result: &[T]) {}
}

impl<T> Recorder<T> for () {}

impl<T: Clone> Recorder<T> for Trace<T> {
    fn partition(&mut self, buffer: &[T], range: Range, pivot_index: usize, pending: &[Range]) {
        self.push(Step::Partition {
            range,
            pivot: buffer[pivot_index].clone(),
            buffer: buffer.to_vec(),
            pivot_index,
            pending: pending.to_vec(),
        });
    }

    fn pivot(&mut self, pivot: &T, input: &[T]) {
        self.push(Step::Pivot {
            pivot: pivot.clone(),
            input: input.to_vec(),
        });
    }

    fn split(&mut self, left: &[T], right: &[T]) {
        self.push(Step::Split {
            left: left.to_vec(),
            right: right.to_vec(),
        });
    }

    fn merge(&mut self, result: &[T]) {
        self.push(Step::Merge {
            result: result.to_vec(),
        });
    }
}
