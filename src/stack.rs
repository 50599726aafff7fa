//! A bounded LIFO stack and the bracket matcher built on it.
//!
//! Every operation that can fail says why through [`StackError`] instead of handing back a
//! sentinel.

use std::fmt::Debug;

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::DEFAULT_STACK_CAPACITY;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum StackError {
    #[error("stack is full, capacity is {capacity}")]
    Full { capacity: usize },
    #[error("stack is empty")]
    Empty,
}

/// Stack over an owned `Vec` that refuses to grow past `capacity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedStack<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> Default for BoundedStack<T> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_STACK_CAPACITY)
    }
}

impl<T> BoundedStack<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn push(&mut self, item: T) -> Result<(), StackError> {
        if self.is_full() {
            return Err(StackError::Full {
                capacity: self.capacity,
            });
        }

        self.items.push(item);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<T, StackError> {
        self.items.pop().ok_or(StackError::Empty)
    }

    pub fn peek(&self) -> Result<&T, StackError> {
        self.items.last().ok_or(StackError::Empty)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items from the top down.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter().rev()
    }
}

impl<T: PartialEq> BoundedStack<T> {
    /// Distance of the topmost `item` from the top, `Some(0)` for the top itself.
    pub fn search(&self, item: &T) -> Option<usize> {
        self.iter().position(|candidate| candidate == item)
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum BracketError {
    #[error("'{close}' at byte {offset} has no opening bracket")]
    Unopened { close: char, offset: usize },
    #[error("'{open}' at byte {open_offset} is closed by '{close}' at byte {offset}")]
    Mismatch {
        open: char,
        open_offset: usize,
        close: char,
        offset: usize,
    },
    #[error("'{open}' at byte {offset} is never closed")]
    Unclosed { open: char, offset: usize },
    #[error("brackets nest deeper than {capacity}")]
    TooDeep { capacity: usize },
}

/// Checks that `()`, `[]` and `{}` in `expr` are balanced and properly nested.
pub fn check_brackets(expr: &str) -> Result<(), BracketError> {
    check_brackets_with_capacity(expr, DEFAULT_STACK_CAPACITY)
}

/// [`check_brackets`] with an explicit nesting limit.
pub fn check_brackets_with_capacity(expr: &str, capacity: usize) -> Result<(), BracketError> {
    let mut open: BoundedStack<(char, usize)> = BoundedStack::with_capacity(capacity);

    for (offset, c) in expr.char_indices() {
        match c {
            '(' | '[' | '{' => {
                open.push((c, offset)).map_err(|_| BracketError::TooDeep { capacity })?;
            }
            ')' | ']' | '}' => {
                let (open_c, open_offset) = open.pop().map_err(|_| BracketError::Unopened {
                    close: c,
                    offset,
                })?;

                if closing_for(open_c) != c {
                    return Err(BracketError::Mismatch {
                        open: open_c,
                        open_offset,
                        close: c,
                        offset,
                    });
                }
            }
            _ => {}
        }
    }

    if let Ok((open, offset)) = open.pop() {
        return Err(BracketError::Unclosed { open, offset });
    }

    Ok(())
}

fn closing_for(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

/// What [`demo`] observed, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport<T> {
    pub pushed: Vec<T>,
    pub rejected: Vec<(T, StackError)>,
    /// Stack contents top-down once everything was pushed.
    pub contents: Vec<T>,
    pub peeked: Option<T>,
    pub found: Vec<(T, Option<usize>)>,
    pub popped: Vec<T>,
    /// Result of one more pop after draining.
    pub final_pop: Result<T, StackError>,
}

/// Pushes `items` onto a stack of `capacity`, searches for each of `queries`, then pops until
/// empty and once more.
pub fn demo<T>(capacity: usize, items: Vec<T>, queries: Vec<T>) -> DemoReport<T>
where
    T: Clone + PartialEq + Debug,
{
    let mut stack = BoundedStack::with_capacity(capacity);
    let mut pushed = Vec::new();
    let mut rejected = Vec::new();

    for item in items {
        match stack.push(item.clone()) {
            Ok(()) => {
                debug!(?item, len = stack.len(), "pushed");
                pushed.push(item);
            }
            Err(err) => {
                warn!(?item, %err, "push rejected");
                rejected.push((item, err));
            }
        }
    }

    let contents = stack.iter().cloned().collect();
    let peeked = stack.peek().ok().cloned();

    let found = queries
        .into_iter()
        .map(|query| {
            let position = stack.search(&query);
            (query, position)
        })
        .collect();

    let mut popped = Vec::with_capacity(stack.len());
    while let Ok(item) = stack.pop() {
        debug!(?item, len = stack.len(), "popped");
        popped.push(item);
    }

    let final_pop = stack.pop();

    DemoReport {
        pushed,
        rejected,
        contents,
        peeked,
        found,
        popped,
        final_pop,
    }
}
