//! Unstable sorts: equal elements may end up in any relative order.

pub mod lomuto_stack;

// Recursive variant, kept for comparison with the work-list formulation.
pub mod midpoint_recursive;
