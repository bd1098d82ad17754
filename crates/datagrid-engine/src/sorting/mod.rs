//! Sorting module for the grid
//!
//! Provides multi-column sorting with nulls and non-numbers pinned to the end.

mod multi_sort;

pub use multi_sort::{MultiColumnSort, SortColumn, SortKey};
