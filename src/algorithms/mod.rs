//! Traceable algorithm catalogue
//!
//! Each family owns its snapshot type. All of them record through the same
//! [`Recorder`](crate::trace::Recorder) contract:
//!
//! - [`sorting`]: bubble, insertion and selection sort over `i64` arrays
//! - [`searching`]: linear and binary search with an explicit outcome marker
//! - [`graph`]: breadth-first and depth-first traversal
//! - [`dp`]: longest common subsequence table filling
//! - [`backtracking`]: N-Queens with explicit undo steps
//! - [`input`]: seeded input generation for reproducible traces

pub mod backtracking;
pub mod dp;
pub mod graph;
pub mod input;
pub mod searching;
pub mod sorting;

pub use backtracking::{NQueens, QueensEvent, QueensSnapshot};
pub use dp::{LcsInput, LcsResult, LcsSnapshot, LongestCommonSubsequence};
pub use graph::{BreadthFirst, DepthFirst, GraphEvent, GraphInput, GraphSnapshot};
pub use searching::{BinarySearch, LinearSearch, SearchInput, SearchOutcome, SearchSnapshot};
pub use sorting::{BubbleSort, InsertionSort, SelectionSort, SortEvent, SortSnapshot};
