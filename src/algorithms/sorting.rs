//! Comparison sorts over `i64` arrays
//!
//! Every comparison and every swap is one snapshot, and each trace ends
//! with a single completion snapshot. There is no separate "initial"
//! snapshot: the first comparison already shows the untouched array.

use crate::error::TraceResult;
use crate::trace::{Algorithm, Recorder};

/// What happened to the array in a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortEvent {
    Compare(usize, usize),
    Swap(usize, usize),
    Complete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortSnapshot {
    pub values: Vec<i64>,
    pub event: SortEvent,
}

impl SortSnapshot {
    pub fn is_complete(&self) -> bool {
        self.event == SortEvent::Complete
    }
}

/// Recording helpers shared by every sort, so the algorithms only decide
/// *which* indices to compare and swap.
struct SortTrace<'r> {
    recorder: &'r mut Recorder<SortSnapshot>,
}

impl SortTrace<'_> {
    /// Record a comparison; true when `values[i] > values[j]`
    fn compare(&mut self, values: &[i64], i: usize, j: usize) -> TraceResult<bool> {
        self.recorder.record(
            SortSnapshot {
                values: values.to_vec(),
                event: SortEvent::Compare(i, j),
            },
            format!("Compare a[{i}]={} with a[{j}]={}", values[i], values[j]),
        )?;
        Ok(values[i] > values[j])
    }

    fn swap(&mut self, values: &mut [i64], i: usize, j: usize) -> TraceResult<()> {
        values.swap(i, j);
        self.recorder.record(
            SortSnapshot {
                values: values.to_vec(),
                event: SortEvent::Swap(i, j),
            },
            format!("Swap a[{i}] and a[{j}]"),
        )
    }

    fn complete(&mut self, values: &[i64]) -> TraceResult<()> {
        let description = if values.len() < 2 {
            "Already sorted: nothing to compare"
        } else {
            "Array is sorted"
        };
        self.recorder.record(
            SortSnapshot {
                values: values.to_vec(),
                event: SortEvent::Complete,
            },
            description,
        )
    }
}

/// Bubble sort with early exit on a pass without swaps
#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleSort;

impl Algorithm for BubbleSort {
    type Input = Vec<i64>;
    type Snapshot = SortSnapshot;

    fn name(&self) -> &'static str {
        "bubble-sort"
    }

    fn run(&self, input: &Vec<i64>, recorder: &mut Recorder<SortSnapshot>) -> TraceResult<()> {
        let mut values = input.clone();
        let mut trace = SortTrace { recorder };
        let n = values.len();

        for pass in 0..n.saturating_sub(1) {
            let mut swapped = false;
            for j in 0..n - 1 - pass {
                if trace.compare(&values, j, j + 1)? {
                    trace.swap(&mut values, j, j + 1)?;
                    swapped = true;
                }
            }
            if !swapped {
                break;
            }
        }
        trace.complete(&values)
    }
}

/// Insertion sort by adjacent swaps
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionSort;

impl Algorithm for InsertionSort {
    type Input = Vec<i64>;
    type Snapshot = SortSnapshot;

    fn name(&self) -> &'static str {
        "insertion-sort"
    }

    fn run(&self, input: &Vec<i64>, recorder: &mut Recorder<SortSnapshot>) -> TraceResult<()> {
        let mut values = input.clone();
        let mut trace = SortTrace { recorder };

        for i in 1..values.len() {
            let mut j = i;
            while j > 0 && trace.compare(&values, j - 1, j)? {
                trace.swap(&mut values, j - 1, j)?;
                j -= 1;
            }
        }
        trace.complete(&values)
    }
}

/// Selection sort: find the minimum of the unsorted tail, swap it forward
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionSort;

impl Algorithm for SelectionSort {
    type Input = Vec<i64>;
    type Snapshot = SortSnapshot;

    fn name(&self) -> &'static str {
        "selection-sort"
    }

    fn run(&self, input: &Vec<i64>, recorder: &mut Recorder<SortSnapshot>) -> TraceResult<()> {
        let mut values = input.clone();
        let mut trace = SortTrace { recorder };
        let n = values.len();

        for i in 0..n.saturating_sub(1) {
            let mut min = i;
            for j in i + 1..n {
                if trace.compare(&values, min, j)? {
                    min = j;
                }
            }
            if min != i {
                trace.swap(&mut values, i, min)?;
            }
        }
        trace.complete(&values)
    }
}
