//! Linear and binary search
//!
//! The terminal snapshot always carries the answer: [`SearchOutcome::Found`]
//! with the index, or [`SearchOutcome::NotFound`] with no index at all.

use crate::error::{TraceError, TraceResult};
use crate::trace::{Algorithm, Recorder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchInput {
    pub values: Vec<i64>,
    pub target: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Searching,
    Found(usize),
    NotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchSnapshot {
    pub values: Vec<i64>,
    pub target: i64,
    /// Candidate window, `low..high`
    pub low: usize,
    pub high: usize,
    /// Index being examined
    pub probe: Option<usize>,
    pub outcome: SearchOutcome,
}

impl SearchSnapshot {
    fn new(input: &SearchInput, low: usize, high: usize) -> Self {
        SearchSnapshot {
            values: input.values.clone(),
            target: input.target,
            low,
            high,
            probe: None,
            outcome: SearchOutcome::Searching,
        }
    }

    fn probing(mut self, index: usize) -> Self {
        self.probe = Some(index);
        self
    }

    fn finished(mut self, outcome: SearchOutcome) -> Self {
        self.probe = match outcome {
            SearchOutcome::Found(index) => Some(index),
            _ => None,
        };
        self.outcome = outcome;
        self
    }
}

/// Scan left to right
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearSearch;

impl Algorithm for LinearSearch {
    type Input = SearchInput;
    type Snapshot = SearchSnapshot;

    fn name(&self) -> &'static str {
        "linear-search"
    }

    fn run(&self, input: &SearchInput, recorder: &mut Recorder<SearchSnapshot>) -> TraceResult<()> {
        let n = input.values.len();
        for (i, &value) in input.values.iter().enumerate() {
            recorder.record(
                SearchSnapshot::new(input, i, n).probing(i),
                format!("Check a[{i}]={value} against {}", input.target),
            )?;
            if value == input.target {
                return recorder.record(
                    SearchSnapshot::new(input, i, i + 1).finished(SearchOutcome::Found(i)),
                    format!("Found {} at index {i}", input.target),
                );
            }
        }
        recorder.record(
            SearchSnapshot::new(input, n, n).finished(SearchOutcome::NotFound),
            format!("{} is not in the array", input.target),
        )
    }
}

/// Halve a sorted window until the target is hit or the window is empty
#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySearch;

impl Algorithm for BinarySearch {
    type Input = SearchInput;
    type Snapshot = SearchSnapshot;

    fn name(&self) -> &'static str {
        "binary-search"
    }

    fn validate(&self, input: &SearchInput) -> TraceResult<()> {
        if let Some(i) = input.values.windows(2).position(|w| w[0] > w[1]) {
            return Err(TraceError::precondition(
                self.name(),
                format!(
                    "values must be sorted, but a[{i}]={} > a[{}]={}",
                    input.values[i],
                    i + 1,
                    input.values[i + 1]
                ),
            ));
        }
        Ok(())
    }

    fn run(&self, input: &SearchInput, recorder: &mut Recorder<SearchSnapshot>) -> TraceResult<()> {
        let (mut low, mut high) = (0, input.values.len());

        while low < high {
            let mid = low + (high - low) / 2;
            let value = input.values[mid];
            recorder.record(
                SearchSnapshot::new(input, low, high).probing(mid),
                format!("Probe middle a[{mid}]={value}"),
            )?;

            if value == input.target {
                return recorder.record(
                    SearchSnapshot::new(input, mid, mid + 1).finished(SearchOutcome::Found(mid)),
                    format!("Found {} at index {mid}", input.target),
                );
            }
            if value < input.target {
                low = mid + 1;
                recorder.record(
                    SearchSnapshot::new(input, low, high),
                    format!("{value} < {}: move low to {low}", input.target),
                )?;
            } else {
                high = mid;
                recorder.record(
                    SearchSnapshot::new(input, low, high),
                    format!("{value} > {}: move high to {high}", input.target),
                )?;
            }
        }

        recorder.record(
            SearchSnapshot::new(input, low, high).finished(SearchOutcome::NotFound),
            format!("Window is empty: {} is not in the array", input.target),
        )
    }
}
