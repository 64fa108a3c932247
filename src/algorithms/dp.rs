//! Longest common subsequence, filled one table cell at a time

use crate::error::{TraceError, TraceResult};
use crate::trace::{Algorithm, Recorder};

/// Longest input string accepted; every snapshot copies the whole table
pub const MAX_LCS_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcsInput {
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcsResult {
    pub length: usize,
    pub subsequence: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LcsSnapshot {
    pub left: Vec<char>,
    pub right: Vec<char>,
    /// `(left.len() + 1) x (right.len() + 1)`, row 0 and column 0 are zero
    pub table: Vec<Vec<usize>>,
    /// Cell written by this step
    pub cell: Option<(usize, usize)>,
    /// Set on the final snapshot only
    pub result: Option<LcsResult>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LongestCommonSubsequence;

impl Algorithm for LongestCommonSubsequence {
    type Input = LcsInput;
    type Snapshot = LcsSnapshot;

    fn name(&self) -> &'static str {
        "lcs"
    }

    fn validate(&self, input: &LcsInput) -> TraceResult<()> {
        for (side, text) in [("left", &input.left), ("right", &input.right)] {
            let len = text.chars().count();
            if len > MAX_LCS_LEN {
                return Err(TraceError::invalid_input(
                    self.name(),
                    format!("{side} string has {len} characters, limit is {MAX_LCS_LEN}"),
                ));
            }
        }
        Ok(())
    }

    fn run(&self, input: &LcsInput, recorder: &mut Recorder<LcsSnapshot>) -> TraceResult<()> {
        let left: Vec<char> = input.left.chars().collect();
        let right: Vec<char> = input.right.chars().collect();
        let mut table = vec![vec![0usize; right.len() + 1]; left.len() + 1];

        for i in 1..=left.len() {
            for j in 1..=right.len() {
                let description = if left[i - 1] == right[j - 1] {
                    table[i][j] = table[i - 1][j - 1] + 1;
                    format!(
                        "'{}' matches: T[{i}][{j}] = T[{}][{}] + 1 = {}",
                        left[i - 1],
                        i - 1,
                        j - 1,
                        table[i][j]
                    )
                } else {
                    table[i][j] = table[i - 1][j].max(table[i][j - 1]);
                    format!(
                        "'{}' ≠ '{}': T[{i}][{j}] = max({}, {}) = {}",
                        left[i - 1],
                        right[j - 1],
                        table[i - 1][j],
                        table[i][j - 1],
                        table[i][j]
                    )
                };
                recorder.record(
                    LcsSnapshot {
                        left: left.clone(),
                        right: right.clone(),
                        table: table.clone(),
                        cell: Some((i, j)),
                        result: None,
                    },
                    description,
                )?;
            }
        }

        let result = reconstruct(&table, &left, &right);
        let description = if left.is_empty() || right.is_empty() {
            "Empty input: the LCS is empty".to_string()
        } else {
            format!(
                "LCS length {}: \"{}\"",
                result.length, result.subsequence
            )
        };
        recorder.record(
            LcsSnapshot {
                left,
                right,
                table,
                cell: None,
                result: Some(result),
            },
            description,
        )
    }
}

/// Walk back from the bottom-right corner to recover one LCS
fn reconstruct(table: &[Vec<usize>], left: &[char], right: &[char]) -> LcsResult {
    let (mut i, mut j) = (left.len(), right.len());
    let mut reversed = Vec::new();
    while i > 0 && j > 0 {
        if left[i - 1] == right[j - 1] {
            reversed.push(left[i - 1]);
            i -= 1;
            j -= 1;
        } else if table[i - 1][j] >= table[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    LcsResult {
        length: table[left.len()][right.len()],
        subsequence: reversed.into_iter().rev().collect(),
    }
}
