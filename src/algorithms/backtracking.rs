//! N-Queens by depth-first backtracking, stopping at the first solution

use crate::error::{TraceError, TraceResult};
use crate::trace::{Algorithm, Recorder};
use rustc_hash::FxHashSet;

pub const MAX_QUEENS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueensEvent {
    /// Recursive call for a row begins
    Enter(usize),
    /// Candidate square attacked by an earlier queen
    Conflict { row: usize, col: usize },
    Place { row: usize, col: usize },
    /// Undo a placement whose subtree failed
    Remove { row: usize, col: usize },
    /// No column fits; the call for this row returns
    Exhausted(usize),
    Solved,
    NoSolution,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueensSnapshot {
    pub n: usize,
    /// Column of the queen in each filled row, top to bottom
    pub queens: Vec<usize>,
    pub event: QueensEvent,
}

impl QueensSnapshot {
    pub fn is_solved(&self) -> bool {
        self.event == QueensEvent::Solved
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NQueens;

struct Board<'r> {
    n: usize,
    queens: Vec<usize>,
    columns: FxHashSet<usize>,
    diagonals: FxHashSet<isize>,
    anti_diagonals: FxHashSet<usize>,
    recorder: &'r mut Recorder<QueensSnapshot>,
}

impl Board<'_> {
    fn record(&mut self, event: QueensEvent, description: String) -> TraceResult<()> {
        let snapshot = QueensSnapshot {
            n: self.n,
            queens: self.queens.clone(),
            event,
        };
        self.recorder.record(snapshot, description)
    }

    fn attacked(&self, row: usize, col: usize) -> bool {
        self.columns.contains(&col)
            || self.diagonals.contains(&(row as isize - col as isize))
            || self.anti_diagonals.contains(&(row + col))
    }

    fn place(&mut self, row: usize, col: usize) {
        self.queens.push(col);
        self.columns.insert(col);
        self.diagonals.insert(row as isize - col as isize);
        self.anti_diagonals.insert(row + col);
    }

    fn remove(&mut self, row: usize, col: usize) {
        self.queens.pop();
        self.columns.remove(&col);
        self.diagonals.remove(&(row as isize - col as isize));
        self.anti_diagonals.remove(&(row + col));
    }

    fn solve(&mut self, row: usize) -> TraceResult<bool> {
        if row == self.n {
            return Ok(true);
        }
        self.record(QueensEvent::Enter(row), format!("Try to place a queen in row {row}"))?;

        for col in 0..self.n {
            if self.attacked(row, col) {
                self.record(
                    QueensEvent::Conflict { row, col },
                    format!("({row}, {col}) is attacked"),
                )?;
                continue;
            }

            self.place(row, col);
            self.record(
                QueensEvent::Place { row, col },
                format!("Place queen at ({row}, {col})"),
            )?;
            if self.solve(row + 1)? {
                return Ok(true);
            }
            self.remove(row, col);
            self.record(
                QueensEvent::Remove { row, col },
                format!("Backtrack: remove queen from ({row}, {col})"),
            )?;
        }

        self.record(
            QueensEvent::Exhausted(row),
            format!("No column fits row {row}"),
        )?;
        Ok(false)
    }
}

impl Algorithm for NQueens {
    type Input = usize;
    type Snapshot = QueensSnapshot;

    fn name(&self) -> &'static str {
        "n-queens"
    }

    fn validate(&self, n: &usize) -> TraceResult<()> {
        if *n == 0 || *n > MAX_QUEENS {
            return Err(TraceError::invalid_input(
                self.name(),
                format!("board size must be between 1 and {MAX_QUEENS}, got {n}"),
            ));
        }
        Ok(())
    }

    fn run(&self, n: &usize, recorder: &mut Recorder<QueensSnapshot>) -> TraceResult<()> {
        let mut board = Board {
            n: *n,
            queens: Vec::with_capacity(*n),
            columns: FxHashSet::default(),
            diagonals: FxHashSet::default(),
            anti_diagonals: FxHashSet::default(),
            recorder,
        };

        if board.solve(0)? {
            board.record(QueensEvent::Solved, format!("All {n} queens placed"))
        } else {
            board.record(
                QueensEvent::NoSolution,
                format!("No arrangement of {n} queens exists"),
            )
        }
    }
}

/// True when `queens` places one queen per row with no two attacking
pub fn is_valid_solution(n: usize, queens: &[usize]) -> bool {
    queens.len() == n
        && queens.iter().all(|&c| c < n)
        && queens.iter().enumerate().all(|(r1, &c1)| {
            queens.iter().enumerate().skip(r1 + 1).all(|(r2, &c2)| {
                c1 != c2 && r1.abs_diff(r2) != c1.abs_diff(c2)
            })
        })
}
