//! Trace recording
//!
//! An [`Algorithm`] runs once, synchronously, over a fixed input and reports
//! every observable state transition to a [`Recorder`]. The
//! [`TraceBuilder`] drives the run and turns the recorded steps into a
//! read-only [`StepStore`].
//!
//! # Recording discipline
//!
//! - Snapshots are passed to [`Recorder::record`] by value, and
//!   [`Algorithm::Snapshot`] must be `'static`, so a snapshot can never
//!   borrow the algorithm's working storage. Working arrays are copied
//!   (`to_vec()`) at record time.
//! - Every state-changing event gets at least one snapshot.
//! - A run over degenerate input still records one snapshot describing the
//!   already-complete state.
//! - Any error aborts the run; the recorder is dropped and nothing partial
//!   escapes.

pub mod store;

pub use store::StepStore;

use crate::error::{TraceError, TraceResult};

/// One recorded snapshot and the event that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Step<S> {
    pub snapshot: S,
    pub description: String,
}

/// Append-only sink handed to an algorithm while it runs
#[derive(Debug)]
pub struct Recorder<S> {
    steps: Vec<Step<S>>,
    limit: Option<usize>,
}

impl<S> Recorder<S> {
    fn new(limit: Option<usize>) -> Self {
        Recorder {
            steps: Vec::new(),
            limit,
        }
    }

    /// Append a snapshot of the state right after an event
    pub fn record(&mut self, snapshot: S, description: impl Into<String>) -> TraceResult<()> {
        if let Some(limit) = self.limit {
            if self.steps.len() >= limit {
                return Err(TraceError::SnapshotLimitExceeded { limit });
            }
        }
        self.steps.push(Step {
            snapshot,
            description: description.into(),
        });
        Ok(())
    }

    /// Number of snapshots recorded so far
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    fn into_steps(self) -> Vec<Step<S>> {
        self.steps
    }
}

/// A deterministic algorithm that can be traced.
///
/// Implementations must not read the clock or unseeded randomness: two runs
/// over the same input must record identical traces.
pub trait Algorithm {
    /// Immutable input descriptor supplied by the host
    type Input;
    /// Owned per-family snapshot payload
    type Snapshot: 'static;

    /// Short machine-friendly name, used in errors and logs
    fn name(&self) -> &'static str;

    /// Reject malformed input or unmet preconditions before anything runs
    fn validate(&self, _input: &Self::Input) -> TraceResult<()> {
        Ok(())
    }

    /// Run to completion, recording every observable event
    fn run(&self, input: &Self::Input, recorder: &mut Recorder<Self::Snapshot>)
        -> TraceResult<()>;
}

/// Runs algorithms and materializes their traces
#[derive(Debug, Clone, Default)]
pub struct TraceBuilder {
    snapshot_limit: Option<usize>,
}

impl TraceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any run that records more than `limit` snapshots
    pub fn with_snapshot_limit(mut self, limit: usize) -> Self {
        self.snapshot_limit = Some(limit);
        self
    }

    /// Execute `algorithm` once over `input` and return its full trace
    #[tracing::instrument(skip_all, fields(algorithm = algorithm.name()))]
    pub fn build<A: Algorithm>(
        &self,
        algorithm: &A,
        input: &A::Input,
    ) -> TraceResult<StepStore<A::Snapshot>> {
        let outcome = algorithm.validate(input).and_then(|()| {
            let mut recorder = Recorder::new(self.snapshot_limit);
            algorithm.run(input, &mut recorder)?;
            StepStore::from_steps(recorder.into_steps()).ok_or(TraceError::EmptyTrace {
                algorithm: algorithm.name(),
            })
        });

        match &outcome {
            Ok(store) => tracing::debug!(steps = store.len(), "trace built"),
            Err(err) => tracing::warn!(%err, "trace build failed"),
        }
        outcome
    }
}
