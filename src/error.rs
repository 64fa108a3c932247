//! Error types for trace construction and playback configuration
//!
//! Only construction can fail. Once a [`StepStore`](crate::trace::StepStore)
//! exists every playback operation is total, so there is no runtime error
//! type for the controller.

pub type TraceResult<T> = Result<T, TraceError>;

/// Errors raised while building a trace. All of them are fatal for the run:
/// the builder never hands back a partial trace.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TraceError {
    /// The input descriptor itself is malformed (bad graph, bad board size, ...)
    #[error("{algorithm}: invalid input: {message}")]
    InvalidInput {
        algorithm: &'static str,
        message: String,
    },

    /// The input is well-formed but breaks the algorithm's precondition
    #[error("{algorithm}: precondition violated: {message}")]
    PreconditionViolated {
        algorithm: &'static str,
        message: String,
    },

    /// The algorithm finished without recording a single snapshot
    #[error("{algorithm}: run recorded no snapshots")]
    EmptyTrace { algorithm: &'static str },

    /// The run tried to record more snapshots than the builder allows
    #[error("snapshot limit exceeded: more than {limit} snapshots recorded")]
    SnapshotLimitExceeded { limit: usize },
}

impl TraceError {
    pub fn invalid_input(algorithm: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            algorithm,
            message: message.into(),
        }
    }

    pub fn precondition(algorithm: &'static str, message: impl Into<String>) -> Self {
        Self::PreconditionViolated {
            algorithm,
            message: message.into(),
        }
    }
}

/// Errors raised when validating playback settings
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("speed multiplier must be a finite positive number, got {0}")]
    InvalidSpeed(f64),

    #[error("interval floor must be greater than zero")]
    ZeroFloor,

    #[error("base interval {base_ms}ms is below the floor of {floor_ms}ms")]
    IntervalBelowFloor { base_ms: u128, floor_ms: u128 },
}
