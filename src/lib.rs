//! # Introduction
//!
//! tracetty runs a classical algorithm once over a fixed input, records a
//! snapshot at every observable state transition, and replays the
//! resulting trace under timer or manual control in a terminal UI built
//! with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Input → Algorithm + Recorder → StepStore → PlaybackController → TUI
//!                                                  ↑
//!                                        GlobalCoordinator
//! ```
//!
//! 1. [`trace`] — the recording contract ([`trace::Algorithm`],
//!    [`trace::Recorder`]) and the immutable [`trace::StepStore`].
//! 2. [`playback`] — the per-visualization state machine, the shared
//!    speed/pause/reset coordinator, and the timer.
//! 3. [`algorithms`] — sorting, searching, graph traversal, dynamic
//!    programming and backtracking, each with its own snapshot type.
//! 4. [`config`] / [`error`] — playback settings and error types.
//! 5. [`ui`] — ratatui-based viewer; not part of the stable library API.

pub mod algorithms;
pub mod config;
pub mod error;
pub mod playback;
pub mod trace;
pub mod ui;

pub use config::PlaybackConfig;
pub use error::{ConfigError, TraceError, TraceResult};
pub use playback::{GlobalCoordinator, PlaybackController, PlaybackStatus};
pub use trace::{Algorithm, Recorder, Step, StepStore, TraceBuilder};
