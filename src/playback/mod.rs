//! Trace playback
//!
//! - [`controller`]: the per-visualization state machine
//! - [`coordinator`]: process-wide speed, pause and reset preferences
//! - [`clock`]: time sources and the single pending-tick [`Timer`]
//!
//! # Scheduling model
//!
//! Everything runs on the host's thread. The host calls
//! [`PlaybackController::poll`] from its event loop; a poll applies any
//! coordinator broadcasts and then fires at most one due tick. Nothing in
//! the playback path blocks or awaits.
//!
//! ```text
//! {Idle, Paused} --play()--> Playing --pause()--> Paused
//! Playing --tick() lands last--> Terminal --reset()--> Idle | Playing
//! any --step_forward()--> Paused | Terminal
//! ```

pub mod clock;
pub mod controller;
pub mod coordinator;

pub use clock::{Clock, ManualClock, MonotonicClock, Timer};
pub use controller::{PlaybackController, PlaybackState, PlaybackStatus, PollOutcome};
pub use coordinator::{GlobalCoordinator, GlobalSettings, Subscription};
