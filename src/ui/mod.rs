//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is the hosting surface for playback and is organized into four layers:
//!
//! - **[`app`]** — application state, keyboard event loop, rebuild-on-retry
//! - **[`panes`]** — stateless render functions for each visible pane
//! - **[`view`]** — per-family adapters turning a snapshot into text lines
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a trace source
//! and a [`GlobalCoordinator`], then call [`App::run`] to start the event loop.
//!
//! [`GlobalCoordinator`]: crate::playback::GlobalCoordinator
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;
pub mod view;

pub use app::{App, Loaded, TraceSource};
pub use view::SnapshotView;
