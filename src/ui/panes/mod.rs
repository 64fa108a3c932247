//! TUI pane rendering modules
//!
//! - [`snapshot`]: the current snapshot, plus the inline build-failure pane
//! - [`history`]: descriptions of the steps played so far
//! - [`status`]: status bar with keybindings and playback state
//!
//! Each pane is a stateless `render_*` function; scroll state lives in
//! [`App`](crate::ui::App).

pub mod history;
pub mod snapshot;
pub mod status;

pub use history::render_history_pane;
pub use snapshot::{render_failure_pane, render_snapshot_pane};
pub use status::{render_failure_bar, render_status_bar, StatusRenderData};
