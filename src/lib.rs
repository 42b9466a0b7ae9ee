//! # Jumpstart TUI
//!
//! Terminal randomizers for MTG Jumpstart nights.
//!
//! ## Applications
//! - `jumpstart` - keeps a saved list of player names and shuffles it
//! - `pick-order` - draws a random pick order for 2 to 8 players
//!
//! ## Architecture
//! Layered, single threaded:
//! - UI Layer (Ratatui) - key events in, frames out
//! - App Layer - state machine turning [`UiEvent`]s into store calls
//! - Storage - [`NameListStore`] and its persistence backends

pub mod app;
pub mod config;
pub mod constants;
pub mod logging;
pub mod messages;
pub mod picker;
pub mod settings;
pub mod storage;
pub mod ui;

// Re-export commonly used types
pub use app::AppState;
pub use config::Config;
pub use messages::{RenderState, UiEvent};
pub use picker::{format_pick_order, PickOrder, PickOrderError};
pub use settings::{SettingsError, SettingsStore, WindowSize};
pub use storage::{JsonFileBackend, MemoryBackend, NameBackend, NameListStore, StoreError};
