//! App layer - central state management and command processing
//!
//! The app state receives UI events, applies them to the name list store
//! and produces the render state.

pub mod state;
pub mod commands;

pub use state::AppState;
