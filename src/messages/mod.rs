//! Message types passed between the UI loop and the app state.
//!
//! Key presses become [`UiEvent`]s for the app layer; the app layer answers
//! with a [`RenderState`] snapshot for drawing.

pub mod ui_events;
pub mod render;

pub use ui_events::UiEvent;
pub use render::RenderState;
