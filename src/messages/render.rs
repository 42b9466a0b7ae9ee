//! Render state - data structure sent from App layer to UI for rendering

use std::collections::BTreeSet;

use crate::app::state::Popup;
use crate::messages::ui_events::{Focus, PopupKind};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Name list
    pub names: Vec<String>,
    pub marked: BTreeSet<String>,
    pub selected: Option<usize>,

    // Input line
    pub focus: Focus,
    pub input: String,
    pub cursor_position: usize,

    // Output
    pub shuffle_output: String,
    pub popup: Option<Popup>,

    // Display
    pub dark_mode: bool,
    /// Where the names are stored, shown in the status bar
    pub location: String,
}

impl RenderState {
    pub fn popup_kind(&self) -> PopupKind {
        self.popup.as_ref().map(Popup::kind).unwrap_or_default()
    }
}
