//! App state - the name list application's data, with no terminal I/O

use std::collections::BTreeSet;

use crate::constants::{EMPTY_SENTINEL, SHUFFLE_LABEL};
use crate::messages::ui_events::{Focus, PopupKind};
use crate::messages::RenderState;
use crate::settings::SettingsStore;
use crate::storage::NameListStore;

/// A mutation waiting for the user to confirm it
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingAction {
    Remove(BTreeSet<String>),
    ClearAll,
}

impl PendingAction {
    pub fn title(&self) -> &'static str {
        match self {
            PendingAction::Remove(_) => "Confirm Removal",
            PendingAction::ClearAll => "Confirm Clear All",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            PendingAction::Remove(_) => "Are you sure you want to remove the selected name(s)?",
            PendingAction::ClearAll => "Are you sure you want to clear all names?",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// Modal content drawn over the main screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Popup {
    Help,
    Confirm(PendingAction),
    Message {
        level: MessageLevel,
        title: String,
        text: String,
    },
}

impl Popup {
    pub fn kind(&self) -> PopupKind {
        match self {
            Popup::Help => PopupKind::Help,
            Popup::Confirm(_) => PopupKind::Confirm,
            Popup::Message { .. } => PopupKind::Message,
        }
    }
}

/// `Shuffled Order: ...` line shown under the list
pub fn format_shuffled(order: &[String]) -> String {
    if order.is_empty() {
        format!("{SHUFFLE_LABEL}{EMPTY_SENTINEL}")
    } else {
        format!("{SHUFFLE_LABEL}{}", order.join(", "))
    }
}

/// Main application state
pub struct AppState {
    // Persisted data
    pub store: NameListStore,
    pub settings: Option<SettingsStore>,

    // Name input
    pub focus: Focus,
    pub input: String,
    pub cursor_position: usize,

    // Name list
    pub selected: usize,
    pub marked: BTreeSet<String>,

    // Output
    pub shuffle_output: String,
    pub popup: Option<Popup>,

    // Display
    pub dark_mode: bool,
}

impl AppState {
    /// Without `settings`, the dark mode flag is not remembered between runs
    pub fn new(store: NameListStore, settings: Option<SettingsStore>) -> Self {
        let dark_mode = settings.as_ref().map(SettingsStore::dark_mode).unwrap_or(false);

        AppState {
            store,
            settings,
            focus: Focus::Input,
            input: String::new(),
            cursor_position: 0,
            selected: 0,
            marked: BTreeSet::new(),
            shuffle_output: String::from(SHUFFLE_LABEL),
            popup: None,
            dark_mode,
        }
    }

    /// Name under the list cursor
    pub fn highlighted(&self) -> Option<&String> {
        self.store.names().get(self.selected)
    }

    pub fn popup_kind(&self) -> PopupKind {
        self.popup.as_ref().map(Popup::kind).unwrap_or_default()
    }

    /// Keep the list cursor inside the list after it shrinks
    pub fn clamp_selection(&mut self) {
        let len = self.store.len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            names: self.store.names().to_vec(),
            marked: self.marked.clone(),
            selected: (!self.store.is_empty()).then_some(self.selected),
            focus: self.focus,
            input: self.input.clone(),
            cursor_position: self.cursor_position,
            shuffle_output: self.shuffle_output.clone(),
            popup: self.popup.clone(),
            dark_mode: self.dark_mode,
            location: self.store.location(),
        }
    }
}
