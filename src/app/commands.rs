//! Command handlers - business logic for processing UI events

use std::collections::BTreeSet;

use crate::app::state::{format_shuffled, MessageLevel, PendingAction, Popup};
use crate::app::AppState;
use crate::messages::ui_events::Focus;
use crate::messages::UiEvent;
use crate::settings::WindowSize;

impl AppState {
    /// Handle a UI event, returns true if quit was requested
    pub fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Focus
            UiEvent::ToggleFocus => self.focus = self.focus.toggle(),
            UiEvent::FocusInput => self.focus = Focus::Input,
            UiEvent::FocusList => self.focus = Focus::List,

            // Name input
            UiEvent::CharInput(c) => self.enter_char(c),
            UiEvent::Backspace => self.delete_char(),
            UiEvent::CursorLeft => self.move_cursor_left(),
            UiEvent::CursorRight => self.move_cursor_right(),
            UiEvent::SubmitName => self.submit_name(),

            // Name list
            UiEvent::SelectNext => self.select_next(),
            UiEvent::SelectPrev => self.select_prev(),
            UiEvent::ToggleMark => self.toggle_mark(),
            UiEvent::RequestRemove => self.request_remove(),
            UiEvent::RequestClear => self.request_clear(),
            UiEvent::Shuffle => self.shuffle(),

            // Popups
            UiEvent::Confirm => self.confirm(),
            UiEvent::Cancel | UiEvent::DismissPopup => self.popup = None,
            UiEvent::ToggleHelp => self.toggle_help(),

            // Display
            UiEvent::ToggleDarkMode => self.toggle_dark_mode(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }

    // ========================
    // Input editing
    // ========================

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position = self.input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.len() {
            self.cursor_position = self.input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(self.input.len());
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if self.cursor_position <= self.input.len() {
            self.input.insert(self.cursor_position, c);
            self.cursor_position += c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let prev_pos = self.input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    /// Add the typed name. The line is cleared unless the save failed, so
    /// the user can retry without retyping.
    pub fn submit_name(&mut self) {
        let name = self.input.trim().to_string();

        match self.store.add(&name) {
            Ok(names) => {
                if let Some(pos) = names.iter().position(|n| *n == name) {
                    self.selected = pos;
                }
                self.input.clear();
                self.cursor_position = 0;
            }
            Err(e) => self.show_message(MessageLevel::Error, "Save Failed", e.to_string()),
        }
        self.focus = Focus::Input;
    }

    // ========================
    // Name list
    // ========================

    pub fn select_next(&mut self) {
        let len = self.store.len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.store.len();
        if len > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(len - 1);
        }
    }

    pub fn toggle_mark(&mut self) {
        if let Some(name) = self.highlighted().cloned() {
            if !self.marked.remove(&name) {
                self.marked.insert(name);
            }
        }
    }

    /// Ask before removing the marked names, or the highlighted one when
    /// nothing is marked
    pub fn request_remove(&mut self) {
        let targets: BTreeSet<String> = if self.marked.is_empty() {
            self.highlighted().cloned().into_iter().collect()
        } else {
            self.marked.clone()
        };

        if targets.is_empty() {
            self.show_message(MessageLevel::Warning, "Remove Name", "Select a name to remove.");
            return;
        }

        self.popup = Some(Popup::Confirm(PendingAction::Remove(targets)));
    }

    pub fn request_clear(&mut self) {
        self.popup = Some(Popup::Confirm(PendingAction::ClearAll));
    }

    /// Carry out the pending action the user just agreed to
    pub fn confirm(&mut self) {
        let action = match self.popup.take() {
            Some(Popup::Confirm(action)) => action,
            other => {
                self.popup = other;
                return;
            }
        };

        let result = match &action {
            PendingAction::Remove(targets) => self.store.remove(targets).map(|_| ()),
            PendingAction::ClearAll => self.store.clear(),
        };

        match result {
            Ok(()) => {
                let store = &self.store;
                self.marked.retain(|n| store.contains(n));
                self.clamp_selection();
            }
            Err(e) => self.show_message(MessageLevel::Error, "Save Failed", e.to_string()),
        }
    }

    pub fn shuffle(&mut self) {
        let order = self.store.shuffle();
        self.shuffle_output = format_shuffled(&order);

        if !order.is_empty() {
            self.show_message(MessageLevel::Info, "Shuffle Complete", "Names have been shuffled!");
        }
    }

    // ========================
    // Display & settings
    // ========================

    pub fn toggle_help(&mut self) {
        self.popup = match self.popup {
            Some(Popup::Help) => None,
            _ => Some(Popup::Help),
        };
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;

        let result = match self.settings.as_mut() {
            Some(settings) => settings.set_dark_mode(self.dark_mode),
            None => Ok(()),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "Could not remember dark mode");
            self.show_message(MessageLevel::Warning, "Settings", e.to_string());
        }
    }

    /// Remember the terminal size for the next start
    pub fn record_window_size(&mut self, size: WindowSize) {
        if let Some(settings) = self.settings.as_mut() {
            if let Err(e) = settings.set_window_size(size) {
                tracing::warn!(error = %e, "Could not save window size");
            }
        }
    }

    pub fn show_message(&mut self, level: MessageLevel, title: &str, text: impl Into<String>) {
        self.popup = Some(Popup::Message {
            level,
            title: title.to_string(),
            text: text.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingsStore;
    use crate::storage::{JsonFileBackend, MemoryBackend, NameListStore};
    use tempfile::tempdir;

    fn state_with(names: &[&str]) -> (AppState, MemoryBackend) {
        let backend = MemoryBackend::with_names(names.iter().copied());
        let store = NameListStore::open(backend.clone()).unwrap();
        (AppState::new(store, None), backend)
    }

    fn type_name(state: &mut AppState, text: &str) {
        for c in text.chars() {
            state.handle_ui_event(UiEvent::CharInput(c));
        }
    }

    #[test]
    fn test_typed_name_is_added_and_input_cleared() {
        let (mut state, backend) = state_with(&["Bob"]);
        type_name(&mut state, "  Alice ");
        state.handle_ui_event(UiEvent::SubmitName);

        assert_eq!(state.store.names(), ["Alice", "Bob"]);
        assert_eq!(backend.saved().unwrap(), ["Alice", "Bob"]);
        assert!(state.input.is_empty());
        assert_eq!(state.cursor_position, 0);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_cursor_editing_handles_multibyte() {
        let (mut state, _) = state_with(&[]);
        type_name(&mut state, "Zoë");
        state.handle_ui_event(UiEvent::CursorLeft);
        state.handle_ui_event(UiEvent::Backspace);
        assert_eq!(state.input, "Zë");
        state.handle_ui_event(UiEvent::CursorRight);
        assert_eq!(state.cursor_position, state.input.len());
    }

    #[test]
    fn test_remove_waits_for_confirmation() {
        let (mut state, backend) = state_with(&["Alice", "Bob"]);
        state.handle_ui_event(UiEvent::FocusList);
        state.handle_ui_event(UiEvent::RequestRemove);

        assert!(matches!(state.popup, Some(Popup::Confirm(PendingAction::Remove(_)))));
        assert_eq!(state.store.len(), 2);

        state.handle_ui_event(UiEvent::Cancel);
        assert!(state.popup.is_none());
        assert_eq!(backend.saved().unwrap(), ["Alice", "Bob"]);

        state.handle_ui_event(UiEvent::RequestRemove);
        state.handle_ui_event(UiEvent::Confirm);
        assert_eq!(state.store.names(), ["Bob"]);
        assert_eq!(backend.saved().unwrap(), ["Bob"]);
    }

    #[test]
    fn test_marked_names_are_removed_together() {
        let (mut state, _) = state_with(&["Alice", "Bob", "Carol"]);
        state.handle_ui_event(UiEvent::ToggleMark);
        state.handle_ui_event(UiEvent::SelectNext);
        state.handle_ui_event(UiEvent::SelectNext);
        state.handle_ui_event(UiEvent::ToggleMark);
        state.handle_ui_event(UiEvent::RequestRemove);
        state.handle_ui_event(UiEvent::Confirm);

        assert_eq!(state.store.names(), ["Bob"]);
        assert!(state.marked.is_empty());
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_remove_on_empty_list_warns() {
        let (mut state, _) = state_with(&[]);
        state.handle_ui_event(UiEvent::RequestRemove);
        assert!(matches!(
            state.popup,
            Some(Popup::Message { level: MessageLevel::Warning, .. })
        ));
    }

    #[test]
    fn test_clear_all_after_confirmation() {
        let (mut state, backend) = state_with(&["Alice", "Bob"]);
        state.handle_ui_event(UiEvent::RequestClear);
        state.handle_ui_event(UiEvent::Confirm);

        assert!(state.store.is_empty());
        assert_eq!(backend.saved(), Some(Vec::new()));
    }

    #[test]
    fn test_shuffle_output() {
        let (mut state, _) = state_with(&[]);
        state.handle_ui_event(UiEvent::Shuffle);
        assert_eq!(state.shuffle_output, "Shuffled Order: (empty)");
        assert!(state.popup.is_none());

        let (mut state, _) = state_with(&["A", "B", "C"]);
        state.handle_ui_event(UiEvent::Shuffle);
        let listed = state.shuffle_output.trim_start_matches("Shuffled Order: ");
        let mut names: Vec<&str> = listed.split(", ").collect();
        names.sort();
        assert_eq!(names, ["A", "B", "C"]);
        assert!(matches!(state.popup, Some(Popup::Message { level: MessageLevel::Info, .. })));
        assert_eq!(state.store.names(), ["A", "B", "C"]);
    }

    #[test]
    fn test_failed_save_shows_error_and_keeps_input() {
        let dir = tempdir().unwrap();
        let store = NameListStore::open(JsonFileBackend::new(dir.path().join("names.json"))).unwrap();
        std::fs::create_dir(dir.path().join("names.json.tmp")).unwrap();
        let mut state = AppState::new(store, None);

        type_name(&mut state, "Alice");
        state.handle_ui_event(UiEvent::SubmitName);

        assert!(matches!(state.popup, Some(Popup::Message { level: MessageLevel::Error, .. })));
        assert_eq!(state.input, "Alice");
        assert!(state.store.is_empty());
    }

    #[test]
    fn test_dark_mode_is_remembered() {
        let dir = tempdir().unwrap();
        let settings_path = dir.path().join("settings.json");
        let store = NameListStore::open(MemoryBackend::new()).unwrap();
        let mut state = AppState::new(store, Some(SettingsStore::open(&settings_path).unwrap()));

        state.handle_ui_event(UiEvent::ToggleDarkMode);
        state.record_window_size(WindowSize { cols: 90, rows: 30 });

        let settings = SettingsStore::open(&settings_path).unwrap();
        assert!(settings.dark_mode());
        assert_eq!(settings.window_size(), Some(WindowSize { cols: 90, rows: 30 }));
    }

    #[test]
    fn test_quit() {
        let (mut state, _) = state_with(&[]);
        assert!(!state.handle_ui_event(UiEvent::ToggleHelp));
        assert!(state.handle_ui_event(UiEvent::Quit));
    }
}
