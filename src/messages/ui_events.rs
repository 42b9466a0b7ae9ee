//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Which widget receives plain key presses
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Focus {
    /// The "Enter a name" line
    #[default]
    Input,
    /// The list of saved names
    List,
}

impl Focus {
    pub fn toggle(self) -> Focus {
        match self {
            Focus::Input => Focus::List,
            Focus::List => Focus::Input,
        }
    }
}

/// Kind of popup currently covering the screen, if any
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum PopupKind {
    #[default]
    None,
    Help,
    Confirm,
    Message,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    // Focus
    ToggleFocus,
    FocusInput,
    FocusList,

    // Name input
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    SubmitName,

    // Name list
    SelectNext,
    SelectPrev,
    ToggleMark,
    RequestRemove,
    RequestClear,
    Shuffle,

    // Popups
    Confirm,
    Cancel,
    DismissPopup,
    ToggleHelp,

    // Display
    ToggleDarkMode,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, focus: Focus, popup: PopupKind) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('s') if popup == PopupKind::None => return Some(UiEvent::Shuffle),
            _ => {}
        }
    }

    // Popups swallow everything
    match popup {
        PopupKind::Help | PopupKind::Message => return Some(UiEvent::DismissPopup),
        PopupKind::Confirm => {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(UiEvent::Confirm),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(UiEvent::Cancel),
                _ => None,
            };
        }
        PopupKind::None => {}
    }

    match focus {
        Focus::Input => handle_input_keys(key),
        Focus::List => handle_list_keys(key),
    }
}

fn handle_input_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Enter => Some(UiEvent::SubmitName),
        KeyCode::Esc => Some(UiEvent::FocusList),
        KeyCode::Tab | KeyCode::BackTab => Some(UiEvent::ToggleFocus),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Down => Some(UiEvent::FocusList),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}

fn handle_list_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Tab | KeyCode::BackTab => Some(UiEvent::ToggleFocus),
        KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Char('e') => Some(UiEvent::FocusInput),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
        KeyCode::Char(' ') => Some(UiEvent::ToggleMark),
        KeyCode::Char('d') | KeyCode::Delete => Some(UiEvent::RequestRemove),
        KeyCode::Char('c') => Some(UiEvent::RequestClear),
        KeyCode::Char('s') | KeyCode::Enter => Some(UiEvent::Shuffle),
        KeyCode::Char('m') => Some(UiEvent::ToggleDarkMode),
        _ => None,
    }
}
