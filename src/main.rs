//! Jumpstart Randomizer - keeps the table's player names and shuffles them
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - state machine applying UI events to the name list store

use std::io;

use anyhow::Context;
use crossterm::{
    event::{self, Event},
    execute, terminal,
};
use ratatui::{prelude::*, widgets::*};

use jumpstart_tui::app::state::Popup;
use jumpstart_tui::constants::{APP_NAME, APP_VERSION, NAMES_LOG_FILE};
use jumpstart_tui::messages::ui_events::{key_to_ui_event, Focus};
use jumpstart_tui::ui::{self, draw_popup, message_color, Theme};
use jumpstart_tui::{
    logging, AppState, Config, JsonFileBackend, NameListStore, RenderState, SettingsStore, WindowSize,
};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    let _log_guard = logging::init(config.data_dir(), NAMES_LOG_FILE)?;
    tracing::info!(version = APP_VERSION, data_dir = %config.data_dir().display(), "Starting");

    let store = NameListStore::open(JsonFileBackend::new(config.names_path()))
        .context("loading saved names")?;

    // Settings are cosmetic; a broken file only costs the remembered layout
    let settings = match SettingsStore::open(config.settings_path()) {
        Ok(settings) => Some(settings),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring unreadable settings");
            None
        }
    };

    if let Some(size) = settings.as_ref().and_then(SettingsStore::window_size) {
        restore_window_size(size);
    }

    let mut state = AppState::new(store, settings);

    let (mut terminal, _guard) = ui::init_terminal().context("setting up terminal")?;
    run_ui_loop(&mut terminal, &mut state)?;

    match terminal::size() {
        Ok((cols, rows)) => state.record_window_size(WindowSize { cols, rows }),
        Err(e) => tracing::warn!(error = %e, "Could not read terminal size"),
    }

    tracing::info!(count = state.store.len(), "Exiting");
    Ok(())
}

/// Ask the terminal to take its previous size. Many terminals ignore this.
fn restore_window_size(size: WindowSize) {
    if let Err(e) = execute!(io::stdout(), terminal::SetSize(size.cols, size.rows)) {
        tracing::debug!(error = %e, "Terminal refused resize");
    }
}

/// Run the synchronous UI loop until quit is requested
fn run_ui_loop(terminal: &mut Terminal<impl Backend>, state: &mut AppState) -> anyhow::Result<()> {
    loop {
        let render = state.to_render_state();
        terminal.draw(|f| draw_ui(f, &render))?;

        // Blocks until input; resize events just fall through to a redraw
        if let Event::Key(key) = event::read()? {
            if let Some(event) = key_to_ui_event(key, render.focus, render.popup_kind()) {
                if state.handle_ui_event(event) {
                    break;
                }
            }
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let theme = Theme::for_mode(state.dark_mode);
    let area = f.area();

    f.render_widget(Block::default().style(theme.base()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Name input
            Constraint::Min(3),    // Names
            Constraint::Length(3), // Shuffle output
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title(f, state, &theme, chunks[0]);
    draw_input(f, state, &theme, chunks[1]);
    draw_names(f, state, &theme, chunks[2]);
    draw_shuffle_output(f, state, &theme, chunks[3]);
    draw_status_bar(f, state, &theme, chunks[4]);

    match &state.popup {
        Some(Popup::Help) => draw_help_popup(f, &theme, area),
        Some(Popup::Confirm(action)) => {
            let text = Text::from(vec![
                Line::from(""),
                Line::from(action.prompt()),
                Line::from(""),
                Line::from(Span::styled("y: yes    n: no", Style::default().fg(theme.muted))),
            ]);
            draw_popup(f, area, action.title(), theme.editing, text, &theme);
        }
        Some(Popup::Message { level, title, text }) => {
            let text = Text::from(vec![
                Line::from(""),
                Line::from(text.as_str()),
                Line::from(""),
                Line::from(Span::styled("press any key", Style::default().fg(theme.muted))),
            ]);
            draw_popup(f, area, title, message_color(*level), text, &theme);
        }
        None => {}
    }
}

fn draw_title(f: &mut Frame, state: &RenderState, theme: &Theme, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {} ", APP_NAME),
        Style::default().fg(Color::Black).bg(theme.accent).bold(),
    )];
    if state.dark_mode {
        spans.push(Span::styled(" [dark mode]", Style::default().fg(theme.muted)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_input(f: &mut Frame, state: &RenderState, theme: &Theme, area: Rect) {
    let is_focused = state.focus == Focus::Input;
    let mut block = theme.block(" Name (Enter to add) ", is_focused);
    if is_focused {
        block = block.border_style(Style::default().fg(theme.editing));
    }

    let content = if state.input.is_empty() && !is_focused {
        Line::from(Span::styled("Enter a name", Style::default().fg(theme.muted)))
    } else {
        Line::from(state.input.as_str())
    };
    f.render_widget(Paragraph::new(content).block(block), area);

    if is_focused && state.popup.is_none() {
        let typed = state.input[..state.cursor_position].chars().count() as u16;
        let max_x = area.x + area.width.saturating_sub(2);
        let cursor_x = (area.x + typed + 1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

fn draw_names(f: &mut Frame, state: &RenderState, theme: &Theme, area: Rect) {
    let is_focused = state.focus == Focus::List;
    let title = format!(" Names ({}) ", state.names.len());

    if state.names.is_empty() {
        let hint = Paragraph::new("No names yet. Type one above and press Enter.")
            .style(Style::default().fg(theme.muted))
            .block(theme.block(title, is_focused));
        f.render_widget(hint, area);
        return;
    }

    let items: Vec<ListItem> = state
        .names
        .iter()
        .map(|name| {
            let marked = state.marked.contains(name);
            let prefix = if marked { "[x] " } else { "[ ] " };
            let style = if marked {
                Style::default().fg(theme.editing)
            } else {
                Style::default()
            };
            ListItem::new(format!("{}{}", prefix, name)).style(style)
        })
        .collect();

    let highlight_style = if is_focused {
        Style::default().fg(theme.accent).bold().reversed()
    } else {
        Style::default().bold()
    };

    let list = List::new(items)
        .block(theme.block(title, is_focused))
        .highlight_style(highlight_style);

    let mut list_state = ListState::default();
    list_state.select(state.selected);
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_shuffle_output(f: &mut Frame, state: &RenderState, theme: &Theme, area: Rect) {
    let output = Paragraph::new(state.shuffle_output.as_str())
        .block(theme.block(" Shuffle ", false))
        .wrap(Wrap { trim: true });
    f.render_widget(output, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, theme: &Theme, area: Rect) {
    let keys = match state.focus {
        Focus::Input => " Enter:add | Tab/Esc:list | Ctrl+S:shuffle | Ctrl+C:quit ",
        Focus::List => {
            " ↑/↓:move | Space:mark | d:remove | c:clear | s:shuffle | m:dark | a:add | ?:help | q:quit "
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(state.location.len() as u16 + 2)])
        .split(area);

    let muted = Style::default().fg(theme.muted);
    f.render_widget(Paragraph::new(keys).style(muted), chunks[0]);
    f.render_widget(
        Paragraph::new(format!("{} ", state.location))
            .style(muted)
            .alignment(Alignment::Right),
        chunks[1],
    );
}

fn draw_help_popup(f: &mut Frame, theme: &Theme, area: Rect) {
    let popup_area = ui::centered_rect(60, 70, area);

    let help_text = r#"
 JUMPSTART RANDOMIZER - Keyboard Shortcuts

 NAME INPUT
   Enter              Add the typed name
   Tab / Esc / ↓      Go to the name list
   Ctrl+S             Shuffle

 NAME LIST
   ↑ / ↓  (k / j)     Move
   Space              Mark / unmark for removal
   d / Delete         Remove marked (or highlighted) names
   c                  Clear all names
   s / Enter          Shuffle
   m                  Toggle dark mode
   a / i / Tab        Back to the name input

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(theme.widget());

    let help = Paragraph::new(help_text).block(block).wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}
