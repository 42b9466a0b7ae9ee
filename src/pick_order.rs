//! MTG Jumpstart pick order randomizer
//!
//! Choose how many players sit at the table and draw a random pick order.

use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{prelude::*, widgets::*};

use jumpstart_tui::constants::{APP_VERSION, PICK_ORDER_LOG_FILE, PICK_ORDER_TITLE};
use jumpstart_tui::picker::{MAX_PLAYERS, MIN_PLAYERS};
use jumpstart_tui::ui::{self, Theme};
use jumpstart_tui::{format_pick_order, logging, Config, PickOrder};

const ACCENT: Color = Color::Rgb(0x4c, 0xaf, 0x50);
const RANDOMIZED_STATUS: &str = "Pick order has been randomized!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PickEvent {
    MorePlayers,
    FewerPlayers,
    Randomize,
    Quit,
}

/// Everything the pick order screen shows
#[derive(Debug, Default)]
struct PickState {
    order: PickOrder,
    results: Vec<String>,
    status: String,
}

impl PickState {
    /// Returns true if quit was requested
    fn handle(&mut self, event: PickEvent) -> bool {
        match event {
            PickEvent::MorePlayers => self.order.increment(),
            PickEvent::FewerPlayers => self.order.decrement(),
            PickEvent::Randomize => self.randomize(),
            PickEvent::Quit => return true,
        }
        false
    }

    fn randomize(&mut self) {
        let order = self.order.randomize();
        tracing::info!(players = self.order.players(), ?order, "Randomized pick order");
        self.results = format_pick_order(&order);
        self.status = String::from(RANDOMIZED_STATUS);
    }
}

fn key_to_pick_event(key: KeyEvent) -> Option<PickEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(PickEvent::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('k') => {
            Some(PickEvent::MorePlayers)
        }
        KeyCode::Down | KeyCode::Left | KeyCode::Char('-') | KeyCode::Char('j') => {
            Some(PickEvent::FewerPlayers)
        }
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r') => Some(PickEvent::Randomize),
        KeyCode::Char('q') | KeyCode::Esc => Some(PickEvent::Quit),
        _ => None,
    }
}

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    let _log_guard = logging::init(config.data_dir(), PICK_ORDER_LOG_FILE)?;
    tracing::info!(version = APP_VERSION, "Starting pick order randomizer");

    let (mut terminal, _guard) = ui::init_terminal().context("setting up terminal")?;
    let mut state = PickState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &state))?;

        if let Event::Key(key) = event::read()? {
            if let Some(event) = key_to_pick_event(key) {
                if state.handle(event) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn draw_ui(f: &mut Frame, state: &PickState) {
    let theme = Theme::light().with_accent(ACCENT);
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Player count
            Constraint::Length(3), // Randomize button
            Constraint::Min(3),    // Results
            Constraint::Length(1), // Status
            Constraint::Length(1), // Keys
        ])
        .split(area);

    let title = Paragraph::new(PICK_ORDER_TITLE)
        .style(Style::default().bold())
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let players = state.order.players();
    let spinner = Line::from(vec![
        Span::raw("Number of Players: "),
        Span::styled(
            if players > MIN_PLAYERS { "◀ " } else { "  " },
            Style::default().fg(theme.muted),
        ),
        Span::styled(players.to_string(), Style::default().fg(theme.accent).bold()),
        Span::styled(
            if players < MAX_PLAYERS { " ▶" } else { "  " },
            Style::default().fg(theme.muted),
        ),
    ]);
    f.render_widget(Paragraph::new(spinner).block(theme.block("", true)), chunks[1]);

    let button = Paragraph::new(" Randomize Pick Order ")
        .style(Style::default().fg(Color::White).bg(ACCENT).bold())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(ACCENT)));
    f.render_widget(button, chunks[2]);

    let items: Vec<ListItem> = state.results.iter().map(|r| ListItem::new(r.as_str())).collect();
    let results = List::new(items).block(theme.block(" Pick Order ", false));
    f.render_widget(results, chunks[3]);

    let status = Paragraph::new(state.status.as_str())
        .style(Style::default().fg(ACCENT))
        .alignment(Alignment::Center);
    f.render_widget(status, chunks[4]);

    let keys = Paragraph::new(" ↑/↓:players | Enter:randomize | q:quit ")
        .style(Style::default().fg(theme.muted));
    f.render_widget(keys, chunks[5]);
}
