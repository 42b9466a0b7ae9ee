//! Shared terminal plumbing and widgets for both applications

use std::io::{self, Stdout};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};

use crate::app::state::MessageLevel;

/// Terminal cleanup guard
pub struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Switch to raw mode on the alternate screen. Dropping the guard undoes it,
/// also when the caller bails out with an error.
pub fn init_terminal() -> io::Result<(Terminal<CrosstermBackend<Stdout>>, TerminalGuard)> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let guard = TerminalGuard;

    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok((terminal, guard))
}

/// Colors for one display mode
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub widget_background: Color,
    pub widget_foreground: Color,
    pub border: Color,
    pub accent: Color,
    pub editing: Color,
    pub muted: Color,
}

impl Theme {
    pub fn light() -> Self {
        Theme {
            background: Color::Reset,
            foreground: Color::Reset,
            widget_background: Color::Reset,
            widget_foreground: Color::Reset,
            border: Color::Reset,
            accent: Color::Cyan,
            editing: Color::Yellow,
            muted: Color::DarkGray,
        }
    }

    pub fn dark() -> Self {
        Theme {
            background: Color::Rgb(0x12, 0x12, 0x12),
            foreground: Color::Rgb(0xf0, 0xf0, 0xf0),
            widget_background: Color::Rgb(0x2e, 0x2e, 0x2e),
            widget_foreground: Color::Rgb(0xff, 0xff, 0xff),
            border: Color::Rgb(0x44, 0x44, 0x44),
            accent: Color::Cyan,
            editing: Color::Yellow,
            muted: Color::Gray,
        }
    }

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }

    pub fn with_accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }

    /// Whole-screen style
    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    /// Style for inputs and lists
    pub fn widget(&self) -> Style {
        Style::default().fg(self.widget_foreground).bg(self.widget_background)
    }

    /// Bordered block in the widget colors, highlighted when focused
    pub fn block<'a>(&self, title: impl Into<Line<'a>>, focused: bool) -> Block<'a> {
        let border = if focused { self.accent } else { self.border };
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(self.widget())
            .title(title)
    }
}

/// Title color of a message popup
pub fn message_color(level: MessageLevel) -> Color {
    match level {
        MessageLevel::Info => Color::Green,
        MessageLevel::Warning => Color::Yellow,
        MessageLevel::Error => Color::Red,
    }
}

/// Draw a bordered popup with `text` centered over `area`
pub fn draw_popup(
    f: &mut Frame,
    area: Rect,
    title: &str,
    title_color: Color,
    text: Text<'_>,
    theme: &Theme,
) {
    let popup_area = centered_rect(60, 30, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(title_color))
        .title(Span::styled(format!(" {} ", title), Style::default().fg(title_color).bold()))
        .style(theme.widget());

    let body = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(body, popup_area);
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
