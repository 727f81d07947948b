// Logs panel component
//
// Shows the newest entries from the in-memory log buffer, one per line.

use crate::logging::LogEntry;
use crate::tui::app::App;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let rows = usize::from(area.height.saturating_sub(2));
    let entries = app.log_buffer.tail(rows);
    let lines: Vec<Line> = entries
        .iter()
        .map(|entry| format_line(entry, &app.theme))
        .collect();

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(app.theme.panel_border(false))
            .title(format!(" Logs ({}) ", app.log_buffer.len())),
    );
    f.render_widget(panel, area);
}

fn format_line<'a>(entry: &'a LogEntry, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            entry.timestamp.format("%H:%M:%S ").to_string(),
            Style::default().fg(theme.muted),
        ),
        Span::styled(
            format!("{:<5} ", entry.level.as_str()),
            Style::default().fg(theme.log_level(entry.level)),
        ),
        Span::raw(entry.message.as_str()),
    ])
}
