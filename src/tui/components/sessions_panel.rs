// Sessions panel component
//
// The host's list of captured sessions. Marked rows are carried together
// when a drag starts.

use crate::alias;
use crate::session::Session;
use crate::tui::app::App;
use crate::util::truncate_to_width;
use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Text of one session row, without styling
pub fn row_text(session: &Session, marked: bool) -> String {
    let mark = if marked { "[x]" } else { "[ ]" };
    let method = session.request_method.to_uppercase();
    match alias::alias(session) {
        Some(alias) => format!(
            "{} #{:<4} {:<7} {}  ({})",
            mark, session.id, method, session.url, alias
        ),
        None => format!("{} #{:<4} {:<7} {}", mark, session.id, method, session.url),
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(app.theme.panel_border(true))
        .title(format!(" Captured sessions ({}) ", app.store.len()));
    let inner = block.inner(area);
    let height = usize::from(inner.height);

    // Scroll just enough to keep the cursor visible
    let offset = (app.sessions_cursor + 1).saturating_sub(height);

    let lines: Vec<Line> = if app.store.is_empty() {
        vec![Line::styled(
            "No sessions captured yet (try --demo or --sessions FILE)",
            Style::default().fg(app.theme.muted),
        )]
    } else {
        app.store
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
            .map(|(i, session)| {
                let text = row_text(session, app.marked.contains(&session.id));
                let text = truncate_to_width(&text, usize::from(inner.width));
                let style = if i == app.sessions_cursor {
                    app.theme.selection()
                } else {
                    Style::default().fg(app.theme.foreground)
                };
                Line::styled(text, style)
            })
            .collect()
    };

    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_text_shows_mark_method_and_alias() {
        let session = Session::new(7, "h/login", "https://h/login", "post");
        assert_eq!(row_text(&session, false), "[ ] #7    POST    h/login");

        alias::set_alias(&session, Some("Login"));
        assert_eq!(
            row_text(&session, true),
            "[x] #7    POST    h/login  (Login)"
        );
    }
}
