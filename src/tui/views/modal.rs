// Modal overlay rendering
//
// Modals are rendered on top of the main content:
// - Help modal: keyboard shortcuts
// - Context menu: items for the node under the cursor
// - Confirm modal: Yes/No before a delete

use crate::menu::{ContextMenu, DeleteRequest};
use crate::tui::app::App;
use crate::tui::modal::Modal;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Render a modal dialog as a centered overlay
pub fn render(f: &mut Frame, modal: &Modal, app: &App) {
    match modal {
        Modal::Help => render_help(f, app),
        Modal::ContextMenu { menu, cursor } => render_menu(f, app, menu, *cursor),
        Modal::Confirm { request, yes } => render_confirm(f, app, request, *yes),
    }
}

/// Calculate centered rect for modal dialog
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn modal_block<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight))
        .border_type(app.theme.border_type)
        .title(title)
}

fn render_help(f: &mut Frame, app: &App) {
    let key_style = Style::default().fg(app.theme.highlight);
    let desc_style = Style::default().fg(app.theme.foreground);
    let header_style = Style::default()
        .fg(app.theme.group)
        .add_modifier(Modifier::BOLD);

    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Tabs", header_style)),
        kb("Tab, 1/2", "Switch tab"),
        Line::raw(""),
        Line::from(Span::styled("  Sessions", header_style)),
        kb("↑/↓, j/k", "Move cursor"),
        kb("Space", "Mark / unmark"),
        kb("d", "Drag to Launchpad"),
        kb("c", "Open in Compose"),
        kb("x", "Discard session"),
        Line::raw(""),
        Line::from(Span::styled("  Launchpad", header_style)),
        kb("↑/↓, j/k", "Move selection"),
        kb("←/→, h/l", "Collapse / expand"),
        kb("Enter", "Compose session / toggle"),
        kb("d", "Drag selected node"),
        kb("r, F2", "Rename"),
        kb("m", "Menu for selection"),
        kb("a", "Add top-level group"),
        kb("Del", "Delete"),
        kb("Esc", "Cancel drag"),
        kb("s", "Back to Sessions"),
        kb("Paste", "Drag pasted files/text"),
        kb("Ctrl+U", "Clear the edit box"),
        Line::raw(""),
        Line::from(Span::styled("  Mouse", header_style)),
        kb("Click", "Select (double: open)"),
        kb("Right", "Context menu"),
        kb("Drag", "Drop onto a group"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("?", "Toggle this help"),
        kb("q", "Quit"),
    ]);

    let area = centered_rect(46, 37, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(app.theme.background))
        .block(
            modal_block(app, " Help ")
                .title_bottom(Line::from(" Press ? or Esc to close ").centered()),
        );
    f.render_widget(paragraph, area);
}

fn render_menu(f: &mut Frame, app: &App, menu: &ContextMenu, cursor: usize) {
    let widest = menu
        .items
        .iter()
        .map(|item| item.label.width())
        .max()
        .unwrap_or(0) as u16;

    let lines: Vec<Line> = menu
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if !item.enabled {
                Style::default().fg(app.theme.dead)
            } else if i == cursor {
                app.theme.selection()
            } else {
                Style::default().fg(app.theme.foreground)
            };
            Line::styled(format!(" {} ", item.label), style)
        })
        .collect();

    let area = centered_rect(widest + 4, menu.items.len() as u16 + 2, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .style(Style::default().bg(app.theme.background))
            .block(modal_block(app, " Menu ")),
        area,
    );
}

fn render_confirm(f: &mut Frame, app: &App, request: &DeleteRequest, yes: bool) {
    let button = |label: &'static str, focused: bool| {
        if focused {
            Span::styled(label, app.theme.selection())
        } else {
            Span::styled(label, Style::default().fg(app.theme.foreground))
        }
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::raw(format!("  {}", request.message)),
        Line::raw(""),
        Line::from(vec![
            Span::raw("      "),
            button(" Yes ", yes),
            Span::raw("   "),
            button(" No ", !yes),
        ]),
    ]);

    let title = format!(" {} ", request.title);
    let area = centered_rect(52, 8, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(content)
            .wrap(Wrap { trim: false })
            .style(Style::default().bg(app.theme.background))
            .block(
                modal_block(app, &title)
                    .title_bottom(Line::from(" y/n · ←/→ · Enter ").centered()),
            ),
        area,
    );
}
