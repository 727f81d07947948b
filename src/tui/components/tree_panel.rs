// Tree panel component
//
// Draws the Launchpad group tree: one row per visible node, indented by
// depth. The open edit box replaces its row's label, and while a drag is in
// flight the row under the drag is tinted valid or invalid.

use crate::dragdrop::DragState;
use crate::launchpad::Launchpad;
use crate::tree::{NodeKind, VisibleRow};
use crate::tui::app::App;
use crate::util::truncate_to_width;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Text of one tree row, without styling
pub fn row_text(view: &Launchpad, row: &VisibleRow) -> String {
    let tree = view.tree();
    let indent = "  ".repeat(row.depth);
    let glyph = match tree.kind(row.id) {
        NodeKind::InnerNode => {
            let expanded = tree.get(row.id).is_some_and(|n| n.is_expanded());
            match (expanded, tree.children(row.id).is_empty()) {
                (_, true) => "▫",
                (true, false) => "▾",
                (false, false) => "▸",
            }
        }
        NodeKind::SessionNode => "•",
        NodeKind::None => "✗",
    };

    let label = match view.rename().editing_node() {
        Some(node) if node == row.id => {
            format!("[{}▏]", view.rename().buffer().unwrap_or_default())
        }
        _ => tree.label(row.id).unwrap_or_default().to_string(),
    };
    format!("{}{} {}", indent, glyph, label)
}

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(app.theme.panel_border(true))
        .title(" Groups ");
    let inner = block.inner(area);
    app.tree_area = Some(inner);

    if app.view().tree().is_empty() {
        let hint = Line::styled(
            "No groups (press a to add one)",
            Style::default().fg(app.theme.muted),
        );
        f.render_widget(block, area);
        f.render_widget(Paragraph::new(hint), inner);
        return;
    }

    let rows = app.view().visible_rows();
    let height = usize::from(inner.height);

    // Keep the selection on screen
    if let Some(selected) = app.view().selected_row() {
        if selected < app.tree_scroll {
            app.tree_scroll = selected;
        } else if height > 0 && selected >= app.tree_scroll + height {
            app.tree_scroll = selected + 1 - height;
        }
    }
    app.tree_scroll = app.tree_scroll.min(rows.len().saturating_sub(1));

    let view = app.view();
    let theme = &app.theme;
    let selected = view.selected();
    let drop_target = match view.drag().state() {
        DragState::OverValid(id) => Some((id, theme.drop_valid)),
        DragState::OverInvalid(id) => Some((id, theme.drop_invalid)),
        _ => None,
    };

    let lines: Vec<Line> = rows
        .iter()
        .skip(app.tree_scroll)
        .take(height)
        .map(|row| {
            let text = truncate_to_width(&row_text(view, row), usize::from(inner.width));
            let base = match view.tree().kind(row.id) {
                NodeKind::InnerNode => Style::default()
                    .fg(theme.group)
                    .add_modifier(Modifier::BOLD),
                NodeKind::SessionNode => Style::default().fg(theme.session),
                NodeKind::None => Style::default()
                    .fg(theme.dead)
                    .add_modifier(Modifier::CROSSED_OUT),
            };
            let style = match drop_target {
                Some((id, color)) if id == row.id => base.bg(color),
                _ if selected == Some(row.id) => theme.selection(),
                _ => base,
            };
            Line::styled(text, style)
        })
        .collect();

    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use std::sync::Arc;

    #[test]
    fn test_row_text_shows_structure_and_edit_box() {
        let mut view = Launchpad::new("Root", "New group");
        let root = view.tree().roots()[0];
        let session = Arc::new(Session::new(1, "h/a", "http://h/a", "GET"));
        view.begin_external_drag(vec![Arc::clone(&session)]);
        view.drop_on(Some(root));

        let rows = view.visible_rows();
        assert_eq!(row_text(&view, &rows[0]), "▾ Root");
        assert_eq!(row_text(&view, &rows[1]), "  • h/a");

        view.begin_rename(root);
        assert_eq!(row_text(&view, &rows[0]), "▾ [Root▏]");

        drop(session);
        assert_eq!(row_text(&view, &rows[1]), "  ✗ h/a");
    }
}
