// Views module - screen-level rendering logic
//
// Layout: [tab strip] [tab content] [logs] [status]
// Tab content is either the host's Sessions list or the Launchpad tree.
// Modals and toasts are drawn last, on top of everything.

mod modal;

use super::app::App;
use crate::tui::components::{logs_panel, sessions_panel, status_bar, title_bar, tree_panel};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(7),
            Constraint::Length(2),
        ])
        .split(f.area());

    title_bar::render(f, chunks[0], app);
    if app.on_launchpad_tab() {
        tree_panel::render(f, chunks[1], app);
    } else {
        app.tree_area = None;
        sessions_panel::render(f, chunks[1], app);
    }
    logs_panel::render(f, chunks[2], app);
    status_bar::render(f, chunks[3], app);

    if let Some(modal_state) = &app.modal {
        modal::render(f, modal_state, app);
    }

    if let Some(ref toast) = app.toast {
        toast.render(f, f.area(), &app.theme);
    }

    app.clear_expired_toast();
}
