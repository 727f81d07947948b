// Status bar component
//
// Renders context-sensitive key hints, the drag state and the compose queue.

use crate::dragdrop::DragState;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Status line text for the current state
pub fn status_text(app: &App) -> String {
    let view = app.view();

    let hints = if view.rename().is_editing() {
        "Enter save · Esc cancel · Ctrl+U clear"
    } else if view.drag().is_dragging() {
        "↑/↓ target · Enter drop · Esc cancel"
    } else if app.on_launchpad_tab() {
        "↑/↓ move · Enter open · d drag · r rename · m menu · a add group · Del delete · s sessions"
    } else {
        "↑/↓ move · Space mark · d drag to Launchpad · c compose · x discard"
    };

    let drag = match view.drag().state() {
        DragState::OverValid(_) => " │ drop: copy",
        DragState::OverInvalid(_) => " │ drop: not here",
        DragState::Dragging => " │ dragging",
        _ => "",
    };

    format!(
        " {} │ {} session(s) │ compose queue {}{} │ {}",
        app.uptime(),
        app.store.len(),
        app.host.compose_queue().len(),
        drag,
        hints,
    )
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let status = Paragraph::new(status_text(app))
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
