// Title bar component
//
// Renders the host's tab strip. The selected tab is highlighted.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = app
        .shell
        .tabs()
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let label = match tab.icon {
                Some(icon) => format!("{} {} {}", i + 1, icon, tab.title),
                None => format!("{} {}", i + 1, tab.title),
            };
            Line::from(label)
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.shell.selected_tab())
        .style(Style::default().fg(app.theme.muted))
        .highlight_style(
            Style::default()
                .fg(app.theme.highlight)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border))
                .title(" Launchpad ")
                .title_top(Line::from(" ? ").right_aligned()),
        );

    f.render_widget(tabs, area);
}
