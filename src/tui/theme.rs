// Theme for the TUI
//
// One fixed palette. Every widget pulls its colors from here instead of
// naming colors inline.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub highlight: Color,
    pub muted: Color,
    pub group: Color,
    pub session: Color,
    pub dead: Color,
    pub drop_valid: Color,
    pub drop_invalid: Color,
    pub status_bar: Color,
    pub border_type: BorderType,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::White,
            border: Color::DarkGray,
            highlight: Color::Cyan,
            muted: Color::Gray,
            group: Color::Yellow,
            session: Color::White,
            dead: Color::DarkGray,
            drop_valid: Color::Green,
            drop_invalid: Color::Red,
            status_bar: Color::Gray,
            border_type: BorderType::Rounded,
        }
    }
}

impl Theme {
    /// Style of the selected row
    pub fn selection(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::REVERSED)
    }

    /// Border style for a panel, brighter when it has focus
    pub fn panel_border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.highlight)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn log_level(&self, level: crate::logging::LogLevel) -> Color {
        use crate::logging::LogLevel;
        match level {
            LogLevel::Error => Color::Red,
            LogLevel::Warn => Color::Yellow,
            LogLevel::Info => self.foreground,
            LogLevel::Debug | LogLevel::Trace => self.muted,
        }
    }
}
