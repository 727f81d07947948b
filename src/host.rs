// Host boundary
//
// Launchpad runs as an extension inside a host that owns the tab strip, the
// icon registry and the captured sessions. This module is that boundary:
// - `HostActions`: what the host does on Launchpad's behalf (compose, launch)
// - `Shell`: tabs, icons, and the tab-selected notification list

use crate::session::Session;
use anyhow::Result;
use std::collections::HashMap;

/// Actions the host performs for the extension
pub trait HostActions {
    /// Clone a session into the host's request composer
    fn compose(&mut self, session: &Session) -> Result<()>;

    /// Open a URL with the operating system's default handler
    fn launch(&mut self, url: &str) -> Result<()>;
}

/// Identifies a tab-selected listener so it can unsubscribe itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub &'static str);

/// A tab in the host's tab strip
#[derive(Debug, Clone)]
pub struct Tab {
    pub title: String,
    pub icon: Option<char>,
}

impl Tab {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: Option<char>) -> Self {
        self.icon = icon;
        self
    }
}

/// Named glyphs extensions can tag their tabs with
#[derive(Debug, Clone, Default)]
pub struct IconRegistry {
    icons: HashMap<String, char>,
}

impl IconRegistry {
    /// Registry preloaded with the host's stock icons
    pub fn with_defaults() -> Self {
        let mut registry = Self::default();
        registry.register("sessions", '≡');
        registry.register("bookmark", '★');
        registry.register("compose", '✎');
        registry
    }

    pub fn register(&mut self, name: &str, glyph: char) {
        self.icons.insert(name.to_string(), glyph);
    }

    pub fn get(&self, name: &str) -> Option<char> {
        self.icons.get(name).copied()
    }
}

/// The host's window chrome: tab strip plus tab-selected notifications
#[derive(Debug, Default)]
pub struct Shell {
    tabs: Vec<Tab>,
    selected: usize,
    icons: IconRegistry,
    tab_listeners: Vec<ListenerId>,
    closing: bool,
}

impl Shell {
    pub fn new(icons: IconRegistry) -> Self {
        Self {
            icons,
            ..Self::default()
        }
    }

    pub fn icons(&self) -> &IconRegistry {
        &self.icons
    }

    /// Append a tab; returns its index
    pub fn add_tab(&mut self, tab: Tab) -> usize {
        tracing::debug!(title = %tab.title, "Tab registered");
        self.tabs.push(tab);
        self.tabs.len() - 1
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn selected_tab(&self) -> usize {
        self.selected
    }

    pub fn subscribe_tab_selected(&mut self, listener: ListenerId) {
        if !self.tab_listeners.contains(&listener) {
            self.tab_listeners.push(listener);
        }
    }

    pub fn unsubscribe_tab_selected(&mut self, listener: ListenerId) {
        self.tab_listeners.retain(|l| *l != listener);
    }

    #[cfg(test)]
    pub fn is_subscribed(&self, listener: ListenerId) -> bool {
        self.tab_listeners.contains(&listener)
    }

    /// Switch tabs; returns the listeners to notify
    ///
    /// Nothing fires when the index is out of range or already selected.
    pub fn select_tab(&mut self, index: usize) -> Vec<ListenerId> {
        if index >= self.tabs.len() || index == self.selected {
            return Vec::new();
        }
        self.selected = index;
        self.tab_listeners.clone()
    }

    pub fn is_closing(&self) -> bool {
        self.closing
    }

    pub fn set_closing(&mut self) {
        self.closing = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTENER: ListenerId = ListenerId("test");

    #[test]
    fn test_select_tab_notifies_on_change_only() {
        let mut shell = Shell::new(IconRegistry::with_defaults());
        shell.add_tab(Tab::new("Sessions"));
        shell.add_tab(Tab::new("Other"));
        shell.subscribe_tab_selected(LISTENER);

        assert!(shell.select_tab(0).is_empty());
        assert_eq!(shell.select_tab(1), vec![LISTENER]);
        assert!(shell.select_tab(7).is_empty());
        assert_eq!(shell.selected_tab(), 1);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut shell = Shell::new(IconRegistry::default());
        shell.add_tab(Tab::new("a"));
        shell.add_tab(Tab::new("b"));
        shell.subscribe_tab_selected(LISTENER);
        shell.subscribe_tab_selected(LISTENER);
        shell.unsubscribe_tab_selected(LISTENER);

        assert!(!shell.is_subscribed(LISTENER));
        assert!(shell.select_tab(1).is_empty());
    }

    #[test]
    fn test_icon_registry_defaults() {
        let icons = IconRegistry::with_defaults();
        assert_eq!(icons.get("bookmark"), Some('★'));
        assert_eq!(icons.get("missing"), None);
    }
}
