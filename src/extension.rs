//! Host lifecycle for the Launchpad extension

use crate::host::{ListenerId, Shell, Tab};
use crate::launchpad::Launchpad;

/// Tab title in the host's tab strip
pub const TAB_TITLE: &str = "Launchpad";

/// Registry name of the tab icon
pub const TAB_ICON: &str = "bookmark";

const LISTENER: ListenerId = ListenerId("launchpad");

/// Something the host loads at startup and unloads at shutdown
pub trait Extension {
    fn on_load(&mut self, shell: &mut Shell);

    fn on_before_unload(&mut self, shell: &mut Shell);

    /// The host switched tabs; delivered only while subscribed
    fn on_tab_selected(&mut self, shell: &mut Shell);
}

pub struct LaunchpadExtension {
    view: Launchpad,
    tab: Option<usize>,
    ready: bool,
}

impl LaunchpadExtension {
    pub fn new(view: Launchpad) -> Self {
        Self {
            view,
            tab: None,
            ready: false,
        }
    }

    pub fn listener() -> ListenerId {
        LISTENER
    }

    pub fn view(&self) -> &Launchpad {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut Launchpad {
        &mut self.view
    }

    /// Index of the registered tab, once loaded
    pub fn tab_index(&self) -> Option<usize> {
        self.tab
    }

    #[cfg(test)]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// One-shot initialisation on first activation of the tab
    fn ensure_ready(&mut self, shell: &mut Shell) {
        if self.ready {
            return;
        }
        shell.unsubscribe_tab_selected(LISTENER);
        self.ready = true;
        tracing::info!(
            nodes = self.view.tree().len(),
            "Launchpad ready"
        );
    }
}

impl Extension for LaunchpadExtension {
    fn on_load(&mut self, shell: &mut Shell) {
        let icon = shell.icons().get(TAB_ICON);
        let index = shell.add_tab(Tab::new(TAB_TITLE).with_icon(icon));
        self.tab = Some(index);
        shell.subscribe_tab_selected(LISTENER);
        tracing::debug!(tab = index, "Launchpad loaded");
    }

    fn on_before_unload(&mut self, _shell: &mut Shell) {}

    fn on_tab_selected(&mut self, shell: &mut Shell) {
        if shell.is_closing() || Some(shell.selected_tab()) != self.tab {
            return;
        }
        self.ensure_ready(shell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::IconRegistry;

    fn loaded() -> (Shell, LaunchpadExtension) {
        let mut shell = Shell::new(IconRegistry::with_defaults());
        shell.add_tab(Tab::new("Sessions"));
        let mut ext = LaunchpadExtension::new(Launchpad::new("GMD - ITG", "New group"));
        ext.on_load(&mut shell);
        (shell, ext)
    }

    /// Deliver a tab switch the way the host does
    fn switch(shell: &mut Shell, ext: &mut LaunchpadExtension, index: usize) {
        for listener in shell.select_tab(index) {
            if listener == LaunchpadExtension::listener() {
                ext.on_tab_selected(shell);
            }
        }
    }

    #[test]
    fn test_on_load_registers_tab_with_icon() {
        let (shell, ext) = loaded();
        let index = ext.tab_index().unwrap();
        assert_eq!(shell.tabs()[index].title, "Launchpad");
        assert_eq!(shell.tabs()[index].icon, Some('★'));
        assert!(shell.is_subscribed(LaunchpadExtension::listener()));
        assert!(!ext.is_ready());
    }

    #[test]
    fn test_first_activation_is_one_shot() {
        let (mut shell, mut ext) = loaded();
        switch(&mut shell, &mut ext, 1);

        assert!(ext.is_ready());
        assert!(!shell.is_subscribed(LaunchpadExtension::listener()));

        switch(&mut shell, &mut ext, 0);
        assert!(shell.select_tab(1).is_empty());
    }

    #[test]
    fn test_other_tab_or_closing_shell_does_not_initialise() {
        let (mut shell, mut ext) = loaded();
        shell.add_tab(Tab::new("Extra"));
        switch(&mut shell, &mut ext, 2);
        assert!(!ext.is_ready());

        shell.set_closing();
        switch(&mut shell, &mut ext, 1);
        assert!(!ext.is_ready());
        assert!(shell.is_subscribed(LaunchpadExtension::listener()));
    }

    #[test]
    fn test_unload_leaves_shell_alone() {
        let (mut shell, mut ext) = loaded();
        ext.on_before_unload(&mut shell);
        assert_eq!(shell.tabs().len(), 2);
    }
}
