// TUI application state
//
// The host side of the application: tab strip, captured sessions, the loaded
// Launchpad extension, and transient UI state (modal, toast, mouse hits).

use super::components::Toast;
use super::host::TerminalHost;
use super::modal::Modal;
use super::theme::Theme;
use crate::config::Config;
use crate::dragdrop::DragData;
use crate::error::LaunchpadError;
use crate::extension::{Extension, LaunchpadExtension};
use crate::host::{IconRegistry, Shell, Tab};
use crate::launchpad::Launchpad;
use crate::logging::LogBuffer;
use crate::menu::{DeleteRequest, MenuAction};
use crate::session::{Session, SessionId, SessionStore};
use crate::tree::NodeId;
use ratatui::layout::Rect;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Two clicks on the same row within this window count as a double-click
const DOUBLE_CLICK: Duration = Duration::from_millis(400);

/// Title of the host's own session list tab
pub const SESSIONS_TAB: &str = "Sessions";

/// Main application state for the TUI
pub struct App {
    pub shell: Shell,
    pub launchpad: LaunchpadExtension,
    pub store: SessionStore,
    pub host: TerminalHost,

    pub modal: Option<Modal>,
    pub toast: Option<Toast>,
    pub log_buffer: LogBuffer,
    pub theme: Theme,
    pub should_quit: bool,
    pub start_time: Instant,

    /// Cursor in the Sessions tab
    pub sessions_cursor: usize,
    /// Sessions marked for a multi-session drag
    pub marked: BTreeSet<SessionId>,

    /// Where the tree rows were last drawn, for mouse hit testing
    pub tree_area: Option<Rect>,
    /// First visible tree row
    pub tree_scroll: usize,

    sessions_tab: usize,
    last_click: Option<(Instant, NodeId)>,
    /// Node under the last left press, until a drag starts or the button is released
    pressed: Option<NodeId>,
}

impl App {
    pub fn new(config: &Config, store: SessionStore, log_buffer: LogBuffer) -> Self {
        let mut shell = Shell::new(IconRegistry::with_defaults());
        let sessions_icon = shell.icons().get("sessions");
        let sessions_tab = shell.add_tab(Tab::new(SESSIONS_TAB).with_icon(sessions_icon));

        let mut launchpad = LaunchpadExtension::new(Launchpad::new(
            &config.root_group,
            config.new_group_label.clone(),
        ));
        launchpad.on_load(&mut shell);

        Self {
            shell,
            launchpad,
            store,
            host: TerminalHost::new(),
            modal: None,
            toast: None,
            log_buffer,
            theme: Theme::default(),
            should_quit: false,
            start_time: Instant::now(),
            sessions_cursor: 0,
            marked: BTreeSet::new(),
            tree_area: None,
            tree_scroll: 0,
            sessions_tab,
            last_click: None,
            pressed: None,
        }
    }

    pub fn view(&self) -> &Launchpad {
        self.launchpad.view()
    }

    pub fn view_mut(&mut self) -> &mut Launchpad {
        self.launchpad.view_mut()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tabs
    // ─────────────────────────────────────────────────────────────────────

    pub fn on_launchpad_tab(&self) -> bool {
        self.launchpad.tab_index() == Some(self.shell.selected_tab())
    }

    /// Switch tabs and deliver the tab-selected notification
    pub fn select_tab(&mut self, index: usize) {
        for listener in self.shell.select_tab(index) {
            if listener == LaunchpadExtension::listener() {
                self.launchpad.on_tab_selected(&mut self.shell);
            }
        }
    }

    pub fn next_tab(&mut self) {
        let count = self.shell.tabs().len();
        if count > 0 {
            self.select_tab((self.shell.selected_tab() + 1) % count);
        }
    }

    pub fn show_launchpad(&mut self) {
        if let Some(index) = self.launchpad.tab_index() {
            self.select_tab(index);
        }
    }

    pub fn show_sessions(&mut self) {
        self.select_tab(self.sessions_tab);
    }

    /// Start shutting down; no further tab activation is honoured
    pub fn quit(&mut self) {
        self.shell.set_closing();
        self.launchpad.on_before_unload(&mut self.shell);
        self.should_quit = true;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Sessions tab
    // ─────────────────────────────────────────────────────────────────────

    /// A session arrived from the feed
    pub fn add_session(&mut self, session: Session) {
        if let Some(session) = self.store.push(session) {
            tracing::debug!(id = session.id, url = %session.url, "Session captured");
        }
    }

    pub fn cursor_session(&self) -> Option<&Arc<Session>> {
        self.store.get(self.sessions_cursor)
    }

    pub fn move_session_cursor(&mut self, delta: isize) {
        let last = self.store.len().saturating_sub(1);
        self.sessions_cursor = self.sessions_cursor.saturating_add_signed(delta).min(last);
    }

    pub fn toggle_mark(&mut self) {
        if let Some(id) = self.cursor_session().map(|s| s.id) {
            if !self.marked.remove(&id) {
                self.marked.insert(id);
            }
        }
    }

    /// Marked sessions in list order, or the one under the cursor
    pub fn drag_candidates(&self) -> Vec<Arc<Session>> {
        if self.marked.is_empty() {
            return self.cursor_session().cloned().into_iter().collect();
        }
        self.store
            .iter()
            .filter(|s| self.marked.contains(&s.id))
            .cloned()
            .collect()
    }

    /// Pick up sessions from the list and carry them to the tree
    pub fn drag_from_sessions(&mut self) {
        let sessions = self.drag_candidates();
        if sessions.is_empty() {
            return;
        }
        let count = sessions.len();
        self.view_mut().begin_external_drag(sessions);
        self.marked.clear();
        self.show_launchpad();
        let selected = self.view().selected();
        self.view_mut().drag_over(selected);
        self.show_toast(format!(
            "Dragging {} session(s): Enter drops, Esc cancels",
            count
        ));
    }

    /// The host forgets a session; tree nodes pointing at it go dead
    pub fn remove_cursor_session(&mut self) {
        let Some(id) = self.cursor_session().map(|s| s.id) else {
            return;
        };
        self.store.remove(id);
        self.marked.remove(&id);
        self.move_session_cursor(0);
        tracing::info!(id, "Session discarded");
    }

    pub fn compose_cursor_session(&mut self) {
        let Some(session) = self.cursor_session().cloned() else {
            return;
        };
        let result = crate::actions::send_to_compose(&mut self.host, &session);
        self.report(result);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Launchpad tab
    // ─────────────────────────────────────────────────────────────────────

    pub fn open_context_menu(&mut self, node: Option<NodeId>) {
        if let Some(menu) = self.view().context_menu(node) {
            self.modal = Some(Modal::context_menu(menu));
        }
    }

    pub fn invoke(&mut self, action: MenuAction) {
        self.modal = None;
        let result = self
            .launchpad
            .view_mut()
            .invoke(action, &mut self.host);
        match result {
            Ok(Some(request)) => self.modal = Some(Modal::confirm(request)),
            other => self.report(other),
        }
    }

    pub fn ask_delete_selected(&mut self) {
        if let Some(request) = self.view().on_delete_key() {
            self.modal = Some(Modal::confirm(request));
        }
    }

    pub fn answer_delete(&mut self, request: &DeleteRequest, confirmed: bool) {
        self.modal = None;
        let removed = self.view_mut().confirm_delete(request, confirmed);
        if removed > 0 {
            self.show_toast(format!("Deleted {} node(s)", removed));
        }
    }

    /// Enter on the tree: drop when dragging, otherwise activate
    pub fn enter_on_tree(&mut self) {
        if self.view().drag().is_dragging() {
            self.drop_on_selected();
        } else {
            let result = self.launchpad.view_mut().activate(&mut self.host);
            self.report(result);
        }
    }

    pub fn drop_on_selected(&mut self) {
        let target = self.view().selected();
        self.drop_at(target);
    }

    fn drop_at(&mut self, target: Option<NodeId>) {
        let report = self.view_mut().drop_on(target);
        let message = match (report.added.len(), report.skipped) {
            (0, 0) => "Nothing dropped".to_string(),
            (added, 0) => format!("Added {} session(s)", added),
            (added, skipped) => format!("Added {}, {} already present", added, skipped),
        };
        self.show_toast(message);
    }

    pub fn start_tree_drag(&mut self) {
        let count = self.view_mut().begin_drag();
        if count == 0 {
            self.view_mut().cancel_drag();
            self.show_toast("Nothing to drag");
        } else {
            self.show_toast(format!("Dragging {} session(s)", count));
        }
    }

    /// Move the tree selection, tracking the drop target while dragging
    pub fn move_tree_selection(&mut self, delta: isize) {
        self.view_mut().move_selection(delta);
        self.track_drag();
    }

    pub fn track_drag(&mut self) {
        if self.view().drag().is_dragging() {
            let selected = self.view().selected();
            self.view_mut().drag_over(selected);
        }
    }

    /// Text pasted into the terminal
    ///
    /// An open edit box takes the first line. Otherwise, on the Launchpad tab,
    /// the paste starts a drag over the selection like a drop from another
    /// window would.
    pub fn paste(&mut self, text: &str) {
        if self.view().rename().is_editing() {
            let line = text.lines().next().unwrap_or_default();
            for c in line.chars() {
                self.view_mut().rename_mut().push_char(c);
            }
            return;
        }
        if self.modal.is_some() || !self.on_launchpad_tab() {
            return;
        }
        let data = DragData::from_pasted(text);
        let format = data.format();
        self.view_mut().begin_pasted_drag(data);
        self.track_drag();
        self.show_toast(format!("Dragging {}: Enter drops, Esc cancels", format));
    }

    pub fn rename_selected(&mut self) {
        if let Some(node) = self.view().selected() {
            self.view_mut().begin_rename(node);
        }
    }

    /// Run deferred continuations; called after every handled event
    pub fn run_deferred(&mut self) {
        self.view_mut().run_deferred();
        while let Some(notice) = self.host.take_notice() {
            self.show_toast(notice);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mouse
    // ─────────────────────────────────────────────────────────────────────

    /// Tree node drawn at a screen position
    pub fn node_at(&self, column: u16, row: u16) -> Option<NodeId> {
        let area = self.tree_area?;
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        if !inside {
            return None;
        }
        let index = self.tree_scroll + usize::from(row - area.y);
        self.view().visible_rows().get(index).map(|r| r.id)
    }

    /// Left button down over `node`, or over the background
    pub fn mouse_press(&mut self, node: Option<NodeId>) {
        self.pressed = node;
        let Some(node) = node else { return };
        self.view_mut().select(Some(node));
        if self.register_click(node) {
            self.enter_on_tree();
        }
    }

    /// Pointer moved with the left button held
    ///
    /// A new drag carries the node the press landed on. A press on the
    /// background starts nothing.
    pub fn mouse_drag(&mut self, over: Option<NodeId>) {
        if !self.view().drag().is_dragging() {
            let Some(origin) = self.pressed.take() else {
                return;
            };
            self.view_mut().select(Some(origin));
            self.start_tree_drag();
        }
        self.view_mut().drag_over(over);
    }

    pub fn mouse_release(&mut self, over: Option<NodeId>) {
        self.pressed = None;
        if self.view().drag().is_dragging() {
            self.drop_at(over);
        }
    }

    /// Record a left click; returns true when it completes a double-click
    pub fn register_click(&mut self, node: NodeId) -> bool {
        let now = Instant::now();
        let double = matches!(
            self.last_click,
            Some((at, prev)) if prev == node && now.duration_since(at) <= DOUBLE_CLICK
        );
        self.last_click = if double { None } else { Some((now, node)) };
        double
    }

    // ─────────────────────────────────────────────────────────────────────
    // Feedback
    // ─────────────────────────────────────────────────────────────────────

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    /// Surface a failed action to the user
    pub fn report<T>(&mut self, result: Result<T, LaunchpadError>) {
        if let Err(e) = result {
            tracing::warn!("{}", e);
            self.show_toast(e.to_string());
        }
    }

    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
