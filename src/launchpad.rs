//! The Launchpad view
//!
//! Owns the tree and every controller acting on it, plus the selection.
//! Input handlers in the TUI call into this type; after each handler returns
//! the caller runs [`Launchpad::run_deferred`] so queued continuations execute
//! outside the handler that posted them.

use crate::actions;
use crate::dispatch::{Deferred, Dispatcher};
use crate::dragdrop::{DragData, DragDropController, DragEffects, DropReport};
use crate::error::LaunchpadError;
use crate::host::HostActions;
use crate::menu::{self, ContextMenu, DeleteRequest, MenuAction};
use crate::rename::{BeginEdit, RenameController};
use crate::session::Session;
use crate::tree::{NodeId, NodeKind, TreeModel, VisibleRow};
use std::sync::Arc;

pub struct Launchpad {
    tree: TreeModel,
    drag: DragDropController,
    rename: RenameController,
    dispatcher: Dispatcher,
    selected: Option<NodeId>,
    new_group_label: String,
}

impl Launchpad {
    /// A tree holding one expanded top-level group
    pub fn new(root_label: &str, new_group_label: impl Into<String>) -> Self {
        let tree = TreeModel::seeded(root_label);
        let selected = tree.roots().first().copied();
        Self {
            tree,
            drag: DragDropController::new(),
            rename: RenameController::new(),
            dispatcher: Dispatcher::new(),
            selected,
            new_group_label: new_group_label.into(),
        }
    }

    pub fn tree(&self) -> &TreeModel {
        &self.tree
    }

    pub fn drag(&self) -> &DragDropController {
        &self.drag
    }

    pub fn rename(&self) -> &RenameController {
        &self.rename
    }

    /// Edit box access for keystrokes
    pub fn rename_mut(&mut self) -> &mut RenameController {
        &mut self.rename
    }

    #[cfg(test)]
    pub fn has_pending(&self) -> bool {
        !self.dispatcher.is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn select(&mut self, node: Option<NodeId>) {
        self.selected = node.filter(|id| self.tree.contains(*id));
    }

    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        self.tree.visible_rows()
    }

    /// Index of the selection among the visible rows
    pub fn selected_row(&self) -> Option<usize> {
        let selected = self.selected?;
        self.visible_rows().iter().position(|row| row.id == selected)
    }

    /// Move the selection by `delta` visible rows, clamped to the ends
    pub fn move_selection(&mut self, delta: isize) {
        let rows = self.visible_rows();
        if rows.is_empty() {
            self.selected = None;
            return;
        }
        let current = self
            .selected
            .and_then(|id| rows.iter().position(|row| row.id == id))
            .unwrap_or(0);
        let last = rows.len() - 1;
        let next = current.saturating_add_signed(delta).min(last);
        self.selected = Some(rows[next].id);
    }

    pub fn select_first(&mut self) {
        self.selected = self.visible_rows().first().map(|row| row.id);
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible_rows().last().map(|row| row.id);
    }

    /// Collapse the selected group, or jump to its parent when already collapsed
    pub fn collapse_or_parent(&mut self) {
        let Some(node) = self.selected else { return };
        let expanded = self.tree.get(node).is_some_and(|n| n.is_expanded());
        if self.tree.kind(node) == NodeKind::InnerNode && expanded {
            self.tree.collapse(node);
        } else if let Some(parent) = self.tree.parent(node) {
            self.selected = Some(parent);
        }
    }

    pub fn expand_selected(&mut self) {
        if let Some(node) = self.selected {
            self.tree.expand(node);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Menu and actions
    // ─────────────────────────────────────────────────────────────────────

    pub fn context_menu(&self, node: Option<NodeId>) -> Option<ContextMenu> {
        menu::build(&self.tree, node)
    }

    /// Carry out a menu action
    ///
    /// Delete does not remove anything yet; it returns the question to ask.
    pub fn invoke(
        &mut self,
        action: MenuAction,
        host: &mut dyn HostActions,
    ) -> Result<Option<DeleteRequest>, LaunchpadError> {
        match action {
            MenuAction::AddGroup { parent } => {
                self.add_group(parent)?;
                Ok(None)
            }
            MenuAction::Delete(node) => Ok(Some(menu::delete_request(&self.tree, node))),
            MenuAction::Compose(session) => {
                actions::send_to_compose(host, &session)?;
                Ok(None)
            }
            MenuAction::OpenInBrowser(session) => {
                actions::open_in_browser(host, &session)?;
                Ok(None)
            }
        }
    }

    /// Create a group, select it and open its label for editing
    pub fn add_group(&mut self, parent: Option<NodeId>) -> Result<NodeId, LaunchpadError> {
        let node = self
            .tree
            .create_group(parent, self.new_group_label.clone())?;
        if let Some(parent) = parent {
            self.tree.expand(parent);
        }
        self.selected = Some(node);
        self.begin_rename(node);
        tracing::info!(node = %node, "Group added");
        Ok(node)
    }

    /// Delete key: ask about the selection
    pub fn on_delete_key(&self) -> Option<DeleteRequest> {
        self.selected
            .map(|node| menu::delete_request(&self.tree, node))
    }

    /// Answer a delete question; returns how many nodes were removed
    pub fn confirm_delete(&mut self, request: &DeleteRequest, confirmed: bool) -> usize {
        if !confirmed {
            return 0;
        }
        let parent = self.tree.parent(request.node);
        let removed = self.tree.remove_subtree(request.node);
        self.rename.discard_if_removed(&self.tree);
        if self.selected.is_some_and(|id| !self.tree.contains(id)) {
            self.selected = parent.or_else(|| self.tree.roots().first().copied());
        }
        tracing::info!(node = %request.node, removed, "Subtree deleted");
        removed
    }

    /// Double-click / Enter: compose a session, toggle a group
    pub fn activate(&mut self, host: &mut dyn HostActions) -> Result<(), LaunchpadError> {
        let Some(node) = self.selected else {
            return Ok(());
        };
        match self.tree.kind(node) {
            NodeKind::SessionNode => {
                if let Some(session) = self.tree.session(node) {
                    actions::send_to_compose(host, &session)?;
                }
            }
            NodeKind::InnerNode => self.tree.toggle(node),
            NodeKind::None => {}
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Drag and drop
    // ─────────────────────────────────────────────────────────────────────

    /// Drag the selected node; returns how many sessions it carries
    pub fn begin_drag(&mut self) -> usize {
        match self.selected {
            Some(node) => self.drag.begin_from_node(&self.tree, node),
            None => 0,
        }
    }

    /// Drag sessions picked from outside the tree
    pub fn begin_external_drag(&mut self, sessions: Vec<Arc<Session>>) {
        self.drag.begin(
            DragData::Sessions(sessions),
            DragEffects::COPY | DragEffects::SCROLL,
        );
    }

    /// Drag a payload pasted in from another window
    pub fn begin_pasted_drag(&mut self, data: DragData) {
        self.drag.begin(data, DragEffects::COPY);
    }

    pub fn drag_over(&mut self, target: Option<NodeId>) -> Option<DragEffects> {
        self.drag.drag_over(&self.tree, target)
    }

    pub fn drop_on(&mut self, target: Option<NodeId>) -> DropReport {
        self.drag.drop_on(&mut self.tree, target)
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    // ─────────────────────────────────────────────────────────────────────
    // Rename
    // ─────────────────────────────────────────────────────────────────────

    pub fn begin_rename(&mut self, node: NodeId) -> BeginEdit {
        self.rename
            .begin_edit(&mut self.tree, &mut self.dispatcher, node)
    }

    pub fn commit_rename(&mut self) -> Option<NodeId> {
        self.rename.commit(&mut self.tree, &mut self.dispatcher)
    }

    pub fn cancel_rename(&mut self) -> Option<NodeId> {
        self.rename.cancel(&mut self.tree, &mut self.dispatcher)
    }

    /// Run queued continuations until none are left; returns how many ran
    pub fn run_deferred(&mut self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.dispatcher.next() {
            match task {
                Deferred::BeginEdit(node) => {
                    self.rename
                        .begin_edit(&mut self.tree, &mut self.dispatcher, node);
                }
                Deferred::RestoreLabel(node) => RenameController::restore_label(&mut self.tree, node),
            }
            ran += 1;
        }
        ran
    }
}
