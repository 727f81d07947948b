//! In-place label editing
//!
//! Editing a session node edits its *alias*, not the derived label the tree
//! shows. That needs three cooperating steps:
//!
//! 1. **Begin**: before the edit box opens, a session node's text is swapped
//!    for the raw alias. The controller checkpoints the text before and after
//!    that swap; if it changed, the pending edit is cancelled and a fresh
//!    `BeginEdit` is posted so the edit box opens on the new text. The same
//!    guard catches anything else that rewrites the text at that moment.
//! 2. **Commit**: the accepted text is written to the session's alias and the
//!    edit widget applies the raw text to the node, as text widgets do.
//! 3. **Restore**: a deferred `RestoreLabel` replaces the raw text with the
//!    derived display label. It is posted during commit and runs only after
//!    the commit handler has returned.

use crate::alias;
use crate::dispatch::{Deferred, Dispatcher};
use crate::tree::{NodeId, NodeKind, TreeModel};

/// Result of asking to begin an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginEdit {
    /// The edit box is open
    Editing,
    /// The node text changed under the checkpoint; edit restarts deferred
    Restarting,
    /// The node cannot be edited (missing, or its session is gone)
    Cancelled,
    /// This node is already being edited
    AlreadyEditing,
}

/// An open edit box
#[derive(Debug, Clone)]
struct EditSession {
    node: NodeId,
    buffer: String,
}

/// Two-phase label editing bound to a single open edit box
#[derive(Debug, Default)]
pub struct RenameController {
    active: Option<EditSession>,
}

impl RenameController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.active.is_some()
    }

    pub fn editing_node(&self) -> Option<NodeId> {
        self.active.as_ref().map(|edit| edit.node)
    }

    /// Current contents of the edit box
    pub fn buffer(&self) -> Option<&str> {
        self.active.as_ref().map(|edit| edit.buffer.as_str())
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(edit) = &mut self.active {
            edit.buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(edit) = &mut self.active {
            edit.buffer.pop();
        }
    }

    pub fn clear(&mut self) {
        if let Some(edit) = &mut self.active {
            edit.buffer.clear();
        }
    }

    /// Open the edit box on `node`
    ///
    /// An edit already open on a different node is cancelled first.
    pub fn begin_edit(
        &mut self,
        tree: &mut TreeModel,
        dispatcher: &mut Dispatcher,
        node: NodeId,
    ) -> BeginEdit {
        match self.editing_node() {
            Some(current) if current == node => return BeginEdit::AlreadyEditing,
            Some(_) => {
                self.cancel(tree, dispatcher);
            }
            None => {}
        }

        let before = tree.label(node).map(str::to_owned);
        if !Self::prepare_text(tree, node) {
            tracing::debug!(node = %node, "Label edit refused");
            return BeginEdit::Cancelled;
        }
        let after = tree.label(node).map(str::to_owned);

        if before != after {
            tracing::trace!(node = %node, "Node text changed before edit, restarting");
            dispatcher.post(Deferred::BeginEdit(node));
            return BeginEdit::Restarting;
        }

        self.active = Some(EditSession {
            node,
            buffer: after.unwrap_or_default(),
        });
        BeginEdit::Editing
    }

    /// Before-edit hook: show the raw alias on session nodes
    ///
    /// Returns `false` to refuse the edit.
    fn prepare_text(tree: &mut TreeModel, node: NodeId) -> bool {
        match tree.kind(node) {
            NodeKind::InnerNode => true,
            NodeKind::SessionNode => {
                let raw = tree
                    .session(node)
                    .and_then(|session| alias::alias(&session))
                    .unwrap_or_default();
                tree.set_label(node, raw);
                true
            }
            NodeKind::None => false,
        }
    }

    /// Accept the edit box contents
    pub fn commit(&mut self, tree: &mut TreeModel, dispatcher: &mut Dispatcher) -> Option<NodeId> {
        let text = self.buffer()?.to_string();
        self.finish_edit(tree, dispatcher, Some(text))
    }

    /// Close the edit box without accepting its contents
    pub fn cancel(&mut self, tree: &mut TreeModel, dispatcher: &mut Dispatcher) -> Option<NodeId> {
        self.finish_edit(tree, dispatcher, None)
    }

    /// Close the edit box; `label` is `None` when the edit was cancelled
    pub fn finish_edit(
        &mut self,
        tree: &mut TreeModel,
        dispatcher: &mut Dispatcher,
        label: Option<String>,
    ) -> Option<NodeId> {
        let edit = self.active.take()?;
        let node = edit.node;

        if let Some(session) = tree.session(node) {
            alias::set_alias(&session, label.as_deref());
            dispatcher.post(Deferred::RestoreLabel(node));
        }

        // The edit box's own commit: accepted, non-blank text replaces the node text
        if let Some(text) = label.filter(|text| !text.trim().is_empty()) {
            tree.set_label(node, text);
        }

        tracing::debug!(node = %node, "Label edit finished");
        Some(node)
    }

    /// Drop the edit box if its node has been removed from the tree
    pub fn discard_if_removed(&mut self, tree: &TreeModel) {
        if self.editing_node().is_some_and(|node| !tree.contains(node)) {
            self.active = None;
        }
    }

    /// Deferred half of a session commit: show the derived display label again
    pub fn restore_label(tree: &mut TreeModel, node: NodeId) {
        if let Some(session) = tree.session(node) {
            tree.set_label(node, alias::display_label(&session));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use std::sync::Arc;

    struct Fixture {
        tree: TreeModel,
        dispatcher: Dispatcher,
        rename: RenameController,
        group: NodeId,
    }

    impl Fixture {
        fn new() -> Self {
            let mut tree = TreeModel::new();
            let group = tree.create_group(None, "Group").unwrap();
            Self {
                tree,
                dispatcher: Dispatcher::new(),
                rename: RenameController::new(),
                group,
            }
        }

        fn add(&mut self, session: &Arc<Session>) -> NodeId {
            let label = alias::display_label(session);
            self.tree.add_session(self.group, session, label).unwrap()
        }

        fn drain(&mut self) {
            while let Some(task) = self.dispatcher.next() {
                match task {
                    Deferred::BeginEdit(node) => {
                        self.rename
                            .begin_edit(&mut self.tree, &mut self.dispatcher, node);
                    }
                    Deferred::RestoreLabel(node) => {
                        RenameController::restore_label(&mut self.tree, node)
                    }
                }
            }
        }

        fn type_text(&mut self, text: &str) {
            self.rename.clear();
            text.chars().for_each(|c| self.rename.push_char(c));
        }
    }

    fn session() -> Arc<Session> {
        Arc::new(Session::new(
            1,
            "api.example.com/a",
            "https://api.example.com/a",
            "GET",
        ))
    }

    #[test]
    fn test_group_edit_applies_text() {
        let mut fx = Fixture::new();
        let group = fx.group;

        let outcome = fx.rename.begin_edit(&mut fx.tree, &mut fx.dispatcher, group);
        assert_eq!(outcome, BeginEdit::Editing);
        assert_eq!(fx.rename.buffer(), Some("Group"));

        fx.type_text("Renamed");
        assert_eq!(fx.rename.commit(&mut fx.tree, &mut fx.dispatcher), Some(group));
        assert_eq!(fx.tree.label(group), Some("Renamed"));
        assert!(fx.dispatcher.is_empty());
        assert!(!fx.rename.is_editing());
    }

    #[test]
    fn test_blank_group_name_is_rejected() {
        let mut fx = Fixture::new();
        let group = fx.group;
        fx.rename.begin_edit(&mut fx.tree, &mut fx.dispatcher, group);
        fx.type_text("   ");
        fx.rename.commit(&mut fx.tree, &mut fx.dispatcher);
        assert_eq!(fx.tree.label(group), Some("Group"));
    }

    #[test]
    fn test_session_edit_restarts_when_text_swapped() {
        let mut fx = Fixture::new();
        let s = session();
        let leaf = fx.add(&s);

        let outcome = fx.rename.begin_edit(&mut fx.tree, &mut fx.dispatcher, leaf);
        assert_eq!(outcome, BeginEdit::Restarting);
        assert!(!fx.rename.is_editing());
        assert_eq!(fx.tree.label(leaf), Some(""));
        assert_eq!(
            fx.dispatcher.pending().copied().collect::<Vec<_>>(),
            vec![Deferred::BeginEdit(leaf)]
        );

        fx.drain();
        assert_eq!(fx.rename.editing_node(), Some(leaf));
        assert_eq!(fx.rename.buffer(), Some(""));
    }

    #[test]
    fn test_session_edit_opens_on_raw_alias() {
        let mut fx = Fixture::new();
        let s = session();
        alias::set_alias(&s, Some("Existing"));
        let leaf = fx.add(&s);

        fx.rename.begin_edit(&mut fx.tree, &mut fx.dispatcher, leaf);
        fx.drain();
        assert_eq!(fx.rename.buffer(), Some("Existing"));
    }

    #[test]
    fn test_session_commit_restores_derived_label_later() {
        let mut fx = Fixture::new();
        let s = session();
        let leaf = fx.add(&s);

        fx.rename.begin_edit(&mut fx.tree, &mut fx.dispatcher, leaf);
        fx.drain();
        fx.type_text("My-Alias");
        fx.rename.commit(&mut fx.tree, &mut fx.dispatcher);

        // Commit has happened, restore has not
        assert_eq!(alias::alias(&s).as_deref(), Some("MyAlias"));
        assert_eq!(fx.tree.label(leaf), Some("My-Alias"));
        assert_eq!(
            fx.dispatcher.pending().copied().collect::<Vec<_>>(),
            vec![Deferred::RestoreLabel(leaf)]
        );

        fx.drain();
        assert_eq!(fx.tree.label(leaf), Some("MyAlias - api.example.com/a"));
    }

    #[test]
    fn test_cancel_keeps_alias_and_restores_label() {
        let mut fx = Fixture::new();
        let s = session();
        alias::set_alias(&s, Some("Keep"));
        let leaf = fx.add(&s);

        fx.rename.begin_edit(&mut fx.tree, &mut fx.dispatcher, leaf);
        fx.drain();
        fx.type_text("Discarded");
        fx.rename.cancel(&mut fx.tree, &mut fx.dispatcher);
        fx.drain();

        assert_eq!(alias::alias(&s).as_deref(), Some("Keep"));
        assert_eq!(fx.tree.label(leaf), Some("Keep - api.example.com/a"));
    }

    #[test]
    fn test_dropped_session_cannot_be_edited() {
        let mut fx = Fixture::new();
        let s = session();
        let leaf = fx.add(&s);
        drop(s);

        let outcome = fx.rename.begin_edit(&mut fx.tree, &mut fx.dispatcher, leaf);
        assert_eq!(outcome, BeginEdit::Cancelled);
        assert!(fx.dispatcher.is_empty());
        assert_eq!(fx.tree.label(leaf), Some("api.example.com/a"));
    }

    #[test]
    fn test_editing_another_node_cancels_the_first() {
        let mut fx = Fixture::new();
        let group = fx.group;
        let other = fx.tree.create_group(None, "Other").unwrap();

        fx.rename.begin_edit(&mut fx.tree, &mut fx.dispatcher, group);
        fx.type_text("never applied");
        assert_eq!(
            fx.rename.begin_edit(&mut fx.tree, &mut fx.dispatcher, group),
            BeginEdit::AlreadyEditing
        );
        fx.rename.begin_edit(&mut fx.tree, &mut fx.dispatcher, other);

        assert_eq!(fx.tree.label(group), Some("Group"));
        assert_eq!(fx.rename.editing_node(), Some(other));
    }

    #[test]
    fn test_edit_discarded_when_node_removed() {
        let mut fx = Fixture::new();
        let group = fx.group;
        fx.rename.begin_edit(&mut fx.tree, &mut fx.dispatcher, group);
        fx.tree.remove_subtree(group);
        fx.rename.discard_if_removed(&fx.tree);
        assert!(!fx.rename.is_editing());
    }
}
