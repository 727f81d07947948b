//! Bookmark tree model
//!
//! An ordered forest of groups and session leaves, stored in an arena keyed by
//! [`NodeId`]. The forest has one implicit root: `roots()` are the top-level
//! groups. Child order is display order.
//!
//! # Ownership
//!
//! Leaves hold `Weak<Session>`. The host owns sessions; the tree never creates
//! or disposes them, it only points at them.

mod classify;

pub use classify::{classify, session_of, NodeKind};

use crate::error::LaunchpadError;
use crate::session::Session;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

/// Stable handle to a tree node; ids are never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node carries
#[derive(Debug)]
pub enum NodePayload {
    /// A user-named group with ordered children
    Group { children: Vec<NodeId> },
    /// A leaf referencing a host-owned session
    Session(Weak<Session>),
}

/// A node in the forest
#[derive(Debug)]
pub struct TreeNode {
    id: NodeId,
    label: String,
    parent: Option<NodeId>,
    expanded: bool,
    payload: NodePayload,
}

impl TreeNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Text currently shown for this node
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn payload(&self) -> &NodePayload {
        &self.payload
    }

    /// Ordered children; always empty for leaves
    pub fn children(&self) -> &[NodeId] {
        match &self.payload {
            NodePayload::Group { children } => children,
            NodePayload::Session(_) => &[],
        }
    }
}

/// One row of the flattened, expanded view of the forest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRow {
    pub id: NodeId,
    pub depth: usize,
}

/// The bookmark forest
#[derive(Debug, Default)]
pub struct TreeModel {
    nodes: HashMap<NodeId, TreeNode>,
    roots: Vec<NodeId>,
    next_id: u64,
}

impl TreeModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bootstrap state: a single expanded top-level group
    pub fn seeded(root_label: &str) -> Self {
        let mut tree = Self::new();
        let root = tree.insert(None, root_label.to_string(), NodePayload::Group {
            children: Vec::new(),
        });
        tree.expand(root);
        tree
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level groups, in display order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(TreeNode::children).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(TreeNode::parent)
    }

    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(TreeNode::label)
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        classify(self.get(id))
    }

    pub fn session(&self, id: NodeId) -> Option<Arc<Session>> {
        session_of(self.get(id))
    }

    /// Append a new group under `parent`, or at the top level
    pub fn create_group(
        &mut self,
        parent: Option<NodeId>,
        label: impl Into<String>,
    ) -> Result<NodeId, LaunchpadError> {
        if let Some(parent) = parent {
            self.check_can_adopt(parent)?;
        }
        let id = self.insert(parent, label.into(), NodePayload::Group {
            children: Vec::new(),
        });
        tracing::debug!(node = %id, parent = ?parent, "Created group");
        Ok(id)
    }

    /// Append a session leaf under a group
    pub fn add_session(
        &mut self,
        parent: NodeId,
        session: &Arc<Session>,
        label: impl Into<String>,
    ) -> Result<NodeId, LaunchpadError> {
        self.check_can_adopt(parent)?;
        Ok(self.insert(
            Some(parent),
            label.into(),
            NodePayload::Session(Arc::downgrade(session)),
        ))
    }

    fn check_can_adopt(&self, parent: NodeId) -> Result<(), LaunchpadError> {
        match self.get(parent).map(TreeNode::payload) {
            Some(NodePayload::Group { .. }) => Ok(()),
            Some(NodePayload::Session(_)) => Err(LaunchpadError::LeafHasNoChildren(parent)),
            None => Err(LaunchpadError::UnknownNode(parent)),
        }
    }

    /// Insert without validation; callers have checked `parent` is a group
    fn insert(&mut self, parent: Option<NodeId>, label: String, payload: NodePayload) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;

        match parent.and_then(|p| self.nodes.get_mut(&p)) {
            Some(TreeNode {
                payload: NodePayload::Group { children },
                ..
            }) => children.push(id),
            _ => self.roots.push(id),
        }

        self.nodes.insert(
            id,
            TreeNode {
                id,
                label,
                parent,
                expanded: false,
                payload,
            },
        );
        id
    }

    /// Detach a node and every descendant; returns how many nodes went away
    ///
    /// No confirmation happens here, that is the caller's job.
    pub fn remove_subtree(&mut self, id: NodeId) -> usize {
        let Some(parent) = self.get(id).map(TreeNode::parent) else {
            return 0;
        };

        match parent.and_then(|p| self.nodes.get_mut(&p)) {
            Some(TreeNode {
                payload: NodePayload::Group { children },
                ..
            }) => children.retain(|c| *c != id),
            _ => self.roots.retain(|r| *r != id),
        }

        let mut removed = 0;
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                pending.extend_from_slice(node.children());
                removed += 1;
            }
        }

        tracing::debug!(node = %id, removed, "Removed subtree");
        removed
    }

    /// Every session under `id`, in tree order
    ///
    /// A session node yields just its own session. Groups are walked depth
    /// first; leaves whose session is gone are skipped.
    pub fn collect_sessions(&self, id: NodeId) -> Vec<Arc<Session>> {
        if let Some(session) = self.session(id) {
            return vec![session];
        }
        let mut sessions = Vec::new();
        self.collect_into(id, &mut sessions);
        sessions
    }

    fn collect_into(&self, id: NodeId, sessions: &mut Vec<Arc<Session>>) {
        for &child in self.children(id) {
            match self.session(child) {
                Some(session) => sessions.push(session),
                None => self.collect_into(child, sessions),
            }
        }
    }

    pub fn set_label(&mut self, id: NodeId, label: impl Into<String>) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.label = label.into();
                true
            }
            None => false,
        }
    }

    pub fn expand(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.expanded = true;
        }
    }

    pub fn collapse(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.expanded = false;
        }
    }

    pub fn toggle(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.expanded = !node.expanded;
        }
    }

    /// Rows the user can currently see: roots, plus children of expanded groups
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let mut rows = Vec::new();
        for &root in &self.roots {
            self.push_visible(root, 0, &mut rows);
        }
        rows
    }

    fn push_visible(&self, id: NodeId, depth: usize, rows: &mut Vec<VisibleRow>) {
        let Some(node) = self.get(id) else {
            return;
        };
        rows.push(VisibleRow {
            id: node.id(),
            depth,
        });
        if node.expanded {
            for &child in node.children() {
                self.push_visible(child, depth + 1, rows);
            }
        }
    }
}
