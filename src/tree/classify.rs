//! Node classification
//!
//! A node's kind is a pure function of its payload, recomputed on every query.

use super::{NodePayload, TreeNode};
use crate::session::Session;
use std::sync::Arc;

/// Semantic kind of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A user-named group
    InnerNode,
    /// A leaf pointing at a live session
    SessionNode,
    /// Missing node, or a leaf whose session the host has dropped
    None,
}

/// Classify a node; total, never fails
pub fn classify(node: Option<&TreeNode>) -> NodeKind {
    match node.map(TreeNode::payload) {
        Some(NodePayload::Group { .. }) => NodeKind::InnerNode,
        Some(NodePayload::Session(session)) if session.strong_count() > 0 => {
            NodeKind::SessionNode
        }
        _ => NodeKind::None,
    }
}

/// The session behind a node, only for [`NodeKind::SessionNode`]s
pub fn session_of(node: Option<&TreeNode>) -> Option<Arc<Session>> {
    match node.map(TreeNode::payload) {
        Some(NodePayload::Session(session)) => session.upgrade(),
        _ => None,
    }
}
