//! Launchpad error types

use crate::tree::NodeId;
use thiserror::Error;

/// Errors raised by tree operations and user actions
#[derive(Debug, Error)]
pub enum LaunchpadError {
    /// Only GET requests can be replayed by a browser
    #[error(
        "Only GET requests may be opened in the browser. Failed opening {method} request to {url}."
    )]
    NotGet { method: String, url: String },

    #[error("no tree node with id {0}")]
    UnknownNode(NodeId),

    /// Session nodes are leaves
    #[error("tree node {0} holds a session and cannot have children")]
    LeafHasNoChildren(NodeId),

    /// The host failed to carry out an action (compose, launch)
    #[error(transparent)]
    Host(#[from] anyhow::Error),
}
