//! Right-click menus and delete confirmation

use crate::actions;
use crate::session::Session;
use crate::tree::{NodeId, NodeKind, TreeModel};
use std::sync::Arc;

pub const ADD_GROUP_LABEL: &str = "Add node group";
pub const DELETE_LABEL: &str = "Delete";
pub const COMPOSE_LABEL: &str = "Open in Compose";
pub const BROWSER_LABEL: &str = "Open in Browser";
const GET_ONLY_SUFFIX: &str = " - GET requests only";

pub const DELETE_TITLE: &str = "Confirm delete";
const DELETE_GROUP_MESSAGE: &str =
    "Are you sure? This will delete all groups and nodes nested within.";
const DELETE_SESSION_MESSAGE: &str = "Are you sure you want to delete this session?";
const DELETE_DEFAULT_MESSAGE: &str = "Are you sure?";

/// What a menu item does when chosen
#[derive(Debug, Clone)]
pub enum MenuAction {
    /// Create a group; `None` parent means top level
    AddGroup { parent: Option<NodeId> },
    /// Ask to delete a node and everything under it
    Delete(NodeId),
    Compose(Arc<Session>),
    OpenInBrowser(Arc<Session>),
}

#[derive(Debug, Clone)]
pub struct MenuItem {
    pub label: String,
    pub enabled: bool,
    pub action: MenuAction,
}

impl MenuItem {
    fn enabled(label: impl Into<String>, action: MenuAction) -> Self {
        Self {
            label: label.into(),
            enabled: true,
            action,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContextMenu {
    pub items: Vec<MenuItem>,
}

impl ContextMenu {
    #[cfg(test)]
    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.label.as_str()).collect()
    }
}

/// Build the menu for a right-click on `node` (`None` is the background)
///
/// Nodes that classify as `None` get no menu at all.
pub fn build(tree: &TreeModel, node: Option<NodeId>) -> Option<ContextMenu> {
    let Some(node) = node else {
        return Some(ContextMenu {
            items: vec![MenuItem::enabled(
                ADD_GROUP_LABEL,
                MenuAction::AddGroup { parent: None },
            )],
        });
    };

    let items = match tree.kind(node) {
        NodeKind::InnerNode => vec![
            MenuItem::enabled(
                ADD_GROUP_LABEL,
                MenuAction::AddGroup { parent: Some(node) },
            ),
            MenuItem::enabled(DELETE_LABEL, MenuAction::Delete(node)),
        ],
        NodeKind::SessionNode => {
            let session = tree.session(node)?;
            let browsable = actions::can_open_in_browser(&session);
            let browser_label = if browsable {
                BROWSER_LABEL.to_string()
            } else {
                format!("{BROWSER_LABEL}{GET_ONLY_SUFFIX}")
            };
            vec![
                MenuItem::enabled(COMPOSE_LABEL, MenuAction::Compose(Arc::clone(&session))),
                MenuItem {
                    label: browser_label,
                    enabled: browsable,
                    action: MenuAction::OpenInBrowser(session),
                },
            ]
        }
        NodeKind::None => return None,
    };
    Some(ContextMenu { items })
}

/// A pending Yes/No question before a subtree is removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub node: NodeId,
    pub title: &'static str,
    pub message: &'static str,
}

/// Word the confirmation for deleting `node`
pub fn delete_request(tree: &TreeModel, node: NodeId) -> DeleteRequest {
    let message = match tree.kind(node) {
        NodeKind::InnerNode => DELETE_GROUP_MESSAGE,
        NodeKind::SessionNode => DELETE_SESSION_MESSAGE,
        NodeKind::None => DELETE_DEFAULT_MESSAGE,
    };
    DeleteRequest {
        node,
        title: DELETE_TITLE,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with(method: &str) -> (TreeModel, NodeId, NodeId, Arc<Session>) {
        let mut tree = TreeModel::new();
        let group = tree.create_group(None, "G").unwrap();
        let session = Arc::new(Session::new(1, "h/a", "http://h/a", method));
        let leaf = tree.add_session(group, &session, "h/a").unwrap();
        (tree, group, leaf, session)
    }

    #[test]
    fn test_background_menu_adds_top_level_group() {
        let tree = TreeModel::new();
        let menu = build(&tree, None).unwrap();
        assert_eq!(menu.labels(), vec![ADD_GROUP_LABEL]);
        assert!(matches!(
            menu.items[0].action,
            MenuAction::AddGroup { parent: None }
        ));
    }

    #[test]
    fn test_group_menu() {
        let (tree, group, _, _s) = tree_with("GET");
        let menu = build(&tree, Some(group)).unwrap();
        assert_eq!(menu.labels(), vec![ADD_GROUP_LABEL, DELETE_LABEL]);
        assert!(matches!(
            menu.items[0].action,
            MenuAction::AddGroup { parent: Some(p) } if p == group
        ));
        assert!(menu.items.iter().all(|item| item.enabled));
    }

    #[test]
    fn test_session_menu_for_get() {
        let (tree, _, leaf, _s) = tree_with("get");
        let menu = build(&tree, Some(leaf)).unwrap();
        assert_eq!(menu.labels(), vec![COMPOSE_LABEL, BROWSER_LABEL]);
        assert!(menu.items[1].enabled);
    }

    #[test]
    fn test_session_menu_disables_browser_for_post() {
        let (tree, _, leaf, _s) = tree_with("POST");
        let menu = build(&tree, Some(leaf)).unwrap();
        assert_eq!(menu.items[1].label, "Open in Browser - GET requests only");
        assert!(!menu.items[1].enabled);
        assert!(menu.items[0].enabled);
    }

    #[test]
    fn test_dead_session_has_no_menu() {
        let (tree, _, leaf, s) = tree_with("GET");
        drop(s);
        assert!(build(&tree, Some(leaf)).is_none());
    }

    #[test]
    fn test_delete_messages_by_kind() {
        let (tree, group, leaf, s) = tree_with("GET");
        assert_eq!(delete_request(&tree, group).message, DELETE_GROUP_MESSAGE);
        assert_eq!(delete_request(&tree, leaf).message, DELETE_SESSION_MESSAGE);
        assert_eq!(delete_request(&tree, leaf).title, "Confirm delete");
        drop(s);
        assert_eq!(delete_request(&tree, leaf).message, DELETE_DEFAULT_MESSAGE);
    }
}
