// Modal system for TUI overlays
//
// Self-contained modal dialogs that handle their own input and return actions.
// App just holds Option<Modal>, input routing acts on returned ModalAction.

use crate::menu::{ContextMenu, DeleteRequest, MenuAction};
use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    /// Close the modal
    Close,
    /// A menu item was chosen
    Invoke(MenuAction),
    /// The delete question was answered
    Answer(DeleteRequest, bool),
}

/// Available modal types
#[derive(Debug, Clone)]
pub enum Modal {
    /// Help overlay - shows keyboard shortcuts
    Help,
    /// Right-click menu with a cursor over its items
    ContextMenu { menu: ContextMenu, cursor: usize },
    /// Yes/No question before a delete; `yes` is the focused button
    Confirm { request: DeleteRequest, yes: bool },
}

impl Modal {
    pub fn help() -> Self {
        Modal::Help
    }

    /// Open a menu with the first enabled item under the cursor
    pub fn context_menu(menu: ContextMenu) -> Self {
        let cursor = menu.items.iter().position(|item| item.enabled).unwrap_or(0);
        Modal::ContextMenu { menu, cursor }
    }

    /// Ask before deleting; "No" is focused so Enter is safe
    pub fn confirm(request: DeleteRequest) -> Self {
        Modal::Confirm {
            request,
            yes: false,
        }
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::ContextMenu { menu, cursor } => match key {
                KeyCode::Esc | KeyCode::Char('q') => ModalAction::Close,
                KeyCode::Up | KeyCode::Char('k') => {
                    *cursor = cursor.saturating_sub(1);
                    ModalAction::None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    *cursor = (*cursor + 1).min(menu.items.len().saturating_sub(1));
                    ModalAction::None
                }
                KeyCode::Enter => match menu.items.get(*cursor) {
                    Some(item) if item.enabled => ModalAction::Invoke(item.action.clone()),
                    _ => ModalAction::None,
                },
                _ => ModalAction::None,
            },
            Modal::Confirm { request, yes } => match key {
                KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                    ModalAction::Answer(request.clone(), false)
                }
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    ModalAction::Answer(request.clone(), true)
                }
                KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h') | KeyCode::Char('l') => {
                    *yes = !*yes;
                    ModalAction::None
                }
                KeyCode::Enter => ModalAction::Answer(request.clone(), *yes),
                _ => ModalAction::None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu;
    use crate::session::Session;
    use crate::tree::TreeModel;
    use std::sync::Arc;

    #[test]
    fn test_disabled_item_cannot_be_invoked() {
        let mut tree = TreeModel::new();
        let group = tree.create_group(None, "G").unwrap();
        let session = Arc::new(Session::new(1, "h/x", "http://h/x", "POST"));
        let leaf = tree.add_session(group, &session, "h/x").unwrap();

        let mut modal = Modal::context_menu(menu::build(&tree, Some(leaf)).unwrap());
        modal.handle_input(KeyCode::Down);
        assert!(matches!(modal.handle_input(KeyCode::Enter), ModalAction::None));

        modal.handle_input(KeyCode::Up);
        assert!(matches!(
            modal.handle_input(KeyCode::Enter),
            ModalAction::Invoke(MenuAction::Compose(_))
        ));
    }

    #[test]
    fn test_confirm_defaults_to_no() {
        let mut tree = TreeModel::new();
        let group = tree.create_group(None, "G").unwrap();
        let mut modal = Modal::confirm(menu::delete_request(&tree, group));

        assert!(matches!(
            modal.handle_input(KeyCode::Enter),
            ModalAction::Answer(_, false)
        ));
        modal.handle_input(KeyCode::Left);
        assert!(matches!(
            modal.handle_input(KeyCode::Enter),
            ModalAction::Answer(_, true)
        ));
        assert!(matches!(
            modal.handle_input(KeyCode::Esc),
            ModalAction::Answer(_, false)
        ));
    }
}
