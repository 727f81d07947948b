// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard and mouse input, timer ticks, session feed)
// - Draining deferred Launchpad work after every handled event

pub mod app;
pub mod components;
pub mod host;
pub mod modal;
pub mod theme;
pub mod views;

use crate::config::Config;
use crate::logging::LogBuffer;
use crate::session::{Session, SessionStore};
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::{Modal, ModalAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// when done, even if the loop failed.
pub async fn run_tui(
    mut session_rx: mpsc::Receiver<Session>,
    store: SessionStore,
    log_buffer: LogBuffer,
    config: Config,
) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )
    .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(&config, store, log_buffer);
    let result = run_event_loop(&mut terminal, &mut app, &mut session_rx).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on terminal input, a redraw tick and the session feed at once.
/// Deferred Launchpad work runs after each event's handler has returned.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    session_rx: &mut mpsc::Receiver<Session>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        Ok(Event::Paste(text)) => app.paste(&text),
                        _ => {}
                    }
                }
            } => {}

            _ = tick_interval.tick() => {}

            Some(session) = session_rx.recv() => {
                app.add_session(session);
            }
        }

        app.run_deferred();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Modal → Edit box → Global → Tab-specific
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    if handle_modal_input(app, &key_event) {
        return;
    }
    if handle_edit_input(app, &key_event) {
        return;
    }
    if handle_global_keys(app, &key_event) {
        return;
    }

    if app.on_launchpad_tab() {
        handle_tree_keys(app, key_event.code);
    } else {
        handle_sessions_keys(app, key_event.code);
    }
}

/// Handle modal input - returns true if modal absorbed the input
fn handle_modal_input(app: &mut App, key_event: &KeyEvent) -> bool {
    let Some(ref mut modal) = app.modal else {
        return false;
    };

    match modal.handle_input(key_event.code) {
        ModalAction::None => {}
        ModalAction::Close => app.modal = None,
        ModalAction::Invoke(action) => app.invoke(action),
        ModalAction::Answer(request, confirmed) => app.answer_delete(&request, confirmed),
    }
    true
}

/// The open label edit box takes all keys
fn handle_edit_input(app: &mut App, key_event: &KeyEvent) -> bool {
    if !app.view().rename().is_editing() {
        return false;
    }
    let view = app.view_mut();
    match key_event.code {
        KeyCode::Enter => {
            view.commit_rename();
        }
        KeyCode::Esc => {
            view.cancel_rename();
        }
        KeyCode::Backspace => view.rename_mut().backspace(),
        KeyCode::Char('u') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            view.rename_mut().clear()
        }
        KeyCode::Char(c) => view.rename_mut().push_char(c),
        _ => {}
    }
    true
}

/// Handle global keys - returns true if handled
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('?') => app.modal = Some(Modal::help()),
        KeyCode::Tab | KeyCode::BackTab => app.next_tab(),
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as usize) - ('1' as usize);
            app.select_tab(index);
        }
        _ => return false,
    }
    true
}

fn handle_tree_keys(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.move_tree_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_tree_selection(1),
        KeyCode::PageUp => app.move_tree_selection(-10),
        KeyCode::PageDown => app.move_tree_selection(10),
        KeyCode::Home => {
            app.view_mut().select_first();
            app.track_drag();
        }
        KeyCode::End => {
            app.view_mut().select_last();
            app.track_drag();
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.view_mut().collapse_or_parent();
            app.track_drag();
        }
        KeyCode::Right | KeyCode::Char('l') => app.view_mut().expand_selected(),
        KeyCode::Enter => app.enter_on_tree(),
        KeyCode::Esc => app.view_mut().cancel_drag(),
        KeyCode::Char('d') => app.start_tree_drag(),
        KeyCode::Char('r') | KeyCode::F(2) => app.rename_selected(),
        KeyCode::Char('m') => {
            let selected = app.view().selected();
            app.open_context_menu(selected);
        }
        KeyCode::Char('a') => app.open_context_menu(None),
        KeyCode::Delete => app.ask_delete_selected(),
        KeyCode::Char('s') => app.show_sessions(),
        _ => {}
    }
}

fn handle_sessions_keys(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.move_session_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_session_cursor(1),
        KeyCode::Home => app.sessions_cursor = 0,
        KeyCode::End => app.move_session_cursor(isize::MAX),
        KeyCode::Char(' ') => app.toggle_mark(),
        KeyCode::Char('d') => app.drag_from_sessions(),
        KeyCode::Char('c') | KeyCode::Enter => app.compose_cursor_session(),
        KeyCode::Char('x') | KeyCode::Delete => app.remove_cursor_session(),
        _ => {}
    }
}

/// Handle mouse input on the tree
///
/// Left click selects (double-click activates), right click opens the menu,
/// and dragging with the left button carries the pressed node to the release
/// point.
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    if app.modal.is_some() || !app.on_launchpad_tab() {
        return;
    }
    let node = app.node_at(mouse_event.column, mouse_event.row);

    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => app.mouse_press(node),
        MouseEventKind::Down(MouseButton::Right) => {
            app.view_mut().select(node);
            app.open_context_menu(node);
        }
        MouseEventKind::Drag(MouseButton::Left) => app.mouse_drag(node),
        MouseEventKind::Up(MouseButton::Left) => app.mouse_release(node),
        MouseEventKind::ScrollUp => app.move_tree_selection(-1),
        MouseEventKind::ScrollDown => app.move_tree_selection(1),
        _ => {}
    }
}
