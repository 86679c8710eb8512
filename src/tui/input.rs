//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{AppState, InputMode, PopupState, Tab};

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if state.popup == PopupState::QuitConfirm {
        return handle_quit_confirm(state, key);
    }
    match state.input_mode {
        InputMode::Normal => handle_normal_mode(state, key),
        InputMode::Filter => handle_filter_mode(state, key),
    }
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Char('y') => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.popup = PopupState::None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::QuitConfirm;
            KeyAction::None
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

        // Tab navigation (blocked while the detail popup is locked to a row)
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('1') | KeyCode::Char('2')
            if state.popup.is_detail_open() =>
        {
            state.status_message = Some("Close popup (Esc) before switching tabs".to_string());
            KeyAction::None
        }
        KeyCode::Tab => {
            state.switch_tab(state.current_tab.next());
            KeyAction::None
        }
        KeyCode::BackTab => {
            state.switch_tab(state.current_tab.prev());
            KeyAction::None
        }
        KeyCode::Char('1') => {
            state.switch_tab(Tab::Hosts);
            KeyAction::None
        }
        KeyCode::Char('2') => {
            state.switch_tab(Tab::Services);
            KeyAction::None
        }

        // Row navigation (or popup scroll if a popup is open)
        KeyCode::Up | KeyCode::Char('k') => {
            match &mut state.popup {
                PopupState::Help { scroll } | PopupState::Detail { scroll } => {
                    *scroll = scroll.saturating_sub(1);
                }
                _ => state.pane_mut().select_up(),
            }
            KeyAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            match &mut state.popup {
                PopupState::Help { scroll } | PopupState::Detail { scroll } => {
                    // Clamped against the rendered line count during draw.
                    *scroll = scroll.saturating_add(1);
                }
                _ => state.pane_mut().select_down(),
            }
            KeyAction::None
        }
        KeyCode::PageUp => {
            match &mut state.popup {
                PopupState::Help { scroll } | PopupState::Detail { scroll } => {
                    *scroll = scroll.saturating_sub(10);
                }
                _ => state.pane_mut().page_up(20),
            }
            KeyAction::None
        }
        KeyCode::PageDown => {
            match &mut state.popup {
                PopupState::Help { scroll } | PopupState::Detail { scroll } => {
                    *scroll = scroll.saturating_add(10);
                }
                _ => state.pane_mut().page_down(20),
            }
            KeyAction::None
        }
        KeyCode::Home => {
            state.pane_mut().home();
            KeyAction::None
        }
        KeyCode::End => {
            state.pane_mut().end();
            KeyAction::None
        }

        // Sorting
        KeyCode::Char('s') | KeyCode::Char('S') => {
            state.next_sort_column();
            KeyAction::None
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            state.toggle_sort_direction();
            KeyAction::None
        }

        // Cluster grouping (host table only)
        KeyCode::Char('g') | KeyCode::Char('G') => {
            if state.current_tab == Tab::Hosts {
                state.group_mode = state.group_mode.toggled();
            }
            KeyAction::None
        }

        // Filter mode
        KeyCode::Char('/') => {
            state.input_mode = InputMode::Filter;
            state.filter_input.clear();
            KeyAction::None
        }

        // Pause/Resume
        KeyCode::Char(' ') => {
            state.paused = !state.paused;
            KeyAction::None
        }

        // Jump to the parent host of the selected guest
        KeyCode::Char('o') | KeyCode::Char('O') => {
            if state.popup.is_open() {
                state.status_message = Some("Close popup (Esc) before jumping".to_string());
            } else if state.current_tab == Tab::Hosts {
                state.parent_jump_requested = true;
            }
            KeyAction::None
        }

        // Help popup
        KeyCode::Char('?') | KeyCode::Char('H') => {
            state.popup = match state.popup {
                PopupState::Help { .. } => PopupState::None,
                _ => PopupState::Help { scroll: 0 },
            };
            KeyAction::None
        }

        // Detail popup, locked to the selected resource
        KeyCode::Enter => {
            match state.popup {
                PopupState::Detail { .. } => {
                    state.popup = PopupState::None;
                    state.detail_id = None;
                }
                PopupState::None => {
                    // Lock the popup to the tracked resource so it survives
                    // re-sorts and refreshes underneath.
                    if let Some(id) = state.pane().tracked_id.clone() {
                        state.detail_id = Some(id);
                        state.popup = PopupState::Detail { scroll: 0 };
                    }
                }
                _ => {}
            }
            KeyAction::None
        }

        // Close popups with Escape
        KeyCode::Esc => {
            state.status_message = None;
            if state.popup.is_open() {
                if state.popup.is_detail_open() {
                    state.detail_id = None;
                }
                state.popup = PopupState::None;
            }
            KeyAction::None
        }

        _ => KeyAction::None,
    }
}

/// Handles keys in filter mode.
fn handle_filter_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            // Cancel filter
            state.input_mode = InputMode::Normal;
            state.filter_input.clear();
            state.pane_mut().set_filter(None);
            KeyAction::None
        }
        KeyCode::Enter => {
            // Confirm filter and return to normal mode
            state.input_mode = InputMode::Normal;
            // Filter is already applied in real-time, just switch mode
            KeyAction::None
        }
        KeyCode::Backspace => {
            state.filter_input.pop();
            apply_current_filter(state);
            KeyAction::None
        }
        KeyCode::Char(c) => {
            state.filter_input.push(c);
            apply_current_filter(state);
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Applies the current filter_input to the active pane.
fn apply_current_filter(state: &mut AppState) {
    let filter = if state.filter_input.is_empty() {
        None
    } else {
        Some(state.filter_input.clone())
    };
    state.pane_mut().set_filter(filter);
}
