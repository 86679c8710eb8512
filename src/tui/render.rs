//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use super::state::{AppState, PopupState, Tab};
use super::widgets::{
    render_detail, render_header, render_help, render_hosts, render_quit_confirm, render_services,
    render_summary,
};

/// Main render function.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    // Main layout: header, summary, content
    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Length(3), // Summary: counts, view settings, key hints
        Constraint::Min(10),   // Content area
    ])
    .split(area);

    render_header(frame, chunks[0], state);
    render_summary(frame, chunks[1], state);
    render_content(frame, chunks[2], state);

    // Popups (rendered last to overlay everything)
    if state.popup.is_detail_open() {
        render_detail(frame, area, state);
    }
    let tab = state.current_tab;
    if let PopupState::Help { scroll } = &mut state.popup {
        render_help(frame, area, tab, scroll);
    }
    if state.popup == PopupState::QuitConfirm {
        render_quit_confirm(frame, area);
    }
}

/// Renders content based on current tab.
fn render_content(frame: &mut Frame, area: Rect, state: &mut AppState) {
    match state.current_tab {
        Tab::Hosts => render_hosts(frame, area, state),
        Tab::Services => render_services(frame, area, state),
    }
}
