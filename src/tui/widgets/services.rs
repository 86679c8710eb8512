//! Services table widget: PBS and PMG instances.

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::aggregate::{default_compare, split_hosts_services};
use crate::tui::state::AppState;
use crate::view::rows::build_service_table;

use super::empty_pane;
use super::table::{render_table, viewport_rows};

/// Renders the services tab. The list is short and stays in the default
/// order regardless of the host-table sort column.
pub fn render_services(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let Some(snapshot) = state.snapshot.as_ref() else {
        empty_pane(frame, area, "services");
        return;
    };

    let (_, mut services) = split_hosts_services(&snapshot.resources);
    if let Some(filter) = state.services.filter.as_deref() {
        services.retain(|r| r.matches_filter(filter));
    }
    services.sort_by(|a, b| default_compare(a, b));

    let ids: Vec<Option<&str>> = services.iter().map(|r| Some(r.id.as_str())).collect();

    let total = services.len();
    let rows = viewport_rows(area);
    let pane = &mut state.services;
    if pane.resolve_selection(&ids) {
        pane.center_on_selected(rows, total);
    }
    pane.window.watch_reveal_target(total, Some(pane.selected));
    pane.scroll_into_view(rows, total);
    pane.window
        .on_scroll(total, pane.viewport_offset as f64, rows as f64, 1.0);
    let range = pane.window.range(total);

    let mut vm = build_service_table(&services, range);
    vm.title = match pane.filter.as_deref() {
        Some(f) => format!(" {} (filter: {f}) ", vm.title),
        None => format!(" {} ", vm.title),
    };
    render_table(frame, area, &vm, range.0, pane.viewport_offset, pane.selected);
}
