//! Host table widget: nodes, guests, docker hosts, and standalone machines.
//!
//! Runs the full presentation pipeline each frame: split off services,
//! filter, sort, compute the I/O emphasis scale over the table subset,
//! group, resolve the selection, advance the virtualization window, and
//! hand the mounted rows to the shared table renderer.

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::aggregate::{compute_io_scale, group_resources, sort_resources, split_hosts_services};
use crate::tui::state::AppState;
use crate::view::rows::{build_host_table, build_row_items};

use super::empty_pane;
use super::table::{render_table, viewport_rows};

/// Renders the hosts tab.
pub fn render_hosts(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let Some(snapshot) = state.snapshot.as_ref() else {
        empty_pane(frame, area, "hosts");
        return;
    };

    let (mut hosts, _) = split_hosts_services(&snapshot.resources);
    if let Some(filter) = state.hosts.filter.as_deref() {
        hosts.retain(|r| r.matches_filter(filter));
    }
    sort_resources(&mut hosts, state.sort.0, state.sort.1);

    // Emphasis is relative to the rows actually in the table.
    let scale = compute_io_scale(&hosts);
    let groups = group_resources(&hosts, state.group_mode);
    let items = build_row_items(&groups, state.group_mode);
    let ids: Vec<Option<&str>> = items
        .iter()
        .map(|item| item.resource().map(|r| r.id.as_str()))
        .collect();

    let total = items.len();
    let rows = viewport_rows(area);
    let pane = &mut state.hosts;
    if pane.resolve_selection(&ids) {
        pane.center_on_selected(rows, total);
    }
    // Watched continuously: any selection move edge-triggers a reveal when
    // it lands outside the mounted window.
    pane.window.watch_reveal_target(total, Some(pane.selected));
    pane.scroll_into_view(rows, total);
    pane.window
        .on_scroll(total, pane.viewport_offset as f64, rows as f64, 1.0);
    let range = pane.window.range(total);

    let mut vm = build_host_table(&items, &scale, range, state.sort);
    vm.title = match pane.filter.as_deref() {
        Some(f) => format!(" {} (filter: {f}) ", vm.title),
        None => format!(" {} ", vm.title),
    };
    render_table(frame, area, &vm, range.0, pane.viewport_offset, pane.selected);
}
