//! Help popup with per-tab key and column descriptions.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};

use crate::tui::state::Tab;
use crate::tui::style::Styles;

use super::popup::render_popup_frame;

/// Renders the help popup for the active tab.
pub fn render_help(frame: &mut Frame, area: Rect, tab: Tab, scroll: &mut usize) {
    let (title, content) = match tab {
        Tab::Hosts => ("hosts help", hosts_help()),
        Tab::Services => ("services help", services_help()),
    };
    render_popup_frame(frame, area, title, content, scroll);
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, Styles::section_header()))
}

fn hosts_help() -> Vec<Line<'static>> {
    vec![
        heading("Keys"),
        Line::from(""),
        Line::from("s       - cycle sort column (name starts ascending,"),
        Line::from("          metric columns start with the biggest consumers)"),
        Line::from("r       - reverse sort direction; a second reverse on the"),
        Line::from("          same column returns to the default order"),
        Line::from("g       - group hosts by cluster (standalone hosts last)"),
        Line::from("o       - jump to the parent of the selected guest"),
        Line::from("/       - filter by name, id, type, cluster, or status"),
        Line::from("Enter   - open the detail popup for the selected row"),
        Line::from("Space   - pause/resume refresh"),
        Line::from("Tab 1 2 - switch tabs"),
        Line::from(""),
        heading("Columns"),
        Line::from(""),
        Line::from("NAME    - display name; ⧉ marks a host merged from several"),
        Line::from("          origin platforms; ▾ rows are cluster headers"),
        Line::from("TYPE    - node, VM, CT, docker, k8s, pod, host, ..."),
        Line::from("STATUS  - platform-reported state; red = offline/stopped"),
        Line::from("CPU     - utilization percent"),
        Line::from("MEM/DISK- used percent of capacity; '-' = not reported"),
        Line::from("NET     - combined receive+transmit rate"),
        Line::from("IO      - combined disk read+write rate"),
        Line::from("TEMP    - degrees Celsius, when the platform reports it"),
        Line::from("UPTIME  - time since boot/start"),
        Line::from("SRC     - origin platform and collection mechanism"),
        Line::from(""),
        heading("I/O emphasis"),
        Line::from(""),
        Line::from("NET and IO cells are shaded relative to the rest of the"),
        Line::from("table: gray = idle, yellow = elevated, red bold = far"),
        Line::from("above typical. '*' marks the strongest outliers. The"),
        Line::from("scale recomputes from the rows currently in the table,"),
        Line::from("so a filtered view re-ranks against itself."),
        Line::from(""),
        heading("Sorting rules"),
        Line::from(""),
        Line::from("Default order: online resources first, then name"),
        Line::from("Rows without a metric sort last in either direction"),
        Line::from("Ties fall back to the default order"),
    ]
}

fn services_help() -> Vec<Line<'static>> {
    vec![
        heading("Columns"),
        Line::from(""),
        Line::from("NAME    - service display name"),
        Line::from("TYPE    - PBS (backup server) or PMG (mail gateway)"),
        Line::from("STATUS  - platform-reported state"),
        Line::from("VERSION - service software version"),
        Line::from("HEALTH  - connection health (healthy/degraded/unreachable)"),
        Line::from("DETAILS - PBS: datastores, backup jobs, last backup age"),
        Line::from("          PMG: queue depth, spam/virus counts (24h)"),
        Line::from(""),
        heading("Keys"),
        Line::from(""),
        Line::from("Services always list in the default order (online first,"),
        Line::from("then name); the host-table sort column does not apply."),
        Line::from("/       - filter by name, id, or status"),
        Line::from("Enter   - open the detail popup for the selected row"),
    ]
}
