//! Application state management.

use crate::aggregate::{GroupMode, SortDirection, SortKey, toggle_sort};
use crate::model::FleetSnapshot;
use crate::window::RowWindow;

/// Available tabs in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Hosts,
    Services,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Hosts, Tab::Services]
    }

    /// Returns the display name of the tab.
    pub fn name(&self) -> &'static str {
        match self {
            Tab::Hosts => "HOSTS",
            Tab::Services => "SVC",
        }
    }

    /// Returns the next tab.
    pub fn next(&self) -> Tab {
        match self {
            Tab::Hosts => Tab::Services,
            Tab::Services => Tab::Hosts,
        }
    }

    /// Returns the previous tab.
    pub fn prev(&self) -> Tab {
        self.next()
    }
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Filter,
}

/// Active popup state. Only one popup can be open at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PopupState {
    /// No popup is open.
    #[default]
    None,
    /// Help popup with scroll offset.
    Help { scroll: usize },
    /// Resource detail popup with scroll offset.
    Detail { scroll: usize },
    /// Quit confirmation dialog.
    QuitConfirm,
}

impl PopupState {
    /// Returns true if any popup is open (excluding None).
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }

    pub fn is_detail_open(&self) -> bool {
        matches!(self, Self::Detail { .. })
    }
}

/// Per-tab selection, filter, and virtualization state.
///
/// Selection follows a tracked resource id across re-sorts and refreshes;
/// the numeric index is re-resolved against the current display-row list on
/// every render. `navigate_to` is a one-shot jump target consumed by the
/// next [`PaneState::resolve_selection`] call.
#[derive(Debug)]
pub struct PaneState {
    /// Selected display-row index, resolved against the current row list.
    pub selected: usize,
    /// Resource id the selection follows across reorderings.
    pub tracked_id: Option<String>,
    /// One-shot jump target (resource id).
    pub navigate_to: Option<String>,
    /// Committed filter string.
    pub filter: Option<String>,
    /// First display row shown in the terminal viewport.
    pub viewport_offset: usize,
    /// Row virtualization window for this pane.
    pub window: RowWindow,
}

impl PaneState {
    pub fn new(window: RowWindow) -> Self {
        Self {
            selected: 0,
            tracked_id: None,
            navigate_to: None,
            filter: None,
            viewport_offset: 0,
            window,
        }
    }

    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.tracked_id = None;
    }

    pub fn select_down(&mut self) {
        // Clamped against the row list during render.
        self.selected = self.selected.saturating_add(1);
        self.tracked_id = None;
    }

    pub fn page_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
        self.tracked_id = None;
    }

    pub fn page_down(&mut self, n: usize) {
        self.selected = self.selected.saturating_add(n);
        self.tracked_id = None;
    }

    pub fn home(&mut self) {
        self.selected = 0;
        self.tracked_id = None;
    }

    pub fn end(&mut self) {
        self.selected = usize::MAX;
        self.tracked_id = None;
    }

    pub fn set_filter(&mut self, filter: Option<String>) {
        self.filter = filter;
        self.selected = 0;
        self.viewport_offset = 0;
        self.tracked_id = None;
    }

    /// Resolves the selection against the current display-row list.
    ///
    /// `ids` carries one entry per display row; `None` marks a group header
    /// pseudo-row, which the selection never rests on. Consumes
    /// `navigate_to`, follows the tracked id, clamps the index, and
    /// re-derives the tracked id from the final row. Returns true when a
    /// jump target was consumed so the caller can recenter the view.
    pub fn resolve_selection(&mut self, ids: &[Option<&str>]) -> bool {
        let total = ids.len();
        let mut jumped = false;

        if let Some(target) = self.navigate_to.take() {
            self.tracked_id = Some(target);
            jumped = true;
        }

        if let Some(tracked) = self.tracked_id.as_deref() {
            if let Some(idx) = ids.iter().position(|id| *id == Some(tracked)) {
                self.selected = idx;
            } else {
                self.tracked_id = None;
            }
        }

        if total == 0 {
            self.selected = 0;
            self.tracked_id = None;
            return jumped;
        }

        self.selected = self.selected.min(total - 1);
        if ids[self.selected].is_none() {
            let below = ids[self.selected..]
                .iter()
                .position(|id| id.is_some())
                .map(|off| self.selected + off);
            let above = ids[..self.selected].iter().rposition(|id| id.is_some());
            if let Some(idx) = below.or(above) {
                self.selected = idx;
            }
        }
        self.tracked_id = ids[self.selected].map(str::to_string);
        jumped
    }

    /// Adjusts the viewport so the selected row is on screen.
    pub fn scroll_into_view(&mut self, viewport_rows: usize, total: usize) {
        let rows = viewport_rows.max(1);
        if self.selected < self.viewport_offset {
            self.viewport_offset = self.selected;
        } else if self.selected >= self.viewport_offset + rows {
            self.viewport_offset = self.selected + 1 - rows;
        }
        self.viewport_offset = self.viewport_offset.min(total.saturating_sub(rows));
    }

    /// Centers the viewport on the selected row, for jump navigation.
    pub fn center_on_selected(&mut self, viewport_rows: usize, total: usize) {
        let rows = viewport_rows.max(1);
        self.viewport_offset = self
            .selected
            .saturating_sub(rows / 2)
            .min(total.saturating_sub(rows));
    }
}

/// Main application state.
#[derive(Debug)]
pub struct AppState {
    /// Current active tab.
    pub current_tab: Tab,
    /// Input mode.
    pub input_mode: InputMode,
    /// Filter input buffer.
    pub filter_input: String,
    /// Current fleet snapshot.
    pub snapshot: Option<FleetSnapshot>,
    /// Active sort column and direction, shared by both tabs.
    pub sort: (SortKey, SortDirection),
    /// Host table grouping mode.
    pub group_mode: GroupMode,
    /// Hosts tab state.
    pub hosts: PaneState,
    /// Services tab state.
    pub services: PaneState,
    /// Active popup. Only one popup can be open at a time.
    pub popup: PopupState,
    /// Resource id the detail popup is locked to.
    pub detail_id: Option<String>,
    /// Paused state (refresh suspended).
    pub paused: bool,
    /// Whether the provider produces fresh data on its own.
    pub is_live: bool,
    /// Provider description for the summary line.
    pub source_label: String,
    /// Last provider error, shown until the next successful refresh.
    pub last_error: Option<String>,
    /// Temporary status message shown in the header.
    pub status_message: Option<String>,
    /// Flag set when the user requests a jump to the parent resource.
    /// Cleared after processing by app.rs.
    pub parent_jump_requested: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(true, RowWindow::new())
    }
}

impl AppState {
    pub fn new(is_live: bool, window: RowWindow) -> Self {
        Self {
            current_tab: Tab::Hosts,
            input_mode: InputMode::Normal,
            filter_input: String::new(),
            snapshot: None,
            sort: (SortKey::Default, SortDirection::Ascending),
            group_mode: GroupMode::Flat,
            hosts: PaneState::new(window.clone()),
            services: PaneState::new(window),
            popup: PopupState::None,
            detail_id: None,
            paused: false,
            is_live,
            source_label: String::new(),
            last_error: None,
            status_message: None,
            parent_jump_requested: false,
        }
    }

    /// State of the currently active pane.
    pub fn pane_mut(&mut self) -> &mut PaneState {
        match self.current_tab {
            Tab::Hosts => &mut self.hosts,
            Tab::Services => &mut self.services,
        }
    }

    pub fn pane(&self) -> &PaneState {
        match self.current_tab {
            Tab::Hosts => &self.hosts,
            Tab::Services => &self.services,
        }
    }

    /// Switches to a new tab and syncs the filter input display.
    pub fn switch_tab(&mut self, new_tab: Tab) {
        if self.current_tab != new_tab {
            self.current_tab = new_tab;
            self.status_message = None;
            self.filter_input = self.pane().filter.clone().unwrap_or_default();
        }
    }

    /// Cycles to the next sort column, starting it in its natural direction.
    pub fn next_sort_column(&mut self) {
        let key = self.sort.0.next();
        self.sort = (key, key.initial_direction());
    }

    /// Advances the active column's toggle cycle (flip, then back to default).
    pub fn toggle_sort_direction(&mut self) {
        self.sort = toggle_sort(self.sort, self.sort.0);
    }

    /// Footer label for the current sort, e.g. "cpu ▼".
    pub fn sort_label(&self) -> String {
        let (key, direction) = self.sort;
        if key == SortKey::Default {
            "default".to_string()
        } else {
            format!("{} {}", key.label(), direction.arrow())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_cycle_is_closed() {
        assert_eq!(Tab::Hosts.next(), Tab::Services);
        assert_eq!(Tab::Services.next(), Tab::Hosts);
        for tab in Tab::all() {
            assert_eq!(tab.next().prev().next(), tab.next());
        }
    }

    #[test]
    fn sort_cycle_walks_all_columns_and_wraps() {
        let mut state = AppState::default();
        assert_eq!(state.sort.0, SortKey::Default);

        let mut seen = vec![state.sort.0];
        for _ in 0..9 {
            state.next_sort_column();
            seen.push(state.sort.0);
        }
        state.next_sort_column();
        assert_eq!(state.sort, (SortKey::Default, SortDirection::Ascending));
        seen.sort_by_key(|k| k.label());
        seen.dedup();
        assert_eq!(seen.len(), 10); // every column visited exactly once
    }

    #[test]
    fn direction_toggle_returns_to_default_on_third_press() {
        let mut state = AppState::default();
        state.sort = (SortKey::Cpu, SortDirection::Descending);

        state.toggle_sort_direction();
        assert_eq!(state.sort, (SortKey::Cpu, SortDirection::Ascending));
        state.toggle_sort_direction();
        assert_eq!(state.sort, (SortKey::Default, SortDirection::Ascending));
        // Toggling the default order is a no-op.
        state.toggle_sort_direction();
        assert_eq!(state.sort, (SortKey::Default, SortDirection::Ascending));
    }

    #[test]
    fn resolve_selection_follows_tracked_id() {
        let mut pane = PaneState::new(RowWindow::new());
        pane.resolve_selection(&[Some("a"), Some("b"), Some("c")]);
        assert_eq!(pane.selected, 0);
        assert_eq!(pane.tracked_id.as_deref(), Some("a"));

        // The tracked row moved; selection follows it.
        pane.resolve_selection(&[Some("b"), Some("c"), Some("a")]);
        assert_eq!(pane.selected, 2);

        // Tracked row disappeared; selection clamps and re-tracks.
        pane.resolve_selection(&[Some("b")]);
        assert_eq!(pane.selected, 0);
        assert_eq!(pane.tracked_id.as_deref(), Some("b"));
    }

    #[test]
    fn resolve_selection_skips_header_rows() {
        let mut pane = PaneState::new(RowWindow::new());
        // Index 0 is a group header; selection moves to the first resource.
        pane.resolve_selection(&[None, Some("a"), Some("b")]);
        assert_eq!(pane.selected, 1);

        // Clamping onto a trailing header walks back up.
        pane.selected = 10;
        pane.tracked_id = None;
        pane.resolve_selection(&[Some("a"), Some("b"), None]);
        assert_eq!(pane.selected, 1);
        assert_eq!(pane.tracked_id.as_deref(), Some("b"));
    }

    #[test]
    fn resolve_selection_consumes_navigate_target() {
        let mut pane = PaneState::new(RowWindow::new());
        pane.navigate_to = Some("c".to_string());
        let jumped = pane.resolve_selection(&[Some("a"), Some("b"), Some("c")]);
        assert!(jumped);
        assert_eq!(pane.selected, 2);
        assert!(pane.navigate_to.is_none());

        // The next resolve is an ordinary one.
        assert!(!pane.resolve_selection(&[Some("a"), Some("b"), Some("c")]));
    }

    #[test]
    fn resolve_selection_survives_empty_lists() {
        let mut pane = PaneState::new(RowWindow::new());
        pane.selected = 5;
        pane.tracked_id = Some("x".to_string());
        pane.resolve_selection(&[]);
        assert_eq!(pane.selected, 0);
        assert!(pane.tracked_id.is_none());
    }

    #[test]
    fn scroll_into_view_moves_the_viewport_minimally() {
        let mut pane = PaneState::new(RowWindow::new());
        pane.selected = 50;
        pane.scroll_into_view(20, 100);
        assert_eq!(pane.viewport_offset, 31); // selected on the last line

        pane.selected = 31;
        pane.scroll_into_view(20, 100);
        assert_eq!(pane.viewport_offset, 31); // still visible, no move

        pane.selected = 10;
        pane.scroll_into_view(20, 100);
        assert_eq!(pane.viewport_offset, 10);
    }

    #[test]
    fn switch_tab_restores_the_target_filter() {
        let mut state = AppState::default();
        state.services.filter = Some("pbs".to_string());
        state.switch_tab(Tab::Services);
        assert_eq!(state.filter_input, "pbs");
        state.switch_tab(Tab::Hosts);
        assert_eq!(state.filter_input, "");
    }
}
