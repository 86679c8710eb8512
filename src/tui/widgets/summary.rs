//! Summary widget showing fleet-wide counts and the active view settings.
//!
//! Three fixed lines below the header bar:
//! - resource counts (online/offline, hosts/services, clusters, merged)
//! - data source, sort order, grouping, and any provider error
//! - key hints for the current tab

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::aggregate::GroupMode;
use crate::tui::state::{AppState, Tab};
use crate::tui::style::Styles;
use crate::view::rows::FleetSummary;

/// Renders the summary panel.
pub fn render_summary(frame: &mut Frame, area: Rect, state: &AppState) {
    let lines = match &state.snapshot {
        Some(snapshot) => {
            let s = FleetSummary::collect(&snapshot.resources);
            vec![
                counts_line(&s),
                settings_line(state),
                help_line(state.current_tab),
            ]
        }
        None => vec![
            Line::from("Waiting for data..."),
            settings_line(state),
            help_line(state.current_tab),
        ],
    };
    frame.render_widget(Paragraph::new(lines), area);
}

fn counts_line(s: &FleetSummary) -> Line<'static> {
    let offline_style = if s.offline > 0 {
        Styles::critical()
    } else {
        Styles::dim()
    };
    let mut spans = vec![
        Span::styled(format!(" {} resources", s.total), Styles::default()),
        Span::styled("  │  ", Styles::dim()),
        Span::styled(format!("{} online", s.online), Styles::online()),
        Span::raw(" "),
        Span::styled(format!("{} offline", s.offline), offline_style),
        Span::styled("  │  ", Styles::dim()),
        Span::styled(
            format!("{} hosts {} services", s.hosts, s.services),
            Styles::default(),
        ),
        Span::styled("  │  ", Styles::dim()),
        Span::styled(format!("{} clusters", s.clusters), Styles::default()),
    ];
    if s.merged > 0 {
        spans.push(Span::styled("  │  ", Styles::dim()));
        spans.push(Span::styled(format!("{} merged ⧉", s.merged), Styles::accent()));
    }
    Line::from(spans)
}

fn settings_line(state: &AppState) -> Line<'static> {
    let mut spans = vec![
        Span::styled(format!(" source: {}", state.source_label), Styles::dim()),
        Span::styled("  │  ", Styles::dim()),
        Span::styled(format!("sort: {}", state.sort_label()), Styles::default()),
    ];
    if state.group_mode == GroupMode::Grouped {
        spans.push(Span::styled("  │  ", Styles::dim()));
        spans.push(Span::styled("grouped".to_string(), Styles::accent()));
    }
    if let Some(err) = &state.last_error {
        spans.push(Span::styled("  │  ", Styles::dim()));
        spans.push(Span::styled(format!("stale: {}", err), Styles::warning()));
    }
    Line::from(spans)
}

fn help_line(tab: Tab) -> Line<'static> {
    let mut spans = vec![
        Span::styled(" q", Styles::help_key()),
        Span::styled(":quit(", Styles::help()),
        Span::styled("qq", Styles::help_key()),
        Span::styled("/", Styles::help()),
        Span::styled("Enter", Styles::help_key()),
        Span::styled(") ", Styles::help()),
        Span::styled("s", Styles::help_key()),
        Span::styled(":sort ", Styles::help()),
        Span::styled("r", Styles::help_key()),
        Span::styled(":rev ", Styles::help()),
        Span::styled("/", Styles::help_key()),
        Span::styled(":filter ", Styles::help()),
    ];

    // Tab-specific hints
    if tab == Tab::Hosts {
        spans.push(Span::styled("g", Styles::help_key()));
        spans.push(Span::styled(":group ", Styles::help()));
        spans.push(Span::styled("o", Styles::help_key()));
        spans.push(Span::styled(":parent ", Styles::help()));
    }

    spans.push(Span::styled("Enter", Styles::help_key()));
    spans.push(Span::styled(":detail ", Styles::help()));
    spans.push(Span::styled("Space", Styles::help_key()));
    spans.push(Span::styled(":pause ", Styles::help()));
    spans.push(Span::styled("?", Styles::help_key()));
    spans.push(Span::styled(":help", Styles::help()));

    Line::from(spans)
}
