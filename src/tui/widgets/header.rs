//! Header widget showing time, mode, and tabs.

use chrono::{DateTime, Local, TimeZone};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::{AppState, InputMode, Tab};
use crate::tui::style::Styles;

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Length(22), // Time
        Constraint::Length(12), // Mode
        Constraint::Min(20),    // Tabs
        Constraint::Length(42), // Filter/Status
    ])
    .split(area);

    // Snapshot time, falling back to the wall clock before the first fetch
    let timestamp = state
        .snapshot
        .as_ref()
        .map(|s| s.generated_at)
        .unwrap_or_else(|| Local::now().timestamp());
    let time_str = Local
        .timestamp_opt(timestamp, 0)
        .single()
        .map(|dt: DateTime<Local>| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "----".to_string());
    let time = Paragraph::new(time_str).style(Styles::header());
    frame.render_widget(time, chunks[0]);

    // Mode
    let mode_str = if state.is_live {
        if state.paused { " PAUSED " } else { " LIVE " }
    } else {
        " SNAPSHOT "
    };
    let mode = Paragraph::new(mode_str).style(Styles::header());
    frame.render_widget(mode, chunks[1]);

    // Tabs
    let tabs: Vec<Span> = Tab::all()
        .iter()
        .enumerate()
        .flat_map(|(i, tab)| {
            let style = if *tab == state.current_tab {
                Styles::tab_active()
            } else {
                Styles::tab_inactive()
            };
            let num = format!(" {}:", i + 1);
            let name = format!("{} ", tab.name());
            vec![Span::styled(num, Styles::dim()), Span::styled(name, style)]
        })
        .collect();
    let tabs_line = Line::from(tabs);
    let tabs_widget = Paragraph::new(tabs_line).style(Styles::header());
    frame.render_widget(tabs_widget, chunks[2]);

    // Filter input or status message
    let (right_content, right_style) = if let Some(msg) = &state.status_message {
        (msg.clone(), Styles::warning())
    } else {
        match state.input_mode {
            InputMode::Filter => (
                format!("Filter: {}█", state.filter_input),
                Styles::filter_input(),
            ),
            InputMode::Normal => {
                let text = match state.pane().filter.as_deref() {
                    Some(filter) => format!("/{}", filter),
                    None => String::new(),
                };
                (text, Styles::header())
            }
        }
    };
    let right = Paragraph::new(right_content).style(right_style);
    frame.render_widget(right, chunks[3]);
}
