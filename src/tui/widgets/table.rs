//! Shared table rendering for windowed resource tables.
//!
//! Renders a [`TableViewModel`] whose rows cover only the mounted window of
//! the logical list. The caller passes where that window starts plus the
//! absolute viewport offset and selection; this module slices the mounted
//! rows down to the lines that fit the area.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Row, Table};

use crate::tui::style::Styles;
use crate::view::common::TableViewModel;

/// Rows of table body that fit into `area` (borders and header deducted).
pub fn viewport_rows(area: Rect) -> usize {
    area.height.saturating_sub(3) as usize
}

/// Renders a windowed table. `window_start` is the absolute index of
/// `vm.rows[0]`; `viewport_offset` and `selected` are absolute indices into
/// the logical row list.
pub fn render_table(
    frame: &mut Frame,
    area: Rect,
    vm: &TableViewModel<Option<String>>,
    window_start: usize,
    viewport_offset: usize,
    selected: usize,
) {
    // Header with sort indicator
    let headers: Vec<Span> = vm
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let indicator = if vm.sort_column == Some(i) {
                if vm.sort_ascending { "▲" } else { "▼" }
            } else {
                ""
            };
            Span::styled(format!("{}{}", h, indicator), Styles::table_header())
        })
        .collect();
    let header = Row::new(headers).style(Styles::table_header()).height(1);

    // The viewport may start below the window anchor after a fast scroll;
    // skip the mounted rows above it.
    let skip = viewport_offset.saturating_sub(window_start);
    let visible = viewport_rows(area);

    let rows: Vec<Row> = vm
        .rows
        .iter()
        .enumerate()
        .skip(skip)
        .take(visible)
        .map(|(idx, row)| {
            let absolute = window_start + idx;
            let base_style = if absolute == selected {
                Styles::selected()
            } else {
                Styles::from_class(row.style)
            };
            let cells: Vec<Span> = row
                .cells
                .iter()
                .map(|cell| match cell.style {
                    Some(class) => Span::styled(cell.text.clone(), Styles::from_class(class)),
                    None => Span::raw(cell.text.clone()),
                })
                .collect();
            Row::new(cells).style(base_style).height(1)
        })
        .collect();

    let constraints: Vec<Constraint> = vm
        .widths
        .iter()
        .map(|&w| {
            if w == 0 {
                Constraint::Fill(1)
            } else {
                Constraint::Length(w)
            }
        })
        .collect();

    let table = Table::new(rows, constraints)
        .header(header)
        .block(
            Block::default()
                .title(vm.title.clone())
                .borders(Borders::ALL)
                .style(Styles::default()),
        )
        .column_spacing(1);

    // Clear the area before rendering to avoid artifacts
    frame.render_widget(Clear, area);
    frame.render_widget(table, area);
}
