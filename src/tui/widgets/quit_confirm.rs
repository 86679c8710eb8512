//! Quit confirmation dialog.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::style::Styles;

/// Renders the quit confirmation dialog centered in `area`.
pub fn render_quit_confirm(frame: &mut Frame, area: Rect) {
    let width = (area.width / 2).clamp(38, 56).min(area.width);
    let height = 7.min(area.height);
    let popup = Rect::new(
        (area.width.saturating_sub(width)) / 2,
        (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Exit infratop ")
        .borders(Borders::ALL)
        .border_style(Styles::accent());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let lines = vec![
        Line::from("Quit the viewer?"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Styles::help_key()),
            Span::styled("/", Styles::help()),
            Span::styled("y", Styles::help_key()),
            Span::styled("/", Styles::help()),
            Span::styled("q", Styles::help_key()),
            Span::styled("  quit    ", Styles::help()),
            Span::styled("Esc", Styles::help_key()),
            Span::styled("/", Styles::help()),
            Span::styled("n", Styles::help_key()),
            Span::styled("  stay", Styles::help()),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Styles::default()),
        inner,
    );
}
