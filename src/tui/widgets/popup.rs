//! Shared popup chrome for the detail and help popups.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::style::Styles;

/// Returns a centered rect of given percentage within `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Renders a popup with unified chrome: border, scroll, footer.
///
/// `content` is the pre-built `Vec<Line>`. `scroll` is mutably borrowed to
/// clamp it within the wrapped line count for the current width.
pub fn render_popup_frame(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    content: Vec<Line<'static>>,
    scroll: &mut usize,
) {
    let popup_area = centered_rect(80, 85, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().fg(Color::White).bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    // Split inner area into content + footer
    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

    // Estimate visual lines after wrapping
    let inner_width = chunks[0].width as usize;
    let visual_lines: usize = if inner_width > 0 {
        content
            .iter()
            .map(|line| {
                let line_width: usize = line.spans.iter().map(|s| s.content.len()).sum();
                if line_width == 0 {
                    1
                } else {
                    line_width.div_ceil(inner_width)
                }
            })
            .sum()
    } else {
        content.len()
    };
    let visible_height = chunks[0].height as usize;
    let max_scroll = visual_lines.saturating_sub(visible_height);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let bg = Style::default().fg(Color::White).bg(Color::Black);

    let paragraph = Paragraph::new(content)
        .style(bg)
        .wrap(Wrap { trim: false })
        .scroll((*scroll as u16, 0));
    frame.render_widget(paragraph, chunks[0]);

    // Footer
    let footer = Line::from(vec![
        Span::styled("↑/↓", Styles::help_key()),
        Span::styled(" scroll  ", Styles::help()),
        Span::styled("PgUp/PgDn", Styles::help_key()),
        Span::styled(" page  ", Styles::help()),
        Span::styled("Esc", Styles::help_key()),
        Span::styled(" close", Styles::help()),
    ]);
    frame.render_widget(Paragraph::new(footer).style(bg), chunks[1]);
}

/// Section header: `── {name} ──`
pub fn section(name: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("── {} ──", name),
        Styles::section_header(),
    ))
}

/// Simple key-value line. Key is right-aligned 16 chars with colon, cyan.
pub fn kv(key: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>16}: ", key), Styles::accent()),
        Span::raw(value.to_string()),
    ])
}

/// Key-value with custom value style.
pub fn kv_styled(key: &str, value: &str, style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>16}: ", key), Styles::accent()),
        Span::styled(value.to_string(), style),
    ])
}
