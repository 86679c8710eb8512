//! TUI widgets for infratop.

mod detail;
mod header;
mod help;
mod popup;
mod quit_confirm;
mod resources;
mod services;
mod summary;
mod table;

pub use detail::render_detail;
pub use header::render_header;
pub use help::render_help;
pub use quit_confirm::render_quit_confirm;
pub use resources::render_hosts;
pub use services::render_services;
pub use summary::render_summary;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::style::Styles;

/// Placeholder pane shown before the first snapshot arrives.
fn empty_pane(frame: &mut Frame, area: Rect, title: &str) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .style(Styles::default());
    let msg = Paragraph::new("Waiting for data...").block(block);
    frame.render_widget(Clear, area);
    frame.render_widget(msg, area);
}
