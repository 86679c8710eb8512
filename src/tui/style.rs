//! Color scheme and styles (atop-style).

use ratatui::style::{Color, Modifier, Style};

use crate::view::common::RowStyleClass;

/// Terminal color palette.
pub struct Theme;

impl Theme {
    // Background colors
    pub const BG: Color = Color::Reset;
    pub const HEADER_BG: Color = Color::Blue;
    pub const SELECTED_BG: Color = Color::DarkGray;

    // Foreground colors
    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;
    pub const HEADER_FG: Color = Color::White;

    // Resource state colors
    pub const ONLINE: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const CRITICAL: Color = Color::Red;
    pub const ACCENT: Color = Color::Cyan;

    // Tab colors
    pub const TAB_ACTIVE: Color = Color::Cyan;
    pub const TAB_INACTIVE: Color = Color::DarkGray;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Header bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected row style.
    pub fn selected() -> Style {
        Style::default()
            .bg(Theme::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Table header style.
    pub fn table_header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Online/healthy state style (green).
    pub fn online() -> Style {
        Style::default().fg(Theme::ONLINE)
    }

    /// Warning state style (yellow).
    pub fn warning() -> Style {
        Style::default().fg(Theme::WARNING)
    }

    /// Critical state style (red).
    pub fn critical() -> Style {
        Style::default().fg(Theme::CRITICAL)
    }

    /// Critical emphasis style (red, bold). Reserved for I/O outliers.
    pub fn critical_bold() -> Style {
        Style::default()
            .fg(Theme::CRITICAL)
            .add_modifier(Modifier::BOLD)
    }

    /// Accent style for group headers and markers (cyan).
    pub fn accent() -> Style {
        Style::default().fg(Theme::ACCENT)
    }

    /// Active tab style.
    pub fn tab_active() -> Style {
        Style::default()
            .fg(Theme::TAB_ACTIVE)
            .add_modifier(Modifier::BOLD)
    }

    /// Inactive tab style.
    pub fn tab_inactive() -> Style {
        Style::default().fg(Theme::TAB_INACTIVE)
    }

    /// Dimmed text style.
    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Filter input style.
    pub fn filter_input() -> Style {
        Style::default()
            .fg(Theme::FG)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Section header style for detail popups.
    pub fn section_header() -> Style {
        Style::default()
            .fg(Theme::WARNING)
            .add_modifier(Modifier::BOLD)
    }

    /// Help text style.
    pub fn help() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Help key style (highlighted keys in help line).
    pub fn help_key() -> Style {
        Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD)
    }

    /// Maps a UI-agnostic [`RowStyleClass`] to a ratatui [`Style`].
    pub fn from_class(class: RowStyleClass) -> Style {
        match class {
            RowStyleClass::Normal => Self::default(),
            RowStyleClass::Warning => Self::warning(),
            RowStyleClass::Critical => Self::critical(),
            RowStyleClass::CriticalBold => Self::critical_bold(),
            RowStyleClass::Active => Self::online(),
            RowStyleClass::Dimmed => Self::dim(),
            RowStyleClass::Accent => Self::accent(),
        }
    }
}
