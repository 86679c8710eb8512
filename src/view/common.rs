//! UI-agnostic view model types.
//!
//! Presentation data with no dependency on a rendering framework. The TUI
//! maps style classes to ratatui styles; tests assert on cell text and
//! classes directly without a terminal.

/// Row/cell style classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowStyleClass {
    #[default]
    Normal,
    /// Elevated value (TUI: yellow).
    Warning,
    /// Problem state (TUI: red). E.g. offline status.
    Critical,
    /// Hard outlier (TUI: red + bold).
    CriticalBold,
    /// Positive state (TUI: green). E.g. running status.
    Active,
    /// De-emphasized (TUI: dark gray). Idle cells, offline rows.
    Dimmed,
    /// Structural accent (TUI: cyan). Group header rows.
    Accent,
}

/// A single table cell with optional per-cell style override.
#[derive(Debug, Clone, Default)]
pub struct ViewCell {
    pub text: String,
    /// `None` = inherit row style.
    pub style: Option<RowStyleClass>,
}

impl ViewCell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    pub fn styled(text: impl Into<String>, style: RowStyleClass) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
        }
    }
}

/// One table row, parameterized by entity ID type.
#[derive(Debug, Clone)]
pub struct ViewRow<Id> {
    pub id: Id,
    pub cells: Vec<ViewCell>,
    pub style: RowStyleClass,
}

/// Complete table ready to be rendered by any frontend.
///
/// `rows` holds only the mounted window of the logical list; the caller
/// tracks where that window starts. A zero width marks the column that
/// absorbs leftover horizontal space.
#[derive(Debug, Clone)]
pub struct TableViewModel<Id> {
    pub title: String,
    pub headers: Vec<String>,
    pub widths: Vec<u16>,
    pub rows: Vec<ViewRow<Id>>,
    /// Sorted column index; `None` in the default order.
    pub sort_column: Option<usize>,
    pub sort_ascending: bool,
}
