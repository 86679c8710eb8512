//! UI-agnostic view models.
//!
//! [`rows`] builds [`common::TableViewModel`]s from aggregated resources;
//! the TUI maps them to ratatui widgets. Keeping the cell text and style
//! decisions out of the rendering layer makes them testable without a
//! terminal.

pub mod common;
pub mod rows;
