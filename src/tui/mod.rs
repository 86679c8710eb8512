//! Terminal User Interface for the fleet viewer.
//!
//! This module provides an interactive TUI similar to atop/htop for browsing
//! a monitored fleet, either from a snapshot export or the built-in demo.

mod app;
mod event;
mod input;
mod render;
mod state;
mod style;
mod widgets;

pub use app::App;
pub use state::{AppState, Tab};
