//! infratop - unified infrastructure fleet dashboard library.
//!
//! This library backs the `infratop` TUI viewer: it takes a normalized
//! fleet snapshot (virtualization hosts and guests, Docker, Kubernetes,
//! backup and mail-gateway services) and derives the sorted/grouped/windowed
//! table views the terminal renders.
//!
//! Module map:
//! - `model` - resource records and the snapshot exchange format
//! - `aggregate` - host/service split, column sorting, cluster grouping
//! - `analysis` - robust I/O distribution stats and outlier emphasis
//! - `window` - scroll-driven row virtualization
//! - `view` - UI-agnostic table view models
//! - `fmt` - human-readable value formatting
//! - `provider` - snapshot sources (file export, demo fleet)
//! - `tui` - interactive terminal viewer

pub mod aggregate;
pub mod analysis;
pub mod fmt;
pub mod model;
pub mod provider;
pub mod tui;
pub mod view;
pub mod window;
