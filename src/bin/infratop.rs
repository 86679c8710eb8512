//! infratop - Interactive TUI viewer for an infrastructure fleet.
//!
//! Supports two data sources:
//! - Snapshot mode: render a fleet export written by the monitoring backend,
//!   reloading it whenever the file changes on disk
//! - Demo mode: a built-in synthetic fleet for trying out the interface
//!
//! Usage:
//!   infratop -s fleet.json               # view a backend export
//!   infratop -s fleet.json -i 5          # re-check the file every 5 seconds
//!   infratop --demo                      # synthetic fleet, 60 guests
//!   infratop --demo --fleet 800          # large enough to virtualize tables

use std::time::Duration;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use infratop::provider::{DemoFleet, FleetProvider, SnapshotFile};
use infratop::tui::App;
use infratop::window::RowWindow;

/// Interactive TUI viewer for an infrastructure fleet.
#[derive(Parser)]
#[command(name = "infratop", about = "Infrastructure fleet viewer")]
struct Args {
    /// Path to a fleet snapshot export (JSON).
    /// Reloaded automatically whenever the file changes.
    #[arg(short = 's', long = "snapshot", value_name = "PATH", conflicts_with = "demo")]
    snapshot: Option<String>,

    /// Run against a built-in synthetic fleet instead of an export.
    #[arg(long)]
    demo: bool,

    /// Number of guests in the demo fleet.
    #[arg(long, value_name = "N", default_value_t = 60, requires = "demo")]
    fleet: usize,

    /// Refresh interval in seconds (minimum 1).
    #[arg(short = 'i', long = "interval", value_name = "SECS", default_value_t = 2)]
    interval: u64,

    /// Rows kept mounted at a time when a table is virtualized.
    #[arg(long, value_name = "ROWS", default_value_t = 140)]
    window_size: usize,

    /// Row count above which tables switch to windowed rendering.
    #[arg(long, value_name = "ROWS", default_value_t = 500)]
    virtualize_over: usize,

    /// Increase log verbosity (-v: debug, -vv: trace). Logs go to stderr.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    quiet: bool,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("infratop={}", level).parse().unwrap());

    // The alternate screen owns stdout, so logs must stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    // Validate arguments
    if args.interval == 0 {
        eprintln!("Error: --interval must be at least 1 second");
        std::process::exit(1);
    }

    // Create provider based on mode
    let provider: Box<dyn FleetProvider> = if let Some(ref path) = args.snapshot {
        match SnapshotFile::open(path) {
            Ok(p) => Box::new(p),
            Err(e) => {
                eprintln!("Error loading snapshot from '{}': {}", path, e);
                std::process::exit(1);
            }
        }
    } else if args.demo {
        Box::new(DemoFleet::new(args.fleet))
    } else {
        eprintln!("Error: no data source selected");
        eprintln!("Usage: infratop -s fleet.json      # view a backend export");
        eprintln!("       infratop --demo [--fleet N] # built-in synthetic fleet");
        std::process::exit(1);
    };

    let window = RowWindow::new()
        .with_window_size(args.window_size)
        .with_virtualize_over(args.virtualize_over);

    // Create and run TUI
    let tick_rate = Duration::from_secs(args.interval);
    let app = App::new(provider, window);

    if let Err(e) = app.run(tick_rate) {
        eprintln!("Error running TUI: {}", e);
        std::process::exit(1);
    }
}
