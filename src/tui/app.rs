//! Main TUI application.

use std::io;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, warn};

use crate::model::FleetSnapshot;
use crate::provider::FleetProvider;
use crate::window::RowWindow;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::AppState;

/// Resolves the parent of `id` to a selectable host row.
///
/// Guests name their node through `parent_id`; the jump only applies when
/// that parent is itself present in the snapshot and lives on the hosts tab.
fn find_parent_id(snapshot: &FleetSnapshot, id: &str) -> Option<String> {
    let parent = snapshot
        .resources
        .iter()
        .find(|r| r.id == id)?
        .parent_id
        .as_deref()?;
    snapshot
        .resources
        .iter()
        .find(|r| r.id == parent && !r.kind.is_service())
        .map(|r| r.id.clone())
}

/// Main TUI application.
pub struct App {
    provider: Box<dyn FleetProvider>,
    state: AppState,
    should_quit: bool,
}

impl App {
    /// Creates a new App with the given provider.
    pub fn new(provider: Box<dyn FleetProvider>, window: RowWindow) -> Self {
        let is_live = provider.is_live();
        let mut state = AppState::new(is_live, window);
        state.source_label = provider.describe();
        Self {
            provider,
            state,
            should_quit: false,
        }
    }

    /// Runs the TUI application.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Create event handler
        let events = EventHandler::new(tick_rate);

        // Initial data fetch
        self.refresh();

        // Main loop
        loop {
            // Draw UI
            terminal.draw(|frame| render(frame, &mut self.state))?;

            // Handle events
            match events.next() {
                Ok(Event::Tick) => {
                    // Pausing stops installing new data; snapshot files keep
                    // their current contents either way until the file changes.
                    if !self.state.paused {
                        self.refresh();
                    }
                }
                Ok(Event::Key(key)) => {
                    if handle_key(&mut self.state, key) == KeyAction::Quit {
                        self.should_quit = true;
                    }
                }
                Ok(Event::Resize) => {
                    // Panes re-lay themselves out on the next draw.
                }
                Err(_) => {
                    self.should_quit = true;
                }
            }

            // Handle parent navigation request
            if self.state.parent_jump_requested {
                self.state.parent_jump_requested = false;
                self.jump_to_parent();
            }

            if self.should_quit {
                break;
            }
        }

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Polls the provider and installs any new snapshot.
    fn refresh(&mut self) {
        match self.provider.refresh() {
            Ok(true) => {
                self.state.snapshot = self.provider.current().cloned();
                self.state.source_label = self.provider.describe();
                self.state.last_error = None;
                if let Some(snapshot) = self.state.snapshot.as_ref() {
                    debug!(
                        "installed fleet snapshot with {} resources",
                        snapshot.resources.len()
                    );
                }
            }
            Ok(false) => {
                // Nothing new; keep showing what we have. The very first
                // poll may still need to pick up an eagerly loaded snapshot.
                if self.state.snapshot.is_none() {
                    self.state.snapshot = self.provider.current().cloned();
                }
            }
            Err(e) => {
                warn!("fleet refresh failed: {}", e);
                self.state.last_error = Some(e.to_string());
            }
        }
    }

    /// Moves the host-pane selection onto the parent of the selected row.
    fn jump_to_parent(&mut self) {
        let target = self
            .state
            .snapshot
            .as_ref()
            .zip(self.state.hosts.tracked_id.as_deref())
            .and_then(|(snapshot, id)| find_parent_id(snapshot, id));

        match target {
            Some(id) => self.state.hosts.navigate_to = Some(id),
            None => {
                self.state.status_message = Some("No parent node for this resource".to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Resource, ResourceKind};

    fn resource(id: &str, kind: ResourceKind, parent: Option<&str>) -> Resource {
        Resource {
            id: id.to_string(),
            name: id.to_string(),
            display_name: None,
            kind,
            status: None,
            cluster_id: None,
            parent_id: parent.map(|p| p.to_string()),
            platform_id: None,
            cpu: None,
            memory: None,
            disk: None,
            network: None,
            disk_io: None,
            temperature: None,
            uptime: None,
            platform_type: None,
            source_type: None,
            platform_data: None,
        }
    }

    fn snapshot(resources: Vec<Resource>) -> FleetSnapshot {
        FleetSnapshot {
            generated_at: 1_700_000_000,
            source: "test".to_string(),
            resources,
        }
    }

    #[test]
    fn parent_lookup_follows_parent_id() {
        let snap = snapshot(vec![
            resource("node-1", ResourceKind::Node, None),
            resource("vm-100", ResourceKind::Vm, Some("node-1")),
        ]);
        assert_eq!(find_parent_id(&snap, "vm-100"), Some("node-1".to_string()));
    }

    #[test]
    fn parent_lookup_requires_parent_in_snapshot() {
        let snap = snapshot(vec![resource("vm-100", ResourceKind::Vm, Some("node-9"))]);
        assert_eq!(find_parent_id(&snap, "vm-100"), None);
    }

    #[test]
    fn parent_lookup_ignores_roots_and_service_parents() {
        let snap = snapshot(vec![
            resource("backup", ResourceKind::Pbs, None),
            resource("vm-100", ResourceKind::Vm, Some("backup")),
            resource("node-1", ResourceKind::Node, None),
        ]);
        // A root host has no parent to jump to.
        assert_eq!(find_parent_id(&snap, "node-1"), None);
        // Services live on the other tab and are not jump targets.
        assert_eq!(find_parent_id(&snap, "vm-100"), None);
    }
}
