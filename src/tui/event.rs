//! Event thread for the TUI.
//!
//! A dedicated thread polls crossterm; poll timeouts become refresh ticks,
//! so the main loop blocks on one channel instead of juggling timers.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// Timer tick for data refresh.
    Tick,
    /// Keyboard input.
    Key(KeyEvent),
    /// Terminal resize; panes re-measure on the next draw, so the new
    /// dimensions are not carried here.
    Resize,
}

/// Owns the poll thread and the receiving end of its channel.
pub struct EventHandler {
    rx: Receiver<Event>,
    /// Kept alive so the channel outlives an idle poll thread.
    _tx: Sender<Event>,
}

impl EventHandler {
    /// Spawns the poll thread; `tick_rate` is the refresh interval.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();
        thread::spawn(move || poll_loop(event_tx, tick_rate));
        Self { rx, _tx: tx }
    }

    /// Blocks until the next event.
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}

fn poll_loop(tx: Sender<Event>, tick_rate: Duration) {
    loop {
        let event = if event::poll(tick_rate).unwrap_or(false) {
            match event::read() {
                Ok(CrosstermEvent::Key(key)) => Event::Key(key),
                Ok(CrosstermEvent::Resize(..)) => Event::Resize,
                _ => continue,
            }
        } else {
            Event::Tick
        };
        if tx.send(event).is_err() {
            break;
        }
    }
}
