use std::io;
use std::time::{Duration, Instant};

use crossterm::event;
use ratatui::prelude::*;

use crate::app::App;
use crate::app::events::handle_event;
use crate::infra::constants::TICK_MS;
use crate::state::Phase;
use crate::ui;

impl App {
    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        self.state.force_refresh(Instant::now());

        loop {
            if event::poll(Duration::from_millis(TICK_MS))? {
                let evt = event::read()?;
                if let Some(action) = handle_event(&evt) {
                    self.handle_action(action);
                }
            }
            if self.state.phase == Phase::Exiting {
                break;
            }

            self.tick(Instant::now());

            if self.state.dirty {
                terminal.draw(|frame| ui::render(frame, &self.state))?;
                self.state.dirty = false;
            }
        }
        Ok(())
    }

    /// `* -> Exiting`. Anything still streaming is abandoned; only committed
    /// history is written.
    pub fn quit(&mut self) {
        if self.state.is_streaming() {
            tracing::info!(uncommitted_chars = self.state.pending_chars, "quitting mid-stream");
        }
        self.state.phase = Phase::Exiting;
        self.stream_rx = None;
        self.persist_history();
        self.persist_stats();
    }

    pub(super) fn persist_history(&self) {
        if let Err(e) = self.store.save_history(&self.state.history) {
            tracing::warn!(error = %e, "failed to persist history");
        }
    }

    pub(super) fn persist_stats(&self) {
        if let Err(e) = self.store.save_stats(&self.state.stats.snapshot()) {
            tracing::warn!(error = %e, "failed to persist stats");
        }
    }
}
