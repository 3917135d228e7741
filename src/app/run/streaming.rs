use std::sync::mpsc::TryRecvError;
use std::time::Instant;

use crate::app::App;
use crate::infra::api::StreamEvent;

impl App {
    /// One control-loop tick: drain whatever the stream worker queued, then
    /// give stale content a throttled chance to reach the screen.
    pub fn tick(&mut self, now: Instant) {
        self.drain_stream(now);
        self.state.refresh_content(now);
    }

    fn drain_stream(&mut self, now: Instant) {
        let Some(rx) = self.stream_rx.take() else {
            return;
        };
        loop {
            match rx.try_recv() {
                Ok(StreamEvent::Fragment(fragment)) => {
                    self.state.push_fragment(&fragment);
                    self.state.refresh_content(now);
                }
                Ok(StreamEvent::Failed(message)) => {
                    tracing::warn!(error = %message, kept_chars = self.state.pending_chars, "stream ended early");
                    self.state.last_warning = Some(format!("Stream interrupted: {}", message));
                    self.finish_stream(now);
                    return;
                }
                Ok(StreamEvent::StartFailed(message)) => {
                    tracing::warn!(error = %message, "stream failed to start; turn aborted");
                    self.state.last_warning = Some(format!("Request failed: {}", message));
                    self.abort_stream(now);
                    return;
                }
                Err(TryRecvError::Empty) => {
                    self.stream_rx = Some(rx);
                    return;
                }
                Err(TryRecvError::Disconnected) => {
                    self.finish_stream(now);
                    return;
                }
            }
        }
    }

    /// `Streaming -> Idle` with the accumulated response committed.
    fn finish_stream(&mut self, now: Instant) {
        self.state.commit_response();
        tracing::info!(
            chars = self.state.pending_chars,
            total_tokens = self.state.stats.get(),
            render_interval_ms = self.state.throttle.min_interval().as_millis() as u64,
            "response complete"
        );
        self.settle(now);
    }

    /// `Streaming -> Idle` without an assistant turn.
    fn abort_stream(&mut self, now: Instant) {
        self.state.abort_turn();
        self.settle(now);
    }

    fn settle(&mut self, now: Instant) {
        self.state.force_refresh(now);
        self.persist_history();
        self.persist_stats();
        self.state.throttle.reset();
    }
}
