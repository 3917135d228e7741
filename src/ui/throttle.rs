use std::time::{Duration, Instant};

use crate::infra::constants::{
    RENDER_INTERVAL_BASE, RENDER_INTERVAL_LARGE, RENDER_INTERVAL_MEDIUM, RENDER_LARGE_CHARS, RENDER_MEDIUM_CHARS,
};

/// Decides when streamed text is flushed into the visible content buffer.
///
/// The interval steps up as the in-progress response grows so that very long
/// answers cost fewer rebuilds. Content is never truncated.
#[derive(Debug, Clone)]
pub struct RenderThrottle {
    last_flush: Option<Instant>,
    min_interval: Duration,
}

impl Default for RenderThrottle {
    fn default() -> Self {
        Self { last_flush: None, min_interval: RENDER_INTERVAL_BASE }
    }
}

impl RenderThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step function over response length in characters.
    pub fn interval_for(response_chars: usize) -> Duration {
        if response_chars > RENDER_LARGE_CHARS {
            RENDER_INTERVAL_LARGE
        } else if response_chars > RENDER_MEDIUM_CHARS {
            RENDER_INTERVAL_MEDIUM
        } else {
            RENDER_INTERVAL_BASE
        }
    }

    pub fn adjust(&mut self, response_chars: usize) {
        self.min_interval = Self::interval_for(response_chars);
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    pub fn last_flush(&self) -> Option<Instant> {
        self.last_flush
    }

    /// Claim a flush slot if at least `min_interval` has passed since the last one.
    pub fn try_flush(&mut self, now: Instant) -> bool {
        let due = match self.last_flush {
            Some(last) => now.saturating_duration_since(last) >= self.min_interval,
            None => true,
        };
        if due {
            self.last_flush = Some(now);
        }
        due
    }

    /// Flush unconditionally.
    pub fn force(&mut self, now: Instant) {
        self.last_flush = Some(now);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
