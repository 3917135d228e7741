use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Persisted usage record (`stats.json`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    #[serde(default)]
    pub total_tokens: u64,
}

/// Running token total shared between the stream worker and the control loop.
///
/// The worker is the only writer while a stream is live; the control loop
/// reads it for display and snapshots it when persisting. One increment is
/// one delivered text fragment, not a backend tokenizer unit.
#[derive(Debug, Clone, Default)]
pub struct TokenCounter(Arc<AtomicU64>);

impl TokenCounter {
    pub fn new(initial: u64) -> Self {
        Self(Arc::new(AtomicU64::new(initial)))
    }

    pub fn increment(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> UsageStats {
        UsageStats { total_tokens: self.get() }
    }
}

impl From<UsageStats> for TokenCounter {
    fn from(stats: UsageStats) -> Self {
        Self::new(stats.total_tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_total() {
        let counter = TokenCounter::new(5);
        let worker = counter.clone();
        let handle = std::thread::spawn(move || {
            for _ in 0..10 {
                worker.increment();
            }
        });
        handle.join().unwrap();
        assert_eq!(counter.get(), 15);
        assert_eq!(counter.snapshot(), UsageStats { total_tokens: 15 });
    }

    #[test]
    fn missing_field_defaults_to_zero() {
        let stats: UsageStats = serde_json::from_str("{}").unwrap();
        assert_eq!(stats.total_tokens, 0);
    }
}
