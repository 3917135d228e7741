//! Session state from disk, degrading to defaults on any read problem.

use l2_base::state::{Turn, UsageStats};
use l2_base::storage::{Store, StoreError};

use super::State;

/// Load history and stats. A missing record is a fresh start; an unreadable
/// or malformed one is logged and replaced by its default.
pub fn load_state(store: &Store, model_name: &str) -> State {
    let history: Vec<Turn> = or_default(store.load_history(), "history");
    let stats: UsageStats = or_default(store.load_stats(), "stats");
    tracing::info!(turns = history.len(), total_tokens = stats.total_tokens, "session loaded");
    State::new(history, stats, model_name)
}

fn or_default<T: Default>(result: Result<T, StoreError>, what: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) if e.is_not_found() => T::default(),
        Err(e) => {
            tracing::warn!(error = %e, record = what, "unreadable record; starting from default");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use l2_base::storage::Record;
    use tempfile::TempDir;

    #[test]
    fn fresh_directory_gives_empty_session() {
        let dir = TempDir::new().unwrap();
        let state = load_state(&Store::new(dir.path()), "m");
        assert!(state.history.is_empty());
        assert_eq!(state.stats.get(), 0);
    }

    #[test]
    fn corrupted_records_default() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path());
        store.write(Record::Conversation, b"[{\"role\": \"user\", ").unwrap();
        store.write(Record::Stats, b"not json").unwrap();

        let state = load_state(&store, "m");
        assert!(state.history.is_empty());
        assert_eq!(state.stats.get(), 0);
    }

    #[test]
    fn existing_records_are_restored() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path());
        store.save_history(&[Turn::user("a"), Turn::assistant("b")]).unwrap();
        store.save_stats(&UsageStats { total_tokens: 41 }).unwrap();

        let state = load_state(&store, "m");
        assert_eq!(state.history.len(), 2);
        assert_eq!(state.stats.get(), 41);
    }
}
