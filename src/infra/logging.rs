//! File-backed tracing setup. The terminal UI owns stdout, so nothing is
//! written to the screen.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use super::constants::LOG_FILE_NAME;

/// Install the global subscriber writing to `<logs_dir>/l2.log`.
///
/// The returned guard flushes buffered lines when dropped; keep it alive for
/// the whole process.
pub fn init(logs_dir: &Path, filter: &str) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(logs_dir)?;
    let appender = tracing_appender::rolling::never(logs_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }

    Ok(guard)
}
