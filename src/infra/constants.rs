use std::time::Duration;

// =============================================================================
// BACKEND
// =============================================================================

/// Default model requested from the gateway
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

/// Default OpenAI-compatible endpoint root
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Environment variable holding the gateway API key
pub const API_KEY_VAR: &str = "OPENROUTER";

/// Connection timeout for backend requests
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum tool-call rounds the adapter runs within one turn
pub const MAX_TOOL_ROUNDS: usize = 5;

// =============================================================================
// CONTEXT CONDENSATION
// =============================================================================

/// Above this many user/assistant turns the older ones are summarized
pub const SUMMARIZE_THRESHOLD: usize = 10;

/// Turns kept verbatim when the summary call fails
pub const FALLBACK_TURNS: usize = 5;

/// Upper bound on turns in a verbatim transcript
pub const VERBATIM_CAP: usize = 10;

/// Deadline for the summarization call
pub const SUMMARY_TIMEOUT: Duration = Duration::from_secs(10);

/// Prefix of the synthetic context message
pub const CONTEXT_PREFIX: &str = "CONTEXT: ";

/// Prefix wrapping the raw user input in the outbound request
pub const REQUEST_PREFIX: &str = "REQUEST: ";

// =============================================================================
// STREAMING
// =============================================================================

/// Capacity of the fragment queue between the stream worker and the control loop
pub const STREAM_QUEUE_CAPACITY: usize = 100;

/// Control loop tick (~20 Hz)
pub const TICK_MS: u64 = 50;

// =============================================================================
// RENDER THROTTLE
// =============================================================================

/// Flush interval for short responses
pub const RENDER_INTERVAL_BASE: Duration = Duration::from_millis(100);

/// Flush interval once the response passes `RENDER_MEDIUM_CHARS`
pub const RENDER_INTERVAL_MEDIUM: Duration = Duration::from_millis(150);

/// Flush interval once the response passes `RENDER_LARGE_CHARS`
pub const RENDER_INTERVAL_LARGE: Duration = Duration::from_millis(200);

pub const RENDER_MEDIUM_CHARS: usize = 5_000;
pub const RENDER_LARGE_CHARS: usize = 10_000;

/// History turns re-rendered into the content buffer
pub const MAX_HISTORY_DISPLAY: usize = 10;

// =============================================================================
// SCROLLING
// =============================================================================

/// Lines scrolled by Up/Down
pub const SCROLL_ARROW_AMOUNT: u16 = 3;

/// Lines scrolled by PageUp/PageDown
pub const SCROLL_PAGE_AMOUNT: u16 = 10;

// =============================================================================
// PERSISTENCE
// =============================================================================

/// Application directory name under the user's home
pub const APP_DIR_NAME: &str = "l2";

/// Log file inside `<app dir>/logs`
pub const LOG_FILE_NAME: &str = "l2.log";
