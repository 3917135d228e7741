mod stats;
mod turn;

pub use stats::{TokenCounter, UsageStats};
pub use turn::{Role, ToolCallRecord, Turn};
