//! Relative-time labels for message timestamps.

use crate::model::message::Message;

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Formats how long ago `message` was created, relative to `now_ms`.
pub fn format_relative_time(message: &Message, now_ms: i64) -> String {
    format_elapsed(now_ms.saturating_sub(message.created_at))
}

/// Formats an elapsed duration with floor semantics.
///
/// `< 1m` → `Just now`, `< 1h` → `<n>m ago`, `< 1d` → `<n>h ago`,
/// otherwise `<n>d ago`. Negative durations (clock skew) read as `Just now`.
pub fn format_elapsed(elapsed_ms: i64) -> String {
    if elapsed_ms < MINUTE_MS {
        "Just now".to_string()
    } else if elapsed_ms < HOUR_MS {
        format!("{}m ago", elapsed_ms / MINUTE_MS)
    } else if elapsed_ms < DAY_MS {
        format!("{}h ago", elapsed_ms / HOUR_MS)
    } else {
        format!("{}d ago", elapsed_ms / DAY_MS)
    }
}
