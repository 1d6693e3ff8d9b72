//! Time utilities.
//!
//! All timestamps in the relay are Unix milliseconds in JST. Chat message
//! ordering relies on them being monotonic-ish, nothing more.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};

const JST_OFFSET_SECONDS: i32 = 9 * 3600;

/// Get current Unix timestamp in JST (milliseconds)
pub fn get_jst_timestamp() -> i64 {
    let jst = jst_offset();
    let now: DateTime<FixedOffset> = Utc::now().with_timezone(&jst);
    now.timestamp_millis()
}

/// Convert Unix timestamp (milliseconds) to JST RFC 3339 format
///
/// Out-of-range timestamps fall back to the string `"invalid-timestamp"`
/// instead of panicking; the value only feeds debug output.
pub fn timestamp_to_jst_rfc3339(timestamp_millis: i64) -> String {
    let seconds = timestamp_millis.div_euclid(1000);
    let nanos = (timestamp_millis.rem_euclid(1000) * 1_000_000) as u32;
    match jst_offset().timestamp_opt(seconds, nanos) {
        chrono::LocalResult::Single(dt) => dt.to_rfc3339(),
        _ => "invalid-timestamp".to_string(),
    }
}

fn jst_offset() -> FixedOffset {
    // JST is UTC+9, a constant within the FixedOffset range
    FixedOffset::east_opt(JST_OFFSET_SECONDS).expect("JST offset is valid")
}
