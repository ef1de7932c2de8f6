//! Wall-clock helper shared by snapshot timestamps.

use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current instant as Unix epoch milliseconds.
///
/// Clamps to 0 if the system clock reports a pre-epoch time.
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
