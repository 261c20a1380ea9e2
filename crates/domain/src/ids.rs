//! Record identity helpers

use chrono::Utc;
use uuid::Uuid;

use crate::Timestamp;

/// Generate a short unique id with a readable prefix, e.g. `owner_3f9a1c2b`.
///
/// Ids only need to be unique inside one collection; eight hex chars of a
/// v4 UUID are plenty for a single user's local data.
pub fn new_id(prefix: &str) -> String {
    let raw = Uuid::new_v4().simple().to_string();
    if prefix.is_empty() {
        raw[..9].to_string()
    } else {
        format!("{prefix}_{}", &raw[..8])
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> Timestamp {
    Utc::now().timestamp_millis()
}
