//! Shared fixtures for normalization tests

use normalizer::{OddsSnapshot, RawEvent, RosterEntry};
use serde_json::Value;

/// Macro for verbose test output (controlled by TEST_VERBOSE env var)
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if std::env::var("TEST_VERBOSE").is_ok() {
            println!($($arg)*);
        }
    };
}

/// Decode a snapshot holding the given events in a single league
pub fn snapshot(events: Value) -> OddsSnapshot {
    serde_json::from_value(serde_json::json!({
        "sportId": 0,
        "last": 1,
        "leagues": [{ "id": 1, "events": events }]
    }))
    .expect("fixture snapshot must decode")
}

/// Tennis event as it appears in the events feed
pub fn tennis_event(id: i64, parent_id: i64, home: &str, away: &str) -> RawEvent {
    RawEvent {
        id,
        parent_id,
        league: "ATP Vienna - R1".to_string(),
        home: home.to_string(),
        away: away.to_string(),
        ..Default::default()
    }
}

/// Tennis roster entry as the events tick stores it
pub fn tennis_entry(id: i64, parent_id: i64, home: &str, away: &str) -> RosterEntry {
    RosterEntry::from_tennis_event(&tennis_event(id, parent_id, home, away))
}
