//! Response body handling
//!
//! The provider wraps its JSON in a string literal on some routes, so
//! bodies are unescaped before decoding. Events are filtered here, the
//! pollers only ever see events relevant to the configured feed mode.

use chrono::{DateTime, Duration, Utc};
use normalizer::{EventsResponse, FeedMode, OddsSnapshot, RawEvent, Sport};

use super::Result;

/// Pre-match events are kept only if they start within this many hours
pub const PRE_MATCH_WINDOW_HOURS: i64 = 48;

/// Marker of football corner-count markets, which have no transform
const CORNERS_MARKER: &str = "(Corners)";

/// Replace every `\"` with `"` and strip one surrounding quote on each side
pub fn normalize_body(body: &str) -> String {
    let body = body.replace("\\\"", "\"");
    let body = body.strip_prefix('"').unwrap_or(&body);
    let body = body.strip_suffix('"').unwrap_or(body);
    body.to_string()
}

/// Decode an events body and keep the events relevant to `mode`
pub fn decode_events(
    body: &str,
    sport: Sport,
    mode: FeedMode,
    now: DateTime<Utc>,
) -> Result<Vec<RawEvent>> {
    if body.is_empty() {
        return Ok(Vec::new());
    }
    let response: EventsResponse = serde_json::from_str(&normalize_body(body))?;
    Ok(filter_events(response, sport, mode, now))
}

/// Decode an odds body; `None` when the provider had nothing to say
pub fn decode_odds(body: &str) -> Result<Option<OddsSnapshot>> {
    if body.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(&normalize_body(body))?))
}

/// Flatten leagues into events, applying the feed-mode filter.
/// Kept events inherit their league's name.
pub fn filter_events(
    response: EventsResponse,
    sport: Sport,
    mode: FeedMode,
    now: DateTime<Utc>,
) -> Vec<RawEvent> {
    let mut events = Vec::new();

    for league in response.league {
        for mut event in league.events {
            let keep = match mode {
                FeedMode::Live => is_live_candidate(&event, sport),
                FeedMode::PreMatch => starts_soon(&event, now),
            };
            if !keep {
                continue;
            }

            event.league = league.name.clone();
            events.push(event);
        }
    }

    events
}

fn is_live_candidate(event: &RawEvent, sport: Sport) -> bool {
    if event.live_status != 1 {
        return false;
    }
    if sport == Sport::Football
        && (event.home.contains(CORNERS_MARKER) || event.away.contains(CORNERS_MARKER))
    {
        return false;
    }
    true
}

fn starts_soon(event: &RawEvent, now: DateTime<Utc>) -> bool {
    let Some(starts) = event.starts else {
        return false;
    };
    let until_start = starts - now;
    until_start >= Duration::zero() && until_start <= Duration::hours(PRE_MATCH_WINDOW_HOURS)
}
