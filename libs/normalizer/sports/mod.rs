//! Per-sport transforms
//!
//! Flat sports map one roster entry and one odds event to one record.
//! Tennis merges child sub-markets into their parent match and therefore
//! works on the whole roster at once (see [`tennis`]).

pub mod basketball;
pub mod football;
pub mod tennis;
pub mod volleyball;

pub use basketball::basketball;
pub use football::football;
pub use tennis::tennis;
pub use volleyball::volleyball;

use crate::domain::{GameRecord, OddsEvent, OddsPeriod, RosterEntry, Sport, SportName};
use crate::market::{normalize_league, normalize_team, OddsFormat};

/// Period status of an offered line
pub const ACTIVE_STATUS: i64 = 1;

/// Normalize one event of a flat sport.
///
/// Returns `None` for sports that are not flat (tennis) or have no
/// transform at all.
pub fn normalize(
    sport: Sport,
    entry: &RosterEntry,
    event: &OddsEvent,
    odds: OddsFormat,
) -> Option<GameRecord> {
    match sport {
        Sport::Football => Some(football(entry, event, odds)),
        Sport::Basketball => Some(basketball(entry, event, odds)),
        Sport::Volleyball => Some(volleyball(entry, event, odds)),
        Sport::Tennis | Sport::Handball | Sport::TableTennis => None,
    }
}

/// Record with the sport tag, normalized names and the running score
pub(crate) fn start_record(
    sport: Sport,
    sport_name: SportName,
    entry: &RosterEntry,
    event: &OddsEvent,
) -> GameRecord {
    let mut record = GameRecord::new(entry, sport_name, sport.slot_count());
    record.league_name = normalize_league(sport, &entry.league);
    record.home_name = normalize_team(sport, &entry.home);
    record.away_name = normalize_team(sport, &entry.away);
    record.home_score = event.home_score;
    record.away_score = event.away_score;
    record
}

/// Periods whose lines are currently offered
pub(crate) fn active_periods(event: &OddsEvent) -> impl Iterator<Item = &OddsPeriod> {
    event
        .periods
        .iter()
        .filter(|period| period.status == ACTIVE_STATUS)
}
