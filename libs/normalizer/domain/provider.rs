//! Provider wire types
//!
//! Data structures for the two provider endpoints: the event roster and the
//! odds snapshot. Every field the transforms do not strictly need is
//! defaulted so partial payloads still decode.

use chrono::{DateTime, Utc};
use serde::Deserialize;

// =============================================================================
// Event roster
// =============================================================================

/// Response of the events endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsResponse {
    #[serde(default)]
    pub sport_id: i64,
    #[serde(default)]
    pub last: i64,
    #[serde(default)]
    pub league: Vec<League>,
}

/// A league with its scheduled events
#[derive(Debug, Clone, Default, Deserialize)]
pub struct League {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

/// A single event as listed by the events endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub id: i64,
    #[serde(default)]
    pub starts: Option<DateTime<Utc>>,
    /// League name, copied from the enclosing [`League`] by the client
    #[serde(skip)]
    pub league: String,
    #[serde(default)]
    pub home: String,
    #[serde(default)]
    pub away: String,
    #[serde(default)]
    pub rot_num: String,
    /// 1 = live event
    #[serde(default)]
    pub live_status: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub resulting_unit: String,
    #[serde(default)]
    pub parlay_restriction: i64,
    /// Parent event id (tennis sub-markets); 0 for top-level events
    #[serde(default)]
    pub parent_id: i64,
    #[serde(default)]
    pub alt_teaser: bool,
}

// =============================================================================
// Odds snapshot
// =============================================================================

/// Response of the odds endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OddsSnapshot {
    /// Staleness of the snapshot in nanoseconds
    #[serde(default, alias = "Time")]
    pub time: i64,
    #[serde(default)]
    pub sport_id: i64,
    #[serde(default)]
    pub last: i64,
    #[serde(default)]
    pub leagues: Vec<OddsLeague>,
}

impl OddsSnapshot {
    /// Iterate over every event of every league, in feed order
    pub fn events(&self) -> impl Iterator<Item = &OddsEvent> {
        self.leagues.iter().flat_map(|league| league.events.iter())
    }

    /// Snapshot staleness as a signed duration
    pub fn staleness(&self) -> chrono::Duration {
        chrono::Duration::nanoseconds(self.time)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OddsLeague {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub events: Vec<OddsEvent>,
}

/// Odds for one event, split into periods
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OddsEvent {
    pub id: i64,
    #[serde(default)]
    pub away_score: f64,
    #[serde(default)]
    pub home_score: f64,
    #[serde(default)]
    pub away_red_cards: i64,
    #[serde(default)]
    pub home_red_cards: i64,
    #[serde(default)]
    pub periods: Vec<OddsPeriod>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OddsPeriod {
    #[serde(default)]
    pub line_id: i64,
    /// Sport-specific period number (match, half, quarter, set, game)
    #[serde(default)]
    pub number: i64,
    #[serde(default)]
    pub cutoff: Option<String>,
    /// 1 = offered, anything else = suspended or closed
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub max_spread: f64,
    #[serde(default)]
    pub max_moneyline: f64,
    #[serde(default)]
    pub max_total: f64,
    #[serde(default)]
    pub max_team_total: f64,
    #[serde(default)]
    pub spreads: Vec<Spread>,
    #[serde(default)]
    pub totals: Vec<Total>,
    #[serde(default)]
    pub team_total: TeamTotal,
    #[serde(default, alias = "moneyline")]
    pub money_line: MoneyLine,
    #[serde(default)]
    pub home_score: f64,
    #[serde(default)]
    pub away_score: f64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MoneyLine {
    #[serde(default)]
    pub home: f64,
    #[serde(default)]
    pub away: f64,
    #[serde(default)]
    pub draw: f64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TeamTotal {
    #[serde(default)]
    pub home: TeamTotalSide,
    #[serde(default)]
    pub away: TeamTotalSide,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TeamTotalSide {
    #[serde(default)]
    pub points: f64,
    #[serde(default)]
    pub over: f64,
    #[serde(default)]
    pub under: f64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spread {
    #[serde(default)]
    pub alt_line_id: i64,
    #[serde(default)]
    pub hdp: f64,
    #[serde(default)]
    pub home: f64,
    #[serde(default)]
    pub away: f64,
    #[serde(default)]
    pub max: f64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Total {
    #[serde(default)]
    pub alt_line_id: i64,
    #[serde(default)]
    pub points: f64,
    #[serde(default)]
    pub over: f64,
    #[serde(default)]
    pub under: f64,
    #[serde(default)]
    pub max: f64,
}
