//! Canonical record types
//!
//! The shape every sport is normalized into and the exact JSON layout the
//! analyzer and downstream subscribers consume. Maps are ordered so that
//! serializing the same record twice yields identical bytes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use super::roster::RosterEntry;

/// A single price
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Odd {
    #[serde(rename = "Value")]
    pub value: f64,
}

impl Odd {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

/// Money-line triple: home / draw / away
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Win1x2 {
    pub win1: Odd,
    pub win_none: Odd,
    pub win2: Odd,
}

/// Handicap pair for one line key. Either side may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WinHandicap {
    pub win1: Odd,
    pub win2: Odd,
}

/// Over/under pair for one line key
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WinLessMore {
    pub win_more: Odd,
    pub win_less: Odd,
}

/// One fixed position of a record's period array
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PeriodSlot {
    pub win1x2: Win1x2,
    /// Tennis only: game index ("1".."13") -> money line
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub games: BTreeMap<String, Win1x2>,
    pub totals: BTreeMap<String, WinLessMore>,
    pub handicap: BTreeMap<String, WinHandicap>,
    pub first_team_totals: BTreeMap<String, WinLessMore>,
    pub second_team_totals: BTreeMap<String, WinLessMore>,
}

impl PeriodSlot {
    /// True when nothing has been written into the slot
    pub fn is_empty(&self) -> bool {
        *self == PeriodSlot::default()
    }
}

/// Sport tag carried by every record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SportName {
    Soccer,
    Tennis,
    Basketball,
    Volleyball,
}

/// Provenance tag stamped by the sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Source {
    Pinnacle,
}

/// Fully normalized record for one event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameRecord {
    pub pid: i64,
    pub match_id: String,
    pub league_name: String,
    pub home_name: String,
    pub away_name: String,
    pub home_score: f64,
    pub away_score: f64,
    pub is_live: bool,
    pub sport_name: SportName,
    pub source: Option<Source>,
    pub created_at: DateTime<Utc>,
    pub periods: Vec<PeriodSlot>,
}

impl GameRecord {
    /// Start a record for a roster entry with `slots` empty periods.
    ///
    /// Names are copied verbatim; the caller normalizes them.
    pub fn new(entry: &RosterEntry, sport_name: SportName, slots: usize) -> Self {
        Self {
            pid: entry.id,
            match_id: entry.id.to_string(),
            league_name: entry.league.clone(),
            home_name: entry.home.clone(),
            away_name: entry.away.clone(),
            home_score: 0.0,
            away_score: 0.0,
            is_live: false,
            sport_name,
            source: None,
            created_at: DateTime::<Utc>::default(),
            periods: vec![PeriodSlot::default(); slots],
        }
    }

    /// Stamp the feed mode and creation time
    pub fn stamped(mut self, is_live: bool, created_at: DateTime<Utc>) -> Self {
        self.is_live = is_live;
        self.created_at = created_at;
        self
    }
}
