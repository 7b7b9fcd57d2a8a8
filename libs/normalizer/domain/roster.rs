//! Roster entries
//!
//! Identity and metadata of one provider event, refreshed on every events
//! tick. Tennis entries additionally link a sub-market to its parent match.

use super::provider::RawEvent;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterEntry {
    pub id: i64,
    pub league: String,
    pub home: String,
    pub away: String,
    /// Tennis only. Equal to `id` for a top-level match, 0 for a parent
    /// entry synthesized from one of its children.
    pub parent_id: i64,
}

impl RosterEntry {
    pub fn new(
        id: i64,
        league: impl Into<String>,
        home: impl Into<String>,
        away: impl Into<String>,
    ) -> Self {
        Self {
            id,
            league: league.into(),
            home: home.into(),
            away: away.into(),
            parent_id: 0,
        }
    }

    /// Flat-sport entry for an event
    pub fn from_event(event: &RawEvent) -> Self {
        Self::new(event.id, &event.league, &event.home, &event.away)
    }

    /// Tennis entry for an event. A top-level match points at itself.
    pub fn from_tennis_event(event: &RawEvent) -> Self {
        let parent_id = if event.parent_id == 0 {
            event.id
        } else {
            event.parent_id
        };
        Self {
            parent_id,
            ..Self::from_event(event)
        }
    }

    /// Parent entry derived from a child sub-market: "Nadal R. (Games)" -> "Nadal R."
    pub fn parent_of(child: &RawEvent) -> Self {
        Self::new(
            child.parent_id,
            &child.league,
            strip_sub_market(&child.home),
            strip_sub_market(&child.away),
        )
    }

    /// True when the entry's raw home name marks a "Games" sub-market
    pub fn is_games_market(&self) -> bool {
        self.home.contains("Games")
    }
}

fn strip_sub_market(name: &str) -> &str {
    match name.find('(') {
        Some(idx) => name[..idx].trim_end(),
        None => name,
    }
}
