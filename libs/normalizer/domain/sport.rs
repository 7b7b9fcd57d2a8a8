//! Sport catalogue
//!
//! Provider sport ids, the market layout each sport is normalized with,
//! and the live / pre-match feed mode.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::SportName;

/// Sports the provider can be polled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    Football,
    Tennis,
    Basketball,
    Volleyball,
    Handball,
    TableTennis,
}

/// How odds of a sport are turned into records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketLayout {
    /// One roster entry -> one record
    Flat,
    /// Child sub-markets merged into their parent match (tennis)
    Hierarchical,
    /// No transform exists; the sport is never scheduled
    Unimplemented,
}

impl Sport {
    pub const ALL: [Sport; 6] = [
        Sport::Football,
        Sport::Tennis,
        Sport::Basketball,
        Sport::Volleyball,
        Sport::Handball,
        Sport::TableTennis,
    ];

    /// Numeric id used by the provider endpoints
    pub fn provider_id(&self) -> i64 {
        match self {
            Sport::Basketball => 4,
            Sport::Handball => 18,
            Sport::Football => 29,
            Sport::TableTennis => 32,
            Sport::Tennis => 33,
            Sport::Volleyball => 34,
        }
    }

    pub fn layout(&self) -> MarketLayout {
        match self {
            Sport::Football | Sport::Basketball | Sport::Volleyball => MarketLayout::Flat,
            Sport::Tennis => MarketLayout::Hierarchical,
            Sport::Handball | Sport::TableTennis => MarketLayout::Unimplemented,
        }
    }

    /// Number of period slots in a record of this sport
    pub fn slot_count(&self) -> usize {
        match self {
            Sport::Football => 3,
            Sport::Tennis | Sport::Basketball | Sport::Volleyball => 6,
            Sport::Handball | Sport::TableTennis => 0,
        }
    }

    /// Tag written into records; `None` for sports without a transform
    pub fn sport_name(&self) -> Option<SportName> {
        match self {
            Sport::Football => Some(SportName::Soccer),
            Sport::Tennis => Some(SportName::Tennis),
            Sport::Basketball => Some(SportName::Basketball),
            Sport::Volleyball => Some(SportName::Volleyball),
            Sport::Handball | Sport::TableTennis => None,
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Sport::Football => "football",
            Sport::Tennis => "tennis",
            Sport::Basketball => "basketball",
            Sport::Volleyball => "volleyball",
            Sport::Handball => "handball",
            Sport::TableTennis => "table_tennis",
        };
        f.write_str(name)
    }
}

/// Which provider feed is polled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedMode {
    Live,
    PreMatch,
}

impl FeedMode {
    pub fn from_live_flag(parse_live: bool) -> Self {
        if parse_live {
            FeedMode::Live
        } else {
            FeedMode::PreMatch
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, FeedMode::Live)
    }

    /// Value of the provider's `isLive` query parameter
    pub fn query_flag(&self) -> &'static str {
        match self {
            FeedMode::Live => "1",
            FeedMode::PreMatch => "0",
        }
    }
}
