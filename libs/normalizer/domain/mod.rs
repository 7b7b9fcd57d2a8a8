//! Domain Layer
//!
//! Provider wire types, the canonical record shape and the sport catalogue.

pub mod provider;
pub mod record;
pub mod roster;
pub mod sport;

pub use provider::{
    EventsResponse, League, MoneyLine, OddsEvent, OddsLeague, OddsPeriod, OddsSnapshot, RawEvent,
    Spread, TeamTotal, TeamTotalSide, Total,
};
pub use record::{GameRecord, Odd, PeriodSlot, Source, SportName, Win1x2, WinHandicap, WinLessMore};
pub use roster::RosterEntry;
pub use sport::{FeedMode, MarketLayout, Sport};
