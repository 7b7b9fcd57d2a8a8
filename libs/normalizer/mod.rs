//! # Normalizer
//!
//! Pure odds-normalization engine for the provider feed.
//!
//! Raw provider entities (events and odds periods) go in, canonical
//! [`GameRecord`]s come out. Nothing in this crate performs I/O or keeps
//! state between calls: the same roster entry and odds event always produce
//! the same record.
//!
//! ## Layout
//!
//! - **domain**: provider wire types, canonical record types, sports and roster entries
//! - **market**: line keys, odds conversion, name normalization, market extraction
//! - **sports**: per-sport transforms (football, basketball, volleyball, tennis)

pub mod domain;
pub mod market;
pub mod sports;

// Re-export domain types
pub use domain::{
    EventsResponse, FeedMode, GameRecord, MarketLayout, MoneyLine, Odd, OddsEvent, OddsLeague,
    OddsPeriod, OddsSnapshot, PeriodSlot, RawEvent, RosterEntry, Source, Sport, SportName,
    Win1x2, WinHandicap, WinLessMore,
};

// Re-export market helpers
pub use market::{line_key, OddsFormat};

// Re-export transforms
pub use sports::{basketball, football, normalize, tennis, volleyball};
