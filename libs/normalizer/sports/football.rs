//! Football
//!
//! Slots: 0 = match, 1 = first half, 2 = second half. Handicaps are
//! score-relative.

use crate::domain::{GameRecord, OddsEvent, PeriodSlot, RosterEntry, Sport, SportName};
use crate::market::{HandicapConvention, OddsFormat, PeriodExtractor};

use super::{active_periods, start_record};

pub fn football(entry: &RosterEntry, event: &OddsEvent, odds: OddsFormat) -> GameRecord {
    let mut record = start_record(Sport::Football, SportName::Soccer, entry, event);
    let extractor = PeriodExtractor::new(
        odds,
        HandicapConvention::ScoreRelative {
            home_score: event.home_score,
            away_score: event.away_score,
        },
    );

    for period in active_periods(event) {
        let Some(index) = slot_index(period.number) else {
            continue;
        };

        let mut slot = PeriodSlot::default();
        extractor.money_line(&mut slot, &period.money_line);
        extractor.spreads(&mut slot, &period.spreads);
        extractor.totals(&mut slot, &period.totals);
        extractor.team_totals(&mut slot, &period.team_total);

        record.periods[index] = slot;
    }

    record
}

fn slot_index(number: i64) -> Option<usize> {
    match number {
        0..=2 => Some(number as usize),
        _ => None,
    }
}
