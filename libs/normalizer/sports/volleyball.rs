//! Volleyball
//!
//! Slots: 0 = match, 1..=5 = sets. Handicaps are absolute (they do not move
//! with the score) and there is no draw price.

use crate::domain::{GameRecord, OddsEvent, PeriodSlot, RosterEntry, Sport, SportName};
use crate::market::{HandicapConvention, OddsFormat, PeriodExtractor};

use super::{active_periods, start_record};

pub fn volleyball(entry: &RosterEntry, event: &OddsEvent, odds: OddsFormat) -> GameRecord {
    let mut record = start_record(Sport::Volleyball, SportName::Volleyball, entry, event);
    let extractor = PeriodExtractor::new(odds, HandicapConvention::Absolute);

    for period in active_periods(event) {
        if !(0..=5).contains(&period.number) {
            continue;
        }

        let mut slot = PeriodSlot::default();
        extractor.two_way_money_line(&mut slot, &period.money_line);
        extractor.spreads(&mut slot, &period.spreads);
        extractor.totals(&mut slot, &period.totals);
        extractor.team_totals(&mut slot, &period.team_total);

        record.periods[period.number as usize] = slot;
    }

    record
}
