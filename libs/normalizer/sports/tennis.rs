//! Tennis
//!
//! The provider splits one match into a top-level event and child
//! sub-markets (games, sets). Every event of a snapshot is folded into the
//! record of its parent match, so the transform works on the whole roster
//! and produces one record per parent id.
//!
//! Period numbers 0..=5 address the match and its sets directly. Numbers
//! above 5 address single games: `n - 6` enumerates 13 games per set,
//! starting with set 1.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{
    GameRecord, OddsEvent, OddsPeriod, OddsSnapshot, PeriodSlot, RosterEntry, Sport, SportName,
};
use crate::market::{HandicapConvention, OddsFormat, PeriodExtractor};

use super::{start_record, ACTIVE_STATUS};

/// Highest raw period number that still carries a market we understand
const MAX_PERIOD_NUMBER: i64 = 80;

/// Games addressed per set by the encoded period numbers
const GAMES_PER_SET: i64 = 13;

/// Match-level totals below this many points count sets, not games
const SET_TOTAL_THRESHOLD: f64 = 5.0;

/// Fold every event of the snapshot into its parent match.
///
/// Events absent from the roster, or whose parent is absent, are dropped.
/// Records are keyed (and therefore emitted) by ascending parent id.
pub fn tennis(
    roster: &HashMap<i64, RosterEntry>,
    snapshot: &OddsSnapshot,
    odds: OddsFormat,
) -> BTreeMap<i64, GameRecord> {
    let mut records = BTreeMap::new();

    for event in snapshot.events() {
        let Some(child) = roster.get(&event.id) else {
            continue;
        };
        let Some(parent) = roster.get(&child.parent_id) else {
            continue;
        };

        let record = records
            .entry(child.parent_id)
            .or_insert_with(|| start_record(Sport::Tennis, SportName::Tennis, parent, event));

        merge_event(record, child, event, odds);
    }

    records
}

fn merge_event(record: &mut GameRecord, child: &RosterEntry, event: &OddsEvent, odds: OddsFormat) {
    let extractor = PeriodExtractor::new(
        odds,
        HandicapConvention::ScoreRelative {
            home_score: event.home_score,
            away_score: event.away_score,
        },
    );

    for period in &event.periods {
        let Some((index, game)) = decode_period(period.number) else {
            continue;
        };
        let Some(slot) = record.periods.get_mut(index) else {
            continue;
        };
        if period.status != ACTIVE_STATUS {
            continue;
        }

        merge_period(slot, &extractor, period, index, game, child.is_games_market());
    }
}

fn merge_period(
    slot: &mut PeriodSlot,
    extractor: &PeriodExtractor,
    period: &OddsPeriod,
    index: usize,
    game: Option<i64>,
    with_spreads: bool,
) {
    if period.money_line.home != 0.0 {
        match game {
            Some(game) => extractor.game_money_line(slot, game.to_string(), &period.money_line),
            None => extractor.money_line(slot, &period.money_line),
        }
    }

    for total in &period.totals {
        // set totals on the match slot are not carried
        if index == 0 && total.points < SET_TOTAL_THRESHOLD {
            break;
        }
        extractor.total(slot, total);
    }

    extractor.team_totals(slot, &period.team_total);

    if with_spreads {
        extractor.spreads(slot, &period.spreads);
    }
}

/// Map a raw period number to a slot index and, for game sub-markets, the
/// 1-based game number within that set.
fn decode_period(number: i64) -> Option<(usize, Option<i64>)> {
    if number > MAX_PERIOD_NUMBER || number < 0 {
        return None;
    }
    if number <= 5 {
        return Some((number as usize, None));
    }

    let offset = number - 6;
    let game = offset % GAMES_PER_SET + 1;
    let set = offset / GAMES_PER_SET + 1;
    Some((set as usize, Some(game)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_period() {
        assert_eq!(decode_period(0), Some((0, None)));
        assert_eq!(decode_period(5), Some((5, None)));
        assert_eq!(decode_period(6), Some((1, Some(1))));
        assert_eq!(decode_period(18), Some((1, Some(13))));
        assert_eq!(decode_period(19), Some((2, Some(1))));
        assert_eq!(decode_period(80), Some((6, Some(10))));
        assert_eq!(decode_period(81), None);
        assert_eq!(decode_period(-1), None);
    }

    #[test]
    fn test_slot_beyond_fifth_set_is_ignored() {
        let roster = HashMap::from([(1, RosterEntry {
            parent_id: 1,
            ..RosterEntry::new(1, "ATP Vienna", "Nadal R.", "Federer R.")
        })]);
        let snapshot: OddsSnapshot = serde_json::from_value(serde_json::json!({
            "leagues": [{
                "id": 1,
                "events": [{
                    "id": 1,
                    "periods": [{ "number": 80, "status": 1, "moneyLine": { "home": 1.5, "away": 2.5 } }]
                }]
            }]
        }))
        .unwrap();

        let records = tennis(&roster, &snapshot, OddsFormat::Decimal);

        assert_eq!(records.len(), 1);
        assert!(records[&1].periods.iter().all(PeriodSlot::is_empty));
    }
}
