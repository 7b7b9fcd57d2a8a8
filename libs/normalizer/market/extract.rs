//! Market extraction
//!
//! Writes the markets of one raw period into a [`PeriodSlot`]. The sport
//! transforms decide which periods reach a slot; this module only knows how
//! each market family is keyed.

use crate::domain::{
    MoneyLine, PeriodSlot, Spread, TeamTotal, TeamTotalSide, Total, Win1x2, WinLessMore,
};

use super::line::line_key;
use super::odds::OddsFormat;

/// How a quoted handicap becomes a pair of line keys
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandicapConvention {
    /// Lines are shifted by the running score (football, basketball, tennis games):
    /// home = (away - home) + hdp, away = (home - away) - hdp
    ScoreRelative { home_score: f64, away_score: f64 },
    /// Lines are quoted as-is (volleyball): home = hdp, away = -hdp
    Absolute,
}

impl HandicapConvention {
    /// Line keys for the home and away side of a spread
    pub fn lines(&self, hdp: f64) -> (String, String) {
        match *self {
            HandicapConvention::ScoreRelative {
                home_score,
                away_score,
            } => (
                line_key((away_score - home_score) + hdp),
                line_key((home_score - away_score) - hdp),
            ),
            HandicapConvention::Absolute => (line_key(hdp), line_key(-hdp)),
        }
    }
}

/// Per-event extraction settings
#[derive(Debug, Clone, Copy)]
pub struct PeriodExtractor {
    odds: OddsFormat,
    handicap: HandicapConvention,
}

impl PeriodExtractor {
    pub fn new(odds: OddsFormat, handicap: HandicapConvention) -> Self {
        Self { odds, handicap }
    }

    /// Write the full home / draw / away triple
    pub fn money_line(&self, slot: &mut PeriodSlot, money_line: &MoneyLine) {
        slot.win1x2.win1 = self.odds.odd(money_line.home);
        slot.win1x2.win_none = self.odds.odd(money_line.draw);
        slot.win1x2.win2 = self.odds.odd(money_line.away);
    }

    /// Write home / away only; the draw price stays untouched
    pub fn two_way_money_line(&self, slot: &mut PeriodSlot, money_line: &MoneyLine) {
        slot.win1x2.win1 = self.odds.odd(money_line.home);
        slot.win1x2.win2 = self.odds.odd(money_line.away);
    }

    /// Write the triple of one game sub-market into the slot's game map
    pub fn game_money_line(&self, slot: &mut PeriodSlot, game: String, money_line: &MoneyLine) {
        let prices = Win1x2 {
            win1: self.odds.odd(money_line.home),
            win_none: self.odds.odd(money_line.draw),
            win2: self.odds.odd(money_line.away),
        };
        slot.games.insert(game, prices);
    }

    /// Write every spread. Each side lands under its own line key, so one
    /// spread may touch two different entries.
    pub fn spreads(&self, slot: &mut PeriodSlot, spreads: &[Spread]) {
        for spread in spreads {
            let (home_line, away_line) = self.handicap.lines(spread.hdp);

            slot.handicap.entry(home_line).or_default().win1 = self.odds.odd(spread.home);
            slot.handicap.entry(away_line).or_default().win2 = self.odds.odd(spread.away);
        }
    }

    /// Write a single game total
    pub fn total(&self, slot: &mut PeriodSlot, total: &Total) {
        slot.totals
            .insert(line_key(total.points), self.over_under(total.over, total.under));
    }

    pub fn totals(&self, slot: &mut PeriodSlot, totals: &[Total]) {
        for total in totals {
            self.total(slot, total);
        }
    }

    /// Write both team totals, skipping a side quoted at zero points
    pub fn team_totals(&self, slot: &mut PeriodSlot, team_total: &TeamTotal) {
        if let Some((line, prices)) = self.team_total_side(&team_total.home) {
            slot.first_team_totals.insert(line, prices);
        }
        if let Some((line, prices)) = self.team_total_side(&team_total.away) {
            slot.second_team_totals.insert(line, prices);
        }
    }

    fn team_total_side(&self, side: &TeamTotalSide) -> Option<(String, WinLessMore)> {
        if side.points == 0.0 {
            return None;
        }
        Some((line_key(side.points), self.over_under(side.over, side.under)))
    }

    fn over_under(&self, over: f64, under: f64) -> WinLessMore {
        WinLessMore {
            win_more: self.odds.odd(over),
            win_less: self.odds.odd(under),
        }
    }
}
