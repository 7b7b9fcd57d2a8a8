//! League and team name normalization
//!
//! Names are joined against other bookmakers downstream, so every sport
//! reduces them to the same lower-case, punctuation-free form and drops
//! club designations that other feeds usually omit.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::Sport;

static FOOTBALL_CLUB_TOKENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(FC|SC|FK|CF|CD|NK|LK|U\d+)\b").unwrap());

static BASKETBALL_CLUB_TOKENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(BC|BK|BBC|CD)\b").unwrap());

static VOLLEYBALL_CLUB_TOKENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(VC)\b").unwrap());

/// Normalize a league name for the given sport
pub fn normalize_league(sport: Sport, league: &str) -> String {
    match sport {
        // "ATP Vienna - R1" -> "atp vienna"
        Sport::Tennis => normalize_name(league.split('-').next().unwrap_or_default()),
        _ => normalize_name(league),
    }
}

/// Normalize a team (or player) name for the given sport
pub fn normalize_team(sport: Sport, team: &str) -> String {
    let tokens = match sport {
        Sport::Football => Some(&*FOOTBALL_CLUB_TOKENS),
        Sport::Basketball => Some(&*BASKETBALL_CLUB_TOKENS),
        Sport::Volleyball => Some(&*VOLLEYBALL_CLUB_TOKENS),
        Sport::Tennis | Sport::Handball | Sport::TableTennis => None,
    };

    match tokens {
        Some(re) => normalize_name(&re.replace_all(team, "")),
        None => normalize_name(team),
    }
}

/// Drop commas and hyphens, collapse whitespace, lower-case
fn normalize_name(name: &str) -> String {
    let name = name.replace([',', '-'], "");
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
