//! Market helpers shared by every sport transform

pub mod extract;
pub mod line;
pub mod names;
pub mod odds;

pub use extract::{HandicapConvention, PeriodExtractor};
pub use line::line_key;
pub use names::{normalize_league, normalize_team};
pub use odds::{american_to_decimal, OddsFormat};
