//! Price conversion

use serde::{Deserialize, Serialize};

use crate::domain::Odd;

/// Format in which the provider quotes prices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OddsFormat {
    /// Prices are already decimal and pass through untouched
    #[default]
    Decimal,
    /// Prices are American and are converted to decimal
    American,
}

impl OddsFormat {
    /// Build a record price from a raw feed value
    pub fn odd(&self, value: f64) -> Odd {
        match self {
            OddsFormat::Decimal => Odd::new(value),
            OddsFormat::American => Odd::new(american_to_decimal(value)),
        }
    }
}

/// Convert an American price to decimal, truncated to three places
pub fn american_to_decimal(odds: f64) -> f64 {
    if odds == 0.0 {
        return 0.0;
    }

    if odds > 0.0 {
        (((odds / 100.0) + 1.0) * 1000.0).floor() / 1000.0
    } else {
        (((100.0 / odds.abs()) + 1.0) * 1000.0).floor() / 1000.0
    }
}
