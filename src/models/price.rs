use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One observed price for a symbol.
///
/// Timestamps come from the market-data provider as exchange-local naive
/// datetimes, so no timezone is attached here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: NaiveDateTime,
    pub price: f64,
}
