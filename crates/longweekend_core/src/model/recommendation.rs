//! Recommendation projection derived from holidays.
//!
//! Recommendations are recomputed on every holiday list change and are never
//! persisted. Equality is structural.

use serde::{Deserialize, Serialize};

/// One suggested extra day off that forms a long weekend with a holiday.
///
/// Serialized in camelCase for rendering layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub holiday_name: String,
    /// ISO date of the originating holiday.
    pub holiday_date: String,
    /// Full weekday name, e.g. `Thursday`.
    pub holiday_day_of_week: String,
    /// ISO date of the suggested day off.
    pub recommended_date: String,
    /// Full weekday name of the suggested day off.
    pub recommended_day: String,
    /// Human-readable sentence, e.g.
    /// `Take Friday, Nov 28 off to make a 4-day weekend!`.
    pub explanation: String,
}
