//! Sales records.
//!
//! One [`SalesRecord`] per line item of the source file. Records are
//! immutable once loaded; the pipeline only ever borrows them.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single sales line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Order identifier. Several rows may share one order.
    pub order_id: String,
    /// Customer identifier.
    pub customer_id: String,
    /// Customer full name, used as the top-customers key.
    pub full_name: String,
    /// Order date at day granularity.
    pub order_date: NaiveDate,
    /// Monetary total of the line.
    pub total: f64,
    /// Product category.
    pub category: String,
    /// Sales region.
    pub region: String,
    /// Country.
    pub country: String,
    /// State abbreviation (joins against the coordinate table).
    pub state_code: String,
    /// State full name (what the state filter offers).
    pub state_name: String,
    /// City.
    pub city: String,
    /// Customer age in years.
    pub age: u32,
    /// Customer gender label.
    pub gender: String,
    /// Order status.
    pub status: String,
}

/// Formats accepted for the `order_date` column, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"];

/// Parse a calendar date, discarding any time of day.
///
/// Returns `None` for anything that is not a valid date in one of the
/// accepted formats.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}
