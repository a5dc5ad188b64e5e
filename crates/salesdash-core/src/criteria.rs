//! Filter criteria.
//!
//! Criteria are rebuilt from scratch on every interaction. Each predicate is
//! independent and optional; an empty [`Selection`] never restricts anything.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::record::{SalesRecord, parse_date};

/// Inclusive date bounds. A missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day retained.
    #[serde(default, deserialize_with = "lenient_start")]
    pub start: Option<NaiveDate>,
    /// Last day retained.
    #[serde(default, deserialize_with = "lenient_end")]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// A range with both bounds set.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Build a range from raw user input.
    ///
    /// Blank or unparseable bounds are treated as open rather than rejected.
    pub fn parse_lenient(start: Option<&str>, end: Option<&str>) -> Self {
        Self {
            start: lenient_bound("start", start),
            end: lenient_bound("end", end),
        }
    }

    /// Whether `date` falls within the range, both ends inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }

    /// True when neither bound is set.
    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

// Unparseable or blank bounds deserialize as open.
fn lenient_start<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(lenient_bound("start", raw.as_deref()))
}

fn lenient_end<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(lenient_bound("end", raw.as_deref()))
}

fn lenient_bound(which: &str, raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?;
    if raw.trim().is_empty() {
        return None;
    }
    let parsed = parse_date(raw);
    if parsed.is_none() {
        tracing::warn!("Ignoring invalid {} date {:?}", which, raw);
    }
    parsed
}

/// A set-membership predicate. Empty means "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(BTreeSet<String>);

impl Selection {
    /// An empty, pass-through selection.
    pub fn any() -> Self {
        Self::default()
    }

    /// Whether this selection restricts nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of selected values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Test a value. Always true for an empty selection.
    pub fn allows(&self, value: &str) -> bool {
        self.0.is_empty() || self.0.contains(value)
    }

    /// Selected values in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Add a value.
    pub fn insert(&mut self, value: impl Into<String>) {
        self.0.insert(value.into());
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// The categorical dimensions a user can restrict, in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Region,
    State,
    Country,
    City,
    Status,
}

impl Dimension {
    /// All dimensions in the order their predicates are applied.
    pub const ALL: [Dimension; 5] = [
        Dimension::Region,
        Dimension::State,
        Dimension::Country,
        Dimension::City,
        Dimension::Status,
    ];

    /// The record field this dimension filters on.
    ///
    /// `State` filters on the full state name, which is what users pick from.
    pub fn value_of(self, record: &SalesRecord) -> &str {
        match self {
            Dimension::Region => &record.region,
            Dimension::State => &record.state_name,
            Dimension::Country => &record.country,
            Dimension::City => &record.city,
            Dimension::Status => &record.status,
        }
    }

    /// Stable identifier used for widgets and CLI output.
    pub fn id(self) -> &'static str {
        match self {
            Dimension::Region => "region",
            Dimension::State => "state",
            Dimension::Country => "country",
            Dimension::City => "city",
            Dimension::Status => "status",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Region => "Region",
            Dimension::State => "State",
            Dimension::Country => "Country",
            Dimension::City => "City",
            Dimension::Status => "Order status",
        }
    }
}

/// All filter predicates, combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub date_range: DateRange,
    pub regions: Selection,
    pub states: Selection,
    pub countries: Selection,
    pub cities: Selection,
    pub statuses: Selection,
}

impl FilterCriteria {
    /// Criteria that restrict nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the date range.
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    /// Builder: replace the selection for one dimension.
    pub fn with_selection<I, S>(mut self, dimension: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.selection_mut(dimension) = values.into_iter().collect();
        self
    }

    /// The selection for a dimension.
    pub fn selection(&self, dimension: Dimension) -> &Selection {
        match dimension {
            Dimension::Region => &self.regions,
            Dimension::State => &self.states,
            Dimension::Country => &self.countries,
            Dimension::City => &self.cities,
            Dimension::Status => &self.statuses,
        }
    }

    /// Mutable access to the selection for a dimension.
    pub fn selection_mut(&mut self, dimension: Dimension) -> &mut Selection {
        match dimension {
            Dimension::Region => &mut self.regions,
            Dimension::State => &mut self.states,
            Dimension::Country => &mut self.countries,
            Dimension::City => &mut self.cities,
            Dimension::Status => &mut self.statuses,
        }
    }

    /// True when no predicate is active.
    pub fn is_unrestricted(&self) -> bool {
        self.date_range.is_open() && Dimension::ALL.iter().all(|d| self.selection(*d).is_empty())
    }

    /// Whether a record passes every active predicate.
    ///
    /// The date predicate is checked first, then each dimension in
    /// [`Dimension::ALL`] order.
    pub fn matches(&self, record: &SalesRecord) -> bool {
        self.date_range.contains(record.order_date)
            && Dimension::ALL
                .iter()
                .all(|d| self.selection(*d).allows(d.value_of(record)))
    }
}
