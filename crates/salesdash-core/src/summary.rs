//! Aggregation stage.
//!
//! [`summarize`] turns a filtered subset into the KPIs and tables the
//! dashboard charts consume. Every table is grouped by exact key equality in
//! first-seen order, so results are reproducible for identical input.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::geo::StateCoordinates;
use crate::group::OrderedGroups;
use crate::record::SalesRecord;

/// Maximum rows in the top-customers table.
pub const TOP_CUSTOMERS: usize = 10;

/// Headline metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    /// Sum of `total` over the subset.
    pub total_sales: f64,
    /// Number of distinct customer ids.
    pub distinct_customers: usize,
    /// Number of distinct order ids.
    pub distinct_orders: usize,
}

/// A key with a summed total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub key: String,
    pub total: f64,
}

/// Row count and share of all rows for one gender label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderShare {
    pub gender: String,
    pub count: usize,
    /// `count / Σcount × 100`.
    pub percentage: f64,
}

/// Sales summed over one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// First day of the month.
    pub month: NaiveDate,
    pub total: f64,
}

/// Sales summed over one state, with its coordinates when known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateTotal {
    pub state: String,
    pub total: f64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Everything the dashboard draws for a non-empty subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub kpis: Kpis,
    /// Sales per product category.
    pub categories: Vec<GroupTotal>,
    /// Sales per region; the chart derives percentages.
    pub regions: Vec<GroupTotal>,
    /// Best customers by summed sales, descending, at most [`TOP_CUSTOMERS`].
    pub top_customers: Vec<GroupTotal>,
    /// One age per row; binning is left to the chart.
    pub ages: Vec<u32>,
    /// Rows per gender, most frequent first.
    pub genders: Vec<GenderShare>,
    /// Sales per month, oldest first.
    pub monthly: Vec<MonthlyTotal>,
    /// Sales per state code.
    pub states: Vec<StateTotal>,
}

/// Outcome of the aggregation stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Summary {
    /// The filtered subset is empty; nothing is aggregated.
    NoData,
    /// Aggregates over a non-empty subset.
    Ready(Report),
}

impl Summary {
    /// The report, unless this is the no-data outcome.
    pub fn report(&self) -> Option<&Report> {
        match self {
            Summary::NoData => None,
            Summary::Ready(report) => Some(report),
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Summary::NoData)
    }
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Aggregate a filtered subset.
///
/// Returns [`Summary::NoData`] for an empty subset instead of computing
/// empty groups and zero-division percentages.
pub fn summarize(subset: &[&SalesRecord], coordinates: &StateCoordinates) -> Summary {
    if subset.is_empty() {
        return Summary::NoData;
    }

    let mut total_sales = 0.0;
    let mut customers: FxHashSet<&str> = FxHashSet::default();
    let mut orders: FxHashSet<&str> = FxHashSet::default();
    let mut categories: OrderedGroups<&str, f64> = OrderedGroups::new();
    let mut regions: OrderedGroups<&str, f64> = OrderedGroups::new();
    let mut customer_totals: OrderedGroups<&str, f64> = OrderedGroups::new();
    let mut genders: OrderedGroups<&str, usize> = OrderedGroups::new();
    let mut states: OrderedGroups<&str, f64> = OrderedGroups::new();
    let mut monthly: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut ages = Vec::with_capacity(subset.len());

    for record in subset {
        total_sales += record.total;
        customers.insert(&record.customer_id);
        orders.insert(&record.order_id);
        *categories.entry(&record.category) += record.total;
        *regions.entry(&record.region) += record.total;
        *customer_totals.entry(&record.full_name) += record.total;
        *genders.entry(&record.gender) += 1;
        *states.entry(&record.state_code) += record.total;
        *monthly.entry(month_start(record.order_date)).or_default() += record.total;
        ages.push(record.age);
    }

    let report = Report {
        kpis: Kpis {
            total_sales,
            distinct_customers: customers.len(),
            distinct_orders: orders.len(),
        },
        categories: group_totals(categories),
        regions: group_totals(regions),
        top_customers: top_customers(customer_totals),
        ages,
        genders: gender_shares(genders),
        monthly: monthly
            .into_iter()
            .map(|(month, total)| MonthlyTotal { month, total })
            .collect(),
        states: state_totals(states, coordinates),
    };

    tracing::debug!(
        rows = subset.len(),
        categories = report.categories.len(),
        months = report.monthly.len(),
        "Summarized subset"
    );

    Summary::Ready(report)
}

fn group_totals(groups: OrderedGroups<&str, f64>) -> Vec<GroupTotal> {
    groups
        .into_vec()
        .into_iter()
        .map(|(key, total)| GroupTotal {
            key: key.to_string(),
            total,
        })
        .collect()
}

fn top_customers(groups: OrderedGroups<&str, f64>) -> Vec<GroupTotal> {
    let mut totals = group_totals(groups);
    // Stable: equal totals stay in first-seen order.
    totals.sort_by(|a, b| b.total.total_cmp(&a.total));
    totals.truncate(TOP_CUSTOMERS);
    totals
}

fn gender_shares(groups: OrderedGroups<&str, usize>) -> Vec<GenderShare> {
    let mut counts = groups.into_vec();
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total: usize = counts.iter().map(|(_, count)| count).sum();
    counts
        .into_iter()
        .map(|(gender, count)| GenderShare {
            gender: gender.to_string(),
            count,
            percentage: count as f64 / total as f64 * 100.0,
        })
        .collect()
}

fn state_totals(groups: OrderedGroups<&str, f64>, coordinates: &StateCoordinates) -> Vec<StateTotal> {
    groups
        .into_vec()
        .into_iter()
        .map(|(state, total)| {
            let coords = coordinates.get(state);
            StateTotal {
                state: state.to_string(),
                total,
                latitude: coords.map(|c| c.latitude),
                longitude: coords.map(|c| c.longitude),
            }
        })
        .collect()
}
