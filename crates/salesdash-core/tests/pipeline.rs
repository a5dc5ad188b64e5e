//! Integration tests for the filter → summarize pipeline.
//!
//! Covers the behavioral guarantees the dashboard relies on: pass-through
//! selections, idempotent filtering, inclusive dates and consistent totals.

use chrono::NaiveDate;
use salesdash_core::criteria::{DateRange, Dimension, FilterCriteria};
use salesdash_core::filter;
use salesdash_core::geo::StateCoordinates;
use salesdash_core::record::SalesRecord;
use salesdash_core::summary::{Report, Summary, TOP_CUSTOMERS, summarize};
use salesdash_core::{Dashboard, Dataset};

// =============================================================================
// Test Helpers
// =============================================================================

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Builder for records where only a few fields matter per test.
struct Row {
    record: SalesRecord,
}

impl Row {
    fn new(order_id: &str, date: NaiveDate, total: f64) -> Self {
        Self {
            record: SalesRecord {
                order_id: order_id.to_string(),
                customer_id: format!("cust-{order_id}"),
                full_name: format!("Customer {order_id}"),
                order_date: date,
                total,
                category: "Books".to_string(),
                region: "East".to_string(),
                country: "US".to_string(),
                state_code: "NY".to_string(),
                state_name: "New York".to_string(),
                city: "Albany".to_string(),
                age: 35,
                gender: "F".to_string(),
                status: "complete".to_string(),
            },
        }
    }

    fn region(mut self, region: &str) -> Self {
        self.record.region = region.to_string();
        self
    }

    fn category(mut self, category: &str) -> Self {
        self.record.category = category.to_string();
        self
    }

    fn customer(mut self, id: &str, name: &str) -> Self {
        self.record.customer_id = id.to_string();
        self.record.full_name = name.to_string();
        self
    }

    fn gender(mut self, gender: &str) -> Self {
        self.record.gender = gender.to_string();
        self
    }

    fn status(mut self, status: &str) -> Self {
        self.record.status = status.to_string();
        self
    }

    fn build(self) -> SalesRecord {
        self.record
    }
}

/// The three-row example dataset.
fn three_rows() -> Vec<SalesRecord> {
    vec![
        Row::new("1", ymd(2023, 1, 5), 100.0).region("East").build(),
        Row::new("2", ymd(2023, 2, 10), 50.0).region("West").build(),
        Row::new("3", ymd(2023, 3, 1), 25.0).region("East").build(),
    ]
}

/// A larger mixed dataset for property checks.
fn mixed_rows() -> Vec<SalesRecord> {
    let regions = ["East", "West", "South", "Central"];
    let categories = ["Books", "Appliances", "Mobiles & Tablets", "Men's Fashion"];
    let genders = ["F", "M"];
    let statuses = ["complete", "canceled", "received"];

    (0..60)
        .map(|i| {
            let date = ymd(2022, 1, 1) + chrono::Days::new(i * 11);
            Row::new(&format!("o{}", i / 2), date, 10.0 + (i % 7) as f64 * 3.25)
                .region(regions[i as usize % regions.len()])
                .category(categories[i as usize % categories.len()])
                .customer(&format!("c{}", i % 13), &format!("Name {}", i % 13))
                .gender(genders[i as usize % genders.len()])
                .status(statuses[i as usize % statuses.len()])
                .build()
        })
        .collect()
}

fn report(summary: Summary) -> Report {
    match summary {
        Summary::Ready(report) => report,
        Summary::NoData => panic!("Expected data"),
    }
}

fn order_ids(rows: &[&SalesRecord]) -> Vec<String> {
    rows.iter().map(|r| r.order_id.clone()).collect()
}

// =============================================================================
// Filter properties
// =============================================================================

#[test]
fn test_empty_selection_is_noop() {
    let data = mixed_rows();
    let base = FilterCriteria::new().with_selection(Dimension::Status, ["complete"]);

    for dimension in Dimension::ALL {
        if dimension == Dimension::Status {
            continue;
        }
        let with_empty = base
            .clone()
            .with_selection(dimension, Vec::<String>::new());
        assert_eq!(
            order_ids(&filter::apply(&data, &with_empty)),
            order_ids(&filter::apply(&data, &base)),
            "empty {:?} selection changed the result",
            dimension
        );
    }
}

#[test]
fn test_filter_is_idempotent() {
    let data = mixed_rows();
    let criteria = FilterCriteria::new()
        .with_date_range(DateRange::between(ymd(2022, 3, 1), ymd(2022, 12, 31)))
        .with_selection(Dimension::Region, ["East", "South"])
        .with_selection(Dimension::Status, ["complete", "received"]);

    let once = filter::apply(&data, &criteria);
    let twice = filter::apply(once.iter().copied(), &criteria);
    assert!(!once.is_empty());
    assert_eq!(order_ids(&once), order_ids(&twice));
}

#[test]
fn test_date_bounds_inclusive() {
    let data = three_rows();
    let criteria =
        FilterCriteria::new().with_date_range(DateRange::between(ymd(2023, 1, 5), ymd(2023, 3, 1)));
    assert_eq!(order_ids(&filter::apply(&data, &criteria)), ["1", "2", "3"]);

    let single_day =
        FilterCriteria::new().with_date_range(DateRange::between(ymd(2023, 2, 10), ymd(2023, 2, 10)));
    assert_eq!(order_ids(&filter::apply(&data, &single_day)), ["2"]);
}

#[test]
fn test_filter_preserves_order() {
    let data = mixed_rows();
    let criteria = FilterCriteria::new().with_selection(Dimension::Region, ["West"]);
    let out = filter::apply(&data, &criteria);

    let positions: Vec<usize> = out
        .iter()
        .map(|r| data.iter().position(|d| std::ptr::eq(d, *r)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

// =============================================================================
// Aggregation properties
// =============================================================================

#[test]
fn test_category_sum_equals_total() {
    let data = mixed_rows();
    let subset: Vec<&SalesRecord> = data.iter().collect();
    let report = report(summarize(&subset, &StateCoordinates::us_states()));

    let category_sum: f64 = report.categories.iter().map(|c| c.total).sum();
    assert!((category_sum - report.kpis.total_sales).abs() < 1e-6);

    let monthly_sum: f64 = report.monthly.iter().map(|m| m.total).sum();
    assert!((monthly_sum - report.kpis.total_sales).abs() < 1e-6);
}

#[test]
fn test_top_customers_bounded_and_sorted() {
    let data = mixed_rows();
    let subset: Vec<&SalesRecord> = data.iter().collect();
    let report = report(summarize(&subset, &StateCoordinates::us_states()));

    assert!(report.top_customers.len() <= TOP_CUSTOMERS);
    assert!(report
        .top_customers
        .windows(2)
        .all(|w| w[0].total >= w[1].total));
}

#[test]
fn test_gender_percentages_sum_to_100() {
    let data = mixed_rows();
    let subset: Vec<&SalesRecord> = data.iter().collect();
    let report = report(summarize(&subset, &StateCoordinates::us_states()));

    let total: f64 = report.genders.iter().map(|g| g.percentage).sum();
    assert!((total - 100.0).abs() < 1e-9);
}

#[test]
fn test_monthly_sorted_ascending() {
    let mut data = mixed_rows();
    data.reverse();
    let subset: Vec<&SalesRecord> = data.iter().collect();
    let report = report(summarize(&subset, &StateCoordinates::us_states()));

    assert!(report.monthly.windows(2).all(|w| w[0].month < w[1].month));
    assert!(report.monthly.iter().all(|m| m.month.format("%d").to_string() == "01"));
}

// =============================================================================
// Worked examples
// =============================================================================

#[test]
fn test_three_row_example() {
    let data = three_rows();
    let criteria =
        FilterCriteria::new().with_date_range(DateRange::between(ymd(2023, 1, 1), ymd(2023, 2, 28)));
    let subset = filter::apply(&data, &criteria);
    assert_eq!(order_ids(&subset), ["1", "2"]);

    let report = report(summarize(&subset, &StateCoordinates::us_states()));
    assert_eq!(report.kpis.total_sales, 150.0);

    let regions: Vec<(&str, f64)> = report
        .regions
        .iter()
        .map(|r| (r.key.as_str(), r.total))
        .collect();
    assert_eq!(regions, [("East", 100.0), ("West", 50.0)]);
}

#[test]
fn test_unmatched_region_is_no_data() {
    let data = three_rows();
    let criteria = FilterCriteria::new().with_selection(Dimension::Region, ["North"]);
    let subset = filter::apply(&data, &criteria);

    assert!(subset.is_empty());
    assert_eq!(summarize(&subset, &StateCoordinates::us_states()), Summary::NoData);
}

#[test]
fn test_same_name_customers_merge() {
    let data = vec![
        Row::new("1", ymd(2023, 1, 1), 40.0).customer("a", "Jane Doe").build(),
        Row::new("2", ymd(2023, 1, 2), 60.0).customer("b", "Jane Doe").build(),
    ];
    let subset: Vec<&SalesRecord> = data.iter().collect();
    let report = report(summarize(&subset, &StateCoordinates::us_states()));

    assert_eq!(report.top_customers.len(), 1);
    assert_eq!(report.top_customers[0].key, "Jane Doe");
    assert_eq!(report.top_customers[0].total, 100.0);
    assert_eq!(report.kpis.distinct_customers, 2);
}

#[test]
fn test_dashboard_refresh_is_deterministic() {
    let dashboard = Dashboard::with_us_states(Dataset::new(mixed_rows()).unwrap());
    let criteria = FilterCriteria::new().with_selection(Dimension::Region, ["East", "Central"]);

    let first = dashboard.refresh(&criteria);
    let second = dashboard.refresh(&criteria);
    assert_eq!(first, second);
}
