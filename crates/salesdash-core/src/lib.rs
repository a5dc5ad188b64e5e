//! Core pipeline for the salesdash sales dashboard.
//!
//! This crate provides:
//! - Sales records and CSV dataset loading
//! - Filter criteria and the filter stage
//! - The aggregation stage (KPIs and chart tables)
//! - Filter widget descriptions with cascading options
//! - The [`Dashboard`] that ties them together per interaction
//!
//! ```rust,ignore
//! let dashboard = Dashboard::with_us_states(Dataset::from_path("sales.csv")?);
//! let criteria = FilterCriteria::new().with_selection(Dimension::Region, ["East"]);
//! match dashboard.refresh(&criteria) {
//!     Summary::NoData => println!("No data"),
//!     Summary::Ready(report) => println!("{:.2}", report.kpis.total_sales),
//! }
//! ```

pub mod criteria;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod geo;
pub mod group;
pub mod record;
pub mod summary;
pub mod widgets;

pub use criteria::{DateRange, Dimension, FilterCriteria, Selection};
pub use dashboard::{Dashboard, DashboardView, FilterForm};
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use geo::{Coordinates, StateCoordinates};
pub use record::SalesRecord;
pub use summary::{GenderShare, GroupTotal, Kpis, MonthlyTotal, Report, StateTotal, Summary, summarize};
pub use widgets::{WidgetContext, WidgetDef, WidgetValue};
