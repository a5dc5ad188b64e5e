//! The dashboard pipeline.
//!
//! Every interaction rebuilds the filter form from the current widget values,
//! filters the read-only dataset and summarizes the subset. Nothing is cached
//! between runs.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::criteria::{DateRange, Dimension, FilterCriteria};
use crate::dataset::Dataset;
use crate::filter;
use crate::geo::StateCoordinates;
use crate::group::distinct;
use crate::record::SalesRecord;
use crate::summary::{Summary, summarize};
use crate::widgets::{WidgetContext, WidgetDef, WidgetValue};

/// Widget ID of the start date input.
pub const START_DATE: &str = "start_date";
/// Widget ID of the end date input.
pub const END_DATE: &str = "end_date";

/// Widgets plus the criteria they currently express.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterForm {
    pub widgets: Vec<WidgetDef>,
    pub criteria: FilterCriteria,
}

/// One complete dashboard render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub widgets: Vec<WidgetDef>,
    pub criteria: FilterCriteria,
    /// Rows in the full dataset.
    pub total_rows: usize,
    /// Rows left after filtering.
    pub filtered_rows: usize,
    pub summary: Summary,
}

/// The dataset and coordinate table, shared read-only across interactions.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Arc<Dataset>,
    coordinates: Arc<StateCoordinates>,
}

impl Dashboard {
    pub fn new(dataset: Arc<Dataset>, coordinates: Arc<StateCoordinates>) -> Self {
        Self {
            dataset,
            coordinates,
        }
    }

    /// Dashboard over `dataset` with the built-in US state coordinates.
    pub fn with_us_states(dataset: Dataset) -> Self {
        Self::new(Arc::new(dataset), Arc::new(StateCoordinates::us_states()))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn coordinates(&self) -> &StateCoordinates {
        &self.coordinates
    }

    /// Filter then summarize.
    pub fn refresh(&self, criteria: &FilterCriteria) -> Summary {
        let subset = filter::apply(self.dataset.iter(), criteria);
        summarize(&subset, &self.coordinates)
    }

    /// Build the filter widgets from the current values.
    ///
    /// Region and status offer every value in the dataset. State, country and
    /// city cascade: each offers only the values left by the date range and
    /// the selections registered before it.
    pub fn form(&self, values: &HashMap<String, WidgetValue>) -> FilterForm {
        let mut ctx = WidgetContext::with_values(values.clone());
        let (min, max) = self.dataset.date_bounds();

        let start = ctx.register_date_input(START_DATE, "Start date", min, max, Some(min));
        let end = ctx.register_date_input(END_DATE, "End date", min, max, Some(max));
        let mut criteria = FilterCriteria::new().with_date_range(DateRange { start, end });

        let mut narrowed: Vec<&SalesRecord> = filter::apply(self.dataset.iter(), &criteria);

        for dimension in Dimension::ALL {
            let options = match dimension {
                Dimension::Region | Dimension::Status => {
                    distinct(self.dataset.iter().map(|r| dimension.value_of(r)))
                }
                Dimension::State | Dimension::Country | Dimension::City => {
                    distinct(narrowed.iter().map(|r| dimension.value_of(r)))
                }
            };

            let selected = ctx.register_multiselect(dimension.id(), dimension.label(), options);
            if !selected.is_empty() {
                let selection = criteria.selection_mut(dimension);
                *selection = selected.into_iter().collect();
                let selection = criteria.selection(dimension);
                narrowed.retain(|r| selection.allows(dimension.value_of(r)));
            }
        }

        FilterForm {
            widgets: ctx.take_widgets(),
            criteria,
        }
    }

    /// Run one full interaction: form, filter, summarize.
    pub fn render(&self, values: &HashMap<String, WidgetValue>) -> DashboardView {
        let FilterForm { widgets, criteria } = self.form(values);
        let subset = filter::apply(self.dataset.iter(), &criteria);
        let filtered_rows = subset.len();
        let summary = summarize(&subset, &self.coordinates);

        tracing::debug!(
            total = self.dataset.len(),
            filtered = filtered_rows,
            "Recomputed dashboard"
        );

        DashboardView {
            widgets,
            criteria,
            total_rows: self.dataset.len(),
            filtered_rows,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn record(date: (i32, u32, u32), region: &str, state: &str, city: &str, total: f64) -> SalesRecord {
        SalesRecord {
            order_id: format!("{city}-{total}"),
            customer_id: city.to_string(),
            full_name: city.to_string(),
            order_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            total,
            category: "Books".to_string(),
            region: region.to_string(),
            country: "US".to_string(),
            state_code: state[..2].to_uppercase(),
            state_name: state.to_string(),
            city: city.to_string(),
            age: 40,
            gender: "M".to_string(),
            status: "complete".to_string(),
        }
    }

    fn dashboard() -> Dashboard {
        Dashboard::with_us_states(
            Dataset::new(vec![
                record((2023, 1, 5), "East", "New York", "Albany", 10.0),
                record((2023, 2, 5), "West", "California", "Fresno", 20.0),
                record((2023, 3, 5), "East", "Maine", "Portland", 30.0),
                record((2023, 4, 5), "West", "Oregon", "Portland", 40.0),
            ])
            .unwrap(),
        )
    }

    fn options_of<'a>(form: &'a FilterForm, id: &str) -> &'a [String] {
        form.widgets
            .iter()
            .find_map(|w| match w {
                WidgetDef::MultiSelect { id: wid, options, .. } if wid == id => Some(options.as_slice()),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_default_form_is_unrestricted_in_effect() {
        let dash = dashboard();
        let form = dash.form(&HashMap::new());

        assert_eq!(form.widgets.len(), 7);
        assert_eq!(form.widgets[0].id(), START_DATE);
        assert!(form.criteria.regions.is_empty());
        assert_eq!(filter::apply(dash.dataset(), &form.criteria).len(), 4);
    }

    #[test]
    fn test_state_options_cascade_from_region() {
        let dash = dashboard();
        let mut values = HashMap::new();
        values.insert("region".to_string(), WidgetValue::Selection(vec!["West".to_string()]));
        let form = dash.form(&values);

        assert_eq!(options_of(&form, "region"), ["East", "West"]);
        assert_eq!(options_of(&form, "state"), ["California", "Oregon"]);
        assert_eq!(options_of(&form, "city"), ["Fresno", "Portland"]);
    }

    #[test]
    fn test_city_options_respect_date_range() {
        let dash = dashboard();
        let mut values = HashMap::new();
        values.insert(END_DATE.to_string(), WidgetValue::Date(Some("2023-02-28".to_string())));
        let form = dash.form(&values);

        assert_eq!(options_of(&form, "city"), ["Albany", "Fresno"]);
        assert_eq!(options_of(&form, "status"), ["complete"]);
    }

    #[test]
    fn test_render_no_data() {
        let dash = dashboard();
        let mut values = HashMap::new();
        values.insert(START_DATE.to_string(), WidgetValue::Date(Some("2024-01-01".to_string())));
        let view = dash.render(&values);

        assert_eq!(view.total_rows, 4);
        assert_eq!(view.filtered_rows, 0);
        assert!(view.summary.is_no_data());
    }

    #[test]
    fn test_refresh_matches_render() {
        let dash = dashboard();
        let mut values = HashMap::new();
        values.insert("city".to_string(), WidgetValue::Selection(vec!["Portland".to_string()]));
        let view = dash.render(&values);

        assert_eq!(view.filtered_rows, 2);
        assert_eq!(view.summary, dash.refresh(&view.criteria));
        let report = view.summary.report().unwrap();
        assert_eq!(report.kpis.total_sales, 70.0);
    }
}
