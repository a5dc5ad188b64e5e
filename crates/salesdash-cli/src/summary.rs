//! Summary command implementation for the salesdash CLI.
//!
//! Runs the filter and aggregation stages once and prints the result.

use std::path::Path;
use std::time::Instant;

use clap::Args;
use salesdash_core::{Dashboard, Dataset, DateRange, Dimension, FilterCriteria, Summary};

use crate::colors;
use crate::output::{print_no_data, print_report};

/// Filter flags shared by the summary command.
#[derive(Debug, Default, Args)]
pub struct FilterArgs {
    /// First order date to include (inclusive)
    #[arg(long)]
    pub from: Option<String>,

    /// Last order date to include (inclusive)
    #[arg(long)]
    pub to: Option<String>,

    /// Keep only these regions (repeatable)
    #[arg(long = "region")]
    pub regions: Vec<String>,

    /// Keep only these states, by full name (repeatable)
    #[arg(long = "state")]
    pub states: Vec<String>,

    /// Keep only these countries (repeatable)
    #[arg(long = "country")]
    pub countries: Vec<String>,

    /// Keep only these cities (repeatable)
    #[arg(long = "city")]
    pub cities: Vec<String>,

    /// Keep only these order statuses (repeatable)
    #[arg(long = "status")]
    pub statuses: Vec<String>,
}

impl FilterArgs {
    /// Translate the flags into filter criteria.
    pub fn criteria(&self) -> FilterCriteria {
        let range = DateRange::parse_lenient(self.from.as_deref(), self.to.as_deref());
        [
            (Dimension::Region, &self.regions),
            (Dimension::State, &self.states),
            (Dimension::Country, &self.countries),
            (Dimension::City, &self.cities),
            (Dimension::Status, &self.statuses),
        ]
        .into_iter()
        .fold(
            FilterCriteria::new().with_date_range(range),
            |criteria, (dimension, values)| criteria.with_selection(dimension, values.iter().cloned()),
        )
    }
}

/// Summarize a dataset under the given filters.
pub fn execute(csv_path: &str, filters: &FilterArgs, json: bool) -> anyhow::Result<()> {
    let path = Path::new(csv_path);
    if !path.exists() {
        anyhow::bail!("Dataset not found: {}", csv_path);
    }

    let start = Instant::now();
    let dashboard = Dashboard::with_us_states(Dataset::from_path(path)?);
    let summary = dashboard.refresh(&filters.criteria());

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "\n{}Summary{} {}{}{}",
        colors::BOLD,
        colors::RESET,
        colors::DIM,
        path.display(),
        colors::RESET
    );
    println!("{}", "─".repeat(50));

    match &summary {
        Summary::NoData => print_no_data(),
        Summary::Ready(report) => print_report(report),
    }

    println!("\n{}", "─".repeat(50));
    println!(
        "{}Completed{} over {} rows in {:.2}s",
        colors::GREEN,
        colors::RESET,
        dashboard.dataset().len(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
