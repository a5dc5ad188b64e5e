//! Inspect command: what the dashboard's filters would offer.

use std::path::Path;

use salesdash_core::group::distinct;
use salesdash_core::{Dataset, Dimension};

use crate::colors;

/// Options listed per dimension before truncating.
const MAX_LISTED: usize = 12;

pub fn execute(csv_path: &str) -> anyhow::Result<()> {
    let path = Path::new(csv_path);
    if !path.exists() {
        anyhow::bail!("Dataset not found: {}", csv_path);
    }

    let dataset = Dataset::from_path(path)?;
    let (first, last) = dataset.date_bounds();

    println!(
        "\n{}Dataset:{} {}",
        colors::BOLD,
        colors::RESET,
        path.display()
    );
    println!("{}", "─".repeat(50));
    println!("{}  ◆ Rows:{} {}", colors::CYAN, colors::RESET, dataset.len());
    println!(
        "{}  ◆ Dates:{} {} to {}",
        colors::CYAN,
        colors::RESET,
        first,
        last
    );

    for dimension in Dimension::ALL {
        let values = distinct(dataset.iter().map(|r| dimension.value_of(r)));
        let shown = values.iter().take(MAX_LISTED).cloned().collect::<Vec<_>>().join(", ");
        let more = values.len().saturating_sub(MAX_LISTED);
        println!(
            "{}  ◆ {} ({}):{} {}{}",
            colors::CYAN,
            dimension.label(),
            values.len(),
            colors::RESET,
            shown,
            if more > 0 {
                format!(" {}… {} more{}", colors::DIM, more, colors::RESET)
            } else {
                String::new()
            }
        );
    }

    Ok(())
}
