//! Serve command implementation for the salesdash CLI.
//!
//! Loads the dataset once and starts the interactive dashboard server.

use std::path::Path;

use salesdash_core::{Dashboard, Dataset};
use salesdash_server::ServerConfig;

use crate::colors;

/// Start the interactive dashboard server.
pub async fn execute(csv_path: &str, config: ServerConfig) -> anyhow::Result<()> {
    let path = Path::new(csv_path);
    if !path.exists() {
        anyhow::bail!("Dataset not found: {}", csv_path);
    }

    let dataset = Dataset::from_path(path)?;
    let (first, last) = dataset.date_bounds();

    println!(
        "\n{}{}{} - Sales Dashboard",
        colors::BOLD,
        config.title,
        colors::RESET
    );
    println!("{}", "─".repeat(50));

    println!(
        "{}  ◆ Dataset:{} {} ({} rows, {} to {})",
        colors::CYAN,
        colors::RESET,
        path.display(),
        dataset.len(),
        first,
        last
    );
    println!(
        "{}  ◆ Server:{} http://{}:{}",
        colors::CYAN,
        colors::RESET,
        config.host,
        config.port
    );
    println!(
        "{}  ◆ WebSocket:{} ws://{}:{}/ws",
        colors::CYAN,
        colors::RESET,
        config.host,
        config.port
    );
    println!("{}", "─".repeat(50));
    println!("{}Press Ctrl+C to stop{}", colors::GREEN, colors::RESET);
    println!();

    salesdash_server::serve(Dashboard::with_us_states(dataset), config).await?;

    Ok(())
}
