//! salesdash CLI - interactive sales dashboard over a CSV export.

mod colors;
mod inspect;
mod output;
mod serve;
mod summary;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "salesdash")]
#[command(about = "Interactive sales dashboard for CSV order exports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive dashboard server
    Serve {
        /// Path to the sales CSV
        csv: String,

        /// Host address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8501")]
        port: u16,

        /// Dashboard title
        #[arg(long, default_value = "Sales Dashboard")]
        title: String,

        /// Print the browser URL once the server is up
        #[arg(long)]
        open: bool,
    },

    /// Filter and summarize once, printing the result
    Summary {
        /// Path to the sales CSV
        csv: String,

        #[command(flatten)]
        filters: summary::FilterArgs,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show row count, date bounds and the available filter values
    Inspect {
        /// Path to the sales CSV
        csv: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Helper to format salesdash-core errors with recovery hints
    let format_error = |err: anyhow::Error| -> anyhow::Error {
        if let Some(core_err) = err.downcast_ref::<salesdash_core::Error>() {
            anyhow::anyhow!("{}", core_err.with_hint())
        } else {
            err
        }
    };

    match cli.command {
        Commands::Serve {
            csv,
            host,
            port,
            title,
            open,
        } => {
            let config = salesdash_server::ServerConfig {
                host,
                port,
                open_browser: open,
                title,
            };
            serve::execute(&csv, config).await.map_err(format_error)?;
        }

        Commands::Summary { csv, filters, json } => {
            summary::execute(&csv, &filters, json).map_err(format_error)?;
        }

        Commands::Inspect { csv } => {
            inspect::execute(&csv).map_err(format_error)?;
        }
    }

    Ok(())
}
