//! Output handling for the salesdash CLI.
//!
//! Terminal rendering of dashboard summaries.

mod formatter;

pub use formatter::{print_no_data, print_report};
