//! Error types for salesdash-core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for salesdash-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in salesdash-core.
///
/// Everything here is a load-time failure. Filtering and aggregation never
/// fail: empty results and missing coordinates degrade instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to open or read the dataset file.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be decoded from the CSV source.
    #[error("CSV error at line {line}: {message}")]
    Csv { line: u64, message: String },

    /// A row decoded but one of its fields has an unusable value.
    #[error("invalid {field} at line {line}: {value:?}")]
    InvalidField {
        line: u64,
        field: &'static str,
        value: String,
    },

    /// The source contained a header but no rows.
    #[error("dataset is empty")]
    EmptyDataset,
}

impl Error {
    /// Short recovery hint shown by the CLI next to the error.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Error::Read { .. } => Some("check the dataset path"),
            Error::Csv { .. } => Some(
                "expected columns: order_id, cust_id, full_name, order_date, total, category, \
                 Region, Country, State, State Complet, City, age, Gender, status",
            ),
            Error::InvalidField { field, .. } if *field == "order_date" => {
                Some("dates must be YYYY-MM-DD, YYYY-MM-DD HH:MM:SS or MM/DD/YYYY")
            }
            Error::InvalidField { .. } => None,
            Error::EmptyDataset => Some("the dashboard needs at least one sales row"),
        }
    }

    /// Format the error with its hint, if any.
    pub fn with_hint(&self) -> String {
        match self.hint() {
            Some(hint) => format!("{self}\n  hint: {hint}"),
            None => self.to_string(),
        }
    }
}
