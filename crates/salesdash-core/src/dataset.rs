//! Dataset loading.
//!
//! The dataset is read once from a delimited file at startup and never
//! mutated afterwards. Malformed rows abort the load with the offending line
//! number; the pipeline downstream assumes a well-typed table.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::record::{SalesRecord, parse_date};

/// A CSV row as it appears in the source file, before typing.
#[derive(Debug, Deserialize)]
struct RawRow {
    order_id: String,
    cust_id: String,
    full_name: String,
    order_date: String,
    total: f64,
    category: String,
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "State Complet")]
    state_complet: String,
    #[serde(rename = "City")]
    city: String,
    age: String,
    #[serde(rename = "Gender")]
    gender: String,
    status: String,
}

impl RawRow {
    fn into_record(self, line: u64) -> Result<SalesRecord> {
        let order_date = parse_date(&self.order_date).ok_or_else(|| Error::InvalidField {
            line,
            field: "order_date",
            value: self.order_date.clone(),
        })?;
        let age = parse_age(&self.age).ok_or_else(|| Error::InvalidField {
            line,
            field: "age",
            value: self.age.clone(),
        })?;
        if !self.total.is_finite() {
            return Err(Error::InvalidField {
                line,
                field: "total",
                value: self.total.to_string(),
            });
        }

        Ok(SalesRecord {
            order_id: self.order_id,
            customer_id: self.cust_id,
            full_name: self.full_name,
            order_date,
            total: self.total,
            category: self.category,
            region: self.region,
            country: self.country,
            state_code: self.state,
            state_name: self.state_complet,
            city: self.city,
            age,
            gender: self.gender,
            status: self.status,
        })
    }
}

/// Ages sometimes come out of spreadsheets as `34.0`.
fn parse_age(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    raw.parse::<u32>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v <= u32::MAX as f64)
            .map(|v| v as u32)
    })
}

/// The full, read-only sales table.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<SalesRecord>,
}

impl Dataset {
    /// Build a dataset from already-typed records.
    ///
    /// # Errors
    /// Returns [`Error::EmptyDataset`] if `records` is empty.
    pub fn new(records: Vec<SalesRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::EmptyDataset);
        }
        Ok(Self { records })
    }

    /// Load a dataset from a CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_reader(file)?;
        let (first, last) = dataset.date_bounds();

        tracing::info!(
            path = %path.display(),
            rows = dataset.len(),
            %first,
            %last,
            "Loaded sales dataset"
        );
        Ok(dataset)
    }

    /// Load a dataset from any CSV reader with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| Error::Csv {
                line: 1,
                message: e.to_string(),
            })?
            .clone();

        let mut records = Vec::new();
        for result in csv_reader.records() {
            let row = result.map_err(|e| Error::Csv {
                line: e.position().map(|p| p.line()).unwrap_or_default(),
                message: e.to_string(),
            })?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();

            let raw: RawRow = row.deserialize(Some(&headers)).map_err(|e| Error::Csv {
                line,
                message: e.to_string(),
            })?;
            records.push(raw.into_record(line)?);
        }

        Self::new(records)
    }

    /// All records in source order.
    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    /// Iterate records in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, SalesRecord> {
        self.records.iter()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest order date.
    pub fn date_bounds(&self) -> (NaiveDate, NaiveDate) {
        let first = self.records[0].order_date;
        self.records
            .iter()
            .fold((first, first), |(min, max), r| {
                (min.min(r.order_date), max.max(r.order_date))
            })
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a SalesRecord;
    type IntoIter = std::slice::Iter<'a, SalesRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
