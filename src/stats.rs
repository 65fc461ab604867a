use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::parser::{Field, RowError};

#[derive(Debug, Default, Clone, Serialize)]
pub struct IngestStats {
    pub timestamp: DateTime<Utc>,
    pub source: Option<String>,
    pub rows_read: usize,
    pub rows_kept: usize,

    // drop reasons
    pub missing_year: usize,
    pub missing_make: usize,
    pub missing_body: usize,
    pub missing_odometer: usize,
    pub missing_price: usize,
    pub zero_price: usize,
    pub negative_value: usize,
    pub malformed: usize,
}

impl IngestStats {
    /// Counts one rejected row under its reason.
    pub fn record_drop(&mut self, error: &RowError) {
        match error {
            RowError::MissingField(Field::Year) => self.missing_year += 1,
            RowError::MissingField(Field::Make) => self.missing_make += 1,
            RowError::MissingField(Field::Body) => self.missing_body += 1,
            RowError::MissingField(Field::Odometer) => self.missing_odometer += 1,
            RowError::MissingField(Field::Price) => self.missing_price += 1,
            RowError::ZeroPrice => self.zero_price += 1,
            RowError::Negative { .. } => self.negative_value += 1,
            RowError::Malformed(_) => self.malformed += 1,
        }
    }

    pub fn dropped(&self) -> usize {
        self.rows_read - self.rows_kept
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    pub fn kept_pct(&self) -> f64 {
        Self::pct(self.rows_kept, self.rows_read)
    }

    pub fn dropped_pct(&self) -> f64 {
        Self::pct(self.dropped(), self.rows_read)
    }

    /// Stamps the record with the load time and where the rows came from.
    pub fn with_source(mut self, source: &str) -> Self {
        self.timestamp = Utc::now();
        self.source = Some(source.to_string());
        self
    }
}
