//! The validated, in-memory sales dataset shared by every chart pipeline.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::fetch::load_source;
use crate::parser::parse_sales;
use crate::stats::IngestStats;

/// One sale with every field present and numerically valid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleRecord {
    pub year: i32,
    pub make: String,
    pub body: String,
    pub odometer: f64,
    pub price: f64,
}

/// Immutable collection of sales, ordered by model year.
///
/// Built once at startup and passed by reference into each pipeline.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<SaleRecord>,
}

impl Dataset {
    /// Takes ownership of `records` and sorts them by year. The sort is stable,
    /// so rows of the same year keep their source order.
    pub fn new(mut records: Vec<SaleRecord>) -> Self {
        records.sort_by_key(|r| r.year);
        Dataset { records }
    }

    /// Reads, decodes and validates a CSV from a path or URL.
    pub fn load(source: &str) -> Result<(Self, IngestStats)> {
        let bytes = load_source(source)?;
        let parsed = parse_sales(bytes.as_slice())
            .with_context(|| format!("failed to parse sales CSV from '{source}'"))?;

        let stats = parsed.stats.with_source(source);
        info!(
            source,
            rows_read = stats.rows_read,
            rows_kept = stats.rows_kept,
            "Dataset loaded"
        );
        if stats.rows_read > 0 && stats.dropped_pct() > 50.0 {
            warn!(dropped_pct = stats.dropped_pct(), "More than half of the rows were dropped");
        }

        Ok((Dataset::new(parsed.records), stats))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SaleRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a SaleRecord;
    type IntoIter = std::slice::Iter<'a, SaleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(year: i32, make: &str) -> SaleRecord {
        SaleRecord {
            year,
            make: make.to_string(),
            body: "Sedan".to_string(),
            odometer: 1.0,
            price: 1.0,
        }
    }

    #[test]
    fn test_new_sorts_by_year_stably() {
        let ds = Dataset::new(vec![
            sale(2014, "kia"),
            sale(2001, "ford"),
            sale(2014, "audi"),
            sale(2001, "honda"),
        ]);

        let order: Vec<_> = ds.iter().map(|r| (r.year, r.make.as_str())).collect();
        assert_eq!(
            order,
            vec![(2001, "ford"), (2001, "honda"), (2014, "kia"), (2014, "audi")]
        );
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::default();
        assert!(ds.is_empty());
        assert_eq!(ds.len(), 0);
    }
}
