//! CSV decoding and row validation for the used-car sales export.

use std::fmt;
use std::io::Read;

use anyhow::{Result, bail};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::dataset::SaleRecord;
use crate::stats::IngestStats;

/// Columns that must be present in the header row.
pub const REQUIRED_COLUMNS: &[&str] = &["year", "make", "body", "odometer", "sellingprice"];

/// A row as it appears in the CSV. Numeric cells that fail to parse are read as absent.
///
/// `year` is read as a float so exports that write `2014.0` still load.
#[derive(Debug, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub year: Option<f64>,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub odometer: Option<f64>,
    #[serde(default, rename = "sellingprice", deserialize_with = "csv::invalid_option")]
    pub price: Option<f64>,
}

/// A required column of the sales export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Year,
    Make,
    Body,
    Odometer,
    Price,
}

impl Field {
    pub fn column(&self) -> &'static str {
        match self {
            Field::Year => "year",
            Field::Make => "make",
            Field::Body => "body",
            Field::Odometer => "odometer",
            Field::Price => "sellingprice",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Why a row was kept out of the dataset.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("missing or invalid field '{0}'")]
    MissingField(Field),
    #[error("selling price is zero")]
    ZeroPrice,
    #[error("field '{field}' is negative: {value}")]
    Negative { field: Field, value: f64 },
    #[error("malformed row: {0}")]
    Malformed(String),
}

fn required_text(value: Option<String>, field: Field) -> Result<String, RowError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(RowError::MissingField(field)),
    }
}

fn required_number(value: Option<f64>, field: Field) -> Result<f64, RowError> {
    match value {
        Some(v) if !v.is_finite() => Err(RowError::MissingField(field)),
        Some(v) if v < 0.0 => Err(RowError::Negative { field, value: v }),
        Some(v) => Ok(v),
        None => Err(RowError::MissingField(field)),
    }
}

/// Whole-number years only; `2014.0` is accepted, `2014.5` is not.
fn required_year(value: Option<f64>) -> Result<i32, RowError> {
    match value {
        Some(v) if v.is_finite() && v.fract() == 0.0 && v.abs() <= i32::MAX as f64 => Ok(v as i32),
        _ => Err(RowError::MissingField(Field::Year)),
    }
}

impl RawRecord {
    /// Checks every required field and produces a [`SaleRecord`].
    pub fn validate(self) -> Result<SaleRecord, RowError> {
        let year = required_year(self.year)?;
        let make = required_text(self.make, Field::Make)?;
        let body = required_text(self.body, Field::Body)?;
        let odometer = required_number(self.odometer, Field::Odometer)?;
        let price = required_number(self.price, Field::Price)?;

        if price == 0.0 {
            return Err(RowError::ZeroPrice);
        }

        Ok(SaleRecord {
            year,
            make,
            body,
            odometer,
            price,
        })
    }
}

/// Valid records plus the bookkeeping for everything that was dropped.
#[derive(Debug)]
pub struct ParsedSales {
    pub records: Vec<SaleRecord>,
    pub stats: IngestStats,
}

/// Decodes a headed CSV stream into validated sale records.
///
/// # Errors
///
/// Returns an error if the header row cannot be read or a required column is
/// missing. Individual bad rows are counted in [`IngestStats`] and skipped.
/// Whitespace around every cell is trimmed before decoding.
pub fn parse_sales<R: Read>(reader: R) -> Result<ParsedSales> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        bail!("CSV is missing required columns: {}", missing.join(", "));
    }

    let mut records = Vec::new();
    let mut stats = IngestStats::default();

    for (line, result) in rdr.deserialize::<RawRecord>().enumerate() {
        stats.rows_read += 1;

        let outcome = result
            .map_err(|e| RowError::Malformed(e.to_string()))
            .and_then(RawRecord::validate);

        match outcome {
            Ok(record) => records.push(record),
            Err(e) => {
                debug!(row = line + 1, error = %e, "Dropping row");
                stats.record_drop(&e);
            }
        }
    }

    stats.rows_kept = records.len();
    Ok(ParsedSales { records, stats })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "year,make,model,trim,body,transmission,odometer,sellingprice\n";

    fn parse(rows: &str) -> ParsedSales {
        parse_sales(format!("{HEADER}{rows}").as_bytes()).unwrap()
    }

    #[test]
    fn test_parse_valid_rows() {
        let parsed = parse(
            "2015,Kia,Sorento,LX,SUV,automatic,16639,21500\n\
             2014,BMW,3 Series,328i,Sedan,automatic,1331,30000\n",
        );

        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.stats.rows_read, 2);
        assert_eq!(parsed.stats.rows_kept, 2);
        assert_eq!(parsed.records[0].make, "Kia");
        assert_eq!(parsed.records[1].price, 30000.0);
    }

    #[test]
    fn test_drops_invalid_rows() {
        let parsed = parse(
            ",Kia,Sorento,LX,SUV,automatic,16639,21500\n\
             2014,,3 Series,328i,Sedan,automatic,1331,30000\n\
             2014,Ford,F-150,XL,,automatic,1331,30000\n\
             2014,Ford,F-150,XL,SuperCrew,automatic,abc,30000\n\
             2014,Ford,F-150,XL,SuperCrew,automatic,1331,0\n\
             2014,Ford,F-150,XL,SuperCrew,automatic,-5,100\n\
             2012,Ford,F-150,XL,SuperCrew,automatic,80000,9000\n",
        );

        assert_eq!(parsed.stats.rows_read, 7);
        assert_eq!(parsed.stats.rows_kept, 1);
        assert_eq!(parsed.stats.missing_year, 1);
        assert_eq!(parsed.stats.missing_make, 1);
        assert_eq!(parsed.stats.missing_body, 1);
        assert_eq!(parsed.stats.missing_odometer, 1);
        assert_eq!(parsed.stats.zero_price, 1);
        assert_eq!(parsed.stats.negative_value, 1);
        assert_eq!(parsed.records[0].year, 2012);
    }

    #[test]
    fn test_missing_required_column() {
        let result = parse_sales("year,make,body,odometer\n2014,Kia,SUV,10\n".as_bytes());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("sellingprice"));
    }

    #[test]
    fn test_empty_body_yields_empty_dataset() {
        let parsed = parse("");
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.stats.rows_read, 0);
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let raw = RawRecord {
            year: Some(2010.0),
            make: Some("honda".into()),
            body: Some("sedan".into()),
            odometer: Some(f64::NAN),
            price: Some(1000.0),
        };
        assert_eq!(raw.validate(), Err(RowError::MissingField(Field::Odometer)));
    }

    #[test]
    fn test_padded_cells_are_trimmed() {
        let parsed = parse("2014 , Kia ,Sorento,LX, SUV ,automatic, 16639 , 21500\n");

        assert_eq!(parsed.stats.rows_kept, 1);
        let record = &parsed.records[0];
        assert_eq!(record.year, 2014);
        assert_eq!(record.make, "Kia");
        assert_eq!(record.body, "SUV");
        assert_eq!(record.odometer, 16639.0);
        assert_eq!(record.price, 21500.0);
    }

    #[test]
    fn test_float_formatted_year() {
        let parsed = parse(
            "2014.0,Kia,Sorento,LX,SUV,automatic,1,2\n\
             2014.5,Kia,Sorento,LX,SUV,automatic,1,2\n",
        );

        assert_eq!(parsed.stats.rows_kept, 1);
        assert_eq!(parsed.stats.missing_year, 1);
        assert_eq!(parsed.records[0].year, 2014);
    }

    #[test]
    fn test_invalid_utf8_row_is_malformed() {
        let mut input = HEADER.as_bytes().to_vec();
        input.extend_from_slice(b"2014,K\xffa,Sorento,LX,SUV,automatic,16639,21500\n");
        input.extend_from_slice(b"2012,Ford,F-150,XL,SuperCrew,automatic,80000,9000\n");

        let parsed = parse_sales(input.as_slice()).unwrap();

        assert_eq!(parsed.stats.rows_read, 2);
        assert_eq!(parsed.stats.rows_kept, 1);
        assert_eq!(parsed.stats.malformed, 1);
        assert_eq!(parsed.records[0].make, "Ford");
    }
}
