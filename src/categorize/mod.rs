//! Per-field classification of validated sale records.
//!
//! Every categorizer is a pure, total function: unrecognized or out-of-range
//! input maps to a sentinel label (`"Unknown"` / `"Other"`) instead of an error.

pub mod body;
pub mod bucket;
pub mod region;
pub mod year;

pub use body::categorize_body;
pub use bucket::{BucketMode, BucketTable, BucketValue, ODOMETER_TABLE, PRICE_TABLE};
pub use region::{Region, categorize_make_to_region};
pub use year::categorize_year;

use serde::Serialize;

use crate::dataset::SaleRecord;

/// Whether the make column is kept as a lowercased brand or collapsed to a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MakeMode {
    Brand,
    Region,
}

#[derive(Debug, Clone, Copy)]
pub struct CategorizeOptions {
    pub make: MakeMode,
    pub numeric: BucketMode,
}

impl CategorizeOptions {
    pub const REGION_LABELS: Self = CategorizeOptions {
        make: MakeMode::Region,
        numeric: BucketMode::Label,
    };

    pub const BRAND_MIDPOINTS: Self = CategorizeOptions {
        make: MakeMode::Brand,
        numeric: BucketMode::Midpoint,
    };
}

/// A sale record with every field replaced by its category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorizedRecord {
    pub year: &'static str,
    pub make: String,
    pub body: &'static str,
    pub odometer: BucketValue,
    pub price: BucketValue,
}

impl CategorizedRecord {
    pub fn from_sale(sale: &SaleRecord, options: CategorizeOptions) -> Self {
        let make = match options.make {
            MakeMode::Brand => sale.make.to_lowercase(),
            MakeMode::Region => categorize_make_to_region(&sale.make).to_string(),
        };

        CategorizedRecord {
            year: categorize_year(sale.year),
            make,
            body: categorize_body(&sale.body),
            odometer: ODOMETER_TABLE.bucket(sale.odometer, options.numeric),
            price: PRICE_TABLE.bucket(sale.price, options.numeric),
        }
    }

    /// `year-make-body`, used to keep one record per combination.
    pub fn composite_key(&self) -> String {
        format!("{}-{}-{}", self.year, self.make, self.body)
    }
}
