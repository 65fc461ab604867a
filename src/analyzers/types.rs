//! Data types produced by the chart pipelines.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::categorize::CategorizedRecord;

/// A group label and how many records fell into it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyCount {
    pub key: String,
    pub count: usize,
}

/// A group label and the mean of a numeric field across the group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMean {
    pub key: String,
    pub mean: f64,
}

/// An outer group with its ranked inner counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NestedCount {
    pub key: String,
    pub breakdown: Vec<KeyCount>,
}

impl KeyCount {
    pub fn from_map<K: ToString>(map: BTreeMap<K, usize>) -> Vec<Self> {
        map.into_iter()
            .map(|(k, count)| KeyCount {
                key: k.to_string(),
                count,
            })
            .collect()
    }
}

impl KeyMean {
    pub fn from_map<K: ToString>(map: BTreeMap<K, f64>) -> Vec<Self> {
        map.into_iter()
            .map(|(k, mean)| KeyMean {
                key: k.to_string(),
                mean,
            })
            .collect()
    }
}

/// Average selling price, both per year range and per single model year.
#[derive(Debug, Clone, Serialize)]
pub struct PriceTrend {
    pub by_year_range: Vec<KeyMean>,
    pub by_year: Vec<KeyMean>,
}

/// Output of every chart pipeline for one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub schema_version: u8,
    pub generated_at: DateTime<Utc>,
    pub record_count: usize,
    pub region_profiles: Vec<CategorizedRecord>,
    pub make_profiles: Vec<CategorizedRecord>,
    pub price_trend: PriceTrend,
    pub region_share: Vec<KeyCount>,
    pub make_share: Vec<KeyCount>,
    pub yearly_volume: Vec<KeyCount>,
    pub odometer_make_breakdown: Vec<NestedCount>,
}

/// Summary entry for the report index.
#[derive(Debug, Serialize)]
pub struct ChartIndexEntry {
    pub chart: String,
    pub file: String,
    pub entries: usize,
}

/// Top-level listing of the files written for a report, served as `index.json`.
#[derive(Debug, Serialize)]
pub struct ChartIndex {
    pub generated_at: DateTime<Utc>,
    pub record_count: usize,
    pub charts: Vec<ChartIndexEntry>,
}
