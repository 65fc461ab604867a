//! One pipeline per dashboard chart.
//!
//! Each function is a pure function of the dataset and config, so rerunning it
//! on the same input always yields the same output.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use crate::analyzers::aggregate::{
    collapse_long_tail, count_by, count_by_nested, mean_by, top_n_per_group,
};
use crate::analyzers::dedup::dedup_by_key;
use crate::analyzers::types::{KeyCount, KeyMean, NestedCount, PriceTrend};
use crate::categorize::{
    CategorizeOptions, CategorizedRecord, ODOMETER_TABLE, categorize_make_to_region,
    categorize_year,
};
use crate::config::PipelineConfig;
use crate::dataset::Dataset;

/// The charts a dataset can be rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    RegionProfiles,
    MakeProfiles,
    PriceTrend,
    RegionShare,
    MakeShare,
    YearlyVolume,
    OdometerMakeBreakdown,
}

impl ChartKind {
    pub const ALL: [ChartKind; 7] = [
        ChartKind::RegionProfiles,
        ChartKind::MakeProfiles,
        ChartKind::PriceTrend,
        ChartKind::RegionShare,
        ChartKind::MakeShare,
        ChartKind::YearlyVolume,
        ChartKind::OdometerMakeBreakdown,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::RegionProfiles => "region_profiles",
            ChartKind::MakeProfiles => "make_profiles",
            ChartKind::PriceTrend => "price_trend",
            ChartKind::RegionShare => "region_share",
            ChartKind::MakeShare => "make_share",
            ChartKind::YearlyVolume => "yearly_volume",
            ChartKind::OdometerMakeBreakdown => "odometer_make_breakdown",
        }
    }
}

/// Parallel-coordinates rows: year range, region, body type and labelled
/// odometer/price ranges, one per `year-region-body` combination.
pub fn region_profiles(dataset: &Dataset) -> Vec<CategorizedRecord> {
    let categorized = dataset
        .iter()
        .map(|s| CategorizedRecord::from_sale(s, CategorizeOptions::REGION_LABELS));
    dedup_by_key(categorized, CategorizedRecord::composite_key)
}

/// Parallel-coordinates rows keyed by brand instead of region, with luxury
/// brands removed and odometer/price reported as bucket midpoints.
///
/// Deduplication runs before the price window, so a combination whose first
/// sale is out of the window is dropped entirely.
pub fn make_profiles(dataset: &Dataset, config: &PipelineConfig) -> Vec<CategorizedRecord> {
    let categorized = dataset
        .iter()
        .filter(|s| !config.is_luxury(&s.make))
        .map(|s| CategorizedRecord::from_sale(s, CategorizeOptions::BRAND_MIDPOINTS));
    let unique = dedup_by_key(categorized, CategorizedRecord::composite_key);

    match config.price_window {
        Some((low, high)) => unique
            .into_iter()
            .filter(|r| {
                r.price
                    .as_midpoint()
                    .is_some_and(|p| p >= low && p <= high)
            })
            .collect(),
        None => unique,
    }
}

pub fn average_price_by_year_range(dataset: &Dataset) -> Vec<KeyMean> {
    KeyMean::from_map(mean_by(
        dataset,
        |s| categorize_year(s.year),
        |s| Some(s.price),
    ))
}

pub fn average_price_by_year(dataset: &Dataset) -> Vec<KeyMean> {
    KeyMean::from_map(mean_by(dataset, |s| s.year, |s| Some(s.price)))
}

pub fn price_trend(dataset: &Dataset) -> PriceTrend {
    PriceTrend {
        by_year_range: average_price_by_year_range(dataset),
        by_year: average_price_by_year(dataset),
    }
}

pub fn region_share(dataset: &Dataset) -> Vec<KeyCount> {
    KeyCount::from_map(count_by(dataset, |s| categorize_make_to_region(&s.make)))
}

/// Sales per lowercased make, luxury brands excluded, small makes folded into `"Other"`.
pub fn make_share(dataset: &Dataset, config: &PipelineConfig) -> Vec<KeyCount> {
    let counts = count_by(
        dataset.iter().filter(|s| !config.is_luxury(&s.make)),
        |s| s.make.to_lowercase(),
    );
    KeyCount::from_map(collapse_long_tail(counts, config.long_tail_threshold_pct))
}

pub fn yearly_volume(dataset: &Dataset) -> Vec<KeyCount> {
    KeyCount::from_map(count_by(dataset, |s| s.year))
}

/// The most common makes inside each odometer range, ranges in table order.
pub fn odometer_make_breakdown(dataset: &Dataset, config: &PipelineConfig) -> Vec<NestedCount> {
    let nested = count_by_nested(
        dataset,
        |s| ODOMETER_TABLE.index_of(s.odometer),
        |s| s.make.to_lowercase(),
    );

    top_n_per_group(nested, config.top_makes_per_range)
        .into_iter()
        .map(|(index, ranked)| NestedCount {
            key: ODOMETER_TABLE.label_at(index).to_string(),
            breakdown: ranked
                .into_iter()
                .map(|(key, count)| KeyCount { key, count })
                .collect(),
        })
        .collect()
}

fn to_value<T: Serialize>(value: T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}

/// Runs the pipeline for a single chart and returns its JSON form.
pub fn render_chart(
    kind: ChartKind,
    dataset: &Dataset,
    config: &PipelineConfig,
) -> Result<serde_json::Value> {
    match kind {
        ChartKind::RegionProfiles => to_value(region_profiles(dataset)),
        ChartKind::MakeProfiles => to_value(make_profiles(dataset, config)),
        ChartKind::PriceTrend => to_value(price_trend(dataset)),
        ChartKind::RegionShare => to_value(region_share(dataset)),
        ChartKind::MakeShare => to_value(make_share(dataset, config)),
        ChartKind::YearlyVolume => to_value(yearly_volume(dataset)),
        ChartKind::OdometerMakeBreakdown => to_value(odometer_make_breakdown(dataset, config)),
    }
}
