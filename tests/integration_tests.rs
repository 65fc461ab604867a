use std::collections::HashSet;

use car_sales_stats::analyzers::charts::{
    ChartKind, make_profiles, make_share, region_profiles, region_share, render_chart,
    yearly_volume,
};
use car_sales_stats::analyzers::report::{build_report, write_report};
use car_sales_stats::config::PipelineConfig;
use car_sales_stats::dataset::Dataset;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/car_prices_sample.csv");

fn load() -> Dataset {
    let (dataset, _) = Dataset::load(FIXTURE).expect("Failed to load fixture");
    dataset
}

#[test]
fn test_ingest_drops_invalid_rows() {
    let (dataset, stats) = Dataset::load(FIXTURE).unwrap();

    assert_eq!(stats.rows_read, 15);
    assert_eq!(stats.rows_kept, 11);
    assert_eq!(dataset.len(), 11);
    assert_eq!(stats.missing_year, 1);
    assert_eq!(stats.missing_body, 1);
    assert_eq!(stats.missing_odometer, 1);
    assert_eq!(stats.zero_price, 1);
    assert_eq!(stats.source.as_deref(), Some(FIXTURE));
}

#[test]
fn test_dataset_is_year_ordered() {
    let dataset = load();
    let years: Vec<_> = dataset.iter().map(|r| r.year).collect();
    let mut sorted = years.clone();
    sorted.sort();
    assert_eq!(years, sorted);
}

#[test]
fn test_region_profiles_unique() {
    let rows = region_profiles(&load());

    let mut keys = HashSet::new();
    for r in &rows {
        assert!(keys.insert(r.composite_key()), "duplicate {}", r.composite_key());
    }
    assert_eq!(rows.len(), 9);
    assert_eq!(rows[0].composite_key(), "2001-2005-American-truck");
}

#[test]
fn test_make_views_skip_luxury_brands() {
    let dataset = load();
    let config = PipelineConfig::default();

    let share = make_share(&dataset, &config);
    assert!(share.iter().all(|k| k.key != "ferrari" && k.key != "bmw"));
    assert_eq!(share.iter().map(|k| k.count).sum::<usize>(), 9);

    let profiles = make_profiles(&dataset, &config);
    assert!(profiles.iter().all(|r| r.make != "ferrari" && r.make != "bmw"));
}

#[test]
fn test_counts_cover_every_record() {
    let dataset = load();

    let regions = region_share(&dataset);
    assert_eq!(regions.iter().map(|k| k.count).sum::<usize>(), dataset.len());
    assert!(regions.iter().all(|k| k.key != "Other"));

    let volume = yearly_volume(&dataset);
    assert_eq!(volume.iter().map(|k| k.count).sum::<usize>(), dataset.len());
}

#[test]
fn test_every_chart_renders() {
    let dataset = load();
    let config = PipelineConfig::default();

    for kind in ChartKind::ALL {
        let value = render_chart(kind, &dataset, &config).unwrap();
        assert!(!value.is_null(), "{} rendered null", kind.name());
    }
}

#[test]
fn test_full_pipeline_writes_report() {
    let dir = std::env::temp_dir().join("car_sales_stats_integration_report");
    let _ = std::fs::remove_dir_all(&dir);

    let report = build_report(&load(), &PipelineConfig::default());
    let index = write_report(&dir, &report).unwrap();

    assert_eq!(index.record_count, 11);
    assert!(dir.join("index.json").exists());
    assert!(dir.join("make_share.json").exists());

    std::fs::remove_dir_all(&dir).unwrap();
}
