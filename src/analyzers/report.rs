use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::charts::{
    ChartKind, make_profiles, make_share, odometer_make_breakdown, price_trend, region_profiles,
    region_share, yearly_volume,
};
use crate::analyzers::types::{ChartIndex, ChartIndexEntry, DashboardReport};
use crate::config::PipelineConfig;
use crate::dataset::Dataset;
use crate::output::write_json;

/// Runs every chart pipeline once over `dataset`.
pub fn build_report(dataset: &Dataset, config: &PipelineConfig) -> DashboardReport {
    let report = DashboardReport {
        schema_version: 1,
        generated_at: Utc::now(),
        record_count: dataset.len(),
        region_profiles: region_profiles(dataset),
        make_profiles: make_profiles(dataset, config),
        price_trend: price_trend(dataset),
        region_share: region_share(dataset),
        make_share: make_share(dataset, config),
        yearly_volume: yearly_volume(dataset),
        odometer_make_breakdown: odometer_make_breakdown(dataset, config),
    };

    debug!(
        region_profiles = report.region_profiles.len(),
        make_profiles = report.make_profiles.len(),
        make_share = report.make_share.len(),
        "Report built"
    );
    report
}

impl DashboardReport {
    /// Number of top-level entries the chart contributes.
    pub fn entries(&self, kind: ChartKind) -> usize {
        match kind {
            ChartKind::RegionProfiles => self.region_profiles.len(),
            ChartKind::MakeProfiles => self.make_profiles.len(),
            ChartKind::PriceTrend => self.price_trend.by_year_range.len(),
            ChartKind::RegionShare => self.region_share.len(),
            ChartKind::MakeShare => self.make_share.len(),
            ChartKind::YearlyVolume => self.yearly_volume.len(),
            ChartKind::OdometerMakeBreakdown => self.odometer_make_breakdown.len(),
        }
    }
}

fn write_chart(dir: &Path, kind: ChartKind, value: &impl Serialize) -> Result<String> {
    let file = format!("{}.json", kind.name());
    write_json(&dir.join(&file), value)?;
    Ok(file)
}

/// Writes one JSON file per chart into `dir`, then an `index.json` listing them.
pub fn write_report(dir: &Path, report: &DashboardReport) -> Result<ChartIndex> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;

    let mut charts = Vec::new();
    for kind in ChartKind::ALL {
        let file = match kind {
            ChartKind::RegionProfiles => write_chart(dir, kind, &report.region_profiles)?,
            ChartKind::MakeProfiles => write_chart(dir, kind, &report.make_profiles)?,
            ChartKind::PriceTrend => write_chart(dir, kind, &report.price_trend)?,
            ChartKind::RegionShare => write_chart(dir, kind, &report.region_share)?,
            ChartKind::MakeShare => write_chart(dir, kind, &report.make_share)?,
            ChartKind::YearlyVolume => write_chart(dir, kind, &report.yearly_volume)?,
            ChartKind::OdometerMakeBreakdown => {
                write_chart(dir, kind, &report.odometer_make_breakdown)?
            }
        };

        charts.push(ChartIndexEntry {
            chart: kind.name().to_string(),
            file,
            entries: report.entries(kind),
        });
    }

    let index = ChartIndex {
        generated_at: report.generated_at,
        record_count: report.record_count,
        charts,
    };
    write_json(&dir.join("index.json"), &index)?;

    info!(dir = %dir.display(), charts = index.charts.len(), "Report written");
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SaleRecord;
    use std::env;
    use std::fs;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            SaleRecord {
                year: 2014,
                make: "Kia".into(),
                body: "SUV".into(),
                odometer: 16_639.0,
                price: 21_500.0,
            },
            SaleRecord {
                year: 2015,
                make: "Nissan".into(),
                body: "Sedan".into(),
                odometer: 5_554.0,
                price: 10_900.0,
            },
        ])
    }

    #[test]
    fn test_build_report_counts() {
        let report = build_report(&dataset(), &PipelineConfig::default());

        assert_eq!(report.record_count, 2);
        assert_eq!(report.region_profiles.len(), 2);
        assert_eq!(report.yearly_volume.len(), 2);
        assert_eq!(report.entries(ChartKind::RegionShare), 2);
    }

    #[test]
    fn test_build_report_empty_dataset() {
        let report = build_report(&Dataset::default(), &PipelineConfig::default());

        for kind in ChartKind::ALL {
            assert_eq!(report.entries(kind), 0, "{} not empty", kind.name());
        }
    }

    #[test]
    fn test_write_report_creates_files() {
        let dir = env::temp_dir().join("car_sales_stats_report_test");
        let _ = fs::remove_dir_all(&dir);

        let report = build_report(&dataset(), &PipelineConfig::default());
        let index = write_report(&dir, &report).unwrap();

        assert_eq!(index.charts.len(), ChartKind::ALL.len());
        for entry in &index.charts {
            assert!(dir.join(&entry.file).exists(), "{} missing", entry.file);
        }
        let index_json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.join("index.json")).unwrap()).unwrap();
        assert_eq!(index_json["record_count"], 2);

        fs::remove_dir_all(&dir).unwrap();
    }
}
