use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Brands left out of the make-level charts.
pub static DEFAULT_LUXURY_BRANDS: &[&str] = &[
    "ferrari",
    "rolls-royce",
    "fisker",
    "tesla",
    "lamborghini",
    "bentley",
    "porsche",
    "bmw",
    "mercedes-benz",
    "jaguar",
    "land rover",
    "maserati",
    "alfa romeo",
    "fiat",
    "smart",
    "hummer",
    "lotus",
    "aston martin",
];

/// Tunables for the chart pipelines.
///
/// Stored as a JSON object on disk; any omitted key keeps its default:
/// ```json
/// {
///   "luxury_brands": ["ferrari", "bentley"],
///   "long_tail_threshold_pct": 2.0,
///   "top_makes_per_range": 3,
///   "price_window": [1000.0, 30000.0]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub luxury_brands: Vec<String>,
    /// Makes below this share (percent of the total) collapse into `"Other"`.
    pub long_tail_threshold_pct: f64,
    pub top_makes_per_range: usize,
    /// Inclusive bounds on the price midpoint kept by the make profile chart.
    pub price_window: Option<(f64, f64)>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            luxury_brands: DEFAULT_LUXURY_BRANDS.iter().map(|b| b.to_string()).collect(),
            long_tail_threshold_pct: 2.5,
            top_makes_per_range: 5,
            price_window: Some((1_000.0, 30_000.0)),
        }
    }
}

impl PipelineConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("failed to read config '{path}'"))?;
        let config: PipelineConfig = serde_json::from_str(&content)
            .with_context(|| format!("invalid pipeline config '{path}'"))?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise the defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Case-insensitive membership test against [`Self::luxury_brands`].
    pub fn is_luxury(&self, make: &str) -> bool {
        let make = make.trim().to_lowercase();
        self.luxury_brands.iter().any(|b| b.eq_ignore_ascii_case(&make))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.long_tail_threshold_pct, 2.5);
        assert_eq!(cfg.top_makes_per_range, 5);
        assert!(cfg.is_luxury("Ferrari"));
        assert!(cfg.is_luxury("land rover"));
        assert!(!cfg.is_luxury("toyota"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg: PipelineConfig =
            serde_json::from_str(r#"{ "long_tail_threshold_pct": 2.0, "price_window": null }"#)
                .unwrap();

        assert_eq!(cfg.long_tail_threshold_pct, 2.0);
        assert_eq!(cfg.price_window, None);
        assert_eq!(cfg.top_makes_per_range, 5);
        assert_eq!(cfg.luxury_brands.len(), DEFAULT_LUXURY_BRANDS.len());
    }

    #[test]
    fn test_load_from_file() {
        let path = format!("{}/car_sales_stats_config.json", std::env::temp_dir().display());
        std::fs::write(&path, r#"{ "luxury_brands": ["kia"], "price_window": [0, 5000] }"#)
            .unwrap();

        let cfg = PipelineConfig::load(&path).unwrap();
        assert!(cfg.is_luxury("KIA"));
        assert!(!cfg.is_luxury("ferrari"));
        assert_eq!(cfg.price_window, Some((0.0, 5000.0)));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_or_default_without_path() {
        let cfg = PipelineConfig::load_or_default(None).unwrap();
        assert_eq!(cfg, PipelineConfig::default());
    }
}
