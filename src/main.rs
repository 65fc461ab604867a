//! CLI entry point for the used-car sales dashboard data pipeline.
//!
//! Loads a sales CSV once, then either reports ingest statistics, renders a
//! single chart's data, or writes the full set of chart files.

use anyhow::Result;
use car_sales_stats::analyzers::charts::{ChartKind, render_chart};
use car_sales_stats::analyzers::report::{build_report, write_report};
use car_sales_stats::{
    config::PipelineConfig,
    dataset::Dataset,
    output::{append_record, print_json, print_pretty, write_json},
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "car_sales_stats")]
#[command(about = "Categorize and aggregate used-car sales for dashboard charts", long_about = None)]
struct Cli {
    /// JSON pipeline config (falls back to CAR_SALES_CONFIG, then built-in defaults)
    #[arg(short, long, global = true, env = "CAR_SALES_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a sales CSV, reporting how many rows survived
    Ingest {
        /// Path or URL of the CSV (optionally .gz)
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// CSV file to append ingest statistics to
        #[arg(short, long)]
        stats_out: Option<String>,
    },
    /// Compute the data behind a single chart
    Chart {
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        #[arg(value_enum)]
        kind: ChartKind,

        /// Write the chart JSON here instead of logging it
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Compute every chart and write one JSON file per chart plus an index
    Report {
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Directory to write chart files into
        #[arg(short = 'd', long, default_value = "charts")]
        output_dir: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/car_sales_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("car_sales_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = PipelineConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Ingest { source, stats_out } => ingest(&source, stats_out.as_deref())?,
        Commands::Chart {
            source,
            kind,
            output,
        } => chart(&source, kind, output.as_deref(), &config)?,
        Commands::Report { source, output_dir } => report(&source, &output_dir, &config)?,
    }

    Ok(())
}

#[tracing::instrument]
fn ingest(source: &str, stats_out: Option<&str>) -> Result<()> {
    let (dataset, stats) = Dataset::load(source)?;
    print_pretty(&stats);

    info!(
        records = dataset.len(),
        kept_pct = stats.kept_pct(),
        zero_price = stats.zero_price,
        malformed = stats.malformed,
        "Ingest summary"
    );

    if let Some(path) = stats_out {
        append_record(path, &stats)?;
    }
    Ok(())
}

#[tracing::instrument(skip(config))]
fn chart(
    source: &str,
    kind: ChartKind,
    output: Option<&str>,
    config: &PipelineConfig,
) -> Result<()> {
    let (dataset, _) = Dataset::load(source)?;
    let value = render_chart(kind, &dataset, config)?;

    match output {
        Some(path) => {
            write_json(Path::new(path), &value)?;
            info!(path, "Chart written");
        }
        None => print_json(&value)?,
    }
    Ok(())
}

#[tracing::instrument(skip(config))]
fn report(source: &str, output_dir: &str, config: &PipelineConfig) -> Result<()> {
    let (dataset, _) = Dataset::load(source)?;
    let report = build_report(&dataset, config);
    let index = write_report(Path::new(output_dir), &report)?;

    for entry in &index.charts {
        info!(chart = %entry.chart, entries = entry.entries, file = %entry.file, "Chart");
    }
    Ok(())
}
