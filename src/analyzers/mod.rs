//! Deduplication, aggregation and per-chart pipelines.
//!
//! This module groups validated sales into counts and means, folds small
//! groups into `"Other"`, and bundles every chart into a [`types::DashboardReport`].

pub mod aggregate;
pub mod charts;
pub mod dedup;
pub mod report;
pub mod types;
pub mod utility;
