pub mod analyzers;
pub mod categorize;
pub mod config;
pub mod dataset;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod stats;
