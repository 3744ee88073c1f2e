pub mod analyzers;
pub mod chart;
pub mod config;
pub mod fetch;
pub mod infra;
pub mod loader;
pub mod output;
pub mod report;
pub mod services;
