//! Reference cooling scenarios for radex
//!
//! This crate drives [`radex_core`] through a set of scenario definitions and
//! turns the results into artifacts.
//!
//! - `config`: run configuration (parameters, grid, scenarios, chart windows)
//! - `scenarios`: the reference scenarios and their (parallel) execution
//! - `chart`: SVG line charts of the temperature series
//! - `export`: CSV export of the temperature series

pub mod chart;
pub mod config;
pub mod export;
pub mod scenarios;

pub use config::RunConfig;
pub use export::write_artifacts;
pub use scenarios::{run_scenarios, ScenarioOutcome, Series};
