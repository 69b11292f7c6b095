//! Run configuration
//!
//! A [`RunConfig`] bundles everything a run needs. Every section defaults to the
//! reference setup, so an empty TOML document reproduces the reference run:
//!
//! ```toml
//! [parameters]
//! separation = 25.0
//!
//! [grid]
//! duration = 0.5
//!
//! [[scenarios]]
//! name = "B is cold"
//! initial_temperature_a = 10000.0
//! partner = { initial_temperature = 2000.0 }
//! ```

use crate::chart::ChartSettings;
use crate::scenarios::{reference_scenarios, ScenarioDefinition};
use radex_core::errors::{RadexError, RadexResult};
use radex_core::parameters::{SimulationParameters, TimeGridParameters};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub parameters: SimulationParameters,
    pub grid: TimeGridParameters,
    pub scenarios: Vec<ScenarioDefinition>,
    pub chart: ChartSettings,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            parameters: SimulationParameters::default(),
            grid: TimeGridParameters::default(),
            scenarios: reference_scenarios(),
            chart: ChartSettings::default(),
        }
    }
}

impl RunConfig {
    pub fn from_toml_str(contents: &str) -> RadexResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> RadexResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Check the parts of the configuration that would make a run meaningless.
    ///
    /// Physical parameters are deliberately left unchecked.
    pub fn validate(&self) -> RadexResult<()> {
        if self.scenarios.is_empty() {
            return Err(RadexError::Error(
                "configuration defines no scenarios".to_string(),
            ));
        }
        let mut names: Vec<&str> = self.scenarios.iter().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        if let Some(pair) = names.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(RadexError::Error(format!(
                "scenario {} is defined more than once",
                pair[0]
            )));
        }
        Ok(())
    }
}
