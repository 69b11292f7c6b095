//! Scenario definitions and execution.
//!
//! The reference set compares how a body at 10000 K cools
//!
//! 1. next to a much colder partner (`B is cold`),
//! 2. next to a partner at nearly the same temperature (`B is hot`),
//! 3. alone (`No Object B`).
//!
//! Scenarios are independent, so [`run_scenarios`] executes them on the rayon
//! thread pool. Outcomes are returned in definition order regardless of which
//! run finishes first.

use log::{debug, info};
use radex_core::errors::RadexResult;
use radex_core::parameters::{SimulationParameters, TimeGridParameters};
use radex_core::timeseries::{FloatValue, Time, TimeGrid};
use radex_core::{RadiativeExchange, ScenarioResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The second body of a paired scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerDefinition {
    /// Initial temperature of B (K).
    pub initial_temperature: FloatValue,

    /// Specific heat capacity of B (J/(kg K)).
    /// Falls back to the shared default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_capacity: Option<FloatValue>,
}

/// A single simulation run.
///
/// Without a partner the run is isolated: A only exchanges radiation with the
/// surroundings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    pub name: String,

    /// Initial temperature of A (K).
    pub initial_temperature_a: FloatValue,

    /// Specific heat capacity of A (J/(kg K)).
    /// Falls back to the shared default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_capacity_a: Option<FloatValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner: Option<PartnerDefinition>,
}

impl ScenarioDefinition {
    pub fn paired(
        name: impl Into<String>,
        initial_temperature_a: FloatValue,
        initial_temperature_b: FloatValue,
    ) -> Self {
        Self {
            name: name.into(),
            initial_temperature_a,
            heat_capacity_a: None,
            partner: Some(PartnerDefinition {
                initial_temperature: initial_temperature_b,
                heat_capacity: None,
            }),
        }
    }

    pub fn isolated(name: impl Into<String>, initial_temperature_a: FloatValue) -> Self {
        Self {
            name: name.into(),
            initial_temperature_a,
            heat_capacity_a: None,
            partner: None,
        }
    }

    /// Run the scenario with the explicit Euler integrator.
    pub fn run(
        &self,
        parameters: &SimulationParameters,
        time_grid: &Arc<TimeGrid>,
    ) -> ScenarioResult {
        let heat_capacity_a = self.heat_capacity_a.unwrap_or(parameters.heat_capacity);

        match &self.partner {
            Some(partner) => {
                let heat_capacity_b = partner.heat_capacity.unwrap_or(parameters.heat_capacity);
                RadiativeExchange::from_parameters(parameters.clone()).simulate_paired(
                    self.initial_temperature_a,
                    partner.initial_temperature,
                    time_grid,
                    heat_capacity_a,
                    heat_capacity_b,
                )
            }
            None => {
                // Isolated runs take A's heat capacity from the parameters
                let parameters = SimulationParameters {
                    heat_capacity: heat_capacity_a,
                    ..parameters.clone()
                };
                RadiativeExchange::from_parameters(parameters)
                    .simulate_isolated(self.initial_temperature_a, time_grid)
            }
        }
    }
}

/// The three reference scenarios, in reporting order.
pub fn reference_scenarios() -> Vec<ScenarioDefinition> {
    vec![
        ScenarioDefinition::paired("B is cold", 10000.0, 2000.0),
        ScenarioDefinition::paired("B is hot", 10000.0, 9999.0),
        ScenarioDefinition::isolated("No Object B", 10000.0),
    ]
}

/// One labelled temperature series, ready for plotting or export.
#[derive(Debug, Clone, Copy)]
pub struct Series<'a> {
    pub label: &'a str,
    pub times: &'a [Time],
    pub values: &'a [FloatValue],
}

/// A finished scenario run together with its series labels.
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub name: String,
    pub result: ScenarioResult,
    label_a: String,
    label_b: String,
}

impl ScenarioOutcome {
    pub fn new(name: impl Into<String>, result: ScenarioResult) -> Self {
        let name = name.into();
        Self {
            label_a: format!("T(A) - {}", name),
            label_b: format!("T(B) - {}", name),
            name,
            result,
        }
    }

    /// Series of A, followed by B for paired runs.
    pub fn series(&self) -> Vec<Series<'_>> {
        let times = self.result.times();
        let mut series = vec![Series {
            label: &self.label_a,
            times,
            values: self.result.a.values(),
        }];
        if let Some(b) = &self.result.b {
            series.push(Series {
                label: &self.label_b,
                times,
                values: b.values(),
            });
        }
        series
    }
}

/// All series of all outcomes, in outcome order.
pub fn collect_series(outcomes: &[ScenarioOutcome]) -> Vec<Series<'_>> {
    outcomes.iter().flat_map(|outcome| outcome.series()).collect()
}

/// Build the time grid once and run every scenario on it.
pub fn run_scenarios(
    parameters: &SimulationParameters,
    grid: &TimeGridParameters,
    scenarios: &[ScenarioDefinition],
) -> RadexResult<Vec<ScenarioOutcome>> {
    let time_grid = Arc::new(TimeGrid::from_parameters(grid)?);
    info!(
        "running {} scenarios on {} time points (dt = {} s)",
        scenarios.len(),
        time_grid.len(),
        time_grid.step()
    );

    let outcomes: Vec<ScenarioOutcome> = scenarios
        .par_iter()
        .map(|definition| {
            debug!("scenario {} started", definition.name);
            ScenarioOutcome::new(
                definition.name.clone(),
                definition.run(parameters, &time_grid),
            )
        })
        .collect();

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use radex_core::{simulate_isolated, simulate_paired};

    fn short_grid() -> TimeGridParameters {
        TimeGridParameters {
            duration: 0.01,
            step: 0.0001,
        }
    }

    #[test]
    fn test_reference_scenarios_order() {
        let names: Vec<String> = reference_scenarios().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["B is cold", "B is hot", "No Object B"]);
    }

    #[test]
    fn test_outcomes_keep_definition_order() {
        let outcomes = run_scenarios(
            &SimulationParameters::default(),
            &short_grid(),
            &reference_scenarios(),
        )
        .unwrap();

        let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["B is cold", "B is hot", "No Object B"]);
        assert!(outcomes[0].result.is_paired());
        assert!(outcomes[1].result.is_paired());
        assert!(!outcomes[2].result.is_paired());
    }

    #[test]
    fn test_reference_runs_match_direct_calls() {
        let parameters = SimulationParameters::default();
        let outcomes =
            run_scenarios(&parameters, &short_grid(), &reference_scenarios()).unwrap();
        let time_grid = Arc::clone(&outcomes[0].result.time_grid);

        let cold = simulate_paired(10000.0, 2000.0, &time_grid, 100.0, 100.0);
        let hot = simulate_paired(10000.0, 9999.0, &time_grid, 100.0, 100.0);
        let alone = simulate_isolated(10000.0, &time_grid);

        assert_eq!(outcomes[0].result.a, cold.a);
        assert_eq!(outcomes[0].result.b, cold.b);
        assert_eq!(outcomes[1].result.a, hot.a);
        assert_eq!(outcomes[1].result.b, hot.b);
        assert_eq!(outcomes[2].result.a, alone.a);
    }

    #[test]
    fn test_all_outcomes_share_one_grid() {
        let outcomes = run_scenarios(
            &SimulationParameters::default(),
            &short_grid(),
            &reference_scenarios(),
        )
        .unwrap();

        assert!(Arc::ptr_eq(
            &outcomes[0].result.time_grid,
            &outcomes[2].result.time_grid
        ));
    }

    #[test]
    fn test_series_labels() {
        let outcomes = run_scenarios(
            &SimulationParameters::default(),
            &short_grid(),
            &reference_scenarios(),
        )
        .unwrap();

        let labels: Vec<&str> = collect_series(&outcomes).iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            [
                "T(A) - B is cold",
                "T(B) - B is cold",
                "T(A) - B is hot",
                "T(B) - B is hot",
                "T(A) - No Object B",
            ]
        );
    }

    #[test]
    fn test_isolated_heat_capacity_override() {
        let parameters = SimulationParameters::default();
        let time_grid = Arc::new(TimeGrid::from_parameters(&short_grid()).unwrap());

        let light = ScenarioDefinition::isolated("light", 5000.0).run(&parameters, &time_grid);
        let heavy = ScenarioDefinition {
            heat_capacity_a: Some(1000.0),
            ..ScenarioDefinition::isolated("heavy", 5000.0)
        }
        .run(&parameters, &time_grid);

        assert!(heavy.a[1] > light.a[1]);
    }

    #[test]
    fn test_optional_fields_are_omitted_when_serialised() {
        let json = serde_json::to_value(ScenarioDefinition::isolated("alone", 500.0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "alone", "initial_temperature_a": 500.0})
        );

        let paired: ScenarioDefinition = serde_json::from_str(
            r#"{"name": "pair", "initial_temperature_a": 500.0,
                "partner": {"initial_temperature": 20.0, "heat_capacity": 50.0}}"#,
        )
        .unwrap();
        let partner = paired.partner.unwrap();
        assert_eq!(partner.initial_temperature, 20.0);
        assert_eq!(partner.heat_capacity, Some(50.0));
        assert_eq!(paired.heat_capacity_a, None);
    }

    #[test]
    fn test_invalid_grid_is_reported() {
        let result = run_scenarios(
            &SimulationParameters::default(),
            &TimeGridParameters {
                duration: 0.2,
                step: 0.0,
            },
            &reference_scenarios(),
        );
        assert!(result.is_err());
    }
}
