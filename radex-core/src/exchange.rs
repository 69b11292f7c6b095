//! Radiative Exchange Integrator
//!
//! Advances the temperature of one or two black-body cylinders with a fixed-step
//! explicit Euler scheme.
//!
//! # Physics Overview
//!
//! Each body radiates according to the Stefan–Boltzmann law
//!
//! $$P = A \sigma T^4$$
//!
//! and continuously receives the power it would radiate in equilibrium with the
//! environment, $A \sigma T_e^4$. In paired mode each body additionally receives
//! the fraction $f = r / (\pi d)$ of the other body's radiated power. Over a step
//! of length $\Delta t$ the energy lost by body $i$ is
//!
//! $$E_i = (P_i - f P_j - A \sigma T_e^4) \Delta t$$
//!
//! and its temperature becomes $T_i - E_i / (m c_i)$.
//!
//! # Numerical behaviour
//!
//! There is no stability check and no adaptive step. A step that is large
//! compared to the radiative time constant $m c / (4 A \sigma T^3)$ overshoots,
//! and since $T^4$ is positive for negative $T$ the overshoot is not
//! self-limiting. [`crate::ivp`] provides a higher-order solution for comparison.

use crate::parameters::SimulationParameters;
use crate::timeseries::{FloatValue, Time, TimeGrid, Trajectory};
use log::{debug, warn};
use std::f64::consts::PI;
use std::sync::Arc;

/// Output of a single simulation run.
///
/// `b` is `None` for isolated runs.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub time_grid: Arc<TimeGrid>,
    pub a: Trajectory,
    pub b: Option<Trajectory>,
}

impl ScenarioResult {
    pub fn is_paired(&self) -> bool {
        self.b.is_some()
    }

    pub fn times(&self) -> &[Time] {
        self.time_grid
            .values()
            .as_slice()
            .unwrap_or_default()
    }
}

/// Energy balance of one or two radiating cylinders.
#[derive(Debug, Clone, Default)]
pub struct RadiativeExchange {
    parameters: SimulationParameters,
}

impl RadiativeExchange {
    pub fn from_parameters(parameters: SimulationParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.parameters
    }

    /// Power radiated by a body at `temperature` (W).
    pub fn radiated_power(&self, temperature: FloatValue) -> FloatValue {
        self.parameters.area() * self.parameters.stefan_boltzmann * temperature.powi(4)
    }

    /// Power each body receives from the surroundings (W).
    pub fn environment_power(&self) -> FloatValue {
        self.radiated_power(self.parameters.ambient_temperature)
    }

    /// Power from A that reaches B (W).
    ///
    /// `power_a` is spread over a cylinder of radius `d` and height `h` around A,
    /// and B intercepts it with its projected rectangle `2 r h`.
    pub fn power_received_by_b(&self, power_a: FloatValue) -> FloatValue {
        let p = &self.parameters;
        let flux_at_b = power_a / (2.0 * PI * p.separation * p.height);
        flux_at_b * 2.0 * p.radius * p.height
    }

    /// Power from B that reaches A (W), in the reduced form $A \sigma T_b^4 r / (\pi d)$.
    pub fn power_received_by_a(&self, temperature_b: FloatValue) -> FloatValue {
        let p = &self.parameters;
        (self.radiated_power(temperature_b) * p.radius) / (PI * p.separation)
    }

    /// Net rate of energy loss of a body (W).
    ///
    /// Positive values cool the body.
    pub fn net_power_loss(&self, radiated: FloatValue, received: FloatValue) -> FloatValue {
        radiated - received - self.environment_power()
    }

    /// Integrate two mutually coupled bodies over `time_grid`.
    ///
    /// `heat_capacity_a` and `heat_capacity_b` are the specific heat capacities
    /// of A and B. Each trajectory has one sample per grid point, starting at
    /// the initial temperature. Grids with fewer than two points return the
    /// initial temperatures only.
    pub fn simulate_paired(
        &self,
        temperature_a: FloatValue,
        temperature_b: FloatValue,
        time_grid: &Arc<TimeGrid>,
        heat_capacity_a: FloatValue,
        heat_capacity_b: FloatValue,
    ) -> ScenarioResult {
        let dt = time_grid.step();
        let mass = self.parameters.mass;
        let capacity = time_grid.len();
        debug!(
            "paired run: T_a0={} K, T_b0={} K, {} steps of {} s",
            temperature_a,
            temperature_b,
            time_grid.n_steps(),
            dt
        );

        let mut a = Trajectory::with_capacity(temperature_a, capacity);
        let mut b = Trajectory::with_capacity(temperature_b, capacity);
        let mut t_a = temperature_a;
        let mut t_b = temperature_b;

        for _ in 0..time_grid.n_steps() {
            let power_a = self.radiated_power(t_a);
            let power_b = self.radiated_power(t_b);

            let power_on_b = self.power_received_by_b(power_a);
            let power_on_a = self.power_received_by_a(t_b);

            let energy_loss_a = self.net_power_loss(power_a, power_on_a) * dt;
            let energy_loss_b = self.net_power_loss(power_b, power_on_b) * dt;

            t_a -= energy_loss_a / (mass * heat_capacity_a);
            t_b -= energy_loss_b / (mass * heat_capacity_b);

            a.push(t_a);
            b.push(t_b);
        }

        warn_if_non_finite("A", &a);
        warn_if_non_finite("B", &b);

        ScenarioResult {
            time_grid: Arc::clone(time_grid),
            a,
            b: Some(b),
        }
    }

    /// Integrate a single body that only exchanges radiation with the surroundings.
    ///
    /// Uses the default heat capacity from the parameters.
    pub fn simulate_isolated(
        &self,
        temperature_a: FloatValue,
        time_grid: &Arc<TimeGrid>,
    ) -> ScenarioResult {
        let dt = time_grid.step();
        let thermal_mass = self.parameters.mass * self.parameters.heat_capacity;
        debug!(
            "isolated run: T_a0={} K, {} steps of {} s",
            temperature_a,
            time_grid.n_steps(),
            dt
        );

        let mut a = Trajectory::with_capacity(temperature_a, time_grid.len());
        let mut t_a = temperature_a;

        for _ in 0..time_grid.n_steps() {
            let energy_loss = self.net_power_loss(self.radiated_power(t_a), 0.0) * dt;
            t_a -= energy_loss / thermal_mass;
            a.push(t_a);
        }

        warn_if_non_finite("A", &a);

        ScenarioResult {
            time_grid: Arc::clone(time_grid),
            a,
            b: None,
        }
    }
}

fn warn_if_non_finite(body: &str, trajectory: &Trajectory) {
    if !trajectory.is_finite() {
        warn!(
            "temperature of body {} left the finite range; the time step is too large for this energy scale",
            body
        );
    }
}

/// Paired run with the default [`SimulationParameters`].
pub fn simulate_paired(
    temperature_a: FloatValue,
    temperature_b: FloatValue,
    time_grid: &Arc<TimeGrid>,
    heat_capacity_a: FloatValue,
    heat_capacity_b: FloatValue,
) -> ScenarioResult {
    RadiativeExchange::default().simulate_paired(
        temperature_a,
        temperature_b,
        time_grid,
        heat_capacity_a,
        heat_capacity_b,
    )
}

/// Isolated run with the default [`SimulationParameters`].
pub fn simulate_isolated(temperature_a: FloatValue, time_grid: &Arc<TimeGrid>) -> ScenarioResult {
    RadiativeExchange::default().simulate_isolated(temperature_a, time_grid)
}
