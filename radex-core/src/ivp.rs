//! Fourth-order Runge–Kutta solution of the radiative energy balance.
//!
//! The explicit Euler scheme in [`crate::exchange`] defines the simulator's
//! results. The solutions here integrate the same right-hand side with
//! `ode_solvers::Rk4` on the same grid step and are only used to measure how
//! far the Euler trajectories are from a higher-order solution
//! (see [`Trajectory::max_abs_deviation`]).

use crate::errors::{RadexError, RadexResult};
use crate::exchange::{RadiativeExchange, ScenarioResult};
use crate::timeseries::{FloatValue, Time, TimeGrid, Trajectory};
use ode_solvers::{Rk4, System, Vector1, Vector2};
use std::sync::Arc;

type PairedState = Vector2<FloatValue>;
type IsolatedState = Vector1<FloatValue>;

struct PairedSystem<'a> {
    exchange: &'a RadiativeExchange,
    heat_capacity_a: FloatValue,
    heat_capacity_b: FloatValue,
}

impl System<Time, PairedState> for PairedSystem<'_> {
    fn system(&self, _t: Time, y: &PairedState, dy: &mut PairedState) {
        let mass = self.exchange.parameters().mass;
        let power_a = self.exchange.radiated_power(y[0]);
        let power_b = self.exchange.radiated_power(y[1]);

        let loss_a = self
            .exchange
            .net_power_loss(power_a, self.exchange.power_received_by_a(y[1]));
        let loss_b = self
            .exchange
            .net_power_loss(power_b, self.exchange.power_received_by_b(power_a));

        dy[0] = -loss_a / (mass * self.heat_capacity_a);
        dy[1] = -loss_b / (mass * self.heat_capacity_b);
    }
}

struct IsolatedSystem<'a> {
    exchange: &'a RadiativeExchange,
}

impl System<Time, IsolatedState> for IsolatedSystem<'_> {
    fn system(&self, _t: Time, y: &IsolatedState, dy: &mut IsolatedState) {
        let parameters = self.exchange.parameters();
        let loss = self
            .exchange
            .net_power_loss(self.exchange.radiated_power(y[0]), 0.0);
        dy[0] = -loss / (parameters.mass * parameters.heat_capacity);
    }
}

/// First and last grid times when the grid implies at least one step.
fn grid_span(time_grid: &TimeGrid) -> Option<(Time, Time)> {
    match (time_grid.first(), time_grid.last()) {
        (Some(first), Some(last)) if time_grid.len() >= 2 => Some((first, last)),
        _ => None,
    }
}

/// Keep one solver state per grid point.
///
/// `Rk4` stores its initial state followed by one state per step. The number of
/// steps is derived from the grid's span, which can round up by one, so any
/// state past the grid's length is dropped.
fn states_on_grid<V: Clone>(
    states: &[V],
    time_grid: &TimeGrid,
    t_start: Time,
    t_end: Time,
) -> RadexResult<Vec<V>> {
    let n = time_grid.len();
    if states.len() < n {
        return Err(RadexError::Integration {
            t_start,
            t_end,
            reason: format!(
                "solver produced {} states for a grid of {} points",
                states.len(),
                n
            ),
        });
    }
    Ok(states[..n].to_vec())
}

fn integration_error(t_start: Time, t_end: Time, error: impl std::fmt::Debug) -> RadexError {
    RadexError::Integration {
        t_start,
        t_end,
        reason: format!("{:?}", error),
    }
}

/// RK4 counterpart of [`RadiativeExchange::simulate_paired`].
pub fn reference_paired(
    exchange: &RadiativeExchange,
    temperature_a: FloatValue,
    temperature_b: FloatValue,
    time_grid: &Arc<TimeGrid>,
    heat_capacity_a: FloatValue,
    heat_capacity_b: FloatValue,
) -> RadexResult<ScenarioResult> {
    let system = PairedSystem {
        exchange,
        heat_capacity_a,
        heat_capacity_b,
    };
    let y0 = PairedState::new(temperature_a, temperature_b);
    let Some((t_start, t_end)) = grid_span(time_grid) else {
        return Ok(ScenarioResult {
            time_grid: Arc::clone(time_grid),
            a: Trajectory::from_values(vec![temperature_a]),
            b: Some(Trajectory::from_values(vec![temperature_b])),
        });
    };

    let mut solver = Rk4::new(system, t_start, y0, t_end, time_grid.step());
    solver
        .integrate()
        .map_err(|e| integration_error(t_start, t_end, e))?;
    let (_, states) = solver.results().get();
    let states = states_on_grid(states, time_grid, t_start, t_end)?;

    Ok(ScenarioResult {
        time_grid: Arc::clone(time_grid),
        a: Trajectory::from_values(states.iter().map(|y| y[0]).collect()),
        b: Some(Trajectory::from_values(
            states.iter().map(|y| y[1]).collect(),
        )),
    })
}

/// RK4 counterpart of [`RadiativeExchange::simulate_isolated`].
pub fn reference_isolated(
    exchange: &RadiativeExchange,
    temperature_a: FloatValue,
    time_grid: &Arc<TimeGrid>,
) -> RadexResult<ScenarioResult> {
    let Some((t_start, t_end)) = grid_span(time_grid) else {
        return Ok(ScenarioResult {
            time_grid: Arc::clone(time_grid),
            a: Trajectory::from_values(vec![temperature_a]),
            b: None,
        });
    };

    let mut solver = Rk4::new(
        IsolatedSystem { exchange },
        t_start,
        IsolatedState::new(temperature_a),
        t_end,
        time_grid.step(),
    );
    solver
        .integrate()
        .map_err(|e| integration_error(t_start, t_end, e))?;
    let (_, states) = solver.results().get();
    let states = states_on_grid(states, time_grid, t_start, t_end)?;

    Ok(ScenarioResult {
        time_grid: Arc::clone(time_grid),
        a: Trajectory::from_values(states.iter().map(|y| y[0]).collect()),
        b: None,
    })
}
