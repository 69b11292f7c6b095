//! Radiative heat exchange between idealised black-body cylinders.
//!
//! Two operating modes are provided by [`exchange::RadiativeExchange`]:
//!
//! - *paired*: two bodies radiating at each other and at the environment
//! - *isolated*: a single body radiating only at the environment
//!
//! Both advance the Stefan–Boltzmann energy balance with a fixed-step explicit
//! Euler scheme over a shared [`timeseries::TimeGrid`].
//! A fourth-order Runge–Kutta solution of the same equations is available in
//! [`ivp`] for measuring the discretisation error of the Euler scheme.

pub mod errors;
pub mod exchange;
pub mod ivp;
pub mod parameters;
pub mod timeseries;

pub use exchange::{simulate_isolated, simulate_paired, RadiativeExchange, ScenarioResult};
