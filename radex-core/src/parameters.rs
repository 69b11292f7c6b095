//! Simulation Parameters
//!
//! Physical and numerical constants shared by every simulation run.
//!
//! Both parameter structs use `#[serde(default)]` so a configuration file only
//! needs to name the values it overrides.

use crate::timeseries::{FloatValue, Time};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Stefan–Boltzmann constant ($\text{W m}^{-2}\text{ K}^{-4}$).
pub const STEFAN_BOLTZMANN: FloatValue = 5.670373e-8;

/// Geometry and thermal properties of the radiating bodies.
///
/// Each body is a cylinder whose end caps are ignored, so only the lateral
/// surface radiates. Both bodies share the same geometry and mass; their
/// specific heat capacities may differ per run.
///
/// # Geometric precondition
///
/// The coupling between the two bodies uses a far-field approximation that is
/// only meaningful when `separation` is much larger than `radius`.
/// This is not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    /// Cylinder radius (m).
    /// Default: 1.0
    pub radius: FloatValue,

    /// Cylinder height (m).
    /// Default: 1.0
    pub height: FloatValue,

    /// Distance between the two cylinder axes (m).
    /// Default: 10.0
    pub separation: FloatValue,

    /// Mass of each body (kg).
    /// Default: 1.0
    pub mass: FloatValue,

    /// Specific heat capacity used when a run does not supply its own (J/(kg K)).
    /// Default: 100.0
    pub heat_capacity: FloatValue,

    /// Temperature of the surroundings (K).
    /// Default: 300.0
    pub ambient_temperature: FloatValue,

    /// Stefan–Boltzmann constant ($\text{W m}^{-2}\text{ K}^{-4}$).
    /// Default: 5.670373e-8
    pub stefan_boltzmann: FloatValue,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            radius: 1.0,
            height: 1.0,
            separation: 10.0,
            mass: 1.0,
            heat_capacity: 100.0,
            ambient_temperature: 300.0,
            stefan_boltzmann: STEFAN_BOLTZMANN,
        }
    }
}

impl SimulationParameters {
    /// Lateral surface area of one cylinder (m^2).
    ///
    /// $$A = 2 \pi r h$$
    pub fn area(&self) -> FloatValue {
        2.0 * PI * self.radius * self.height
    }

    /// Fraction of one body's radiated power intercepted by the other.
    ///
    /// The emitted power is spread over the lateral surface of a cylinder of
    /// radius `d` and height `h`; the receiver intercepts it with its projected
    /// rectangle `2 r h`:
    ///
    /// $$f = \frac{2 r h}{2 \pi d h}$$
    pub fn coupling_fraction(&self) -> FloatValue {
        (2.0 * self.radius * self.height) / (2.0 * PI * self.separation * self.height)
    }

    /// Same fraction as [`Self::coupling_fraction`] after cancelling `2h`.
    ///
    /// $$f = \frac{r}{\pi d}$$
    pub fn coupling_fraction_reduced(&self) -> FloatValue {
        self.radius / (PI * self.separation)
    }

    /// Fixed point of the isolated energy balance (K).
    pub fn equilibrium_temperature_isolated(&self) -> FloatValue {
        self.ambient_temperature
    }

    /// Fixed point of the paired energy balance when both bodies share one temperature (K).
    ///
    /// $$T^4 (1 - f) = T_e^4 \Rightarrow T = T_e (1 - f)^{-1/4}$$
    pub fn equilibrium_temperature_paired(&self) -> FloatValue {
        self.ambient_temperature / (1.0 - self.coupling_fraction_reduced()).powf(0.25)
    }
}

/// Extent and resolution of the shared time grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeGridParameters {
    /// Simulated duration (s). The grid stops strictly before this time.
    /// Default: 0.2
    pub duration: Time,

    /// Fixed integration step (s).
    /// Default: 0.0001
    pub step: Time,
}

impl Default for TimeGridParameters {
    fn default() -> Self {
        Self {
            duration: 0.2,
            step: 0.0001,
        }
    }
}
