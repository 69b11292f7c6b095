use crate::errors::{RadexError, RadexResult};
use crate::parameters::TimeGridParameters;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::ops::Index;

pub type Time = f64;
pub type FloatValue = f64;

/// Evenly spaced sample times shared by every simulation run.
///
/// The grid follows the half-open `[0, duration)` convention: the first sample is
/// at zero and the last sample is the final multiple of `step` strictly below
/// `duration`. The integrators derive their time step from [`TimeGrid::step`]
/// rather than from per-sample differences so that every step uses the same `dt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    values: Array1<Time>,
    step: Time,
}

impl TimeGrid {
    /// Build the grid `0, step, 2*step, ...` up to (excluding) `duration`.
    pub fn new(duration: Time, step: Time) -> RadexResult<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(RadexError::InvalidTimeGrid(format!(
                "step must be finite and positive, got {}",
                step
            )));
        }
        if !duration.is_finite() || duration < 0.0 {
            return Err(RadexError::InvalidTimeGrid(format!(
                "duration must be finite and non-negative, got {}",
                duration
            )));
        }

        Ok(Self {
            values: Array1::range(0.0, duration, step),
            step,
        })
    }

    pub fn from_parameters(parameters: &TimeGridParameters) -> RadexResult<Self> {
        Self::new(parameters.duration, parameters.step)
    }

    /// Wrap explicit sample times.
    ///
    /// The values are assumed to be evenly spaced; the step is taken from the
    /// first two samples and is zero for grids with fewer than two samples.
    pub fn from_values(values: Array1<Time>) -> Self {
        let step = if values.len() >= 2 {
            values[1] - values[0]
        } else {
            0.0
        };
        Self { values, step }
    }

    pub fn values(&self) -> &Array1<Time> {
        &self.values
    }

    pub fn step(&self) -> Time {
        self.step
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first(&self) -> Option<Time> {
        self.values.first().copied()
    }

    pub fn last(&self) -> Option<Time> {
        self.values.last().copied()
    }

    /// Number of integration steps the grid implies.
    pub fn n_steps(&self) -> usize {
        self.len().saturating_sub(1)
    }
}

/// Temperature samples of a single body, one per time grid point.
///
/// A trajectory always holds at least its initial sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    values: Vec<FloatValue>,
}

impl Trajectory {
    pub(crate) fn with_capacity(initial: FloatValue, capacity: usize) -> Self {
        let mut values = Vec::with_capacity(capacity.max(1));
        values.push(initial);
        Self { values }
    }

    /// Wrap already computed samples. `values` must hold at least one sample.
    pub(crate) fn from_values(values: Vec<FloatValue>) -> Self {
        debug_assert!(!values.is_empty());
        Self { values }
    }

    pub(crate) fn push(&mut self, value: FloatValue) {
        self.values.push(value);
    }

    pub fn values(&self) -> &[FloatValue] {
        &self.values
    }

    pub fn to_array(&self) -> Array1<FloatValue> {
        Array1::from_vec(self.values.clone())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn initial(&self) -> FloatValue {
        self.values[0]
    }

    pub fn last(&self) -> FloatValue {
        self.values[self.values.len() - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = &FloatValue> {
        self.values.iter()
    }

    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    pub fn is_monotonic_non_increasing(&self) -> bool {
        self.values.windows(2).all(|w| w[1] <= w[0])
    }

    /// Largest absolute difference between samples at matching positions.
    ///
    /// Only the overlapping prefix of the two trajectories is compared.
    pub fn max_abs_deviation(&self, other: &Trajectory) -> FloatValue {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, FloatValue::max)
    }
}

impl Index<usize> for Trajectory {
    type Output = FloatValue;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}
