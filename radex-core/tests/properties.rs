//! Behavioural properties of the explicit Euler integrator on the reference grid.
//!
//! All runs use the default parameters (`r = 1 m`, `h = 1 m`, `d = 10 m`,
//! `m = 1 kg`, `c = 100 J/(kg K)`, `T_e = 300 K`) and the default grid
//! (0.2 s in steps of 0.1 ms).

use approx::assert_relative_eq;
use ndarray::array;
use radex_core::parameters::{SimulationParameters, TimeGridParameters};
use radex_core::timeseries::TimeGrid;
use radex_core::{simulate_isolated, simulate_paired, RadiativeExchange};
use std::sync::Arc;

fn reference_grid() -> Arc<TimeGrid> {
    Arc::new(TimeGrid::from_parameters(&TimeGridParameters::default()).unwrap())
}

mod shape {
    use super::*;

    #[test]
    fn test_first_sample_is_initial_temperature() {
        let grid = reference_grid();

        for (t_a, t_b) in [(10000.0, 2000.0), (10000.0, 9999.0), (450.5, 12.25)] {
            let paired = simulate_paired(t_a, t_b, &grid, 100.0, 100.0);
            assert_eq!(paired.a[0], t_a);
            assert_eq!(paired.b.as_ref().unwrap()[0], t_b);

            let isolated = simulate_isolated(t_a, &grid);
            assert_eq!(isolated.a[0], t_a);
        }
    }

    #[test]
    fn test_trajectory_length_matches_grid() {
        let grid = reference_grid();

        let paired = simulate_paired(10000.0, 2000.0, &grid, 100.0, 100.0);
        assert_eq!(paired.a.len(), grid.len());
        assert_eq!(paired.b.as_ref().unwrap().len(), grid.len());

        let isolated = simulate_isolated(10000.0, &grid);
        assert_eq!(isolated.a.len(), grid.len());
        assert_eq!(grid.len(), 2000);
    }

    #[test]
    fn test_single_point_grid_returns_initial_state() {
        let grid = Arc::new(TimeGrid::from_values(array![0.0]));

        let paired = simulate_paired(10000.0, 2000.0, &grid, 100.0, 100.0);
        assert_eq!(paired.a.values(), &[10000.0]);
        assert_eq!(paired.b.unwrap().values(), &[2000.0]);

        let isolated = simulate_isolated(10000.0, &grid);
        assert_eq!(isolated.a.values(), &[10000.0]);
    }

    #[test]
    fn test_empty_grid_returns_initial_state() {
        let grid = Arc::new(TimeGrid::new(0.0, 0.0001).unwrap());
        assert!(grid.is_empty());

        let paired = simulate_paired(10000.0, 2000.0, &grid, 100.0, 100.0);
        assert_eq!(paired.a.values(), &[10000.0]);
        assert_eq!(paired.b.unwrap().values(), &[2000.0]);

        let isolated = simulate_isolated(10000.0, &grid);
        assert_eq!(isolated.a.values(), &[10000.0]);
    }
}

mod physics {
    use super::*;

    #[test]
    fn test_isolated_matches_paired_with_partner_at_absolute_zero() {
        // An infinite heat capacity holds B at 0 K, so A never receives anything from it
        let grid = reference_grid();
        let isolated = simulate_isolated(10000.0, &grid);
        let paired = simulate_paired(10000.0, 0.0, &grid, 100.0, f64::INFINITY);

        assert!(paired.b.as_ref().unwrap().iter().all(|t| *t == 0.0));
        assert_eq!(isolated.a.values(), paired.a.values());
    }

    #[test]
    fn test_cold_partner_a_cools_b_warms() {
        let grid = reference_grid();
        let result = simulate_paired(10000.0, 2000.0, &grid, 100.0, 100.0);
        let b = result.b.as_ref().unwrap();

        assert!(result.a[1] < result.a[0]);
        assert!(
            b[1] > b[0],
            "B should absorb more than it radiates at the start"
        );

        // A radiates far more than it can receive from B and never drops below ambient
        assert!(result.a.is_monotonic_non_increasing());
        assert!(result.a.last() > 300.0);
    }

    #[test]
    fn test_near_equal_temperatures_converge() {
        let grid = reference_grid();
        let params = SimulationParameters::default();
        let result = simulate_paired(10000.0, 9999.0, &grid, 100.0, 100.0);
        let b = result.b.as_ref().unwrap();

        let gaps: Vec<f64> = result
            .a
            .iter()
            .zip(b.iter())
            .map(|(t_a, t_b)| (t_a - t_b).abs())
            .collect();

        assert_eq!(gaps[0], 1.0);
        for window in gaps.windows(2) {
            assert!(
                window[1] <= window[0] + 1e-9,
                "gap grew from {} to {}",
                window[0],
                window[1]
            );
        }
        assert!(gaps[gaps.len() - 1] < 1e-3);

        // Both approach the shared equilibrium from above
        let equilibrium = params.equilibrium_temperature_paired();
        assert!(result.a.last() > equilibrium);
        assert!(b.last() > equilibrium);
        assert!(result.a.last() < 2000.0);
        assert!(b.last() < 2000.0);
    }

    #[test]
    fn test_isolated_cools_faster_than_with_cold_partner() {
        let grid = reference_grid();
        let isolated = simulate_isolated(10000.0, &grid);
        let paired = simulate_paired(10000.0, 2000.0, &grid, 100.0, 100.0);

        let drop_isolated = isolated.a[0] - isolated.a[1];
        let drop_paired = paired.a[0] - paired.a[1];
        assert!(drop_isolated > drop_paired);
        assert!(isolated.a[1] < paired.a[1]);
    }

    #[test]
    fn test_hot_partner_slows_cooling_more_than_cold_partner() {
        let grid = reference_grid();
        let cold = simulate_paired(10000.0, 2000.0, &grid, 100.0, 100.0);
        let hot = simulate_paired(10000.0, 9999.0, &grid, 100.0, 100.0);

        assert!(hot.a[1] > cold.a[1]);
    }

    #[test]
    fn test_first_isolated_step_magnitude() {
        // dT = -(A s (T^4 - Te^4)) dt / (m c) ~= -3562.8 K at 10000 K
        let grid = reference_grid();
        let isolated = simulate_isolated(10000.0, &grid);
        assert_relative_eq!(isolated.a[0] - isolated.a[1], 3562.8, epsilon = 0.1);
    }

    #[test]
    fn test_parameters_change_coupling() {
        let grid = reference_grid();
        let far = RadiativeExchange::from_parameters(SimulationParameters {
            separation: 1000.0,
            ..Default::default()
        });
        let near = RadiativeExchange::default();

        let far_result = far.simulate_paired(10000.0, 2000.0, &grid, 100.0, 100.0);
        let near_result = near.simulate_paired(10000.0, 2000.0, &grid, 100.0, 100.0);

        // A distant partner returns less radiation, so B warms less
        assert!(far_result.b.unwrap()[1] < near_result.b.unwrap()[1]);
    }
}
