//! Unit tests for lbm-core primitives.

#[cfg(test)]
mod d2q9 {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::DVec2;
    use crate::d2q9::{
        OPPOSITE, Q, REFERENCE_DENSITY, VELOCITIES, WEIGHTS, equilibrium, equilibrium_set,
        moments, opposite, velocity,
    };

    #[test]
    fn weights_sum_to_one() {
        let sum: f64 = WEIGHTS.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12, "got {sum}");
    }

    #[test]
    fn velocity_table_matches_stencil() {
        assert_eq!(VELOCITIES[0], [0, 0]);
        assert_eq!(VELOCITIES[1], [1, 0]);
        assert_eq!(VELOCITIES[2], [0, 1]);
        assert_eq!(VELOCITIES[3], [-1, 0]);
        assert_eq!(VELOCITIES[4], [0, -1]);
        assert_eq!(VELOCITIES[5], [1, 1]);
        assert_eq!(VELOCITIES[6], [-1, 1]);
        assert_eq!(VELOCITIES[7], [-1, -1]);
        assert_eq!(VELOCITIES[8], [1, -1]);
    }

    #[test]
    fn opposite_pairs() {
        assert_eq!(OPPOSITE, [0, 3, 4, 1, 2, 7, 8, 5, 6]);
        for i in 0..Q {
            assert_eq!(opposite(opposite(i)), i);
            assert_eq!(velocity(opposite(i)), -velocity(i), "direction {i}");
        }
    }

    #[test]
    fn equilibrium_at_rest_is_weight() {
        for i in 0..Q {
            assert_eq!(equilibrium(i, REFERENCE_DENSITY, DVec2::ZERO), WEIGHTS[i]);
        }
    }

    #[test]
    fn equilibrium_conserves_mass() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let d = rng.gen_range(0.1..3.0);
            let u = DVec2::new(rng.gen_range(-0.3..0.3), rng.gen_range(-0.3..0.3));
            let sum: f64 = (0..Q).map(|i| equilibrium(i, d, u)).sum();
            assert!((sum - d).abs() < 1e-9, "d={d} u={u}: sum={sum}");
        }
    }

    #[test]
    fn equilibrium_recovers_momentum() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            let d = rng.gen_range(0.5..2.0);
            let u = DVec2::new(rng.gen_range(-0.2..0.2), rng.gen_range(-0.2..0.2));
            let (rho, m) = moments(&equilibrium_set(d, u));
            assert!((rho - d).abs() < 1e-12);
            assert!((m - u * d).length() < 1e-12, "got {m}, want {}", u * d);
        }
    }

    #[test]
    fn equilibrium_uses_exact_coefficients() {
        // Direction 1 with u = (0.1, 0): w1 * (1 + 0.3 + 0.045 - 0.015).
        let got = equilibrium(1, 1.0, DVec2::new(0.1, 0.0));
        let want = (1.0 / 9.0) * (1.0 + 0.3 + 0.045 - 0.015);
        assert!((got - want).abs() < 1e-15, "got {got}, want {want}");
    }
}

#[cfg(test)]
mod cell {
    use crate::CellKind;

    #[test]
    fn default_is_fluid() {
        assert_eq!(CellKind::default(), CellKind::Fluid);
    }

    #[test]
    fn solid_kinds() {
        assert!(CellKind::Obstacle.is_solid());
        assert!(CellKind::MovingWall.is_solid());
        assert!(!CellKind::Fluid.is_solid());
        assert!(!CellKind::Inlet.is_solid());
        assert!(!CellKind::Outlet.is_solid());
    }

    #[test]
    fn open_boundary_kinds() {
        assert!(CellKind::Inlet.is_open_boundary());
        assert!(CellKind::Outlet.is_open_boundary());
        assert!(!CellKind::MovingWall.is_open_boundary());
    }

    #[test]
    fn display() {
        assert_eq!(CellKind::MovingWall.to_string(), "moving-wall");
    }
}

#[cfg(test)]
mod config {
    use crate::config::tau_for_viscosity;
    use crate::{LatticeConfig, LbmError};

    #[test]
    fn tau_from_viscosity() {
        assert!((tau_for_viscosity(0.1) - 0.8).abs() < 1e-15);
        let cfg = LatticeConfig::new(8, 4);
        assert!((cfg.validate().unwrap() - 0.8).abs() < 1e-15);
    }

    #[test]
    fn defaults() {
        let cfg = LatticeConfig::default();
        assert_eq!((cfg.width, cfg.height), (64, 64));
        assert_eq!(cfg.viscosity, 0.1);
        assert_eq!(cfg.inlet_velocity, 0.1);
        assert_eq!(cfg.cell_count(), 4096);
    }

    #[test]
    fn rejects_zero_dimensions() {
        let cfg = LatticeConfig::new(0, 10);
        assert_eq!(
            cfg.validate(),
            Err(LbmError::InvalidDimensions { width: 0, height: 10 })
        );
    }

    #[test]
    fn rejects_overflowing_dimensions() {
        let cfg = LatticeConfig::new(usize::MAX / 2, 3);
        assert_eq!(
            cfg.validate(),
            Err(LbmError::InvalidDimensions { width: usize::MAX / 2, height: 3 })
        );
    }

    #[test]
    fn rejects_non_positive_viscosity() {
        for nu in [0.0, -0.1, f64::NAN, f64::INFINITY, 1e-300] {
            let cfg = LatticeConfig { viscosity: nu, ..LatticeConfig::new(4, 4) };
            assert!(
                matches!(cfg.validate(), Err(LbmError::InvalidViscosity(_))),
                "viscosity {nu} accepted"
            );
        }
    }

    #[test]
    fn rejects_non_finite_inlet_velocity() {
        let cfg = LatticeConfig { inlet_velocity: f64::NAN, ..LatticeConfig::new(4, 4) };
        assert!(matches!(cfg.validate(), Err(LbmError::InvalidVelocity(_))));
    }
}
