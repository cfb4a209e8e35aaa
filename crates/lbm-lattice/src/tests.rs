//! Unit tests for lbm-lattice.

#[cfg(test)]
mod construction {
    use lbm_core::d2q9::{Q, WEIGHTS};
    use lbm_core::{CellKind, DVec2, LatticeConfig, LbmError};

    use crate::Lattice;

    #[test]
    fn allocates_flat_grid() {
        let lattice = Lattice::with_defaults(7, 5).unwrap();
        assert_eq!(lattice.width(), 7);
        assert_eq!(lattice.height(), 5);
        assert_eq!(lattice.len(), 35);
        assert_eq!(lattice.f().len(), 35);
        assert_eq!(lattice.f_next().len(), 35);
        assert!(lattice.kinds().iter().all(|&k| k == CellKind::Fluid));
    }

    #[test]
    fn derives_tau_from_viscosity() {
        let cfg = LatticeConfig { viscosity: 0.02, ..LatticeConfig::new(4, 4) };
        let lattice = Lattice::new(cfg).unwrap();
        assert!((lattice.tau() - 0.56).abs() < 1e-12);
        assert_eq!(lattice.viscosity(), 0.02);
    }

    #[test]
    fn rejects_unstable_viscosity() {
        let cfg = LatticeConfig { viscosity: 0.0, ..LatticeConfig::new(4, 4) };
        assert!(matches!(Lattice::new(cfg), Err(LbmError::InvalidViscosity(_))));
    }

    #[test]
    fn rejects_overflowing_grid() {
        assert!(matches!(
            Lattice::with_defaults(usize::MAX, 2),
            Err(LbmError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn rejects_empty_grid() {
        assert!(matches!(
            Lattice::with_defaults(3, 0),
            Err(LbmError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn seeded_at_rest_equilibrium() {
        let lattice = Lattice::with_defaults(4, 3).unwrap();
        let p = lattice.point(2, 1).unwrap();
        assert_eq!(p.density, 1.0);
        assert_eq!(p.velocity, DVec2::ZERO);
        for i in 0..Q {
            assert_eq!(p.f[i], WEIGHTS[i]);
            assert_eq!(p.f_next[i], WEIGHTS[i]);
        }
    }

    #[test]
    fn equilibrium_method_matches_formula() {
        let lattice = Lattice::with_defaults(2, 2).unwrap();
        let u = DVec2::new(0.05, -0.02);
        let sum: f64 = (0..Q).map(|i| lattice.equilibrium(i, 1.3, u)).sum();
        assert!((sum - 1.3).abs() < 1e-12);
    }
}

#[cfg(test)]
mod indexing {
    use crate::Lattice;

    #[test]
    fn row_major_index() {
        let lattice = Lattice::with_defaults(5, 4).unwrap();
        assert_eq!(lattice.index(0, 0), Some(0));
        assert_eq!(lattice.index(4, 0), Some(4));
        assert_eq!(lattice.index(0, 1), Some(5));
        assert_eq!(lattice.index(3, 2), Some(13));
        assert_eq!(lattice.coords(13), (3, 2));
    }

    #[test]
    fn out_of_range_index_is_none() {
        let lattice = Lattice::with_defaults(5, 4).unwrap();
        assert_eq!(lattice.index(5, 0), None);
        assert_eq!(lattice.index(0, 4), None);
        assert!(lattice.point(9, 9).is_none());
    }

    #[test]
    fn offset_does_not_wrap() {
        let lattice = Lattice::with_defaults(5, 4).unwrap();
        assert_eq!(lattice.offset_index(0, 0, -1, 0), None);
        assert_eq!(lattice.offset_index(4, 3, 1, 1), None);
        assert_eq!(lattice.offset_index(1, 1, -1, -1), Some(0));
        assert_eq!(lattice.offset_index(1, 1, 1, 1), lattice.index(2, 2));
    }

    #[test]
    fn extent_agrees_with_lattice() {
        let lattice = Lattice::with_defaults(5, 4).unwrap();
        let extent = lattice.extent();
        assert_eq!((extent.width, extent.height), (5, 4));
        for idx in 0..lattice.len() {
            let (x, y) = extent.coords(idx);
            assert_eq!(lattice.coords(idx), (x, y));
            assert_eq!(lattice.index(x, y), Some(idx));
        }
        assert_eq!(extent.neighbour(0, -1, 0), None);
        assert_eq!(extent.neighbour(4, 1, 0), None, "east edge must not wrap to the next row");
        assert_eq!(extent.neighbour(6, 1, 1), lattice.index(2, 2));
    }

    #[test]
    fn edge_detection() {
        let lattice = Lattice::with_defaults(5, 4).unwrap();
        assert!(lattice.is_edge(0, 2));
        assert!(lattice.is_edge(4, 2));
        assert!(lattice.is_edge(2, 3));
        assert!(!lattice.is_edge(2, 2));
    }
}

#[cfg(test)]
mod setters {
    use lbm_core::{CellKind, LbmError};

    use crate::Lattice;

    #[test]
    fn flag_setters_assign_single_kind() {
        let mut lattice = Lattice::with_defaults(4, 4).unwrap();
        assert!(lattice.set_inlet(1, 1, true));
        assert_eq!(lattice.kind_at(1, 1), Some(CellKind::Inlet));
        // A later tag replaces the earlier one; kinds never overlap.
        assert!(lattice.set_obstacle(1, 1, true));
        assert_eq!(lattice.kind_at(1, 1), Some(CellKind::Obstacle));
    }

    #[test]
    fn clearing_only_affects_matching_kind() {
        let mut lattice = Lattice::with_defaults(4, 4).unwrap();
        lattice.set_outlet(2, 2, true);
        assert!(!lattice.set_inlet(2, 2, false));
        assert_eq!(lattice.kind_at(2, 2), Some(CellKind::Outlet));
        assert!(lattice.set_outlet(2, 2, false));
        assert_eq!(lattice.kind_at(2, 2), Some(CellKind::Fluid));
    }

    #[test]
    fn out_of_range_is_silent_noop() {
        let mut lattice = Lattice::with_defaults(4, 4).unwrap();
        let before = lattice.kinds().to_vec();
        assert!(!lattice.set_obstacle(4, 0, true));
        assert!(!lattice.set_inlet(0, 100, true));
        assert!(!lattice.set_outlet(usize::MAX, 1, true));
        assert!(!lattice.set_moving_wall(9, 9, true));
        assert_eq!(lattice.kinds(), before.as_slice());
    }

    #[test]
    fn strict_setter_reports_out_of_bounds() {
        let mut lattice = Lattice::with_defaults(4, 3).unwrap();
        assert_eq!(
            lattice.set_cell_kind(4, 1, CellKind::Obstacle),
            Err(LbmError::OutOfBounds { x: 4, y: 1, width: 4, height: 3 })
        );
        assert!(lattice.set_cell_kind(3, 2, CellKind::MovingWall).is_ok());
        assert_eq!(lattice.kind_at(3, 2), Some(CellKind::MovingWall));
    }
}

#[cfg(test)]
mod presets {
    use lbm_core::{CellKind, DVec2, Geometry};

    use crate::{Lattice, LatticeBuilder};

    #[test]
    fn channel_flow_10x10() {
        let mut lattice = Lattice::with_defaults(10, 10).unwrap();
        lattice.setup_channel_flow();
        for x in 0..10 {
            assert_eq!(lattice.kind_at(x, 0), Some(CellKind::Obstacle));
            assert_eq!(lattice.kind_at(x, 9), Some(CellKind::Obstacle));
        }
        for y in 1..=8 {
            assert_eq!(lattice.kind_at(0, y), Some(CellKind::Inlet), "y={y}");
            assert_eq!(lattice.kind_at(9, y), Some(CellKind::Outlet), "y={y}");
            for x in 1..=8 {
                assert_eq!(lattice.kind_at(x, y), Some(CellKind::Fluid));
            }
        }
        for (x, y) in [(0, 0), (9, 0), (0, 9), (9, 9)] {
            assert_eq!(lattice.kind_at(x, y), Some(CellKind::Obstacle));
        }
    }

    #[test]
    fn channel_seeds_inlet_velocity() {
        let lattice = LatticeBuilder::new(10, 10)
            .inlet_velocity(0.05)
            .geometry(Geometry::Channel)
            .build()
            .unwrap();
        assert_eq!(lattice.point(0, 4).unwrap().velocity, DVec2::new(0.05, 0.0));
        assert_eq!(lattice.point(5, 4).unwrap().velocity, DVec2::ZERO);
    }

    #[test]
    fn preset_overwrites_previous_tags() {
        let mut lattice = Lattice::with_defaults(10, 10).unwrap();
        lattice.set_outlet(5, 5, true);
        lattice.setup_channel_flow();
        assert_eq!(lattice.kind_at(5, 5), Some(CellKind::Fluid));
    }

    #[test]
    fn cylinder_flow_24x16() {
        let mut lattice = Lattice::with_defaults(24, 16).unwrap();
        lattice.setup_cylinder_flow();
        for y in 0..16usize {
            for x in 0..24usize {
                let dx = x as f64 - 8.0;
                let dy = y as f64 - 8.0;
                if (dx * dx + dy * dy).sqrt() <= 2.0 {
                    assert_eq!(lattice.kind_at(x, y), Some(CellKind::Obstacle), "({x}, {y})");
                }
            }
        }
        assert_eq!(lattice.kind_at(8, 8), Some(CellKind::Obstacle));
        assert_eq!(lattice.kind_at(8, 11), Some(CellKind::Fluid));
        assert_eq!(lattice.kind_at(0, 8), Some(CellKind::Inlet));
        assert_eq!(lattice.kind_at(23, 8), Some(CellKind::Outlet));
    }

    #[test]
    fn cylinder_overrides_inlet_and_outlet_tags() {
        // A narrow, tall grid puts the circle (centre (1, 12), radius 3) over
        // both the inlet and the outlet column.
        let mut lattice = Lattice::with_defaults(3, 24).unwrap();
        lattice.setup_cylinder_flow();
        assert_eq!(lattice.kind_at(0, 12), Some(CellKind::Obstacle));
        assert_eq!(lattice.kind_at(2, 12), Some(CellKind::Obstacle));
        assert_eq!(lattice.kind_at(0, 2), Some(CellKind::Inlet));
    }

    #[test]
    fn cavity_flow_encloses_box() {
        let mut lattice = Lattice::with_defaults(10, 10).unwrap();
        lattice.setup_cavity_flow();
        for x in 1..=8 {
            assert_eq!(lattice.kind_at(x, 0), Some(CellKind::MovingWall));
            assert_eq!(lattice.kind_at(x, 9), Some(CellKind::Obstacle));
        }
        for y in 0..10 {
            assert_eq!(lattice.kind_at(0, y), Some(CellKind::Obstacle));
            assert_eq!(lattice.kind_at(9, y), Some(CellKind::Obstacle));
        }
        assert!(lattice.kinds().iter().all(|k| !k.is_open_boundary()));
        let solid = lattice.kinds().iter().filter(|k| k.is_solid()).count();
        assert_eq!(solid, 36);
    }

    #[test]
    fn tiny_grids_do_not_panic() {
        for (w, h) in [(1, 1), (2, 1), (1, 3), (2, 2)] {
            let mut lattice = Lattice::with_defaults(w, h).unwrap();
            lattice.setup_channel_flow();
            lattice.setup_cylinder_flow();
            lattice.setup_cavity_flow();
            assert!(lattice.kinds().iter().all(|k| k.is_solid()), "{w}x{h}");
        }
    }

    #[test]
    fn builder_matches_manual_setup() {
        let built = LatticeBuilder::new(12, 8).geometry(Geometry::Cavity).build().unwrap();
        let mut manual = Lattice::with_defaults(12, 8).unwrap();
        manual.setup_cavity_flow();
        assert_eq!(built.kinds(), manual.kinds());
        assert_eq!(built.density(), manual.density());
    }
}
