//! Fluent builder for constructing a [`Lattice`] in one step.
//!
//! # Usage
//!
//! ```rust
//! use lbm_core::{CellKind, Geometry};
//! use lbm_lattice::LatticeBuilder;
//!
//! let lattice = LatticeBuilder::new(24, 16)
//!     .viscosity(0.05)
//!     .inlet_velocity(0.08)
//!     .geometry(Geometry::Cylinder)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(lattice.kind_at(8, 8), Some(CellKind::Obstacle));
//! ```

use lbm_core::{Geometry, LatticeConfig, LbmResult};

use crate::Lattice;

/// Fluent builder for [`Lattice`].
///
/// | Method                  | Default           |
/// |-------------------------|-------------------|
/// | `.viscosity(v)`         | `0.1`             |
/// | `.inlet_velocity(u)`    | `0.1`             |
/// | `.geometry(g)`          | `Geometry::Open`  |
pub struct LatticeBuilder {
    config:   LatticeConfig,
    geometry: Geometry,
}

impl LatticeBuilder {
    /// Create a builder for a `width x height` grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_config(LatticeConfig::new(width, height))
    }

    /// Start from an existing config (e.g. deserialized from a file).
    pub fn from_config(config: LatticeConfig) -> Self {
        Self {
            config,
            geometry: Geometry::Open,
        }
    }

    pub fn viscosity(mut self, viscosity: f64) -> Self {
        self.config.viscosity = viscosity;
        self
    }

    pub fn inlet_velocity(mut self, inlet_velocity: f64) -> Self {
        self.config.inlet_velocity = inlet_velocity;
        self
    }

    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Validate the config, allocate the grid, apply the geometry preset and
    /// seed equilibrium.
    pub fn build(self) -> LbmResult<Lattice> {
        let mut lattice = Lattice::new(self.config)?;
        if self.geometry != Geometry::Open {
            lattice.apply_geometry(self.geometry);
        }
        Ok(lattice)
    }
}
