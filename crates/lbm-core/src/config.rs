//! Lattice configuration.
//!
//! # Relaxation time
//!
//! In lattice units the BGK relaxation time follows from the kinematic
//! viscosity as
//!
//!   tau = 3 * viscosity + 0.5
//!
//! The scheme is only stable for `tau > 0.5`, so a non-positive viscosity is
//! rejected by [`LatticeConfig::validate`] instead of producing a lattice
//! that blows up a few steps in.

use crate::{LbmError, LbmResult};

/// Default kinematic viscosity in lattice units.
pub const DEFAULT_VISCOSITY: f64 = 0.1;

/// Default inlet speed in lattice units.
pub const DEFAULT_INLET_VELOCITY: f64 = 0.1;

/// `tau` for a given kinematic viscosity.
#[inline]
pub fn tau_for_viscosity(viscosity: f64) -> f64 {
    3.0 * viscosity + 0.5
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Boundary layout presets.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Geometry {
    /// Every cell is fluid; the grid edge acts as a stationary wall.
    #[default]
    Open,
    /// Walls top and bottom, inlet on the left, outlet on the right.
    Channel,
    /// Channel with a circular obstacle a third of the way along.
    Cylinder,
    /// Closed box whose top row slides at the lid velocity.
    Cavity,
}

// ── LatticeConfig ─────────────────────────────────────────────────────────────

/// Parameters fixed for the lifetime of a lattice.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeConfig {
    /// Number of columns.  Must be > 0.
    pub width: usize,

    /// Number of rows.  Must be > 0.
    pub height: usize,

    /// Kinematic viscosity in lattice units.  Must be finite and > 0.
    pub viscosity: f64,

    /// Speed imposed along +x at inlet cells.
    pub inlet_velocity: f64,
}

impl LatticeConfig {
    /// A `width x height` config with default viscosity and inlet speed.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            viscosity:      DEFAULT_VISCOSITY,
            inlet_velocity: DEFAULT_INLET_VELOCITY,
        }
    }

    /// Total number of cells.  Only meaningful for a config that passed
    /// [`validate`](Self::validate), which rejects sizes that overflow.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Check every parameter and return the derived relaxation time.
    pub fn validate(&self) -> LbmResult<f64> {
        if self.width == 0 || self.height == 0 || self.width.checked_mul(self.height).is_none() {
            return Err(LbmError::InvalidDimensions {
                width:  self.width,
                height: self.height,
            });
        }
        if !self.viscosity.is_finite() || self.viscosity <= 0.0 {
            return Err(LbmError::InvalidViscosity(self.viscosity));
        }
        let tau = tau_for_viscosity(self.viscosity);
        // A viscosity below f64 resolution still rounds tau down to 0.5.
        if tau <= 0.5 {
            return Err(LbmError::InvalidViscosity(self.viscosity));
        }
        if !self.inlet_velocity.is_finite() {
            return Err(LbmError::InvalidVelocity(self.inlet_velocity));
        }
        Ok(tau)
    }
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self::new(64, 64)
    }
}
