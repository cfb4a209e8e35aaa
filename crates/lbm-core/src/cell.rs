//! Per-cell boundary classification.

use std::fmt;

/// What a lattice cell is, for the purposes of the step loop.
///
/// Exactly one kind per cell.  `Obstacle` and `MovingWall` are *solid*:
/// they skip collision, are excluded from domain diagnostics, and reflect
/// incoming populations back into neighbouring fluid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    /// Interior fluid, evolved by collision and streaming only.
    #[default]
    Fluid,
    /// Stationary no-slip wall (bounce-back).
    Obstacle,
    /// Velocity inlet: velocity imposed at `(inlet_velocity, 0)`.
    Inlet,
    /// Pressure outlet: density pinned to the reference density.
    Outlet,
    /// Wall sliding tangentially at the simulator's lid velocity.
    MovingWall,
}

impl CellKind {
    /// `true` for `Obstacle` and `MovingWall`.
    #[inline]
    pub fn is_solid(self) -> bool {
        matches!(self, CellKind::Obstacle | CellKind::MovingWall)
    }

    /// `true` for `Inlet` and `Outlet`, whose distributions are rebuilt from
    /// equilibrium every step.
    #[inline]
    pub fn is_open_boundary(self) -> bool {
        matches!(self, CellKind::Inlet | CellKind::Outlet)
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellKind::Fluid      => "fluid",
            CellKind::Obstacle   => "obstacle",
            CellKind::Inlet      => "inlet",
            CellKind::Outlet     => "outlet",
            CellKind::MovingWall => "moving-wall",
        };
        f.write_str(name)
    }
}
