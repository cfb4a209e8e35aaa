//! Per-cell boundary correction, run after streaming.
//!
//! | Kind         | Rule                                                     |
//! |--------------|----------------------------------------------------------|
//! | `Obstacle`   | Link-wise bounce-back into every fluid neighbour          |
//! | `MovingWall` | Bounce-back plus the wall-momentum term                   |
//! | `Inlet`      | Equilibrium at `(inlet_velocity, 0)`                      |
//! | `Outlet`     | Equilibrium at the reference density                     |
//! | `Fluid`      | Bounce-back of populations that would enter from off-grid |
//!
//! Neighbour macroscopic state is only read from `Fluid` cells, whose
//! density and velocity are not touched until the moments pass, so every
//! read sees the previous step's values.

use lbm_core::d2q9::{self, CS_SQ, OPPOSITE, Q, REFERENCE_DENSITY, VELOCITIES, WEIGHTS};
use lbm_core::{CellKind, DVec2};
use lbm_lattice::{Extent, LatticeFields};

use crate::Simulator;

impl Simulator<'_> {
    /// Dispatch every cell to the rule for its kind.
    pub fn apply_boundary_conditions(&mut self) {
        let extent = self.lattice().extent();
        let inlet = DVec2::new(self.lattice().inlet_velocity(), 0.0);
        let lid = DVec2::new(self.lid_velocity(), 0.0);
        let mut fields = self.lattice_mut().split_mut();

        for idx in 0..fields.kind.len() {
            match fields.kind[idx] {
                CellKind::Fluid      => reflect_domain_edge(&mut fields, extent, idx),
                CellKind::Obstacle   => bounce_back(&mut fields, extent, idx, DVec2::ZERO),
                CellKind::MovingWall => bounce_back(&mut fields, extent, idx, lid),
                CellKind::Inlet      => velocity_inlet(&mut fields, extent, idx, inlet),
                CellKind::Outlet     => pressure_outlet(&mut fields, extent, idx),
            }
        }
    }
}

/// Overwrite a cell with the equilibrium set for `(density, u)`.
fn impose_equilibrium(fields: &mut LatticeFields<'_>, idx: usize, density: f64, u: DVec2) {
    fields.density[idx] = density;
    fields.velocity[idx] = u;
    fields.f[idx] = d2q9::equilibrium_set(density, u);
}

/// Halfway bounce-back from the solid cell `idx` into each fluid neighbour.
///
/// For a neighbour `n = idx + c_i` the population arriving along `i` came
/// from inside the wall; it is replaced by `n`'s own post-collision
/// population heading into the wall, `f_next[opp(i)](n)`.  A moving wall adds
/// `2 w_i ρ₀ (c_i · u_wall) / c_s²`; on a straight lid the terms of the two
/// diagonals cancel, so the wall injects momentum but no mass.
///
/// The solid cell itself is then reset to equilibrium at the reference
/// density and the wall velocity.
fn bounce_back(fields: &mut LatticeFields<'_>, extent: Extent, idx: usize, wall: DVec2) {
    for i in 1..Q {
        let [cx, cy] = VELOCITIES[i];
        let Some(n) = extent.neighbour(idx, cx, cy) else { continue };
        if fields.kind[n] != CellKind::Fluid {
            continue;
        }
        let reflected = fields.f_next[n][OPPOSITE[i]];
        let cu = cx as f64 * wall.x + cy as f64 * wall.y;
        fields.f[n][i] = reflected + 2.0 * WEIGHTS[i] * REFERENCE_DENSITY * cu / CS_SQ;
    }
    impose_equilibrium(fields, idx, REFERENCE_DENSITY, wall);
}

/// Treat the grid edge as a stationary wall for a fluid cell: populations
/// whose upstream cell is off the grid are reflected from the cell itself.
fn reflect_domain_edge(fields: &mut LatticeFields<'_>, extent: Extent, idx: usize) {
    for i in 1..Q {
        let [cx, cy] = VELOCITIES[i];
        if extent.neighbour(idx, -cx, -cy).is_none() {
            fields.f[idx][i] = fields.f_next[idx][OPPOSITE[i]];
        }
    }
}

/// Impose `u = (inlet_velocity, 0)`.  Density is extrapolated from the
/// downstream fluid neighbour `(x + 1, y)`, falling back to the cell's own.
fn velocity_inlet(fields: &mut LatticeFields<'_>, extent: Extent, idx: usize, u: DVec2) {
    let density = fluid_neighbour(fields, extent, idx, 1)
        .map_or(fields.density[idx], |n| fields.density[n]);
    impose_equilibrium(fields, idx, density, u);
}

/// Pin the density to the reference value.  Velocity is copied from the
/// upstream fluid neighbour `(x - 1, y)` (zero-gradient), falling back to the
/// cell's own.
fn pressure_outlet(fields: &mut LatticeFields<'_>, extent: Extent, idx: usize) {
    let u = fluid_neighbour(fields, extent, idx, -1)
        .map_or(fields.velocity[idx], |n| fields.velocity[n]);
    impose_equilibrium(fields, idx, REFERENCE_DENSITY, u);
}

fn fluid_neighbour(fields: &LatticeFields<'_>, extent: Extent, idx: usize, dx: i32) -> Option<usize> {
    extent
        .neighbour(idx, dx, 0)
        .filter(|&n| fields.kind[n] == CellKind::Fluid)
}
