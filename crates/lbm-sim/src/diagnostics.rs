//! Domain-wide reductions over the lattice.
//!
//! Solid cells (`Obstacle`, `MovingWall`) are excluded from every sum and
//! average: their populations are rebuilt each step and carry no fluid
//! mass.  Inlet and outlet cells are included.

use std::fmt;

use lbm_core::DVec2;
use lbm_lattice::Lattice;

/// Iterator over `(density, velocity)` of every non-solid cell.
fn fluid_cells(lattice: &Lattice) -> impl Iterator<Item = (f64, DVec2)> + '_ {
    lattice
        .kinds()
        .iter()
        .zip(lattice.density().iter().zip(lattice.velocity().iter()))
        .filter(|(kind, _)| !kind.is_solid())
        .map(|(_, (&rho, &u))| (rho, u))
}

/// `0.5 * Σ ρ |u|²`.
pub fn kinetic_energy(lattice: &Lattice) -> f64 {
    0.5 * fluid_cells(lattice)
        .map(|(rho, u)| rho * u.length_squared())
        .sum::<f64>()
}

/// `Σ ρ`.
pub fn total_mass(lattice: &Lattice) -> f64 {
    fluid_cells(lattice).map(|(rho, _)| rho).sum()
}

/// `Σ ρ u`.
pub fn momentum(lattice: &Lattice) -> DVec2 {
    fluid_cells(lattice).map(|(rho, u)| u * rho).sum()
}

/// Largest `|u|` over non-solid cells, zero if there are none.
pub fn max_speed(lattice: &Lattice) -> f64 {
    fluid_cells(lattice)
        .map(|(_, u)| u.length())
        .fold(0.0, f64::max)
}

/// Mean density and mean velocity over non-solid cells.
///
/// Both are zero for a lattice with no non-solid cells.
pub fn averages(lattice: &Lattice) -> (f64, DVec2, usize) {
    let (rho_sum, u_sum, count) = fluid_cells(lattice)
        .fold((0.0, DVec2::ZERO, 0usize), |(r, v, n), (rho, u)| (r + rho, v + u, n + 1));
    if count == 0 {
        return (0.0, DVec2::ZERO, 0);
    }
    (rho_sum / count as f64, u_sum / count as f64, count)
}

// ── Diagnostics ───────────────────────────────────────────────────────────────

/// Snapshot of every domain-wide quantity at one time step.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostics {
    pub time_step:        u64,
    pub fluid_cells:      usize,
    pub total_mass:       f64,
    pub kinetic_energy:   f64,
    pub momentum:         DVec2,
    pub average_density:  f64,
    pub average_velocity: DVec2,
    pub max_speed:        f64,
}

impl Diagnostics {
    /// Measure `lattice`, labelling the snapshot with `time_step`.
    pub fn measure(lattice: &Lattice, time_step: u64) -> Self {
        let (average_density, average_velocity, fluid_cells) = averages(lattice);
        Self {
            time_step,
            fluid_cells,
            total_mass: total_mass(lattice),
            kinetic_energy: kinetic_energy(lattice),
            momentum: momentum(lattice),
            average_density,
            average_velocity,
            max_speed: max_speed(lattice),
        }
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "step {}: mass {:.6}, KE {:.6e}, momentum ({:.4e}, {:.4e}), avg rho {:.6}, max |u| {:.4}",
            self.time_step,
            self.total_mass,
            self.kinetic_energy,
            self.momentum.x,
            self.momentum.y,
            self.average_density,
            self.max_speed,
        )
    }
}
