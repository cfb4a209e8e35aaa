//! The D2Q9 velocity set and the second-order equilibrium distribution.
//!
//! Direction numbering:
//!
//! ```text
//!   6   2   5
//!    \  |  /
//!   3 - 0 - 1
//!    /  |  \
//!   7   4   8
//! ```
//!
//! Index 0 is the rest population, 1–4 are cardinal, 5–8 diagonal.  The `y`
//! component follows the grid's row index, so direction 2 points towards
//! larger `y`.

use glam::DVec2;

/// Number of discrete velocities.
pub const Q: usize = 9;

/// Discrete velocities `c_i` as `[cx, cy]`.
pub const VELOCITIES: [[i32; 2]; Q] = [
    [0, 0],
    [1, 0],
    [0, 1],
    [-1, 0],
    [0, -1],
    [1, 1],
    [-1, 1],
    [-1, -1],
    [1, -1],
];

/// Quadrature weights `w_i`, same index order as [`VELOCITIES`].
pub const WEIGHTS: [f64; Q] = [
    4.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
];

/// `OPPOSITE[i]` is the direction with `c = -c_i`.
pub const OPPOSITE: [usize; Q] = [0, 3, 4, 1, 2, 7, 8, 5, 6];

/// Lattice speed of sound squared, `c_s² = 1/3`.
pub const CS_SQ: f64 = 1.0 / 3.0;

/// Density of the rest state, used for seeding, outlets and walls.
pub const REFERENCE_DENSITY: f64 = 1.0;

/// Direction opposite to `i`.
#[inline(always)]
pub fn opposite(i: usize) -> usize {
    OPPOSITE[i]
}

/// `c_i` as a vector.
#[inline]
pub fn velocity(i: usize) -> DVec2 {
    DVec2::new(VELOCITIES[i][0] as f64, VELOCITIES[i][1] as f64)
}

/// Equilibrium population for direction `i`:
///
/// `w_i ρ (1 + 3 (u·c_i) + 4.5 (u·c_i)² − 1.5 |u|²)`
#[inline]
pub fn equilibrium(i: usize, density: f64, u: DVec2) -> f64 {
    let cu = u.x * VELOCITIES[i][0] as f64 + u.y * VELOCITIES[i][1] as f64;
    let uu = u.length_squared();
    WEIGHTS[i] * density * (1.0 + 3.0 * cu + 4.5 * cu * cu - 1.5 * uu)
}

/// All nine equilibrium populations for one cell.
#[inline]
pub fn equilibrium_set(density: f64, u: DVec2) -> [f64; Q] {
    std::array::from_fn(|i| equilibrium(i, density, u))
}

/// Zeroth and first moments of a population set: `(Σ f_i, Σ f_i c_i)`.
#[inline]
pub fn moments(f: &[f64; Q]) -> (f64, DVec2) {
    let mut density = 0.0;
    let mut momentum = DVec2::ZERO;
    for (fi, c) in f.iter().zip(VELOCITIES.iter()) {
        density += fi;
        momentum.x += fi * c[0] as f64;
        momentum.y += fi * c[1] as f64;
    }
    (density, momentum)
}
