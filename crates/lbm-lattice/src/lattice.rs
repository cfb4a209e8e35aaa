//! Core lattice storage.
//!
//! # Layout
//!
//! The grid is one contiguous arena per field, indexed by
//! `y * width + x`.  Distributions are double-buffered: `f` holds the
//! populations of the current step and `f_next` is the write target of the
//! collision sweep.  The two buffers are never merged; the step loop in
//! `lbm-sim` reads one while writing the other.
//!
//! ```ignore
//! // lbm-sim collision (simplified):
//! let fields = lattice.split_mut();
//! for idx in 0..fields.f.len() {
//!     fields.f_next[idx] = relax(&fields.f[idx], fields.density[idx], fields.velocity[idx]);
//! }
//! ```

use lbm_core::d2q9::{self, Q, REFERENCE_DENSITY};
use lbm_core::{CellKind, DVec2, LatticeConfig, LbmResult};

// ── LatticePoint ──────────────────────────────────────────────────────────────

/// Copy of one cell's state, assembled from the SoA arrays.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticePoint {
    pub f:        [f64; Q],
    pub f_next:   [f64; Q],
    pub density:  f64,
    pub velocity: DVec2,
    pub kind:     CellKind,
}

// ── LatticeFields ─────────────────────────────────────────────────────────────

/// Disjoint mutable borrows of every per-cell array.
///
/// The step loop needs `&mut f` while reading `f_next` (and the reverse), so
/// the arrays are handed out together instead of through separate getters.
/// `kind` is read-only here: geometry changes go through the setters.
pub struct LatticeFields<'a> {
    pub f:        &'a mut [[f64; Q]],
    pub f_next:   &'a mut [[f64; Q]],
    pub density:  &'a mut [f64],
    pub velocity: &'a mut [DVec2],
    pub kind:     &'a [CellKind],
}

// ── Extent ────────────────────────────────────────────────────────────────────

/// Grid dimensions with the index arithmetic shared by [`Lattice`] and the
/// step loop.  `Copy`, so sweeps can keep it while the lattice is split into
/// field borrows.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Extent {
    pub width:  usize,
    pub height: usize,
}

impl Extent {
    /// Arena index of `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn index(self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// `(x, y)` of an arena index.
    #[inline]
    pub fn coords(self, idx: usize) -> (usize, usize) {
        (idx % self.width, idx / self.width)
    }

    /// Index of the cell at `idx + (dx, dy)`, or `None` off the grid.
    #[inline]
    pub fn neighbour(self, idx: usize, dx: i32, dy: i32) -> Option<usize> {
        let (x, y) = self.coords(idx);
        self.offset(x, y, dx, dy)
    }

    /// Index of `(x + dx, y + dy)`, or `None` off the grid.  No wraparound.
    #[inline]
    pub fn offset(self, x: usize, y: usize, dx: i32, dy: i32) -> Option<usize> {
        let nx = x.checked_add_signed(dx as isize)?;
        let ny = y.checked_add_signed(dy as isize)?;
        self.index(nx, ny)
    }
}

// ── Lattice ───────────────────────────────────────────────────────────────────

/// A `height x width` D2Q9 grid plus its BGK parameters.
///
/// Every array has exactly `width * height` elements for the lattice's
/// lifetime.
pub struct Lattice {
    pub(crate) config: LatticeConfig,
    tau: f64,

    pub(crate) f:        Vec<[f64; Q]>,
    pub(crate) f_next:   Vec<[f64; Q]>,
    pub(crate) density:  Vec<f64>,
    pub(crate) velocity: Vec<DVec2>,
    pub(crate) kind:     Vec<CellKind>,
}

impl Lattice {
    /// Validate `config`, allocate the grid and seed it at equilibrium.
    ///
    /// All cells start as [`CellKind::Fluid`].
    pub fn new(config: LatticeConfig) -> LbmResult<Self> {
        let tau = config.validate()?;
        if tau < 0.51 {
            log::warn!("tau = {tau:.4} is close to the 0.5 stability limit");
        }
        let mach = config.inlet_velocity.abs() / d2q9::CS_SQ.sqrt();
        if mach > 0.3 {
            log::warn!(
                "inlet velocity {} is Mach {mach:.2}; compressibility error grows above 0.3",
                config.inlet_velocity
            );
        }

        let n = config.cell_count();
        let mut lattice = Self {
            config,
            tau,
            f:        vec![[0.0; Q]; n],
            f_next:   vec![[0.0; Q]; n],
            density:  vec![REFERENCE_DENSITY; n],
            velocity: vec![DVec2::ZERO; n],
            kind:     vec![CellKind::Fluid; n],
        };
        lattice.initialize_equilibrium();
        Ok(lattice)
    }

    /// `width x height` lattice with default viscosity and inlet speed.
    pub fn with_defaults(width: usize, height: usize) -> LbmResult<Self> {
        Self::new(LatticeConfig::new(width, height))
    }

    // ── Parameters ────────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> usize {
        self.config.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.config.height
    }

    /// Number of cells, `width * height`.
    #[inline]
    pub fn len(&self) -> usize {
        self.kind.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    /// BGK relaxation time, `3 * viscosity + 0.5`.  Always > 0.5.
    #[inline]
    pub fn tau(&self) -> f64 {
        self.tau
    }

    #[inline]
    pub fn viscosity(&self) -> f64 {
        self.config.viscosity
    }

    #[inline]
    pub fn inlet_velocity(&self) -> f64 {
        self.config.inlet_velocity
    }

    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    // ── Indexing ──────────────────────────────────────────────────────────

    /// Width and height as a standalone value.
    #[inline]
    pub fn extent(&self) -> Extent {
        Extent {
            width:  self.config.width,
            height: self.config.height,
        }
    }

    /// Arena index of `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> Option<usize> {
        self.extent().index(x, y)
    }

    /// Arena index of the cell reached from `(x, y)` by the offset
    /// `(dx, dy)`, or `None` if that leaves the grid.  No wraparound.
    #[inline]
    pub fn offset_index(&self, x: usize, y: usize, dx: i32, dy: i32) -> Option<usize> {
        self.extent().offset(x, y, dx, dy)
    }

    /// `(x, y)` of an arena index.
    #[inline]
    pub fn coords(&self, idx: usize) -> (usize, usize) {
        self.extent().coords(idx)
    }

    /// `true` if `(x, y)` lies in the first or last row or column.
    #[inline]
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 == self.config.width || y + 1 == self.config.height
    }

    // ── Cell access ───────────────────────────────────────────────────────

    /// Copy of the cell at `(x, y)`, or `None` outside the grid.
    pub fn point(&self, x: usize, y: usize) -> Option<LatticePoint> {
        let idx = self.index(x, y)?;
        Some(LatticePoint {
            f:        self.f[idx],
            f_next:   self.f_next[idx],
            density:  self.density[idx],
            velocity: self.velocity[idx],
            kind:     self.kind[idx],
        })
    }

    /// Kind of the cell at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn kind_at(&self, x: usize, y: usize) -> Option<CellKind> {
        self.index(x, y).map(|idx| self.kind[idx])
    }

    pub fn f(&self) -> &[[f64; Q]] {
        &self.f
    }

    pub fn f_next(&self) -> &[[f64; Q]] {
        &self.f_next
    }

    pub fn density(&self) -> &[f64] {
        &self.density
    }

    pub fn velocity(&self) -> &[DVec2] {
        &self.velocity
    }

    pub fn kinds(&self) -> &[CellKind] {
        &self.kind
    }

    /// Split the lattice into disjoint mutable field borrows for one sweep.
    pub fn split_mut(&mut self) -> LatticeFields<'_> {
        LatticeFields {
            f:        &mut self.f,
            f_next:   &mut self.f_next,
            density:  &mut self.density,
            velocity: &mut self.velocity,
            kind:     &self.kind,
        }
    }

    // ── Equilibrium ───────────────────────────────────────────────────────

    /// Equilibrium population for direction `i`.  See [`d2q9::equilibrium`].
    #[inline]
    pub fn equilibrium(&self, i: usize, density: f64, velocity: DVec2) -> f64 {
        d2q9::equilibrium(i, density, velocity)
    }

    /// Reset every cell to the rest state at the reference density.
    ///
    /// Inlet cells start moving at `(inlet_velocity, 0)`; everything else
    /// starts at rest.  Both buffers receive the same equilibrium set.
    pub fn initialize_equilibrium(&mut self) {
        let inlet = DVec2::new(self.config.inlet_velocity, 0.0);
        for idx in 0..self.kind.len() {
            let u = if self.kind[idx] == CellKind::Inlet { inlet } else { DVec2::ZERO };
            let feq = d2q9::equilibrium_set(REFERENCE_DENSITY, u);
            self.density[idx] = REFERENCE_DENSITY;
            self.velocity[idx] = u;
            self.f[idx] = feq;
            self.f_next[idx] = feq;
        }
    }
}
