//! Boundary tagging and geometry presets.
//!
//! The flag-style setters silently ignore out-of-range
//! coordinates (the call returns `false` and logs at `debug`).
//! [`Lattice::set_cell_kind`] is the strict variant that reports the error.
//!
//! Presets overwrite every cell's kind and then re-seed equilibrium, so a
//! lattice configured by a preset is in the same state as one built directly
//! with that geometry.

use lbm_core::{CellKind, Geometry, LbmError, LbmResult};

use crate::Lattice;

impl Lattice {
    // ── Strict setter ─────────────────────────────────────────────────────

    /// Assign `kind` to `(x, y)`, failing with [`LbmError::OutOfBounds`]
    /// outside the grid.
    pub fn set_cell_kind(&mut self, x: usize, y: usize, kind: CellKind) -> LbmResult<()> {
        let idx = self.index(x, y).ok_or(LbmError::OutOfBounds {
            x,
            y,
            width:  self.width(),
            height: self.height(),
        })?;
        self.kind[idx] = kind;
        Ok(())
    }

    // ── Flag setters ──────────────────────────────────────────────────────

    /// Tag `(x, y)` as an obstacle (`flag = true`) or clear an obstacle back
    /// to fluid (`flag = false`).  Returns `false` if nothing was applied.
    pub fn set_obstacle(&mut self, x: usize, y: usize, flag: bool) -> bool {
        self.set_flag(x, y, CellKind::Obstacle, flag)
    }

    /// Tag or clear a velocity inlet.  See [`set_obstacle`](Self::set_obstacle).
    pub fn set_inlet(&mut self, x: usize, y: usize, flag: bool) -> bool {
        self.set_flag(x, y, CellKind::Inlet, flag)
    }

    /// Tag or clear a pressure outlet.  See [`set_obstacle`](Self::set_obstacle).
    pub fn set_outlet(&mut self, x: usize, y: usize, flag: bool) -> bool {
        self.set_flag(x, y, CellKind::Outlet, flag)
    }

    /// Tag or clear a moving wall.  See [`set_obstacle`](Self::set_obstacle).
    pub fn set_moving_wall(&mut self, x: usize, y: usize, flag: bool) -> bool {
        self.set_flag(x, y, CellKind::MovingWall, flag)
    }

    fn set_flag(&mut self, x: usize, y: usize, kind: CellKind, flag: bool) -> bool {
        let Some(idx) = self.index(x, y) else {
            log::debug!(
                "ignoring {kind} flag at ({x}, {y}): outside {}x{} lattice",
                self.width(),
                self.height()
            );
            return false;
        };
        if flag {
            self.kind[idx] = kind;
        } else if self.kind[idx] == kind {
            self.kind[idx] = CellKind::Fluid;
        } else {
            return false;
        }
        true
    }

    // ── Presets ───────────────────────────────────────────────────────────

    /// Apply one of the [`Geometry`] presets.
    pub fn apply_geometry(&mut self, geometry: Geometry) {
        match geometry {
            Geometry::Open     => self.setup_open(),
            Geometry::Channel  => self.setup_channel_flow(),
            Geometry::Cylinder => self.setup_cylinder_flow(),
            Geometry::Cavity   => self.setup_cavity_flow(),
        }
    }

    /// Every cell fluid.
    pub fn setup_open(&mut self) {
        self.clear_kinds();
        self.initialize_equilibrium();
    }

    /// Walls along rows `0` and `height - 1`, inlet down column `0` and
    /// outlet down column `width - 1` (both excluding the wall rows).
    pub fn setup_channel_flow(&mut self) {
        self.clear_kinds();
        self.tag_channel();
        self.initialize_equilibrium();
        log::debug!("channel preset applied to {}x{} lattice", self.width(), self.height());
    }

    /// Channel flow plus a circular obstacle of radius `height / 8` centred
    /// on `(width / 3, height / 2)`.  Cells inside the circle lose any inlet
    /// or outlet tag they had from the channel.
    pub fn setup_cylinder_flow(&mut self) {
        self.clear_kinds();
        self.tag_channel();

        let (w, h) = (self.width(), self.height());
        let cx = (w / 3) as f64;
        let cy = (h / 2) as f64;
        let radius = (h / 8) as f64;
        for y in 0..h {
            for x in 0..w {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                if (dx * dx + dy * dy).sqrt() <= radius {
                    self.kind[y * w + x] = CellKind::Obstacle;
                }
            }
        }

        self.initialize_equilibrium();
        log::debug!("cylinder preset applied: centre ({cx}, {cy}), radius {radius}");
    }

    /// Closed box.  The lid (row `0` minus the corners) is a
    /// [`CellKind::MovingWall`]; the rest of the border is obstacle.
    pub fn setup_cavity_flow(&mut self) {
        self.clear_kinds();

        let (w, h) = (self.width(), self.height());
        for x in 0..w {
            self.kind[x] = CellKind::Obstacle;
            self.kind[(h - 1) * w + x] = CellKind::Obstacle;
        }
        for y in 0..h {
            self.kind[y * w] = CellKind::Obstacle;
            self.kind[y * w + w - 1] = CellKind::Obstacle;
        }
        for x in 1..w.saturating_sub(1) {
            self.kind[x] = CellKind::MovingWall;
        }

        self.initialize_equilibrium();
        log::debug!("cavity preset applied to {w}x{h} lattice");
    }

    fn clear_kinds(&mut self) {
        self.kind.fill(CellKind::Fluid);
    }

    fn tag_channel(&mut self) {
        let (w, h) = (self.width(), self.height());
        for x in 0..w {
            self.kind[x] = CellKind::Obstacle;
            self.kind[(h - 1) * w + x] = CellKind::Obstacle;
        }
        for y in 1..h.saturating_sub(1) {
            self.kind[y * w] = CellKind::Inlet;
            self.kind[y * w + w - 1] = CellKind::Outlet;
        }
    }
}
