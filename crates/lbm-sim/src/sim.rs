//! The `Simulator` struct and its step loop.

use lbm_core::d2q9::{self, Q, VELOCITIES};
use lbm_core::{CellKind, DVec2, LbmError};
use lbm_lattice::{Lattice, LatticeFields};

use crate::diagnostics::{self, Diagnostics};
use crate::{SimError, SimObserver, SimResult};

/// Default lid speed for cavity flow, in lattice units.
pub const DEFAULT_LID_VELOCITY: f64 = 0.1;

// ── Run state ─────────────────────────────────────────────────────────────────

/// Advisory run flag.  `step()` ignores it; external driver loops (and
/// [`Simulator::run_while_running`]) consult it.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

// ── Simulator ─────────────────────────────────────────────────────────────────

/// Time-stepping engine bound to a borrowed [`Lattice`].
///
/// The simulator never owns the lattice: the borrow `&'a mut Lattice`
/// guarantees the lattice outlives the simulator, and dropping the simulator
/// hands the lattice back to its owner with whatever state the last step
/// left in it.
pub struct Simulator<'a> {
    lattice:          &'a mut Lattice,
    time_step:        u64,
    state:            RunState,
    lid_velocity:     f64,
    average_density:  f64,
    average_velocity: DVec2,
}

impl<'a> Simulator<'a> {
    /// Bind a stopped simulator at step 0 to `lattice`.
    pub fn new(lattice: &'a mut Lattice) -> Self {
        Self {
            lattice,
            time_step:        0,
            state:            RunState::Stopped,
            lid_velocity:     DEFAULT_LID_VELOCITY,
            average_density:  0.0,
            average_velocity: DVec2::ZERO,
        }
    }

    // ── Control ───────────────────────────────────────────────────────────

    pub fn start(&mut self) {
        self.state = RunState::Running;
        log::info!("simulator started at step {}", self.time_step);
    }

    pub fn stop(&mut self) {
        self.state = RunState::Stopped;
        log::info!("simulator stopped at step {}", self.time_step);
    }

    /// Re-seed the lattice at equilibrium (keeping its geometry), zero the
    /// step counter and diagnostics, and stop.
    pub fn reset(&mut self) {
        self.lattice.initialize_equilibrium();
        self.time_step = 0;
        self.average_density = 0.0;
        self.average_velocity = DVec2::ZERO;
        self.state = RunState::Stopped;
        log::info!("simulator reset");
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[inline]
    pub fn time_step(&self) -> u64 {
        self.time_step
    }

    /// Mean density over non-solid cells after the last step.
    #[inline]
    pub fn average_density(&self) -> f64 {
        self.average_density
    }

    /// Mean velocity over non-solid cells after the last step.
    #[inline]
    pub fn average_velocity(&self) -> DVec2 {
        self.average_velocity
    }

    #[inline]
    pub fn lid_velocity(&self) -> f64 {
        self.lid_velocity
    }

    /// Set the tangential speed of `MovingWall` cells.
    pub fn set_lid_velocity(&mut self, velocity: f64) -> SimResult<()> {
        if !velocity.is_finite() {
            return Err(LbmError::InvalidVelocity(velocity).into());
        }
        self.lid_velocity = velocity;
        Ok(())
    }

    /// Read access for external consumers (visualisation, export).
    pub fn lattice(&self) -> &Lattice {
        self.lattice
    }

    /// Mutable access for drivers that edit geometry between steps.
    pub fn lattice_mut(&mut self) -> &mut Lattice {
        self.lattice
    }

    // ── Diagnostics ───────────────────────────────────────────────────────

    /// `0.5 * Σ ρ |u|²` over non-solid cells.
    pub fn kinetic_energy(&self) -> f64 {
        diagnostics::kinetic_energy(self.lattice)
    }

    /// `Σ ρ` over non-solid cells.
    pub fn total_mass(&self) -> f64 {
        diagnostics::total_mass(self.lattice)
    }

    /// `Σ ρ u` over non-solid cells.
    pub fn momentum(&self) -> DVec2 {
        diagnostics::momentum(self.lattice)
    }

    /// Full snapshot at the current step.
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::measure(self.lattice, self.time_step)
    }

    // ── Run loops ─────────────────────────────────────────────────────────

    /// Run exactly `n` steps regardless of the run flag.
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            observer.on_step_start(self.time_step);
            self.step()?;
            observer.on_step_end(self.time_step, self.lattice);
        }
        observer.on_run_end(self.time_step);
        Ok(())
    }

    /// Step while the run flag is set, for at most `max_steps` steps.
    ///
    /// The simulator stops itself when the budget is spent or the observer's
    /// [`should_stop`](SimObserver::should_stop) returns `true`.  Returns the
    /// number of steps taken; zero if the simulator was not running.
    pub fn run_while_running<O: SimObserver>(
        &mut self,
        max_steps: u64,
        observer: &mut O,
    ) -> SimResult<u64> {
        let mut taken = 0;
        while self.is_running() && taken < max_steps {
            observer.on_step_start(self.time_step);
            if let Err(e) = self.step() {
                self.stop();
                return Err(e);
            }
            taken += 1;
            observer.on_step_end(self.time_step, self.lattice);
            if observer.should_stop() {
                self.stop();
            }
        }
        if self.is_running() {
            self.stop();
        }
        observer.on_run_end(self.time_step);
        Ok(taken)
    }

    // ── Step ──────────────────────────────────────────────────────────────

    /// Advance one time step: collision, streaming, boundary correction,
    /// macroscopic recomputation.
    ///
    /// Runs whether or not the simulator is flagged as running.  On
    /// [`SimError::NumericalInstability`] the step counter is not advanced
    /// and the lattice holds the partially updated state.
    pub fn step(&mut self) -> SimResult<()> {
        self.collision();
        self.streaming();
        self.apply_boundary_conditions();
        if let Err(e) = self.calculate_macroscopic_properties() {
            log::error!("step aborted: {e}");
            return Err(e);
        }
        self.time_step += 1;
        Ok(())
    }

    /// BGK relaxation `f_next = f - (f - f_eq) / tau` on every non-solid
    /// cell, using the cell's current density and velocity.  Solid cells copy
    /// `f` unchanged.
    pub fn collision(&mut self) {
        let omega = 1.0 / self.lattice.tau();
        let LatticeFields { f, f_next, density, velocity, kind } = self.lattice.split_mut();

        let relax = |((post, pre), ((&rho, &u), &kind)): (
            (&mut [f64; Q], &[f64; Q]),
            ((&f64, &DVec2), &CellKind),
        )| {
            if kind.is_solid() {
                *post = *pre;
                return;
            }
            for i in 0..Q {
                let feq = d2q9::equilibrium(i, rho, u);
                post[i] = pre[i] - omega * (pre[i] - feq);
            }
        };

        #[cfg(not(feature = "parallel"))]
        {
            f_next
                .iter_mut()
                .zip(f.iter())
                .zip(density.iter().zip(velocity.iter()).zip(kind.iter()))
                .for_each(relax);
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            f_next
                .par_iter_mut()
                .zip(f.par_iter())
                .zip(density.par_iter().zip(velocity.par_iter()).zip(kind.par_iter()))
                .for_each(relax);
        }
    }

    /// Pull streaming: `f[i](x) = f_next[i](x - c_i)`.
    ///
    /// Each destination cell reads only `f_next`, so no cell sees a value
    /// written during this sweep.  Directions whose source lies off the grid
    /// keep their stale value until boundary correction replaces it.
    pub fn streaming(&mut self) {
        let extent = self.lattice.extent();
        let LatticeFields { f, f_next, .. } = self.lattice.split_mut();
        let post: &[[f64; Q]] = f_next;

        let pull = |(idx, dst): (usize, &mut [f64; Q])| {
            for (i, c) in VELOCITIES.iter().enumerate() {
                if let Some(src) = extent.neighbour(idx, -c[0], -c[1]) {
                    dst[i] = post[src][i];
                }
            }
        };

        #[cfg(not(feature = "parallel"))]
        {
            f.iter_mut().enumerate().for_each(pull);
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            f.par_iter_mut().enumerate().for_each(pull);
        }
    }

    /// Recompute density and velocity of every non-solid cell from its
    /// populations and refresh the domain averages.
    ///
    /// A cell whose density is not finite and positive aborts with
    /// [`SimError::NumericalInstability`]; the averages are left untouched.
    pub fn calculate_macroscopic_properties(&mut self) -> SimResult<()> {
        let extent = self.lattice.extent();
        let LatticeFields { f, density, velocity, kind, .. } = self.lattice.split_mut();

        type Sums = (f64, DVec2, usize);
        let recover = |(idx, ((pop, rho), (u, &kind))): (
            usize,
            ((&[f64; Q], &mut f64), (&mut DVec2, &CellKind)),
        )|
         -> Result<Sums, (usize, f64)> {
            if kind.is_solid() {
                return Ok((0.0, DVec2::ZERO, 0));
            }
            let (sum, momentum) = d2q9::moments(pop);
            if !sum.is_finite() || sum <= 0.0 {
                return Err((idx, sum));
            }
            *rho = sum;
            *u = momentum / sum;
            Ok((sum, *u, 1))
        };
        let add = |a: Sums, b: Sums| (a.0 + b.0, a.1 + b.1, a.2 + b.2);

        #[cfg(not(feature = "parallel"))]
        let result = f
            .iter()
            .zip(density.iter_mut())
            .zip(velocity.iter_mut().zip(kind.iter()))
            .enumerate()
            .map(recover)
            .try_fold((0.0, DVec2::ZERO, 0), |acc, cell| cell.map(|c| add(acc, c)));

        #[cfg(feature = "parallel")]
        let result = {
            use rayon::prelude::*;

            f.par_iter()
                .zip(density.par_iter_mut())
                .zip(velocity.par_iter_mut().zip(kind.par_iter()))
                .enumerate()
                .map(recover)
                .try_reduce(|| (0.0, DVec2::ZERO, 0), |a, b| Ok(add(a, b)))
        };

        match result {
            Ok((rho_sum, u_sum, count)) => {
                if count == 0 {
                    self.average_density = 0.0;
                    self.average_velocity = DVec2::ZERO;
                } else {
                    self.average_density = rho_sum / count as f64;
                    self.average_velocity = u_sum / count as f64;
                }
                Ok(())
            }
            Err((idx, density)) => {
                let (x, y) = extent.coords(idx);
                Err(SimError::NumericalInstability {
                    step: self.time_step,
                    x,
                    y,
                    density,
                })
            }
        }
    }
}
