//! Simulation observer trait for progress reporting and monitoring.

use lbm_lattice::Lattice;

use crate::Diagnostics;

/// Callbacks invoked by [`Simulator::run_steps`][crate::Simulator::run_steps]
/// and [`Simulator::run_while_running`][crate::Simulator::run_while_running].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — kinetic energy trace
///
/// ```rust,ignore
/// struct EnergyTrace(Vec<f64>);
///
/// impl SimObserver for EnergyTrace {
///     fn on_step_end(&mut self, _step: u64, lattice: &Lattice) {
///         self.0.push(lbm_sim::diagnostics::kinetic_energy(lattice));
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before each step.  `time_step` is the counter before the step.
    fn on_step_start(&mut self, _time_step: u64) {}

    /// Called after each successful step with read access to the lattice.
    /// `time_step` is the counter after the step.
    fn on_step_end(&mut self, _time_step: u64, _lattice: &Lattice) {}

    /// Polled after `on_step_end` by
    /// [`run_while_running`][crate::Simulator::run_while_running]; returning
    /// `true` stops the simulator.
    fn should_stop(&mut self) -> bool {
        false
    }

    /// Called once after the last step of a run.
    fn on_run_end(&mut self, _final_time_step: u64) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Logs a [`Diagnostics`] snapshot at `info` every `interval` steps.
pub struct LogObserver {
    interval: u64,
}

impl LogObserver {
    /// `interval = 0` disables the periodic snapshot; only the end-of-run
    /// line is logged.
    pub fn new(interval: u64) -> Self {
        Self { interval }
    }
}

impl SimObserver for LogObserver {
    fn on_step_end(&mut self, time_step: u64, lattice: &Lattice) {
        if self.interval > 0 && time_step.is_multiple_of(self.interval) {
            log::info!("{}", Diagnostics::measure(lattice, time_step));
        }
    }

    fn on_run_end(&mut self, final_time_step: u64) {
        log::info!("run finished at step {final_time_step}");
    }
}
