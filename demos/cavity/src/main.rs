//! cavity — command-line driver for the rust_lbm solver.
//!
//! Builds one of the preset geometries, runs the simulator until the step
//! budget is spent or the flow settles, and prints the final diagnostics.
//!
//! ```text
//! RUST_LOG=debug cargo run --release -p cavity -- --geometry cylinder --steps 5000
//! ```

use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::{Builder, Env};
use log::LevelFilter;

use lbm_core::Geometry;
use lbm_lattice::{Lattice, LatticeBuilder};
use lbm_sim::{LogObserver, SimObserver, Simulator};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    Open,
    Channel,
    Cylinder,
    Cavity,
}

impl From<Preset> for Geometry {
    fn from(p: Preset) -> Self {
        match p {
            Preset::Open     => Geometry::Open,
            Preset::Channel  => Geometry::Channel,
            Preset::Cylinder => Geometry::Cylinder,
            Preset::Cavity   => Geometry::Cavity,
        }
    }
}

/// D2Q9 lattice Boltzmann flow solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Preset geometry
    #[arg(short, long, value_enum, default_value_t = Preset::Cavity)]
    geometry: Preset,

    /// Grid width in cells
    #[arg(long, default_value_t = 64)]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 64)]
    height: usize,

    /// Kinematic viscosity in lattice units
    #[arg(long, default_value_t = lbm_core::config::DEFAULT_VISCOSITY)]
    viscosity: f64,

    /// Inlet speed for channel and cylinder flow
    #[arg(long, default_value_t = lbm_core::config::DEFAULT_INLET_VELOCITY)]
    inlet_velocity: f64,

    /// Lid speed for cavity flow
    #[arg(long, default_value_t = lbm_sim::sim::DEFAULT_LID_VELOCITY)]
    lid_velocity: f64,

    /// Maximum number of steps
    #[arg(short, long, default_value_t = 10_000)]
    steps: u64,

    /// Log a diagnostics line every N steps (0 disables)
    #[arg(long, default_value_t = 500)]
    log_interval: u64,

    /// Stop once the relative kinetic-energy change per step drops below this
    #[arg(long, default_value_t = 1e-9)]
    tolerance: f64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let env = Env::default().default_filter_or(level.to_string());
    // Fails only if a logger is already installed.
    let _ = Builder::from_env(env).try_init();
}

// ── Observers ─────────────────────────────────────────────────────────────────

/// Requests a stop once kinetic energy stops changing.
struct Convergence {
    tolerance: f64,
    previous:  Option<f64>,
    settled:   bool,
}

impl Convergence {
    fn new(tolerance: f64) -> Self {
        Self { tolerance, previous: None, settled: false }
    }
}

impl SimObserver for Convergence {
    fn on_step_end(&mut self, time_step: u64, lattice: &Lattice) {
        let energy = lbm_sim::diagnostics::kinetic_energy(lattice);
        if let Some(prev) = self.previous.filter(|&p| p > 0.0) {
            if ((energy - prev) / prev).abs() < self.tolerance {
                log::info!("kinetic energy settled at step {time_step}");
                self.settled = true;
            }
        }
        self.previous = Some(energy);
    }

    fn should_stop(&mut self) -> bool {
        self.settled
    }
}

/// Fans callbacks out to two observers.
struct Both<A, B>(A, B);

impl<A: SimObserver, B: SimObserver> SimObserver for Both<A, B> {
    fn on_step_start(&mut self, time_step: u64) {
        self.0.on_step_start(time_step);
        self.1.on_step_start(time_step);
    }

    fn on_step_end(&mut self, time_step: u64, lattice: &Lattice) {
        self.0.on_step_end(time_step, lattice);
        self.1.on_step_end(time_step, lattice);
    }

    fn should_stop(&mut self) -> bool {
        // Poll both so neither misses a call.
        let a = self.0.should_stop();
        let b = self.1.should_stop();
        a || b
    }

    fn on_run_end(&mut self, final_time_step: u64) {
        self.0.on_run_end(final_time_step);
        self.1.on_run_end(final_time_step);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // 1. Build the lattice.
    let geometry = Geometry::from(args.geometry);
    let mut lattice = LatticeBuilder::new(args.width, args.height)
        .viscosity(args.viscosity)
        .inlet_velocity(args.inlet_velocity)
        .geometry(geometry)
        .build()
        .context("invalid lattice parameters")?;
    log::info!(
        "{geometry:?} {}x{}  viscosity {}  tau {:.4}",
        lattice.width(),
        lattice.height(),
        lattice.viscosity(),
        lattice.tau(),
    );

    // 2. Run.
    let mut sim = Simulator::new(&mut lattice);
    sim.set_lid_velocity(args.lid_velocity)?;
    let mut observer = Both(LogObserver::new(args.log_interval), Convergence::new(args.tolerance));

    let t0 = Instant::now();
    sim.start();
    let taken = sim.run_while_running(args.steps, &mut observer)?;
    let elapsed = t0.elapsed();

    // 3. Report.
    let cells = (sim.lattice().len() as u64 * taken) as f64;
    println!("{}", sim.diagnostics());
    println!(
        "{taken} steps in {:.2?}  ({:.2} MLUPS)",
        elapsed,
        cells / elapsed.as_secs_f64().max(f64::EPSILON) / 1e6,
    );
    Ok(())
}
