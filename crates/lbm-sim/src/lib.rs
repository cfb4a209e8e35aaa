//! `lbm-sim` — time-stepping engine for the `rust_lbm` solver.
//!
//! # Step
//!
//! ```text
//! step():
//!   ① Collision   — BGK relaxation of every non-solid cell, f → f_next
//!                   (parallel with the `parallel` feature).
//!   ② Streaming   — pull f_next from upstream neighbours into f; no
//!                   wraparound (parallel with the `parallel` feature).
//!   ③ Boundaries  — per cell kind: bounce-back, moving wall, velocity
//!                   inlet, pressure outlet, grid-edge reflection.
//!   ④ Moments     — density / velocity per cell, domain averages
//!                   (parallel with the `parallel` feature).
//!   ⑤ time_step += 1
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                      |
//! |------------|-------------------------------------------------------------|
//! | `parallel` | Runs phases ①, ② and ④ on Rayon's thread pool.              |
//!
//! # Quick-start
//!
//! ```rust
//! use lbm_core::Geometry;
//! use lbm_lattice::LatticeBuilder;
//! use lbm_sim::{NoopObserver, Simulator};
//!
//! let mut lattice = LatticeBuilder::new(32, 32).geometry(Geometry::Cavity).build()?;
//! let mut sim = Simulator::new(&mut lattice);
//! sim.set_lid_velocity(0.05)?;
//! sim.run_steps(10, &mut NoopObserver)?;
//! assert_eq!(sim.time_step(), 10);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod boundary;
pub mod diagnostics;
pub mod error;
pub mod observer;
pub mod sim;


pub use diagnostics::Diagnostics;
pub use error::{SimError, SimResult};
pub use observer::{LogObserver, NoopObserver, SimObserver};
pub use sim::{RunState, Simulator};
