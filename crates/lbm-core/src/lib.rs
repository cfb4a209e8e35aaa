//! `lbm-core` — foundational types for the `rust_lbm` solver.
//!
//! This crate is a dependency of every other `lbm-*` crate.  It has no
//! `lbm-*` dependencies and minimal external ones (`glam` for the 2D vector
//! value type and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`d2q9`]        | Velocity set, weights, opposite table, equilibrium, moments |
//! | [`cell`]        | `CellKind` boundary classification                        |
//! | [`config`]      | `LatticeConfig`, `Geometry`, `tau` derivation             |
//! | [`error`]       | `LbmError`, `LbmResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod cell;
pub mod config;
pub mod d2q9;
pub mod error;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::CellKind;
pub use config::{Geometry, LatticeConfig};
pub use error::{LbmError, LbmResult};

/// The 2D vector value type used for velocities and momenta.
pub use glam::DVec2;
