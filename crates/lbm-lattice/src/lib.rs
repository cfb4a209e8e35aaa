//! `lbm-lattice` — flat structure-of-arrays D2Q9 lattice for the `rust_lbm`
//! solver.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`lattice`]     | `Lattice` (SoA grid), `Extent`, `LatticePoint`, `LatticeFields` |
//! | [`geometry`]    | Boundary setters and channel / cylinder / cavity presets  |
//! | [`builder`]     | `LatticeBuilder` (fluent construction)                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `LatticePoint`.       |

pub mod builder;
pub mod geometry;
pub mod lattice;

#[cfg(test)]
mod tests;

pub use builder::LatticeBuilder;
pub use lattice::{Extent, Lattice, LatticeFields, LatticePoint};
