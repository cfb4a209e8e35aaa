//! Lattice error type.
//!
//! `lbm-sim` keeps its own `SimError` and wraps `LbmError` as one variant.

use thiserror::Error;

/// Configuration and validation errors raised while building or mutating a
/// lattice.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LbmError {
    #[error("lattice dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("viscosity must be finite and > 0 (tau = 3*nu + 0.5 must exceed 0.5), got {0}")]
    InvalidViscosity(f64),

    #[error("inlet velocity must be finite, got {0}")]
    InvalidVelocity(f64),

    #[error("cell ({x}, {y}) is outside the {width}x{height} lattice")]
    OutOfBounds {
        x:      usize,
        y:      usize,
        width:  usize,
        height: usize,
    },
}

/// Shorthand result type for the lattice crates.
pub type LbmResult<T> = Result<T, LbmError>;
