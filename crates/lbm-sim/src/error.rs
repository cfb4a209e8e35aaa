use lbm_core::LbmError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("numerical instability at step {step}: cell ({x}, {y}) has density {density}")]
    NumericalInstability {
        step:    u64,
        x:       usize,
        y:       usize,
        density: f64,
    },

    #[error("lattice error: {0}")]
    Lattice(#[from] LbmError),
}

pub type SimResult<T> = Result<T, SimError>;
