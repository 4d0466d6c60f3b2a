//! Error taxonomy for photometry runs
//!
//! [`PhotometryError`] aborts a whole call before any filter is processed.
//! [`FilterError`] is recorded against a single filter and never stops the
//! others.

use thiserror::Error;

use super::band::BandLimits;
use super::trapezoid::TrapezoidError;
use crate::algo::misc::InterpError;

/// Inputs a photometry call cannot start without
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    Spectrum,
    Curves,
    ZeroPoints,
}

impl std::fmt::Display for MissingInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingInput::Spectrum => write!(f, "spectrum not loaded"),
            MissingInput::Curves => write!(f, "filter transmission curves not defined"),
            MissingInput::ZeroPoints => write!(f, "zero points not defined"),
        }
    }
}

/// Call-level failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhotometryError {
    #[error("Missing input: {0}")]
    MissingInput(MissingInput),
}

/// Per-filter failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    #[error("Filter support {band} does not overlap the spectrum ({spectrum:?})")]
    NoOverlap {
        band: BandLimits,
        spectrum: Option<BandLimits>,
    },

    #[error("Integrated throughput is {0}, the bandpass is degenerate")]
    DegenerateBandpass(f64),

    #[error("Integrated flux is {0}, expected a finite non-negative value")]
    InvalidFlux(f64),

    #[error("No zero point for filter {0}")]
    MissingZeroPoint(String),

    #[error("Zero point for filter {0} is unusable: {1}")]
    InvalidZeroPoint(String, f64),

    #[error("Mean flux density {0} is not positive, the filter produced no signal")]
    NoSignal(f64),

    #[error("Quadrature failed: {0}")]
    Quadrature(#[from] TrapezoidError),

    #[error("Interpolation failed: {0}")]
    Interpolation(#[from] InterpError),
}
